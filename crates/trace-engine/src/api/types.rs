use bytemuck::{Pod, Zeroable};

/// A sound event emitted by the game logic.
/// The numeric value maps to a sound in the TypeScript SoundManager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    /// Finger touched down and a new trace began.
    pub const TRACE_START: SoundEvent = SoundEvent(1);
    /// A completed trace was accurate enough.
    pub const TRACE_SUCCESS: SoundEvent = SoundEvent(2);
}

/// A game event communicated from Rust to TypeScript via a flat f32 buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// A trace was scored. `a` = passed (0/1), `b` = accuracy percent, `c` = path length.
    pub const TRACE_RESULT: f32 = 1.0;
    /// A star was awarded. `a` = total stars this session.
    pub const STAR_EARNED: f32 = 2.0;
    /// A new outline is fitted and ready to draw. `a` = point count.
    pub const OUTLINE_READY: f32 = 3.0;
    /// The current outline should start animating off-screen.
    pub const EXIT_STARTED: f32 = 4.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    pub fn trace_result(passed: bool, percent: u32, points: usize) -> Self {
        Self::new(
            Self::TRACE_RESULT,
            if passed { 1.0 } else { 0.0 },
            percent as f32,
            points as f32,
        )
    }
}
