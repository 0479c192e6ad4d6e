use glam::Vec2;

use crate::api::config::TraceConfig;
use crate::api::game::EngineContext;
use crate::api::types::SoundEvent;
use crate::input::queue::InputEvent;
use crate::Path;

/// A drawing surface that can deliver pointer events.
///
/// `attach` installs the start/move/end listeners, `detach` removes them.
/// The session guarantees the two calls are paired.
pub trait Surface {
    /// Top-left corner of the surface in client (viewport) coordinates.
    fn origin(&self) -> Vec2;
    fn attach(&mut self);
    fn detach(&mut self);
}

/// Result of feeding one pointer event to a [`CaptureSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureResult {
    /// A new path was started.
    Started,
    /// A point was appended to the current path.
    Recorded,
    /// The gesture finished; capture stopped and this is the completed path.
    Finished(Path),
    /// Preconditions not met (no surface, not tracing). Nothing changed.
    Ignored,
}

/// One input-capture registration on a surface, from start to stop.
///
/// Owned by the caller. At most one surface is active at a time: starting
/// on a new surface detaches the previous one first.
pub struct CaptureSession<S: Surface> {
    surface: Option<S>,
    /// Current or last recorded path, in surface-local coordinates.
    path: Path,
    tracing: bool,
    sound_enabled: bool,
}

impl<S: Surface> CaptureSession<S> {
    pub fn new(config: &TraceConfig) -> Self {
        Self {
            surface: None,
            path: Vec::new(),
            tracing: false,
            sound_enabled: config.sound_enabled,
        }
    }

    /// Start listening for pointer input on `surface`.
    /// The path is not cleared here; the next gesture start does that.
    pub fn start_tracking(&mut self, mut surface: S) {
        if let Some(mut previous) = self.surface.take() {
            log::debug!("[TRACE] Replacing active surface, detaching previous listeners");
            previous.detach();
            self.tracing = false;
        }
        surface.attach();
        self.surface = Some(surface);
    }

    /// Stop listening and return the path traced so far.
    ///
    /// Without an active surface this returns the last recorded path
    /// unchanged, so it is safe to call repeatedly.
    pub fn stop_tracking(&mut self) -> Path {
        let Some(mut surface) = self.surface.take() else {
            return self.path.clone();
        };
        surface.detach();
        self.tracing = false;
        log::debug!("[TRACE] Tracking stopped with {} points", self.path.len());
        self.path.clone()
    }

    /// Finger or mouse went down at client position `client`.
    pub fn on_gesture_start(&mut self, client: Vec2, ctx: &mut EngineContext) -> CaptureResult {
        let Some(surface) = &self.surface else {
            return CaptureResult::Ignored;
        };
        let local = client - surface.origin();

        self.tracing = true;
        self.path.clear();
        self.path.push(local);

        if self.sound_enabled {
            ctx.emit_sound(SoundEvent::TRACE_START);
        }
        log::debug!("[TRACE] Started new path");
        CaptureResult::Started
    }

    /// Pointer moved to client position `client`. Every move is recorded.
    pub fn on_gesture_move(&mut self, client: Vec2) -> CaptureResult {
        if !self.tracing {
            return CaptureResult::Ignored;
        }
        let Some(surface) = &self.surface else {
            return CaptureResult::Ignored;
        };
        let local = client - surface.origin();
        self.path.push(local);
        CaptureResult::Recorded
    }

    /// Finger lifted. Ends the gesture and always stops the session;
    /// a new one must be started explicitly.
    pub fn on_gesture_end(&mut self) -> CaptureResult {
        if !self.tracing {
            return CaptureResult::Ignored;
        }
        self.tracing = false;
        log::debug!("[TRACE] Finger lifted with {} points", self.path.len());
        CaptureResult::Finished(self.stop_tracking())
    }

    /// Dispatch a queued input event. Custom events are not pointer input.
    pub fn handle(&mut self, event: &InputEvent, ctx: &mut EngineContext) -> CaptureResult {
        match *event {
            InputEvent::PointerDown { x, y } => self.on_gesture_start(Vec2::new(x, y), ctx),
            InputEvent::PointerMove { x, y } => self.on_gesture_move(Vec2::new(x, y)),
            InputEvent::PointerUp => self.on_gesture_end(),
            InputEvent::Custom { .. } => CaptureResult::Ignored,
        }
    }

    /// The path as most recently recorded.
    pub fn trace_path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn is_tracing(&self) -> bool {
        self.tracing
    }

    /// True while a surface is attached.
    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }
}
