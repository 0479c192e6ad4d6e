use std::collections::VecDeque;

use glam::Vec2;

use crate::api::config::TraceConfig;
use crate::api::game::{EngineContext, Game};
use crate::api::types::GameEvent;
use crate::assets::manifest::AssetManifest;
use crate::assets::outline::default_outline;
use crate::input::capture::{CaptureResult, CaptureSession, Surface};
use crate::input::queue::{InputEvent, InputQueue};
use crate::systems::fit::{fit_outline, SurfaceSize};
use crate::systems::matcher::TraceMatcher;
use crate::systems::rng::Rng;

/// Largest random shift of an outline inside its slot, as a fraction of the slot size.
/// Must stay below the margin the fit leaves on each side.
const MAX_JITTER: f32 = 0.08;

/// Intermediate mode phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntermediatePhase {
    /// Waiting for the page to deliver an outline for an empty slot.
    AwaitingOutline,
    /// All slots filled, capture armed.
    Tracing,
    /// The outline in `slot` was traced and is animating away.
    Exiting { slot: usize },
}

#[derive(Debug, Clone, Default)]
struct Slot {
    name: String,
    /// Outline as loaded, before placement.
    raw: Vec<Vec2>,
    /// Outline fitted into the slot's column and shifted by `jitter`.
    outline: Vec<Vec2>,
    /// Offset inside the column, as a fraction of the column size.
    jitter: Vec2,
}

/// Place `raw` into column `index` of `count` equal columns spanning `size`.
fn place(raw: &[Vec2], index: usize, count: usize, jitter: Vec2, size: SurfaceSize) -> Vec<Vec2> {
    let column = SurfaceSize::new(size.width / count as f32, size.height);
    let shift = Vec2::new(column.width * index as f32, 0.0) + jitter * column.as_vec2();
    fit_outline(raw, column).into_iter().map(|p| p + shift).collect()
}

/// Several animals side by side; any of them may be traced, in any order.
///
/// Each outline gets its own column of the surface, so outlines never
/// overlap. A finished path is scored against every slot in order and the
/// first accurate match wins. Only the traced slot is refilled.
pub struct IntermediateGame<S: Surface + Clone> {
    config: TraceConfig,
    manifest: AssetManifest,
    surface: S,
    session: CaptureSession<S>,
    matcher: TraceMatcher,
    rng: Rng,
    size: SurfaceSize,
    phase: IntermediatePhase,
    slots: Vec<Slot>,
    /// Slots waiting for an outline, front first.
    pending: VecDeque<usize>,
    requested: Option<String>,
    next_index: usize,
    failed_loads: usize,
    completed: u32,
}

impl<S: Surface + Clone> IntermediateGame<S> {
    /// Two or three slots, chosen by `seed`.
    pub fn new(config: TraceConfig, manifest: AssetManifest, surface: S, size: SurfaceSize, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let slots = 2 + rng.next_int(2) as usize;
        Self::with_rng(config, manifest, surface, size, slots, rng)
    }

    /// A fixed number of slots (at least one).
    pub fn with_slots(
        config: TraceConfig,
        manifest: AssetManifest,
        surface: S,
        size: SurfaceSize,
        slots: usize,
        seed: u64,
    ) -> Self {
        Self::with_rng(config, manifest, surface, size, slots, Rng::new(seed))
    }

    fn with_rng(
        config: TraceConfig,
        manifest: AssetManifest,
        surface: S,
        size: SurfaceSize,
        slots: usize,
        rng: Rng,
    ) -> Self {
        Self {
            session: CaptureSession::new(&config),
            matcher: TraceMatcher::new(&config),
            config,
            manifest,
            surface,
            rng,
            size,
            phase: IntermediatePhase::AwaitingOutline,
            slots: vec![Slot::default(); slots.max(1)],
            pending: VecDeque::new(),
            requested: None,
            next_index: 0,
            failed_loads: 0,
            completed: 0,
        }
    }

    pub fn phase(&self) -> IntermediatePhase {
        self.phase
    }

    pub fn requested_outline(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Placed outline in `slot`; empty while the slot waits for a replacement.
    pub fn outline(&self, slot: usize) -> &[Vec2] {
        self.slots.get(slot).map(|s| s.outline.as_slice()).unwrap_or(&[])
    }

    /// Name of the animal in `slot`, if one is loaded.
    pub fn slot_name(&self, slot: usize) -> Option<&str> {
        self.slots
            .get(slot)
            .filter(|s| !s.outline.is_empty())
            .map(|s| s.name.as_str())
    }

    pub fn trace_path(&self) -> &[Vec2] {
        self.session.trace_path()
    }

    /// Animals traced so far.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    fn next_name(&mut self) -> String {
        let count = self.manifest.outlines.len();
        let name = self.manifest.outlines[self.next_index % count].clone();
        self.next_index = (self.next_index + 1) % count;
        name
    }

    /// Ask for an outline for the front pending slot, or start tracing once none are left.
    fn request_next_outline(&mut self, ctx: &mut EngineContext) {
        while !self.pending.is_empty() {
            if self.manifest.outlines.is_empty() {
                self.fill_slot(ctx, String::new(), default_outline());
                continue;
            }
            let name = self.next_name();
            log::debug!("Requesting outline: {name}");
            self.requested = Some(name);
            self.phase = IntermediatePhase::AwaitingOutline;
            return;
        }
        self.requested = None;
        self.arm();
    }

    fn fill_slot(&mut self, ctx: &mut EngineContext, name: String, raw: Vec<Vec2>) {
        let Some(index) = self.pending.pop_front() else {
            return;
        };
        let jitter = Vec2::new(self.rng.next_signed(MAX_JITTER), self.rng.next_signed(MAX_JITTER));
        let outline = place(&raw, index, self.slots.len(), jitter, self.size);
        ctx.emit_event(GameEvent::new(
            GameEvent::OUTLINE_READY,
            outline.len() as f32,
            index as f32,
            0.0,
        ));
        self.slots[index] = Slot { name, raw, outline, jitter };
    }

    fn arm(&mut self) {
        self.session.start_tracking(self.surface.clone());
        self.phase = IntermediatePhase::Tracing;
    }

    fn finish_trace(&mut self, ctx: &mut EngineContext, path: Vec<Vec2>) {
        let matcher = &self.matcher;
        let matched = self
            .slots
            .iter()
            .position(|slot| matcher.is_trace_accurate(&slot.outline, &path, ctx));

        match matched {
            Some(slot) => {
                self.phase = IntermediatePhase::Exiting { slot };
                ctx.emit_event(GameEvent::new(GameEvent::EXIT_STARTED, slot as f32, 0.0, 0.0));
            }
            None => self.arm(),
        }
    }

    fn replace(&mut self, ctx: &mut EngineContext, index: usize) {
        self.completed += 1;
        let traced = std::mem::take(&mut self.slots[index]);
        log::debug!("Traced: {} | Total completed: {}", traced.name, self.completed);
        ctx.emit_event(GameEvent::new(GameEvent::STAR_EARNED, self.completed as f32, 0.0, 0.0));
        self.pending.push_back(index);
        self.request_next_outline(ctx);
    }
}

impl<S: Surface + Clone> Game for IntermediateGame<S> {
    fn config(&self) -> TraceConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("Intermediate mode started with {} animals", self.slots.len());
        self.pending = (0..self.slots.len()).collect();
        self.request_next_outline(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match self.phase {
                IntermediatePhase::Tracing => {
                    if let CaptureResult::Finished(path) = self.session.handle(event, ctx) {
                        self.finish_trace(ctx, path);
                    }
                }
                IntermediatePhase::Exiting { slot } => {
                    if let InputEvent::Custom { kind: InputEvent::EXIT_FINISHED, .. } = event {
                        self.replace(ctx, slot);
                    }
                }
                IntermediatePhase::AwaitingOutline => {}
            }
        }
    }

    fn load_outline(&mut self, ctx: &mut EngineContext, name: &str, points: Vec<Vec2>) {
        if self.requested.as_deref() != Some(name) {
            log::debug!("Ignoring outline {name}, not requested");
            return;
        }

        if !points.is_empty() {
            self.failed_loads = 0;
            log::info!("Loading animal {name}");
            self.fill_slot(ctx, name.to_string(), points);
        } else {
            self.failed_loads += 1;
            if self.failed_loads >= self.manifest.outlines.len() {
                log::warn!("No outline could be loaded, using the default shape");
                self.failed_loads = 0;
                self.fill_slot(ctx, String::new(), default_outline());
            }
        }
        self.request_next_outline(ctx);
    }

    fn resize(&mut self, ctx: &mut EngineContext, size: SurfaceSize) {
        self.size = size;
        let count = self.slots.len();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.raw.is_empty() {
                continue;
            }
            slot.outline = place(&slot.raw, index, count, slot.jitter, size);
            ctx.emit_event(GameEvent::new(
                GameEvent::OUTLINE_READY,
                slot.outline.len() as f32,
                index as f32,
                0.0,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SoundEvent;
    use crate::input::capture::tests::MockSurface;
    use crate::systems::fit::bounds;

    fn game(slots: usize) -> (IntermediateGame<MockSurface>, EngineContext) {
        let mut game = IntermediateGame::with_slots(
            TraceConfig::default(),
            AssetManifest::default(),
            MockSurface::at(0.0, 0.0),
            SurfaceSize::new(1000.0, 300.0),
            slots,
            42,
        );
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        (game, ctx)
    }

    /// Game with every slot filled with the default square.
    fn filled(slots: usize) -> (IntermediateGame<MockSurface>, EngineContext) {
        let (mut game, mut ctx) = game(slots);
        while let Some(name) = game.requested_outline().map(str::to_string) {
            game.load_outline(&mut ctx, &name, default_outline());
        }
        ctx.clear_frame_data();
        (game, ctx)
    }

    fn trace_of(points: &[Vec2]) -> InputQueue {
        let mut q = InputQueue::new();
        let (first, rest) = points.split_first().unwrap();
        q.push(InputEvent::PointerDown { x: first.x, y: first.y });
        for p in rest {
            q.push(InputEvent::PointerMove { x: p.x, y: p.y });
        }
        q.push(InputEvent::PointerUp);
        q
    }

    fn exit_finished() -> InputQueue {
        [InputEvent::Custom { kind: InputEvent::EXIT_FINISHED, a: 0.0, b: 0.0, c: 0.0 }]
            .into_iter()
            .collect()
    }

    fn events_of(ctx: &EngineContext, kind: f32) -> Vec<GameEvent> {
        ctx.events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn seeded_slot_count_is_two_or_three() {
        for seed in 0..20 {
            let game = IntermediateGame::new(
                TraceConfig::default(),
                AssetManifest::default(),
                MockSurface::at(0.0, 0.0),
                SurfaceSize::default(),
                seed,
            );
            assert!((2..=3).contains(&game.slot_count()));
        }
    }

    #[test]
    fn slots_fill_one_request_at_a_time() {
        let (mut game, mut ctx) = game(2);
        assert_eq!(game.requested_outline(), Some("lion"));
        assert_eq!(game.phase(), IntermediatePhase::AwaitingOutline);

        game.load_outline(&mut ctx, "lion", default_outline());
        assert_eq!(game.requested_outline(), Some("elephant"));
        assert_eq!(game.phase(), IntermediatePhase::AwaitingOutline);

        game.load_outline(&mut ctx, "elephant", default_outline());
        assert_eq!(game.requested_outline(), None);
        assert_eq!(game.phase(), IntermediatePhase::Tracing);
        assert_eq!(game.slot_name(0), Some("lion"));
        assert_eq!(game.slot_name(1), Some("elephant"));
        assert_eq!(events_of(&ctx, GameEvent::OUTLINE_READY).len(), 2);
    }

    #[test]
    fn outlines_do_not_overlap() {
        let (game, _) = filled(3);
        let boxes: Vec<_> = (0..3).map(|i| bounds(game.outline(i)).unwrap()).collect();
        for (i, (min, max)) in boxes.iter().enumerate() {
            let column = 1000.0 / 3.0;
            assert!(min.x >= column * i as f32 && max.x <= column * (i + 1) as f32);
            assert!(min.y >= 0.0 && max.y <= 300.0);
        }
    }

    #[test]
    fn trace_matches_second_outline() {
        let (mut game, mut ctx) = filled(2);
        let second = game.outline(1).to_vec();

        game.update(&mut ctx, &trace_of(&second));
        assert_eq!(game.phase(), IntermediatePhase::Exiting { slot: 1 });
        let results = events_of(&ctx, GameEvent::TRACE_RESULT);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].a, 0.0);
        assert_eq!(results[1].a, 1.0);
        assert_eq!(events_of(&ctx, GameEvent::EXIT_STARTED)[0].a, 1.0);
        assert_eq!(ctx.sounds, vec![SoundEvent::TRACE_START, SoundEvent::TRACE_SUCCESS]);
    }

    #[test]
    fn only_traced_slot_is_replaced() {
        let (mut game, mut ctx) = filled(2);
        let first = game.outline(0).to_vec();
        let second = game.outline(1).to_vec();
        game.update(&mut ctx, &trace_of(&second));

        game.update(&mut ctx, &exit_finished());
        assert_eq!(game.completed(), 1);
        assert_eq!(events_of(&ctx, GameEvent::STAR_EARNED)[0].a, 1.0);
        assert_eq!(game.requested_outline(), Some("giraffe"));
        assert!(game.outline(1).is_empty());
        assert_eq!(game.outline(0), first.as_slice());

        let triangle = vec![Vec2::new(0.0, 0.0), Vec2::new(50.0, 100.0), Vec2::new(100.0, 0.0)];
        game.load_outline(&mut ctx, "giraffe", triangle);
        assert_eq!(game.phase(), IntermediatePhase::Tracing);
        assert_eq!(game.slot_name(1), Some("giraffe"));
        assert_eq!(game.outline(1).len(), 3);
        assert_eq!(game.outline(0), first.as_slice());
    }

    #[test]
    fn missed_trace_rearms_capture() {
        let (mut game, mut ctx) = filled(2);
        let scribble = [Vec2::new(500.0, 5.0), Vec2::new(501.0, 6.0)];
        game.update(&mut ctx, &trace_of(&scribble));
        assert_eq!(game.phase(), IntermediatePhase::Tracing);
        assert!(events_of(&ctx, GameEvent::EXIT_STARTED).is_empty());

        let first = game.outline(0).to_vec();
        game.update(&mut ctx, &trace_of(&first));
        assert_eq!(game.phase(), IntermediatePhase::Exiting { slot: 0 });
    }

    #[test]
    fn pointer_input_is_ignored_while_exiting() {
        let (mut game, mut ctx) = filled(2);
        let first = game.outline(0).to_vec();
        let second = game.outline(1).to_vec();
        game.update(&mut ctx, &trace_of(&first));

        ctx.clear_frame_data();
        game.update(&mut ctx, &trace_of(&second));
        assert!(ctx.events.is_empty());
        assert_eq!(game.phase(), IntermediatePhase::Exiting { slot: 0 });
    }

    #[test]
    fn failed_loads_fall_back_to_square() {
        let (mut game, mut ctx) = game(2);
        game.load_outline(&mut ctx, "lion", Vec::new());
        assert_eq!(game.requested_outline(), Some("elephant"));
        for name in ["elephant", "giraffe", "monkey"] {
            game.load_outline(&mut ctx, name, Vec::new());
        }
        assert_eq!(game.outline(0).len(), 4);
        assert_eq!(game.requested_outline(), Some("lion"));
    }

    #[test]
    fn resize_keeps_slot_placement() {
        let (mut game, mut ctx) = filled(2);
        let before = bounds(game.outline(1)).unwrap();
        game.resize(&mut ctx, SurfaceSize::new(2000.0, 600.0));
        let after = bounds(game.outline(1)).unwrap();
        assert!((after.0 - before.0 * 2.0).length() < 1e-2);
        assert!((after.1 - before.1 * 2.0).length() < 1e-2);
    }
}
