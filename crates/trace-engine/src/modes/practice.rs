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

/// Practice mode phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticePhase {
    /// Waiting for the page to deliver the requested outline.
    AwaitingOutline,
    /// Outline on screen, capture armed.
    Tracing,
    /// Trace accepted; the page is animating the outline away.
    Exiting,
}

/// Single-animal practice: trace one outline at a time, earn a star per success.
pub struct PracticeGame<S: Surface + Clone> {
    config: TraceConfig,
    manifest: AssetManifest,
    surface: S,
    session: CaptureSession<S>,
    matcher: TraceMatcher,
    size: SurfaceSize,
    phase: PracticePhase,
    /// Outline as loaded, before fitting.
    raw_outline: Vec<Vec2>,
    /// Outline fitted to `size`; this is what gets drawn and matched.
    outline: Vec<Vec2>,
    requested: Option<String>,
    next_index: usize,
    /// Consecutive loads that came back empty.
    failed_loads: usize,
    stars: u32,
}

impl<S: Surface + Clone> PracticeGame<S> {
    pub fn new(config: TraceConfig, manifest: AssetManifest, surface: S, size: SurfaceSize) -> Self {
        Self {
            session: CaptureSession::new(&config),
            matcher: TraceMatcher::new(&config),
            config,
            manifest,
            surface,
            size,
            phase: PracticePhase::AwaitingOutline,
            raw_outline: Vec::new(),
            outline: Vec::new(),
            requested: None,
            next_index: 0,
            failed_loads: 0,
            stars: 0,
        }
    }

    pub fn phase(&self) -> PracticePhase {
        self.phase
    }

    /// Name of the outline the page should fetch next, if any.
    pub fn requested_outline(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Fitted outline currently on screen.
    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    pub fn trace_path(&self) -> &[Vec2] {
        self.session.trace_path()
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    fn request_next_outline(&mut self, ctx: &mut EngineContext) {
        self.phase = PracticePhase::AwaitingOutline;
        if self.manifest.outlines.is_empty() {
            self.show_outline(ctx, default_outline());
            return;
        }
        let count = self.manifest.outlines.len();
        let name = self.manifest.outlines[self.next_index % count].clone();
        self.next_index = (self.next_index + 1) % count;
        log::debug!("Requesting outline: {name}");
        self.requested = Some(name);
    }

    fn show_outline(&mut self, ctx: &mut EngineContext, points: Vec<Vec2>) {
        self.raw_outline = points;
        self.outline = fit_outline(&self.raw_outline, self.size);
        self.requested = None;
        ctx.emit_event(GameEvent::new(
            GameEvent::OUTLINE_READY,
            self.outline.len() as f32,
            0.0,
            0.0,
        ));
        self.arm();
    }

    fn arm(&mut self) {
        self.session.start_tracking(self.surface.clone());
        self.phase = PracticePhase::Tracing;
    }

    fn finish_trace(&mut self, ctx: &mut EngineContext, path: Vec<Vec2>) {
        if self.matcher.is_trace_accurate(&self.outline, &path, ctx) {
            self.phase = PracticePhase::Exiting;
            ctx.emit_event(GameEvent::new(GameEvent::EXIT_STARTED, 0.0, 0.0, 0.0));
        } else {
            self.arm();
        }
    }

    fn reward(&mut self, ctx: &mut EngineContext) {
        self.stars += 1;
        log::debug!("Total stars earned: {}", self.stars);
        ctx.emit_event(GameEvent::new(GameEvent::STAR_EARNED, self.stars as f32, 0.0, 0.0));
        self.request_next_outline(ctx);
    }
}

impl<S: Surface + Clone> Game for PracticeGame<S> {
    fn config(&self) -> TraceConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("Practice mode started");
        self.request_next_outline(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match self.phase {
                PracticePhase::Tracing => {
                    if let CaptureResult::Finished(path) = self.session.handle(event, ctx) {
                        self.finish_trace(ctx, path);
                    }
                }
                PracticePhase::Exiting => {
                    if let InputEvent::Custom { kind: InputEvent::EXIT_FINISHED, .. } = event {
                        self.reward(ctx);
                    }
                }
                PracticePhase::AwaitingOutline => {}
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
            log::info!("Loading next animal: {name}");
            self.show_outline(ctx, points);
            return;
        }

        self.failed_loads += 1;
        if self.failed_loads >= self.manifest.outlines.len() {
            log::warn!("No outline could be loaded, using the default shape");
            self.failed_loads = 0;
            self.show_outline(ctx, default_outline());
        } else {
            self.request_next_outline(ctx);
        }
    }

    fn resize(&mut self, ctx: &mut EngineContext, size: SurfaceSize) {
        self.size = size;
        if self.raw_outline.is_empty() {
            return;
        }
        self.outline = fit_outline(&self.raw_outline, size);
        ctx.emit_event(GameEvent::new(
            GameEvent::OUTLINE_READY,
            self.outline.len() as f32,
            0.0,
            0.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SoundEvent;
    use crate::input::capture::tests::MockSurface;

    fn game() -> (PracticeGame<MockSurface>, EngineContext) {
        let mut game = PracticeGame::new(
            TraceConfig::default(),
            AssetManifest::default(),
            MockSurface::at(0.0, 0.0),
            SurfaceSize::new(500.0, 500.0),
        );
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        (game, ctx)
    }

    /// Pointer events tracing every point of `points` in order.
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

    fn has_event(ctx: &EngineContext, kind: f32) -> bool {
        ctx.events.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn init_requests_first_animal() {
        let (game, _) = game();
        assert_eq!(game.requested_outline(), Some("lion"));
        assert_eq!(game.phase(), PracticePhase::AwaitingOutline);
    }

    #[test]
    fn loaded_outline_is_fitted_and_armed() {
        let (mut game, mut ctx) = game();
        game.load_outline(&mut ctx, "lion", default_outline());

        assert_eq!(game.phase(), PracticePhase::Tracing);
        assert_eq!(game.requested_outline(), None);
        // 100x100 square fitted to 80% of 500.
        assert_eq!(game.outline()[0], Vec2::new(50.0, 50.0));
        assert_eq!(game.outline()[2], Vec2::new(450.0, 450.0));
        assert!(has_event(&ctx, GameEvent::OUTLINE_READY));
    }

    #[test]
    fn stale_outline_is_ignored() {
        let (mut game, mut ctx) = game();
        game.load_outline(&mut ctx, "monkey", default_outline());
        assert_eq!(game.phase(), PracticePhase::AwaitingOutline);
        assert!(game.outline().is_empty());
    }

    #[test]
    fn failed_load_moves_to_next_animal() {
        let (mut game, mut ctx) = game();
        game.load_outline(&mut ctx, "lion", Vec::new());
        assert_eq!(game.requested_outline(), Some("elephant"));
    }

    #[test]
    fn all_loads_failing_falls_back_to_square() {
        let (mut game, mut ctx) = game();
        for name in ["lion", "elephant", "giraffe", "monkey"] {
            game.load_outline(&mut ctx, name, Vec::new());
        }
        assert_eq!(game.phase(), PracticePhase::Tracing);
        assert_eq!(game.outline().len(), 4);
    }

    #[test]
    fn accurate_trace_exits_and_awards_star() {
        let (mut game, mut ctx) = game();
        game.load_outline(&mut ctx, "lion", default_outline());
        let outline = game.outline().to_vec();

        ctx.clear_frame_data();
        game.update(&mut ctx, &trace_of(&outline));
        assert_eq!(game.phase(), PracticePhase::Exiting);
        assert!(has_event(&ctx, GameEvent::EXIT_STARTED));
        assert_eq!(ctx.sounds, vec![SoundEvent::TRACE_START, SoundEvent::TRACE_SUCCESS]);

        // Pointer input during the exit animation does nothing.
        ctx.clear_frame_data();
        game.update(&mut ctx, &trace_of(&outline));
        assert!(ctx.events.is_empty());

        game.update(&mut ctx, &exit_finished());
        assert_eq!(game.stars(), 1);
        assert!(has_event(&ctx, GameEvent::STAR_EARNED));
        assert_eq!(game.requested_outline(), Some("elephant"));
    }

    #[test]
    fn inaccurate_trace_rearms_capture() {
        let (mut game, mut ctx) = game();
        game.load_outline(&mut ctx, "lion", default_outline());

        let scribble = [Vec2::new(0.0, 499.0), Vec2::new(1.0, 498.0)];
        game.update(&mut ctx, &trace_of(&scribble));
        assert_eq!(game.phase(), PracticePhase::Tracing);
        assert_eq!(game.stars(), 0);

        // A second attempt on the same outline is captured.
        let outline = game.outline().to_vec();
        game.update(&mut ctx, &trace_of(&outline));
        assert_eq!(game.phase(), PracticePhase::Exiting);
    }

    #[test]
    fn resize_refits_from_raw_outline() {
        let (mut game, mut ctx) = game();
        game.load_outline(&mut ctx, "lion", default_outline());
        game.resize(&mut ctx, SurfaceSize::new(1000.0, 1000.0));
        assert_eq!(game.outline()[0], Vec2::new(100.0, 100.0));
        assert_eq!(game.outline()[2], Vec2::new(900.0, 900.0));
    }
}
