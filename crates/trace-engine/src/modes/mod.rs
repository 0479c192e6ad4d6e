pub mod intermediate;
pub mod practice;

use glam::Vec2;

use crate::api::config::TraceConfig;
use crate::api::game::{EngineContext, Game};
use crate::assets::manifest::AssetManifest;
use crate::input::capture::Surface;
use crate::input::queue::InputQueue;
use crate::systems::fit::SurfaceSize;

use intermediate::IntermediateGame;
use practice::PracticeGame;

/// Whichever mode the page started, behind one `Game`.
pub enum TracingMode<S: Surface + Clone> {
    Practice(PracticeGame<S>),
    Intermediate(IntermediateGame<S>),
}

impl<S: Surface + Clone> TracingMode<S> {
    pub fn requested_outline(&self) -> Option<&str> {
        match self {
            Self::Practice(g) => g.requested_outline(),
            Self::Intermediate(g) => g.requested_outline(),
        }
    }

    /// Number of outline slots on screen. Practice mode has one.
    pub fn slot_count(&self) -> usize {
        match self {
            Self::Practice(_) => 1,
            Self::Intermediate(g) => g.slot_count(),
        }
    }

    /// Placed outline in `slot`, empty when there is none.
    pub fn outline(&self, slot: usize) -> &[Vec2] {
        match self {
            Self::Practice(g) if slot == 0 => g.outline(),
            Self::Practice(_) => &[],
            Self::Intermediate(g) => g.outline(slot),
        }
    }

    pub fn trace_path(&self) -> &[Vec2] {
        match self {
            Self::Practice(g) => g.trace_path(),
            Self::Intermediate(g) => g.trace_path(),
        }
    }

    /// Stars in practice mode, traced animals in intermediate mode.
    pub fn stars(&self) -> u32 {
        match self {
            Self::Practice(g) => g.stars(),
            Self::Intermediate(g) => g.completed(),
        }
    }

    pub fn manifest(&self) -> &AssetManifest {
        match self {
            Self::Practice(g) => g.manifest(),
            Self::Intermediate(g) => g.manifest(),
        }
    }
}

impl<S: Surface + Clone> Game for TracingMode<S> {
    fn config(&self) -> TraceConfig {
        match self {
            Self::Practice(g) => g.config(),
            Self::Intermediate(g) => g.config(),
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        match self {
            Self::Practice(g) => g.init(ctx),
            Self::Intermediate(g) => g.init(ctx),
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        match self {
            Self::Practice(g) => g.update(ctx, input),
            Self::Intermediate(g) => g.update(ctx, input),
        }
    }

    fn load_outline(&mut self, ctx: &mut EngineContext, name: &str, points: Vec<Vec2>) {
        match self {
            Self::Practice(g) => g.load_outline(ctx, name, points),
            Self::Intermediate(g) => g.load_outline(ctx, name, points),
        }
    }

    fn resize(&mut self, ctx: &mut EngineContext, size: SurfaceSize) {
        match self {
            Self::Practice(g) => g.resize(ctx, size),
            Self::Intermediate(g) => g.resize(ctx, size),
        }
    }
}
