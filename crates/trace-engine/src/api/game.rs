use glam::Vec2;

use crate::api::config::TraceConfig;
use crate::api::types::{GameEvent, SoundEvent};
use crate::input::queue::InputQueue;
use crate::systems::fit::SurfaceSize;

/// The core contract every tracing mode must fulfill.
pub trait Game {
    /// Return trace configuration. Called once before init.
    fn config(&self) -> TraceConfig {
        TraceConfig::default()
    }

    /// Setup initial state and arm input capture.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame tick. Consume pointer events, score finished traces.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Outline data for `name` arrived from the page. Empty means the load failed.
    fn load_outline(&mut self, _ctx: &mut EngineContext, _name: &str, _points: Vec<Vec2>) {}

    /// The drawing surface changed size.
    fn resize(&mut self, _ctx: &mut EngineContext, _size: SurfaceSize) {}
}

/// Mutable access to engine state, passed to the `Game` hooks.
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            sounds: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Emit a sound event to be forwarded to TypeScript.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
