use std::cell::RefCell;
use std::rc::Rc;

use trace_engine::bridge::protocol::{events_as_floats, pack_sounds};
use trace_engine::{
    parse_outline_or_empty, EngineContext, Game, InputEvent, InputQueue, SurfaceSize, TraceConfig,
};

/// Generic game runner that wires up the engine loop.
///
/// The page owns one `thread_local!` GameRunner and drives it through
/// `#[wasm_bindgen]` free functions, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    /// Shared with the surface's DOM listeners, which push into it.
    input: Rc<RefCell<InputQueue>>,
    config: TraceConfig,
    initialized: bool,
    /// Flat buffer of sound event IDs for pointer reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, input: Rc<RefCell<InputQueue>>) -> Self {
        let config = game.config();
        Self {
            game,
            ctx: EngineContext::new(),
            input,
            config,
            initialized: false,
            sound_buffer: Vec::with_capacity(8),
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue (custom events from the page).
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.borrow_mut().push(event);
    }

    /// Run one frame: clear last frame's events, feed queued input to the game.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        // Take the events out before updating so listeners may push while we run.
        let pending: InputQueue = self.input.borrow_mut().drain().into_iter().collect();
        self.game.update(&mut self.ctx, &pending);

        pack_sounds(&self.ctx.sounds, &mut self.sound_buffer);
    }

    /// Outline JSON for `name` arrived. Unparseable data counts as an empty outline.
    pub fn load_outline(&mut self, name: &str, json: &str) {
        let points = parse_outline_or_empty(name, json);
        self.game.load_outline(&mut self.ctx, name, points);
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.game.resize(&mut self.ctx, size);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    // ---- Pointer accessors for typed-array reads ----

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        events_as_floats(&self.ctx.events).as_ptr()
    }

    /// Number of events (each is `GameEvent::FLOATS` floats).
    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }
}
