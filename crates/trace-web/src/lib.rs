pub mod runner;
pub mod surface;

pub use runner::GameRunner;
pub use surface::CanvasSurface;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use trace_engine::bridge::protocol::points_as_floats;
use trace_engine::{
    AssetManifest, InputEvent, InputQueue, IntermediateGame, PracticeGame, SurfaceSize, TraceConfig, TracingMode,
};

type Mode = TracingMode<CanvasSurface>;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<Mode>>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Calls before `game_init` are ignored
/// and yield `None`.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner<Mode>) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn find_canvas(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))
}

fn device_pixel_ratio() -> f32 {
    web_sys::window().map(|w| w.device_pixel_ratio() as f32).unwrap_or(1.0)
}

/// Build the runner for one mode and make it the live one.
fn start(
    canvas_id: &str,
    config_json: &str,
    manifest_json: &str,
    make: impl FnOnce(TraceConfig, AssetManifest, CanvasSurface, SurfaceSize) -> Mode,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = TraceConfig::from_json_or_default(config_json);
    let level = if config.debug_mode { log::Level::Debug } else { log::Level::Info };
    let _ = console_log::init_with_level(level);

    let manifest = if manifest_json.trim().is_empty() {
        AssetManifest::default()
    } else {
        AssetManifest::from_json(manifest_json).unwrap_or_else(|e| {
            log::warn!("Invalid asset manifest, using defaults: {e}");
            AssetManifest::default()
        })
    };

    let canvas = find_canvas(canvas_id)?;
    let size = SurfaceSize::from_backing(canvas.width() as f32, canvas.height() as f32, device_pixel_ratio());
    let queue = Rc::new(RefCell::new(InputQueue::new()));
    let surface = CanvasSurface::new(canvas, queue.clone());

    let mut runner = GameRunner::new(make(config, manifest, surface, size), queue);
    runner.init();

    // Replacing a previous runner drops its surfaces, which detaches their listeners.
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("tracing game: initialized");
    Ok(())
}

/// Start practice mode on the canvas with id `canvas_id`.
///
/// `config_json` and `manifest_json` may be empty; missing or invalid
/// values fall back to the defaults.
#[wasm_bindgen]
pub fn game_init(canvas_id: &str, config_json: &str, manifest_json: &str) -> Result<(), JsValue> {
    start(canvas_id, config_json, manifest_json, |config, manifest, surface, size| {
        TracingMode::Practice(PracticeGame::new(config, manifest, surface, size))
    })
}

/// Start intermediate mode: two or three outlines at once, laid out from `seed`.
#[wasm_bindgen]
pub fn game_init_intermediate(
    canvas_id: &str,
    config_json: &str,
    manifest_json: &str,
    seed: u32,
) -> Result<(), JsValue> {
    start(canvas_id, config_json, manifest_json, |config, manifest, surface, size| {
        TracingMode::Intermediate(IntermediateGame::new(config, manifest, surface, size, seed as u64))
    })
}

#[wasm_bindgen]
pub fn game_tick() {
    with_runner(|r| r.tick());
}

/// The canvas backing store changed size.
#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32, device_pixel_ratio: f32) {
    with_runner(|r| r.resize(SurfaceSize::from_backing(width, height, device_pixel_ratio)));
}

/// Outline JSON fetched by the page for `name`. Pass an empty string when the fetch failed.
#[wasm_bindgen]
pub fn game_load_outline(name: &str, json: &str) {
    with_runner(|r| r.load_outline(name, json));
}

#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

/// The page finished the exit animation of a traced outline.
#[wasm_bindgen]
pub fn game_exit_finished() {
    game_custom_event(InputEvent::EXIT_FINISHED, 0.0, 0.0, 0.0);
}

// ---- Data accessors ----

/// Name of the outline the page should fetch next.
#[wasm_bindgen]
pub fn get_requested_outline() -> Option<String> {
    with_runner(|r| r.game().requested_outline().map(str::to_string)).flatten()
}

/// URL of the outline the page should fetch next.
#[wasm_bindgen]
pub fn get_requested_outline_path() -> Option<String> {
    with_runner(|r| {
        let game = r.game();
        game.requested_outline().map(|name| game.manifest().outline_path(name))
    })
    .flatten()
}

/// Number of outline slots on screen.
#[wasm_bindgen]
pub fn get_outline_count() -> u32 {
    with_runner(|r| r.game().slot_count() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_outline_ptr(slot: u32) -> *const f32 {
    with_runner(|r| points_as_floats(r.game().outline(slot as usize)).as_ptr()).unwrap_or(std::ptr::null())
}

/// Number of points in the outline of `slot` (two floats each).
#[wasm_bindgen]
pub fn get_outline_len(slot: u32) -> u32 {
    with_runner(|r| r.game().outline(slot as usize).len() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_trace_ptr() -> *const f32 {
    with_runner(|r| points_as_floats(r.game().trace_path()).as_ptr()).unwrap_or(std::ptr::null())
}

/// Number of trace points (two floats each).
#[wasm_bindgen]
pub fn get_trace_len() -> u32 {
    with_runner(|r| r.game().trace_path().len() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_stars() -> u32 {
    with_runner(|r| r.game().stars()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_sound_enabled() -> bool {
    with_runner(|r| r.config().sound_enabled).unwrap_or(false)
}
