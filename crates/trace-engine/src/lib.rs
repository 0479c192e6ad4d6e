pub mod api;
pub mod assets;
pub mod bridge;
pub mod input;
pub mod modes;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::TraceConfig;
pub use api::game::{Game, EngineContext};
pub use api::types::{SoundEvent, GameEvent};
pub use assets::manifest::AssetManifest;
pub use assets::outline::{default_outline, parse_outline, parse_outline_or_empty, OutlineError, OutlinePoint};
pub use input::capture::{CaptureResult, CaptureSession, Surface};
pub use input::queue::{InputEvent, InputQueue};
pub use modes::intermediate::{IntermediateGame, IntermediatePhase};
pub use modes::practice::{PracticeGame, PracticePhase};
pub use modes::TracingMode;
pub use systems::fit::{fit_outline, SurfaceSize};
pub use systems::matcher::{TraceMatcher, TraceScore};
pub use systems::rng::Rng;

/// Ordered points captured from one gesture, in surface-local pixels.
pub type Path = Vec<glam::Vec2>;
