use glam::Vec2;

use crate::api::config::TraceConfig;
use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, SoundEvent};

/// Outcome of scoring one path against one outline.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceScore {
    /// Path points that landed near an outline point.
    pub hits: usize,
    /// Path points considered.
    pub total: usize,
    /// Outline cursor after the last path point.
    pub final_index: usize,
    /// Outline cursor after each path point, in path order.
    pub cursor_history: Vec<usize>,
}

impl TraceScore {
    fn empty(total: usize) -> Self {
        Self {
            hits: 0,
            total,
            final_index: 0,
            cursor_history: Vec::new(),
        }
    }

    /// Fraction of path points that hit (0.0 to 1.0). Zero for an empty path.
    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.hits as f32 / self.total as f32
    }

    /// Accuracy as a rounded whole percentage.
    pub fn percent(&self) -> u32 {
        (self.accuracy() * 100.0).round() as u32
    }

    /// Inclusive threshold check: an accuracy of exactly `threshold` passes.
    pub fn passes(&self, threshold: f32) -> bool {
        self.total > 0 && self.hits > 0 && self.accuracy() >= threshold
    }
}

/// Scores a traced path against a reference outline.
///
/// Each path point is only compared to outline points within `window` of a
/// moving cursor, so the trace has to roughly follow the outline's point
/// order. A scribble touching scattered parts of the outline scores poorly.
#[derive(Debug, Clone)]
pub struct TraceMatcher {
    threshold_sq: f32,
    window: usize,
    pass_threshold: f32,
    sound_enabled: bool,
}

impl TraceMatcher {
    pub fn new(config: &TraceConfig) -> Self {
        Self {
            threshold_sq: config.distance_tolerance * config.distance_tolerance,
            window: config.search_window.max(1),
            pass_threshold: config.pass_threshold,
            sound_enabled: config.sound_enabled,
        }
    }

    /// Walk the path and count hits. Pure; emits nothing.
    pub fn score(&self, outline: &[Vec2], path: &[Vec2]) -> TraceScore {
        if outline.is_empty() || path.is_empty() {
            return TraceScore::empty(path.len());
        }

        let mut hits = 0;
        let mut cursor: usize = 0;
        let mut cursor_history = Vec::with_capacity(path.len());

        for &p in path {
            let near = |i: &usize| p.distance_squared(outline[*i]) <= self.threshold_sq;

            let ahead_end = cursor.saturating_add(self.window).min(outline.len());
            let found = (cursor..ahead_end).find(near).or_else(|| {
                // Tolerate small backtracking of the finger.
                let behind_start = cursor.saturating_sub(self.window);
                (behind_start..cursor).rev().find(near)
            });

            if let Some(i) = found {
                hits += 1;
                cursor = i;
            }
            cursor_history.push(cursor);
        }

        TraceScore {
            hits,
            total: path.len(),
            final_index: cursor,
            cursor_history,
        }
    }

    /// Decide whether `path` is an acceptable tracing of `outline`.
    ///
    /// Always emits a `TRACE_RESULT` event; a pass also emits the success sound.
    pub fn is_trace_accurate(&self, outline: &[Vec2], path: &[Vec2], ctx: &mut EngineContext) -> bool {
        if outline.is_empty() || path.is_empty() {
            log::debug!(
                "[TRACE] Nothing to compare (outline: {}, path: {})",
                outline.len(),
                path.len()
            );
            ctx.emit_event(GameEvent::trace_result(false, 0, path.len()));
            return false;
        }

        let score = self.score(outline, path);
        let passed = score.passes(self.pass_threshold);

        log::debug!(
            "[TRACE] Trace accuracy: {}% - {}",
            score.percent(),
            if passed { "SUCCESS" } else { "TRY AGAIN" }
        );

        ctx.emit_event(GameEvent::trace_result(passed, score.percent(), score.total));
        if passed && self.sound_enabled {
            ctx.emit_sound(SoundEvent::TRACE_SUCCESS);
        }
        passed
    }
}

impl Default for TraceMatcher {
    fn default() -> Self {
        Self::new(&TraceConfig::default())
    }
}
