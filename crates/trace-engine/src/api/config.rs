use serde::Deserialize;

/// Tunable parameters for capture and matching.
///
/// Every field has a default, so a partial JSON object from the page
/// (e.g. `{"distance_tolerance": 30}`) only overrides what it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Max distance in pixels between a trace point and an outline point to count as a hit.
    pub distance_tolerance: f32,
    /// How many outline points to scan ahead of (and behind) the cursor per trace point.
    pub search_window: usize,
    /// Fraction of trace points that must hit for the trace to pass (inclusive).
    pub pass_threshold: f32,
    /// Emit sound events for trace start and success.
    pub sound_enabled: bool,
    /// Verbose logging of the trace lifecycle.
    pub debug_mode: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            distance_tolerance: 25.0,
            search_window: 10,
            pass_threshold: 0.8,
            sound_enabled: true,
            debug_mode: true,
        }
    }
}

impl TraceConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Like [`TraceConfig::from_json`], but an unreadable config falls back to the defaults.
    pub fn from_json_or_default(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid trace config, using defaults: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let config = TraceConfig::default();
        assert_eq!(config.distance_tolerance, 25.0);
        assert_eq!(config.search_window, 10);
        assert_eq!(config.pass_threshold, 0.8);
        assert!(config.sound_enabled);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = TraceConfig::from_json(r#"{ "distance_tolerance": 40, "sound_enabled": false }"#)
            .unwrap();
        assert_eq!(config.distance_tolerance, 40.0);
        assert!(!config.sound_enabled);
        assert_eq!(config.search_window, 10);
    }

    #[test]
    fn malformed_json_falls_back() {
        assert_eq!(TraceConfig::from_json_or_default("{ nope"), TraceConfig::default());
        assert_eq!(TraceConfig::from_json_or_default(""), TraceConfig::default());
    }
}
