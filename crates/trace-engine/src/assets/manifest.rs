use serde::{Deserialize, Serialize};

/// Animals cycled through in practice mode when no manifest is supplied.
pub const DEFAULT_ANIMALS: [&str; 4] = ["lion", "elephant", "giraffe", "monkey"];

/// Asset manifest describing the outlines a game uses.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Outline names in play order.
    #[serde(default = "default_outlines")]
    pub outlines: Vec<String>,
    /// Directory holding `<name>.json` outline files.
    #[serde(default = "default_outline_dir")]
    pub outline_dir: String,
}

fn default_outlines() -> Vec<String> {
    DEFAULT_ANIMALS.iter().map(|s| s.to_string()).collect()
}

fn default_outline_dir() -> String {
    "assets/animals".to_string()
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Where the page should fetch the outline called `name`.
    pub fn outline_path(&self, name: &str) -> String {
        format!("{}/{name}.json", self.outline_dir.trim_end_matches('/'))
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            outlines: default_outlines(),
            outline_dir: default_outline_dir(),
        }
    }
}
