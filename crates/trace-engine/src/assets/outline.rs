use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One outline vertex as stored in `assets/animals/<name>.json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlinePoint {
    pub x: f32,
    pub y: f32,
}

impl From<OutlinePoint> for Vec2 {
    fn from(p: OutlinePoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("malformed outline JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("outline point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Parse an outline from a JSON array of `{x, y}` objects.
pub fn parse_outline(json: &str) -> Result<Vec<Vec2>, OutlineError> {
    let raw: Vec<OutlinePoint> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, p)| {
            let point = Vec2::from(p);
            if point.is_finite() {
                Ok(point)
            } else {
                Err(OutlineError::NonFinite { index })
            }
        })
        .collect()
}

/// Parse an outline, degrading to an empty one when the data is unusable.
/// An empty outline means "no outline available" and fails every match.
pub fn parse_outline_or_empty(name: &str, json: &str) -> Vec<Vec2> {
    match parse_outline(json) {
        Ok(points) => {
            log::info!("Loaded outline: {name} with {} points", points.len());
            points
        }
        Err(e) => {
            log::warn!("Failed to load outline {name}: {e}");
            Vec::new()
        }
    }
}

/// Stand-in shape when no outline data is available: a 100x100 square at (100, 100).
pub fn default_outline() -> Vec<Vec2> {
    vec![
        Vec2::new(100.0, 100.0),
        Vec2::new(200.0, 100.0),
        Vec2::new(200.0, 200.0),
        Vec2::new(100.0, 200.0),
    ]
}
