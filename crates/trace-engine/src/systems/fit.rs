use glam::Vec2;

/// Share of the surface the fitted outline may occupy along its limiting axis.
pub const FIT_FRACTION: f32 = 0.8;

/// Drawable size of a surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert a canvas backing-store size to CSS pixels.
    /// A missing or nonsensical device pixel ratio counts as 1.
    pub fn from_backing(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self::new(width / dpr, height / dpr)
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Axis-aligned bounds of a point set. `None` for an empty set.
pub fn bounds(points: &[Vec2]) -> Option<(Vec2, Vec2)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
    )
}

/// Uniform scale that fits `extent` into `size` at [`FIT_FRACTION`].
///
/// An axis with zero extent places no constraint; if neither axis has
/// extent the scale is 1.
pub fn fit_scale(extent: Vec2, size: SurfaceSize) -> f32 {
    let ratio = |span: f32, avail: f32| (span > 0.0).then(|| avail * FIT_FRACTION / span);
    match (ratio(extent.x, size.width), ratio(extent.y, size.height)) {
        (Some(h), Some(v)) => h.min(v),
        (Some(h), None) => h,
        (None, Some(v)) => v,
        (None, None) => 1.0,
    }
}

/// Scale `points` uniformly and center them on a surface of `size`.
///
/// Always pass the raw outline: the result depends only on the shape, so
/// refitting a fitted copy reproduces it only up to float rounding.
pub fn fit_outline(points: &[Vec2], size: SurfaceSize) -> Vec<Vec2> {
    let Some((min, max)) = bounds(points) else {
        return Vec::new();
    };
    let extent = max - min;
    let scale = fit_scale(extent, size);
    let offset = (size.as_vec2() - extent * scale) / 2.0;

    points.iter().map(|&p| (p - min) * scale + offset).collect()
}
