//! Pure geometry: polar node placement, responsive ring radius, and
//! visible-count thinning. Everything here is deterministic for a given
//! input, which is what makes the engine testable without a display.

use crate::{
    BASE_RADIUS, BREAKPOINT_LARGE, BREAKPOINT_MEDIUM, CARD_FIT_PADDING, COMPACT_BASE_RADIUS,
    COMPACT_MAX_VISIBLE, COMPACT_MIN_RADIUS, MIN_OPACITY, MIN_RADIUS, RING_FIT_PADDING,
};

/// Last observed container dimensions. Zero until the host reports a
/// measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Responsive width flags, equivalent to `max-width: 768px` / `1024px`
/// media queries. Both false while the viewport is unmeasured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakpoints {
    pub below_medium: bool,
    pub below_large: bool,
}

impl Breakpoints {
    pub fn from_width(width: f64) -> Self {
        if width <= 0.0 {
            return Self::default();
        }
        Self {
            below_medium: width <= BREAKPOINT_MEDIUM,
            below_large: width <= BREAKPOINT_LARGE,
        }
    }
}

/// Computed placement and depth cues for one node, center at the origin.
/// Angle 0 is to the right, 90 at the bottom, 270 at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    pub angle_degrees: f64,
    pub z_order: i32,
    pub opacity: f64,
}

/// Places node `index` of `total` on a circle of `radius`, rotated by
/// `rotation_degrees`. The cosine drives stacking order (front nodes on
/// top) and the sine drives opacity, so depth reads without any 3D math.
pub fn node_position(index: usize, total: usize, rotation_degrees: f64, radius: f64) -> NodePosition {
    let total = total.max(1);
    let angle_degrees =
        ((index as f64 / total as f64) * 360.0 + rotation_degrees).rem_euclid(360.0);
    let radian = angle_degrees.to_radians();

    let x = radius * radian.cos();
    let y = radius * radian.sin();

    let z_order = (100.0 + 50.0 * radian.cos()).round() as i32;
    let opacity = (MIN_OPACITY + 0.6 * ((1.0 + radian.sin()) / 2.0)).clamp(MIN_OPACITY, 1.0);

    NodePosition {
        x,
        y,
        angle_degrees,
        z_order,
        opacity,
    }
}

/// Ring radius for the current viewport, clamped between a floor and the
/// aesthetic base. The circle must fit the smaller dimension and leave
/// horizontal room for expanded cards; an unmeasured viewport gets the
/// base radius rather than degenerate geometry.
pub fn ring_radius(viewport: Viewport, compact: bool) -> f64 {
    let base = if compact { COMPACT_BASE_RADIUS } else { BASE_RADIUS };
    let floor = if compact { COMPACT_MIN_RADIUS } else { MIN_RADIUS };

    if !viewport.is_measured() {
        return base;
    }

    let max_from_min_dim = viewport.width.min(viewport.height) / 2.0 - RING_FIT_PADDING;
    let max_from_width = viewport.width / 3.0 - CARD_FIT_PADDING;
    let candidate = base.min(max_from_min_dim).min(max_from_width);

    candidate.clamp(floor, base)
}

/// How many items of the ordered collection are shown. Constrained
/// viewports thin the ring by dropping the tail of the list; compact mode
/// always caps at [`COMPACT_MAX_VISIBLE`] regardless of breakpoints.
pub fn visible_count(total: usize, compact: bool, breakpoints: Breakpoints) -> usize {
    if compact {
        return total.min(COMPACT_MAX_VISIBLE);
    }
    if breakpoints.below_medium && total > 3 {
        return (total - 3).max(1);
    }
    if breakpoints.below_large && total > 2 {
        return (total - 2).max(1);
    }
    total
}
