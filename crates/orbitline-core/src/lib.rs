//! Radial layout engine: an auto-rotating ring of timeline items with
//! selection, related-item highlighting, and responsive sizing.
//!
//! The engine is a plain state machine. It owns no timer, performs no I/O,
//! and renders nothing; a host delivers `tick`/`select`/`clear`/`resize`
//! stimuli in order and reads back a [`Frame`] whenever it wants to draw.

pub mod frame;
pub mod geometry;
pub mod item;
pub mod state;

pub use frame::{Frame, FrameItem};
pub use geometry::{Breakpoints, NodePosition, Viewport};
pub use item::{ItemId, Status, TimelineItem};
pub use state::{Engine, Selection};

pub const ROTATION_STEP_DEGREES: f64 = 0.3; // per tick
pub const TICK_PERIOD_MS: u64 = 50; // host cadence the step is tuned for
pub const BASE_RADIUS: f64 = 260.0; // orbit radius on an unconstrained viewport
pub const COMPACT_BASE_RADIUS: f64 = 200.0;
pub const MIN_RADIUS: f64 = 160.0; // floor, however small the viewport reports
pub const COMPACT_MIN_RADIUS: f64 = 140.0;
pub const RING_FIT_PADDING: f64 = 60.0; // keeps the circle off the container edge
pub const CARD_FIT_PADDING: f64 = 40.0; // horizontal room for expanded cards
pub const COMPACT_MAX_VISIBLE: usize = 7;
pub const BREAKPOINT_MEDIUM: f64 = 768.0; // px
pub const BREAKPOINT_LARGE: f64 = 1024.0; // px
pub const RECENTER_TARGET_DEGREES: f64 = 270.0; // screen top in this parametrization
pub const MIN_OPACITY: f64 = 0.4; // far-side nodes stay legible
pub const EXPANDED_Z_ORDER: i32 = 200; // expanded node sits above the whole ring
pub const GLOW_ENERGY_SCALE: f64 = 0.5;
pub const GLOW_BASE_DIAMETER: f64 = 40.0;
