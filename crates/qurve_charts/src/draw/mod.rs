//! Stateless drawing procedures.
//!
//! Each takes the surface and already-projected geometry and leaves the
//! surface's drawing state as it found it.

pub mod axis;
pub mod grid;
pub mod line;
pub mod marker;

pub use axis::{build_ticks, draw_axis, AxisEdge, AxisStyle, AxisTick, TickFormatter};
pub use grid::{draw_grid, GridStyle};
pub use line::{draw_line_path, line_path, CurveType};
pub use marker::{draw_active_dot, draw_crosshair, draw_dots, CrosshairStyle, DotStyle};
