//! Qurve Paint/Canvas API
//!
//! A 2D drawing API modelled on HTML Canvas, used as the single persistent
//! drawing surface of a chart.
//!
//! # Features
//!
//! - Path drawing (lines, cubic curves, arcs)
//! - Shape primitives (rect, circle)
//! - Stroke styling with dash patterns, caps and joins
//! - Text with alignment/baseline anchoring
//! - Save/restore drawing-state scopes, transforms and clipping
//!
//! [`DrawContext`] is the trait every drawing procedure targets. [`PaintContext`]
//! is the recording implementation: it keeps the full drawing state and records
//! each operation as a [`PaintCommand`] that a backend (or a test) can replay.

pub mod color;
pub mod context;
pub mod dash;
pub mod path;
pub mod primitives;

pub use color::Color;
pub use context::{
    DrawContext, DrawState, LineCap, LineJoin, PaintCommand, PaintContext, StrokeStyle,
    TextAlign, TextBaseline, TextStyle, Transform2D,
};
pub use dash::parse_dash_array;
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use primitives::*;
