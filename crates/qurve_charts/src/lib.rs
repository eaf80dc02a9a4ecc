//! qurve_charts
//!
//! Declarative line charts drawn onto one persistent canvas-like surface.
//!
//! A [`Chart`] owns the surface geometry, a render scheduler and an
//! interaction router. Producers ([`LineSeries`], [`XAxis`], [`YAxis`],
//! [`CartesianGrid`], [`Tooltip`]) mount onto it, register draw callbacks and
//! tooltip resolvers, and tear them down when dropped. Repaint requests are
//! coalesced into one flush per host frame.
//!
//! The host drives two things: it calls [`Chart::flush`] when the chart asks
//! for a frame (through a [`qurve_core::FrameRequester`]), and it forwards
//! pointer/resize events via [`Chart::handle_event`].

mod cartesian;
mod chart;
mod error;
mod render;
mod series;
mod tooltip;

pub mod data;
pub mod draw;
pub mod format;
pub mod interaction;
pub mod layout;
pub mod project;
pub mod scale;

pub use cartesian::{
    CartesianGrid, GridProps, XAxis, XAxisPosition, XAxisProps, YAxis, YAxisPosition, YAxisProps,
};
pub use chart::{AxisConfig, AxisDomain, AxisRole, Chart, ChartProps, WeakChart};
pub use data::{record, DataKey, Dataset, Record, Value};
pub use draw::{CurveType, DotStyle};
pub use error::{ChartError, Result};
pub use interaction::{find_closest_point_by_x, InteractionRouter, TooltipItem};
pub use layout::{Layout, Margin};
pub use project::{project_points, ProjectedPoint};
pub use render::{FlushStats, RenderFn, RenderScheduler};
pub use scale::LinearScale;
pub use series::{Dot, LineProps, LineSeries};
pub use tooltip::{
    tooltip_position, CursorStyle, ItemSorter, Tooltip, TooltipProps, TooltipState,
    TOOLTIP_HEIGHT, TOOLTIP_WIDTH,
};

/// Common imports for chart users.
pub mod prelude {
    pub use crate::cartesian::{
        CartesianGrid, GridProps, XAxis, XAxisPosition, XAxisProps, YAxis, YAxisPosition,
        YAxisProps,
    };
    pub use crate::chart::{AxisConfig, AxisDomain, Chart, ChartProps};
    pub use crate::data::{record, DataKey, Dataset, Record, Value};
    pub use crate::draw::{CurveType, DotStyle};
    pub use crate::error::ChartError;
    pub use crate::interaction::{find_closest_point_by_x, TooltipItem};
    pub use crate::layout::Margin;
    pub use crate::project::{project_points, ProjectedPoint};
    pub use crate::scale::LinearScale;
    pub use crate::series::{Dot, LineProps, LineSeries};
    pub use crate::tooltip::{CursorStyle, ItemSorter, Tooltip, TooltipProps, TooltipState};
    pub use qurve_paint::Color;
}
