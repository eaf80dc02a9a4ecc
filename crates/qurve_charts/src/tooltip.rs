//! Tooltip producer: hover tracking, payload assembly and the on-surface
//! crosshair / active-dot overlay.
//!
//! The textual tooltip box itself is drawn by the host outside the surface,
//! from the [`TooltipState`] snapshot.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use qurve_core::Disposer;
use qurve_paint::{Color, Point};

use crate::chart::{Chart, WeakChart};
use crate::data::{resolve_x, Value};
use crate::draw::{draw_active_dot, draw_crosshair, CrosshairStyle, DotStyle};
use crate::error::Result;
use crate::format::format_tick;
use crate::interaction::{find_closest_point_by_x, TooltipItem};
use crate::project::ProjectedPoint;

/// Estimated size of the host-rendered tooltip box, used for placement.
pub const TOOLTIP_WIDTH: f32 = 170.0;
pub const TOOLTIP_HEIGHT: f32 = 80.0;

pub type ItemCompareFn = dyn Fn(&TooltipItem, &TooltipItem) -> Ordering;

/// Ordering of payload items.
#[derive(Clone)]
pub enum ItemSorter {
    /// Descending by value; items without a value last.
    Value,
    /// Ascending by label.
    Name,
    Custom(Rc<ItemCompareFn>),
}

impl ItemSorter {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&TooltipItem, &TooltipItem) -> Ordering + 'static,
    {
        ItemSorter::Custom(Rc::new(f))
    }

    fn sort(&self, items: &mut [TooltipItem]) {
        match self {
            ItemSorter::Value => {
                items.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal))
            }
            ItemSorter::Name => items.sort_by(|a, b| a.label.cmp(&b.label)),
            ItemSorter::Custom(f) => items.sort_by(|a, b| f(a, b)),
        }
    }
}

impl fmt::Debug for ItemSorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSorter::Value => f.write_str("Value"),
            ItemSorter::Name => f.write_str("Name"),
            ItemSorter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Crosshair drawn through the hovered point.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CursorStyle {
    Hidden,
    #[default]
    Default,
    Custom(CrosshairStyle),
}

#[derive(Clone, Debug)]
pub struct TooltipProps {
    pub cursor: CursorStyle,
    pub active_dot: Option<DotStyle>,
    /// Drop payload items that have no value.
    pub filter_null: bool,
    pub item_sorter: Option<ItemSorter>,
    /// Place the box left of / below the point instead of right / above.
    pub reverse_direction: (bool, bool),
    /// Fixed box coordinates, per axis.
    pub position: (Option<f32>, Option<f32>),
    pub offset: f32,
}

impl Default for TooltipProps {
    fn default() -> Self {
        Self {
            cursor: CursorStyle::Default,
            active_dot: Some(DotStyle::active(Color::from_hex(0x3b82f6))),
            filter_null: true,
            item_sorter: None,
            reverse_direction: (false, false),
            position: (None, None),
            offset: 12.0,
        }
    }
}

impl TooltipProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(mut self, cursor: CursorStyle) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_active_dot(mut self, dot: Option<DotStyle>) -> Self {
        self.active_dot = dot;
        self
    }

    pub fn with_filter_null(mut self, filter: bool) -> Self {
        self.filter_null = filter;
        self
    }

    pub fn with_item_sorter(mut self, sorter: ItemSorter) -> Self {
        self.item_sorter = Some(sorter);
        self
    }

    pub fn with_reverse_direction(mut self, x: bool, y: bool) -> Self {
        self.reverse_direction = (x, y);
        self
    }

    pub fn with_position(mut self, x: Option<f32>, y: Option<f32>) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }
}

/// What the host needs to draw the tooltip box.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
    pub active: bool,
    pub index: Option<usize>,
    pub label: String,
    pub payload: Vec<TooltipItem>,
    /// Top-left of the box, in surface coordinates.
    pub position: Point,
    /// Hovered data point, in surface coordinates.
    pub point: Option<Point>,
}

/// Top-left corner for the tooltip box anchored at `at`, kept inside a
/// `width` x `height` surface.
pub fn tooltip_position(props: &TooltipProps, at: Point, width: f32, height: f32) -> Point {
    let (reverse_x, reverse_y) = props.reverse_direction;
    let x = props.position.0.unwrap_or(if reverse_x {
        at.x - props.offset - TOOLTIP_WIDTH
    } else {
        at.x + props.offset
    });
    let y = props.position.1.unwrap_or(if reverse_y {
        at.y + props.offset
    } else {
        at.y - props.offset - TOOLTIP_HEIGHT
    });
    Point::new(
        x.clamp(0.0, (width - TOOLTIP_WIDTH).max(0.0)),
        y.clamp(0.0, (height - TOOLTIP_HEIGHT).max(0.0)),
    )
}

struct TooltipShared {
    props: TooltipProps,
    state: TooltipState,
    points: Vec<ProjectedPoint>,
    projected_at: Option<u64>,
}

impl TooltipShared {
    fn refresh(&mut self, chart: &Chart) {
        let revision = chart.revision();
        if self.projected_at != Some(revision) {
            self.points = chart.project(None);
            self.projected_at = Some(revision);
        }
    }

    fn hover(&mut self, chart: &Chart, x: f32) {
        if chart.data().is_empty() {
            self.state = TooltipState::default();
            chart.set_hovered_index(None);
            return;
        }
        self.refresh(chart);
        let Some(point) = find_closest_point_by_x(&self.points, x).copied() else {
            return;
        };
        chart.set_hovered_index(Some(point.index));

        let mut payload = chart.tooltip_payload(point.index);
        if self.props.filter_null {
            payload.retain(|item| item.value.is_some());
        }
        if let Some(sorter) = &self.props.item_sorter {
            sorter.sort(&mut payload);
        }

        let at = point.position();
        self.state = TooltipState {
            active: true,
            index: Some(point.index),
            label: x_label(chart, point.index),
            payload,
            position: tooltip_position(&self.props, at, chart.width(), chart.height()),
            point: Some(at),
        };
    }
}

// Raw x value of the hovered record, or its resolved numeric x.
fn x_label(chart: &Chart, index: usize) -> String {
    let data = chart.data();
    let Some(record) = data.get(index) else {
        return String::new();
    };
    let key = chart.x_axis().and_then(|a| a.data_key);
    match key.as_ref().map(|k| k.resolve(record, index)) {
        Some(Value::Text(s)) => s,
        Some(Value::Bool(b)) => b.to_string(),
        _ => format_tick(resolve_x(record, index, key.as_ref())),
    }
}

/// A mounted tooltip.
pub struct Tooltip {
    chart: WeakChart,
    shared: Rc<RefCell<TooltipShared>>,
    on_move: Disposer,
    on_leave: Disposer,
    render: Disposer,
}

impl Tooltip {
    pub fn mount(chart: &Chart, props: TooltipProps) -> Result<Self> {
        let shared = Rc::new(RefCell::new(TooltipShared {
            props,
            state: TooltipState::default(),
            points: Vec::new(),
            projected_at: None,
        }));
        let weak = chart.downgrade();

        let on_move = chart.subscribe_pointer_move("tooltip", {
            let weak = weak.clone();
            let shared = shared.clone();
            move |x, _y| {
                let Some(chart) = weak.upgrade() else {
                    return Ok(());
                };
                let mut shared = shared
                    .try_borrow_mut()
                    .map_err(|_| anyhow::anyhow!("tooltip state is busy"))?;
                shared.hover(&chart, x);
                chart.request_repaint();
                Ok(())
            }
        })?;

        let on_leave = chart.subscribe_pointer_leave("tooltip", {
            let shared = shared.clone();
            move || {
                let mut shared = shared
                    .try_borrow_mut()
                    .map_err(|_| anyhow::anyhow!("tooltip state is busy"))?;
                shared.state = TooltipState::default();
                Ok(())
            }
        })?;

        let render = chart.register_render("tooltip", {
            let weak = weak.clone();
            let shared = shared.clone();
            move |ctx| {
                let Some(chart) = weak.upgrade() else {
                    return Ok(());
                };
                let mut shared = shared
                    .try_borrow_mut()
                    .map_err(|_| anyhow::anyhow!("tooltip state is busy"))?;
                shared.refresh(&chart);
                let Some(point) = chart
                    .hovered_index()
                    .and_then(|i| shared.points.get(i))
                    .map(ProjectedPoint::position)
                else {
                    return Ok(());
                };
                let cursor = match &shared.props.cursor {
                    CursorStyle::Hidden => None,
                    CursorStyle::Default => Some(CrosshairStyle::default()),
                    CursorStyle::Custom(style) => Some(style.clone()),
                };
                if let Some(style) = cursor {
                    draw_crosshair(ctx, point, chart.inner_rect(), &style);
                }
                if let Some(dot) = &shared.props.active_dot {
                    draw_active_dot(ctx, point, dot);
                }
                Ok(())
            }
        })?;

        Ok(Self {
            chart: weak,
            shared,
            on_move,
            on_leave,
            render,
        })
    }

    /// Current overlay state. Inactive once nothing is hovered or the chart
    /// has no data.
    pub fn state(&self) -> TooltipState {
        let Some(chart) = self.chart.upgrade() else {
            return TooltipState::default();
        };
        if chart.hovered_index().is_none() || chart.data().is_empty() {
            return TooltipState::default();
        }
        self.shared.borrow().state.clone()
    }

    pub fn update(&self, props: TooltipProps) {
        self.shared.borrow_mut().props = props;
        if let Some(chart) = self.chart.upgrade() {
            chart.request_repaint();
        }
    }

    pub fn unmount(self) {
        self.on_move.dispose();
        self.on_leave.dispose();
        self.render.dispose();
    }
}
