//! Axis and grid producers.

use std::cell::RefCell;
use std::rc::Rc;

use qurve_core::Disposer;
use qurve_paint::{parse_dash_array, Color};

use crate::chart::{AxisConfig, AxisRole, Chart, WeakChart};
use crate::data::DataKey;
use crate::draw::{build_ticks, draw_axis, draw_grid, AxisEdge, AxisStyle, GridStyle};
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum XAxisPosition {
    Top,
    #[default]
    Bottom,
}

impl From<XAxisPosition> for AxisEdge {
    fn from(p: XAxisPosition) -> Self {
        match p {
            XAxisPosition::Top => AxisEdge::Top,
            XAxisPosition::Bottom => AxisEdge::Bottom,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum YAxisPosition {
    #[default]
    Left,
    Right,
}

impl From<YAxisPosition> for AxisEdge {
    fn from(p: YAxisPosition) -> Self {
        match p {
            YAxisPosition::Left => AxisEdge::Left,
            YAxisPosition::Right => AxisEdge::Right,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct XAxisProps {
    pub config: AxisConfig,
    pub position: XAxisPosition,
    pub style: AxisStyle,
}

#[derive(Clone, Debug, Default)]
pub struct YAxisProps {
    pub config: AxisConfig,
    pub position: YAxisPosition,
    pub style: AxisStyle,
}

macro_rules! axis_props_builders {
    ($props:ty, $position:ty) => {
        impl $props {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn with_position(mut self, position: $position) -> Self {
                self.position = position;
                self
            }

            pub fn with_data_key(mut self, key: impl Into<DataKey>) -> Self {
                self.config.data_key = Some(key.into());
                self
            }

            pub fn with_domain(mut self, min: f64, max: f64) -> Self {
                self.config = self.config.with_domain(min, max);
                self
            }

            pub fn with_reversed(mut self, reversed: bool) -> Self {
                self.config.reversed = reversed;
                self
            }

            pub fn with_tick_count(mut self, count: usize) -> Self {
                self.config.tick_count = count;
                self
            }

            pub fn with_tick_formatter<F>(mut self, f: F) -> Self
            where
                F: Fn(f64) -> String + 'static,
            {
                self.config = self.config.with_tick_formatter(f);
                self
            }

            pub fn with_stroke(mut self, stroke: Color) -> Self {
                self.style.stroke = stroke;
                self
            }

            /// Show or hide tick labels.
            pub fn with_tick_labels(mut self, show: bool) -> Self {
                self.style.tick = show;
                self
            }

            pub fn with_tick_line(mut self, show: bool) -> Self {
                self.style.tick_line = show;
                self
            }

            pub fn with_axis_line(mut self, show: bool) -> Self {
                self.style.axis_line = show;
                self
            }

            pub fn with_font_size(mut self, size: f32) -> Self {
                self.style.font_size = size;
                self
            }
        }
    };
}

axis_props_builders!(XAxisProps, XAxisPosition);
axis_props_builders!(YAxisProps, YAxisPosition);

struct AxisState {
    edge: AxisEdge,
    config: AxisConfig,
    style: AxisStyle,
}

// Clears the chart's axis slot on drop unless a newer configuration has
// replaced ours in the meantime.
fn release_on_drop(chart: &Chart, role: AxisRole, generation: u64) -> Disposer {
    let weak = chart.downgrade();
    Disposer::new(move || {
        if let Some(chart) = weak.upgrade() {
            chart.release_axis(role, generation);
        }
    })
}

struct AxisProducer {
    chart: WeakChart,
    role: AxisRole,
    state: Rc<RefCell<AxisState>>,
    release: Disposer,
    render: Disposer,
}

impl AxisProducer {
    fn mount(chart: &Chart, role: AxisRole, state: AxisState) -> Result<Self> {
        let generation = chart.set_axis(role, Some(state.config.clone()))?;
        let release = release_on_drop(chart, role, generation);
        let state = Rc::new(RefCell::new(state));
        let weak = chart.downgrade();

        let label = match role {
            AxisRole::X => "x-axis",
            AxisRole::Y => "y-axis",
        };
        let render = chart.register_render(label, {
            let weak = weak.clone();
            let state = state.clone();
            move |ctx| {
                let Some(chart) = weak.upgrade() else {
                    return Ok(());
                };
                let state = state
                    .try_borrow()
                    .map_err(|_| anyhow::anyhow!("axis state is busy"))?;
                let area = chart.inner_rect();
                let (scale, offset) = match role {
                    AxisRole::X => (chart.x_scale(), area.x),
                    AxisRole::Y => (chart.y_scale(None), area.y),
                };
                let ticks = build_ticks(
                    &scale,
                    state.config.tick_count,
                    offset,
                    state.config.tick_formatter.as_ref(),
                );
                draw_axis(ctx, state.edge, area, &ticks, &state.style);
                Ok(())
            }
        })?;

        Ok(Self {
            chart: weak,
            role,
            state,
            release,
            render,
        })
    }

    fn update(&mut self, next: AxisState) -> Result<()> {
        if let Some(chart) = self.chart.upgrade() {
            let generation = chart.set_axis(self.role, Some(next.config.clone()))?;
            // The old guard now refers to a stale generation; dropping it is a no-op.
            self.release = release_on_drop(&chart, self.role, generation);
        }
        *self.state.borrow_mut() = next;
        Ok(())
    }

    fn unmount(self) {
        self.render.dispose();
        self.release.dispose();
    }
}

/// Horizontal axis. Registers the chart's x configuration and draws ticks
/// along the top or bottom edge of the plot area.
pub struct XAxis {
    inner: AxisProducer,
}

impl XAxis {
    pub fn mount(chart: &Chart, props: XAxisProps) -> Result<Self> {
        let state = AxisState {
            edge: props.position.into(),
            config: props.config,
            style: props.style,
        };
        Ok(Self {
            inner: AxisProducer::mount(chart, AxisRole::X, state)?,
        })
    }

    pub fn update(&mut self, props: XAxisProps) -> Result<()> {
        self.inner.update(AxisState {
            edge: props.position.into(),
            config: props.config,
            style: props.style,
        })
    }

    pub fn unmount(self) {
        self.inner.unmount();
    }
}

/// Vertical axis along the left or right edge of the plot area.
pub struct YAxis {
    inner: AxisProducer,
}

impl YAxis {
    pub fn mount(chart: &Chart, props: YAxisProps) -> Result<Self> {
        let state = AxisState {
            edge: props.position.into(),
            config: props.config,
            style: props.style,
        };
        Ok(Self {
            inner: AxisProducer::mount(chart, AxisRole::Y, state)?,
        })
    }

    pub fn update(&mut self, props: YAxisProps) -> Result<()> {
        self.inner.update(AxisState {
            edge: props.position.into(),
            config: props.config,
            style: props.style,
        })
    }

    pub fn unmount(self) {
        self.inner.unmount();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridProps {
    pub horizontal: bool,
    pub vertical: bool,
    pub horizontal_count: usize,
    pub vertical_count: usize,
    pub stroke: Color,
    pub stroke_width: f32,
    /// Canvas-style dash pattern, e.g. `"3 3"`. Empty for solid lines.
    pub stroke_dasharray: String,
}

impl Default for GridProps {
    fn default() -> Self {
        let style = GridStyle::default();
        Self {
            horizontal: style.horizontal,
            vertical: style.vertical,
            horizontal_count: style.horizontal_count,
            vertical_count: style.vertical_count,
            stroke: style.stroke,
            stroke_width: style.stroke_width,
            stroke_dasharray: "3 3".to_string(),
        }
    }
}

impl GridProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(mut self, horizontal: usize, vertical: usize) -> Self {
        self.horizontal_count = horizontal;
        self.vertical_count = vertical;
        self
    }

    pub fn with_horizontal(mut self, show: bool) -> Self {
        self.horizontal = show;
        self
    }

    pub fn with_vertical(mut self, show: bool) -> Self {
        self.vertical = show;
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_dasharray(mut self, dash: impl Into<String>) -> Self {
        self.stroke_dasharray = dash.into();
        self
    }

    fn style(&self) -> GridStyle {
        GridStyle {
            horizontal: self.horizontal,
            vertical: self.vertical,
            horizontal_count: self.horizontal_count,
            vertical_count: self.vertical_count,
            stroke: self.stroke,
            stroke_width: self.stroke_width,
            dash: parse_dash_array(&self.stroke_dasharray),
        }
    }
}

/// Background grid across the plot area.
pub struct CartesianGrid {
    chart: WeakChart,
    style: Rc<RefCell<GridStyle>>,
    render: Disposer,
}

impl CartesianGrid {
    pub fn mount(chart: &Chart, props: GridProps) -> Result<Self> {
        let style = Rc::new(RefCell::new(props.style()));
        let weak = chart.downgrade();
        let render = chart.register_render("grid", {
            let weak = weak.clone();
            let style = style.clone();
            move |ctx| {
                let Some(chart) = weak.upgrade() else {
                    return Ok(());
                };
                let style = style
                    .try_borrow()
                    .map_err(|_| anyhow::anyhow!("grid style is busy"))?;
                draw_grid(ctx, chart.inner_rect(), &style);
                Ok(())
            }
        })?;
        Ok(Self {
            chart: weak,
            style,
            render,
        })
    }

    pub fn update(&self, props: GridProps) {
        *self.style.borrow_mut() = props.style();
        if let Some(chart) = self.chart.upgrade() {
            chart.request_repaint();
        }
    }

    pub fn unmount(self) {
        self.render.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{AxisDomain, ChartProps};
    use crate::data::record;
    use crate::layout::Margin;
    use qurve_core::ManualFrames;
    use qurve_paint::{PaintCommand, PaintContext, TextAlign};

    fn chart() -> Chart {
        let data: Vec<_> = (0..5).map(|i| record([("y", i as f64 * 10.0)])).collect();
        let props = ChartProps::default().with_margin(Margin::new(10.0, 10.0, 30.0, 40.0));
        Chart::new(data, props, ManualFrames::new()).unwrap()
    }

    fn texts(ctx: &PaintContext) -> Vec<String> {
        ctx.commands()
            .iter()
            .filter_map(|c| match c {
                PaintCommand::DrawText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn x_axis_registers_config_and_releases_on_drop() {
        let chart = chart();
        let axis = XAxis::mount(&chart, XAxisProps::new().with_domain(0.0, 10.0)).unwrap();
        assert_eq!(chart.x_axis().map(|a| a.domain), Some(AxisDomain::Fixed(0.0, 10.0)));
        drop(axis);
        assert!(chart.x_axis().is_none());
        assert_eq!(chart.renderer_count(), 0);
    }

    #[test]
    fn dropping_a_replaced_axis_keeps_the_newer_one() {
        let chart = chart();
        let first = XAxis::mount(&chart, XAxisProps::new().with_domain(0.0, 1.0)).unwrap();
        let _second = XAxis::mount(&chart, XAxisProps::new().with_domain(0.0, 2.0)).unwrap();
        first.unmount();
        assert_eq!(chart.x_axis().map(|a| a.domain), Some(AxisDomain::Fixed(0.0, 2.0)));
    }

    #[test]
    fn update_reregisters_axis() {
        let chart = chart();
        let mut axis = YAxis::mount(&chart, YAxisProps::new()).unwrap();
        axis.update(YAxisProps::new().with_domain(0.0, 100.0)).unwrap();
        assert_eq!(chart.y_scale(None).domain(), (0.0, 100.0));
        drop(axis);
        assert!(chart.y_axis().is_none());
    }

    #[test]
    fn x_axis_draws_index_ticks() {
        let chart = chart();
        let _axis = XAxis::mount(&chart, XAxisProps::new().with_tick_count(4)).unwrap();
        let mut ctx = PaintContext::new();
        chart.flush(&mut ctx);
        assert_eq!(texts(&ctx), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn y_axis_uses_formatter_and_right_edge_alignment() {
        let chart = chart();
        let _axis = YAxis::mount(
            &chart,
            YAxisProps::new()
                .with_domain(0.0, 100.0)
                .with_tick_count(2)
                .with_position(YAxisPosition::Right)
                .with_tick_formatter(|v| format!("{v}%")),
        )
        .unwrap();
        let mut ctx = PaintContext::new();
        chart.flush(&mut ctx);
        assert_eq!(texts(&ctx), vec!["0%", "50%", "100%"]);
        let aligned_left = ctx.commands().iter().any(|c| {
            matches!(c, PaintCommand::DrawText { style, .. } if style.align == TextAlign::Left)
        });
        assert!(aligned_left);
    }

    #[test]
    fn grid_uses_plot_area_and_dash_pattern() {
        let chart = chart();
        let grid = CartesianGrid::mount(
            &chart,
            GridProps::new().with_counts(2, 2).with_dasharray("5"),
        )
        .unwrap();
        let mut ctx = PaintContext::new();
        chart.flush(&mut ctx);
        let dashes: Vec<_> = ctx
            .commands()
            .iter()
            .filter_map(|c| match c {
                PaintCommand::StrokePath { style, .. } => Some(style.dash.to_vec()),
                _ => None,
            })
            .collect();
        assert_eq!(dashes.len(), 6);
        assert!(dashes.iter().all(|d| d == &[5.0, 5.0]));

        grid.update(GridProps::new().with_horizontal(false).with_counts(2, 2));
        let mut ctx = PaintContext::new();
        chart.flush(&mut ctx);
        let strokes = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, PaintCommand::StrokePath { .. }))
            .count();
        assert_eq!(strokes, 3);
    }
}
