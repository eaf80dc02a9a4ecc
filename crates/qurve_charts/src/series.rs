//! Line series producer.

use std::cell::RefCell;
use std::rc::Rc;

use qurve_core::Disposer;
use qurve_paint::{Color, DrawContext};

use crate::chart::{Chart, WeakChart};
use crate::data::DataKey;
use crate::draw::{draw_active_dot, draw_dots, draw_line_path, CurveType, DotStyle};
use crate::error::Result;
use crate::interaction::TooltipItem;
use crate::project::ProjectedPoint;

/// Marker configuration for data points or the hovered point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Dot {
    Hidden,
    /// The series' default look for this marker.
    #[default]
    Default,
    Custom(DotStyle),
}

impl Dot {
    fn resolve(&self, default: DotStyle) -> Option<DotStyle> {
        match self {
            Dot::Hidden => None,
            Dot::Default => Some(default),
            Dot::Custom(style) => Some(*style),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LineProps {
    pub data_key: DataKey,
    pub curve: CurveType,
    pub stroke: Color,
    pub stroke_width: f32,
    pub dot: Dot,
    pub active_dot: Dot,
    pub name: Option<String>,
}

impl LineProps {
    pub fn new(data_key: impl Into<DataKey>) -> Self {
        Self {
            data_key: data_key.into(),
            curve: CurveType::Linear,
            stroke: Color::from_hex(0x8884d8),
            stroke_width: 2.0,
            dot: Dot::Default,
            active_dot: Dot::Default,
            name: None,
        }
    }

    pub fn with_curve(mut self, curve: CurveType) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_dot(mut self, dot: Dot) -> Self {
        self.dot = dot;
        self
    }

    pub fn with_active_dot(mut self, dot: Dot) -> Self {
        self.active_dot = dot;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Key reported in tooltip items: the field name, or the series name for
    /// function accessors.
    fn item_key(&self) -> String {
        match (self.data_key.name(), &self.name) {
            ("", Some(name)) => name.clone(),
            (key, _) => key.to_string(),
        }
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.item_key())
    }
}

struct LineState {
    props: LineProps,
    points: Vec<ProjectedPoint>,
    // Chart revision `points` were projected for.
    projected_at: Option<u64>,
}

impl LineState {
    fn refresh(&mut self, chart: &Chart) {
        let revision = chart.revision();
        if self.projected_at != Some(revision) {
            self.points = chart.project(Some(&self.props.data_key));
            self.projected_at = Some(revision);
        }
    }

    fn render(&self, chart: &Chart, ctx: &mut dyn DrawContext) {
        let props = &self.props;
        draw_line_path(ctx, &self.points, props.curve, props.stroke, props.stroke_width);
        if let Some(style) = props.dot.resolve(DotStyle::point(props.stroke)) {
            draw_dots(ctx, &self.points, &style);
        }
        let active = chart
            .hovered_index()
            .and_then(|i| self.points.get(i))
            .zip(props.active_dot.resolve(DotStyle::active(props.stroke)));
        if let Some((point, style)) = active {
            draw_active_dot(ctx, point.position(), &style);
        }
    }
}

/// A mounted line series. Dropping it (or calling [`LineSeries::unmount`])
/// removes its renderer and tooltip resolver.
pub struct LineSeries {
    chart: WeakChart,
    state: Rc<RefCell<LineState>>,
    render: Disposer,
    resolver: Disposer,
}

impl LineSeries {
    pub fn mount(chart: &Chart, props: LineProps) -> Result<Self> {
        let label = format!("line:{}", props.display_name());
        let state = Rc::new(RefCell::new(LineState {
            props,
            points: Vec::new(),
            projected_at: None,
        }));
        let weak = chart.downgrade();

        let render = chart.register_render(&label, {
            let weak = weak.clone();
            let state = state.clone();
            move |ctx| {
                let Some(chart) = weak.upgrade() else {
                    return Ok(());
                };
                let mut state = state
                    .try_borrow_mut()
                    .map_err(|_| anyhow::anyhow!("line state is busy"))?;
                state.refresh(&chart);
                state.render(&chart, ctx);
                Ok(())
            }
        })?;

        let resolver = chart.register_tooltip_resolver(&label, {
            let weak = weak.clone();
            let state = state.clone();
            move |index| {
                let Some(chart) = weak.upgrade() else {
                    return Ok(None);
                };
                let data = chart.data();
                let Some(record) = data.get(index) else {
                    return Ok(None);
                };
                let state = state
                    .try_borrow()
                    .map_err(|_| anyhow::anyhow!("line state is busy"))?;
                let props = &state.props;
                Ok(Some(TooltipItem {
                    key: props.item_key(),
                    label: props.display_name(),
                    value: props.data_key.resolve(record, index).as_finite(),
                    color: Some(props.stroke),
                }))
            }
        })?;

        Ok(Self {
            chart: weak,
            state,
            render,
            resolver,
        })
    }

    pub fn props(&self) -> LineProps {
        self.state.borrow().props.clone()
    }

    /// Replace the series configuration and repaint.
    pub fn update(&self, props: LineProps) {
        {
            let mut state = self.state.borrow_mut();
            state.props = props;
            state.projected_at = None;
        }
        if let Some(chart) = self.chart.upgrade() {
            chart.request_repaint();
        }
    }

    /// Projected points for the current chart state.
    pub fn points(&self) -> Vec<ProjectedPoint> {
        let Some(chart) = self.chart.upgrade() else {
            return Vec::new();
        };
        let mut state = self.state.borrow_mut();
        state.refresh(&chart);
        state.points.clone()
    }

    pub fn unmount(self) {
        self.render.dispose();
        self.resolver.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartProps;
    use crate::data::record;
    use qurve_core::ManualFrames;
    use qurve_paint::{PaintCommand, PaintContext};

    fn chart() -> Chart {
        let data = vec![
            record([("x", 0.0), ("uv", 10.0)]),
            record([("x", 1.0), ("uv", 20.0)]),
            record([("x", 2.0), ("uv", 10.0)]),
        ];
        Chart::new(data, ChartProps::default(), ManualFrames::new()).unwrap()
    }

    fn circles(ctx: &PaintContext) -> usize {
        ctx.commands()
            .iter()
            .filter(|c| matches!(c, PaintCommand::FillCircle { .. }))
            .count()
    }

    #[test]
    fn renders_line_and_dots() {
        let chart = chart();
        let _line = LineSeries::mount(&chart, LineProps::new("uv")).unwrap();
        let mut ctx = PaintContext::new();
        let stats = chart.flush(&mut ctx);
        assert_eq!(stats.failed, 0);
        assert!(ctx
            .commands()
            .iter()
            .any(|c| matches!(c, PaintCommand::StrokePath { .. })));
        assert_eq!(circles(&ctx), 3);
    }

    #[test]
    fn hidden_dots_and_active_dot() {
        let chart = chart();
        let _line =
            LineSeries::mount(&chart, LineProps::new("uv").with_dot(Dot::Hidden)).unwrap();
        chart.set_hovered_index(Some(1));
        let mut ctx = PaintContext::new();
        chart.flush(&mut ctx);
        assert_eq!(circles(&ctx), 1);
    }

    #[test]
    fn resolver_reports_series_value() {
        let chart = chart();
        let _line = LineSeries::mount(
            &chart,
            LineProps::new("uv").with_name("Visits").with_stroke(Color::BLACK),
        )
        .unwrap();
        let payload = chart.tooltip_payload(1);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].key, "uv");
        assert_eq!(payload[0].label, "Visits");
        assert_eq!(payload[0].value, Some(20.0));
        assert_eq!(payload[0].color, Some(Color::BLACK));
        assert!(chart.tooltip_payload(9).is_empty());
    }

    #[test]
    fn points_follow_data_changes() {
        let chart = chart();
        let line = LineSeries::mount(&chart, LineProps::new("uv")).unwrap();
        assert_eq!(line.points().len(), 3);
        chart.set_data(vec![record([("uv", 1.0)])]);
        assert_eq!(line.points().len(), 1);
    }

    #[test]
    fn remounted_func_series_gets_its_own_domain() {
        let data: Vec<_> = (0..5)
            .map(|i| record([("a", i as f64), ("b", 1000.0 + i as f64 * 500.0)]))
            .collect();
        let chart = Chart::new(data, ChartProps::default(), ManualFrames::new()).unwrap();
        let field = |name: &'static str| {
            DataKey::func(move |r: &crate::Record, _| r.get(name).cloned().unwrap_or_default())
        };
        for _ in 0..20 {
            let a = LineSeries::mount(&chart, LineProps::new(field("a"))).unwrap();
            chart.flush(&mut PaintContext::new());
            a.unmount();

            let b = LineSeries::mount(&chart, LineProps::new(field("b"))).unwrap();
            let ys: Vec<f32> = b.points().iter().map(|p| p.y).collect();
            assert!(ys.iter().all(|y| (0.0..=300.0).contains(y)), "{ys:?}");
            b.unmount();
        }
    }

    #[test]
    fn unmount_removes_renderer_and_resolver() {
        let chart = chart();
        let line = LineSeries::mount(&chart, LineProps::new("uv")).unwrap();
        assert_eq!(chart.renderer_count(), 1);
        line.unmount();
        assert_eq!(chart.renderer_count(), 0);
        assert!(chart.tooltip_payload(0).is_empty());
    }
}
