use std::rc::Rc;

use qurve_paint::{Color, DrawContext, PathBuilder, Point, Rect, TextAlign, TextBaseline};

use crate::format::format_tick;
use crate::scale::LinearScale;

const TICK_LENGTH: f32 = 6.0;
const LABEL_OFFSET: f32 = 8.0;

/// Formats a tick value into its label.
pub type TickFormatter = Rc<dyn Fn(f64) -> String>;

/// Which side of the plot area an axis sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisEdge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl AxisEdge {
    pub fn is_horizontal(self) -> bool {
        matches!(self, AxisEdge::Top | AxisEdge::Bottom)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    pub stroke: Color,
    /// Draw tick labels.
    pub tick: bool,
    pub tick_line: bool,
    pub axis_line: bool,
    pub font_size: f32,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            stroke: Color::from_hex(0x666666),
            tick: true,
            tick_line: true,
            axis_line: true,
            font_size: 12.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    /// Surface coordinate along the axis.
    pub px: f32,
    pub label: String,
}

/// Ticks for `scale`, positioned at `offset + scale(value)`.
pub fn build_ticks(
    scale: &LinearScale,
    tick_count: usize,
    offset: f32,
    formatter: Option<&TickFormatter>,
) -> Vec<AxisTick> {
    scale
        .ticks(tick_count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            px: offset + scale.map(value) as f32,
            label: match formatter {
                Some(f) => f(value),
                None => format_tick(value),
            },
        })
        .collect()
}

/// Baseline, inward tick marks and outward labels along one edge of `area`.
pub fn draw_axis(
    ctx: &mut dyn DrawContext,
    edge: AxisEdge,
    area: Rect,
    ticks: &[AxisTick],
    style: &AxisStyle,
) {
    let (from, to) = match edge {
        AxisEdge::Top => (area.origin(), Point::new(area.right(), area.y)),
        AxisEdge::Bottom => (
            Point::new(area.x, area.bottom()),
            Point::new(area.right(), area.bottom()),
        ),
        AxisEdge::Left => (area.origin(), Point::new(area.x, area.bottom())),
        AxisEdge::Right => (
            Point::new(area.right(), area.y),
            Point::new(area.right(), area.bottom()),
        ),
    };
    // Unit vector pointing into the plot area.
    let (nx, ny) = match edge {
        AxisEdge::Top => (0.0, 1.0),
        AxisEdge::Bottom => (0.0, -1.0),
        AxisEdge::Left => (1.0, 0.0),
        AxisEdge::Right => (-1.0, 0.0),
    };

    ctx.save();
    ctx.set_stroke_color(style.stroke);
    ctx.set_fill_color(style.stroke);
    ctx.set_line_width(1.0);
    ctx.set_font_size(style.font_size);
    let (align, baseline) = match edge {
        AxisEdge::Top => (TextAlign::Center, TextBaseline::Bottom),
        AxisEdge::Bottom => (TextAlign::Center, TextBaseline::Top),
        AxisEdge::Left => (TextAlign::Right, TextBaseline::Middle),
        AxisEdge::Right => (TextAlign::Left, TextBaseline::Middle),
    };
    ctx.set_text_align(align);
    ctx.set_text_baseline(baseline);

    if style.axis_line {
        let path = PathBuilder::new()
            .move_to(from.x, from.y)
            .line_to(to.x, to.y)
            .build();
        ctx.stroke_path(&path);
    }

    for t in ticks {
        let anchor = if edge.is_horizontal() {
            Point::new(t.px, from.y)
        } else {
            Point::new(from.x, t.px)
        };
        if style.tick_line {
            let path = PathBuilder::new()
                .move_to(anchor.x, anchor.y)
                .line_to(anchor.x + nx * TICK_LENGTH, anchor.y + ny * TICK_LENGTH)
                .build();
            ctx.stroke_path(&path);
        }
        if style.tick {
            let at = Point::new(
                anchor.x - nx * LABEL_OFFSET,
                anchor.y - ny * LABEL_OFFSET,
            );
            ctx.fill_text(&t.label, at);
        }
    }

    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use qurve_paint::{PaintCommand, PaintContext};

    #[test]
    fn ticks_are_offset_into_surface_space() {
        let s = LinearScale::new(0.0, 10.0, 0.0, 100.0);
        let ticks = build_ticks(&s, 5, 40.0, None);
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[1].px, 60.0);
        assert_eq!(ticks[1].label, "2");
    }

    #[test]
    fn custom_formatter_is_used() {
        let s = LinearScale::new(0.0, 1.0, 0.0, 100.0);
        let f: TickFormatter = Rc::new(|v| format!("{:.0}%", v * 100.0));
        let ticks = build_ticks(&s, 2, 0.0, Some(&f));
        assert_eq!(ticks.last().map(|t| t.label.as_str()), Some("100%"));
    }

    #[test]
    fn bottom_axis_labels_hang_below() {
        let mut ctx = PaintContext::new();
        let area = Rect::new(10.0, 10.0, 100.0, 50.0);
        let ticks = vec![AxisTick {
            value: 0.0,
            px: 10.0,
            label: "0".into(),
        }];
        draw_axis(&mut ctx, AxisEdge::Bottom, area, &ticks, &AxisStyle::default());
        let text = ctx.commands().iter().find_map(|c| match c {
            PaintCommand::DrawText {
                position, style, ..
            } => Some((*position, style.align, style.baseline)),
            _ => None,
        });
        assert_eq!(
            text,
            Some((Point::new(10.0, 68.0), TextAlign::Center, TextBaseline::Top))
        );
        let strokes = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, PaintCommand::StrokePath { .. }))
            .count();
        assert_eq!(strokes, 2);
        assert_eq!(ctx.save_depth(), 0);
    }

    #[test]
    fn left_axis_ticks_point_inward() {
        let mut ctx = PaintContext::new();
        let area = Rect::new(40.0, 0.0, 100.0, 100.0);
        let ticks = vec![AxisTick {
            value: 1.0,
            px: 50.0,
            label: "1".into(),
        }];
        let style = AxisStyle {
            axis_line: false,
            ..AxisStyle::default()
        };
        draw_axis(&mut ctx, AxisEdge::Left, area, &ticks, &style);
        let tick_end = ctx.commands().iter().find_map(|c| match c {
            PaintCommand::StrokePath { path, .. } => path.vertices().last(),
            _ => None,
        });
        assert_eq!(tick_end, Some(Point::new(46.0, 50.0)));
        let label_at = ctx.commands().iter().find_map(|c| match c {
            PaintCommand::DrawText { position, .. } => Some(*position),
            _ => None,
        });
        assert_eq!(label_at, Some(Point::new(32.0, 50.0)));
    }
}
