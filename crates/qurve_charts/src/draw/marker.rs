use qurve_paint::{Color, DrawContext, PathBuilder, Point, Rect};
use smallvec::SmallVec;

use crate::project::ProjectedPoint;

/// Circle marker with independent fill and stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotStyle {
    pub radius: f32,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl DotStyle {
    /// Regular data-point marker: filled with the series colour, white rim.
    pub fn point(series: Color) -> Self {
        Self {
            radius: 3.0,
            fill: series,
            stroke: Color::WHITE,
            stroke_width: 1.0,
        }
    }

    /// Highlight for the hovered point: white fill, coloured rim.
    pub fn active(stroke: Color) -> Self {
        Self {
            radius: 6.0,
            fill: Color::WHITE,
            stroke,
            stroke_width: 2.0,
        }
    }
}

fn dot(ctx: &mut dyn DrawContext, at: Point, style: &DotStyle) {
    ctx.fill_circle(at, style.radius);
    ctx.stroke_circle(at, style.radius);
}

pub fn draw_dots(ctx: &mut dyn DrawContext, points: &[ProjectedPoint], style: &DotStyle) {
    if style.radius <= 0.0 || points.is_empty() {
        return;
    }
    ctx.save();
    ctx.set_fill_color(style.fill);
    ctx.set_stroke_color(style.stroke);
    ctx.set_line_width(style.stroke_width);
    for p in points {
        dot(ctx, p.position(), style);
    }
    ctx.restore();
}

pub fn draw_active_dot(ctx: &mut dyn DrawContext, at: Point, style: &DotStyle) {
    if style.radius <= 0.0 {
        return;
    }
    ctx.save();
    ctx.set_fill_color(style.fill);
    ctx.set_stroke_color(style.stroke);
    ctx.set_line_width(style.stroke_width);
    dot(ctx, at, style);
    ctx.restore();
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrosshairStyle {
    pub stroke: Color,
    pub stroke_width: f32,
    pub dash: SmallVec<[f32; 4]>,
}

impl Default for CrosshairStyle {
    fn default() -> Self {
        Self {
            stroke: Color::from_hex(0x666666),
            stroke_width: 1.0,
            dash: SmallVec::from_slice(&[4.0, 4.0]),
        }
    }
}

/// Full-height vertical and full-width horizontal line through `at`,
/// clipped to `area`.
pub fn draw_crosshair(ctx: &mut dyn DrawContext, at: Point, area: Rect, style: &CrosshairStyle) {
    if area.width <= 0.0 || area.height <= 0.0 {
        return;
    }
    ctx.save();
    ctx.push_clip(area);
    ctx.set_stroke_color(style.stroke);
    ctx.set_line_width(style.stroke_width);
    ctx.set_line_dash(&style.dash);

    let vertical = PathBuilder::new()
        .move_to(at.x, area.y)
        .line_to(at.x, area.bottom())
        .build();
    ctx.stroke_path(&vertical);
    let horizontal = PathBuilder::new()
        .move_to(area.x, at.y)
        .line_to(area.right(), at.y)
        .build();
    ctx.stroke_path(&horizontal);

    ctx.pop_clip();
    ctx.restore();
}
