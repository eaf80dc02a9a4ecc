use qurve_paint::{Color, DrawContext, LineCap, LineJoin, Path, PathBuilder};

use crate::project::ProjectedPoint;

/// Interpolation between consecutive points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurveType {
    #[default]
    Linear,
    /// Cubic segments with both control points at the horizontal midpoint,
    /// each holding its endpoint's y. Never overshoots the data.
    Monotone,
    /// Horizontal then vertical at each point.
    Step,
    /// Vertical then horizontal at each point.
    StepBefore,
    /// Horizontal to the midpoint, vertical, horizontal to the point.
    StepMiddle,
}

/// Path through `points`. Fewer than two points yield an empty path.
pub fn line_path(points: &[ProjectedPoint], curve: CurveType) -> Path {
    let (first, rest) = match points {
        [first, rest @ ..] if !rest.is_empty() => (first, rest),
        _ => return Path::new(),
    };

    let mut b = PathBuilder::new().move_to(first.x, first.y);
    let mut prev = first;
    for p in rest {
        b = match curve {
            CurveType::Linear => b.line_to(p.x, p.y),
            CurveType::Monotone => {
                let mid = prev.x + (p.x - prev.x) / 2.0;
                b.cubic_to(mid, prev.y, mid, p.y, p.x, p.y)
            }
            CurveType::Step => b.line_to(p.x, prev.y).line_to(p.x, p.y),
            CurveType::StepBefore => b.line_to(prev.x, p.y).line_to(p.x, p.y),
            CurveType::StepMiddle => {
                let mid = prev.x + (p.x - prev.x) / 2.0;
                b.line_to(mid, prev.y).line_to(mid, p.y).line_to(p.x, p.y)
            }
        };
        prev = p;
    }
    b.build()
}

/// Stroke the line through `points` with round caps and joins.
pub fn draw_line_path(
    ctx: &mut dyn DrawContext,
    points: &[ProjectedPoint],
    curve: CurveType,
    stroke: Color,
    stroke_width: f32,
) {
    let path = line_path(points, curve);
    if path.is_empty() {
        return;
    }
    ctx.save();
    ctx.set_stroke_color(stroke);
    ctx.set_line_width(stroke_width);
    ctx.set_line_cap(LineCap::Round);
    ctx.set_line_join(LineJoin::Round);
    ctx.stroke_path(&path);
    ctx.restore();
}
