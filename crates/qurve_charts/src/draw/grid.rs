use qurve_paint::{Color, DrawContext, PathBuilder, Rect};
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    pub horizontal: bool,
    pub vertical: bool,
    pub horizontal_count: usize,
    pub vertical_count: usize,
    pub stroke: Color,
    pub stroke_width: f32,
    pub dash: SmallVec<[f32; 4]>,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: true,
            horizontal_count: 5,
            vertical_count: 5,
            stroke: Color::from_hex(0xe0e0e0),
            stroke_width: 1.0,
            dash: SmallVec::from_slice(&[3.0, 3.0]),
        }
    }
}

/// `vertical_count + 1` vertical and `horizontal_count + 1` horizontal lines
/// spread evenly across `area`, edges included. A zero count draws only the
/// left or top edge.
pub fn draw_grid(ctx: &mut dyn DrawContext, area: Rect, style: &GridStyle) {
    if area.width <= 0.0 || area.height <= 0.0 {
        return;
    }

    ctx.save();
    ctx.set_stroke_color(style.stroke);
    ctx.set_line_width(style.stroke_width);
    ctx.set_line_dash(&style.dash);

    if style.vertical {
        for x in line_offsets(area.x, area.width, style.vertical_count) {
            let path = PathBuilder::new()
                .move_to(x, area.y)
                .line_to(x, area.bottom())
                .build();
            ctx.stroke_path(&path);
        }
    }

    if style.horizontal {
        for y in line_offsets(area.y, area.height, style.horizontal_count) {
            let path = PathBuilder::new()
                .move_to(area.x, y)
                .line_to(area.right(), y)
                .build();
            ctx.stroke_path(&path);
        }
    }

    ctx.restore();
}

// `count + 1` evenly spaced offsets; a zero count is the start edge alone.
fn line_offsets(start: f32, length: f32, count: usize) -> impl Iterator<Item = f32> {
    let step = if count == 0 { 0.0 } else { length / count as f32 };
    (0..=count).map(move |i| start + i as f32 * step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qurve_paint::{PaintCommand, PaintContext, PathCommand, Point};

    fn strokes(ctx: &PaintContext) -> Vec<&PaintCommand> {
        ctx.commands()
            .iter()
            .filter(|c| matches!(c, PaintCommand::StrokePath { .. }))
            .collect()
    }

    #[test]
    fn draws_count_plus_one_lines_each_way() {
        let mut ctx = PaintContext::new();
        let style = GridStyle {
            horizontal_count: 4,
            vertical_count: 2,
            ..GridStyle::default()
        };
        draw_grid(&mut ctx, Rect::new(0.0, 0.0, 100.0, 80.0), &style);
        assert_eq!(strokes(&ctx).len(), 3 + 5);
    }

    #[test]
    fn zero_count_draws_single_edge_line() {
        let mut ctx = PaintContext::new();
        let style = GridStyle {
            horizontal_count: 0,
            vertical_count: 0,
            ..GridStyle::default()
        };
        draw_grid(&mut ctx, Rect::new(10.0, 20.0, 100.0, 80.0), &style);
        let starts: Vec<_> = strokes(&ctx)
            .into_iter()
            .filter_map(|c| match c {
                PaintCommand::StrokePath { path, .. } => path.commands().first().cloned(),
                _ => None,
            })
            .collect();
        assert_eq!(
            starts,
            vec![
                PathCommand::MoveTo(Point::new(10.0, 20.0)),
                PathCommand::MoveTo(Point::new(10.0, 20.0)),
            ]
        );
    }

    #[test]
    fn honours_dash_and_restores_state() {
        let mut ctx = PaintContext::new();
        draw_grid(&mut ctx, Rect::new(0.0, 0.0, 10.0, 10.0), &GridStyle::default());
        match strokes(&ctx)[0] {
            PaintCommand::StrokePath { style, .. } => {
                assert_eq!(style.dash.as_slice(), &[3.0, 3.0]);
            }
            _ => unreachable!(),
        }
        assert!(ctx.state().line_dash.is_empty());
        assert_eq!(ctx.save_depth(), 0);
    }

    #[test]
    fn empty_area_draws_nothing() {
        let mut ctx = PaintContext::new();
        draw_grid(&mut ctx, Rect::new(0.0, 0.0, 0.0, 10.0), &GridStyle::default());
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn disabled_directions_are_skipped() {
        let mut ctx = PaintContext::new();
        let style = GridStyle {
            vertical: false,
            ..GridStyle::default()
        };
        draw_grid(&mut ctx, Rect::new(0.0, 0.0, 10.0, 10.0), &style);
        assert_eq!(strokes(&ctx).len(), 6);
    }
}
