//! Surface geometry: logical size, device pixel ratio and margins.

use qurve_paint::{Color, DrawContext, Point, Rect};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }
}

/// Geometry of one chart surface.
///
/// Everything is in logical units except [`Layout::physical_size`]; drawing
/// happens under a uniform DPR scale so producers never see device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
    pub margin: Margin,
    pub background: Color,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            dpr: 1.0,
            margin: Margin::default(),
            background: Color::WHITE,
        }
    }
}

impl Layout {
    pub fn inner_width(&self) -> f32 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f32 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Top-left of the plot area.
    pub fn origin(&self) -> Point {
        Point::new(self.margin.left, self.margin.top)
    }

    /// Plot area in surface coordinates.
    pub fn inner_rect(&self) -> Rect {
        Rect::new(
            self.margin.left,
            self.margin.top,
            self.inner_width(),
            self.inner_height(),
        )
    }

    /// Backing buffer size in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let px = |v: f32| (v * self.dpr).round().max(0.0) as u32;
        (px(self.width), px(self.height))
    }

    /// Reset the surface for a new frame and enter the DPR-scaled scope.
    ///
    /// Returns the save depth to hand back to [`Layout::end_frame`].
    pub fn begin_frame(&self, ctx: &mut dyn DrawContext) -> usize {
        let (pw, ph) = self.physical_size();
        let full = Rect::new(0.0, 0.0, pw as f32, ph as f32);
        let depth = ctx.save_depth();

        ctx.set_backing_size(pw, ph);
        ctx.save();
        ctx.reset_transform();
        ctx.clear_rect(full);
        // Always opaque so compositing starts from a known baseline.
        ctx.set_fill_color(self.background.with_alpha(1.0));
        ctx.fill_rect(full);
        ctx.restore();

        self.enter_scaled_scope(ctx);
        depth
    }

    /// Open the logical-unit scope renderers draw in.
    pub fn enter_scaled_scope(&self, ctx: &mut dyn DrawContext) {
        ctx.save();
        ctx.scale(self.dpr, self.dpr);
    }

    pub fn end_frame(&self, ctx: &mut dyn DrawContext, depth: usize) {
        ctx.restore_to_depth(depth);
    }
}
