//! Paint context - the main drawing API

use smallvec::SmallVec;

use crate::color::Color;
use crate::path::{Path, Point};
use crate::primitives::{Circle, Rect};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Horizontal text anchoring relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text anchoring relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Stroke style captured at draw time
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub dash: SmallVec<[f32; 4]>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dash: SmallVec::new(),
        }
    }
}

/// Text style captured at draw time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// 2D affine transform
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`, same layout as canvas
/// `setTransform(a, b, c, d, e, f)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            e: x,
            f: y,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// `self * other`: `other` is applied to points first.
    pub fn multiply(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}

/// Mutable drawing state, saved and restored as a unit.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub transform: Transform2D,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub line_width: f32,
    pub line_dash: SmallVec<[f32; 4]>,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub font_size: f32,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    clip_depth: usize,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform2D::identity(),
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
            line_dash: SmallVec::new(),
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            font_size: 10.0,
            text_align: TextAlign::Left,
            text_baseline: TextBaseline::Alphabetic,
            clip_depth: 0,
        }
    }
}

impl DrawState {
    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color,
            width: self.line_width,
            line_cap: self.line_cap,
            line_join: self.line_join,
            dash: self.line_dash.clone(),
        }
    }

    fn text_style(&self) -> TextStyle {
        TextStyle {
            size: self.font_size,
            color: self.fill_color,
            align: self.text_align,
            baseline: self.text_baseline,
        }
    }
}

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    SetBackingSize { width: u32, height: u32 },
    Save,
    Restore,
    SetTransform(Transform2D),
    ClearRect(Rect),
    FillRect { rect: Rect, color: Color },
    StrokePath { path: Path, style: StrokeStyle },
    FillPath { path: Path, color: Color },
    FillCircle { circle: Circle, color: Color },
    StrokeCircle { circle: Circle, style: StrokeStyle },
    DrawText { text: String, position: Point, style: TextStyle },
    PushClip { rect: Rect },
    PopClip,
}

/// Canvas-like drawing surface.
///
/// All coordinates are in the units of the current transform. Style setters
/// only affect subsequent draw calls and are scoped by `save`/`restore`.
pub trait DrawContext {
    fn save(&mut self);
    fn restore(&mut self);
    /// Number of currently open `save` scopes.
    fn save_depth(&self) -> usize;

    /// Restore until `save_depth() == depth`.
    fn restore_to_depth(&mut self, depth: usize) {
        while self.save_depth() > depth {
            self.restore();
        }
    }

    /// Resize the physical backing buffer (device pixels).
    fn set_backing_size(&mut self, width: u32, height: u32);
    fn backing_size(&self) -> (u32, u32);

    fn transform(&self) -> Transform2D;
    fn set_transform(&mut self, transform: Transform2D);

    fn reset_transform(&mut self) {
        self.set_transform(Transform2D::identity());
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        let t = self.transform().multiply(&Transform2D::scale(sx, sy));
        self.set_transform(t);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let t = self.transform().multiply(&Transform2D::translate(x, y));
        self.set_transform(t);
    }

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn set_line_dash(&mut self, segments: &[f32]);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_font_size(&mut self, size: f32);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect);
    fn stroke_path(&mut self, path: &Path);
    fn fill_path(&mut self, path: &Path);
    fn fill_circle(&mut self, center: Point, radius: f32);
    fn stroke_circle(&mut self, center: Point, radius: f32);
    fn fill_text(&mut self, text: &str, origin: Point);

    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);
}

/// Recording draw context.
///
/// Keeps the canvas drawing state and records every operation so it can be
/// replayed by a backend or inspected.
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    state: DrawState,
    state_stack: Vec<DrawState>,
    clip_stack: Vec<Rect>,
    backing: (u32, u32),
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            state: DrawState::default(),
            state_stack: Vec::new(),
            clip_stack: Vec::new(),
            backing: (0, 0),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Current drawing state.
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Currently active clip rectangles, outermost first.
    pub fn clips(&self) -> &[Rect] {
        &self.clip_stack
    }

    fn pop_clips_to(&mut self, depth: usize) {
        while self.clip_stack.len() > depth {
            self.clip_stack.pop();
            self.commands.push(PaintCommand::PopClip);
        }
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for PaintContext {
    fn save(&mut self) {
        let mut saved = self.state.clone();
        saved.clip_depth = self.clip_stack.len();
        self.state_stack.push(saved);
        self.commands.push(PaintCommand::Save);
    }

    fn restore(&mut self) {
        let Some(saved) = self.state_stack.pop() else {
            tracing::warn!("restore() without matching save(), ignoring");
            return;
        };
        self.pop_clips_to(saved.clip_depth);
        self.state = saved;
        self.commands.push(PaintCommand::Restore);
    }

    fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        if self.backing != (width, height) {
            self.backing = (width, height);
            self.commands
                .push(PaintCommand::SetBackingSize { width, height });
        }
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn transform(&self) -> Transform2D {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Transform2D) {
        self.state.transform = transform;
        self.commands.push(PaintCommand::SetTransform(transform));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        // Canvas ignores non-positive or non-finite widths.
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        if segments.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return;
        }
        self.state.line_dash = segments.iter().copied().collect();
        if self.state.line_dash.len() % 2 == 1 {
            let copy = self.state.line_dash.clone();
            self.state.line_dash.extend(copy);
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    fn set_font_size(&mut self, size: f32) {
        if size.is_finite() && size > 0.0 {
            self.state.font_size = size;
        }
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(PaintCommand::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(PaintCommand::FillRect {
            rect,
            color: self.state.fill_color,
        });
    }

    fn stroke_path(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::StrokePath {
            path: path.clone(),
            style: self.state.stroke_style(),
        });
    }

    fn fill_path(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::FillPath {
            path: path.clone(),
            color: self.state.fill_color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32) {
        self.commands.push(PaintCommand::FillCircle {
            circle: Circle::new(center, radius),
            color: self.state.fill_color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32) {
        self.commands.push(PaintCommand::StrokeCircle {
            circle: Circle::new(center, radius),
            style: self.state.stroke_style(),
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        self.commands.push(PaintCommand::DrawText {
            text: text.to_string(),
            position: origin,
            style: self.state.text_style(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
        self.commands.push(PaintCommand::PushClip { rect });
    }

    fn pop_clip(&mut self) {
        // Clips opened before the innermost save belong to the outer scope.
        let floor = self.state_stack.last().map_or(0, |s| s.clip_depth);
        if self.clip_stack.len() > floor {
            self.clip_stack.pop();
            self.commands.push(PaintCommand::PopClip);
        } else {
            tracing::warn!("pop_clip() without matching push_clip() in this scope");
        }
    }
}
