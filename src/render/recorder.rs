//! In-memory backend that records every request, for tests.

use std::collections::HashMap;

use crate::error::{DecorError, Result};

use super::{
    Arc, Bitmap, Canvas, Drawable, Font, Icon, Pen, Pixel, Rect, Segment, Shaper, TextRenderer,
};

/// Advance of every glyph in the fake font.
pub const CHAR_WIDTH: i32 = 6;
/// Height of the fake font.
pub const FONT_HEIGHT: i32 = 10;

const FIRST_PIXMAP: Drawable = 0x1000;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    CreatePixmap { id: Drawable, width: i32, height: i32 },
    FreePixmap(Drawable),
    FillRect { target: Drawable, pixel: Pixel, rect: Rect },
    DrawRect { target: Drawable, pixel: Pixel, rect: Rect },
    Segments { target: Drawable, pen: Pen, segments: Vec<Segment> },
    Arcs { target: Drawable, pixel: Pixel, arcs: Vec<Arc> },
    Copy { src: Drawable, dst: Drawable, rect: Rect, x: i32, y: i32 },
    Clear { window: Drawable, rect: Rect },
    Background { window: Drawable, pixel: Pixel },
    Icon { target: Drawable, name: String, rect: Rect },
    MoveResize { window: Drawable, rect: Rect },
    Gradient { target: Drawable, from: Pixel, to: Pixel, rect: Rect },
    Text { target: Drawable, x: i32, y: i32, max_width: i32, text: String },
    Mask { window: Drawable, mask: Bitmap },
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
    pub shape: bool,
    pub fail_pixmaps: bool,
    pub client_shapes: HashMap<Drawable, Vec<Rect>>,
    next_pixmap: Drawable,
    live: Vec<Drawable>,
}

impl Recorder {
    /// A recorder with the shape extension available.
    pub fn new() -> Self {
        Self {
            shape: true,
            ..Self::default()
        }
    }

    /// A recorder without the shape extension.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn live_pixmaps(&self) -> usize {
        self.live.len()
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Every segment drawn on `target`, in order.
    pub fn segments_on(&self, target: Drawable) -> Vec<(Pen, Segment)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Segments { target: t, pen, segments } if *t == target => {
                    Some(segments.iter().map(|s| (*pen, *s)).collect::<Vec<_>>())
                }
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn texts(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Text { .. })).collect()
    }
}

impl Canvas for Recorder {
    fn create_pixmap(&mut self, _parent: Drawable, width: i32, height: i32) -> Result<Drawable> {
        if self.fail_pixmaps || width <= 0 || height <= 0 {
            return Err(DecorError::Allocation { what: "pixmap" });
        }
        let id = FIRST_PIXMAP + self.next_pixmap;
        self.next_pixmap += 1;
        self.live.push(id);
        self.ops.push(Op::CreatePixmap { id, width, height });
        Ok(id)
    }

    fn free_pixmap(&mut self, pixmap: Drawable) {
        self.live.retain(|&id| id != pixmap);
        self.ops.push(Op::FreePixmap(pixmap));
    }

    fn fill_rect(&mut self, target: Drawable, pixel: Pixel, rect: Rect) -> Result<()> {
        self.ops.push(Op::FillRect { target, pixel, rect });
        Ok(())
    }

    fn draw_rect(&mut self, target: Drawable, pixel: Pixel, rect: Rect) -> Result<()> {
        self.ops.push(Op::DrawRect { target, pixel, rect });
        Ok(())
    }

    fn draw_segments(&mut self, target: Drawable, pen: Pen, segments: &[Segment]) -> Result<()> {
        self.ops.push(Op::Segments {
            target,
            pen,
            segments: segments.to_vec(),
        });
        Ok(())
    }

    fn draw_arcs(&mut self, target: Drawable, pixel: Pixel, arcs: &[Arc]) -> Result<()> {
        self.ops.push(Op::Arcs {
            target,
            pixel,
            arcs: arcs.to_vec(),
        });
        Ok(())
    }

    fn copy_area(
        &mut self,
        src: Drawable,
        dst: Drawable,
        src_rect: Rect,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<()> {
        self.ops.push(Op::Copy {
            src,
            dst,
            rect: src_rect,
            x: dst_x,
            y: dst_y,
        });
        Ok(())
    }

    fn clear_area(&mut self, window: Drawable, rect: Rect) -> Result<()> {
        self.ops.push(Op::Clear { window, rect });
        Ok(())
    }

    fn set_background(&mut self, window: Drawable, pixel: Pixel) -> Result<()> {
        self.ops.push(Op::Background { window, pixel });
        Ok(())
    }

    fn put_icon(&mut self, target: Drawable, icon: &Icon, _fg: Pixel, rect: Rect) -> Result<()> {
        self.ops.push(Op::Icon {
            target,
            name: icon.name.clone(),
            rect,
        });
        Ok(())
    }

    fn move_resize(&mut self, window: Drawable, rect: Rect) -> Result<()> {
        self.ops.push(Op::MoveResize { window, rect });
        Ok(())
    }

    fn fill_horizontal_gradient(
        &mut self,
        target: Drawable,
        from: Pixel,
        to: Pixel,
        rect: Rect,
    ) -> Result<()> {
        self.ops.push(Op::Gradient { target, from, to, rect });
        Ok(())
    }
}

impl TextRenderer for Recorder {
    fn text_width(&self, _font: Font, text: &str) -> i32 {
        text.chars().count() as i32 * CHAR_WIDTH
    }

    fn text_height(&self, _font: Font) -> i32 {
        FONT_HEIGHT
    }

    fn draw_text(
        &mut self,
        target: Drawable,
        _font: Font,
        _pixel: Pixel,
        x: i32,
        y: i32,
        max_width: i32,
        text: &str,
    ) -> Result<()> {
        self.ops.push(Op::Text {
            target,
            x,
            y,
            max_width,
            text: text.to_string(),
        });
        Ok(())
    }
}

impl Shaper for Recorder {
    fn shape_supported(&self) -> bool {
        self.shape
    }

    fn client_shape(&mut self, client: Drawable) -> Result<Option<Vec<Rect>>> {
        Ok(self.client_shapes.get(&client).cloned())
    }

    fn apply_bounding_mask(&mut self, window: Drawable, mask: &Bitmap) -> Result<()> {
        self.ops.push(Op::Mask {
            window,
            mask: mask.clone(),
        });
        Ok(())
    }
}
