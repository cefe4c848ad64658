//! Rendering collaborators
//!
//! The decoration engine never talks to the windowing system directly. It
//! issues requests through the traits below, which a backend implements:
//!
//! ```text
//!              paint_frame / draw_widget
//!                        |
//!                     Backend
//!                        |
//!       -----------------|-----------------
//!       |                |                |
//!     Canvas        TextRenderer        Shaper
//! ```
//!
//! [`Backend`] is a marker trait over the three. The x11rb implementation lives
//! in [`crate::x11`].

pub mod bitmap;
pub mod palette;

#[cfg(test)]
pub(crate) mod recorder;

use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::error::Result;

pub use bitmap::Bitmap;
pub use palette::{ColorRole, Palette};

/// A server-side drawable (window or pixmap).
pub type Drawable = u32;

/// A resolved pixel value, `0xRRGGBB` on a TrueColor visual.
pub type Pixel = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// A line segment with inclusive end points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Segment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn horizontal(x1: i32, x2: i32, y: i32) -> Self {
        Self::new(x1, y, x2, y)
    }

    pub const fn vertical(x: i32, y1: i32, y2: i32) -> Self {
        Self::new(x, y1, x, y2)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }
}

/// An elliptical arc inside its bounding box. Angles are in 1/64 degree,
/// counter-clockwise from three o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub angle1: i32,
    pub angle2: i32,
}

impl Arc {
    /// A quarter circle of the given diameter starting at `start_deg`.
    pub fn quarter(x: i32, y: i32, diameter: i32, start_deg: i32) -> Self {
        Self {
            x,
            y,
            width: diameter,
            height: diameter,
            angle1: start_deg * 64,
            angle2: 90 * 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cap {
    NotLast,
    #[default]
    Butt,
    Projecting,
}

/// Line attributes for a segment batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub pixel: Pixel,
    pub width: u16,
    pub cap: Cap,
}

impl Pen {
    pub fn solid(pixel: Pixel) -> Self {
        Self {
            pixel,
            width: 1,
            cap: Cap::Butt,
        }
    }

    pub fn with_width(self, width: u16) -> Self {
        Self { width, ..self }
    }

    pub fn with_cap(self, cap: Cap) -> Self {
        Self { cap, ..self }
    }
}

/// Fonts the engine asks the text collaborator for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Border,
    Menu,
    Tray,
    Popup,
}

/// A decoded icon image, ARGB32 pixels in row-major order.
///
/// An icon without pixels is a placeholder: it takes the full box it is
/// fitted into and draws nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Icon {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Icon {
    pub fn new(name: impl Into<String>, width: u32, height: u32, pixels: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pixels,
        }
    }

    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Immediate-mode drawing primitives.
pub trait Canvas {
    /// Allocates an off-screen surface compatible with `parent`.
    fn create_pixmap(&mut self, parent: Drawable, width: i32, height: i32) -> Result<Drawable>;

    fn free_pixmap(&mut self, pixmap: Drawable);

    fn fill_rect(&mut self, target: Drawable, pixel: Pixel, rect: Rect) -> Result<()>;

    /// Outlines `rect`; covers `width + 1` by `height + 1` pixels.
    fn draw_rect(&mut self, target: Drawable, pixel: Pixel, rect: Rect) -> Result<()>;

    fn draw_segments(&mut self, target: Drawable, pen: Pen, segments: &[Segment]) -> Result<()>;

    fn draw_arcs(&mut self, target: Drawable, pixel: Pixel, arcs: &[Arc]) -> Result<()>;

    fn copy_area(
        &mut self,
        src: Drawable,
        dst: Drawable,
        src_rect: Rect,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<()>;

    /// Clears a window area to its background.
    fn clear_area(&mut self, window: Drawable, rect: Rect) -> Result<()>;

    fn set_background(&mut self, window: Drawable, pixel: Pixel) -> Result<()>;

    /// Draws `icon` scaled into `rect`. Monochrome icons use `fg`.
    fn put_icon(&mut self, target: Drawable, icon: &Icon, fg: Pixel, rect: Rect) -> Result<()>;

    fn move_resize(&mut self, window: Drawable, rect: Rect) -> Result<()>;

    /// Fills `rect` with a left-to-right blend from `from` to `to`.
    fn fill_horizontal_gradient(
        &mut self,
        target: Drawable,
        from: Pixel,
        to: Pixel,
        rect: Rect,
    ) -> Result<()> {
        fill_gradient_columns(self, target, from, to, rect)
    }
}

/// Column-by-column gradient made of solid fills.
pub fn fill_gradient_columns<C: Canvas + ?Sized>(
    canvas: &mut C,
    target: Drawable,
    from: Pixel,
    to: Pixel,
    rect: Rect,
) -> Result<()> {
    if rect.is_empty() {
        return Ok(());
    }
    if from == to {
        return canvas.fill_rect(target, from, rect);
    }

    // Runs of identical columns go out as one rectangle.
    let mut run_start = 0;
    let mut run_pixel = blend(from, to, 0, rect.width);
    for column in 1..=rect.width {
        let pixel = if column < rect.width {
            blend(from, to, column, rect.width)
        } else {
            !run_pixel
        };
        if pixel != run_pixel {
            let strip = Rect::new(rect.x + run_start, rect.y, column - run_start, rect.height);
            canvas.fill_rect(target, run_pixel, strip)?;
            run_start = column;
            run_pixel = pixel;
        }
    }
    Ok(())
}

/// Blend channel-wise; `step` of `steps` columns.
pub fn blend(from: Pixel, to: Pixel, step: i32, steps: i32) -> Pixel {
    if steps <= 1 {
        return from;
    }
    let channel = |shift: u32| -> u32 {
        let a = ((from >> shift) & 0xff) as i32;
        let b = ((to >> shift) & 0xff) as i32;
        let c = a + (b - a) * step / (steps - 1);
        (c.clamp(0, 255) as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

/// Text metrics and rendering.
pub trait TextRenderer {
    fn text_width(&self, font: Font, text: &str) -> i32;

    fn text_height(&self, font: Font) -> i32;

    /// Renders `text` with its top-left at (`x`, `y`), clipped to `max_width`.
    fn draw_text(
        &mut self,
        target: Drawable,
        font: Font,
        pixel: Pixel,
        x: i32,
        y: i32,
        max_width: i32,
        text: &str,
    ) -> Result<()>;
}

/// Non-rectangular window clipping.
pub trait Shaper {
    fn shape_supported(&self) -> bool;

    /// Bounding rectangles of a shaped client, in client coordinates.
    fn client_shape(&mut self, client: Drawable) -> Result<Option<Vec<Rect>>>;

    /// Replaces the bounding shape of `window` with `mask`.
    fn apply_bounding_mask(&mut self, window: Drawable, mask: &Bitmap) -> Result<()>;
}

/// Named icon lookup for themed control glyphs.
pub trait IconLoader {
    fn load_icon(&mut self, name: &str) -> Option<Icon>;
}

/// Loader used when no icon theme is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIcons;

impl IconLoader for NoIcons {
    fn load_icon(&mut self, _name: &str) -> Option<Icon> {
        None
    }
}

/// Everything the frame painter needs.
pub trait Backend: Canvas + TextRenderer + Shaper {}

impl<T: Canvas + TextRenderer + Shaper> Backend for T {}

/// An off-screen surface released when dropped.
///
/// Derefs to the canvas it was allocated from, so drawing continues through
/// the guard while it is alive.
pub struct ScratchPixmap<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    id: Drawable,
}

impl<'a, C: Canvas + ?Sized> ScratchPixmap<'a, C> {
    pub fn new(canvas: &'a mut C, parent: Drawable, width: i32, height: i32) -> Result<Self> {
        let id = canvas.create_pixmap(parent, width, height)?;
        Ok(Self { canvas, id })
    }

    pub fn id(&self) -> Drawable {
        self.id
    }
}

impl<C: Canvas + ?Sized> Deref for ScratchPixmap<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for ScratchPixmap<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for ScratchPixmap<'_, C> {
    fn drop(&mut self) {
        self.canvas.free_pixmap(self.id);
    }
}

/// Logs and swallows an allocation failure so the caller can skip one step.
pub(crate) fn skip_on_allocation<T>(result: Result<T>, step: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_allocation() => {
            warn!("Skipping {}: {}", step, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
