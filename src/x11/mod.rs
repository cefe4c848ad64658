//! X11 Backend
//!
//! Implements [`Canvas`], [`TextRenderer`] and [`Shaper`] on an x11rb
//! connection. Drawing uses a single graphics context whose attributes are
//! changed per request; text uses a core font; frame masks go through the
//! SHAPE extension when the server has it.

use tracing::{debug, info, warn};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors::{ConnectionError, ReplyError, ReplyOrIdError};
use x11rb::protocol::shape::{self, ConnectionExt as _};
use x11rb::protocol::xproto::{
    self, AtomEnum, CapStyle, ChangeGCAux, ChangeWindowAttributesAux, Char2b, ClipOrdering,
    ConfigureWindowAux, ConnectionExt as _, CreateGCAux, Gcontext, ImageFormat, ImageOrder,
    LineStyle, Rectangle, Window,
};
use x11rb::rust_connection::RustConnection;

use crate::error::{DecorError, Result};
use crate::icons::{parse_net_wm_icon, scale_nearest};
use crate::render::{
    Arc, Bitmap, Canvas, Cap, Drawable, Font, Icon, Pen, Pixel, Rect, Segment, Shaper,
    TextRenderer,
};

/// Core font used for every text role.
pub const DEFAULT_FONT: &str = "fixed";

/// Upper bound on `_NET_WM_ICON` data fetched per window, in 32-bit words.
const MAX_ICON_WORDS: u32 = 1 << 20;

impl From<ConnectionError> for DecorError {
    fn from(err: ConnectionError) -> Self {
        DecorError::backend(err)
    }
}

impl From<ReplyError> for DecorError {
    fn from(err: ReplyError) -> Self {
        DecorError::backend(err)
    }
}

impl From<ReplyOrIdError> for DecorError {
    fn from(err: ReplyOrIdError) -> Self {
        DecorError::backend(err)
    }
}

/// Image layout parameters announced by the server.
#[derive(Debug, Clone, Copy)]
struct ImageFormats {
    image_lsb: bool,
    bitmap_lsb: bool,
    bitmap_pad: u32,
    pixmap_bpp: u8,
}

struct CoreFont {
    id: xproto::Font,
    ascent: i32,
    descent: i32,
}

impl CoreFont {
    fn open(conn: &RustConnection, name: &str) -> Result<Self> {
        let id = conn.generate_id()?;
        conn.open_font(id, name.as_bytes())?.check()?;
        let reply = conn.query_font(id)?.reply()?;
        debug!(
            "Opened core font {:?}: ascent {}, descent {}",
            name, reply.font_ascent, reply.font_descent
        );
        Ok(Self {
            id,
            ascent: reply.font_ascent as i32,
            descent: reply.font_descent as i32,
        })
    }
}

/// A pixmap freed when dropped.
struct PixmapGuard<'c> {
    conn: &'c RustConnection,
    id: xproto::Pixmap,
}

impl Drop for PixmapGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.conn.free_pixmap(self.id) {
            warn!("Failed to free pixmap {:#x}: {}", self.id, e);
        }
    }
}

/// A graphics context freed when dropped.
struct GcGuard<'c> {
    conn: &'c RustConnection,
    id: Gcontext,
}

impl Drop for GcGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.conn.free_gc(self.id) {
            warn!("Failed to free graphics context {:#x}: {}", self.id, e);
        }
    }
}

/// Rendering backend over an x11rb connection.
pub struct X11Backend<'c> {
    conn: &'c RustConnection,
    gc: Gcontext,
    depth: u8,
    font: CoreFont,
    formats: ImageFormats,
    shape: bool,
}

impl<'c> X11Backend<'c> {
    /// Sets up drawing state for `screen_num` and probes for SHAPE.
    pub fn new(conn: &'c RustConnection, screen_num: usize) -> Result<Self> {
        let setup = conn.setup();
        let screen = setup
            .roots
            .get(screen_num)
            .ok_or_else(|| DecorError::Backend(format!("no screen {}", screen_num).into()))?;
        let depth = screen.root_depth;
        let root = screen.root;

        let pixmap_bpp = setup
            .pixmap_formats
            .iter()
            .find(|f| f.depth == depth)
            .map(|f| f.bits_per_pixel)
            .unwrap_or(32);
        let formats = ImageFormats {
            image_lsb: setup.image_byte_order == ImageOrder::LSB_FIRST,
            bitmap_lsb: setup.bitmap_format_bit_order == ImageOrder::LSB_FIRST,
            bitmap_pad: setup.bitmap_format_scanline_pad as u32,
            pixmap_bpp,
        };

        let gc = conn.generate_id()?;
        conn.create_gc(gc, root, &CreateGCAux::new().graphics_exposures(0u32))?;
        let font = CoreFont::open(conn, DEFAULT_FONT)?;
        let shape = detect_shape(conn)?;

        info!(
            "X11 backend ready: depth {}, {} bpp, shape {}",
            depth, pixmap_bpp, shape
        );

        Ok(Self {
            conn,
            gc,
            depth,
            font,
            formats,
            shape,
        })
    }

    fn set_pen(&self, pen: Pen) -> Result<()> {
        let cap = match pen.cap {
            Cap::NotLast => CapStyle::NOT_LAST,
            Cap::Butt => CapStyle::BUTT,
            Cap::Projecting => CapStyle::PROJECTING,
        };
        self.conn.change_gc(
            self.gc,
            &ChangeGCAux::new()
                .foreground(pen.pixel)
                .line_width(pen.width as u32)
                .line_style(LineStyle::SOLID)
                .cap_style(cap),
        )?;
        Ok(())
    }

    fn set_foreground(&self, pixel: Pixel) -> Result<()> {
        self.conn
            .change_gc(self.gc, &ChangeGCAux::new().foreground(pixel))?;
        Ok(())
    }

    fn reset_clip(&self) -> Result<()> {
        self.conn
            .change_gc(self.gc, &ChangeGCAux::new().clip_mask(x11rb::NONE))?;
        Ok(())
    }

    fn alloc_pixmap(
        &self,
        depth: u8,
        parent: Drawable,
        width: i32,
        height: i32,
        what: &'static str,
    ) -> Result<xproto::Pixmap> {
        if width <= 0 || height <= 0 {
            return Err(DecorError::Allocation { what });
        }
        let id = self.conn.generate_id()?;
        match self
            .conn
            .create_pixmap(depth, id, parent, extent(width), extent(height))?
            .check()
        {
            Ok(()) => Ok(id),
            Err(ReplyError::X11Error(err)) => {
                debug!("create_pixmap {}x{} failed: {:?}", width, height, err);
                Err(DecorError::Allocation { what })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Uploads image rows in bands that fit the maximum request size.
    #[allow(clippy::too_many_arguments)]
    fn put_rows(
        &self,
        format: ImageFormat,
        target: Drawable,
        gc: Gcontext,
        rect: Rect,
        depth: u8,
        stride: usize,
        data: &[u8],
    ) -> Result<()> {
        if stride == 0 || rect.is_empty() {
            return Ok(());
        }
        // Leave room for the request header.
        let budget = self.conn.maximum_request_bytes().saturating_sub(64);
        let band = (budget / stride).max(1);
        for (index, rows) in data.chunks(band * stride).enumerate() {
            let y = rect.y + (index * band) as i32;
            let height = (rows.len() / stride) as i32;
            self.conn.put_image(
                format,
                target,
                gc,
                extent(rect.width),
                extent(height),
                coord(rect.x),
                coord(y),
                0,
                depth,
                rows,
            )?;
        }
        Ok(())
    }

    /// Uploads a one-bit mask into a fresh depth-1 pixmap.
    fn upload_bitmap(&self, parent: Drawable, mask: &Bitmap) -> Result<PixmapGuard<'c>> {
        let pixmap = PixmapGuard {
            conn: self.conn,
            id: self.alloc_pixmap(1, parent, mask.width(), mask.height(), "mask pixmap")?,
        };
        let gc = GcGuard {
            conn: self.conn,
            id: self.conn.generate_id()?,
        };
        self.conn
            .create_gc(gc.id, pixmap.id, &CreateGCAux::new().graphics_exposures(0u32))?;

        let data = mask.pack(self.formats.bitmap_pad, self.formats.bitmap_lsb);
        let stride = data.len() / mask.height() as usize;
        let area = Rect::new(0, 0, mask.width(), mask.height());
        self.put_rows(ImageFormat::XY_PIXMAP, pixmap.id, gc.id, area, 1, stride, &data)?;
        Ok(pixmap)
    }

    /// Reads `_NET_WM_ICON` from `window` and keeps its largest image.
    pub fn net_wm_icon(&self, window: Window) -> Result<Option<Icon>> {
        let atom = self.conn.intern_atom(false, b"_NET_WM_ICON")?.reply()?.atom;
        let reply = self
            .conn
            .get_property(false, window, atom, AtomEnum::CARDINAL, 0, MAX_ICON_WORDS)?
            .reply()?;
        let Some(values) = reply.value32() else {
            return Ok(None);
        };
        let values: Vec<u32> = values.collect();
        let icon = parse_net_wm_icon(&format!("{:#x}", window), &values);
        if let Some(icon) = &icon {
            debug!("Loaded icon for window {:#x}: {}x{}", window, icon.width, icon.height);
        }
        Ok(icon)
    }
}

impl Drop for X11Backend<'_> {
    fn drop(&mut self) {
        let _ = self.conn.free_gc(self.gc);
        let _ = self.conn.close_font(self.font.id);
    }
}

fn detect_shape(conn: &RustConnection) -> Result<bool> {
    let present = conn
        .query_extension(b"SHAPE")?
        .reply()
        .map(|reply| reply.present)
        .unwrap_or(false);
    if !present {
        info!("SHAPE extension not available, frames stay rectangular");
        return Ok(false);
    }
    match conn.shape_query_version()?.reply() {
        Ok(version) => debug!(
            "Shape extension version: {}.{}",
            version.major_version, version.minor_version
        ),
        Err(e) => warn!("Shape version query failed: {}", e),
    }
    Ok(true)
}

/// Saturating conversion to a protocol coordinate.
pub fn coord(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Saturating conversion to a protocol width or height.
pub fn extent(value: i32) -> u16 {
    value.clamp(0, u16::MAX as i32) as u16
}

fn x_rect(rect: Rect) -> Rectangle {
    Rectangle {
        x: coord(rect.x),
        y: coord(rect.y),
        width: extent(rect.width),
        height: extent(rect.height),
    }
}

/// Text as core-font bytes. Characters outside Latin-1 become `?`.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Encodes `PolyText8` items: a length byte, a zero delta and up to 254
/// characters each.
fn text_items(bytes: &[u8]) -> Vec<u8> {
    let mut items = Vec::with_capacity(bytes.len() + bytes.len() / 254 * 2 + 2);
    for chunk in bytes.chunks(254) {
        items.push(chunk.len() as u8);
        items.push(0);
        items.extend_from_slice(chunk);
    }
    items
}

/// ARGB pixels as 32-bit ZPixmap data in server byte order.
fn zpixmap_bytes(pixels: &[u32], lsb_first: bool) -> Vec<u8> {
    let mut data = Vec::with_capacity(pixels.len() * 4);
    for &argb in pixels {
        let rgb = argb & 0x00ff_ffff;
        if lsb_first {
            data.extend_from_slice(&rgb.to_le_bytes());
        } else {
            data.extend_from_slice(&rgb.to_be_bytes());
        }
    }
    data
}

/// Opaque-enough pixels of an ARGB image, or `None` when all of them are.
fn alpha_mask(pixels: &[u32], width: i32, height: i32) -> Option<Bitmap> {
    if pixels.iter().all(|p| p >> 24 > 0x7f) {
        return None;
    }
    let mut mask = Bitmap::new(width, height);
    for (index, pixel) in pixels.iter().enumerate() {
        if pixel >> 24 > 0x7f {
            let x = index as i32 % width;
            let y = index as i32 / width;
            mask.paint_rect(Rect::new(x, y, 1, 1), true);
        }
    }
    Some(mask)
}

impl Canvas for X11Backend<'_> {
    fn create_pixmap(&mut self, parent: Drawable, width: i32, height: i32) -> Result<Drawable> {
        self.alloc_pixmap(self.depth, parent, width, height, "scratch pixmap")
    }

    fn free_pixmap(&mut self, pixmap: Drawable) {
        if let Err(e) = self.conn.free_pixmap(pixmap) {
            warn!("Failed to free pixmap {:#x}: {}", pixmap, e);
        }
    }

    fn fill_rect(&mut self, target: Drawable, pixel: Pixel, rect: Rect) -> Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        self.set_foreground(pixel)?;
        self.conn
            .poly_fill_rectangle(target, self.gc, &[x_rect(rect)])?;
        Ok(())
    }

    fn draw_rect(&mut self, target: Drawable, pixel: Pixel, rect: Rect) -> Result<()> {
        if rect.width < 0 || rect.height < 0 {
            return Ok(());
        }
        self.set_pen(Pen::solid(pixel))?;
        self.conn.poly_rectangle(target, self.gc, &[x_rect(rect)])?;
        Ok(())
    }

    fn draw_segments(&mut self, target: Drawable, pen: Pen, segments: &[Segment]) -> Result<()> {
        if segments.is_empty() {
            return Ok(());
        }
        self.set_pen(pen)?;
        let segments: Vec<xproto::Segment> = segments
            .iter()
            .map(|s| xproto::Segment {
                x1: coord(s.x1),
                y1: coord(s.y1),
                x2: coord(s.x2),
                y2: coord(s.y2),
            })
            .collect();
        self.conn.poly_segment(target, self.gc, &segments)?;
        Ok(())
    }

    fn draw_arcs(&mut self, target: Drawable, pixel: Pixel, arcs: &[Arc]) -> Result<()> {
        if arcs.is_empty() {
            return Ok(());
        }
        self.set_pen(Pen::solid(pixel))?;
        let arcs: Vec<xproto::Arc> = arcs
            .iter()
            .map(|a| xproto::Arc {
                x: coord(a.x),
                y: coord(a.y),
                width: extent(a.width),
                height: extent(a.height),
                angle1: coord(a.angle1),
                angle2: coord(a.angle2),
            })
            .collect();
        self.conn.poly_arc(target, self.gc, &arcs)?;
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
        if src_rect.is_empty() {
            return Ok(());
        }
        self.conn.copy_area(
            src,
            dst,
            self.gc,
            coord(src_rect.x),
            coord(src_rect.y),
            coord(dst_x),
            coord(dst_y),
            extent(src_rect.width),
            extent(src_rect.height),
        )?;
        Ok(())
    }

    fn clear_area(&mut self, window: Drawable, rect: Rect) -> Result<()> {
        // A zero extent would clear to the window edge.
        if rect.is_empty() {
            return Ok(());
        }
        self.conn.clear_area(
            false,
            window,
            coord(rect.x),
            coord(rect.y),
            extent(rect.width),
            extent(rect.height),
        )?;
        Ok(())
    }

    fn set_background(&mut self, window: Drawable, pixel: Pixel) -> Result<()> {
        self.conn.change_window_attributes(
            window,
            &ChangeWindowAttributesAux::new().background_pixel(pixel),
        )?;
        Ok(())
    }

    fn put_icon(&mut self, target: Drawable, icon: &Icon, _fg: Pixel, rect: Rect) -> Result<()> {
        if icon.is_placeholder() || rect.is_empty() {
            return Ok(());
        }
        if self.formats.pixmap_bpp != 32 {
            debug!(
                "Skipping icon {:?}: {} bpp visuals are not supported",
                icon.name, self.formats.pixmap_bpp
            );
            return Ok(());
        }

        let pixels = scale_nearest(icon, rect.width as u32, rect.height as u32);
        let data = zpixmap_bytes(&pixels, self.formats.image_lsb);

        let clip = match alpha_mask(&pixels, rect.width, rect.height) {
            Some(mask) => Some(self.upload_bitmap(target, &mask)?),
            None => None,
        };
        if let Some(clip) = &clip {
            self.conn.change_gc(
                self.gc,
                &ChangeGCAux::new()
                    .clip_mask(clip.id)
                    .clip_x_origin(rect.x)
                    .clip_y_origin(rect.y),
            )?;
        }

        let drawn = self.put_rows(
            ImageFormat::Z_PIXMAP,
            target,
            self.gc,
            rect,
            self.depth,
            rect.width as usize * 4,
            &data,
        );
        if clip.is_some() {
            self.reset_clip()?;
        }
        drawn
    }

    fn move_resize(&mut self, window: Drawable, rect: Rect) -> Result<()> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new()
                .x(rect.x)
                .y(rect.y)
                .width(rect.width.max(1) as u32)
                .height(rect.height.max(1) as u32),
        )?;
        Ok(())
    }
}

impl TextRenderer for X11Backend<'_> {
    fn text_width(&self, _font: Font, text: &str) -> i32 {
        if text.is_empty() {
            return 0;
        }
        let chars: Vec<Char2b> = latin1(text)
            .into_iter()
            .map(|byte2| Char2b { byte1: 0, byte2 })
            .collect();
        match self
            .conn
            .query_text_extents(self.font.id, &chars)
            .map_err(ReplyError::from)
            .and_then(|cookie| cookie.reply())
        {
            Ok(reply) => reply.overall_width,
            Err(e) => {
                warn!("Text extents query failed: {}", e);
                0
            }
        }
    }

    fn text_height(&self, _font: Font) -> i32 {
        self.font.ascent + self.font.descent
    }

    fn draw_text(
        &mut self,
        target: Drawable,
        _font: Font,
        pixel: Pixel,
        x: i32,
        y: i32,
        max_width: i32,
        text: &str,
    ) -> Result<()> {
        if max_width <= 0 || text.is_empty() {
            return Ok(());
        }
        let clip = Rect::new(x, y, max_width, self.text_height(Font::Border));
        self.conn.set_clip_rectangles(
            ClipOrdering::UNSORTED,
            self.gc,
            0,
            0,
            &[x_rect(clip)],
        )?;
        self.conn.change_gc(
            self.gc,
            &ChangeGCAux::new().foreground(pixel).font(self.font.id),
        )?;
        let drawn = self
            .conn
            .poly_text8(
                target,
                self.gc,
                coord(x),
                coord(y + self.font.ascent),
                &text_items(&latin1(text)),
            )
            .map(drop);
        self.reset_clip()?;
        drawn.map_err(DecorError::from)
    }
}

impl Shaper for X11Backend<'_> {
    fn shape_supported(&self) -> bool {
        self.shape
    }

    fn client_shape(&mut self, client: Drawable) -> Result<Option<Vec<Rect>>> {
        if !self.shape {
            return Ok(None);
        }
        let reply = self
            .conn
            .shape_get_rectangles(client, shape::SK::BOUNDING)?
            .reply()?;
        let rects = reply
            .rectangles
            .iter()
            .map(|r| Rect::new(r.x as i32, r.y as i32, r.width as i32, r.height as i32))
            .collect();
        Ok(Some(rects))
    }

    fn apply_bounding_mask(&mut self, window: Drawable, mask: &Bitmap) -> Result<()> {
        if !self.shape || mask.width() <= 0 || mask.height() <= 0 {
            return Ok(());
        }
        let pixmap = self.upload_bitmap(window, mask)?;
        self.conn
            .shape_mask(shape::SO::SET, shape::SK::BOUNDING, window, 0, 0, pixmap.id)?;
        Ok(())
    }
}
