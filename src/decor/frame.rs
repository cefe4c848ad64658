//! Frame painting
//!
//! Paints the title strip, control buttons and outline of one frame, and
//! moves the frame and client into place after a geometry change.

use tracing::{debug, trace};

use crate::config::FrameConfig;
use crate::error::Result;
use crate::render::{
    skip_on_allocation, Backend, Canvas, ColorRole, Drawable, Font, Icon, Palette, Pen, Pixel,
    Rect, ScratchPixmap, Shaper, TextRenderer,
};

use super::flags::{BorderFlags, StatusFlags, WindowState};
use super::geometry::{compute_insets, title_strip_origin, Insets};
use super::glyph::{fallback_glyph, ControlIcon};
use super::layout::{title_text_width, ButtonLayout};
use super::segments::{handle_bevel, resize_ticks, rounded_outline, separator, Stroke, Tone};
use super::shape::rebuild_clip_mask;
use super::theme::Theme;
use super::widget::{draw_widget, WidgetDescriptor};
use super::ControlButton;

/// The parts of a managed window the painter reads.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedWindow {
    pub client: Drawable,
    pub frame: Drawable,
    /// Client position in root coordinates.
    pub x: i32,
    pub y: i32,
    /// Client size.
    pub width: i32,
    pub height: i32,
    pub name: Option<String>,
    pub icon: Option<Icon>,
    pub state: WindowState,
}

impl DecoratedWindow {
    pub fn new(client: Drawable, frame: Drawable, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            client,
            frame,
            x,
            y,
            width,
            height,
            name: None,
            icon: None,
            state: WindowState::new(BorderFlags::default(), StatusFlags::MAPPED),
        }
    }

    pub fn insets(&self, config: &FrameConfig) -> Insets {
        compute_insets(&self.state, config)
    }

    /// Outer frame rectangle in root coordinates.
    pub fn frame_rect(&self, config: &FrameConfig) -> Rect {
        let insets = self.insets(config);
        Rect::new(
            self.x.saturating_sub(insets.west),
            self.y.saturating_sub(insets.north),
            insets.frame_width(self.width),
            insets.frame_height(self.height, self.state.status),
        )
    }
}

/// Whether a frame in this state gets painted at all.
pub fn should_paint(state: &WindowState) -> bool {
    let status = state.status;
    status.intersects(StatusFlags::MAPPED | StatusFlags::SHADED)
        && !status.intersects(StatusFlags::HIDDEN | StatusFlags::FULLSCREEN)
        && state.border.intersects(BorderFlags::TITLE | BorderFlags::OUTLINE)
}

/// Colours for one paint, picked by focus.
struct FrameColors {
    text: Pixel,
    title1: Pixel,
    title2: Pixel,
    outline: Pixel,
    up: Pixel,
    down: Pixel,
}

impl FrameColors {
    fn select(status: StatusFlags, palette: &Palette) -> Self {
        use ColorRole::*;

        let roles = if status.is_highlighted() {
            [
                TitleActiveFg,
                TitleActiveBg1,
                TitleActiveBg2,
                BorderActiveLine,
                BorderActiveUp,
                BorderActiveDown,
            ]
        } else {
            [TitleFg, TitleBg1, TitleBg2, BorderLine, BorderUp, BorderDown]
        };
        let [text, title1, title2, outline, up, down] = roles.map(|role| palette.get(role));
        Self {
            text,
            title1,
            title2,
            outline,
            up,
            down,
        }
    }

    fn tone(&self, tone: Tone) -> Pixel {
        match tone {
            Tone::Light => self.up,
            Tone::Dark => self.down,
        }
    }
}

/// Everything the title strip painter needs, computed once per paint.
struct StripPaint<'a> {
    theme: &'a Theme,
    window: &'a DecoratedWindow,
    colors: &'a FrameColors,
    insets: Insets,
    width: i32,
}

/// Repaints the frame of `window`.
///
/// A window that is hidden, fullscreen, unmapped and unshaded, or has
/// neither a title nor an outline is left untouched.
pub fn paint_frame<B>(backend: &mut B, theme: &Theme, window: &DecoratedWindow) -> Result<()>
where
    B: Backend + ?Sized,
{
    let state = &window.state;
    if !should_paint(state) {
        trace!("Frame {:#x} not painted in state {:?}", window.frame, state.status);
        return Ok(());
    }

    let config = &theme.frame;
    let insets = compute_insets(state, config);
    let width = insets.frame_width(window.width);
    let height = insets.frame_height(window.height, state.status);
    let colors = FrameColors::select(state.status, &theme.palette);

    debug!(
        "Painting frame {:#x}: {}x{} insets {:?}",
        window.frame, width, height, insets
    );

    backend.set_background(window.frame, colors.title2)?;

    if insets.north > 0 && width > 0 {
        let strip = StripPaint {
            theme,
            window,
            colors: &colors,
            insets,
            width,
        };
        let scratch = ScratchPixmap::new(backend, window.frame, width, insets.north);
        if let Some(mut scratch) = skip_on_allocation(scratch, "title strip")? {
            paint_title_strip(&mut scratch, &strip)?;
        }
    }

    if height > insets.north {
        backend.clear_area(window.frame, Rect::new(0, insets.north, width, height - insets.north))?;
    }

    if config.handles {
        draw_handles(backend, config, state, &colors, window.frame, width, height)?;
    } else {
        draw_outline(backend, config, state, &colors, window.frame, width, height, insets.north)?;
    }

    if config.radius() > 1 && backend.shape_supported() {
        skip_on_allocation(rebuild_clip_mask(backend, window, config), "clip mask")?;
    }

    Ok(())
}

/// Paints the title strip off screen and copies it onto the frame. The
/// scratch surface is released when `scratch` drops, on every path.
fn paint_title_strip<B>(scratch: &mut ScratchPixmap<'_, B>, strip: &StripPaint<'_>) -> Result<()>
where
    B: Backend + ?Sized,
{
    let StripPaint {
        theme,
        window,
        colors,
        insets,
        width,
    } = *strip;
    let config = &theme.frame;
    let state = &window.state;
    let canvas = scratch.id();

    scratch.fill_rect(canvas, colors.title2, Rect::new(0, 0, width, insets.north))?;

    if state.has_title() && config.title_fits() {
        let title = config.title();
        let origin = title_strip_origin(state, config);
        let left = insets.west + 1;
        let layout = ButtonLayout::compute(state, config, window.width);

        scratch.fill_horizontal_gradient(
            canvas,
            colors.title1,
            colors.title2,
            Rect::new(1, 1, width - 2, title - 2),
        )?;

        if let Some(icon) = &window.icon {
            if window.width >= title {
                let size = config.icon_size();
                let area = Rect::new(left, origin + (title - size) / 2, size, size);
                scratch.put_icon(canvas, icon, colors.text, area)?;
            }
        }

        let text_width = title_text_width(width, layout.len(), config);
        if let Some(name) = window.name.as_deref().filter(|n| !n.is_empty()) {
            if text_width > 0 {
                let text_height = scratch.text_height(Font::Border);
                scratch.draw_text(
                    canvas,
                    Font::Border,
                    colors.text,
                    left + title + 4,
                    origin + (title - text_height) / 2,
                    text_width,
                    name,
                )?;
            }
        }

        draw_buttons(&mut **scratch, strip, canvas, &layout, origin)?;
    }

    scratch.copy_area(
        canvas,
        window.frame,
        Rect::new(1, 1, width - 2, insets.north - 1),
        1,
        1,
    )
}

fn draw_buttons<B>(
    backend: &mut B,
    strip: &StripPaint<'_>,
    canvas: Drawable,
    layout: &ButtonLayout,
    origin: i32,
) -> Result<()>
where
    B: Canvas + TextRenderer + ?Sized,
{
    let theme = strip.theme;
    let config = &theme.frame;
    let colors = strip.colors;

    if config.handles {
        let menu_edge = strip.insets.west + config.title();
        stroke_all(backend, canvas, colors, &separator(menu_edge, origin, config))?;
    }

    // In handle style the glyphs sit one pixel up and left of their slot.
    let nudge = i32::from(config.handles);
    for slot in layout.slots() {
        if config.handles {
            stroke_all(backend, canvas, colors, &separator(slot.x, origin, config))?;
        }
        let icon = control_icon_for(slot.button, strip.window.state.status);
        let area = Rect::new(slot.x - nudge, origin - nudge, slot.size, slot.size);
        draw_control(backend, theme, colors, canvas, area, icon)?;
    }
    Ok(())
}

fn control_icon_for(button: ControlButton, status: StatusFlags) -> ControlIcon {
    match button {
        ControlButton::Close => ControlIcon::Close,
        ControlButton::Maximize if status.is_maximized() => ControlIcon::MaximizeActive,
        ControlButton::Maximize => ControlIcon::Maximize,
        ControlButton::Minimize => ControlIcon::Minimize,
    }
}

fn draw_control<B>(
    backend: &mut B,
    theme: &Theme,
    colors: &FrameColors,
    canvas: Drawable,
    area: Rect,
    icon: ControlIcon,
) -> Result<()>
where
    B: Canvas + TextRenderer + ?Sized,
{
    if let Some(themed) = theme.control_icon(icon) {
        let desc = WidgetDescriptor {
            icon: Some(themed),
            border: false,
            ..WidgetDescriptor::new(canvas, area)
        };
        return draw_widget(backend, &theme.palette, &desc);
    }

    let glyph = fallback_glyph(icon, area.x, area.y, area.width);
    let pen = Pen::solid(colors.text)
        .with_width(glyph.width)
        .with_cap(glyph.cap);
    backend.draw_segments(canvas, pen, &glyph.segments)
}

fn stroke_all<C>(canvas: &mut C, target: Drawable, colors: &FrameColors, strokes: &[Stroke]) -> Result<()>
where
    C: Canvas + ?Sized,
{
    for stroke in strokes {
        let pen = Pen::solid(colors.tone(stroke.tone));
        canvas.draw_segments(target, pen, &stroke.segments)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_handles<C>(
    canvas: &mut C,
    config: &FrameConfig,
    state: &WindowState,
    colors: &FrameColors,
    frame: Drawable,
    width: i32,
    height: i32,
) -> Result<()>
where
    C: Canvas + ?Sized,
{
    let status = state.status;
    if status.contains(StatusFlags::MAXIMIZED_VERT) {
        return Ok(());
    }

    stroke_all(canvas, frame, colors, &handle_bevel(width, height, config))?;

    let fixed = StatusFlags::SHADED | StatusFlags::maximized();
    if state.border.contains(BorderFlags::RESIZE) && !status.intersects(fixed) {
        stroke_all(canvas, frame, colors, &resize_ticks(width, height, config))?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_outline<B>(
    backend: &mut B,
    config: &FrameConfig,
    state: &WindowState,
    colors: &FrameColors,
    frame: Drawable,
    width: i32,
    height: i32,
    north: i32,
) -> Result<()>
where
    B: Canvas + Shaper + ?Sized,
{
    let status = state.status;
    let radius = config.radius();
    if status.contains(StatusFlags::SHADED) {
        draw_rounded_rect(backend, frame, colors.outline, Rect::new(0, 0, width - 1, north - 1), radius)
    } else if status.is_maximized() {
        backend.draw_rect(frame, colors.outline, Rect::new(0, 0, width - 1, height - 1))
    } else {
        draw_rounded_rect(backend, frame, colors.outline, Rect::new(0, 0, width - 1, height - 1), radius)
    }
}

/// Rounded outline, or a plain one on servers that cannot clip the corners.
fn draw_rounded_rect<B>(backend: &mut B, target: Drawable, pixel: Pixel, rect: Rect, radius: i32) -> Result<()>
where
    B: Canvas + Shaper + ?Sized,
{
    if !backend.shape_supported() {
        return backend.draw_rect(target, pixel, rect);
    }
    let (sides, corners) = rounded_outline(rect, radius);
    backend.draw_segments(target, Pen::solid(pixel), &sides)?;
    backend.draw_arcs(target, pixel, &corners)
}

/// Moves and resizes the frame and client after a geometry or state change,
/// then rebuilds the clip mask.
pub fn reset_frame<B>(backend: &mut B, theme: &Theme, window: &DecoratedWindow) -> Result<()>
where
    B: Canvas + Shaper + ?Sized,
{
    let config = &theme.frame;
    let insets = window.insets(config);

    if !window.state.status.contains(StatusFlags::SHADED) {
        let client = Rect::new(insets.west, insets.north, window.width, window.height);
        backend.move_resize(window.client, client)?;
    }
    let frame = window.frame_rect(config);
    debug!("Reset frame {:#x} to {:?}", window.frame, frame);
    backend.move_resize(window.frame, frame)?;

    skip_on_allocation(rebuild_clip_mask(backend, window, config), "clip mask")?;
    Ok(())
}
