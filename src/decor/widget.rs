//! Button widget
//!
//! A filled box with an optional bevel and an icon and label laid out left
//! to right. Title bar glyphs, tray buttons, task entries and menu items all
//! draw through [`draw_widget`].

use tracing::trace;

use crate::error::Result;
use crate::render::{
    Canvas, ColorRole, Drawable, Font, Icon, Palette, Pen, Pixel, Rect, Segment, TextRenderer,
};

/// Visual variant of a widget; picks its colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetKind {
    Label,
    #[default]
    Menu,
    MenuActive,
    Tray,
    TrayActive,
    Task,
    TaskActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// Everything needed for a single widget draw.
#[derive(Debug, Clone)]
pub struct WidgetDescriptor<'a> {
    pub target: Drawable,
    pub kind: WidgetKind,
    pub font: Font,
    pub alignment: Alignment,
    pub rect: Rect,
    pub icon: Option<&'a Icon>,
    pub text: Option<&'a str>,
    pub border: bool,
}

impl<'a> WidgetDescriptor<'a> {
    /// A bordered, left-aligned menu widget with no content.
    pub fn new(target: Drawable, rect: Rect) -> Self {
        Self {
            target,
            kind: WidgetKind::Menu,
            font: Font::Tray,
            alignment: Alignment::Left,
            rect,
            icon: None,
            text: None,
            border: true,
        }
    }
}

struct WidgetColors {
    fg: Pixel,
    bg1: Pixel,
    bg2: Pixel,
    up: Pixel,
    down: Pixel,
}

impl WidgetColors {
    fn for_kind(kind: WidgetKind, palette: &Palette) -> Self {
        use ColorRole::*;

        let (fg, bg1, bg2, up, down) = match kind {
            WidgetKind::Label => (MenuFg, MenuBg, MenuBg, MenuBg, MenuBg),
            WidgetKind::Menu => (MenuFg, MenuBg, MenuBg, MenuUp, MenuDown),
            WidgetKind::MenuActive => (
                MenuActiveFg,
                MenuActiveBg1,
                MenuActiveBg2,
                MenuActiveOl,
                MenuActiveOl,
            ),
            WidgetKind::Tray => (
                TrayButtonFg,
                TrayButtonBg1,
                TrayButtonBg2,
                TrayButtonUp,
                TrayButtonDown,
            ),
            // Pressed variants swap the bevel.
            WidgetKind::TrayActive => (
                TrayButtonActiveFg,
                TrayButtonActiveBg1,
                TrayButtonActiveBg2,
                TrayButtonActiveDown,
                TrayButtonActiveUp,
            ),
            WidgetKind::Task => (TaskFg, TaskBg1, TaskBg2, TaskUp, TaskDown),
            WidgetKind::TaskActive => (
                TaskActiveFg,
                TaskActiveBg1,
                TaskActiveBg2,
                TaskActiveDown,
                TaskActiveUp,
            ),
        };

        Self {
            fg: palette.get(fg),
            bg1: palette.get(bg1),
            bg2: palette.get(bg2),
            up: palette.get(up),
            down: palette.get(down),
        }
    }
}

/// Fits `icon` into a `max_size` square keeping its aspect ratio.
///
/// A placeholder icon takes the whole square.
pub fn scaled_icon_size(icon: &Icon, max_size: i32) -> (i32, i32) {
    if icon.is_placeholder() {
        return (max_size, max_size);
    }

    // 16.16 fixed point, as icon sizes are small integers.
    let width = icon.width as i64;
    let height = icon.height as i64;
    let max = max_size as i64;
    let ratio = (width << 16) / height;
    if width > height {
        (max_size, ((max << 16) / ratio) as i32)
    } else {
        (((max * ratio) >> 16) as i32, max_size)
    }
}

/// Draws a widget described by `desc`.
pub fn draw_widget<B>(backend: &mut B, palette: &Palette, desc: &WidgetDescriptor<'_>) -> Result<()>
where
    B: Canvas + TextRenderer + ?Sized,
{
    let Rect {
        x,
        y,
        width,
        height,
    } = desc.rect;
    let colors = WidgetColors::for_kind(desc.kind, palette);

    if colors.bg1 == colors.bg2 {
        backend.fill_rect(desc.target, colors.bg1, desc.rect)?;
    } else {
        backend.fill_horizontal_gradient(desc.target, colors.bg1, colors.bg2, desc.rect)?;
    }

    if desc.border {
        let top_left = [
            Segment::horizontal(x, x + width - 1, y),
            Segment::horizontal(x, x + width - 2, y + 1),
            Segment::vertical(x, y, y + height - 1),
            Segment::vertical(x + 1, y, y + height - 2),
        ];
        backend.draw_segments(desc.target, Pen::solid(colors.up), &top_left)?;

        let bottom_right = [
            Segment::horizontal(x + 1, x + width - 2, y + height - 2),
            Segment::horizontal(x, x + width - 1, y + height - 1),
            Segment::vertical(x + width - 2, y + 1, y + height - 1),
            Segment::vertical(x + width - 1, y, y + height - 1),
        ];
        backend.draw_segments(desc.target, Pen::solid(colors.down), &bottom_right)?;
    }

    let (icon_width, icon_height) = match desc.icon {
        Some(icon) => scaled_icon_size(icon, width.min(height) - 5),
        None => (0, 0),
    };

    let text = desc.text.filter(|t| !t.is_empty());
    let (mut text_width, text_height) = match text {
        Some(t) => (
            backend.text_width(desc.font, t),
            backend.text_height(desc.font),
        ),
        None => (0, 0),
    };
    if text_width + icon_width + 8 > width {
        text_width = (width - icon_width - 8).max(0);
    }

    let mut xoffset = match desc.alignment {
        Alignment::Center => ((width - icon_width - text_width + 1) / 2).max(0),
        Alignment::Left => 4,
    };

    if let Some(icon) = desc.icon {
        let yoffset = (height - icon_height + 1) / 2;
        if !icon.is_placeholder() {
            let area = Rect::new(x + xoffset, y + yoffset, icon_width, icon_height);
            backend.put_icon(desc.target, icon, colors.fg, area)?;
        }
        xoffset += icon_width + 2;
    }

    if let Some(t) = text {
        if text_width > 0 {
            let yoffset = (height - text_height + 1) / 2;
            backend.draw_text(
                desc.target,
                desc.font,
                colors.fg,
                x + xoffset,
                y + yoffset,
                text_width,
                t,
            )?;
        }
    }

    trace!(
        "widget {:?} at {:?}: icon {}x{}, text {}",
        desc.kind, desc.rect, icon_width, icon_height, text_width
    );
    Ok(())
}
