//! Control button glyphs
//!
//! Each control is drawn with a themed icon when one was loaded, otherwise
//! with a small line drawing centred in its button box.

use crate::render::{Cap, Segment};

/// The glyphs a title bar can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlIcon {
    Close,
    Maximize,
    /// Restore glyph, shown on the maximize button of a maximized window.
    MaximizeActive,
    Minimize,
}

impl ControlIcon {
    pub const ALL: [ControlIcon; 4] = [
        ControlIcon::Close,
        ControlIcon::Maximize,
        ControlIcon::MaximizeActive,
        ControlIcon::Minimize,
    ];
}

/// A fallback glyph: segments plus the line attributes to stroke them with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub width: u16,
    pub cap: Cap,
    pub segments: Vec<Segment>,
}

/// Line drawing of `icon` in the `box_size` square at (`x`, `y`).
pub fn fallback_glyph(icon: ControlIcon, x: i32, y: i32, box_size: i32) -> Glyph {
    let base = (box_size + 2) / 3;
    let size = match icon {
        ControlIcon::Maximize | ControlIcon::MaximizeActive => base + 2,
        ControlIcon::Close | ControlIcon::Minimize => base,
    };
    let x1 = x + box_size / 2 - size / 2;
    let y1 = y + box_size / 2 - size / 2;
    let x2 = x1 + size;
    let y2 = y1 + size;

    match icon {
        ControlIcon::Close => Glyph {
            width: 2,
            cap: Cap::Projecting,
            segments: vec![Segment::new(x1, y1, x2, y2), Segment::new(x2, y1, x1, y2)],
        },
        ControlIcon::Minimize => Glyph {
            width: 2,
            cap: Cap::Projecting,
            segments: vec![Segment::horizontal(x1, x2, y2)],
        },
        ControlIcon::Maximize => Glyph {
            width: 1,
            cap: Cap::Projecting,
            segments: square(x1, y1, x2, y2),
        },
        ControlIcon::MaximizeActive => {
            let x3 = x1 + size / 2;
            let y3 = y1 + size / 2;
            let mut segments = square(x1, y1, x2, y2);
            segments.extend([
                Segment::horizontal(x1, x3, y3),
                Segment::horizontal(x1, x3, y3 + 1),
                Segment::vertical(x3, y3, y2),
            ]);
            Glyph {
                width: 1,
                cap: Cap::Projecting,
                segments,
            }
        }
    }
}

/// Box outline with a doubled top edge.
fn square(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<Segment> {
    vec![
        Segment::horizontal(x1, x2, y1),
        Segment::horizontal(x1, x2, y1 + 1),
        Segment::vertical(x1, y1, y2),
        Segment::vertical(x2, y1, y2),
        Segment::horizontal(x1, x2, y2),
    ]
}
