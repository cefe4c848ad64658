//! Title bar button layout
//!
//! Control buttons are packed from the right edge of the client area,
//! close first. Painting and hit-testing both read the slots from
//! [`ButtonLayout::compute`], so a drawn button is always clickable and
//! nothing else is.

use crate::config::FrameConfig;

use super::flags::{BorderFlags, WindowState};
use super::geometry::compute_insets;
use super::ControlButton;

/// One visible control button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSlot {
    pub button: ControlButton,
    /// Left edge in frame coordinates.
    pub x: i32,
    /// Edge length of the square button box.
    pub size: i32,
}

impl ButtonSlot {
    /// Strictly inside the button box horizontally.
    pub fn hit(&self, x: i32) -> bool {
        x > self.x && x < self.x + self.size
    }
}

/// Visible control buttons, rightmost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonLayout {
    slots: Vec<ButtonSlot>,
    /// Right edge of the free title span once the buttons are placed.
    remaining: i32,
}

impl ButtonLayout {
    pub fn compute(state: &WindowState, config: &FrameConfig, client_width: i32) -> Self {
        let west = compute_insets(state, config).west;
        let mut offset = client_width.saturating_add(west);
        let mut slots = Vec::new();

        if !state.has_title() || !config.title_fits() {
            return Self {
                slots,
                remaining: offset,
            };
        }

        let size = config.title();
        for button in ControlButton::ORDER {
            if !state.border.contains(button.flag()) {
                continue;
            }
            if offset < size {
                break;
            }
            slots.push(ButtonSlot {
                button,
                x: offset - size,
                size,
            });
            offset -= size;
            if offset <= 2 * size {
                break;
            }
        }

        Self {
            slots,
            remaining: offset,
        }
    }

    pub fn slots(&self) -> &[ButtonSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Right edge of the draggable span left of the buttons.
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn hit(&self, x: i32) -> Option<ControlButton> {
        self.slots.iter().find(|slot| slot.hit(x)).map(|slot| slot.button)
    }
}

/// Number of control buttons that fit in the title bar.
pub fn count_visible_buttons(state: &WindowState, config: &FrameConfig, client_width: i32) -> usize {
    ButtonLayout::compute(state, config, client_width).len()
}

/// Width left for the title text in a frame `frame_width` wide, or zero.
pub fn title_text_width(frame_width: i32, button_count: usize, config: &FrameConfig) -> i32 {
    let buttons = (button_count as i32).saturating_mul(config.title());
    let width = frame_width
        .saturating_sub(buttons)
        .saturating_sub(config.icon_size() + 13);
    width.max(0)
}

impl ControlButton {
    /// Packing order from the right edge.
    pub const ORDER: [ControlButton; 3] = [
        ControlButton::Close,
        ControlButton::Maximize,
        ControlButton::Minimize,
    ];

    pub fn flag(self) -> BorderFlags {
        match self {
            ControlButton::Close => BorderFlags::CLOSE,
            ControlButton::Maximize => BorderFlags::MAXIMIZE,
            ControlButton::Minimize => BorderFlags::MINIMIZE,
        }
    }
}
