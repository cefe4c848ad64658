//! Frame decorations
//!
//! Geometry, button layout, pointer classification and painting of the
//! frame drawn around each managed client.
//!
//! ```text
//! FrameConfig + WindowState
//!          |
//!    compute_insets
//!          |
//!    ---------------------------------
//!    |             |                 |
//! ButtonLayout   classify       paint_frame
//!                               reset_frame
//! ```
//!
//! Nothing here is cached between calls: every query recomputes insets and
//! layout from the current state, so a paint right after a state change
//! always reflects the new state.

pub mod flags;
pub mod frame;
pub mod geometry;
pub mod glyph;
pub mod hittest;
pub mod layout;
pub mod segments;
pub mod shape;
pub mod theme;
pub mod widget;

pub use flags::{BorderFlags, StatusFlags, WindowState};
pub use frame::{paint_frame, reset_frame, DecoratedWindow};
pub use geometry::{compute_insets, Insets};
pub use glyph::ControlIcon;
pub use hittest::{classify, BorderAction, ResizeEdges};
pub use layout::{count_visible_buttons, title_text_width, ButtonLayout, ButtonSlot};
pub use shape::rebuild_clip_mask;
pub use theme::Theme;
pub use widget::{draw_widget, Alignment, WidgetDescriptor, WidgetKind};

/// A title bar control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Close,
    Maximize,
    Minimize,
}
