//! Area Decor
//!
//! Frame decoration engine for the Area window manager: frame insets,
//! title-bar button layout, pointer classification and frame painting.
//!
//! Everything in [`decor`] is a plain function over value types. Drawing goes
//! through the traits in [`render`], which the [`x11`] module implements on top
//! of x11rb.

pub mod config;
pub mod decor;
pub mod error;
pub mod icons;
pub mod render;
pub mod x11;

pub use crate::config::{Config, ControlIconNames, FrameConfig};
pub use crate::decor::{
    classify, compute_insets, count_visible_buttons, paint_frame, rebuild_clip_mask,
    reset_frame, BorderAction, BorderFlags, ButtonLayout, ControlButton, DecoratedWindow,
    Insets, ResizeEdges, StatusFlags, Theme, WindowState,
};
pub use crate::error::{DecorError, Result};
