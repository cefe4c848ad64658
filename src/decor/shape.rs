//! Frame clip mask
//!
//! Rounded frames are clipped with a one-bit bounding mask. The mask is
//! derived state: it is rebuilt whenever the frame is resized, maximized or
//! restored, shaded or unshaded, and when the theme is reloaded.

use tracing::{debug, trace};

use crate::config::FrameConfig;
use crate::error::Result;
use crate::render::{Bitmap, Rect, Shaper};

use super::flags::StatusFlags;
use super::frame::DecoratedWindow;
use super::geometry::compute_insets;

/// Rasterises the bounding mask of `window`'s frame.
///
/// `client_shape` holds the client's own bounding rectangles in client
/// coordinates; it only matters for shaped, unshaded windows.
pub fn clip_mask(window: &DecoratedWindow, config: &FrameConfig, client_shape: Option<&[Rect]>) -> Bitmap {
    let status = window.state.status;
    let insets = compute_insets(&window.state, config);
    let width = insets.frame_width(window.width);
    let height = insets.frame_height(window.height, status);
    let full = Rect::new(0, 0, width, height);

    let mut mask = Bitmap::new(width, height);
    let radius = config.radius();
    if radius > 1 {
        if status.is_maximized() && !status.contains(StatusFlags::SHADED) {
            mask.paint_rect(full, true);
        } else {
            // One less than the outline radius so the outline stays visible.
            mask.fill_rounded_rect(full, radius - 1);
        }
    } else {
        mask.paint_rect(full, true);
    }

    let shaped = status.contains(StatusFlags::SHAPED) && !status.contains(StatusFlags::SHADED);
    if shaped {
        let client = Rect::new(insets.west, insets.north, window.width, window.height);
        mask.paint_rect(client, false);
        for rect in client_shape.unwrap_or_default() {
            mask.paint_rect(rect.offset(insets.west, insets.north), true);
        }
    }

    mask
}

/// Recomputes and applies the frame's bounding shape. Does nothing when the
/// server cannot shape windows.
pub fn rebuild_clip_mask<B>(backend: &mut B, window: &DecoratedWindow, config: &FrameConfig) -> Result<()>
where
    B: Shaper + ?Sized,
{
    if !backend.shape_supported() {
        trace!("No shape support, frame {:#x} stays rectangular", window.frame);
        return Ok(());
    }

    let status = window.state.status;
    let client_shape = if status.contains(StatusFlags::SHAPED) && !status.contains(StatusFlags::SHADED) {
        backend.client_shape(window.client)?
    } else {
        None
    };

    let mask = clip_mask(window, config, client_shape.as_deref());
    debug!(
        "Applying {}x{} clip mask to frame {:#x}",
        mask.width(),
        mask.height(),
        window.frame
    );
    backend.apply_bounding_mask(window.frame, &mask)
}
