//! Frame insets
//!
//! How thick the frame is on each edge of the client, given the window's
//! decoration request, its status and the frame config.

use crate::config::FrameConfig;

use super::flags::{BorderFlags, StatusFlags, WindowState};

/// Pixel thickness of the frame on each edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub north: i32,
    pub south: i32,
    pub east: i32,
    pub west: i32,
}

impl Insets {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn sum(&self) -> i32 {
        self.north + self.south + self.east + self.west
    }

    /// Outer frame width around a client `client_width` wide.
    pub fn frame_width(&self, client_width: i32) -> i32 {
        client_width.saturating_add(self.east + self.west)
    }

    /// Outer frame height. A shaded window collapses to its title strip.
    pub fn frame_height(&self, client_height: i32, status: StatusFlags) -> i32 {
        if status.contains(StatusFlags::SHADED) {
            self.north + self.south
        } else {
            client_height.saturating_add(self.north + self.south)
        }
    }
}

/// Computes the frame insets. Pure; depends on nothing else.
pub fn compute_insets(state: &WindowState, config: &FrameConfig) -> Insets {
    let status = state.status;
    if status.contains(StatusFlags::FULLSCREEN) {
        return Insets::zero();
    }

    let mut insets = Insets::zero();
    let border = config.border();

    if state.border.contains(BorderFlags::OUTLINE) {
        if !status.contains(StatusFlags::MAXIMIZED_VERT) {
            insets.north = border;
            insets.south = border;
        }
        if !status.contains(StatusFlags::MAXIMIZED_HORIZ) {
            insets.east = border;
            insets.west = border;
        }
    }

    if state.has_title() {
        if config.handles {
            insets.north += config.title();
        } else {
            insets.north = config.title();
        }
    }

    if !config.handles && status.contains(StatusFlags::SHADED) {
        insets.south = 0;
    }

    insets
}

/// Effective title strip height used by the pointer classifier.
///
/// In handle style the strip sits below the top border unless the window is
/// maximized vertically.
pub fn title_strip_height(state: &WindowState, config: &FrameConfig) -> i32 {
    if in_handle_strip(state, config) {
        config.title() + config.border()
    } else {
        config.title()
    }
}

/// Vertical origin of the title strip content (icon, text, buttons).
pub fn title_strip_origin(state: &WindowState, config: &FrameConfig) -> i32 {
    if in_handle_strip(state, config) {
        config.border()
    } else {
        0
    }
}

fn in_handle_strip(state: &WindowState, config: &FrameConfig) -> bool {
    config.handles && !state.status.contains(StatusFlags::MAXIMIZED_VERT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(handles: bool) -> FrameConfig {
        FrameConfig {
            title_height: 20,
            border_width: 4,
            border_radius: 4,
            handles,
        }
    }

    fn state(border: BorderFlags, status: StatusFlags) -> WindowState {
        WindowState::new(border, status)
    }

    #[test]
    fn test_title_overrides_outline_north() {
        let s = state(
            BorderFlags::TITLE | BorderFlags::OUTLINE | BorderFlags::CLOSE,
            StatusFlags::empty(),
        );
        let insets = compute_insets(&s, &config(false));
        assert_eq!(
            insets,
            Insets {
                north: 20,
                south: 4,
                east: 4,
                west: 4
            }
        );
    }

    #[test]
    fn test_vertical_maximize_drops_north_south_border() {
        let s = state(
            BorderFlags::TITLE | BorderFlags::OUTLINE | BorderFlags::CLOSE,
            StatusFlags::MAXIMIZED_VERT,
        );
        let insets = compute_insets(&s, &config(false));
        assert_eq!((insets.north, insets.south, insets.east, insets.west), (20, 0, 4, 4));
    }

    #[test]
    fn test_handles_stack_title_on_border() {
        let s = state(BorderFlags::default(), StatusFlags::empty());
        let insets = compute_insets(&s, &config(true));
        assert_eq!(insets.north, 24);
        assert_eq!(insets.south, 4);
    }

    #[test]
    fn test_shaded_outline_style_drops_south_border() {
        let s = state(BorderFlags::default(), StatusFlags::SHADED);
        assert_eq!(compute_insets(&s, &config(false)).south, 0);
    }

    #[test]
    fn test_shaded_handle_style_keeps_south_border() {
        let s = state(BorderFlags::default(), StatusFlags::SHADED);
        let insets = compute_insets(&s, &config(true));
        assert_eq!(insets.south, 4);
        // The shaded frame is the title strip plus the bottom handle.
        assert_eq!(insets.frame_height(150, s.status), 28);
    }

    #[test]
    fn test_fullscreen_is_all_zero() {
        let statuses = [
            StatusFlags::FULLSCREEN,
            StatusFlags::FULLSCREEN | StatusFlags::SHADED,
            StatusFlags::FULLSCREEN | StatusFlags::maximized() | StatusFlags::ACTIVE,
        ];
        for status in statuses {
            for handles in [false, true] {
                let insets = compute_insets(&state(BorderFlags::all(), status), &config(handles));
                assert_eq!(insets, Insets::zero());
                assert_eq!(insets.sum(), 0);
            }
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        for bits in 0..(1u32 << 10) {
            let status = StatusFlags::from_bits_truncate(bits);
            for handles in [false, true] {
                let s = state(BorderFlags::all(), status);
                let c = config(handles);
                assert_eq!(compute_insets(&s, &c), compute_insets(&s, &c));
            }
        }
    }

    #[test]
    fn test_no_decorations_no_insets() {
        let s = state(BorderFlags::empty(), StatusFlags::empty());
        assert_eq!(compute_insets(&s, &config(true)), Insets::zero());
    }

    #[test]
    fn test_frame_height_collapses_when_shaded() {
        let insets = Insets {
            north: 20,
            south: 4,
            east: 4,
            west: 4,
        };
        assert_eq!(insets.frame_height(100, StatusFlags::empty()), 124);
        assert_eq!(insets.frame_height(100, StatusFlags::SHADED), 24);
        assert_eq!(insets.frame_width(100), 108);
    }

    #[test]
    fn test_strip_origin_follows_handles() {
        let s = state(BorderFlags::all(), StatusFlags::empty());
        assert_eq!(title_strip_origin(&s, &config(false)), 0);
        assert_eq!(title_strip_origin(&s, &config(true)), 4);
        assert_eq!(title_strip_height(&s, &config(true)), 24);

        let vmax = state(BorderFlags::all(), StatusFlags::MAXIMIZED_VERT);
        assert_eq!(title_strip_origin(&vmax, &config(true)), 0);
        assert_eq!(title_strip_height(&vmax, &config(true)), 20);
    }
}
