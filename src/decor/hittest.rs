//! Pointer classification
//!
//! Maps a point in frame coordinates to what pressing there should do. Uses
//! the same insets and button slots as the painter.

use bitflags::bitflags;
use tracing::trace;

use crate::config::FrameConfig;

use super::flags::{BorderFlags, StatusFlags, WindowState};
use super::geometry::{compute_insets, title_strip_height};
use super::layout::ButtonLayout;
use super::ControlButton;

bitflags! {
    /// Frame edges affected by a resize.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResizeEdges: u8 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const EAST  = 1 << 2;
        const WEST  = 1 << 3;
    }
}

impl ResizeEdges {
    pub fn is_corner(&self) -> bool {
        self.intersects(Self::NORTH | Self::SOUTH) && self.intersects(Self::EAST | Self::WEST)
    }
}

/// What a press at a frame location means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderAction {
    #[default]
    None,
    Move,
    Menu,
    Close,
    Maximize,
    Minimize,
    Resize(ResizeEdges),
}

impl From<ControlButton> for BorderAction {
    fn from(button: ControlButton) -> Self {
        match button {
            ControlButton::Close => BorderAction::Close,
            ControlButton::Maximize => BorderAction::Maximize,
            ControlButton::Minimize => BorderAction::Minimize,
        }
    }
}

/// Classifies the point (`x`, `y`) relative to the frame's top-left corner.
///
/// Never fails; anything that is not a control or a resize zone is
/// [`BorderAction::None`].
pub fn classify(
    state: &WindowState,
    config: &FrameConfig,
    client_width: i32,
    client_height: i32,
    x: i32,
    y: i32,
) -> BorderAction {
    let action = classify_inner(state, config, client_width, client_height, x, y);
    trace!("classify ({}, {}) -> {:?}", x, y, action);
    action
}

fn classify_inner(
    state: &WindowState,
    config: &FrameConfig,
    client_width: i32,
    client_height: i32,
    x: i32,
    y: i32,
) -> BorderAction {
    let insets = compute_insets(state, config);
    let title = config.title();
    let border = config.border();
    let strip = title_strip_height(state, config);

    if state.has_title() && strip > border && y >= border && y <= strip {
        let layout = ButtonLayout::compute(state, config, client_width);
        if let Some(button) = layout.hit(x) {
            return button.into();
        }
        if client_width >= title && x > border && x <= title {
            return BorderAction::Menu;
        }
        if x > border && x < layout.remaining() {
            return if state.border.contains(BorderFlags::MOVE) {
                BorderAction::Move
            } else {
                BorderAction::None
            };
        }
    }

    if !state.border.contains(BorderFlags::RESIZE) {
        return BorderAction::None;
    }

    let status = state.status;
    let mut allowed = ResizeEdges::all();
    if status.contains(StatusFlags::MAXIMIZED_HORIZ) {
        allowed -= ResizeEdges::EAST | ResizeEdges::WEST;
    }
    if status.intersects(StatusFlags::MAXIMIZED_VERT | StatusFlags::SHADED) {
        allowed -= ResizeEdges::NORTH | ResizeEdges::SOUTH;
    }

    let right = client_width.saturating_add(insets.west);
    let bottom = client_height.saturating_add(insets.north);

    let corner = if client_width >= 2 * title && client_height >= 2 * title {
        let vertical = if y > bottom - title {
            Some(ResizeEdges::SOUTH)
        } else if y < title {
            Some(ResizeEdges::NORTH)
        } else {
            None
        };
        vertical.and_then(|edge| {
            if x < title {
                Some(edge | ResizeEdges::WEST)
            } else if x > right - title {
                Some(edge | ResizeEdges::EAST)
            } else {
                None
            }
        })
    } else {
        None
    };

    let edges = corner.unwrap_or_else(|| {
        if x <= insets.west {
            ResizeEdges::WEST
        } else if x >= right {
            ResizeEdges::EAST
        } else if y >= bottom {
            ResizeEdges::SOUTH
        } else if y <= insets.south {
            // Compared against the south inset on purpose; pinned by tests.
            ResizeEdges::NORTH
        } else {
            ResizeEdges::empty()
        }
    });

    let edges = edges & allowed;
    if edges.is_empty() {
        BorderAction::None
    } else {
        BorderAction::Resize(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::geometry::title_strip_origin;

    fn config(handles: bool) -> FrameConfig {
        FrameConfig {
            title_height: 20,
            border_width: 4,
            border_radius: 4,
            handles,
        }
    }

    fn scenario_a_style() -> BorderFlags {
        BorderFlags::TITLE | BorderFlags::OUTLINE | BorderFlags::CLOSE | BorderFlags::MOVE
    }

    #[test]
    fn test_close_and_move_in_title() {
        let s = WindowState::new(scenario_a_style(), StatusFlags::empty());
        assert_eq!(classify(&s, &config(false), 200, 150, 190, 10), BorderAction::Close);
        assert_eq!(classify(&s, &config(false), 200, 150, 100, 10), BorderAction::Move);
    }

    #[test]
    fn test_title_span_without_move_is_inert() {
        let style = scenario_a_style() - BorderFlags::MOVE;
        let s = WindowState::new(style, StatusFlags::empty());
        assert_eq!(classify(&s, &config(false), 200, 150, 100, 10), BorderAction::None);
    }

    #[test]
    fn test_extreme_client_sizes_stay_defined() {
        let s = WindowState::new(BorderFlags::all(), StatusFlags::empty());
        let cfg = config(false);
        let max = i32::MAX;

        assert_eq!(classify(&s, &cfg, max, 100, 5, 5), BorderAction::Menu);
        assert_eq!(classify(&s, &cfg, max, max, max - 10, 10), BorderAction::Close);
        assert_eq!(
            classify(&s, &cfg, max, max, 500, max),
            BorderAction::Resize(ResizeEdges::SOUTH)
        );
        assert_eq!(
            classify(&s, &cfg, i32::MIN, i32::MIN, 2, 50),
            BorderAction::Resize(ResizeEdges::WEST)
        );
        assert_eq!(
            classify(&s, &config(true), max, max, max, max),
            BorderAction::Resize(ResizeEdges::SOUTH | ResizeEdges::EAST)
        );
    }

    #[test]
    fn test_menu_box() {
        let s = WindowState::new(BorderFlags::all(), StatusFlags::empty());
        assert_eq!(classify(&s, &config(false), 200, 150, 10, 10), BorderAction::Menu);
        assert_eq!(classify(&s, &config(false), 200, 150, 21, 10), BorderAction::Move);
    }

    #[test]
    fn test_vertical_maximize_masks_south() {
        let s = WindowState::new(
            scenario_a_style() | BorderFlags::RESIZE,
            StatusFlags::MAXIMIZED_VERT,
        );
        let c = config(false);
        // Insets are (20, 0, 4, 4); the client ends at y = 170.
        for y in [170, 171, 175] {
            assert_eq!(classify(&s, &c, 200, 150, 100, y), BorderAction::None);
        }
        // East edge stays live.
        assert_eq!(
            classify(&s, &c, 200, 150, 204, 100),
            BorderAction::Resize(ResizeEdges::EAST)
        );
        // A bottom corner keeps only its horizontal edge.
        assert_eq!(
            classify(&s, &c, 200, 150, 2, 165),
            BorderAction::Resize(ResizeEdges::WEST)
        );
    }

    #[test]
    fn test_corners() {
        let s = WindowState::new(BorderFlags::all(), StatusFlags::empty());
        let c = config(false);
        let nw = ResizeEdges::NORTH | ResizeEdges::WEST;
        let se = ResizeEdges::SOUTH | ResizeEdges::EAST;
        assert_eq!(classify(&s, &c, 200, 150, 1, 1), BorderAction::Resize(nw));
        assert_eq!(classify(&s, &c, 200, 150, 206, 172), BorderAction::Resize(se));
        assert!(ResizeEdges::SOUTH.union(ResizeEdges::EAST).is_corner());
    }

    #[test]
    fn test_small_window_has_no_corners() {
        let s = WindowState::new(BorderFlags::all(), StatusFlags::empty());
        // 30 < 2 * title height, so only the west edge applies.
        assert_eq!(
            classify(&s, &config(false), 30, 30, 1, 1),
            BorderAction::Resize(ResizeEdges::WEST)
        );
    }

    #[test]
    fn test_north_edge_compares_against_south_inset() {
        let style = BorderFlags::TITLE | BorderFlags::RESIZE | BorderFlags::MOVE;
        let s = WindowState::new(style, StatusFlags::empty());
        let c = config(false);
        // No outline: north inset is 20, south inset is 0.
        assert_eq!(
            classify(&s, &c, 200, 150, 100, 0),
            BorderAction::Resize(ResizeEdges::NORTH)
        );
        assert_eq!(classify(&s, &c, 200, 150, 100, 2), BorderAction::None);
    }

    #[test]
    fn test_no_resize_flag_below_title() {
        let s = WindowState::new(BorderFlags::all() - BorderFlags::RESIZE, StatusFlags::empty());
        assert_eq!(classify(&s, &config(false), 200, 150, 1, 100), BorderAction::None);
    }

    #[test]
    fn test_shaded_never_resizes_vertically() {
        let s = WindowState::new(BorderFlags::all(), StatusFlags::SHADED);
        let c = config(true);
        for y in -2..40 {
            for x in [-1, 1, 100, 207, 210] {
                if let BorderAction::Resize(edges) = classify(&s, &c, 200, 150, x, y) {
                    assert!(!edges.intersects(ResizeEdges::NORTH | ResizeEdges::SOUTH));
                }
            }
        }
    }

    #[test]
    fn test_resize_edges_respect_maximized_axes() {
        let c = config(false);
        for status in [
            StatusFlags::MAXIMIZED_HORIZ,
            StatusFlags::MAXIMIZED_VERT,
            StatusFlags::maximized(),
        ] {
            let s = WindowState::new(BorderFlags::all(), status);
            for y in (-5..200).step_by(3) {
                for x in (-5..220).step_by(3) {
                    if let BorderAction::Resize(edges) = classify(&s, &c, 200, 150, x, y) {
                        if status.contains(StatusFlags::MAXIMIZED_HORIZ) {
                            assert!(!edges.intersects(ResizeEdges::EAST | ResizeEdges::WEST));
                        }
                        if status.contains(StatusFlags::MAXIMIZED_VERT) {
                            assert!(!edges.intersects(ResizeEdges::NORTH | ResizeEdges::SOUTH));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_drawn_button_is_clickable() {
        let styles = [
            BorderFlags::all(),
            BorderFlags::TITLE | BorderFlags::CLOSE | BorderFlags::MAXIMIZE,
            BorderFlags::TITLE | BorderFlags::OUTLINE | BorderFlags::MINIMIZE,
        ];
        for handles in [false, true] {
            let c = config(handles).startup();
            for style in styles {
                let s = WindowState::new(style, StatusFlags::empty());
                let y = title_strip_origin(&s, &c) + c.border();
                for width in 0..300 {
                    let layout = ButtonLayout::compute(&s, &c, width);
                    for slot in layout.slots() {
                        for x in slot.x + 1..slot.x + slot.size {
                            assert_eq!(
                                classify(&s, &c, width, 100, x, y),
                                BorderAction::from(slot.button),
                                "width {} x {}",
                                width,
                                x
                            );
                        }
                    }

                    let clickable: Vec<BorderAction> = (0..width + 20)
                        .map(|x| classify(&s, &c, width, 100, x, y))
                        .filter(|a| {
                            matches!(
                                a,
                                BorderAction::Close | BorderAction::Maximize | BorderAction::Minimize
                            )
                        })
                        .collect();
                    for action in clickable {
                        assert!(
                            layout.slots().iter().any(|s| BorderAction::from(s.button) == action),
                            "{:?} clickable but not drawn at width {}",
                            action,
                            width
                        );
                    }
                }
            }
        }
    }
}
