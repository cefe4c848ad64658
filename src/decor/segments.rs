//! Line work for the frame edges
//!
//! The handle bevel, its resize ticks and the rounded outline are plain
//! descriptor lists derived from the frame size and the same title height
//! and border width the classifier uses. The painter only strokes them.

use crate::config::FrameConfig;
use crate::render::{Arc, Rect, Segment};

/// Which half of a two-tone bevel a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Light,
    Dark,
}

/// A group of segments stroked in one colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    pub tone: Tone,
    pub segments: Vec<Segment>,
}

/// Outer frame size plus the two config lengths every edge is measured from.
#[derive(Debug, Clone, Copy)]
struct Metrics {
    w: i32,
    h: i32,
    t: i32,
    b: i32,
}

impl Metrics {
    fn new(width: i32, height: i32, config: &FrameConfig) -> Self {
        Self {
            w: width,
            h: height,
            t: config.title(),
            b: config.border(),
        }
    }
}

/// Raised bevel around the frame and the title strip: light on the top and
/// left, dark on the bottom and right.
pub fn handle_bevel(width: i32, height: i32, config: &FrameConfig) -> [Stroke; 2] {
    let Metrics { w, h, t, b } = Metrics::new(width, height, config);

    let light = vec![
        // title strip, top and left
        Segment::horizontal(b, w - b - 1, b),
        Segment::vertical(b, b + 1, t + b - 1),
        // inner right and bottom
        Segment::vertical(w - b, b, h - b),
        Segment::horizontal(b, w - b + 1, h - b),
        // outer left, two pixels
        Segment::vertical(0, 0, h - 1),
        Segment::vertical(1, 1, h - 2),
        // outer top, two pixels
        Segment::horizontal(1, w - 1, 0),
        Segment::horizontal(1, w - 2, 1),
    ];

    let dark = vec![
        // title strip, bottom and right
        Segment::horizontal(b + 1, w - b, t + b - 1),
        Segment::vertical(w - b - 1, b + 1, t + b),
        // inner top and left
        Segment::horizontal(b - 1, w - b, b - 1),
        Segment::vertical(b - 1, b, h - b),
        // outer right
        Segment::vertical(w - 1, 0, h - 1),
        Segment::vertical(w - 2, 1, h - 2),
        // outer bottom
        Segment::horizontal(0, w, h - 1),
        Segment::horizontal(1, w - 1, h - 2),
    ];

    [
        Stroke {
            tone: Tone::Light,
            segments: light,
        },
        Stroke {
            tone: Tone::Dark,
            segments: dark,
        },
    ]
}

/// Ridged marks where the corner resize zones meet the edges. The dark pass
/// sits one pixel before the light pass.
pub fn resize_ticks(width: i32, height: i32, config: &FrameConfig) -> [Stroke; 2] {
    let m = Metrics::new(width, height, config);
    [
        Stroke {
            tone: Tone::Dark,
            segments: ticks_at(m, -1),
        },
        Stroke {
            tone: Tone::Light,
            segments: ticks_at(m, 0),
        },
    ]
}

fn ticks_at(Metrics { w, h, t, b }: Metrics, shift: i32) -> Vec<Segment> {
    let near = t + b + shift;
    let far_x = w - t - b + shift;
    let far_y = h - t - b + shift;
    vec![
        // top left
        Segment::vertical(near, 0, b),
        Segment::horizontal(0, b, near),
        // top right
        Segment::horizontal(w - b, w, near),
        Segment::vertical(far_x, 0, b),
        // bottom left
        Segment::horizontal(0, b, far_y),
        Segment::vertical(near, h - b, h),
        // bottom right
        Segment::horizontal(w - b, w, far_y),
        Segment::vertical(far_x, h - b, h),
    ]
}

/// Separator pair drawn left of a title bar box whose left edge is `x`.
pub fn separator(x: i32, top: i32, config: &FrameConfig) -> [Stroke; 2] {
    let bottom = top + config.title();
    [
        Stroke {
            tone: Tone::Dark,
            segments: vec![Segment::vertical(x - 1, top, bottom)],
        },
        Stroke {
            tone: Tone::Light,
            segments: vec![Segment::vertical(x, top, bottom)],
        },
    ]
}

/// Straight sides and quarter arcs of a rounded rectangle outline. `rect`
/// uses outline semantics: the right edge is at `x + width`.
pub fn rounded_outline(rect: Rect, radius: i32) -> (Vec<Segment>, Vec<Arc>) {
    let Rect {
        x,
        y,
        width,
        height,
    } = rect;
    let r = radius;
    let d = radius * 2;

    let sides = vec![
        Segment::horizontal(x + r, x + width - r, y),
        Segment::horizontal(x + r, x + width - r, y + height),
        Segment::vertical(x, y + r, y + height - r),
        Segment::vertical(x + width, y + r, y + height - r),
    ];
    let corners = vec![
        Arc::quarter(x, y, d, 90),
        Arc::quarter(x + width - d, y, d, 0),
        Arc::quarter(x, y + height - d, d, 180),
        Arc::quarter(x + width - d, y + height - d, d, 270),
    ];
    (sides, corners)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FrameConfig {
        FrameConfig {
            title_height: 24,
            border_width: 4,
            border_radius: 4,
            handles: true,
        }
    }

    #[test]
    fn test_bevel_outer_edges() {
        let [light, dark] = handle_bevel(108, 128, &config());
        assert_eq!(light.tone, Tone::Light);
        assert_eq!(light.segments.len(), 8);
        assert_eq!(dark.segments.len(), 8);
        assert!(light.segments.contains(&Segment::new(0, 0, 0, 127)));
        assert!(light.segments.contains(&Segment::new(1, 0, 107, 0)));
        assert!(dark.segments.contains(&Segment::new(107, 0, 107, 127)));
        assert!(dark.segments.contains(&Segment::new(0, 127, 108, 127)));
        // bottom of the title strip
        assert!(dark.segments.contains(&Segment::new(5, 27, 104, 27)));
    }

    #[test]
    fn test_ticks_ridge_is_one_pixel_apart() {
        let [dark, light] = resize_ticks(108, 128, &config());
        assert_eq!(dark.tone, Tone::Dark);
        assert_eq!(dark.segments[0], Segment::new(27, 0, 27, 4));
        assert_eq!(light.segments[0], Segment::new(28, 0, 28, 4));
        for (d, l) in dark.segments.iter().zip(&light.segments) {
            let dx = l.x1 - d.x1;
            let dy = l.y1 - d.y1;
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn test_ticks_bottom_right() {
        let [dark, light] = resize_ticks(108, 128, &config());
        // w - t - b = 80, h - t - b = 100
        assert_eq!(dark.segments[6], Segment::new(104, 99, 108, 99));
        assert_eq!(light.segments[7], Segment::new(80, 124, 80, 128));
    }

    #[test]
    fn test_rounded_outline_corners() {
        let (sides, arcs) = rounded_outline(Rect::new(0, 0, 99, 49), 4);
        assert_eq!(sides[0], Segment::new(4, 0, 95, 0));
        assert_eq!(sides[3], Segment::new(99, 4, 99, 45));
        assert_eq!(arcs.len(), 4);
        assert_eq!(arcs[3].x, 91);
        assert_eq!(arcs[3].y, 41);
        assert_eq!(arcs[0].angle1, 90 * 64);
        assert!(arcs.iter().all(|a| a.angle2 == 90 * 64 && a.width == 8));
    }
}
