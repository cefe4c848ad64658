//! One-bit masks
//!
//! Frame clip shapes are rasterised client side and uploaded in one request.

use super::Rect;

/// A width by height grid of on/off pixels, bit packed.
///
/// Each row starts on a byte boundary; bit 0 of a byte is its leftmost pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: i32,
    height: i32,
    stride: usize,
    bits: Vec<u8>,
}

impl Bitmap {
    /// A cleared mask. Negative sizes give an empty mask.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let stride = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            stride,
            bits: vec![0; stride * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.bits[y as usize * self.stride + x as usize / 8];
        byte & (1 << (x % 8)) != 0
    }

    /// Packed pixels of row `y`, least significant bit first.
    pub fn row(&self, y: i32) -> &[u8] {
        if y < 0 || y >= self.height {
            return &[];
        }
        let start = y as usize * self.stride;
        &self.bits[start..start + self.stride]
    }

    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Sets or clears `rect`, clipped to the mask.
    pub fn paint_rect(&mut self, rect: Rect, on: bool) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.x.saturating_add(rect.width).min(self.width);
        let y1 = rect.y.saturating_add(rect.height).min(self.height);
        for y in y0..y1 {
            let row = y as usize * self.stride;
            for x in x0..x1 {
                let byte = &mut self.bits[row + x as usize / 8];
                let bit = 1 << (x % 8);
                if on {
                    *byte |= bit;
                } else {
                    *byte &= !bit;
                }
            }
        }
    }

    /// Sets a rectangle with circular corners of `radius`.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: i32) {
        let radius = radius.clamp(0, rect.width.min(rect.height) / 2);
        if radius == 0 {
            self.paint_rect(rect, true);
            return;
        }
        for row in 0..rect.height {
            let from_edge = row.min(rect.height - 1 - row);
            let inset = corner_inset(radius, from_edge);
            let span = Rect::new(rect.x + inset, rect.y + row, rect.width - 2 * inset, 1);
            self.paint_rect(span, true);
        }
    }

    /// Rows laid out for an image upload: `pad` bits per scanline, bit 0
    /// leftmost when `lsb_first`.
    pub fn pack(&self, pad: u32, lsb_first: bool) -> Vec<u8> {
        let pad = pad.max(8) as usize;
        let stride = (self.width as usize).div_ceil(pad) * pad / 8;
        let mut data = vec![0u8; stride * self.height as usize];
        for (y, out) in data.chunks_exact_mut(stride.max(1)).enumerate() {
            let row = self.row(y as i32);
            for (dst, src) in out.iter_mut().zip(row) {
                *dst = if lsb_first { *src } else { src.reverse_bits() };
            }
        }
        data
    }
}

/// Horizontal inset of a rounded corner `from_edge` rows away from the top or
/// bottom edge.
fn corner_inset(radius: i32, from_edge: i32) -> i32 {
    if from_edge >= radius {
        return 0;
    }
    // Distance from the circle centre, sampled at the pixel centre.
    let dy = radius as f64 - from_edge as f64 - 0.5;
    let dx = ((radius * radius) as f64 - dy * dy).max(0.0).sqrt();
    (radius as f64 - dx).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_rect_clips_to_mask() {
        let mut mask = Bitmap::new(4, 4);
        mask.paint_rect(Rect::new(-2, 2, 10, 10), true);
        assert!(!mask.get(0, 1));
        assert!(mask.get(0, 2));
        assert!(mask.get(3, 3));
        assert!(!mask.get(4, 3));
    }

    #[test]
    fn test_rounded_rect_cuts_corners_only() {
        let mut mask = Bitmap::new(20, 20);
        mask.fill_rounded_rect(Rect::new(0, 0, 20, 20), 5);
        assert!(!mask.get(0, 0));
        assert!(!mask.get(19, 0));
        assert!(!mask.get(0, 19));
        assert!(!mask.get(19, 19));
        assert!(mask.get(10, 0));
        assert!(mask.get(0, 10));
        assert!(mask.get(5, 5));
        assert!(mask.get(10, 10));
    }

    #[test]
    fn test_zero_radius_is_plain_fill() {
        let mut mask = Bitmap::new(3, 3);
        mask.fill_rounded_rect(Rect::new(0, 0, 3, 3), 0);
        assert!((0..3).all(|y| (0..3).all(|x| mask.get(x, y))));
    }

    #[test]
    fn test_rows_are_bit_packed() {
        let mut mask = Bitmap::new(10, 2);
        mask.paint_rect(Rect::new(1, 1, 8, 1), true);
        assert_eq!(mask.row(0), &[0x00, 0x00]);
        assert_eq!(mask.row(1), &[0xfe, 0x01]);
        assert!(mask.row(2).is_empty());

        mask.paint_rect(Rect::new(4, 1, 2, 1), false);
        assert_eq!(mask.row(1), &[0xce, 0x01]);
        mask.clear();
        assert_eq!(mask.row(1), &[0x00, 0x00]);
    }

    #[test]
    fn test_pack_bit_orders() {
        let mut mask = Bitmap::new(9, 1);
        mask.paint_rect(Rect::new(0, 0, 1, 1), true);
        mask.paint_rect(Rect::new(8, 0, 1, 1), true);

        let lsb = mask.pack(32, true);
        assert_eq!(lsb, vec![0x01, 0x01, 0x00, 0x00]);
        let msb = mask.pack(8, false);
        assert_eq!(msb, vec![0x80, 0x80]);
    }
}
