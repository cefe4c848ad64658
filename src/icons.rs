//! Icons
//!
//! Icon sources for the decoration engine: `_NET_WM_ICON` property data for
//! window icons, and the freedesktop icon theme for themed control glyphs.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::render::{Icon, IconLoader};

/// Sanity limit for a single icon image: 1 megapixel.
const MAX_ICON_PIXELS: usize = 1024 * 1024;

/// Picks the largest image out of a `_NET_WM_ICON` value.
///
/// The property is a sequence of `width, height, pixels...` records with
/// ARGB32 pixels. Parsing stops at the first truncated or absurd record.
pub fn parse_net_wm_icon(name: &str, data: &[u32]) -> Option<Icon> {
    let mut best: Option<(u32, u32, &[u32])> = None;
    let mut rest = data;

    while let [width, height, tail @ ..] = rest {
        let (width, height) = (*width, *height);
        let Some(count) = (width as usize).checked_mul(height as usize) else {
            break;
        };
        if count == 0 || count > MAX_ICON_PIXELS || tail.len() < count {
            debug!("Malformed icon record {}x{} in {:?}", width, height, name);
            break;
        }
        let pixels = &tail[..count];
        if best.is_none_or(|(w, h, _)| (w as usize) * (h as usize) < count) {
            best = Some((width, height, pixels));
        }
        rest = &tail[count..];
    }

    best.map(|(width, height, pixels)| Icon::new(name, width, height, pixels.to_vec()))
}

/// Resamples `icon` to `width` x `height` with nearest-neighbour lookup.
pub fn scale_nearest(icon: &Icon, width: u32, height: u32) -> Vec<u32> {
    if icon.is_placeholder() || width == 0 || height == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        let sy = (y as u64 * icon.height as u64 / height as u64) as usize;
        let row = sy * icon.width as usize;
        for x in 0..width {
            let sx = (x as u64 * icon.width as u64 / width as u64) as usize;
            out.push(icon.pixels.get(row + sx).copied().unwrap_or(0));
        }
    }
    out
}

/// `[r, g, b, a]` to `0xAARRGGBB`.
pub fn argb_from_rgba([r, g, b, a]: [u8; 4]) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Looks control glyphs up in an installed icon theme.
///
/// Only PNG icons are decoded. Lookups are cached by name, misses included.
pub struct ThemedIcons {
    theme: Option<String>,
    size: u16,
    cache: HashMap<String, Option<Icon>>,
}

impl ThemedIcons {
    pub fn new(theme: Option<String>, size: u16) -> Self {
        Self {
            theme,
            size,
            cache: HashMap::new(),
        }
    }

    /// Uses the desktop's configured icon theme.
    pub fn system(size: u16) -> Self {
        Self::new(linicon::get_system_theme(), size)
    }

    fn lookup(&self, name: &str) -> Option<Icon> {
        let mut query = linicon::lookup_icon(name).with_size(self.size);
        if let Some(theme) = &self.theme {
            query = query.from_theme(theme.as_str());
        }

        for found in query {
            let found = match found {
                Ok(found) => found,
                Err(e) => {
                    debug!("Icon theme lookup for {:?} failed: {}", name, e);
                    continue;
                }
            };
            if found.icon_type != linicon::IconType::PNG {
                continue;
            }
            match image::open(&found.path) {
                Ok(decoded) => {
                    let rgba = decoded.to_rgba8();
                    let pixels = rgba.pixels().map(|p| argb_from_rgba(p.0)).collect();
                    trace!("Loaded themed icon {:?} from {}", name, found.path.display());
                    return Some(Icon::new(name, rgba.width(), rgba.height(), pixels));
                }
                Err(e) => debug!("Could not decode {}: {}", found.path.display(), e),
            }
        }
        None
    }
}

impl IconLoader for ThemedIcons {
    fn load_icon(&mut self, name: &str) -> Option<Icon> {
        if let Some(cached) = self.cache.get(name) {
            return cached.clone();
        }
        let icon = self.lookup(name);
        self.cache.insert(name.to_owned(), icon.clone());
        icon
    }
}
