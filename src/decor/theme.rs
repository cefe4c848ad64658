//! Decoration theme
//!
//! The immutable bundle the painter reads: normalised frame config, resolved
//! palette and the themed control icons. A config reload builds a new
//! `Theme`; an existing one is never mutated.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::{Config, FrameConfig};
use crate::render::{IconLoader, Icon, NoIcons, Palette};

use super::glyph::ControlIcon;

#[derive(Debug, Clone)]
pub struct Theme {
    pub frame: FrameConfig,
    pub palette: Palette,
    control_icons: HashMap<ControlIcon, Icon>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::startup(&Config::default(), &mut NoIcons)
    }
}

impl Theme {
    /// Normalises `config` and loads the configured control icons.
    pub fn startup<L>(config: &Config, loader: &mut L) -> Self
    where
        L: IconLoader + ?Sized,
    {
        let frame = config.frame.startup();
        let palette = Palette::resolve(&config.color_overrides());

        let mut control_icons = HashMap::new();
        for icon in ControlIcon::ALL {
            let Some(name) = config.buttons.get(icon) else {
                continue;
            };
            match loader.load_icon(name) {
                Some(loaded) => {
                    control_icons.insert(icon, loaded);
                }
                None => warn!("Icon {:?} for {:?} not found, using built-in glyph", name, icon),
            }
        }

        info!(
            "Decoration theme ready: title {}px, border {}px, radius {}px, handles {}, {} themed glyphs",
            frame.title_height,
            frame.border_width,
            frame.border_radius,
            frame.handles,
            control_icons.len()
        );

        Self {
            frame,
            palette,
            control_icons,
        }
    }

    /// The themed icon for a control glyph, if one was loaded.
    pub fn control_icon(&self, icon: ControlIcon) -> Option<&Icon> {
        self.control_icons.get(&icon)
    }
}
