//! Colour palette
//!
//! Every colour the decorations use is looked up by [`ColorRole`]. The
//! palette is resolved once at startup from the configured overrides; bevel
//! shades are derived from their base colours and cannot be set directly.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use super::Pixel;

macro_rules! color_roles {
    ($($variant:ident => $name:literal,)+) => {
        /// A named colour slot.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ColorRole {
            $($variant,)+
        }

        impl ColorRole {
            pub const ALL: &'static [ColorRole] = &[$(ColorRole::$variant,)+];

            /// Name used in the `[colors]` config table.
            pub fn name(self) -> &'static str {
                match self {
                    $(ColorRole::$variant => $name,)+
                }
            }
        }

        impl FromStr for ColorRole {
            type Err = UnknownColorRole;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(ColorRole::$variant),)+
                    _ => Err(UnknownColorRole(s.to_string())),
                }
            }
        }
    };
}

color_roles! {
    TitleFg => "title_fg",
    TitleActiveFg => "title_active_fg",
    TitleBg1 => "title_bg1",
    TitleBg2 => "title_bg2",
    TitleActiveBg1 => "title_active_bg1",
    TitleActiveBg2 => "title_active_bg2",
    BorderLine => "border_line",
    BorderActiveLine => "border_active_line",
    TrayFg => "tray_fg",
    TrayBg1 => "tray_bg1",
    TrayBg2 => "tray_bg2",
    TrayActiveFg => "tray_active_fg",
    TrayActiveBg1 => "tray_active_bg1",
    TrayActiveBg2 => "tray_active_bg2",
    TaskFg => "task_fg",
    TaskBg1 => "task_bg1",
    TaskBg2 => "task_bg2",
    TaskActiveFg => "task_active_fg",
    TaskActiveBg1 => "task_active_bg1",
    TaskActiveBg2 => "task_active_bg2",
    PagerBg => "pager_bg",
    PagerFg => "pager_fg",
    PagerActiveBg => "pager_active_bg",
    PagerActiveFg => "pager_active_fg",
    PagerOutline => "pager_outline",
    PagerText => "pager_text",
    MenuBg => "menu_bg",
    MenuFg => "menu_fg",
    MenuActiveBg1 => "menu_active_bg1",
    MenuActiveBg2 => "menu_active_bg2",
    MenuActiveFg => "menu_active_fg",
    MenuActiveOl => "menu_active_ol",
    PopupBg => "popup_bg",
    PopupFg => "popup_fg",
    PopupOutline => "popup_outline",
    TrayButtonFg => "traybutton_fg",
    TrayButtonBg1 => "traybutton_bg1",
    TrayButtonBg2 => "traybutton_bg2",
    TrayButtonActiveFg => "traybutton_active_fg",
    TrayButtonActiveBg1 => "traybutton_active_bg1",
    TrayButtonActiveBg2 => "traybutton_active_bg2",
    ClockFg => "clock_fg",
    ClockBg1 => "clock_bg1",
    ClockBg2 => "clock_bg2",
    TrayUp => "tray_up",
    TrayDown => "tray_down",
    TaskUp => "task_up",
    TaskDown => "task_down",
    TaskActiveUp => "task_active_up",
    TaskActiveDown => "task_active_down",
    MenuUp => "menu_up",
    MenuDown => "menu_down",
    TrayButtonUp => "traybutton_up",
    TrayButtonDown => "traybutton_down",
    TrayButtonActiveUp => "traybutton_active_up",
    TrayButtonActiveDown => "traybutton_active_down",
    BorderUp => "border_up",
    BorderDown => "border_down",
    BorderActiveUp => "border_active_up",
    BorderActiveDown => "border_active_down",
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColorRole(pub String);

impl fmt::Display for UnknownColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown colour role {:?}", self.0)
    }
}

impl std::error::Error for UnknownColorRole {}

use ColorRole::*;

const DEFAULTS: &[(ColorRole, Pixel)] = &[
    (TitleFg, 0xffffff),
    (TitleActiveFg, 0xffffff),
    (TitleBg1, 0x333333),
    (TitleBg2, 0x111111),
    (TitleActiveBg1, 0xcc7700),
    (TitleActiveBg2, 0x884400),
    (BorderLine, 0x000000),
    (BorderActiveLine, 0x000000),
    (TrayFg, 0xffffff),
    (TrayBg1, 0x333333),
    (TrayBg2, 0x111111),
    (TrayActiveFg, 0xffffff),
    (TrayActiveBg1, 0x111111),
    (TrayActiveBg2, 0x333333),
    (TaskFg, 0xffffff),
    (TaskBg1, 0x333333),
    (TaskBg2, 0x111111),
    (TaskActiveFg, 0xffffff),
    (TaskActiveBg1, 0x111111),
    (TaskActiveBg2, 0x333333),
    (PagerBg, 0x111111),
    (PagerFg, 0x444444),
    (PagerActiveBg, 0x884400),
    (PagerActiveFg, 0xcc7700),
    (PagerOutline, 0x000000),
    (PagerText, 0xffffff),
    (MenuBg, 0x333333),
    (MenuFg, 0xffffff),
    (MenuActiveBg1, 0xcc7700),
    (MenuActiveBg2, 0x884400),
    (MenuActiveFg, 0xffffff),
    (PopupBg, 0x999999),
    (PopupFg, 0x000000),
    (PopupOutline, 0x000000),
    (TrayButtonFg, 0xffffff),
    (TrayButtonBg1, 0x333333),
    (TrayButtonBg2, 0x111111),
    (TrayButtonActiveFg, 0xffffff),
    (TrayButtonActiveBg1, 0x111111),
    (TrayButtonActiveBg2, 0x333333),
    (ClockFg, 0xffffff),
    (ClockBg1, 0x333333),
    (ClockBg2, 0x111111),
];

/// Unset roles on the left take the configured value of the role on the right.
const INHERITED: &[(ColorRole, ColorRole)] = &[
    (TaskFg, TrayFg),
    (TaskBg1, TrayBg1),
    (TaskBg2, TrayBg2),
    (TaskActiveFg, TrayActiveFg),
    (TaskActiveBg1, TrayActiveBg1),
    (TaskActiveBg2, TrayActiveBg2),
    (TrayButtonFg, TrayFg),
    (TrayButtonBg1, TrayBg1),
    (TrayButtonBg2, TrayBg2),
    (TrayButtonActiveFg, TrayActiveFg),
    (TrayButtonActiveBg1, TrayActiveBg1),
    (TrayButtonActiveBg2, TrayActiveBg2),
    (ClockFg, TrayFg),
    (ClockBg1, TrayBg1),
    (ClockBg2, TrayBg2),
];

/// Bevel shades: (base, light, dark).
const BEVELS: &[(ColorRole, ColorRole, ColorRole)] = &[
    (TrayBg1, TrayUp, TrayDown),
    (TaskBg1, TaskUp, TaskDown),
    (TaskActiveBg1, TaskActiveUp, TaskActiveDown),
    (TrayButtonBg1, TrayButtonUp, TrayButtonDown),
    (TrayButtonActiveBg1, TrayButtonActiveUp, TrayButtonActiveDown),
    (MenuBg, MenuUp, MenuDown),
    (TitleBg1, BorderUp, BorderDown),
    (TitleActiveBg1, BorderActiveUp, BorderActiveDown),
];

/// Resolved pixel values for every [`ColorRole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pixels: BTreeMap<ColorRole, Pixel>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::resolve(&BTreeMap::new())
    }
}

impl Palette {
    /// Builds the palette from `0xRRGGBB` overrides.
    pub fn resolve(overrides: &BTreeMap<ColorRole, u32>) -> Self {
        let mut configured = overrides.clone();
        for &(dest, src) in INHERITED {
            if !configured.contains_key(&dest) {
                if let Some(&rgb) = overrides.get(&src) {
                    configured.insert(dest, rgb);
                }
            }
        }

        let mut pixels: BTreeMap<ColorRole, Pixel> = DEFAULTS.iter().copied().collect();
        for (&role, &rgb) in &configured {
            if BEVELS.iter().any(|&(_, up, down)| role == up || role == down) {
                warn!("Colour role {} is derived and cannot be set", role);
                continue;
            }
            pixels.insert(role, rgb & 0xffffff);
        }

        if !configured.contains_key(&MenuActiveOl) {
            let base = pixels[&MenuActiveBg1];
            pixels.insert(MenuActiveOl, darken(base));
        }
        for &(base, up, down) in BEVELS {
            let rgb = pixels[&base];
            pixels.insert(up, lighten(rgb));
            pixels.insert(down, darken(rgb));
        }

        debug!("Resolved {} colours ({} overridden)", pixels.len(), overrides.len());
        Self { pixels }
    }

    pub fn get(&self, role: ColorRole) -> Pixel {
        self.pixels.get(&role).copied().unwrap_or_default()
    }
}

fn scale(rgb: u32, factor: u32) -> u32 {
    let channel = |shift: u32| (((rgb >> shift) & 0xff) * factor >> 8).min(0xff) << shift;
    channel(16) | channel(8) | channel(0)
}

/// Roughly 1.45 times brighter, saturating per channel.
pub fn lighten(rgb: u32) -> u32 {
    scale(rgb, 371)
}

/// Roughly 0.55 times the brightness.
pub fn darken(rgb: u32) -> u32 {
    scale(rgb, 141)
}
