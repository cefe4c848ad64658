//! Window Flags
//!
//! Border style and status bitfields consumed by the decoration engine.

use bitflags::bitflags;

bitflags! {
    /// Decoration elements requested for a window. Set when the window is
    /// managed and rarely changed afterwards.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BorderFlags: u32 {
        const OUTLINE  = 1 << 0;
        const TITLE    = 1 << 1;
        const MINIMIZE = 1 << 2;
        const MAXIMIZE = 1 << 3;
        const CLOSE    = 1 << 4;
        const RESIZE   = 1 << 5;
        const MOVE     = 1 << 6;
    }
}

impl Default for BorderFlags {
    fn default() -> Self {
        Self::all()
    }
}

bitflags! {
    /// Window status, mutated by the window lifecycle controller.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u32 {
        const MAPPED          = 1 << 0;
        const SHADED          = 1 << 1;
        const HIDDEN          = 1 << 2;
        const MINIMIZED       = 1 << 3;
        const FULLSCREEN      = 1 << 4;
        const ACTIVE          = 1 << 5;
        const FLASH           = 1 << 6;
        const MAXIMIZED_HORIZ = 1 << 7;
        const MAXIMIZED_VERT  = 1 << 8;
        const SHAPED          = 1 << 9;
    }
}

impl StatusFlags {
    pub fn maximized() -> Self {
        Self::MAXIMIZED_HORIZ | Self::MAXIMIZED_VERT
    }

    /// Maximized on either axis.
    pub fn is_maximized(&self) -> bool {
        self.intersects(Self::maximized())
    }

    /// Drawn with the active colour set.
    pub fn is_highlighted(&self) -> bool {
        self.intersects(Self::ACTIVE | Self::FLASH)
    }
}

/// The per-window inputs of every geometry query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    pub border: BorderFlags,
    pub status: StatusFlags,
}

impl WindowState {
    pub fn new(border: BorderFlags, status: StatusFlags) -> Self {
        Self { border, status }
    }

    pub fn has_title(&self) -> bool {
        self.border.contains(BorderFlags::TITLE)
    }
}
