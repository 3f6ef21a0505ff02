use bitflags::bitflags;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

bitflags! {
    /// Window decorations and modes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        const NONE = 0;
        const TITLEBAR = 1;
        const RESIZE = 2;
        const CLOSE = 4;
        const FULLSCREEN = 8;
        const DEFAULT = Self::TITLEBAR.bits() | Self::RESIZE.bits() | Self::CLOSE.bits();
    }
}

/// How the player thread should open its window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub style: WindowStyle,
    /// Requested multisampling level, 0 to disable
    pub antialiasing: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT, "")
    }
}

impl WindowSettings {
    /// Borderless window of the given size
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            style: WindowStyle::NONE,
            antialiasing: 0,
        }
    }

    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_antialiasing(mut self, level: u32) -> Self {
        self.antialiasing = level;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_small_and_borderless() {
        let settings = WindowSettings::default();
        assert_eq!(settings.size(), (64, 64));
        assert!(settings.title.is_empty());
        assert_eq!(settings.style, WindowStyle::NONE);
    }

    #[test]
    fn test_default_style_has_decorations() {
        assert!(WindowStyle::DEFAULT.contains(WindowStyle::TITLEBAR | WindowStyle::CLOSE));
        assert!(!WindowStyle::DEFAULT.contains(WindowStyle::FULLSCREEN));
    }
}
