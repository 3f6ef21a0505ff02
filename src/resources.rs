//! Font and texture dictionaries
//!
//! The dictionaries are process-wide: every `Splash` sees the same fonts
//! and textures, guarded by a single mutex that the player thread also
//! holds while it draws a frame. Assets are kept as encoded bytes and
//! decoded by the backend on the thread that owns the window.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};

use crate::error::{Result, SplashError};
use crate::texture_loader::{extension_of, read_orientation, IMAGE_EXTENSIONS};

/// An encoded TrueType/OpenType font
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    data: Arc<[u8]>,
    format: &'static str,
}

impl Font {
    /// Wraps font file contents after checking the sfnt signature.
    pub fn from_bytes(data: impl Into<Arc<[u8]>>) -> Result<Self> {
        Self::parse(data.into()).map_err(SplashError::InvalidAsset)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| SplashError::Io { path: path.to_path_buf(), source })?;
        Self::parse(data.into()).map_err(|reason| SplashError::UnsupportedAsset { path: path.to_path_buf(), reason })
    }

    fn parse(data: Arc<[u8]>) -> std::result::Result<Self, String> {
        let format = match data.get(..4) {
            Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true") => "ttf",
            Some(b"OTTO") => "otf",
            Some(b"ttcf") => "ttc",
            _ => return Err("not a TrueType or OpenType font".to_string()),
        };
        Ok(Self { data, format })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// File extension the decoder expects ("ttf", "otf" or "ttc")
    pub fn format(&self) -> &str {
        self.format
    }
}

/// An encoded image
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Arc<[u8]>,
    format: String,
    orientation: u16,
}

impl Texture {
    /// Wraps encoded image bytes; `format` is the file extension.
    pub fn from_bytes(data: impl Into<Arc<[u8]>>, format: &str) -> Result<Self> {
        Self::parse(data.into(), format).map_err(SplashError::InvalidAsset)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| SplashError::Io { path: path.to_path_buf(), source })?;
        Self::parse(data.into(), &extension_of(path))
            .map_err(|reason| SplashError::UnsupportedAsset { path: path.to_path_buf(), reason })
    }

    fn parse(data: Arc<[u8]>, format: &str) -> std::result::Result<Self, String> {
        let format = format.trim_start_matches('.').to_lowercase();
        if !IMAGE_EXTENSIONS.contains(&format.as_str()) {
            return Err(format!("unsupported image format '{}'", format));
        }
        if data.is_empty() {
            return Err("empty image data".to_string());
        }
        let orientation = match format.as_str() {
            "jpg" | "jpeg" => read_orientation(&data),
            _ => 1,
        };
        Ok(Self { data, format, orientation })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// EXIF orientation, 1 when upright or unknown
    pub fn orientation(&self) -> u16 {
        self.orientation
    }
}

/// Named fonts and textures
#[derive(Debug, Default)]
pub struct Resources {
    fonts: HashMap<String, Font>,
    textures: HashMap<String, Texture>,
}

impl Resources {
    pub fn font(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }

    pub fn texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Adds or replaces a font.
    pub fn insert_font(&mut self, name: &str, font: Font) {
        self.fonts.insert(name.to_string(), font);
    }

    pub fn remove_font(&mut self, name: &str) -> Option<Font> {
        self.fonts.remove(name)
    }

    /// Adds or replaces a texture.
    pub fn insert_texture(&mut self, name: &str, texture: Texture) {
        self.textures.insert(name.to_string(), texture);
    }

    pub fn remove_texture(&mut self, name: &str) -> Option<Texture> {
        self.textures.remove(name)
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
        self.textures.clear();
    }
}

static RESOURCES: Lazy<Mutex<Resources>> = Lazy::new(|| Mutex::new(Resources::default()));

/// Locks the process-wide dictionaries.
pub fn lock() -> MutexGuard<'static, Resources> {
    RESOURCES.lock()
}
