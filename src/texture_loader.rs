use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};

use crate::error::{Result, SplashError};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tga", "qoi"];
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Lowercased extension of `path`, empty when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_image(path: &Path) -> bool {
    IMAGE_EXTENSIONS.contains(&extension_of(path).as_str())
}

pub fn is_font(path: &Path) -> bool {
    FONT_EXTENSIONS.contains(&extension_of(path).as_str())
}

// --- Helper: Load and Sort Asset Paths ---
/// Image and font files directly inside `dir_path`, sorted by file name.
pub fn load_sorted_asset_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| SplashError::Io { path: dir_path.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && (is_image(&path) || is_font(&path)) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        return Err(SplashError::UnsupportedAsset {
            path: dir_path.to_path_buf(),
            reason: "no image or font files found".to_string(),
        });
    }
    Ok(paths)
}

/// EXIF orientation of a JPEG (1 = upright). Anything unreadable counts as upright.
pub fn read_orientation(file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|field| &field.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            // Not fatal: the image is used as stored
            log::debug!("no EXIF orientation: {}", e);
            1
        }
    }
}

// --- Decode Image, Apply EXIF Rotation, Create Texture ---
#[cfg(feature = "raylib")]
pub fn upload_texture(
    rl: &mut raylib::prelude::RaylibHandle,
    thread: &raylib::prelude::RaylibThread,
    texture: &crate::resources::Texture,
) -> std::result::Result<raylib::prelude::Texture2D, String> {
    let mut image = raylib::prelude::Image::load_image_from_mem(&format!(".{}", texture.format()), texture.data())
        .map_err(|e| format!("failed to decode image data: {}", e))?;

    // Apply rotation based on orientation value
    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips, ignored here.
    match texture.orientation() {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| format!("failed to create texture: {}", e))
}

#[cfg(feature = "raylib")]
pub fn upload_font(
    rl: &mut raylib::prelude::RaylibHandle,
    thread: &raylib::prelude::RaylibThread,
    font: &crate::resources::Font,
) -> std::result::Result<raylib::prelude::Font, String> {
    rl.load_font_from_memory(
        thread,
        &format!(".{}", font.format()),
        font.data(),
        crate::constants::FONT_LOAD_SIZE,
        None,
    )
    .map_err(|e| format!("failed to create font: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_checks() {
        assert!(is_image(Path::new("photos/Sun.JPG")));
        assert!(is_font(Path::new("fonts/arial.ttf")));
        assert!(is_font(Path::new("fonts/Noto.TTC")));
        assert!(!is_image(Path::new("notes.txt")));
        assert_eq!(extension_of(Path::new("README")), "");
    }

    #[test]
    fn test_sorted_asset_paths() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.ttf", "c.txt", "d.jpg"] {
            fs::write(dir.path().join(name), b"data").unwrap();
        }
        fs::create_dir(dir.path().join("e.png")).unwrap();

        let names: Vec<String> = load_sorted_asset_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.ttf", "b.png", "d.jpg"]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_sorted_asset_paths(dir.path()),
            Err(SplashError::UnsupportedAsset { .. })
        ));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_sorted_asset_paths(&dir.path().join("nope")),
            Err(SplashError::Io { .. })
        ));
    }

    #[test]
    fn test_orientation_defaults_to_upright() {
        assert_eq!(read_orientation(b"definitely not a jpeg"), 1);
    }
}
