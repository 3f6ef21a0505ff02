//! Error types for presentation setup and playback

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for splash operations
#[derive(Debug, Error)]
pub enum SplashError {
    /// The presentation is playing and the operation would change shared state
    #[error("operation refused while the splash is playing")]
    Playing,
    /// Drawable ids must be non-empty
    #[error("drawable id must not be empty")]
    EmptyId,
    /// No drawable registered under this id
    #[error("unknown drawable '{0}'")]
    UnknownDrawable(String),
    /// Text operation on a drawable that is not a text
    #[error("drawable '{0}' is not a text")]
    NotText(String),
    /// Slide index past the end of the slide list
    #[error("slide index {index} out of range ({count} slides)")]
    SlideOutOfRange { index: usize, count: usize },
    /// Reading an asset or directory failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// In-memory asset data not usable
    #[error("invalid asset data: {0}")]
    InvalidAsset(String),
    /// Asset file contents or format not usable
    #[error("unsupported asset {}: {reason}", path.display())]
    UnsupportedAsset { path: PathBuf, reason: String },
    /// The graphics backend failed to open a window or render a frame
    #[error("backend error: {0}")]
    Backend(String),
    /// The player thread could not be started
    #[error("failed to spawn player thread: {0}")]
    Spawn(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, SplashError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_display_and_source() {
        let err = SplashError::Io {
            path: PathBuf::from("fonts/missing.ttf"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("fonts/missing.ttf"));
        assert!(msg.contains("no such file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_out_of_range_display() {
        let err = SplashError::SlideOutOfRange { index: 4, count: 2 };
        assert_eq!(err.to_string(), "slide index 4 out of range (2 slides)");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_drawable_errors_name_the_id() {
        assert!(SplashError::UnknownDrawable("logo".into()).to_string().contains("logo"));
        assert!(SplashError::NotText("bar".into()).to_string().contains("bar"));
    }

    #[test]
    fn test_invalid_asset_display() {
        let err = SplashError::InvalidAsset("empty image data".into());
        assert_eq!(err.to_string(), "invalid asset data: empty image data");
    }
}
