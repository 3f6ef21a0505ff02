use std::time::Duration;

pub const FRAME_RATE_LIMIT: u32 = 60;                                         // Frames per second the player aims for
pub const FRAME_INTERVAL: Duration = Duration::from_micros(1_000_000 / FRAME_RATE_LIMIT as u64);

pub const DEFAULT_SLIDE_DURATION: Duration = Duration::from_secs(5);          // How long a slide stays fully shown
pub const DEFAULT_SLIDE_TRANSITION: Duration = Duration::from_secs(2);        // Fade-in time of a slide

pub const DEFAULT_WINDOW_WIDTH: u32 = 64;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 64;

pub const DEFAULT_CHARACTER_SIZE: u32 = 30;                                   // Text size when none is given (pixels)
pub const FONT_LOAD_SIZE: i32 = 64;                                           // Glyph atlas size used when uploading fonts

pub const MAX_RECORDED_FRAMES: usize = 4096;                                  // Frames kept by the headless backend
