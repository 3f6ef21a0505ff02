//! Timed splash-screen slideshows
//!
//! A [`Splash`] holds a list of slides (a background color, a fade-in
//! time, a display time and the ids of the drawables to show) and plays
//! them on a background thread that owns the window. The application
//! keeps working meanwhile, updating drawables such as a progress bar and
//! steering the presentation through `next`, `skip` and `quit`.
//!
//! ```no_run
//! use std::time::Duration;
//! use splashdeck::{HeadlessFactory, Slide, Splash, Text, Vec2, WindowSettings};
//!
//! let mut splash = Splash::with_settings(HeadlessFactory::new(), WindowSettings::new(800, 600, "Loading"));
//! splash.add_drawable("status", Text::new("Loading..."), 0).unwrap();
//!
//! let mut slide = Slide::new().with_duration(Duration::ZERO);
//! slide.add("status");
//! splash.add_slide(slide).unwrap();
//! splash.play().unwrap();
//!
//! // ... load things, then let the presentation finish
//! splash.set_drawable_position("status", Vec2::new(10.0, 10.0)).unwrap();
//! splash.next();
//! splash.wait();
//! ```

pub mod backend;
pub mod color;
pub mod constants;
pub mod control;
pub mod drawable;
pub mod error;
mod playback;
pub mod resources;
pub mod slide;
pub mod splash;
pub mod state;
pub mod texture_loader;
pub mod transform;
pub mod window;

pub use backend::{Backend, BackendFactory, Event, Frame, HeadlessFactory, Layer};
#[cfg(feature = "raylib")]
pub use backend::RaylibFactory;
pub use color::Color;
pub use control::{ControlAction, Key, MouseButton, MouseButtons};
pub use drawable::{Drawable, RectangleShape, Sprite, Text};
pub use error::{Result, SplashError};
pub use resources::{Font, Texture};
pub use slide::Slide;
pub use splash::Splash;
pub use state::PlayState;
pub use transform::{Transform, Vec2};
pub use window::{WindowSettings, WindowStyle};
