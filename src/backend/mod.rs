//! Rendering and input backends
//!
//! The player thread talks to the window system only through `Backend`.
//! A `BackendFactory` is handed to the presentation up front and opens a
//! fresh backend on the player thread every time playback starts, so
//! backends that must stay on the thread that created them (raylib) never
//! cross threads.

use crate::color::Color;
use crate::control::{Key, MouseButton};
use crate::drawable::OrderedDrawable;
use crate::error::Result;
use crate::resources::Resources;
use crate::window::WindowSettings;

pub mod headless;
#[cfg(feature = "raylib")]
mod raylib_backend;

pub use headless::{FrameRecord, HeadlessBackend, HeadlessFactory, LayerRecord};
#[cfg(feature = "raylib")]
pub use raylib_backend::{RaylibBackend, RaylibFactory};

/// One slide's worth of things to draw
#[derive(Debug)]
pub struct Layer<'a> {
    /// Background the layer is cleared to
    pub color: Color,
    /// Drawables with their ids, in drawing order
    pub items: Vec<(&'a str, &'a OrderedDrawable)>,
}

/// What a frame shows: the current slide composited with `alpha` over
/// either the previous slide or a black background.
#[derive(Debug)]
pub struct Frame<'a> {
    pub previous: Option<Layer<'a>>,
    pub current: Layer<'a>,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Closed,
    KeyPressed(Key),
    MouseButtonPressed(MouseButton),
}

pub trait Backend {
    /// Draws a frame. Called with the drawables and resources locked.
    fn render(&mut self, frame: &Frame<'_>, resources: &Resources) -> Result<()>;
    /// Presents the frame and paces the loop; called after the locks are released.
    fn display(&mut self) {}
    fn poll_events(&mut self) -> Vec<Event>;
    fn close(&mut self);
}

pub trait BackendFactory: Clone + Send + 'static {
    type Backend: Backend;

    fn open(&self, settings: &WindowSettings) -> Result<Self::Backend>;
}
