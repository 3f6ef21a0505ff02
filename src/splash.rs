//! The presentation object owned by the application thread
//!
//! `Splash` collects slides, drawables and bindings, then plays them on a
//! player thread with `play`. While it plays, only the drawables and the
//! `next`/`skip`/`quit` hooks may change; everything else is refused with
//! `SplashError::Playing` until the presentation has ended.

use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::backend::BackendFactory;
use crate::control::{ControlAction, ControlMap, Key, MouseButtons};
use crate::drawable::Drawable;
use crate::error::{Result, SplashError};
use crate::playback::{self, Controls, Program, Shared};
use crate::resources::{self, Font, Texture};
use crate::slide::Slide;
use crate::state::{PlayState, SlideState};
use crate::transform::Vec2;
use crate::window::WindowSettings;

pub struct Splash<F: BackendFactory> {
    factory: F,
    shared: Arc<Shared>,
    slides: Vec<Slide>,
    globals: ControlMap,
    player: Option<JoinHandle<()>>,
}

impl<F: BackendFactory> Splash<F> {
    pub fn new(factory: F) -> Self {
        Self::with_settings(factory, WindowSettings::default())
    }

    pub fn with_settings(factory: F, settings: WindowSettings) -> Self {
        Self {
            factory,
            shared: Arc::new(Shared::new(settings)),
            slides: Vec::new(),
            globals: ControlMap::new(),
            player: None,
        }
    }

    /// Window used by the next `play`.
    pub fn setup_window(&self, settings: WindowSettings) {
        *self.shared.window.lock() = settings;
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.shared.window.lock().size()
    }

    // --- Playback ---

    /// Starts playing on a new player thread.
    ///
    /// Does nothing while already playing or when there are no slides.
    pub fn play(&mut self) -> Result<()> {
        if self.is_playing() || self.slides.is_empty() {
            return Ok(());
        }
        self.join_player();

        *self.shared.current_index.lock() = 0;
        *self.shared.controls.lock() = Controls::default();
        self.shared.clock.lock().restart();
        self.shared.set_slide_state(SlideState::In);
        self.shared.set_play_state(PlayState::Playing);

        let program = Program {
            slides: self.slides.clone(),
            globals: self.globals.clone(),
        };
        let factory = self.factory.clone();
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("splash-player".to_string())
            .spawn(move || playback::run(factory, shared, program));
        match spawned {
            Ok(handle) => {
                self.player = Some(handle);
                log::info!("splash playing {} slides", self.slides.len());
                Ok(())
            }
            Err(e) => {
                self.shared.set_play_state(PlayState::Ready);
                Err(SplashError::Spawn(e))
            }
        }
    }

    /// Moves on to the next slide, even one that has no timer.
    pub fn next(&self) {
        self.shared.next();
    }

    /// Ends playback as `Finished`.
    pub fn skip(&self) {
        self.shared.controls.lock().skip = true;
    }

    /// Ends playback as `Quit`.
    pub fn quit(&self) {
        self.shared.controls.lock().quit = true;
    }

    /// Blocks until the player thread has ended and returns how it ended.
    pub fn wait(&mut self) -> PlayState {
        self.join_player();
        self.play_state()
    }

    pub fn is_playing(&self) -> bool {
        self.play_state() == PlayState::Playing
    }

    pub fn play_state(&self) -> PlayState {
        self.shared.play_state()
    }

    /// Time since the current slide started fading in
    pub fn slide_time(&self) -> Duration {
        self.shared.slide_time()
    }

    pub fn current_slide_index(&self) -> usize {
        *self.shared.current_index.lock()
    }

    // --- Resources ---

    pub fn add_font(&self, name: &str, font: Font) -> Result<()> {
        self.ensure_stopped()?;
        resources::lock().insert_font(name, font);
        Ok(())
    }

    pub fn load_font(&self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_stopped()?;
        let font = Font::from_file(path.as_ref())?;
        let mut resources = resources::lock();
        self.ensure_stopped()?;
        resources.insert_font(name, font);
        log::debug!("loaded font '{}' from {}", name, path.as_ref().display());
        Ok(())
    }

    pub fn remove_font(&self, name: &str) -> Result<()> {
        self.ensure_stopped()?;
        resources::lock().remove_font(name);
        Ok(())
    }

    /// A copy of the named font; `None` while playing.
    pub fn font(&self, name: &str) -> Option<Font> {
        if self.is_playing() {
            return None;
        }
        resources::lock().font(name).cloned()
    }

    pub fn add_texture(&self, name: &str, texture: Texture) -> Result<()> {
        self.ensure_stopped()?;
        resources::lock().insert_texture(name, texture);
        Ok(())
    }

    pub fn load_texture(&self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_stopped()?;
        let texture = Texture::from_file(path.as_ref())?;
        let mut resources = resources::lock();
        self.ensure_stopped()?;
        resources.insert_texture(name, texture);
        log::debug!("loaded texture '{}' from {}", name, path.as_ref().display());
        Ok(())
    }

    pub fn remove_texture(&self, name: &str) -> Result<()> {
        self.ensure_stopped()?;
        resources::lock().remove_texture(name);
        Ok(())
    }

    /// A copy of the named texture; `None` while playing.
    pub fn texture(&self, name: &str) -> Option<Texture> {
        if self.is_playing() {
            return None;
        }
        resources::lock().texture(name).cloned()
    }

    /// Drops every font and texture, for all presentations.
    pub fn clear_all_resources(&self) -> Result<()> {
        self.ensure_stopped()?;
        resources::lock().clear();
        Ok(())
    }

    // --- Slides ---

    pub fn add_slide(&mut self, slide: Slide) -> Result<()> {
        self.ensure_stopped()?;
        self.slides.push(slide);
        Ok(())
    }

    pub fn clear_slides(&mut self) -> Result<()> {
        self.ensure_stopped()?;
        self.slides.clear();
        Ok(())
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    // --- Controls ---

    /// Binds `key` to `action` for every slide, unless the key is already bound.
    pub fn add_global_control_action(&mut self, action: ControlAction, key: Key) -> Result<()> {
        self.ensure_stopped()?;
        self.globals.bind_key(action, key);
        Ok(())
    }

    pub fn remove_global_control_action(&mut self, key: Key) -> Result<()> {
        self.ensure_stopped()?;
        self.globals.unbind_key(key);
        Ok(())
    }

    /// `ControlAction::None` when unbound or while playing.
    pub fn global_control_action(&self, key: Key) -> ControlAction {
        if self.is_playing() {
            return ControlAction::None;
        }
        self.globals.key_action(key)
    }

    pub fn set_global_mouse_buttons(&mut self, action: ControlAction, buttons: MouseButtons) -> Result<()> {
        self.ensure_stopped()?;
        self.globals.set_mouse_buttons(action, buttons);
        Ok(())
    }

    /// No buttons when unbound or while playing.
    pub fn global_mouse_buttons(&self, action: ControlAction) -> MouseButtons {
        if self.is_playing() {
            return MouseButtons::empty();
        }
        self.globals.mouse_buttons(action)
    }

    pub fn add_slide_control_action(&mut self, slide_index: usize, action: ControlAction, key: Key) -> Result<()> {
        self.slide_controls_mut(slide_index)?.bind_key(action, key);
        Ok(())
    }

    pub fn remove_slide_control_action(&mut self, slide_index: usize, key: Key) -> Result<()> {
        self.slide_controls_mut(slide_index)?.unbind_key(key);
        Ok(())
    }

    pub fn slide_control_action(&self, slide_index: usize, key: Key) -> Result<ControlAction> {
        let controls = self.slide_controls(slide_index)?;
        if self.is_playing() {
            return Ok(ControlAction::None);
        }
        Ok(controls.key_action(key))
    }

    pub fn set_slide_mouse_buttons(
        &mut self,
        slide_index: usize,
        action: ControlAction,
        buttons: MouseButtons,
    ) -> Result<()> {
        self.slide_controls_mut(slide_index)?.set_mouse_buttons(action, buttons);
        Ok(())
    }

    pub fn slide_mouse_buttons(&self, slide_index: usize, action: ControlAction) -> Result<MouseButtons> {
        let controls = self.slide_controls(slide_index)?;
        if self.is_playing() {
            return Ok(MouseButtons::empty());
        }
        Ok(controls.mouse_buttons(action))
    }

    // --- Drawables ---
    // These stay available during playback.

    /// Registers a drawable under `id`; an id already in use keeps its drawable.
    pub fn add_drawable(&self, id: &str, drawable: impl Into<Drawable>, z_index: i32) -> Result<()> {
        self.shared.drawables.lock().insert(id, drawable.into(), z_index)?;
        Ok(())
    }

    pub fn remove_drawable(&self, id: &str) -> Result<()> {
        self.shared
            .drawables
            .lock()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SplashError::UnknownDrawable(id.to_string()))
    }

    pub fn set_drawable_z_index(&self, id: &str, z_index: i32) -> Result<()> {
        self.shared.drawables.lock().set_z_index(id, z_index)
    }

    pub fn set_drawable_scale(&self, id: &str, scale: Vec2) -> Result<()> {
        self.shared.drawables.lock().set_scale(id, scale)
    }

    pub fn set_drawable_position(&self, id: &str, position: Vec2) -> Result<()> {
        self.shared.drawables.lock().set_position(id, position)
    }

    pub fn set_drawable_origin(&self, id: &str, origin: Vec2) -> Result<()> {
        self.shared.drawables.lock().set_origin(id, origin)
    }

    pub fn set_drawable_rotation(&self, id: &str, rotation: f32) -> Result<()> {
        self.shared.drawables.lock().set_rotation(id, rotation)
    }

    /// Replaces the string of a text drawable.
    pub fn set_drawable_string(&self, id: &str, string: &str) -> Result<()> {
        self.shared.drawables.lock().set_string(id, string)
    }

    // --- Helpers ---

    fn ensure_stopped(&self) -> Result<()> {
        if self.is_playing() {
            log::debug!("refusing change while the splash is playing");
            return Err(SplashError::Playing);
        }
        Ok(())
    }

    fn slide_controls(&self, index: usize) -> Result<&ControlMap> {
        let count = self.slides.len();
        self.slides
            .get(index)
            .map(|slide| &slide.controls)
            .ok_or(SplashError::SlideOutOfRange { index, count })
    }

    fn slide_controls_mut(&mut self, index: usize) -> Result<&mut ControlMap> {
        self.ensure_stopped()?;
        let count = self.slides.len();
        self.slides
            .get_mut(index)
            .map(|slide| &mut slide.controls)
            .ok_or(SplashError::SlideOutOfRange { index, count })
    }

    fn join_player(&mut self) {
        if let Some(handle) = self.player.take() {
            if handle.join().is_err() {
                log::error!("splash player thread panicked");
                self.shared.set_play_state(PlayState::Quit);
            }
        }
    }
}

impl<F: BackendFactory> Drop for Splash<F> {
    fn drop(&mut self) {
        self.join_player();
    }
}
