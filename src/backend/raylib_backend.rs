//! raylib window backend
//!
//! Both slides are drawn into their own render texture in `render`, while
//! the presentation holds its locks; `display` then blits the previous
//! slide and the current one, tinted with the fade alpha, to the screen.
//! raylib supports one window per process, so only one presentation can
//! play at a time with this backend.

use std::collections::{HashMap, HashSet};

use raylib::prelude::*;

use crate::backend::{Backend, BackendFactory, Event, Frame, Layer};
use crate::constants::FRAME_RATE_LIMIT;
use crate::control::{Key, MouseButton};
use crate::drawable::{Drawable, RectangleShape, Sprite, Text};
use crate::error::{Result, SplashError};
use crate::resources::Resources;
use crate::texture_loader::{upload_font, upload_texture};
use crate::transform::{Transform, Vec2};
use crate::window::{WindowSettings, WindowStyle};

const MOUSE_BUTTONS: [(raylib::consts::MouseButton, MouseButton); 5] = [
    (raylib::consts::MouseButton::MOUSE_BUTTON_LEFT, MouseButton::Left),
    (raylib::consts::MouseButton::MOUSE_BUTTON_RIGHT, MouseButton::Right),
    (raylib::consts::MouseButton::MOUSE_BUTTON_MIDDLE, MouseButton::Middle),
    (raylib::consts::MouseButton::MOUSE_BUTTON_SIDE, MouseButton::Other),
    (raylib::consts::MouseButton::MOUSE_BUTTON_EXTRA, MouseButton::Other),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RaylibFactory;

impl BackendFactory for RaylibFactory {
    type Backend = RaylibBackend;

    fn open(&self, settings: &WindowSettings) -> Result<RaylibBackend> {
        let mut builder = raylib::init();
        builder
            .size(settings.width as i32, settings.height as i32)
            .title(&settings.title);
        if !settings.style.intersects(WindowStyle::TITLEBAR | WindowStyle::CLOSE) {
            builder.undecorated();
        }
        if settings.style.contains(WindowStyle::RESIZE) {
            builder.resizable();
        }
        if settings.style.contains(WindowStyle::FULLSCREEN) {
            builder.fullscreen();
        }
        if settings.antialiasing > 0 {
            builder.msaa_4x();
        }

        let (mut rl, thread) = builder.build();
        rl.set_target_fps(FRAME_RATE_LIMIT);
        rl.set_trace_log(TraceLogLevel::LOG_ERROR);
        rl.set_exit_key(None);

        let previous = rl
            .load_render_texture(&thread, settings.width, settings.height)
            .map_err(|e| SplashError::Backend(format!("failed to create render texture: {}", e)))?;
        let current = rl
            .load_render_texture(&thread, settings.width, settings.height)
            .map_err(|e| SplashError::Backend(format!("failed to create render texture: {}", e)))?;

        log::debug!("opened {}x{} window '{}'", settings.width, settings.height, settings.title);
        Ok(RaylibBackend {
            assets: Assets::default(),
            targets: Some(Targets { previous, current }),
            has_previous: false,
            alpha: 1.0,
            thread,
            rl: Some(rl),
        })
    }
}

struct Targets {
    previous: RenderTexture2D,
    current: RenderTexture2D,
}

/// GPU copies of the resources a presentation has drawn so far
#[derive(Default)]
struct Assets {
    textures: HashMap<String, Texture2D>,
    fonts: HashMap<String, Font>,
    failed_textures: HashSet<String>,
    failed_fonts: HashSet<String>,
}

impl Assets {
    fn prepare(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, layer: &Layer<'_>, resources: &Resources) {
        for (_, entry) in &layer.items {
            match &entry.drawable {
                Drawable::Shape(RectangleShape { texture: Some(name), .. })
                | Drawable::Sprite(Sprite { texture: name, .. }) => {
                    self.ensure_texture(rl, thread, name, resources)
                }
                Drawable::Text(Text { font: Some(name), .. }) => self.ensure_font(rl, thread, name, resources),
                _ => {}
            }
        }
    }

    fn ensure_texture(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, name: &str, resources: &Resources) {
        if self.textures.contains_key(name) || self.failed_textures.contains(name) {
            return;
        }
        let Some(texture) = resources.texture(name) else {
            return;
        };
        match upload_texture(rl, thread, texture) {
            Ok(uploaded) => {
                self.textures.insert(name.to_string(), uploaded);
            }
            Err(e) => {
                log::warn!("texture '{}': {}", name, e);
                self.failed_textures.insert(name.to_string());
            }
        }
    }

    fn ensure_font(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, name: &str, resources: &Resources) {
        if self.fonts.contains_key(name) || self.failed_fonts.contains(name) {
            return;
        }
        let Some(font) = resources.font(name) else {
            return;
        };
        match upload_font(rl, thread, font) {
            Ok(uploaded) => {
                self.fonts.insert(name.to_string(), uploaded);
            }
            Err(e) => {
                log::warn!("font '{}': {}", name, e);
                self.failed_fonts.insert(name.to_string());
            }
        }
    }
}

/// A raylib window; GPU resources are declared before the handle so they
/// are released while the context still exists.
pub struct RaylibBackend {
    assets: Assets,
    targets: Option<Targets>,
    has_previous: bool,
    alpha: f32,
    thread: RaylibThread,
    rl: Option<RaylibHandle>,
}

impl Backend for RaylibBackend {
    fn render(&mut self, frame: &Frame<'_>, resources: &Resources) -> Result<()> {
        let (Some(rl), Some(targets)) = (self.rl.as_mut(), self.targets.as_mut()) else {
            return Err(SplashError::Backend("window is closed".to_string()));
        };

        if let Some(previous) = &frame.previous {
            self.assets.prepare(rl, &self.thread, previous, resources);
        }
        self.assets.prepare(rl, &self.thread, &frame.current, resources);

        let default_font = rl.get_font_default();
        {
            let mut d = rl.begin_texture_mode(&self.thread, &mut targets.current);
            draw_layer(&mut d, &frame.current, &self.assets, &default_font);
        }
        if let Some(previous) = &frame.previous {
            let mut d = rl.begin_texture_mode(&self.thread, &mut targets.previous);
            draw_layer(&mut d, previous, &self.assets, &default_font);
        }

        self.has_previous = frame.previous.is_some();
        self.alpha = frame.alpha.clamp(0.0, 1.0);
        Ok(())
    }

    fn display(&mut self) {
        let (Some(rl), Some(targets)) = (self.rl.as_mut(), self.targets.as_ref()) else {
            return;
        };
        let mut d = rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);

        let screen = Rectangle::new(0.0, 0.0, d.get_screen_width() as f32, d.get_screen_height() as f32);
        if self.has_previous {
            blit(&mut d, &targets.previous, screen, Color::WHITE);
        }
        let tint = Color::new(255, 255, 255, (255.0 * self.alpha) as u8);
        blit(&mut d, &targets.current, screen, tint);
        // Dropping the draw handle presents the frame and waits out the frame time
    }

    fn poll_events(&mut self) -> Vec<Event> {
        let Some(rl) = self.rl.as_mut() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        if rl.window_should_close() {
            events.push(Event::Closed);
        }
        while let Some(key) = rl.get_key_pressed() {
            events.push(Event::KeyPressed(map_key(key)));
        }
        for (button, mapped) in MOUSE_BUTTONS {
            if rl.is_mouse_button_pressed(button) {
                events.push(Event::MouseButtonPressed(mapped));
            }
        }
        events
    }

    fn close(&mut self) {
        if self.rl.is_some() {
            self.assets = Assets::default();
            self.targets = None;
            self.rl = None;
            log::debug!("window closed");
        }
    }
}

// Render textures are stored upside down
fn blit(d: &mut RaylibDrawHandle, target: &RenderTexture2D, screen: Rectangle, tint: Color) {
    d.draw_texture_pro(
        target,
        Rectangle::new(0.0, 0.0, target.width() as f32, -(target.height() as f32)),
        screen,
        Vector2::new(0.0, 0.0),
        0.0,
        tint,
    );
}

fn rl_color(color: crate::color::Color) -> Color {
    Color::new(color.r, color.g, color.b, color.a)
}

fn draw_layer<D: RaylibDraw>(d: &mut D, layer: &Layer<'_>, assets: &Assets, default_font: &WeakFont) {
    d.clear_background(rl_color(layer.color));
    for (_, entry) in &layer.items {
        match &entry.drawable {
            Drawable::Shape(shape) => draw_shape(d, shape, assets),
            Drawable::Sprite(sprite) => draw_sprite(d, sprite, assets),
            Drawable::Text(text) => draw_text(d, text, assets, default_font),
        }
    }
}

/// Destination rectangle and rotation origin for a local `width` x `height`
/// area whose top-left corner sits at local (`x`, `y`).
fn placement(t: &Transform, x: f32, y: f32, width: f32, height: f32) -> (Rectangle, Vector2) {
    let size = Vec2::new(width, height).scaled(t.scale);
    let pivot = t.pivot_offset(Vec2::new(x, y));
    (
        Rectangle::new(t.position.x, t.position.y, size.x, size.y),
        Vector2::new(pivot.x, pivot.y),
    )
}

fn draw_local_rect<D: RaylibDraw>(d: &mut D, t: &Transform, x: f32, y: f32, width: f32, height: f32, color: Color) {
    let (dest, origin) = placement(t, x, y, width, height);
    d.draw_rectangle_pro(dest, origin, t.rotation, color);
}

fn draw_shape<D: RaylibDraw>(d: &mut D, shape: &RectangleShape, assets: &Assets) {
    let t = &shape.transform;
    let (width, height) = (shape.size.x, shape.size.y);

    match shape.texture.as_ref().and_then(|name| assets.textures.get(name)) {
        Some(texture) => {
            let (dest, origin) = placement(t, 0.0, 0.0, width, height);
            let source = Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32);
            d.draw_texture_pro(texture, source, dest, origin, t.rotation, rl_color(shape.fill_color));
        }
        None if shape.fill_color.a > 0 => {
            draw_local_rect(d, t, 0.0, 0.0, width, height, rl_color(shape.fill_color));
        }
        None => {}
    }

    let thickness = shape.outline_thickness;
    if thickness > 0.0 && shape.outline_color.a > 0 {
        // Outline sits outside the rectangle: top, bottom, left, right
        let color = rl_color(shape.outline_color);
        draw_local_rect(d, t, -thickness, -thickness, width + 2.0 * thickness, thickness, color);
        draw_local_rect(d, t, -thickness, height, width + 2.0 * thickness, thickness, color);
        draw_local_rect(d, t, -thickness, 0.0, thickness, height, color);
        draw_local_rect(d, t, width, 0.0, thickness, height, color);
    }
}

fn draw_sprite<D: RaylibDraw>(d: &mut D, sprite: &Sprite, assets: &Assets) {
    let Some(texture) = assets.textures.get(&sprite.texture) else {
        return;
    };
    let t = &sprite.transform;
    let (width, height) = (texture.width() as f32, texture.height() as f32);
    let (dest, origin) = placement(t, 0.0, 0.0, width, height);
    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, width, height),
        dest,
        origin,
        t.rotation,
        rl_color(sprite.color),
    );
}

fn draw_text<D: RaylibDraw>(d: &mut D, text: &Text, assets: &Assets, default_font: &WeakFont) {
    let t = &text.transform;
    let size = text.character_size as f32 * t.scale.y;
    let spacing = size / 10.0;
    let position = Vector2::new(t.position.x, t.position.y);
    let pivot = t.pivot_offset(Vec2::ZERO);
    let origin = Vector2::new(pivot.x, pivot.y);
    let color = rl_color(text.fill_color);

    match text.font.as_ref().and_then(|name| assets.fonts.get(name)) {
        Some(font) => d.draw_text_pro(font, &text.string, position, origin, t.rotation, size, spacing, color),
        None => d.draw_text_pro(default_font, &text.string, position, origin, t.rotation, size, spacing, color),
    }
}

fn map_key(key: KeyboardKey) -> Key {
    use KeyboardKey::*;

    match key {
        KEY_A => Key::A,
        KEY_B => Key::B,
        KEY_C => Key::C,
        KEY_D => Key::D,
        KEY_E => Key::E,
        KEY_F => Key::F,
        KEY_G => Key::G,
        KEY_H => Key::H,
        KEY_I => Key::I,
        KEY_J => Key::J,
        KEY_K => Key::K,
        KEY_L => Key::L,
        KEY_M => Key::M,
        KEY_N => Key::N,
        KEY_O => Key::O,
        KEY_P => Key::P,
        KEY_Q => Key::Q,
        KEY_R => Key::R,
        KEY_S => Key::S,
        KEY_T => Key::T,
        KEY_U => Key::U,
        KEY_V => Key::V,
        KEY_W => Key::W,
        KEY_X => Key::X,
        KEY_Y => Key::Y,
        KEY_Z => Key::Z,
        KEY_ZERO => Key::Num0,
        KEY_ONE => Key::Num1,
        KEY_TWO => Key::Num2,
        KEY_THREE => Key::Num3,
        KEY_FOUR => Key::Num4,
        KEY_FIVE => Key::Num5,
        KEY_SIX => Key::Num6,
        KEY_SEVEN => Key::Num7,
        KEY_EIGHT => Key::Num8,
        KEY_NINE => Key::Num9,
        KEY_ESCAPE => Key::Escape,
        KEY_ENTER | KEY_KP_ENTER => Key::Enter,
        KEY_SPACE => Key::Space,
        KEY_TAB => Key::Tab,
        KEY_BACKSPACE => Key::Backspace,
        KEY_DELETE => Key::Delete,
        KEY_LEFT => Key::Left,
        KEY_RIGHT => Key::Right,
        KEY_UP => Key::Up,
        KEY_DOWN => Key::Down,
        KEY_HOME => Key::Home,
        KEY_END => Key::End,
        KEY_PAGE_UP => Key::PageUp,
        KEY_PAGE_DOWN => Key::PageDown,
        KEY_F1 => Key::F1,
        KEY_F2 => Key::F2,
        KEY_F3 => Key::F3,
        KEY_F4 => Key::F4,
        KEY_F5 => Key::F5,
        KEY_F6 => Key::F6,
        KEY_F7 => Key::F7,
        KEY_F8 => Key::F8,
        KEY_F9 => Key::F9,
        KEY_F10 => Key::F10,
        KEY_F11 => Key::F11,
        KEY_F12 => Key::F12,
        _ => Key::Unknown,
    }
}
