//! Drawable elements and the id-keyed registry slides refer to
//!
//! Every drawable carries its own `Transform`. The registry is shared with
//! the player thread, so the owner can keep moving, scaling or relabelling
//! elements (a progress bar, a status line) while the presentation plays.

use std::collections::HashMap;

use crate::color::Color;
use crate::constants::DEFAULT_CHARACTER_SIZE;
use crate::error::{Result, SplashError};
use crate::transform::{Transform, Vec2};

/// Axis-aligned (before transform) rectangle, optionally textured
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    pub size: Vec2,
    pub fill_color: Color,
    pub outline_color: Color,
    /// Outline drawn outside the rectangle; zero disables it
    pub outline_thickness: f32,
    /// Name of a texture resource stretched over the rectangle
    pub texture: Option<String>,
    pub transform: Transform,
}

impl RectangleShape {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            fill_color: Color::WHITE,
            outline_color: Color::WHITE,
            outline_thickness: 0.0,
            texture: None,
            transform: Transform::default(),
        }
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_outline(mut self, color: Color, thickness: f32) -> Self {
        self.outline_color = color;
        self.outline_thickness = thickness;
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// A whole texture drawn at its natural size
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: String,
    pub color: Color,
    pub transform: Transform,
}

impl Sprite {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            color: Color::WHITE,
            transform: Transform::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Single line of text; without a font the backend's default font is used
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub string: String,
    pub font: Option<String>,
    pub character_size: u32,
    pub fill_color: Color,
    pub transform: Transform,
}

impl Text {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            font: None,
            character_size: DEFAULT_CHARACTER_SIZE,
            fill_color: Color::WHITE,
            transform: Transform::default(),
        }
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_character_size(mut self, size: u32) -> Self {
        self.character_size = size;
        self
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Shape(RectangleShape),
    Sprite(Sprite),
    Text(Text),
}

impl Drawable {
    pub fn transform(&self) -> &Transform {
        match self {
            Drawable::Shape(shape) => &shape.transform,
            Drawable::Sprite(sprite) => &sprite.transform,
            Drawable::Text(text) => &text.transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            Drawable::Shape(shape) => &mut shape.transform,
            Drawable::Sprite(sprite) => &mut sprite.transform,
            Drawable::Text(text) => &mut text.transform,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Drawable::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<RectangleShape> for Drawable {
    fn from(shape: RectangleShape) -> Self {
        Drawable::Shape(shape)
    }
}

impl From<Sprite> for Drawable {
    fn from(sprite: Sprite) -> Self {
        Drawable::Sprite(sprite)
    }
}

impl From<Text> for Drawable {
    fn from(text: Text) -> Self {
        Drawable::Text(text)
    }
}

/// A drawable with its stacking order; lower z-indices are drawn first
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedDrawable {
    pub drawable: Drawable,
    pub z_index: i32,
}

/// Drawables keyed by id
#[derive(Debug, Default)]
pub struct Drawables {
    entries: HashMap<String, OrderedDrawable>,
}

impl Drawables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a drawable. An id that is already taken keeps its
    /// drawable; returns whether the new one was stored.
    pub fn insert(&mut self, id: &str, drawable: Drawable, z_index: i32) -> Result<bool> {
        check_id(id)?;
        if self.entries.contains_key(id) {
            log::debug!("drawable '{}' already registered", id);
            return Ok(false);
        }
        self.entries.insert(id.to_string(), OrderedDrawable { drawable, z_index });
        Ok(true)
    }

    pub fn remove(&mut self, id: &str) -> Option<OrderedDrawable> {
        self.entries.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&OrderedDrawable> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_z_index(&mut self, id: &str, z_index: i32) -> Result<()> {
        self.entry_mut(id)?.z_index = z_index;
        Ok(())
    }

    pub fn set_scale(&mut self, id: &str, scale: Vec2) -> Result<()> {
        self.transform_mut(id)?.scale = scale;
        Ok(())
    }

    pub fn set_position(&mut self, id: &str, position: Vec2) -> Result<()> {
        self.transform_mut(id)?.position = position;
        Ok(())
    }

    pub fn set_origin(&mut self, id: &str, origin: Vec2) -> Result<()> {
        self.transform_mut(id)?.origin = origin;
        Ok(())
    }

    pub fn set_rotation(&mut self, id: &str, rotation: f32) -> Result<()> {
        self.transform_mut(id)?.rotation = rotation;
        Ok(())
    }

    pub fn set_string(&mut self, id: &str, string: &str) -> Result<()> {
        let text = self
            .entry_mut(id)?
            .drawable
            .as_text_mut()
            .ok_or_else(|| SplashError::NotText(id.to_string()))?;
        text.string.clear();
        text.string.push_str(string);
        Ok(())
    }

    /// Resolves `ids` to drawables in drawing order: ascending z-index,
    /// ties kept in slide order. Ids with no drawable are skipped.
    pub fn sorted<'a>(&'a self, ids: &'a [String]) -> Vec<(&'a str, &'a OrderedDrawable)> {
        let mut items: Vec<_> = ids
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| (id.as_str(), entry)))
            .collect();
        items.sort_by_key(|(_, entry)| entry.z_index);
        items
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut OrderedDrawable> {
        check_id(id)?;
        self.entries
            .get_mut(id)
            .ok_or_else(|| SplashError::UnknownDrawable(id.to_string()))
    }

    fn transform_mut(&mut self, id: &str) -> Result<&mut Transform> {
        Ok(self.entry_mut(id)?.drawable.transform_mut())
    }
}

fn check_id(id: &str) -> Result<()> {
    if id.is_empty() {
        Err(SplashError::EmptyId)
    } else {
        Ok(())
    }
}
