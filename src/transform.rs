//! Positioning of drawables
//!
//! A `Transform` places a drawable the way a 2D toolkit transformable does:
//! the local point at `origin` lands on `position`, the drawable is scaled
//! around that point and then rotated clockwise (y grows downwards) by
//! `rotation` degrees.

/// 2D vector in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise product
    pub fn scaled(self, factor: Vec2) -> Vec2 {
        Vec2::new(self.x * factor.x, self.y * factor.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Vec2::new(x, y)
    }
}

/// Position, origin, scale and rotation of a drawable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub origin: Vec2,
    pub scale: Vec2,
    /// Clockwise rotation in degrees
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }
}

impl Transform {
    /// Maps a point in the drawable's local space to window coordinates.
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let x = (local.x - self.origin.x) * self.scale.x;
        let y = (local.y - self.origin.y) * self.scale.y;
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Vec2::new(
            self.position.x + x * cos - y * sin,
            self.position.y + x * sin + y * cos,
        )
    }

    /// Distance, in scaled pixels, from the top-left corner of a local area
    /// starting at `corner` to the origin. Rotated draw calls taking a
    /// destination and a pivot get `position` and this offset.
    pub fn pivot_offset(&self, corner: Vec2) -> Vec2 {
        Vec2::new(self.origin.x - corner.x, self.origin.y - corner.y).scaled(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity() {
        let t = Transform::default();
        assert_close(t.apply(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_origin_lands_on_position() {
        let t = Transform {
            position: Vec2::new(400.0, 500.0),
            origin: Vec2::new(0.0, 25.0),
            scale: Vec2::new(0.5, 1.0),
            rotation: 30.0,
        };
        assert_close(t.apply(Vec2::new(0.0, 25.0)), Vec2::new(400.0, 500.0));
    }

    #[test]
    fn test_scale_then_rotate() {
        let t = Transform {
            scale: Vec2::new(2.0, 1.0),
            rotation: 90.0,
            ..Transform::default()
        };
        // (1, 0) scaled to (2, 0), rotated clockwise onto the y axis
        assert_close(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_pivot_offset_agrees_with_apply() {
        let mut t = Transform {
            position: Vec2::new(300.0, 200.0),
            origin: Vec2::new(10.0, 20.0),
            scale: Vec2::new(2.0, 0.5),
            rotation: 0.0,
        };
        let corner = Vec2::new(-5.0, 0.0);
        let offset = t.pivot_offset(corner);
        assert_close(offset, Vec2::new(30.0, 10.0));
        assert_close(t.apply(corner), Vec2::new(t.position.x - offset.x, t.position.y - offset.y));

        // Half a turn puts the corner on the other side of the pivot
        t.rotation = 180.0;
        assert_close(t.apply(corner), Vec2::new(t.position.x + offset.x, t.position.y + offset.y));
    }

    #[test]
    fn test_vec2_from_tuple() {
        let v: Vec2 = (1.5, -2.0).into();
        assert_eq!(v, Vec2::new(1.5, -2.0));
        assert_eq!(v.scaled(Vec2::new(2.0, 0.5)), Vec2::new(3.0, -1.0));
    }
}
