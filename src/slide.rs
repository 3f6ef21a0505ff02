use std::time::Duration;

use crate::color::Color;
use crate::constants::*;
use crate::control::ControlMap;

/// One step of a presentation
///
/// A slide fades in over `transition`, then stays fully shown for
/// `duration` before the presentation moves on. A zero duration keeps the
/// slide up until `next` is called or a `Next` binding fires.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub color: Color,
    pub duration: Duration,
    pub transition: Duration,
    /// Drawable ids, drawn by z-index
    pub ids: Vec<String>,
    /// Bindings that take precedence over the global ones while this slide is current
    pub controls: ControlMap,
}

impl Default for Slide {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            duration: DEFAULT_SLIDE_DURATION,
            transition: DEFAULT_SLIDE_TRANSITION,
            ids: Vec::new(),
            controls: ControlMap::default(),
        }
    }
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    pub fn add(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
    }

    /// Removes every drawable id; timings and controls are kept.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_timed(&self) -> bool {
        !self.duration.is_zero()
    }

    /// Opacity of this slide `elapsed` after it became current.
    pub fn fade_alpha(&self, elapsed: Duration) -> f32 {
        if self.transition.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.transition.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ControlAction, Key};

    #[test]
    fn test_defaults() {
        let slide = Slide::new();
        assert_eq!(slide.color, Color::BLACK);
        assert_eq!(slide.duration, Duration::from_secs(5));
        assert_eq!(slide.transition, Duration::from_secs(2));
        assert!(slide.ids.is_empty());
        assert!(slide.is_timed());
    }

    #[test]
    fn test_clear_keeps_settings() {
        let mut slide = Slide::new().with_duration(Duration::ZERO);
        slide.controls.bind_key(ControlAction::Next, Key::Space);
        slide.add("photo");
        slide.add("bar");
        slide.clear();

        assert!(slide.ids.is_empty());
        assert!(!slide.is_timed());
        assert_eq!(slide.controls.key_action(Key::Space), ControlAction::Next);
    }

    #[test]
    fn test_fade_alpha() {
        let slide = Slide::new().with_transition(Duration::from_secs(2));
        assert_eq!(slide.fade_alpha(Duration::ZERO), 0.0);
        assert!((slide.fade_alpha(Duration::from_millis(500)) - 0.25).abs() < 1e-6);
        assert_eq!(slide.fade_alpha(Duration::from_secs(3)), 1.0);
    }

    #[test]
    fn test_fade_alpha_without_transition() {
        let slide = Slide::new().with_transition(Duration::ZERO);
        assert_eq!(slide.fade_alpha(Duration::ZERO), 1.0);
    }
}
