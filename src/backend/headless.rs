//! Windowless backend
//!
//! Records what each frame would show and replays injected input events.
//! Useful to drive presentations in tests or on machines without a display.

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::backend::{Backend, BackendFactory, Event, Frame, Layer};
use crate::color::Color;
use crate::constants::{FRAME_INTERVAL, MAX_RECORDED_FRAMES};
use crate::error::{Result, SplashError};
use crate::resources::Resources;
use crate::window::WindowSettings;

/// Summary of a drawn layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRecord {
    pub color: Color,
    /// Drawable ids in drawing order
    pub ids: Vec<String>,
}

impl From<&Layer<'_>> for LayerRecord {
    fn from(layer: &Layer<'_>) -> Self {
        Self {
            color: layer.color,
            ids: layer.items.iter().map(|(id, _)| id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub previous: Option<LayerRecord>,
    pub current: LayerRecord,
    pub alpha: f32,
}

#[derive(Debug, Default)]
struct Recorder {
    events: Mutex<VecDeque<Event>>,
    frames: Mutex<VecDeque<FrameRecord>>,
    opened: Mutex<Vec<WindowSettings>>,
    closed: Mutex<usize>,
}

#[derive(Debug, Clone)]
pub struct HeadlessFactory {
    recorder: Arc<Recorder>,
    frame_interval: Duration,
    fail_open: Option<String>,
}

impl Default for HeadlessFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self {
            recorder: Arc::new(Recorder::default()),
            frame_interval: FRAME_INTERVAL,
            fail_open: None,
        }
    }

    /// Time `display` sleeps per frame, standing in for vsync.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Makes every `open` fail with `reason`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.fail_open = Some(reason.into());
        self
    }

    /// Queues an event for the next `poll_events`.
    pub fn push_event(&self, event: Event) {
        self.recorder.events.lock().push_back(event);
    }

    /// Most recent frames, oldest first
    pub fn frames(&self) -> Vec<FrameRecord> {
        self.recorder.frames.lock().iter().cloned().collect()
    }

    pub fn last_frame(&self) -> Option<FrameRecord> {
        self.recorder.frames.lock().back().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.recorder.frames.lock().len()
    }

    /// Settings of every window opened so far
    pub fn opened(&self) -> Vec<WindowSettings> {
        self.recorder.opened.lock().clone()
    }

    pub fn close_count(&self) -> usize {
        *self.recorder.closed.lock()
    }
}

impl BackendFactory for HeadlessFactory {
    type Backend = HeadlessBackend;

    fn open(&self, settings: &WindowSettings) -> Result<HeadlessBackend> {
        if let Some(reason) = &self.fail_open {
            return Err(SplashError::Backend(reason.clone()));
        }
        self.recorder.opened.lock().push(settings.clone());
        Ok(HeadlessBackend {
            recorder: Arc::clone(&self.recorder),
            frame_interval: self.frame_interval,
            open: true,
        })
    }
}

#[derive(Debug)]
pub struct HeadlessBackend {
    recorder: Arc<Recorder>,
    frame_interval: Duration,
    open: bool,
}

impl Backend for HeadlessBackend {
    fn render(&mut self, frame: &Frame<'_>, _resources: &Resources) -> Result<()> {
        if !self.open {
            return Err(SplashError::Backend("window is closed".to_string()));
        }
        let record = FrameRecord {
            previous: frame.previous.as_ref().map(LayerRecord::from),
            current: LayerRecord::from(&frame.current),
            alpha: frame.alpha,
        };
        let mut frames = self.recorder.frames.lock();
        if frames.len() == MAX_RECORDED_FRAMES {
            frames.pop_front();
        }
        frames.push_back(record);
        Ok(())
    }

    fn display(&mut self) {
        if !self.frame_interval.is_zero() {
            thread::sleep(self.frame_interval);
        }
    }

    fn poll_events(&mut self) -> Vec<Event> {
        self.recorder.events.lock().drain(..).collect()
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            *self.recorder.closed.lock() += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Key;
    use crate::drawable::{Drawables, Text};

    #[test]
    fn test_records_frames_and_events() {
        let factory = HeadlessFactory::new().with_frame_interval(Duration::ZERO);
        let mut backend = factory.open(&WindowSettings::new(800, 600, "Loading")).unwrap();
        assert_eq!(factory.opened()[0].title, "Loading");

        let mut drawables = Drawables::new();
        drawables.insert("label", Text::new("hi").into(), 0).unwrap();
        let ids = vec!["label".to_string()];
        let frame = Frame {
            previous: None,
            current: Layer { color: Color::BLUE, items: drawables.sorted(&ids) },
            alpha: 0.5,
        };
        backend.render(&frame, &Resources::default()).unwrap();
        backend.display();

        let record = factory.last_frame().unwrap();
        assert_eq!(record.current.ids, vec!["label"]);
        assert_eq!(record.current.color, Color::BLUE);
        assert_eq!(record.alpha, 0.5);

        factory.push_event(Event::KeyPressed(Key::Escape));
        assert_eq!(backend.poll_events(), vec![Event::KeyPressed(Key::Escape)]);
        assert!(backend.poll_events().is_empty());
    }

    #[test]
    fn test_close_is_counted_once() {
        let factory = HeadlessFactory::new();
        let mut backend = factory.open(&WindowSettings::default()).unwrap();
        backend.close();
        backend.close();
        assert_eq!(factory.close_count(), 1);

        let frame = Frame {
            previous: None,
            current: Layer { color: Color::BLACK, items: Vec::new() },
            alpha: 1.0,
        };
        assert!(backend.render(&frame, &Resources::default()).is_err());
    }

    #[test]
    fn test_failing_factory() {
        let factory = HeadlessFactory::new().failing("no display");
        match factory.open(&WindowSettings::default()) {
            Err(SplashError::Backend(reason)) => assert_eq!(reason, "no display"),
            other => panic!("Expected backend error, got {:?}", other.map(|_| ())),
        }
        assert!(factory.opened().is_empty());
    }
}
