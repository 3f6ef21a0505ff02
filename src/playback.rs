//! The player thread
//!
//! One loop iteration is one frame: compose the previous and current slide,
//! hand them to the backend, react to input, then check the slide timers
//! and the control flags set by the owning thread.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::backend::{Backend, BackendFactory, Event, Frame, Layer};
use crate::control::{self, ControlAction, ControlMap};
use crate::drawable::Drawables;
use crate::resources;
use crate::slide::Slide;
use crate::state::{PlayState, SlideState};
use crate::window::WindowSettings;

/// Requests from the owning thread, checked once per frame
#[derive(Debug, Default)]
pub(crate) struct Controls {
    pub move_on: bool,
    pub skip: bool,
    pub quit: bool,
}

#[derive(Debug)]
pub(crate) struct Clock {
    started: Instant,
}

impl Clock {
    fn new() -> Self {
        Self { started: Instant::now() }
    }

    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// State shared between the owning thread and the player thread
#[derive(Debug)]
pub(crate) struct Shared {
    pub play_state: Mutex<PlayState>,
    pub slide_state: Mutex<SlideState>,
    pub controls: Mutex<Controls>,
    pub clock: Mutex<Clock>,
    pub current_index: Mutex<usize>,
    pub drawables: Mutex<Drawables>,
    pub window: Mutex<WindowSettings>,
}

impl Shared {
    pub fn new(window: WindowSettings) -> Self {
        Self {
            play_state: Mutex::new(PlayState::Ready),
            slide_state: Mutex::new(SlideState::In),
            controls: Mutex::new(Controls::default()),
            clock: Mutex::new(Clock::new()),
            current_index: Mutex::new(0),
            drawables: Mutex::new(Drawables::new()),
            window: Mutex::new(window),
        }
    }

    pub fn play_state(&self) -> PlayState {
        *self.play_state.lock()
    }

    pub fn set_play_state(&self, state: PlayState) {
        *self.play_state.lock() = state;
    }

    pub fn slide_state(&self) -> SlideState {
        *self.slide_state.lock()
    }

    pub fn set_slide_state(&self, state: SlideState) {
        *self.slide_state.lock() = state;
    }

    pub fn slide_time(&self) -> Duration {
        self.clock.lock().elapsed()
    }

    /// Asks the player to move on; the next slide starts fading in.
    pub fn next(&self) {
        self.controls.lock().move_on = true;
        self.set_slide_state(SlideState::In);
    }
}

/// What a playback run shows, fixed when playback starts
pub(crate) struct Program {
    pub slides: Vec<Slide>,
    pub globals: ControlMap,
}

/// Player thread entry point
pub(crate) fn run<F: BackendFactory>(factory: F, shared: Arc<Shared>, program: Program) {
    let settings = shared.window.lock().clone();
    let end = match factory.open(&settings) {
        Ok(mut backend) => {
            let end = play(&mut backend, &shared, &program);
            backend.close();
            end
        }
        Err(e) => {
            log::error!("failed to open splash window: {}", e);
            PlayState::Quit
        }
    };
    shared.set_play_state(end);
    log::info!("splash ended: {:?}", end);
}

fn play<B: Backend>(backend: &mut B, shared: &Shared, program: &Program) -> PlayState {
    let slides = &program.slides;
    let mut current = 0;
    let mut previous: Option<usize> = None;
    shared.clock.lock().restart();

    loop {
        let slide = &slides[current];
        let slide_state = shared.slide_state();

        {
            let drawables = shared.drawables.lock();
            let resources = resources::lock();
            let frame = Frame {
                previous: previous
                    .filter(|_| slide_state == SlideState::In)
                    .map(|index| Layer {
                        color: slides[index].color,
                        items: drawables.sorted(&slides[index].ids),
                    }),
                current: Layer {
                    color: slide.color,
                    items: drawables.sorted(&slide.ids),
                },
                alpha: match slide_state {
                    SlideState::In => slide.fade_alpha(shared.slide_time()),
                    SlideState::Show => 1.0,
                },
            };
            if let Err(e) = backend.render(&frame, &resources) {
                log::error!("failed to render splash frame: {}", e);
                return PlayState::Quit;
            }
        }
        backend.display();

        for event in backend.poll_events() {
            let tables = [&slide.controls, &program.globals];
            let showing = shared.slide_state() == SlideState::Show;
            let action = match event {
                Event::Closed => Some(ControlAction::Quit),
                Event::KeyPressed(key) => control::resolve_key(&tables, key, showing),
                Event::MouseButtonPressed(button) => control::resolve_mouse(&tables, button, showing),
            };
            match action {
                Some(ControlAction::Quit) => return PlayState::Quit,
                Some(ControlAction::Skip) => return PlayState::Finished,
                Some(ControlAction::Next) => shared.next(),
                _ => {}
            }
        }

        let mut clock = shared.clock.lock();

        let move_on = shared.controls.lock().move_on;
        if !move_on {
            let elapsed = clock.elapsed();
            match shared.slide_state() {
                SlideState::In => {
                    if slide.transition.is_zero() || elapsed >= slide.transition {
                        shared.set_slide_state(SlideState::Show);
                    }
                }
                SlideState::Show => {
                    if slide.is_timed() && elapsed >= slide.transition + slide.duration {
                        shared.next();
                    }
                }
            }
        }

        let mut controls = shared.controls.lock();
        if controls.skip {
            return PlayState::Finished;
        }
        if controls.quit {
            return PlayState::Quit;
        }

        if controls.move_on {
            controls.move_on = false;
            clock.restart();
            previous = Some(current);
            current += 1;
            if current == slides.len() {
                return PlayState::Finished;
            }
            *shared.current_index.lock() = current;
            log::debug!("splash moved to slide {}", current);
        }
    }
}
