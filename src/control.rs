//! Keyboard and mouse bindings for presentation control
//!
//! Bindings live in two tables: a global one on the presentation and one
//! per slide. While playing, the current slide's table is consulted before
//! the global table.

use std::collections::{BTreeMap, HashMap};

use bitflags::bitflags;

/// What an input binding does during playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlAction {
    None,
    /// Advance to the next slide (honoured only once the slide has faded in)
    Next,
    /// End the presentation as finished
    Skip,
    /// End the presentation as quit
    Quit,
}

bitflags! {
    /// Set of mouse buttons a control action reacts to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1;
        const RIGHT = 2;
        const MIDDLE = 4;
    }
}

/// A physical mouse button reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side/extra buttons; never match a binding
    Other,
}

impl MouseButton {
    pub fn bits(self) -> MouseButtons {
        match self {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
            MouseButton::Other => MouseButtons::empty(),
        }
    }
}

/// Keyboard keys the backends report
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Unknown,
}

/// One table of key and mouse bindings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlMap {
    keys: HashMap<Key, ControlAction>,
    mouse_buttons: BTreeMap<ControlAction, MouseButtons>,
}

impl ControlMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `action` unless the key is already bound.
    /// Returns whether the binding was added.
    pub fn bind_key(&mut self, action: ControlAction, key: Key) -> bool {
        if self.keys.contains_key(&key) {
            return false;
        }
        self.keys.insert(key, action);
        true
    }

    pub fn unbind_key(&mut self, key: Key) -> Option<ControlAction> {
        self.keys.remove(&key)
    }

    pub fn key_action(&self, key: Key) -> ControlAction {
        self.keys.get(&key).copied().unwrap_or(ControlAction::None)
    }

    /// Replaces the mouse buttons that trigger `action`.
    pub fn set_mouse_buttons(&mut self, action: ControlAction, buttons: MouseButtons) {
        self.mouse_buttons.insert(action, buttons);
    }

    pub fn mouse_buttons(&self, action: ControlAction) -> MouseButtons {
        self.mouse_buttons.get(&action).copied().unwrap_or_default()
    }

    /// Actions bound to `button`, in `ControlAction` order.
    fn mouse_actions(&self, button: MouseButton) -> impl Iterator<Item = ControlAction> + '_ {
        let bits = button.bits();
        self.mouse_buttons
            .iter()
            .filter(move |(_, buttons)| !bits.is_empty() && buttons.contains(bits))
            .map(|(action, _)| *action)
    }
}

/// Resolves a key press against `tables` (highest priority first).
///
/// `showing` tells whether the current slide has finished fading in; a
/// `Next` binding is ignored before that and the lookup carries on.
pub(crate) fn resolve_key(tables: &[&ControlMap], key: Key, showing: bool) -> Option<ControlAction> {
    tables
        .iter()
        .find_map(|table| effective(table.key_action(key), showing))
}

/// Resolves a mouse press the same way as `resolve_key`.
pub(crate) fn resolve_mouse(tables: &[&ControlMap], button: MouseButton, showing: bool) -> Option<ControlAction> {
    tables
        .iter()
        .find_map(|table| table.mouse_actions(button).find_map(|action| effective(action, showing)))
}

fn effective(action: ControlAction, showing: bool) -> Option<ControlAction> {
    match action {
        ControlAction::Quit | ControlAction::Skip => Some(action),
        ControlAction::Next if showing => Some(action),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_key_binding_wins() {
        let mut map = ControlMap::new();
        assert!(map.bind_key(ControlAction::Quit, Key::Escape));
        assert!(!map.bind_key(ControlAction::Next, Key::Escape));
        assert_eq!(map.key_action(Key::Escape), ControlAction::Quit);
        assert_eq!(map.key_action(Key::Space), ControlAction::None);

        assert_eq!(map.unbind_key(Key::Escape), Some(ControlAction::Quit));
        assert!(map.bind_key(ControlAction::Next, Key::Escape));
    }

    #[test]
    fn test_mouse_buttons_default_empty() {
        let mut map = ControlMap::new();
        assert_eq!(map.mouse_buttons(ControlAction::Next), MouseButtons::empty());
        map.set_mouse_buttons(ControlAction::Next, MouseButtons::LEFT | MouseButtons::RIGHT);
        assert_eq!(map.mouse_buttons(ControlAction::Next), MouseButtons::LEFT | MouseButtons::RIGHT);
    }

    #[test]
    fn test_slide_table_takes_precedence() {
        let mut slide = ControlMap::new();
        let mut global = ControlMap::new();
        slide.bind_key(ControlAction::Skip, Key::Space);
        global.bind_key(ControlAction::Quit, Key::Space);

        assert_eq!(resolve_key(&[&slide, &global], Key::Space, false), Some(ControlAction::Skip));
        assert_eq!(resolve_key(&[&global], Key::Space, false), Some(ControlAction::Quit));
        assert_eq!(resolve_key(&[&slide, &global], Key::Enter, true), None);
    }

    #[test]
    fn test_next_waits_for_fade_in() {
        let mut slide = ControlMap::new();
        let mut global = ControlMap::new();
        slide.bind_key(ControlAction::Next, Key::Space);
        global.bind_key(ControlAction::Quit, Key::Space);

        // An ignored Next falls through to the global table
        assert_eq!(resolve_key(&[&slide, &global], Key::Space, false), Some(ControlAction::Quit));
        assert_eq!(resolve_key(&[&slide, &global], Key::Space, true), Some(ControlAction::Next));
        assert_eq!(resolve_key(&[&slide], Key::Space, false), None);
    }

    #[test]
    fn test_mouse_resolution() {
        let mut global = ControlMap::new();
        global.set_mouse_buttons(ControlAction::Next, MouseButtons::LEFT | MouseButtons::MIDDLE);
        global.set_mouse_buttons(ControlAction::Quit, MouseButtons::RIGHT);

        assert_eq!(resolve_mouse(&[&global], MouseButton::Left, true), Some(ControlAction::Next));
        assert_eq!(resolve_mouse(&[&global], MouseButton::Middle, false), None);
        assert_eq!(resolve_mouse(&[&global], MouseButton::Right, false), Some(ControlAction::Quit));
    }

    #[test]
    fn test_mouse_order_and_slide_precedence() {
        let mut slide = ControlMap::new();
        let mut global = ControlMap::new();
        slide.set_mouse_buttons(ControlAction::Quit, MouseButtons::LEFT);
        slide.set_mouse_buttons(ControlAction::Next, MouseButtons::LEFT);
        global.set_mouse_buttons(ControlAction::Skip, MouseButtons::LEFT);

        // Next is checked before Quit, but only once the slide is shown
        assert_eq!(resolve_mouse(&[&slide, &global], MouseButton::Left, true), Some(ControlAction::Next));
        assert_eq!(resolve_mouse(&[&slide, &global], MouseButton::Left, false), Some(ControlAction::Quit));

        let empty = ControlMap::new();
        assert_eq!(resolve_mouse(&[&empty, &global], MouseButton::Left, true), Some(ControlAction::Skip));
    }

    #[test]
    fn test_other_mouse_buttons_never_match() {
        let mut global = ControlMap::new();
        global.set_mouse_buttons(ControlAction::Quit, MouseButtons::all());
        global.set_mouse_buttons(ControlAction::Skip, MouseButtons::empty());
        assert_eq!(resolve_mouse(&[&global], MouseButton::Other, true), None);
    }

    #[test]
    fn test_none_binding_is_inert() {
        let mut global = ControlMap::new();
        global.bind_key(ControlAction::None, Key::Q);
        global.set_mouse_buttons(ControlAction::None, MouseButtons::LEFT);
        assert_eq!(resolve_key(&[&global], Key::Q, true), None);
        assert_eq!(resolve_mouse(&[&global], MouseButton::Left, true), None);
    }
}
