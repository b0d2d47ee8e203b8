use std::sync::{Mutex, PoisonError};

use enigo::{
    Axis, Button, Coordinate,
    Direction::{Click, Press, Release},
    Enigo, Key, Keyboard as _, Mouse as _, Settings,
};
use tracing::debug;

use super::{Keyboard, Pointer, ScreenGeometry};
use crate::error::ProviderError;
use crate::types::{Modifier, MouseButton, Point, ScreenSize};

/// Pointer, keyboard and screen geometry through enigo.
///
/// One enigo session is opened on first use and reused for every later
/// operation, so a long path does not reconnect per step. A failed open is
/// retried on the next call.
pub struct EnigoInput {
    session: Mutex<Option<Enigo>>,
}

impl Default for EnigoInput {
    fn default() -> Self {
        Self::new()
    }
}

impl EnigoInput {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }

    fn with_session<T>(
        &self,
        op: impl FnOnce(&mut Enigo) -> Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        let mut guard = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| ProviderError::Unavailable(format!("input: {e}")))?;
            debug!("opened input session");
            *guard = Some(enigo);
        }
        match guard.as_mut() {
            Some(enigo) => op(enigo),
            None => Err(ProviderError::Unavailable("input session closed".into())),
        }
    }

    #[cfg(test)]
    fn is_open(&self) -> bool {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

fn injection(e: enigo::InputError) -> ProviderError {
    ProviderError::Injection(e.to_string())
}

fn button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

fn modifier_key(modifier: Modifier) -> Key {
    match modifier {
        Modifier::Command => Key::Meta,
        Modifier::Control => Key::Control,
        Modifier::Alt => Key::Alt,
        Modifier::Shift => Key::Shift,
    }
}

/// Map a key name to an enigo key. Single characters map to themselves.
pub fn map_key(name: &str) -> Option<Key> {
    let lower = name.trim().to_lowercase();
    let key = match lower.as_str() {
        "command" | "cmd" | "meta" | "super" => Key::Meta,
        "control" | "ctrl" => Key::Control,
        "alt" | "option" => Key::Alt,
        "shift" => Key::Shift,

        "enter" | "return" => Key::Return,
        "tab" => Key::Tab,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "escape" | "esc" => Key::Escape,

        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,

        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "capslock" => Key::CapsLock,

        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,

        _ => {
            // keep the caller's case for single characters
            let mut chars = name.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Unicode(c)),
                _ => None,
            };
        }
    };
    Some(key)
}

fn to_pixel(v: f64) -> i32 {
    v.round() as i32
}

impl Pointer for EnigoInput {
    fn move_to(&self, point: Point) -> Result<(), ProviderError> {
        self.with_session(|enigo| {
            enigo
                .move_mouse(to_pixel(point.x), to_pixel(point.y), Coordinate::Abs)
                .map_err(injection)
        })
    }

    fn button_down(&self, b: MouseButton) -> Result<(), ProviderError> {
        self.with_session(|enigo| enigo.button(button(b), Press).map_err(injection))
    }

    fn button_up(&self, b: MouseButton) -> Result<(), ProviderError> {
        self.with_session(|enigo| enigo.button(button(b), Release).map_err(injection))
    }

    fn click(&self, b: MouseButton, double: bool) -> Result<(), ProviderError> {
        self.with_session(|enigo| {
            enigo.button(button(b), Click).map_err(injection)?;
            if double {
                enigo.button(button(b), Click).map_err(injection)?;
            }
            Ok(())
        })
    }

    fn scroll(&self, dx: i32, dy: i32) -> Result<(), ProviderError> {
        self.with_session(|enigo| {
            if dy != 0 {
                enigo.scroll(dy, Axis::Vertical).map_err(injection)?;
            }
            if dx != 0 {
                enigo.scroll(dx, Axis::Horizontal).map_err(injection)?;
            }
            Ok(())
        })
    }

    fn position(&self) -> Result<Point, ProviderError> {
        let (x, y) = self.with_session(|enigo| enigo.location().map_err(injection))?;
        Ok(Point::new(f64::from(x), f64::from(y)))
    }
}

impl Keyboard for EnigoInput {
    fn type_text(&self, text: &str) -> Result<(), ProviderError> {
        self.with_session(|enigo| enigo.text(text).map_err(injection))
    }

    fn tap_key(&self, key: &str, modifiers: &[Modifier]) -> Result<(), ProviderError> {
        let target = map_key(key).ok_or_else(|| ProviderError::UnsupportedKey(key.to_string()))?;
        debug!(key, ?modifiers, "tapping key");
        self.with_session(|enigo| {
            let mut held = Vec::with_capacity(modifiers.len());
            let mut result = Ok(());
            for m in modifiers {
                let k = modifier_key(*m);
                if let Err(e) = enigo.key(k, Press) {
                    result = Err(injection(e));
                    break;
                }
                held.push(k);
            }
            if result.is_ok() {
                result = enigo.key(target, Click).map_err(injection);
            }
            // release whatever was pressed, even after a failure
            for k in held.into_iter().rev() {
                if let Err(e) = enigo.key(k, Release) {
                    result = result.and(Err(injection(e)));
                }
            }
            result
        })
    }
}

impl ScreenGeometry for EnigoInput {
    fn size(&self) -> Result<ScreenSize, ProviderError> {
        let (w, h) = self.with_session(|enigo| enigo.main_display().map_err(injection))?;
        Ok(ScreenSize {
            width: w.max(0) as u32,
            height: h.max(0) as u32,
        })
    }
}
