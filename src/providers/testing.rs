use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{Clipboard, Keyboard, Pointer, ScreenCapture, ScreenGeometry, WindowManager};
use crate::error::ProviderError;
use crate::playback::Sleeper;
use crate::types::{ActiveWindow, Modifier, MouseButton, Point, ScreenSize};

/// Every side effect the recorder saw, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Move(Point),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Click { button: MouseButton, double: bool },
    Scroll { dx: i32, dy: i32 },
    Type(String),
    Tap { key: String, modifiers: Vec<Modifier> },
    ClipboardRead,
    ClipboardWrite(String),
    CaptureFile(PathBuf),
    CaptureClipboard,
    ListWindows,
    ActiveWindow,
    Focus(String),
    Sleep(Duration),
}

/// In-memory desktop for tests. Implements every capability and the sleeper.
pub struct Recorder {
    events: Mutex<Vec<Event>>,
    screen: ScreenSize,
    position: Mutex<Point>,
    clipboard: Mutex<String>,
    windows: Vec<String>,
    active: Option<ActiveWindow>,
    moves_left: Option<AtomicUsize>,
    denied: bool,
    panic_on_type: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            screen: ScreenSize {
                width: 1920,
                height: 1080,
            },
            position: Mutex::new(Point::new(0.0, 0.0)),
            clipboard: Mutex::new(String::new()),
            windows: Vec::new(),
            active: None,
            moves_left: None,
            denied: false,
            panic_on_type: false,
        }
    }

    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen = ScreenSize { width, height };
        self
    }

    pub fn with_position(self, point: Point) -> Self {
        *self.position.lock().unwrap() = point;
        self
    }

    pub fn with_clipboard(self, text: &str) -> Self {
        *self.clipboard.lock().unwrap() = text.to_string();
        self
    }

    pub fn with_windows(mut self, windows: &[&str]) -> Self {
        self.windows = windows.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn with_active_window(mut self, window: ActiveWindow) -> Self {
        self.active = Some(window);
        self
    }

    /// Allow `n` pointer moves, then fail every following one.
    pub fn with_failing_moves_after(mut self, n: usize) -> Self {
        self.moves_left = Some(AtomicUsize::new(n));
        self
    }

    /// Clipboard, capture and window calls fail as if automation were denied.
    pub fn with_permission_denied(mut self) -> Self {
        self.denied = true;
        self
    }

    pub fn with_panic_on_type(mut self) -> Self {
        self.panic_on_type = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn moves(&self) -> Vec<Point> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Move(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn clipboard(&self) -> String {
        self.clipboard.lock().unwrap().clone()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn check_permission(&self, program: &str) -> Result<(), ProviderError> {
        if self.denied {
            return Err(ProviderError::Command {
                program: program.into(),
                message: "not authorized to send Apple events".into(),
            });
        }
        Ok(())
    }
}

impl Pointer for Recorder {
    fn move_to(&self, point: Point) -> Result<(), ProviderError> {
        if let Some(left) = &self.moves_left {
            let ok = left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if !ok {
                return Err(ProviderError::Injection("pointer stuck".into()));
            }
        }
        *self.position.lock().unwrap() = point;
        self.record(Event::Move(point));
        Ok(())
    }

    fn button_down(&self, button: MouseButton) -> Result<(), ProviderError> {
        self.record(Event::ButtonDown(button));
        Ok(())
    }

    fn button_up(&self, button: MouseButton) -> Result<(), ProviderError> {
        self.record(Event::ButtonUp(button));
        Ok(())
    }

    fn click(&self, button: MouseButton, double: bool) -> Result<(), ProviderError> {
        self.record(Event::Click { button, double });
        Ok(())
    }

    fn scroll(&self, dx: i32, dy: i32) -> Result<(), ProviderError> {
        self.record(Event::Scroll { dx, dy });
        Ok(())
    }

    fn position(&self) -> Result<Point, ProviderError> {
        Ok(*self.position.lock().unwrap())
    }
}

impl Keyboard for Recorder {
    fn type_text(&self, text: &str) -> Result<(), ProviderError> {
        if self.panic_on_type {
            panic!("keyboard backend crashed");
        }
        self.record(Event::Type(text.to_string()));
        Ok(())
    }

    fn tap_key(&self, key: &str, modifiers: &[Modifier]) -> Result<(), ProviderError> {
        self.record(Event::Tap {
            key: key.to_string(),
            modifiers: modifiers.to_vec(),
        });
        Ok(())
    }
}

impl ScreenGeometry for Recorder {
    fn size(&self) -> Result<ScreenSize, ProviderError> {
        Ok(self.screen)
    }
}

#[async_trait]
impl Clipboard for Recorder {
    async fn read(&self) -> Result<String, ProviderError> {
        self.check_permission("clipboard")?;
        self.record(Event::ClipboardRead);
        Ok(self.clipboard())
    }

    async fn write(&self, text: &str) -> Result<(), ProviderError> {
        self.check_permission("clipboard")?;
        self.record(Event::ClipboardWrite(text.to_string()));
        *self.clipboard.lock().unwrap() = text.to_string();
        Ok(())
    }
}

#[async_trait]
impl ScreenCapture for Recorder {
    async fn capture_to_file(&self, path: &Path) -> Result<(), ProviderError> {
        self.check_permission("screencapture")?;
        self.record(Event::CaptureFile(path.to_path_buf()));
        Ok(())
    }

    async fn capture_to_clipboard(&self) -> Result<(), ProviderError> {
        self.check_permission("screencapture")?;
        self.record(Event::CaptureClipboard);
        Ok(())
    }
}

#[async_trait]
impl WindowManager for Recorder {
    async fn list_windows(&self) -> Result<Vec<String>, ProviderError> {
        self.check_permission("osascript")?;
        self.record(Event::ListWindows);
        Ok(self.windows.clone())
    }

    async fn active_window(&self) -> Result<Option<ActiveWindow>, ProviderError> {
        self.check_permission("osascript")?;
        self.record(Event::ActiveWindow);
        Ok(self.active.clone())
    }

    async fn focus(&self, app_name: &str) -> Result<(), ProviderError> {
        self.check_permission("osascript")?;
        self.record(Event::Focus(app_name.to_string()));
        Ok(())
    }
}

#[async_trait]
impl Sleeper for Recorder {
    async fn sleep(&self, duration: Duration) {
        self.record(Event::Sleep(duration));
    }
}
