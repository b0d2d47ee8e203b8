//! Capability providers: the OS-facing collaborators that actually move the
//! pointer, type, read the clipboard, capture the screen and drive windows.
//!
//! Handlers only ever see these traits. The dispatcher never calls a provider
//! directly.

pub mod clipboard;
pub mod input;
pub mod macos;
#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{ActiveWindow, Modifier, MouseButton, Point, ScreenSize};

/// Pointer injection. Injection is synchronous and fast; pacing between
/// moves is the caller's business.
pub trait Pointer: Send + Sync {
    fn move_to(&self, point: Point) -> Result<(), ProviderError>;

    fn button_down(&self, button: MouseButton) -> Result<(), ProviderError>;

    fn button_up(&self, button: MouseButton) -> Result<(), ProviderError>;

    fn click(&self, button: MouseButton, double: bool) -> Result<(), ProviderError>;

    /// Scroll the wheel. Positive `dy` scrolls down, positive `dx` scrolls right.
    fn scroll(&self, dx: i32, dy: i32) -> Result<(), ProviderError>;

    fn position(&self) -> Result<Point, ProviderError>;
}

pub trait Keyboard: Send + Sync {
    fn type_text(&self, text: &str) -> Result<(), ProviderError>;

    /// Tap `key` while holding `modifiers`.
    fn tap_key(&self, key: &str, modifiers: &[Modifier]) -> Result<(), ProviderError>;
}

pub trait ScreenGeometry: Send + Sync {
    fn size(&self) -> Result<ScreenSize, ProviderError>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn read(&self) -> Result<String, ProviderError>;

    async fn write(&self, text: &str) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait ScreenCapture: Send + Sync {
    async fn capture_to_file(&self, path: &Path) -> Result<(), ProviderError>;

    async fn capture_to_clipboard(&self) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait WindowManager: Send + Sync {
    /// One `"<app> - <window title>"` entry per visible window.
    async fn list_windows(&self) -> Result<Vec<String>, ProviderError>;

    async fn active_window(&self) -> Result<Option<ActiveWindow>, ProviderError>;

    async fn focus(&self, app_name: &str) -> Result<(), ProviderError>;
}

/// The full set of providers a dispatcher hands to its handlers.
#[derive(Clone)]
pub struct Desktop {
    pub pointer: Arc<dyn Pointer>,
    pub keyboard: Arc<dyn Keyboard>,
    pub geometry: Arc<dyn ScreenGeometry>,
    pub clipboard: Arc<dyn Clipboard>,
    pub capture: Arc<dyn ScreenCapture>,
    pub windows: Arc<dyn WindowManager>,
}

impl Desktop {
    /// enigo for input injection and geometry, arboard for the clipboard, and
    /// the macOS backend for capture and windows.
    pub fn native() -> Self {
        let input = Arc::new(input::EnigoInput::new());
        let os = Arc::new(macos::MacOsDesktop::new());
        Self {
            pointer: input.clone(),
            keyboard: input.clone(),
            geometry: input,
            clipboard: Arc::new(clipboard::SystemClipboard::new()),
            capture: os.clone(),
            windows: os,
        }
    }

    /// Use one backend for every capability.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: Pointer + Keyboard + ScreenGeometry + Clipboard + ScreenCapture + WindowManager + 'static,
    {
        Self {
            pointer: backend.clone(),
            keyboard: backend.clone(),
            geometry: backend.clone(),
            clipboard: backend.clone(),
            capture: backend.clone(),
            windows: backend,
        }
    }
}
