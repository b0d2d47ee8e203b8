use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::Clipboard;
use crate::error::ProviderError;

/// System clipboard through arboard.
///
/// The handle is opened on first use; if that fails the error is returned and
/// the next call tries again.
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    fn with_handle<T>(
        &self,
        op: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, ProviderError> {
        let mut guard = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| {
                warn!("Failed to initialize clipboard: {e}");
                ProviderError::Unavailable(format!("clipboard: {e}"))
            })?;
            *guard = Some(clipboard);
        }
        match guard.as_mut() {
            Some(clipboard) => op(clipboard).map_err(clipboard_error),
            None => Err(ProviderError::Unavailable("clipboard closed".into())),
        }
    }
}

fn clipboard_error(e: arboard::Error) -> ProviderError {
    ProviderError::Command {
        program: "clipboard".into(),
        message: e.to_string(),
    }
}

/// An empty clipboard, or one holding only non-text content, reads as "".
fn text_or_empty(result: Result<String, arboard::Error>) -> Result<String, arboard::Error> {
    match result {
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        other => other,
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn read(&self) -> Result<String, ProviderError> {
        self.with_handle(|cb| text_or_empty(cb.get_text()))
    }

    async fn write(&self, text: &str) -> Result<(), ProviderError> {
        debug!(len = text.len(), "writing clipboard");
        self.with_handle(|cb| cb.set_text(text))
    }
}
