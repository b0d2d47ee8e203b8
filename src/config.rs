use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub const SERVER_NAME: &str = "desktop-control";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: String,
    /// `tracing` filter directive, e.g. `info` or `desktop_control=debug`.
    pub log_level: String,
    /// When set, logs are appended here in addition to stderr.
    pub log_file: Option<PathBuf>,
    /// When set, only `ERROR` events are appended here.
    pub error_log_file: Option<PathBuf>,
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.into(),
            log_level: "info".into(),
            log_file: None,
            error_log_file: None,
            instructions: Some(
                "Controls this computer's mouse, keyboard, clipboard, screen capture and windows. \
                 Coordinates are screen pixels; call get_screen_size first."
                    .into(),
            ),
        }
    }
}

impl ServerConfig {
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    pub fn with_error_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.error_log_file = path;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Open the log file for appending, creating parent directories.
    pub fn open_log_file(&self) -> std::io::Result<Option<File>> {
        self.log_file.as_deref().map(open_append).transpose()
    }

    pub fn open_error_log_file(&self) -> std::io::Result<Option<File>> {
        self.error_log_file.as_deref().map(open_append).transpose()
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
