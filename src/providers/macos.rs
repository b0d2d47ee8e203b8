//! Screen capture and window control on macOS. Capture, window listing and
//! activation go through `screencapture` and `osascript`; the frontmost window
//! comes from active-win-pos-rs.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{ScreenCapture, WindowManager};
use crate::error::ProviderError;
use crate::types::{ActiveWindow, WindowBounds};

const LIST_WINDOWS_SCRIPT: &str = r#"
tell application "System Events"
  set windowList to {}
  set allProcesses to every process whose background only is false
  repeat with proc in allProcesses
    set procName to name of proc
    try
      set windowNames to name of every window of proc
      repeat with winName in windowNames
        set end of windowList to procName & " - " & winName
      end repeat
    end try
  end repeat
  return windowList
end tell
"#;

#[derive(Debug, Default)]
pub struct MacOsDesktop;

impl MacOsDesktop {
    pub fn new() -> Self {
        Self
    }
}

/// Run a program to completion and return its stdout.
async fn run(program: &str, args: &[&str]) -> Result<String, ProviderError> {
    debug!(program, ?args, "running command");
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null());

    let child = cmd.spawn().map_err(|e| ProviderError::Command {
        program: program.to_string(),
        message: e.to_string(),
    })?;

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ProviderError::Command {
            program: program.to_string(),
            message: if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

async fn run_osascript(script: &str) -> Result<String, ProviderError> {
    let out = run("osascript", &["-e", script]).await?;
    Ok(out.trim().to_string())
}

/// Quote a string for use inside an AppleScript string literal.
pub fn applescript_quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// AppleScript renders a list as `a, b, c`.
pub fn parse_window_list(output: &str) -> Vec<String> {
    output
        .split(", ")
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

fn to_active_window(window: active_win_pos_rs::ActiveWindow) -> ActiveWindow {
    let pos = window.position;
    ActiveWindow {
        title: window.title,
        owner: window.app_name,
        bounds: Some(WindowBounds {
            x: pos.x,
            y: pos.y,
            width: pos.width,
            height: pos.height,
        }),
    }
}

#[async_trait]
impl ScreenCapture for MacOsDesktop {
    async fn capture_to_file(&self, path: &Path) -> Result<(), ProviderError> {
        let path = path.to_string_lossy().into_owned();
        // -x: no shutter sound
        run("screencapture", &["-x", path.as_str()]).await.map(|_| ())
    }

    async fn capture_to_clipboard(&self) -> Result<(), ProviderError> {
        run("screencapture", &["-c"]).await.map(|_| ())
    }
}

#[async_trait]
impl WindowManager for MacOsDesktop {
    async fn list_windows(&self) -> Result<Vec<String>, ProviderError> {
        let output = run_osascript(LIST_WINDOWS_SCRIPT).await?;
        Ok(parse_window_list(&output))
    }

    async fn active_window(&self) -> Result<Option<ActiveWindow>, ProviderError> {
        let lookup = || match active_win_pos_rs::get_active_window() {
            Ok(window) => Some(to_active_window(window)),
            Err(()) => {
                debug!("no active window");
                None
            }
        };
        tokio::task::spawn_blocking(lookup)
            .await
            .map_err(|e| ProviderError::Unavailable(format!("active window lookup: {e}")))
    }

    async fn focus(&self, app_name: &str) -> Result<(), ProviderError> {
        let script = format!(
            "tell application \"{}\" to activate",
            applescript_quote(app_name)
        );
        run_osascript(&script).await.map(|_| ())
    }
}
