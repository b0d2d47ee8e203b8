//! One handler per tool. Handlers get typed arguments, talk to the
//! capability providers, and never log on their own; the dispatcher does.

use std::path::{Component, Path, PathBuf};

use serde_json::json;

use super::args::{
    ClickArgs, DragDropArgs, FocusArgs, KeyPressArgs, MovePathArgs, ScreenshotArgs, ScrollArgs,
    TargetArgs, TextArgs, ToolRequest,
};
use super::envelope::ToolOutput;
use crate::error::{ProviderError, ToolError};
use crate::geometry;
use crate::playback::{self, Sleeper};
use crate::providers::Desktop;
use crate::trajectory;
use crate::types::{Modifier, MouseButton};

pub async fn handle(
    request: ToolRequest,
    desktop: &Desktop,
    sleeper: &dyn Sleeper,
) -> Result<ToolOutput, ToolError> {
    match request {
        ToolRequest::MouseMove(args) => mouse_move(desktop, args),
        ToolRequest::MouseClick(args) => mouse_click(desktop, args),
        ToolRequest::MouseDrag(args) => mouse_drag(desktop, args),
        ToolRequest::MouseDragDrop(args) => mouse_drag_drop(desktop, sleeper, args).await,
        ToolRequest::KeyboardType(args) => keyboard_type(desktop, args),
        ToolRequest::KeyboardPress(args) => keyboard_press(desktop, args),
        ToolRequest::TakeScreenshot(args) => take_screenshot(desktop, args).await,
        ToolRequest::ClipboardGet => clipboard_get(desktop).await,
        ToolRequest::ClipboardSet(args) => clipboard_set(desktop, args).await,
        ToolRequest::ClipboardPaste => clipboard_paste(desktop),
        ToolRequest::MouseScroll(args) => mouse_scroll(desktop, args),
        ToolRequest::MouseMovePath(args) => mouse_move_path(desktop, sleeper, args).await,
        ToolRequest::WindowList => window_list(desktop).await,
        ToolRequest::WindowGetActive => window_get_active(desktop).await,
        ToolRequest::WindowFocus(args) => window_focus(desktop, args).await,
        ToolRequest::GetMousePosition => get_mouse_position(desktop),
        ToolRequest::GetScreenSize => get_screen_size(desktop),
    }
}

fn mouse_move(desktop: &Desktop, args: TargetArgs) -> Result<ToolOutput, ToolError> {
    let target = args.point();
    geometry::validate_live(desktop.geometry.as_ref(), target)?;
    desktop.pointer.move_to(target)?;
    Ok(ToolOutput::message(format!("Mouse moved to {target}")))
}

fn mouse_click(desktop: &Desktop, args: ClickArgs) -> Result<ToolOutput, ToolError> {
    desktop.pointer.click(args.button, args.double)?;
    Ok(ToolOutput::message(format!(
        "Mouse {}clicked with {} button",
        if args.double { "double-" } else { "" },
        args.button.as_str()
    )))
}

/// Press at the current position, jump to the target, release.
fn mouse_drag(desktop: &Desktop, args: TargetArgs) -> Result<ToolOutput, ToolError> {
    let target = args.point();
    geometry::validate_live(desktop.geometry.as_ref(), target)?;

    let pointer = desktop.pointer.as_ref();
    pointer.button_down(MouseButton::Left)?;
    let moved = pointer.move_to(target);
    let released = pointer.button_up(MouseButton::Left);
    moved.and(released)?;

    Ok(ToolOutput::message(format!("Mouse dragged to {target}")))
}

async fn mouse_drag_drop(
    desktop: &Desktop,
    sleeper: &dyn Sleeper,
    args: DragDropArgs,
) -> Result<ToolOutput, ToolError> {
    trajectory::check_duration(args.duration)?;
    let (from, to) = (args.from(), args.to());
    let screen = desktop.geometry.size()?;
    geometry::validate(from, screen)?;
    geometry::validate(to, screen)?;

    let steps = trajectory::drag(from, to, args.duration);
    playback::drag_and_drop(from, steps, desktop.pointer.as_ref(), sleeper).await?;

    Ok(ToolOutput::message(format!("Drag-and-drop from {from} to {to}")))
}

fn keyboard_type(desktop: &Desktop, args: TextArgs) -> Result<ToolOutput, ToolError> {
    desktop.keyboard.type_text(&args.text)?;
    Ok(ToolOutput::message(format!("Typed: \"{}\"", args.text)))
}

fn keyboard_press(desktop: &Desktop, args: KeyPressArgs) -> Result<ToolOutput, ToolError> {
    desktop.keyboard.tap_key(&args.key, &args.modifiers)?;
    let combo: String = args
        .modifiers
        .iter()
        .map(|m| format!("{}+", m.as_str()))
        .collect();
    Ok(ToolOutput::message(format!("Pressed key: {combo}{}", args.key)))
}

async fn take_screenshot(desktop: &Desktop, args: ScreenshotArgs) -> Result<ToolOutput, ToolError> {
    match args.filename.as_deref().filter(|f| !f.is_empty()) {
        Some(filename) => {
            let path = resolve_screenshot_path(filename)?;
            desktop.capture.capture_to_file(&path).await?;
            let shown = path.display().to_string();
            Ok(ToolOutput::message(format!("Screenshot saved to {shown}"))
                .with_data(json!({ "path": shown })))
        }
        None => {
            desktop.capture.capture_to_clipboard().await?;
            Ok(ToolOutput::message("Screenshot copied to clipboard"))
        }
    }
}

/// Resolve a screenshot filename against the working directory, folding
/// `.` and `..` so the capture tool never has to walk missing directories.
pub fn resolve_screenshot_path(filename: &str) -> Result<PathBuf, ToolError> {
    let path = Path::new(filename);
    if path.file_name().is_none() {
        return Err(ToolError::invalid(
            "filename",
            format!("Invalid file path: {filename}"),
        ));
    }
    let absolute =
        std::path::absolute(path).map_err(|e| ToolError::Provider(ProviderError::Io(e)))?;
    Ok(normalize(&absolute))
}

/// Lexical normalisation. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

async fn clipboard_get(desktop: &Desktop) -> Result<ToolOutput, ToolError> {
    let content = desktop.clipboard.read().await?;
    Ok(ToolOutput::data(json!({ "content": content })))
}

async fn clipboard_set(desktop: &Desktop, args: TextArgs) -> Result<ToolOutput, ToolError> {
    desktop.clipboard.write(&args.text).await?;
    Ok(ToolOutput::message(format!("Clipboard set to: \"{}\"", args.text)))
}

fn clipboard_paste(desktop: &Desktop) -> Result<ToolOutput, ToolError> {
    desktop.keyboard.tap_key("v", &[Modifier::Command])?;
    Ok(ToolOutput::message("Pasted clipboard content (Command+V)"))
}

fn mouse_scroll(desktop: &Desktop, args: ScrollArgs) -> Result<ToolOutput, ToolError> {
    if !args.amount.is_finite() {
        return Err(ToolError::invalid("amount", "must be a finite number"));
    }
    let (dx, dy) = args.direction.delta(args.amount.round() as i32);
    desktop.pointer.scroll(dx, dy)?;
    Ok(ToolOutput::message(format!(
        "Scrolled {} by {}",
        args.direction.as_str(),
        args.amount
    )))
}

async fn mouse_move_path(
    desktop: &Desktop,
    sleeper: &dyn Sleeper,
    args: MovePathArgs,
) -> Result<ToolOutput, ToolError> {
    trajectory::check_duration(args.duration)?;
    let screen = desktop.geometry.size()?;
    let steps = trajectory::path(&args.points, args.duration, screen)?;
    playback::play(steps, desktop.pointer.as_ref(), sleeper).await?;

    Ok(ToolOutput::message(format!(
        "Moved through {} points in {}ms",
        args.points.len(),
        args.duration
    )))
}

async fn window_list(desktop: &Desktop) -> Result<ToolOutput, ToolError> {
    let windows = desktop.windows.list_windows().await?;
    Ok(ToolOutput::data(json!({ "windows": windows })))
}

async fn window_get_active(desktop: &Desktop) -> Result<ToolOutput, ToolError> {
    match desktop.windows.active_window().await? {
        Some(window) => Ok(ToolOutput::data(json!({
            "title": window.title,
            "owner": window.owner,
            "bounds": window.bounds,
        }))),
        None => Ok(ToolOutput::message("No active window found")),
    }
}

async fn window_focus(desktop: &Desktop, args: FocusArgs) -> Result<ToolOutput, ToolError> {
    desktop.windows.focus(&args.app_name).await?;
    Ok(ToolOutput::message(format!(
        "Focused application: {}",
        args.app_name
    )))
}

fn get_mouse_position(desktop: &Desktop) -> Result<ToolOutput, ToolError> {
    let pos = desktop.pointer.position()?;
    // whole pixels, as the pointer reports them
    let (x, y) = (pos.x.round() as i64, pos.y.round() as i64);
    Ok(ToolOutput::data(json!({ "position": { "x": x, "y": y } })))
}

fn get_screen_size(desktop: &Desktop) -> Result<ToolOutput, ToolError> {
    let size = desktop.geometry.size()?;
    Ok(ToolOutput::data(json!({
        "size": { "width": size.width, "height": size.height }
    })))
}
