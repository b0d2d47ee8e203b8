//! Typed argument records. Built only from arguments that already passed
//! schema validation, so deserialization failures here are unexpected.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::catalog::ToolKind;
use crate::error::ToolError;
use crate::types::{Modifier, MouseButton, Point, ScrollDirection};

/// A raw inbound call, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetArgs {
    pub x: f64,
    pub y: f64,
}

impl TargetArgs {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClickArgs {
    pub button: MouseButton,
    pub double: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragDropArgs {
    pub from_x: f64,
    pub from_y: f64,
    pub to_x: f64,
    pub to_y: f64,
    pub duration: f64,
}

impl DragDropArgs {
    pub fn from(&self) -> Point {
        Point::new(self.from_x, self.from_y)
    }

    pub fn to(&self) -> Point {
        Point::new(self.to_x, self.to_y)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextArgs {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyPressArgs {
    pub key: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreenshotArgs {
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrollArgs {
    pub direction: ScrollDirection,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovePathArgs {
    pub points: Vec<Point>,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusArgs {
    pub app_name: String,
}

/// A validated call, one variant per tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    MouseMove(TargetArgs),
    MouseClick(ClickArgs),
    MouseDrag(TargetArgs),
    MouseDragDrop(DragDropArgs),
    KeyboardType(TextArgs),
    KeyboardPress(KeyPressArgs),
    TakeScreenshot(ScreenshotArgs),
    ClipboardGet,
    ClipboardSet(TextArgs),
    ClipboardPaste,
    MouseScroll(ScrollArgs),
    MouseMovePath(MovePathArgs),
    WindowList,
    WindowGetActive,
    WindowFocus(FocusArgs),
    GetMousePosition,
    GetScreenSize,
}

impl ToolRequest {
    /// Build the typed request for `kind` from validated arguments.
    pub fn parse(kind: ToolKind, args: Map<String, Value>) -> Result<Self, ToolError> {
        let args = Value::Object(args);
        Ok(match kind {
            ToolKind::MouseMove => Self::MouseMove(typed(args)?),
            ToolKind::MouseClick => Self::MouseClick(typed(args)?),
            ToolKind::MouseDrag => Self::MouseDrag(typed(args)?),
            ToolKind::MouseDragDrop => Self::MouseDragDrop(typed(args)?),
            ToolKind::KeyboardType => Self::KeyboardType(typed(args)?),
            ToolKind::KeyboardPress => Self::KeyboardPress(typed(args)?),
            ToolKind::TakeScreenshot => Self::TakeScreenshot(typed(args)?),
            ToolKind::ClipboardGet => Self::ClipboardGet,
            ToolKind::ClipboardSet => Self::ClipboardSet(typed(args)?),
            ToolKind::ClipboardPaste => Self::ClipboardPaste,
            ToolKind::MouseScroll => Self::MouseScroll(typed(args)?),
            ToolKind::MouseMovePath => Self::MouseMovePath(typed(args)?),
            ToolKind::WindowList => Self::WindowList,
            ToolKind::WindowGetActive => Self::WindowGetActive,
            ToolKind::WindowFocus => Self::WindowFocus(typed(args)?),
            ToolKind::GetMousePosition => Self::GetMousePosition,
            ToolKind::GetScreenSize => Self::GetScreenSize,
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::MouseMove(_) => ToolKind::MouseMove,
            Self::MouseClick(_) => ToolKind::MouseClick,
            Self::MouseDrag(_) => ToolKind::MouseDrag,
            Self::MouseDragDrop(_) => ToolKind::MouseDragDrop,
            Self::KeyboardType(_) => ToolKind::KeyboardType,
            Self::KeyboardPress(_) => ToolKind::KeyboardPress,
            Self::TakeScreenshot(_) => ToolKind::TakeScreenshot,
            Self::ClipboardGet => ToolKind::ClipboardGet,
            Self::ClipboardSet(_) => ToolKind::ClipboardSet,
            Self::ClipboardPaste => ToolKind::ClipboardPaste,
            Self::MouseScroll(_) => ToolKind::MouseScroll,
            Self::MouseMovePath(_) => ToolKind::MouseMovePath,
            Self::WindowList => ToolKind::WindowList,
            Self::WindowGetActive => ToolKind::WindowGetActive,
            Self::WindowFocus(_) => ToolKind::WindowFocus,
            Self::GetMousePosition => ToolKind::GetMousePosition,
            Self::GetScreenSize => ToolKind::GetScreenSize,
        }
    }
}

fn typed<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::invalid("arguments", e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tools::catalog::Catalog;
    use crate::tools::schema;

    fn request(kind: ToolKind, args: Value) -> ToolRequest {
        let catalog = Catalog::new();
        let validated = schema::validate(catalog.get(kind), &args).unwrap();
        ToolRequest::parse(kind, validated).unwrap()
    }

    #[test]
    fn click_defaults_become_typed_values() {
        assert_eq!(
            request(ToolKind::MouseClick, json!({})),
            ToolRequest::MouseClick(ClickArgs {
                button: MouseButton::Left,
                double: false
            })
        );
    }

    #[test]
    fn camel_case_fields_map_to_records() {
        let req = request(
            ToolKind::MouseDragDrop,
            json!({"fromX": 1, "fromY": 2.5, "toX": 30, "toY": 40}),
        );
        let ToolRequest::MouseDragDrop(args) = req else {
            panic!("wrong variant");
        };
        assert_eq!(args.from(), Point::new(1.0, 2.5));
        assert_eq!(args.to(), Point::new(30.0, 40.0));
        assert_eq!(args.duration, 500.0);

        let req = request(ToolKind::WindowFocus, json!({"appName": "Safari"}));
        assert_eq!(
            req,
            ToolRequest::WindowFocus(FocusArgs {
                app_name: "Safari".into()
            })
        );
    }

    #[test]
    fn optional_fields_without_defaults() {
        let ToolRequest::KeyboardPress(args) = request(ToolKind::KeyboardPress, json!({"key": "tab"})) else {
            panic!("wrong variant");
        };
        assert!(args.modifiers.is_empty());

        let ToolRequest::TakeScreenshot(args) = request(ToolKind::TakeScreenshot, json!({})) else {
            panic!("wrong variant");
        };
        assert!(args.filename.is_none());
    }

    #[test]
    fn points_deserialize_ignoring_extra_keys() {
        let ToolRequest::MouseMovePath(args) = request(
            ToolKind::MouseMovePath,
            json!({"points": [{"x": 0, "y": 0, "label": "a"}, {"x": 5, "y": 6}]}),
        ) else {
            panic!("wrong variant");
        };
        assert_eq!(args.points, vec![Point::new(0.0, 0.0), Point::new(5.0, 6.0)]);
        assert_eq!(args.duration, 1000.0);
    }

    #[test]
    fn every_kind_parses_and_reports_itself() {
        let samples = [
            (ToolKind::MouseMove, json!({"x": 1, "y": 1})),
            (ToolKind::MouseClick, json!({})),
            (ToolKind::MouseDrag, json!({"x": 1, "y": 1})),
            (ToolKind::MouseDragDrop, json!({"fromX": 0, "fromY": 0, "toX": 1, "toY": 1})),
            (ToolKind::KeyboardType, json!({"text": "hi"})),
            (ToolKind::KeyboardPress, json!({"key": "a"})),
            (ToolKind::TakeScreenshot, json!({})),
            (ToolKind::ClipboardGet, json!({})),
            (ToolKind::ClipboardSet, json!({"text": ""})),
            (ToolKind::ClipboardPaste, json!({})),
            (ToolKind::MouseScroll, json!({"direction": "left"})),
            (ToolKind::MouseMovePath, json!({"points": []})),
            (ToolKind::WindowList, json!({})),
            (ToolKind::WindowGetActive, json!({})),
            (ToolKind::WindowFocus, json!({"appName": "Finder"})),
            (ToolKind::GetMousePosition, json!({})),
            (ToolKind::GetScreenSize, json!({})),
        ];
        for (kind, args) in samples {
            assert_eq!(request(kind, args).kind(), kind);
        }
    }
}
