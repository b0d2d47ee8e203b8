use std::collections::HashMap;

use serde_json::{json, Map, Value};

/// Every tool the server knows about. Adding a variant forces a handler,
/// a descriptor and an argument record to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    MouseMove,
    MouseClick,
    MouseDrag,
    MouseDragDrop,
    KeyboardType,
    KeyboardPress,
    TakeScreenshot,
    ClipboardGet,
    ClipboardSet,
    ClipboardPaste,
    MouseScroll,
    MouseMovePath,
    WindowList,
    WindowGetActive,
    WindowFocus,
    GetMousePosition,
    GetScreenSize,
}

impl ToolKind {
    /// Catalog order.
    pub const ALL: [ToolKind; 17] = [
        ToolKind::MouseMove,
        ToolKind::MouseClick,
        ToolKind::MouseDrag,
        ToolKind::MouseDragDrop,
        ToolKind::KeyboardType,
        ToolKind::KeyboardPress,
        ToolKind::TakeScreenshot,
        ToolKind::ClipboardGet,
        ToolKind::ClipboardSet,
        ToolKind::ClipboardPaste,
        ToolKind::MouseScroll,
        ToolKind::MouseMovePath,
        ToolKind::WindowList,
        ToolKind::WindowGetActive,
        ToolKind::WindowFocus,
        ToolKind::GetMousePosition,
        ToolKind::GetScreenSize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::MouseMove => "mouse_move",
            Self::MouseClick => "mouse_click",
            Self::MouseDrag => "mouse_drag",
            Self::MouseDragDrop => "mouse_drag_drop",
            Self::KeyboardType => "keyboard_type",
            Self::KeyboardPress => "keyboard_press",
            Self::TakeScreenshot => "take_screenshot",
            Self::ClipboardGet => "clipboard_get",
            Self::ClipboardSet => "clipboard_set",
            Self::ClipboardPaste => "clipboard_paste",
            Self::MouseScroll => "mouse_scroll",
            Self::MouseMovePath => "mouse_move_path",
            Self::WindowList => "window_list",
            Self::WindowGetActive => "window_get_active",
            Self::WindowFocus => "window_focus",
            Self::GetMousePosition => "get_mouse_position",
            Self::GetScreenSize => "get_screen_size",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    fn describe(&self) -> ToolDescriptor {
        use FieldSpec as F;
        let (description, fields) = match self {
            Self::MouseMove => (
                "Move mouse cursor to specified coordinates",
                vec![
                    F::number("x", "X coordinate").required(),
                    F::number("y", "Y coordinate").required(),
                ],
            ),
            Self::MouseClick => (
                "Click mouse button at current position",
                vec![
                    F::string("button", "Mouse button to click")
                        .one_of(&["left", "right", "middle"])
                        .default_value(json!("left")),
                    F::boolean("double", "Whether to double-click").default_value(json!(false)),
                ],
            ),
            Self::MouseDrag => (
                "Drag mouse from current position to target coordinates",
                vec![
                    F::number("x", "Target X coordinate").required(),
                    F::number("y", "Target Y coordinate").required(),
                ],
            ),
            Self::MouseDragDrop => (
                "Complete drag-and-drop from source to target coordinates",
                vec![
                    F::number("fromX", "Source X coordinate").required(),
                    F::number("fromY", "Source Y coordinate").required(),
                    F::number("toX", "Target X coordinate").required(),
                    F::number("toY", "Target Y coordinate").required(),
                    F::number("duration", "Duration in milliseconds (default: 500)")
                        .default_value(json!(500)),
                ],
            ),
            Self::KeyboardType => (
                "Type a string of text",
                vec![F::string("text", "Text to type").required().non_empty()],
            ),
            Self::KeyboardPress => (
                "Press a key or key combination",
                vec![
                    F::string("key", "Key to press").required().non_empty(),
                    F::string_list("modifiers", "Optional modifier keys")
                        .one_of(&["command", "control", "alt", "shift"]),
                ],
            ),
            Self::TakeScreenshot => (
                "Capture the screen. If filename is provided, saves to file. Otherwise, copies to clipboard.",
                vec![F::string(
                    "filename",
                    "Filename to save screenshot (optional). If omitted, screenshot is copied to clipboard.",
                )],
            ),
            Self::ClipboardGet => ("Get current clipboard content", vec![]),
            Self::ClipboardSet => (
                "Set clipboard content",
                vec![F::string("text", "Text to copy to clipboard").required()],
            ),
            Self::ClipboardPaste => ("Paste clipboard content (simulates Command+V)", vec![]),
            Self::MouseScroll => (
                "Scroll mouse wheel in specified direction",
                vec![
                    F::string("direction", "Scroll direction")
                        .required()
                        .one_of(&["up", "down", "left", "right"]),
                    F::number("amount", "Scroll amount (default: 5)").default_value(json!(5)),
                ],
            ),
            Self::MouseMovePath => (
                "Move mouse through multiple points with smooth interpolation",
                vec![
                    F::point_list("points", "Array of {x, y} coordinates to follow").required(),
                    F::number("duration", "Total duration in milliseconds (default: 1000)")
                        .default_value(json!(1000)),
                ],
            ),
            Self::WindowList => ("Get list of all open windows", vec![]),
            Self::WindowGetActive => ("Get currently active window information", vec![]),
            Self::WindowFocus => (
                "Focus/activate a specific application window",
                vec![F::string(
                    "appName",
                    "Application name to focus (e.g., \"Safari\", \"Visual Studio Code\")",
                )
                .required()
                .non_empty()],
            ),
            Self::GetMousePosition => ("Get the current mouse cursor position", vec![]),
            Self::GetScreenSize => ("Get the screen dimensions", vec![]),
        };

        ToolDescriptor {
            kind: *self,
            description,
            fields,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    String,
    Boolean,
    /// Array of strings; `allowed` constrains each item.
    StringList,
    /// Array of `{x, y}` objects with numeric coordinates.
    PointList,
}

impl FieldType {
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::StringList | Self::PointList => "array",
        }
    }
}

/// One declared argument of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub description: &'static str,
    pub required: bool,
    pub allowed: Option<&'static [&'static str]>,
    pub default: Option<Value>,
    pub non_empty: bool,
}

impl FieldSpec {
    fn new(name: &'static str, ty: FieldType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            description,
            required: false,
            allowed: None,
            default: None,
            non_empty: false,
        }
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::Number, description)
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::String, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::Boolean, description)
    }

    pub fn string_list(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::StringList, description)
    }

    pub fn point_list(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldType::PointList, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    fn to_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.ty.json_type()));

        match self.ty {
            FieldType::StringList => {
                let mut items = json!({ "type": "string" });
                if let Some(allowed) = self.allowed {
                    items["enum"] = json!(allowed);
                }
                prop.insert("items".into(), items);
            }
            FieldType::PointList => {
                prop.insert(
                    "items".into(),
                    json!({
                        "type": "object",
                        "properties": {
                            "x": { "type": "number" },
                            "y": { "type": "number" }
                        },
                        "required": ["x", "y"]
                    }),
                );
            }
            _ => {
                if let Some(allowed) = self.allowed {
                    prop.insert("enum".into(), json!(allowed));
                }
            }
        }

        prop.insert("description".into(), json!(self.description));
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        Value::Object(prop)
    }
}

/// Static description of one tool: its name, what it does, and its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub description: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl ToolDescriptor {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The JSON Schema object for the tool's arguments.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.to_schema()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));

        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        schema
    }

    /// `{name, description, inputSchema}` as advertised to clients.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

/// All tools, built once at startup and never mutated.
pub struct Catalog {
    tools: Vec<ToolDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        let tools: Vec<ToolDescriptor> = ToolKind::ALL.iter().map(|k| k.describe()).collect();
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name(), i))
            .collect();
        Self { tools, index }
    }

    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn get(&self, kind: ToolKind) -> &ToolDescriptor {
        &self.tools[self.index[kind.name()]]
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Every tool in `{name, description, inputSchema}` form.
    pub fn schemas(&self) -> Vec<Value> {
        self.tools.iter().map(|t| t.to_json()).collect()
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
