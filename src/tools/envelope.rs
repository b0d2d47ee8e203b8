use serde::Serialize;
use serde_json::Value;

/// What a handler produced on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl ToolOutput {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: Value::Null,
        }
    }

    pub fn data(data: Value) -> Self {
        Self {
            message: None,
            data,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// The message if there is one, otherwise the data rendered as JSON.
    pub fn text(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => self.data.to_string(),
        }
    }
}

/// Outcome of exactly one dispatched call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEnvelope {
    Success(ToolOutput),
    Failure { message: String },
}

impl ResultEnvelope {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Render into the wire shape. Failures are prefixed with `Error: ` and
    /// flagged with `isError`.
    pub fn into_response(self) -> ToolResponse {
        match self {
            Self::Success(output) => ToolResponse::text(output.text()),
            Self::Failure { message } => ToolResponse::error(format!("Error: {message}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// `{content: [{type: "text", text}], isError?}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Concatenated text of all content items.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_renders_message() {
        let resp = ResultEnvelope::Success(ToolOutput::message("Mouse moved to (1, 2)")).into_response();
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"content": [{"type": "text", "text": "Mouse moved to (1, 2)"}]})
        );
    }

    #[test]
    fn success_without_message_renders_data_as_json() {
        let out = ToolOutput::data(json!({"content": "copied"}));
        let resp = ResultEnvelope::Success(out).into_response();
        assert_eq!(resp.joined_text(), r#"{"content":"copied"}"#);
        assert!(!resp.is_error);
    }

    #[test]
    fn message_wins_over_data() {
        let out = ToolOutput::message("saved").with_data(json!({"path": "/tmp/a.png"}));
        assert_eq!(out.text(), "saved");
    }

    #[test]
    fn failure_is_prefixed_and_flagged() {
        let resp = ResultEnvelope::failure("Unknown tool: nope").into_response();
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "content": [{"type": "text", "text": "Error: Unknown tool: nope"}],
                "isError": true
            })
        );
    }
}
