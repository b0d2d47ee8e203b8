pub mod args;
pub mod catalog;
pub mod dispatcher;
pub mod envelope;
pub mod handlers;
pub mod schema;

pub use args::{ToolCall, ToolRequest};
pub use catalog::{Catalog, FieldSpec, FieldType, ToolDescriptor, ToolKind};
pub use dispatcher::Dispatcher;
pub use envelope::{ResultEnvelope, ToolContent, ToolOutput, ToolResponse};
