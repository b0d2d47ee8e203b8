//! MCP surface. Framing and transport belong to rmcp; this adapter only
//! lists the catalog and forwards calls to the [`Dispatcher`].

use std::future::Future;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;

use crate::config::ServerConfig;
use crate::tools::{Catalog, Dispatcher, ToolCall, ToolContent, ToolResponse};

#[derive(Clone)]
pub struct DesktopServer {
    dispatcher: Arc<Dispatcher>,
    config: Arc<ServerConfig>,
}

impl DesktopServer {
    pub fn new(dispatcher: Dispatcher, config: ServerConfig) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            config: Arc::new(config),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// The catalog as rmcp tool definitions.
pub fn tool_list(catalog: &Catalog) -> Vec<Tool> {
    catalog
        .descriptors()
        .iter()
        .map(|d| Tool::new(d.name(), d.description, d.input_schema()))
        .collect()
}

pub fn to_call_result(response: ToolResponse) -> CallToolResult {
    let content: Vec<Content> = response
        .content
        .into_iter()
        .map(|c| match c {
            ToolContent::Text { text } => Content::text(text),
        })
        .collect();
    if response.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

impl ServerHandler for DesktopServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.name.clone(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: self.config.instructions.clone(),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        async move {
            Ok(ListToolsResult::with_all_items(tool_list(
                self.dispatcher.catalog(),
            )))
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
            let call = ToolCall::new(request.name, arguments);
            Ok(to_call_result(self.dispatcher.call(call).await))
        }
    }
}
