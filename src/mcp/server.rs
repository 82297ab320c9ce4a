use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::{mcp::adapter, service::HaloService};

#[derive(Clone)]
pub struct HaloMcpServer {
    pub(crate) service: Arc<HaloService>,
    pub(crate) tool_router: ToolRouter<HaloMcpServer>,
}

impl HaloMcpServer {
    pub fn new(service: Arc<HaloService>) -> Self {
        Self {
            service,
            tool_router: Self::build_tool_router(),
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for HaloMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(instructions()),
        }
    }
}

/// One line per tool with its argument names; optional ones end in `?`.
fn instructions() -> String {
    let mut lines = vec![
        "Manages a Halo blog. Each tool returns a plain-text summary for the user."
            .to_string(),
    ];
    for tool in adapter::descriptors() {
        let required: Vec<&str> = tool.parameters["required"]
            .as_array()
            .map(|names| names.iter().filter_map(|name| name.as_str()).collect())
            .unwrap_or_default();
        let args: Vec<String> = tool.parameters["properties"]
            .as_object()
            .map(|props| {
                props
                    .keys()
                    .map(|key| {
                        if required.contains(&key.as_str()) {
                            key.clone()
                        } else {
                            format!("{key}?")
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        lines.push(format!("- {}({}): {}", tool.name, args.join(", "), tool.description));
    }
    lines.join("\n")
}
