//!  Amadeus Travel Tools
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # MCP Server Entry Point
//!
//! Serves the Amadeus tool catalog over stdio. Credentials come from
//! `AMADEUS_CLIENT_ID` / `AMADEUS_CLIENT_SECRET` (and optionally
//! `AMADEUS_BASE_URL`).

use anyhow::{Context, Error, Result};
use clap::Parser;
use mcp_amadeus::{AmadeusClient, AmadeusConfig, ToolCatalog};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    ToolsCapability,
};
use rmcp::service::{RequestContext, serve_server};
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mcp-amadeus")]
#[command(
    author,
    version,
    about = "MCP server for the Amadeus travel APIs (flights, hotels, locations, analytics, bookings)"
)]
struct Args {}

#[derive(Clone)]
pub struct AmadeusMcpServer {
    client: AmadeusClient,
    catalog: ToolCatalog,
    tools: Arc<Vec<Tool>>,
}

impl AmadeusMcpServer {
    pub fn new(client: AmadeusClient) -> Self {
        let catalog = ToolCatalog::new();
        let tools = catalog
            .specs()
            .into_iter()
            .map(|spec| {
                let schema = match spec.input_schema {
                    Value::Object(map) => map,
                    _ => JsonObject::new(),
                };
                Tool::new(spec.name, spec.description, Arc::new(schema))
            })
            .collect();
        Self {
            client,
            catalog,
            tools: Arc::new(tools),
        }
    }
}

impl ServerHandler for AmadeusMcpServer {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        tracing::debug!("list_tools called, tools count: {}", self.tools.len());
        Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        match self.catalog.invoke_text(&self.client, &request.name, args).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", request.name, e);
                Ok(CallToolResult::error(vec![Content::text(
                    e.to_json().to_string(),
                )]))
            }
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Amadeus travel tools. Dates are YYYY-MM-DD; airports and cities are IATA codes."
                    .to_string(),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".to_string().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();
    tracing::debug!("Parsed args: {:?}", args);

    let config = AmadeusConfig::from_env().context("Missing Amadeus credentials")?;
    tracing::info!(
        "Using Amadeus endpoint {} (client id {})",
        config.base_url(),
        config.client_id()
    );
    let client = AmadeusClient::new(config).context("Failed to create Amadeus client")?;

    let server = AmadeusMcpServer::new(client);
    tracing::debug!("Registered {} tools", server.tools.len());

    let (stdin, stdout) = rmcp::transport::io::stdio();
    tracing::debug!("Starting MCP server on stdio transport...");
    let running = serve_server(server, (stdin, stdout))
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    tokio::select! {
        quit = running.waiting() => {
            let reason = quit.context("MCP service task failed")?;
            tracing::info!("MCP server stopped: {:?}", reason);
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
