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

//! # Error taxonomy
//!
//! Every failure a tool call can produce, with the upstream status and body
//! kept verbatim so agent and MCP surfaces can pass them through.

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmadeusError {
    /// The client-credentials grant was refused or could not be sent.
    #[error("authentication failed: {body}")]
    Authentication { status: Option<u16>, body: Value },

    /// The API answered with a non-2xx status.
    #[error("Amadeus API error {status}: {body}")]
    Api { status: u16, body: Value },

    /// DNS, connect, timeout, or an unreadable response body.
    #[error("transport error: {0}")]
    Transport(String),

    /// Tool input rejected before any request was made.
    #[error("invalid parameters: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

pub type Result<T, E = AmadeusError> = std::result::Result<T, E>;

impl AmadeusError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "authentication_error",
            Self::Api { .. } => "api_error",
            Self::Transport(_) => "transport_error",
            Self::Validation(_) => "validation_error",
            Self::Configuration(_) => "configuration_error",
            Self::UnknownTool(_) => "unknown_tool",
        }
    }

    /// Upstream HTTP status, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => *status,
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream body, when the failure came from a response
    pub fn upstream_body(&self) -> Option<&Value> {
        match self {
            Self::Authentication { body, .. } | Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Structured form handed to tool-calling clients
    pub fn to_json(&self) -> Value {
        let mut out = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        if let Some(status) = self.status() {
            out["status"] = json!(status);
        }
        if let Some(body) = self.upstream_body() {
            out["body"] = body.clone();
        }
        out
    }
}

impl From<wreq::Error> for AmadeusError {
    fn from(e: wreq::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("request timed out: {e}"))
        } else {
            Self::Transport(e.to_string())
        }
    }
}
