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

// Library for mcp-amadeus
// Thin client over the Amadeus self-service travel APIs (flights, hotels,
// locations, analytics, orders, activities, transfers, insights)

mod client;
mod config;
mod error;
mod projection;
mod validate;

pub mod blocking;
pub mod tool_catalog;

pub mod activities_api;
pub mod analytics_api;
pub mod flights_api;
pub mod hotels_api;
pub mod insights_api;
pub mod locations_api;
pub mod orders_api;
pub mod transfers_api;

pub use client::{AmadeusClient, ApiRequest, Method, path_segment};
pub use config::{
    AmadeusConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ENV_BASE_URL, ENV_CLIENT_ID,
    ENV_CLIENT_SECRET,
};
pub use error::{AmadeusError, Result};
pub use tool_catalog::{AGENT_TOOL_PREFIX, ToolCatalog, ToolSpec};

pub use amadeus_token_cache::AccessToken;
