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

//! # Blocking client
//!
//! Same requests and token cache as [`crate::AmadeusClient`], driven by a
//! private current-thread runtime. Must not be called from inside an async
//! runtime.

use crate::client::{self, ApiRequest};
use crate::config::AmadeusConfig;
use crate::error::{AmadeusError, Result};
use crate::tool_catalog::ToolCatalog;
use amadeus_token_cache::AccessToken;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Clone)]
pub struct AmadeusClient {
    inner: client::AmadeusClient,
    runtime: Arc<Runtime>,
}

impl AmadeusClient {
    pub fn new(config: AmadeusConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AmadeusError::Configuration(format!("failed to start runtime: {e}")))?;
        let inner = {
            let _guard = runtime.enter();
            client::AmadeusClient::new(config)?
        };
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(AmadeusConfig::from_env()?)
    }

    /// The async client sharing this client's token cache
    pub fn as_async(&self) -> &client::AmadeusClient {
        &self.inner
    }

    pub fn token_refreshes(&self) -> u64 {
        self.inner.token_refreshes()
    }

    /// Run any async operation of this crate to completion
    pub fn block_on<'a, F, Fut, T>(&'a self, op: F) -> T
    where
        F: FnOnce(&'a client::AmadeusClient) -> Fut,
        Fut: Future<Output = T> + 'a,
    {
        self.runtime.block_on(op(&self.inner))
    }

    pub fn get_token(&self) -> Result<AccessToken> {
        self.runtime.block_on(self.inner.get_token())
    }

    pub fn execute(&self, request: &ApiRequest) -> Result<Value> {
        self.runtime.block_on(self.inner.execute(request))
    }

    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.runtime.block_on(self.inner.get(path, query))
    }

    pub fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.runtime.block_on(self.inner.post(path, body))
    }

    pub fn delete(&self, path: &str) -> Result<Value> {
        self.runtime.block_on(self.inner.delete(path))
    }

    /// Run a catalog tool by name
    pub fn invoke(&self, name: &str, args: Value) -> Result<Value> {
        self.runtime
            .block_on(ToolCatalog::new().invoke(&self.inner, name, args))
    }

    pub fn invoke_text(&self, name: &str, args: Value) -> Result<String> {
        self.runtime
            .block_on(ToolCatalog::new().invoke_text(&self.inner, name, args))
    }
}
