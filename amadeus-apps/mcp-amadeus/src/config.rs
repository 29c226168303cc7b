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

//! # Client configuration
//!
//! Credentials and endpoint, read once from `AMADEUS_*` environment variables
//! or built in code.

use crate::error::{AmadeusError, Result};
use std::fmt;
use std::time::Duration;

pub const ENV_CLIENT_ID: &str = "AMADEUS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AMADEUS_CLIENT_SECRET";
pub const ENV_BASE_URL: &str = "AMADEUS_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AmadeusConfig {
    client_id: String,
    client_secret: String,
    base_url: String,
    timeout: Duration,
}

impl AmadeusConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `AMADEUS_CLIENT_ID`, `AMADEUS_CLIENT_SECRET` and `AMADEUS_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AmadeusConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = non_empty(ENV_CLIENT_ID)
            .ok_or_else(|| AmadeusError::Configuration(format!("{ENV_CLIENT_ID} is not set")))?;
        let client_secret = non_empty(ENV_CLIENT_SECRET).ok_or_else(|| {
            AmadeusError::Configuration(format!("{ENV_CLIENT_SECRET} is not set"))
        })?;

        let mut config = Self::new(client_id, client_secret);
        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn token_url(&self) -> String {
        format!("{}/v1/security/oauth2/token", self.base_url)
    }
}

impl fmt::Debug for AmadeusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmadeusConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
