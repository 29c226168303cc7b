//! Amadeus Token Cache
//! Copyright (c) 2026 Mamy Ratsimbazafy
//! Licensed and distributed under either of
//!   * MIT license (license terms at the root of the package or at http://opensource.org/licenses/MIT).
//!   * Apache v2 license (license terms at the root of the package or at http://www.apache.org/licenses/LICENSE-2.0).
//! at your option. This file may not be copied, modified, or distributed except according to those terms.

//! amadeus-internals/token-cache
//! A single-flight cache for short-lived bearer tokens issued by an external service

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default margin subtracted from the issuer's advertised lifetime
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Advertised lifetimes below this are rounded up to it
pub const MIN_ISSUED_LIFETIME: Duration = Duration::from_secs(1);

/// A bearer token together with the instant after which it must not be sent
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            value: value.into(),
            expires_at: Instant::now() + lifetime,
        }
    }

    /// The raw bearer string, for the `Authorization` header
    pub fn secret(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// What the issuer handed back: the token and its advertised lifetime
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: Duration,
}

/// Caches one token and refreshes it on demand
///
/// The refresh runs while the slot lock is held, so concurrent callers that
/// find the slot empty or expired wait for the in-flight refresh and reuse its
/// result instead of issuing their own.
///
/// # Examples
///
/// ```ignore
/// let cache = TokenCache::new();
/// let token = cache
///     .get_or_refresh(|| async { fetch_from_issuer().await })
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct TokenCache {
    slot: Arc<Mutex<Option<AccessToken>>>,
    refresh_margin: Duration,
    refreshes: Arc<AtomicU64>,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            refresh_margin: DEFAULT_REFRESH_MARGIN,
            refreshes: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that treats tokens as expired `margin` before the issuer says so
    pub fn with_refresh_margin(margin: Duration) -> Self {
        Self {
            refresh_margin: margin,
            ..Default::default()
        }
    }

    pub fn refresh_margin(&self) -> Duration {
        self.refresh_margin
    }

    /// Number of successful refreshes performed since creation
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::SeqCst)
    }

    /// Lifetime actually granted to a token the issuer advertised as `expires_in`
    ///
    /// Short-lived tokens that would not survive the margin get half their
    /// advertised lifetime instead, so a fresh token never starts out expired.
    /// An advertised lifetime of zero counts as [`MIN_ISSUED_LIFETIME`].
    pub fn effective_lifetime(&self, expires_in: Duration) -> Duration {
        let expires_in = expires_in.max(MIN_ISSUED_LIFETIME);
        if expires_in > self.refresh_margin {
            expires_in - self.refresh_margin
        } else {
            expires_in / 2
        }
    }

    /// Return the cached token, or run `fetch` to obtain a new one
    ///
    /// A failed fetch leaves the slot untouched and hands the error back to the
    /// caller; nothing is retried here.
    pub async fn get_or_refresh<F, Fut, E>(&self, fetch: F) -> Result<AccessToken, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<IssuedToken, E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
        }

        let issued = fetch().await?;
        let token = AccessToken::new(
            issued.access_token,
            self.effective_lifetime(issued.expires_in),
        );
        *slot = Some(token.clone());
        self.refreshes.fetch_add(1, Ordering::SeqCst);

        Ok(token)
    }

    /// Drop the cached token if it is still `stale`
    ///
    /// Returns `false` when another caller already replaced it.
    pub async fn invalidate(&self, stale: &AccessToken) -> bool {
        let mut slot = self.slot.lock().await;
        match slot.as_ref() {
            Some(current) if current.value == stale.value => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Peek at the cached token without refreshing
    pub async fn current(&self) -> Option<AccessToken> {
        self.slot.lock().await.clone()
    }
}
