//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Process configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Server-side Stripe secret key
    pub stripe_secret_key: String,
    /// Publishable key handed to Stripe.js
    pub stripe_publishable_key: String,
    pub bind_addr: String,
    /// Where the storefront page reads `/api/products` from
    pub catalog_base_url: String,
    /// Root of static assets; the WASM bundle lives in `pkg/` below it
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let catalog_base_url = get("CATALOG_BASE_URL")
            .map_or_else(|| local_base_url(&bind_addr), |url| url.trim_end_matches('/').to_string());

        Ok(Self {
            stripe_secret_key: require("STRIPE_SECRET_KEY")?,
            stripe_publishable_key: require("STRIPE_PUBLISHABLE_KEY")?,
            bind_addr,
            catalog_base_url,
            static_dir: get("STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
        })
    }
}

/// `http://` URL of this server as seen from the same host.
///
/// Wildcard bind addresses are reached over loopback.
pub fn local_base_url(bind_addr: &str) -> String {
    match bind_addr.parse::<SocketAddr>() {
        Ok(addr) if addr.ip().is_unspecified() => {
            let loopback = if addr.is_ipv4() { "127.0.0.1" } else { "[::1]" };
            format!("http://{loopback}:{}", addr.port())
        }
        Ok(addr) => format!("http://{addr}"),
        Err(_) => format!("http://{bind_addr}"),
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("stripe_secret_key", &"<redacted>")
            .field("stripe_publishable_key", &self.stripe_publishable_key)
            .field("bind_addr", &self.bind_addr)
            .field("catalog_base_url", &self.catalog_base_url)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}
