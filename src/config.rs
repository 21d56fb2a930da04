use std::env;
use std::net::SocketAddr;

use anyhow::Context;

/// Sentinel API key selecting the fixed demo quote instead of a live fetch.
pub const DEMO_API_KEY: &str = "demo";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the REST API binds to.
    pub listen_addr: SocketAddr,
    /// Alpha Vantage credential; `demo` (or unset) keeps the adapter offline.
    pub alpha_vantage_api_key: String,
}

impl Config {
    /// Reads configuration from the environment. `.env` is loaded by the
    /// binary before this runs.
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr = env::var("MARKETDASH_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse::<SocketAddr>()
            .context("MARKETDASH_ADDR is not a valid socket address")?;

        let alpha_vantage_api_key =
            env::var("ALPHA_VANTAGE_API_KEY").unwrap_or_else(|_| DEMO_API_KEY.to_string());

        Ok(Self {
            listen_addr,
            alpha_vantage_api_key,
        })
    }

    pub fn demo_mode(&self) -> bool {
        self.alpha_vantage_api_key == DEMO_API_KEY
    }
}
