use std::{net::SocketAddr, path::Path, time::Duration};

use crate::foundation::error::{FolioError, FolioResult};

pub const DEFAULT_ROUTE: &str = "/api/contact";

/// Settings for the contact relay server.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    /// Downstream webhook every submission is forwarded to.
    pub webhook_url: String,
    pub timeout_ms: u64,
    pub route: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            webhook_url: String::new(),
            timeout_ms: 10_000,
            route: DEFAULT_ROUTE.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn from_path(path: &Path) -> FolioResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FolioError::configuration(format!("read relay config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&raw)
            .map_err(|e| FolioError::serde(format!("relay config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> FolioResult<()> {
        if self.webhook_url.trim().is_empty() {
            return Err(FolioError::validation("webhook_url is required"));
        }
        let url = reqwest::Url::parse(&self.webhook_url)
            .map_err(|e| FolioError::validation(format!("webhook_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FolioError::validation(format!(
                "webhook_url must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(FolioError::validation("timeout_ms must be > 0"));
        }
        if !self.route.starts_with('/') {
            return Err(FolioError::validation(format!(
                "route '{}' must start with '/'",
                self.route
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/config.rs"]
mod tests;
