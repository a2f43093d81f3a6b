// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZebraPrintError};

/// Host setting key for the "Enable Zebra Browser Print" toggle.
pub const ENABLED_KEY: &str = "zebra_browser_print.enabled";

/// Where Browser Print listens unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9100";

/// Default bound on discovery and submission round-trips.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Settings for talking to the local Browser Print service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Browser Print agent (no trailing path).
    pub base_url: String,
    /// Upper bound for a single discovery or submission call.
    pub timeout_ms: u64,
    /// Printer uid to prefer over the first discovered printer.
    pub default_printer: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_printer: None,
        }
    }
}

impl ClientConfig {
    /// The per-call timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build the URL for an endpoint below the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Reject configurations the transport cannot work with.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ZebraPrintError::InvalidConfig("base URL is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ZebraPrintError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{url}'"
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ZebraPrintError::InvalidConfig(
                "timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
