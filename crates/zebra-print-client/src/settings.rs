// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persisted host settings: the enable toggle plus client configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use zebra_print_core::config::ClientConfig;
use zebra_print_core::error::{Result, ZebraPrintError};

/// File name inside the data directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Everything the host persists for this integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// "Enable Zebra Browser Print".
    #[serde(rename = "zebra_browser_print.enabled", default)]
    pub enabled: bool,
    #[serde(default)]
    pub client: ClientConfig,
}

impl Settings {
    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data)
            .map_err(|e| ZebraPrintError::Settings(format!("{}: {e}", path.display())))
    }

    /// Write settings to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), enabled = self.enabled, "settings saved");
        Ok(())
    }
}
