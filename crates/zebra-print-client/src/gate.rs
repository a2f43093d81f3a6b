// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Feature gate for the "Enable Zebra Browser Print" toggle.
//
// The flag belongs to the host.  The gate reads it once per dispatch and
// never caches it; another session may flip it between two prints.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use zebra_print_core::error::Result;
use zebra_print_core::types::FeatureFlag;

use crate::settings::Settings;

/// Where the host keeps the enable flag.
pub trait FlagSource: Send + Sync {
    fn read(&self) -> Result<FeatureFlag>;
}

/// In-memory flag the host can flip at runtime.
#[derive(Debug, Default)]
pub struct StaticFlag(AtomicBool);

impl StaticFlag {
    pub fn new(enabled: bool) -> Self {
        Self(AtomicBool::new(enabled))
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }
}

impl FlagSource for StaticFlag {
    fn read(&self) -> Result<FeatureFlag> {
        Ok(FeatureFlag {
            enabled: self.0.load(Ordering::SeqCst),
        })
    }
}

/// Flag read from the settings file on every call.
#[derive(Debug, Clone)]
pub struct SettingsFlag {
    path: PathBuf,
}

impl SettingsFlag {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FlagSource for SettingsFlag {
    fn read(&self) -> Result<FeatureFlag> {
        let settings = Settings::load(&self.path)?;
        Ok(FeatureFlag {
            enabled: settings.enabled,
        })
    }
}

/// Answers "may we print right now?".
#[derive(Clone)]
pub struct FeatureGate {
    source: Arc<dyn FlagSource>,
}

impl FeatureGate {
    pub fn new(source: Arc<dyn FlagSource>) -> Self {
        Self { source }
    }

    /// One fresh read of the flag.  An unreadable flag counts as disabled.
    pub fn is_enabled(&self) -> bool {
        match self.source.read() {
            Ok(flag) => flag.enabled,
            Err(e) => {
                warn!(error = %e, "could not read Browser Print flag, treating as disabled");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SETTINGS_FILE;

    #[test]
    fn static_flag_follows_toggle() {
        let flag = Arc::new(StaticFlag::new(false));
        let gate = FeatureGate::new(flag.clone());
        assert!(!gate.is_enabled());

        flag.set(true);
        assert!(gate.is_enabled());

        flag.set(false);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn settings_flag_sees_changes_from_other_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let gate = FeatureGate::new(Arc::new(SettingsFlag::new(&path)));

        // No file yet: defaults to off.
        assert!(!gate.is_enabled());

        Settings {
            enabled: true,
            ..Default::default()
        }
        .save(&path)
        .unwrap();
        assert!(gate.is_enabled());

        Settings::default().save(&path).unwrap();
        assert!(!gate.is_enabled());
    }

    #[test]
    fn unreadable_flag_is_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "garbage").unwrap();
        let gate = FeatureGate::new(Arc::new(SettingsFlag::new(path)));
        assert!(!gate.is_enabled());
    }
}
