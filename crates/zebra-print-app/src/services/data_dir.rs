// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

use zebra_print_client::settings::SETTINGS_FILE;

/// Directory name under the XDG data home.
const APP_DIR: &str = "zebra-print";

/// Return the application data directory.
///
/// An explicit directory (from `--data-dir` or `ZEBRA_PRINT_DATA_DIR`) wins.
/// Nothing is created here; saving settings creates the directory on demand.
pub fn data_dir(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => resolve(
            std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
            std::env::var_os("HOME").map(PathBuf::from),
        ),
    }
}

/// Path of the settings file inside `dir`.
pub fn settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

fn resolve(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    // Try XDG data dir, then fallback to home
    let base = xdg_data_home
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| home.map(|h| h.join(".local").join("share")))
        // Last resort
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_DIR)
}
