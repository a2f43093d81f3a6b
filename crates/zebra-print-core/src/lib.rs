// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zebra Print — core types, errors, and configuration shared across crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::ClientConfig;
pub use error::ZebraPrintError;
pub use types::*;
