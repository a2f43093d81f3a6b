// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Zebra Print.

use std::time::Duration;

use thiserror::Error;

/// Top-level error type for all Zebra Print operations.
#[derive(Debug, Error)]
pub enum ZebraPrintError {
    // -- Browser Print service --
    #[error("Browser Print service unavailable at {url}: {reason}")]
    ServiceUnavailable { url: String, reason: String },

    #[error("Browser Print service at {url} did not respond within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("malformed response from Browser Print: {0}")]
    MalformedResponse(String),

    #[error("printer rejected the job: {0}")]
    Printer(String),

    // -- Printer selection --
    #[error("no printer selected")]
    NoPrinterSelected,

    #[error("printer {0} is not attached")]
    UnknownPrinter(String),

    // -- Label source --
    #[error("could not fetch label: {0}")]
    LabelFetch(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ZebraPrintError {
    /// Whether the local print service could not be reached at all
    /// (connection failure or timeout), as opposed to a reachable service
    /// that answered badly.
    pub fn is_service_unavailable(&self) -> bool {
        matches!(
            self,
            ZebraPrintError::ServiceUnavailable { .. } | ZebraPrintError::Timeout { .. }
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ZebraPrintError>;
