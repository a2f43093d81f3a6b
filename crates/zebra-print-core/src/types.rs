// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Zebra Browser Print client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a print job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a printer is attached to the machine running Browser Print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Usb,
    Network,
    Bluetooth,
}

impl ConnectionType {
    /// Keyword Browser Print uses for this connection.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Usb => "usb",
            Self::Network => "network",
            Self::Bluetooth => "bluetooth",
        }
    }

    /// Parse the `connection` field of a discovered device.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "usb" => Some(Self::Usb),
            "network" => Some(Self::Network),
            "bluetooth" | "bt" => Some(Self::Bluetooth),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A Zebra printer reported by the local Browser Print service.
///
/// The optional attributes are for display.  When the printer came from
/// discovery, `record` holds the device object exactly as the service sent
/// it, and that object is what goes back on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterDescriptor {
    /// Registry key: the Browser Print `uid`, or the name when `uid` is empty.
    pub id: String,
    /// Display name.
    pub name: String,
    pub connection: ConnectionType,
    pub device_type: Option<String>,
    pub version: Option<String>,
    pub provider: Option<String>,
    pub manufacturer: Option<String>,
    /// Raw device object from `GET /available`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<serde_json::Value>,
}

impl PrinterDescriptor {
    /// Descriptor with only the fields the registry and dispatcher rely on.
    pub fn new(id: impl Into<String>, name: impl Into<String>, connection: ConnectionType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            connection,
            device_type: None,
            version: None,
            provider: None,
            manufacturer: None,
            record: None,
        }
    }
}

/// One ZPL submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    id: JobId,
    payload: String,
    target_printer_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl PrintJob {
    /// `target_printer_id` of `None` means "the registry default".
    pub fn new(payload: impl Into<String>, target_printer_id: Option<String>) -> Self {
        Self {
            id: JobId::new(),
            payload: payload.into(),
            target_printer_id,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    /// Raw ZPL command stream.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn target_printer_id(&self) -> Option<&str> {
        self.target_printer_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Snapshot of the host's "Enable Zebra Browser Print" toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlag {
    pub enabled: bool,
}

/// What a label body looks like before it is sent anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Zpl,
    Pdf,
    Html,
    Unknown,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Zpl => "ZPL",
            Self::Pdf => "PDF",
            Self::Html => "HTML",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Result of one dispatch attempt, as reported to the host UI.
///
/// Every attempt ends in exactly one of these; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// The service accepted the job.
    Success { printer_name: String },
    /// The feature flag is off; no network call was made.
    Disabled,
    /// No explicit printer and no default available.
    NoPrinterSelected,
    /// An explicit printer id that the registry does not know.
    UnknownPrinter(String),
    /// Service unreachable or timed out.
    ServiceUnavailable(String),
    /// Service reachable but rejected the job.
    PrinterError(String),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// `Disabled` is informational and does not count as a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Success { .. } | Self::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_wire_keywords() {
        assert_eq!(ConnectionType::from_wire("USB"), Some(ConnectionType::Usb));
        assert_eq!(ConnectionType::from_wire(" network "), Some(ConnectionType::Network));
        assert_eq!(
            ConnectionType::from_wire("bluetooth"),
            Some(ConnectionType::Bluetooth)
        );
        assert_eq!(ConnectionType::from_wire("driver"), None);
        assert_eq!(ConnectionType::Network.to_string(), "network");
    }

    #[test]
    fn print_job_keeps_what_it_was_given() {
        let job = PrintJob::new("^XA^FDhi^FS^XZ", Some("ZT410-1".into()));
        assert_eq!(job.payload(), "^XA^FDhi^FS^XZ");
        assert_eq!(job.target_printer_id(), Some("ZT410-1"));

        let other = PrintJob::new("^XA^XZ", None);
        assert_ne!(job.id(), other.id());
        assert!(other.target_printer_id().is_none());
    }

    #[test]
    fn disabled_is_not_a_failure() {
        assert!(!DispatchOutcome::Disabled.is_failure());
        assert!(!DispatchOutcome::Disabled.is_success());
        assert!(DispatchOutcome::NoPrinterSelected.is_failure());
        assert!(DispatchOutcome::ServiceUnavailable("down".into()).is_failure());
        assert!(
            DispatchOutcome::Success {
                printer_name: "Front Desk".into()
            }
            .is_success()
        );
    }
}
