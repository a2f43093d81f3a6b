// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Browser Print wire format.
//
// Discovery is `GET /available`, which answers with
// `{"printer": [{"name", "uid", "connection", "deviceType", ...}]}`.  A job
// is `POST /write` whose body is `{"device": {...}, "data": "<zpl>"}`, where
// `device` echoes back the record obtained from discovery.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use zebra_print_core::error::{Result, ZebraPrintError};
use zebra_print_core::types::{ConnectionType, PrinterDescriptor};

/// Discovery endpoint, relative to the base URL.
pub const AVAILABLE_PATH: &str = "available";

/// Job submission endpoint, relative to the base URL.
pub const WRITE_PATH: &str = "write";

/// What one discovery round-trip produced.
///
/// "Service up, zero printers" is `Found(vec![])`, never `Unreachable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// The service answered with a (possibly empty) device list.
    Found(Vec<PrinterDescriptor>),
    /// Could not connect, or no answer within the timeout.
    Unreachable { url: String, reason: String },
    /// The service answered but the response could not be understood.
    Malformed(String),
}

impl DiscoveryOutcome {
    pub fn into_result(self) -> Result<Vec<PrinterDescriptor>> {
        match self {
            Self::Found(printers) => Ok(printers),
            Self::Unreachable { url, reason } => {
                Err(ZebraPrintError::ServiceUnavailable { url, reason })
            }
            Self::Malformed(details) => Err(ZebraPrintError::MalformedResponse(details)),
        }
    }
}

/// Body of `GET /available`.
///
/// Devices stay as raw JSON so each one can be echoed back untouched.
#[derive(Debug, Deserialize)]
struct AvailableResponse {
    #[serde(default)]
    printer: Vec<Value>,
}

/// A device record as Browser Print spells it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDevice {
    name: String,
    #[serde(default)]
    uid: String,
    connection: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    manufacturer: Option<String>,
}

impl WireDevice {
    fn into_descriptor(self, record: Value) -> Option<PrinterDescriptor> {
        let connection = ConnectionType::from_wire(&self.connection)?;
        let id = if self.uid.is_empty() {
            self.name.clone()
        } else {
            self.uid
        };
        Some(PrinterDescriptor {
            id,
            name: self.name,
            connection,
            device_type: self.device_type,
            version: self.version,
            provider: self.provider,
            manufacturer: self.manufacturer,
            record: Some(record),
        })
    }

    /// Rebuild a record for a printer that did not come from discovery.
    fn from_descriptor(printer: &PrinterDescriptor) -> Self {
        Self {
            name: printer.name.clone(),
            uid: printer.id.clone(),
            connection: printer.connection.as_wire().to_owned(),
            device_type: printer.device_type.clone(),
            version: printer.version.clone(),
            provider: printer.provider.clone(),
            manufacturer: printer.manufacturer.clone(),
        }
    }
}

/// Accept strings, numbers, or booleans for free-form device attributes.
fn loose_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Body of `POST /write`.
#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    device: &'a Value,
    data: &'a str,
}

/// Decode a `GET /available` body into a discovery outcome.
///
/// Devices on a connection type we do not model are skipped with a warning
/// rather than failing the whole list.
pub fn parse_available(body: &[u8]) -> DiscoveryOutcome {
    let response: AvailableResponse = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => return DiscoveryOutcome::Malformed(format!("invalid /available body: {e}")),
    };

    let mut printers = Vec::with_capacity(response.printer.len());
    for record in response.printer {
        let device = match WireDevice::deserialize(&record) {
            Ok(device) => device,
            Err(e) => return DiscoveryOutcome::Malformed(format!("invalid device record: {e}")),
        };
        let name = device.name.clone();
        let connection = device.connection.clone();
        match device.into_descriptor(record) {
            Some(printer) => printers.push(printer),
            None => {
                warn!(printer = %name, connection = %connection, "skipping device with unsupported connection");
            }
        }
    }

    debug!(count = printers.len(), "decoded Browser Print device list");
    DiscoveryOutcome::Found(printers)
}

/// Encode the `POST /write` body for `zpl` on `printer`.
///
/// A discovered printer's record goes back unchanged: same `uid`, same
/// `connection` spelling, same `version` type.
pub fn write_request_body(printer: &PrinterDescriptor, zpl: &str) -> Result<String> {
    let rebuilt;
    let device = match &printer.record {
        Some(record) => record,
        None => {
            rebuilt = serde_json::to_value(WireDevice::from_descriptor(printer))?;
            &rebuilt
        }
    };
    Ok(serde_json::to_string(&WriteRequest { device, data: zpl })?)
}
