// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label bodies: fetch them from the host and check they are ZPL before
// anything goes to a printer.

use std::time::Duration;

use reqwest::header::ACCEPT;
use tracing::{debug, instrument};

use zebra_print_core::error::{Result, ZebraPrintError};
use zebra_print_core::types::ContentKind;

/// ZPL format start / end.
const ZPL_START: &str = "^XA";
const ZPL_END: &str = "^XZ";

/// RFID write / read commands.
const RFID_COMMANDS: [&str; 2] = ["^RFW", "^RFR"];

/// What a label body contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelInspection {
    pub kind: ContentKind,
    /// The ZPL encodes or reads an RFID tag.
    pub has_rfid: bool,
}

/// Classify a label body.
pub fn inspect(body: &str) -> LabelInspection {
    if body.contains(ZPL_START) && body.contains(ZPL_END) {
        return LabelInspection {
            kind: ContentKind::Zpl,
            has_rfid: RFID_COMMANDS.iter().any(|cmd| body.contains(cmd)),
        };
    }

    let head = body.trim_start();
    let kind = if head.starts_with("%PDF") {
        ContentKind::Pdf
    } else if head.starts_with('<') {
        ContentKind::Html
    } else {
        ContentKind::Unknown
    };
    LabelInspection {
        kind,
        has_rfid: false,
    }
}

/// Download a rendered label as text.
#[instrument(skip(client))]
pub async fn fetch_label(client: &reqwest::Client, url: &str, timeout: Duration) -> Result<String> {
    let fetch = async {
        let response = client
            .get(url)
            .header(ACCEPT, "text/plain, */*")
            .send()
            .await?
            .error_for_status()?;
        response.text().await
    };

    let body = tokio::time::timeout(timeout, fetch)
        .await
        .map_err(|_| {
            ZebraPrintError::LabelFetch(format!("{url}: no response within {} ms", timeout.as_millis()))
        })?
        .map_err(|e| ZebraPrintError::LabelFetch(format!("{url}: {e}")))?;

    debug!(bytes = body.len(), "label downloaded");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zpl_needs_both_markers() {
        assert_eq!(inspect("^XA^FO50,50^FDHello^FS^XZ").kind, ContentKind::Zpl);
        assert_eq!(inspect("^XA^FO50,50^FDHello^FS").kind, ContentKind::Unknown);
        assert_eq!(inspect("^FDHello^FS^XZ").kind, ContentKind::Unknown);
    }

    #[test]
    fn detects_rfid_encoding() {
        let rfid = inspect("^XA^RS8^RFW,H^FD3034257BF7194E4000000001^FS^XZ");
        assert_eq!(rfid.kind, ContentKind::Zpl);
        assert!(rfid.has_rfid);

        let read = inspect("^XA^RFR,H^FN1^FS^XZ");
        assert!(read.has_rfid);

        assert!(!inspect("^XA^FDplain^FS^XZ").has_rfid);
    }

    #[test]
    fn recognises_other_formats() {
        assert_eq!(inspect("%PDF-1.7\n...").kind, ContentKind::Pdf);
        assert_eq!(inspect("  <!DOCTYPE html><html>").kind, ContentKind::Html);
        assert_eq!(inspect("").kind, ContentKind::Unknown);
        assert_eq!(inspect("label,qty\nA,1").kind, ContentKind::Unknown);
    }

    #[test]
    fn rfid_outside_zpl_is_ignored() {
        assert!(!inspect("<p>^RFW</p>").has_rfid);
    }
}
