// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing messages for print outcomes and errors.
//
// The host UI shows these as toast notifications next to the action that
// triggered the print.

use crate::error::ZebraPrintError;
use crate::types::{ContentKind, DispatchOutcome};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Service down or slow; trying again later may work.
    Transient,
    /// User must do something (start the agent, pick a printer, fix settings).
    ActionRequired,
    /// Retrying will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether re-invoking the same action may succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Notification styling level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
}

/// A toast to show after a print attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// Stays on screen until dismissed.
    pub sticky: bool,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            sticky: false,
        }
    }
}

/// Message for the outcome of a dispatch.
pub fn notify(outcome: &DispatchOutcome) -> Notification {
    match outcome {
        DispatchOutcome::Success { printer_name } => Notification::new(
            format!("Label sent to {printer_name}!"),
            NotificationLevel::Success,
        ),
        DispatchOutcome::Disabled => Notification::new(
            "Zebra Browser Print is disabled in settings.",
            NotificationLevel::Info,
        ),
        DispatchOutcome::NoPrinterSelected => Notification::new(
            "No Zebra printer found. Please connect a Zebra printer.",
            NotificationLevel::Warning,
        ),
        DispatchOutcome::UnknownPrinter(id) => Notification::new(
            format!("Printer {id} is not connected. Pick another printer and try again."),
            NotificationLevel::Warning,
        ),
        DispatchOutcome::ServiceUnavailable(_) => Notification::new(
            "Zebra Browser Print not detected. Install it from zebra.com and make sure it is running.",
            NotificationLevel::Info,
        ),
        DispatchOutcome::PrinterError(reason) => Notification::new(
            format!("Print failed: {reason}."),
            NotificationLevel::Warning,
        ),
    }
}

/// Message for a label body that is not ZPL and was not sent.
pub fn notify_not_zpl(kind: ContentKind) -> Notification {
    Notification {
        message: format!(
            "Label is not in ZPL format (looks like {kind}). Make sure the label report produces ZPL."
        ),
        level: NotificationLevel::Warning,
        sticky: true,
    }
}

/// Convert a `ZebraPrintError` into a `HumanError`.
pub fn humanize_error(err: &ZebraPrintError) -> HumanError {
    match err {
        ZebraPrintError::ServiceUnavailable { .. } => HumanError {
            message: "Zebra Browser Print isn't running.".into(),
            suggestion: "Start the Browser Print app on this computer (install it from zebra.com if needed), then try again.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        ZebraPrintError::Timeout { timeout, .. } => HumanError {
            message: "Zebra Browser Print didn't answer in time.".into(),
            suggestion: format!(
                "It did not respond within {} ms. Check the app is running and not stuck, then try again.",
                timeout.as_millis()
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        ZebraPrintError::MalformedResponse(_) => HumanError {
            message: "Zebra Browser Print sent an answer we didn't understand.".into(),
            suggestion: "Check the configured address points at Browser Print and that it is up to date.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ZebraPrintError::Printer(detail) => HumanError {
            message: "The printer rejected the label.".into(),
            suggestion: format!("Check the printer has labels and the head is closed. (Detail: {detail})"),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        ZebraPrintError::NoPrinterSelected => HumanError {
            message: "No printer selected.".into(),
            suggestion: "Connect a Zebra printer or choose one from the list, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ZebraPrintError::UnknownPrinter(id) => HumanError {
            message: "That printer isn't connected.".into(),
            suggestion: format!("Printer {id} was not reported by Browser Print. Refresh the printer list and pick again."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ZebraPrintError::LabelFetch(detail) => HumanError {
            message: "The label couldn't be downloaded.".into(),
            suggestion: format!("Check you are still signed in and try printing again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        ZebraPrintError::InvalidConfig(detail) => HumanError {
            message: "The print settings are not valid.".into(),
            suggestion: format!("Fix the Browser Print settings and save again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ZebraPrintError::Settings(_) | ZebraPrintError::Serialization(_) => HumanError {
            message: "The saved print settings could not be read.".into(),
            suggestion: "Open the settings, check the values, and save them again.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        ZebraPrintError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, check disk space and permissions.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }
    }
}
