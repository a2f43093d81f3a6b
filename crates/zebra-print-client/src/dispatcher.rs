// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print dispatcher: gate check, printer resolution, submission, and mapping
// of the transport result into a `DispatchOutcome` the host can display.
//
// Nothing here retries.  Concurrent dispatches are independent of each other
// and unordered; callers that need ordering must await one before the next.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use zebra_print_core::error::ZebraPrintError;
use zebra_print_core::types::{ContentKind, DispatchOutcome, PrintJob, PrinterDescriptor};

use crate::gate::FeatureGate;
use crate::label::{self, LabelInspection};
use crate::registry::PrinterRegistry;
use crate::transport::Transport;

/// Outcome of printing a label body that may not be ZPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome {
    /// The body was ZPL (or the gate was off) and went through `dispatch`.
    Dispatched(DispatchOutcome),
    /// The body is not ZPL; nothing was sent.
    NotZpl(ContentKind),
}

/// Sends ZPL to printers known to a `PrinterRegistry`.
pub struct PrintDispatcher {
    transport: Arc<dyn Transport>,
    registry: Arc<PrinterRegistry>,
    gate: FeatureGate,
}

impl PrintDispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        registry: Arc<PrinterRegistry>,
        gate: FeatureGate,
    ) -> Self {
        Self {
            transport,
            registry,
            gate,
        }
    }

    pub fn registry(&self) -> &Arc<PrinterRegistry> {
        &self.registry
    }

    /// Print `payload` on `printer_id`, or on the registry default when `None`.
    ///
    /// Returns `Disabled` without touching the network when the gate is off.
    /// The registry is not refreshed here; refresh it before dispatching if
    /// the printer list may be stale.
    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    pub async fn dispatch(&self, payload: &str, printer_id: Option<&str>) -> DispatchOutcome {
        if !self.gate.is_enabled() {
            debug!("Browser Print disabled, not dispatching");
            return DispatchOutcome::Disabled;
        }
        self.send(payload, printer_id).await
    }

    /// Print a label body produced by the host, refusing anything that is
    /// not ZPL.
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    pub async fn dispatch_label(&self, body: &str, printer_id: Option<&str>) -> LabelOutcome {
        match self.admit_label(body) {
            Ok(_) => self.send_label(body, printer_id).await,
            Err(outcome) => outcome,
        }
    }

    /// The gate and content checks of [`dispatch_label`](Self::dispatch_label),
    /// with one read of the flag and no network traffic.
    ///
    /// `Err` is the outcome to report; `Ok` means the label may be sent with
    /// [`send_label`](Self::send_label).  A host that refreshes the registry
    /// before printing does so between the two calls.
    pub fn admit_label(&self, body: &str) -> Result<LabelInspection, LabelOutcome> {
        if !self.gate.is_enabled() {
            debug!("Browser Print disabled, not dispatching label");
            return Err(LabelOutcome::Dispatched(DispatchOutcome::Disabled));
        }

        let inspection = label::inspect(body);
        if inspection.kind != ContentKind::Zpl {
            warn!(kind = %inspection.kind, "label is not ZPL, not sending");
            return Err(LabelOutcome::NotZpl(inspection.kind));
        }
        if inspection.has_rfid {
            info!("label carries RFID encoding");
        }
        Ok(inspection)
    }

    /// Send a label already accepted by [`admit_label`](Self::admit_label).
    pub async fn send_label(&self, body: &str, printer_id: Option<&str>) -> LabelOutcome {
        LabelOutcome::Dispatched(self.send(body, printer_id).await)
    }

    async fn send(&self, payload: &str, printer_id: Option<&str>) -> DispatchOutcome {
        let printer = match self.resolve(printer_id) {
            Ok(printer) => printer,
            Err(outcome) => return outcome,
        };

        let job = PrintJob::new(payload, printer_id.map(str::to_owned));
        debug!(job_id = %job.id(), printer = %printer.name, "submitting job");

        match self.transport.submit_job(&job, &printer).await {
            Ok(()) => DispatchOutcome::Success {
                printer_name: printer.name,
            },
            Err(e) if e.is_service_unavailable() => DispatchOutcome::ServiceUnavailable(e.to_string()),
            Err(ZebraPrintError::Printer(reason)) => DispatchOutcome::PrinterError(reason),
            Err(e) => DispatchOutcome::PrinterError(e.to_string()),
        }
    }

    fn resolve(&self, printer_id: Option<&str>) -> Result<PrinterDescriptor, DispatchOutcome> {
        match printer_id {
            Some(id) => self.registry.get(id).ok_or_else(|| {
                warn!(printer_id = id, "requested printer is not in the registry");
                DispatchOutcome::UnknownPrinter(id.to_owned())
            }),
            None => self.registry.get_default().ok_or_else(|| {
                warn!("no default printer available");
                DispatchOutcome::NoPrinterSelected
            }),
        }
    }
}
