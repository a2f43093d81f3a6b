// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cached list of printers reported by Browser Print.
//
// The snapshot is replaced wholesale on every successful refresh.  Readers
// clone the `Arc` and never wait on the network, so a UI can render the
// printer list at any time, even before the first refresh has completed.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, instrument, warn};

use zebra_print_core::error::Result;
use zebra_print_core::types::PrinterDescriptor;

use crate::transport::Transport;

/// Printer registry backed by a `Transport`.
pub struct PrinterRegistry {
    transport: Arc<dyn Transport>,
    snapshot: RwLock<Arc<[PrinterDescriptor]>>,
    /// Printer id that wins over "first in the list" when choosing a default.
    preferred: Option<String>,
}

impl PrinterRegistry {
    /// Create an empty registry; call [`refresh`](Self::refresh) to populate it.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            snapshot: RwLock::new(Arc::from(Vec::new())),
            preferred: None,
        }
    }

    /// Prefer the printer with this id as the default when it is attached.
    pub fn with_preferred(mut self, printer_id: Option<String>) -> Self {
        self.preferred = printer_id;
        self
    }

    /// Ask the service for its printers and swap in the new list.
    ///
    /// On failure the previous snapshot is kept and the error returned.
    /// Returns the number of printers in the new snapshot.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<usize> {
        match self.transport.discover().await.into_result() {
            Ok(printers) => {
                let count = printers.len();
                *self
                    .snapshot
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Arc::from(printers);
                info!(count, "printer registry refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "printer discovery failed, keeping previous list");
                Err(e)
            }
        }
    }

    /// The last successful snapshot (empty before the first refresh).
    pub fn list(&self) -> Arc<[PrinterDescriptor]> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Look up a printer by id in the current snapshot.
    pub fn get(&self, printer_id: &str) -> Option<PrinterDescriptor> {
        self.list().iter().find(|p| p.id == printer_id).cloned()
    }

    /// The preferred printer if attached, else the first one, else `None`.
    pub fn get_default(&self) -> Option<PrinterDescriptor> {
        let printers = self.list();
        self.preferred
            .as_deref()
            .and_then(|id| printers.iter().find(|p| p.id == id))
            .or_else(|| printers.first())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use zebra_print_core::error::ZebraPrintError;
    use zebra_print_core::types::{ConnectionType, PrintJob};

    use super::*;
    use crate::discovery::DiscoveryOutcome;

    /// Serves whatever discovery outcome it currently holds.
    struct ScriptedService {
        outcome: Mutex<DiscoveryOutcome>,
        calls: AtomicUsize,
    }

    impl ScriptedService {
        fn new(outcome: DiscoveryOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(outcome),
                calls: AtomicUsize::new(0),
            })
        }

        fn set(&self, outcome: DiscoveryOutcome) {
            *self.outcome.lock().unwrap() = outcome;
        }
    }

    #[async_trait]
    impl Transport for ScriptedService {
        async fn discover(&self) -> DiscoveryOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.lock().unwrap().clone()
        }

        async fn submit_job(&self, _job: &PrintJob, _printer: &PrinterDescriptor) -> Result<()> {
            Ok(())
        }
    }

    fn front_desk() -> PrinterDescriptor {
        PrinterDescriptor::new("ZT410-1", "Front Desk", ConnectionType::Usb)
    }

    fn dock() -> PrinterDescriptor {
        PrinterDescriptor::new("10.0.0.21", "Dock 2", ConnectionType::Network)
    }

    #[test]
    fn list_is_empty_before_refresh() {
        let service = ScriptedService::new(DiscoveryOutcome::Found(vec![front_desk()]));
        let registry = PrinterRegistry::new(service.clone());
        assert!(registry.list().is_empty());
        assert!(registry.get_default().is_none());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refresh_is_idempotent() {
        let service = ScriptedService::new(DiscoveryOutcome::Found(vec![front_desk(), dock()]));
        let registry = PrinterRegistry::new(service.clone());

        assert_eq!(registry.refresh().await.unwrap(), 2);
        let first = registry.list();
        assert_eq!(registry.refresh().await.unwrap(), 2);
        let second = registry.list();

        assert_eq!(&*first, &*second);
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_last_snapshot() {
        let service = ScriptedService::new(DiscoveryOutcome::Found(vec![front_desk()]));
        let registry = PrinterRegistry::new(service.clone());
        registry.refresh().await.unwrap();

        service.set(DiscoveryOutcome::Unreachable {
            url: "http://localhost:9100/available".into(),
            reason: "connection refused".into(),
        });
        let err = registry.refresh().await.unwrap_err();
        assert!(err.is_service_unavailable());
        assert_eq!(registry.list().len(), 1);

        service.set(DiscoveryOutcome::Malformed("bad json".into()));
        assert!(matches!(
            registry.refresh().await,
            Err(ZebraPrintError::MalformedResponse(_))
        ));
        assert_eq!(registry.list()[0].id, "ZT410-1");
    }

    #[tokio::test]
    async fn empty_service_clears_snapshot() {
        let service = ScriptedService::new(DiscoveryOutcome::Found(vec![front_desk()]));
        let registry = PrinterRegistry::new(service.clone());
        registry.refresh().await.unwrap();

        service.set(DiscoveryOutcome::Found(vec![]));
        assert_eq!(registry.refresh().await.unwrap(), 0);
        assert!(registry.list().is_empty());
        assert!(registry.get_default().is_none());
    }

    #[tokio::test]
    async fn default_prefers_configured_printer() {
        let service = ScriptedService::new(DiscoveryOutcome::Found(vec![front_desk(), dock()]));

        let plain = PrinterRegistry::new(service.clone());
        plain.refresh().await.unwrap();
        assert_eq!(plain.get_default().unwrap().id, "ZT410-1");

        let preferring = PrinterRegistry::new(service.clone()).with_preferred(Some("10.0.0.21".into()));
        preferring.refresh().await.unwrap();
        assert_eq!(preferring.get_default().unwrap().name, "Dock 2");

        let missing = PrinterRegistry::new(service).with_preferred(Some("gone".into()));
        missing.refresh().await.unwrap();
        assert_eq!(missing.get_default().unwrap().id, "ZT410-1");
    }

    #[tokio::test]
    async fn get_finds_by_id() {
        let service = ScriptedService::new(DiscoveryOutcome::Found(vec![front_desk(), dock()]));
        let registry = PrinterRegistry::new(service);
        registry.refresh().await.unwrap();
        assert_eq!(registry.get("10.0.0.21").unwrap().name, "Dock 2");
        assert!(registry.get("nope").is_none());
    }
}
