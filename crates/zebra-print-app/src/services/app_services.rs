// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads settings, builds the transport, registry,
// gate and dispatcher, and gives the command handlers one object to call.
//
// The enable flag is read from the settings file on every dispatch, not from
// the copy loaded at startup.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use zebra_print_client::label;
use zebra_print_client::{
    DiscoveryOutcome, FeatureGate, HttpTransport, LabelOutcome, PrintDispatcher, PrinterRegistry,
    Settings, SettingsFlag, Transport,
};
use zebra_print_core::config::ClientConfig;
use zebra_print_core::error::{Result, ZebraPrintError};
use zebra_print_core::types::{DispatchOutcome, PrinterDescriptor};

use super::data_dir;

/// Values from flags or the environment that beat the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    /// Apply these overrides on top of `config`.
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.base_url {
            config.base_url.clone_from(url);
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout_ms = ms;
        }
        config
    }
}

/// Everything a command needs to talk to Browser Print.
pub struct AppServices {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    registry: Arc<PrinterRegistry>,
    gate: FeatureGate,
    dispatcher: PrintDispatcher,
    http: reqwest::Client,
}

impl AppServices {
    /// Initialise all services.  Call once per command.
    ///
    /// Reads the settings file, applies `overrides`, and validates the
    /// resulting client configuration.  No network traffic happens here.
    pub fn init(data_dir: &Path, overrides: &Overrides) -> Result<Self> {
        let settings_path = data_dir::settings_path(data_dir);
        info!(path = %settings_path.display(), "initialising app services");

        let settings = Settings::load(&settings_path)?;
        let config = overrides.apply(settings.client);

        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(config.clone())?);
        let registry = Arc::new(
            PrinterRegistry::new(Arc::clone(&transport))
                .with_preferred(config.default_printer.clone()),
        );
        let gate = FeatureGate::new(Arc::new(SettingsFlag::new(&settings_path)));
        let dispatcher = PrintDispatcher::new(Arc::clone(&transport), Arc::clone(&registry), gate.clone());
        let http = reqwest::Client::builder()
            .user_agent(concat!("zebra-print/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ZebraPrintError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self {
            config,
            transport,
            registry,
            gate,
            dispatcher,
            http,
        })
    }

    /// The effective client configuration (settings plus overrides).
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    // -- Discovery -----------------------------------------------------------

    /// One discovery round trip, without touching the registry.
    pub async fn probe(&self) -> DiscoveryOutcome {
        self.transport.discover().await
    }

    /// Refresh the registry and return the printers plus the default.
    pub async fn printers(&self) -> Result<(Arc<[PrinterDescriptor]>, Option<PrinterDescriptor>)> {
        self.registry.refresh().await?;
        Ok((self.registry.list(), self.registry.get_default()))
    }

    // -- Printing ------------------------------------------------------------

    /// Download a label body from the host.
    pub async fn fetch_label(&self, url: &str) -> Result<String> {
        label::fetch_label(&self.http, url, self.config.timeout()).await
    }

    /// Print a label body on `printer_id` or the default printer.
    ///
    /// The printer list is refreshed first so a printer plugged in since the
    /// last command is found.  A service that cannot be reached during that
    /// refresh is reported as `ServiceUnavailable` rather than as a missing
    /// printer.
    pub async fn print_label(&self, body: &str, printer_id: Option<&str>) -> LabelOutcome {
        if let Err(outcome) = self.dispatcher.admit_label(body) {
            return outcome;
        }

        if let Err(e) = self.registry.refresh().await {
            if e.is_service_unavailable() {
                return LabelOutcome::Dispatched(DispatchOutcome::ServiceUnavailable(e.to_string()));
            }
            warn!(error = %e, "printer refresh failed, using cached list");
        }

        self.dispatcher.send_label(body, printer_id).await
    }
}

// -- Settings persistence ----------------------------------------------------

/// Load the settings file, apply `edit`, and write it back.
///
/// A corrupt file is replaced: the edit starts from the defaults.
pub fn update_settings(path: &Path, edit: impl FnOnce(&mut Settings)) -> Result<Settings> {
    let mut settings = match Settings::load(path) {
        Ok(settings) => settings,
        Err(ZebraPrintError::Settings(detail)) => {
            warn!(path = %path.display(), %detail, "settings file unreadable, starting from defaults");
            Settings::default()
        }
        Err(e) => return Err(e),
    };
    edit(&mut settings);
    settings.client.validate()?;
    settings.save(path)?;
    info!(path = %path.display(), enabled = settings.enabled, "settings updated");
    Ok(settings)
}
