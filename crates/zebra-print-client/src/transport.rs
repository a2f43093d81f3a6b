// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP transport to the local Browser Print agent.
//
// Two operations only: list attached printers and write a ZPL job to one of
// them.  Every call is bounded by the configured timeout and never retried
// here; the caller decides what to do with a failure.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, info, instrument, warn};

use zebra_print_core::config::ClientConfig;
use zebra_print_core::error::{Result, ZebraPrintError};
use zebra_print_core::types::{PrintJob, PrinterDescriptor};

use crate::discovery::{self, AVAILABLE_PATH, DiscoveryOutcome, WRITE_PATH};

/// Connection to a print service that can list printers and accept jobs.
#[async_trait]
pub trait Transport: Send + Sync {
    /// List the printers the service currently sees.
    async fn discover(&self) -> DiscoveryOutcome;

    /// Send `job` to `printer`.
    ///
    /// `Err(Printer(_))` means the service answered and refused the job;
    /// `ServiceUnavailable` / `Timeout` mean it could not be reached.
    async fn submit_job(&self, job: &PrintJob, printer: &PrinterDescriptor) -> Result<()>;
}

/// `Transport` over Browser Print's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Build a transport for `config`; fails if the config is unusable.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("zebra-print/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.timeout())
            .build()
            .map_err(|e| ZebraPrintError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn discover(&self) -> DiscoveryOutcome {
        let url = self.config.endpoint(AVAILABLE_PATH);
        let timeout = self.config.timeout();

        let fetch = async {
            let response = self
                .client
                .get(&url)
                .header(ACCEPT, "application/json")
                .send()
                .await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match tokio::time::timeout(timeout, fetch).await {
            Err(_) => {
                warn!(url = %url, timeout_ms = timeout.as_millis(), "Browser Print discovery timed out");
                return DiscoveryOutcome::Unreachable {
                    url,
                    reason: format!("no response within {} ms", timeout.as_millis()),
                };
            }
            Ok(Err(e)) => {
                debug!(url = %url, error = %e, "Browser Print not reachable");
                return DiscoveryOutcome::Unreachable {
                    url,
                    reason: e.to_string(),
                };
            }
            Ok(Ok(pair)) => pair,
        };

        if !status.is_success() {
            warn!(url = %url, status = %status, "Browser Print discovery returned an error status");
            return DiscoveryOutcome::Malformed(format!("GET {url} returned {status}"));
        }

        discovery::parse_available(&body)
    }

    #[instrument(skip(self, job, printer), fields(job_id = %job.id(), printer = %printer.name))]
    async fn submit_job(&self, job: &PrintJob, printer: &PrinterDescriptor) -> Result<()> {
        let url = self.config.endpoint(WRITE_PATH);
        let timeout = self.config.timeout();
        let body = discovery::write_request_body(printer, job.payload())?;

        info!(bytes = job.payload().len(), "sending ZPL to Browser Print");

        let send = async {
            let response = self
                .client
                .post(&url)
                .header(CONTENT_TYPE, "text/plain")
                .body(body)
                .send()
                .await?;
            let status = response.status();
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!(status = %status, error = %e, "could not read Browser Print reply body");
                    String::new()
                }
            };
            Ok::<_, reqwest::Error>((status, text))
        };

        match tokio::time::timeout(timeout, send).await {
            Err(_) => {
                warn!(url = %url, timeout_ms = timeout.as_millis(), "print submission timed out");
                Err(ZebraPrintError::Timeout { url, timeout })
            }
            Ok(Err(e)) => {
                warn!(url = %url, error = %e, "print submission could not reach Browser Print");
                Err(ZebraPrintError::ServiceUnavailable {
                    url,
                    reason: e.to_string(),
                })
            }
            Ok(Ok((status, _))) if status.is_success() => {
                info!("print job accepted");
                Ok(())
            }
            Ok(Ok((status, text))) => {
                let text = text.trim();
                warn!(status = %status, body = %text, "print job rejected");
                Err(ZebraPrintError::Printer(if text.is_empty() {
                    status.to_string()
                } else {
                    format!("{status}: {text}")
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let cfg = ClientConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            HttpTransport::new(cfg),
            Err(ZebraPrintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn keeps_config() {
        let cfg = ClientConfig {
            timeout_ms: 1500,
            ..Default::default()
        };
        let transport = HttpTransport::new(cfg.clone()).unwrap();
        assert_eq!(transport.config(), &cfg);
    }
}
