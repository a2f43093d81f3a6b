// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// zebra-print — send ZPL labels to Zebra printers through Browser Print
//
// Entry point. Initialises logging, parses the command line, and hands off to
// the service layer.

mod services;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zebra_print_client::{DiscoveryOutcome, LabelOutcome, Settings};
use zebra_print_core::error::ZebraPrintError;
use zebra_print_core::human_errors::{self, Notification, NotificationLevel};

use services::app_services::{AppServices, Overrides, update_settings};
use services::data_dir;

#[derive(Parser, Debug)]
#[command(
    name = "zebra-print",
    version,
    about = "Send ZPL labels to Zebra printers through the local Browser Print agent"
)]
struct Cli {
    /// Directory holding settings.json.
    #[arg(long, global = true, env = "ZEBRA_PRINT_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Browser Print base URL (overrides the settings file).
    #[arg(long, global = true, env = "ZEBRA_PRINT_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Per-request timeout in milliseconds (overrides the settings file).
    #[arg(long, global = true, env = "ZEBRA_PRINT_TIMEOUT_MS", value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Check whether Browser Print is running and how many printers it sees.
    Status,

    /// List attached printers; the default is marked with `*`.
    Printers,

    /// Print a ZPL label from a file, stdin (`-`), or a URL.
    Print {
        /// Label file, or `-` for stdin.
        #[arg(required_unless_present = "url", conflicts_with = "url")]
        file: Option<String>,
        /// Download the label from this URL instead.
        #[arg(long)]
        url: Option<String>,
        /// Printer uid; defaults to the configured or first printer.
        #[arg(long)]
        printer: Option<String>,
        /// Save the label here when it was not printed.
        #[arg(long, value_name = "PATH")]
        fallback_out: Option<PathBuf>,
    },

    /// Show or change persisted settings.
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCmd>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum SettingsCmd {
    /// Print the current settings.
    Show,
    /// Turn on "Enable Zebra Browser Print".
    Enable,
    /// Turn it off.
    Disable,
    /// Set the Browser Print base URL.
    SetUrl { url: String },
    /// Set the per-request timeout.
    SetTimeout { ms: u64 },
    /// Set the preferred printer uid; omit to clear it.
    SetDefault { printer: Option<String> },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<ZebraPrintError>() {
                Some(err) => {
                    let human = human_errors::humanize_error(err);
                    eprintln!("error: {}\n  {}", human.message, human.suggestion);
                    tracing::debug!(error = %err, "command failed");
                }
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let dir = data_dir::data_dir(cli.data_dir.as_deref());
    let overrides = Overrides {
        base_url: cli.base_url,
        timeout_ms: cli.timeout_ms,
    };

    match cli.cmd {
        Cmd::Settings { action } => settings(&dir, action.unwrap_or(SettingsCmd::Show)),
        Cmd::Status => status(&AppServices::init(&dir, &overrides)?).await,
        Cmd::Printers => printers(&AppServices::init(&dir, &overrides)?).await,
        Cmd::Print {
            file,
            url,
            printer,
            fallback_out,
        } => {
            let services = AppServices::init(&dir, &overrides)?;
            let body = match (url, file) {
                (Some(url), _) => services.fetch_label(&url).await?,
                (None, Some(file)) => read_label(&file)?,
                (None, None) => bail!("give a label file, `-`, or --url"),
            };
            print(&services, &body, printer.as_deref(), fallback_out.as_deref()).await
        }
    }
}

async fn status(services: &AppServices) -> Result<ExitCode> {
    let url = &services.config().base_url;
    let toggle = if services.is_enabled() { "enabled" } else { "disabled" };
    println!("printing: {toggle}");

    Ok(match services.probe().await {
        DiscoveryOutcome::Found(printers) => {
            println!("{url}: up, {} printer(s)", printers.len());
            ExitCode::SUCCESS
        }
        DiscoveryOutcome::Unreachable { reason, .. } => {
            println!("{url}: down ({reason})");
            ExitCode::FAILURE
        }
        DiscoveryOutcome::Malformed(detail) => {
            println!("{url}: malformed response ({detail})");
            ExitCode::FAILURE
        }
    })
}

async fn printers(services: &AppServices) -> Result<ExitCode> {
    let (printers, default) = services.printers().await?;
    if printers.is_empty() {
        println!("No Zebra printers found.");
        return Ok(ExitCode::SUCCESS);
    }
    for p in printers.iter() {
        let mark = if default.as_ref().is_some_and(|d| d.id == p.id) {
            '*'
        } else {
            ' '
        };
        println!("{mark} {:<24} {:<32} {}", p.id, p.name, p.connection);
    }
    Ok(ExitCode::SUCCESS)
}

async fn print(
    services: &AppServices,
    body: &str,
    printer: Option<&str>,
    fallback_out: Option<&Path>,
) -> Result<ExitCode> {
    let outcome = services.print_label(body, printer).await;
    let summary = summarize(&outcome);
    show(&summary.notification);

    if !summary.printed
        && let Some(path) = fallback_out
    {
        std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        println!("Label saved to {}", path.display());
    }

    Ok(if summary.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn settings(dir: &Path, action: SettingsCmd) -> Result<ExitCode> {
    let path = data_dir::settings_path(dir);
    let settings = match action {
        SettingsCmd::Show => Settings::load(&path)?,
        SettingsCmd::Enable => update_settings(&path, |s| s.enabled = true)?,
        SettingsCmd::Disable => update_settings(&path, |s| s.enabled = false)?,
        SettingsCmd::SetUrl { url } => update_settings(&path, |s| s.client.base_url = url)?,
        SettingsCmd::SetTimeout { ms } => update_settings(&path, |s| s.client.timeout_ms = ms)?,
        SettingsCmd::SetDefault { printer } => {
            update_settings(&path, |s| s.client.default_printer = printer)?
        }
    };
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(ExitCode::SUCCESS)
}

fn read_label(file: &str) -> Result<String> {
    if file == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("reading label from stdin")?;
        return Ok(body);
    }
    std::fs::read_to_string(file).with_context(|| format!("reading {file}"))
}

/// How a print attempt should be reported.
struct Summary {
    notification: Notification,
    /// Something reached a printer.
    printed: bool,
    /// Exit successfully.
    ok: bool,
}

fn summarize(outcome: &LabelOutcome) -> Summary {
    match outcome {
        LabelOutcome::Dispatched(o) => Summary {
            notification: human_errors::notify(o),
            printed: o.is_success(),
            ok: !o.is_failure(),
        },
        LabelOutcome::NotZpl(kind) => Summary {
            notification: human_errors::notify_not_zpl(*kind),
            printed: false,
            ok: false,
        },
    }
}

fn show(notification: &Notification) {
    match notification.level {
        NotificationLevel::Warning => eprintln!("warning: {}", notification.message),
        NotificationLevel::Info | NotificationLevel::Success => println!("{}", notification.message),
    }
}
