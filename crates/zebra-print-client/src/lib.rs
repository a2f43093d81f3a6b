// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zebra Print Client — talks to the local Browser Print agent, keeps a cached
// printer list, and dispatches ZPL labels behind the host's enable toggle.
// Domain types live in `zebra-print-core`; this crate owns the I/O.

pub mod discovery;
pub mod dispatcher;
pub mod gate;
pub mod label;
pub mod registry;
pub mod settings;
pub mod transport;

pub use discovery::DiscoveryOutcome;
pub use dispatcher::{LabelOutcome, PrintDispatcher};
pub use gate::{FeatureGate, FlagSource, SettingsFlag, StaticFlag};
pub use registry::PrinterRegistry;
pub use settings::Settings;
pub use transport::{HttpTransport, Transport};
