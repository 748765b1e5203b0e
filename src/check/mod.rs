//! The command pipelines.
//!
//! Each pipeline is self-contained: fetch, then compare or classify, then
//! report. Reports implement `Display` and carry the process exit code.
//!
//! - [`monitor`]: IP change detection with notifications
//! - [`connection`]: connection-type classification
//! - [`dual_stack`]: concurrent IPv4/IPv6 reachability
//! - [`vpn`]: expected-country verification
//! - [`lookup`]: full information report

pub mod connection;
pub mod dual_stack;
pub mod lookup;
pub mod monitor;
pub mod vpn;

#[cfg(test)]
mod monitor_tests;

pub use connection::{ConnectionCheck, check_connection, classify};
pub use dual_stack::{DualStackReport, check_dual_stack};
pub use lookup::{InfoReport, LookupCheck, lookup};
pub use monitor::{ChangeMonitor, ChangeStatus, MonitorOutcome};
pub use vpn::{DEFAULT_EXPECTED_COUNTRY, VpnCheck, VpnVerdict, verify_vpn};
