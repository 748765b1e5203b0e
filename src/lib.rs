//! myip-tools: command-line checks against the myip.foo API.
//!
//! A library for detecting public IP changes with chat alerts, classifying
//! the connection type, checking dual-stack reachability and verifying the
//! exit country of a VPN.

pub mod api;
pub mod check;
pub mod config;
pub mod notify;
pub mod state;
pub mod time;
pub mod transport;
