//! Client and data model for the myip.foo IP-information API.
//!
//! This module provides:
//! - The documents returned by the API ([`IpInfo`], [`ConnectionReport`])
//! - The connection classification ([`ConnectionType`])
//! - Endpoint resolution ([`Endpoints`])
//! - The typed client ([`IpApi`]) and its error type ([`ApiError`])

mod client;
mod error;
mod model;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
mod model_tests;

pub use client::{DEFAULT_API_BASE, DEFAULT_IPV4_BASE, DEFAULT_IPV6_BASE, Endpoints, IpApi};
pub use error::ApiError;
pub use model::{ConnectionReport, ConnectionType, Edge, IpInfo, Location, Network, Scalar};
