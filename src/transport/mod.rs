//! HTTP transport shared by every check.
//!
//! This module provides:
//! - Request and response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client abstraction used for dependency injection ([`HttpClient`])
//! - The production implementation ([`ReqwestClient`]), optionally pinned to
//!   one address family ([`AddressFamily`])

mod client;
mod error;
mod http;

#[cfg(test)]
pub mod mock;


pub use client::{AddressFamily, ReqwestClient};
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
