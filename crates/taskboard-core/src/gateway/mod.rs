//! Gateway Layer
//!
//! Everything that crosses the network goes through here.

mod auth;
mod client;
mod endpoints;
mod transport;

#[cfg(test)]
mod tests;

pub use auth::{AuthResponse, LoginRequest, LOGIN_FAILED_MESSAGE};
pub use client::ApiGateway;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
