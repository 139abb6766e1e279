//! # prism-api
//!
//! HTTP backends implementing the analytics query contract.
//!
//! Two interchangeable backends expose the same interface: [`DirectBackend`]
//! talks to a fixed regional service endpoint, [`GatewayBackend`] to a
//! configured intermediary. Selection is a configuration concern handled by
//! [`ApiClient::from_config`]. Capability gaps (the gateway cannot serve
//! session queries) surface as ordinary [`ApiError`] values, never panics.
//!
//! All calls carry a bearer credential; responses use a `{data, error}`
//! envelope, with a bare payload accepted as an implicit success.

mod client;
mod direct;
mod envelope;
mod error;
mod gateway;
mod service;
mod transport;
mod types;

pub use client::{ApiClient, Backend};
pub use direct::DirectBackend;
pub use error::ApiError;
pub use gateway::GatewayBackend;
pub use types::{SignedBody, UserMetricRow, UserMetricsParams};
