//! HTTP client layer for the ComandaLivre story harness.
//!
//! Three pieces:
//! - [`transport`] — a [`Transport`] trait (one blocking request in, one
//!   structured response or a "no response" error out) with a `ureq`-backed
//!   production implementation.
//! - [`api`] — thin per-endpoint wrappers over the transport, holding the
//!   current bearer token.
//! - [`keycloak`] — the identity-provider client (password grant, admin
//!   token, idempotent user provisioning).
//!
//! The transport is a trait object so stories and tests can substitute a
//! scripted double without touching process-wide state.

pub mod api;
pub mod config;
pub mod keycloak;
pub mod response;
pub mod transport;

pub use api::{ApiClient, ApiResult};
pub use config::Config;
pub use keycloak::{IdentityError, KeycloakClient, UserProfile};
pub use response::ApiResponse;
pub use transport::{ApiRequest, Method, NoResponse, RequestBody, Transport, UreqTransport};
