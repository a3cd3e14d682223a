//! Blocking client for a backend JSON API.
//!
//! # Overview
//! `RequestClient` attaches a bearer token, serializes JSON bodies and
//! normalizes every outcome into either a `ResponseBody` or an `ApiError`.
//! `get`, `post`, `put` and `del` all funnel through `request`.
//!
//! # Design
//! - The base URL arrives through `ClientConfig`; nothing is hard-coded.
//! - The token comes from an injected `CredentialProvider`, read per call.
//! - The network sits behind the `Transport` trait (`UreqTransport` by
//!   default), so request building and response classification stay pure.
//! - Network failures report status 0; HTTP failures carry the real status
//!   and whichever body form decoded.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{parse_response, RequestClient};
pub use config::ClientConfig;
pub use credentials::{CredentialProvider, NoCredentials, StaticToken, TokenFile};
pub use error::{ApiError, DecodeError, StoreError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{RequestOptions, ResponseBody};
