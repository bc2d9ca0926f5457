//! Fluent HTTP request builder with chained response handlers.
//!
//! Assemble a request through chained configuration calls, attach response
//! handlers (status assertion, cookie extraction, body decoding), then
//! execute. The first configuration failure freezes the builder and
//! surfaces from [`Requester::send`]; handlers run in registration order
//! against the received response, and the last handler failure wins.
//!
//! The transport is an injectable collaborator behind the [`HttpClient`]
//! trait; [`ReqwestClient`] is the bundled default.
//!
//! # Example
//!
//! ```ignore
//! use chela::prelude::*;
//!
//! #[derive(Debug, Default, serde::Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let mut user = User::default();
//! let mut cookies = Vec::new();
//! chela::get("https://api.example.com/users/1")
//!     .header("Accept", "application/json")
//!     .expect_code(200)
//!     .to_cookies(&mut cookies)
//!     .decode(&mut user)
//!     .send()
//!     .await?;
//! ```

mod body;
mod client;
mod config;
mod cookie;
mod error;
mod handler;
mod method;
pub mod prelude;
mod request;
mod response;
mod wire;

pub use body::{ContentType, from_json, to_json};
pub use client::{HttpClient, ReqwestClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use cookie::Cookie;
pub use error::{Error, Result};
pub use method::Method;
pub use request::{Requester, delete, get, post, put};
pub use response::Response;
pub use wire::Request;

// Re-export http header names and map types used across the API
pub use http::header;
