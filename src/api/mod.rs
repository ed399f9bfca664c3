//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the OAuth
//! redirect during authorization.
//!
//! - [`callback`] - completes the PKCE flow by exchanging the authorization
//!   code for a token and storing it in the shared state
//! - [`health`] - reports status and version, handy to check that the
//!   redirect target is reachable
//!
//! Both are plain async handlers meant for an [Axum](https://docs.rs/axum)
//! router; see [`crate::server::router`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
