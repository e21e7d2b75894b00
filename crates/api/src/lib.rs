//! Scalebreakers API library.
//!
//! The typed RPC router for the studio website, exposed as a library so the
//! binary, the CLI and the integration tests share one implementation.
//!
//! # Layout
//!
//! - [`routes`] - One handler module per resource (`products`, `workshops`, ...)
//! - [`authz`] - Pure role check run before every admin mutation
//! - [`db`] - The [`db::Store`] contract with Postgres and in-memory backends
//! - [`middleware`] - Sessions, caller extraction and request ids
//! - [`error`] - [`error::ApiError`] and its wire representation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod authz;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use routes::build_router;
