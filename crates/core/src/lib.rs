//! Scalebreakers Core - Shared domain types.
//!
//! This crate provides the types used across all Scalebreakers components:
//! - `api` - Typed RPC API for the studio website
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, prices, stock levels,
//!   product categories and caller roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
