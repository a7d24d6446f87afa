//! User Directory Core - Shared types library.
//!
//! This crate provides the common types used by the User Directory
//! application crates.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no session access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe ids, emails, and phone numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
