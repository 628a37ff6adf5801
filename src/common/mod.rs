//! # Common Components
//!
//! Shared utilities and data structures used by the client layers.
//!
//! ## Modules
//!
//! - [`messages`]: API request and response payloads
//! - [`connection`]: HTTP transport with JSON framing
//! - [`config`]: Configuration parsing utilities
//! - [`error`]: Client error type

pub mod messages;
pub mod connection;
pub mod config;
pub mod error;
