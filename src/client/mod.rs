//! # Client Components
//!
//! The client is split into two main components:
//!
//! ## Core Client ([`client`])
//! Handles the primary responsibility: sending one request per endpoint and
//! decoding the response envelope.
//!
//! ## Client Middleware ([`middleware`])
//! Manages everything around the request:
//! - Collecting and pruning form input
//! - Branching on the `success` flag
//! - Notifying the user and asking for confirmation before deletion
//! - Resetting the form and redirecting after successful mutations

pub mod client;
pub mod middleware;

// Re-export for convenience
pub use client::ClientCore;
pub use middleware::{Outcome, PatientClient};
