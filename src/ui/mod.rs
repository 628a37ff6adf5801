//! # User-Facing Capabilities
//!
//! The client never touches a rendering surface directly. It receives:
//!
//! - [`FormReader`]: the form that triggered the operation
//! - [`UserPrompt`]: blocking notifications and confirmation
//! - [`Navigator`]: page changes, immediate or delayed
//!
//! Terminal implementations of each live alongside the traits and back the
//! `patient` binary.

pub mod form;
pub mod navigator;
pub mod prompt;

pub use form::{fields, FormReader, FormState};
pub use navigator::{Navigator, TerminalNavigator};
pub use prompt::{TerminalPrompt, UserPrompt};
