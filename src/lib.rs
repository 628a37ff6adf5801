pub mod client;
pub mod common;
pub mod ui;
pub mod utils;

pub use client::{ClientCore, Outcome, PatientClient};
pub use common::config::ClientConfig;
pub use common::connection::{HttpTransport, Transport};
pub use common::error::{ClientError, ClientResult};
