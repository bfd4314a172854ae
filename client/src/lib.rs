pub mod api;
pub mod cli;
pub mod config;
pub mod error;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
