// squall-api: Async Rust client for the weather-alert service REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::{Error, ProblemDetails, ProblemFieldError};
pub use transport::TransportConfig;
