//! HTTP implementation of the `tasklane_core` API seam: a reqwest client
//! speaking the backend's REST contract, plus the layered client
//! configuration (defaults, config file, environment).

pub mod client;
pub mod config;

pub use client::HttpTaskApi;
pub use config::{ConfigError, HttpConfig};
