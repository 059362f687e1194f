//! HTTP communication with the estimation engine.

pub mod client;
pub mod types;

pub use client::EngineClient;
pub use types::{ExportFormat, RawEstimate};
