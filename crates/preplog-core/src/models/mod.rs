//! Data models for the preplog pipeline.

pub mod config;
pub mod record;

pub use config::PreplogConfig;
pub use record::{AggregatedRow, Record};
