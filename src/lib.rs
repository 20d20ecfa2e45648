pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::TomlConfig;

pub use crate::adapters::{
    csv_source::CsvFactSource, memory::InMemoryFactSource, storage::LocalStorage,
};
pub use crate::core::{engine::AnalyticsEngine, pipeline::ReportPipeline, search::SearchField};
pub use crate::domain::model::*;
pub use crate::utils::error::{InsightError, Result};
