pub mod aggregator;
pub mod engine;
pub mod influence;
pub mod network;
pub mod pipeline;
pub mod queries;
pub mod search;
pub mod summary;
pub mod trend;

pub use crate::domain::model::{FactSnapshot, Report};
pub use crate::domain::ports::{ConfigProvider, FactSource, Pipeline, Storage};
pub use crate::utils::error::Result;
