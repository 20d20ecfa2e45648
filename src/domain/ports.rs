use crate::domain::model::{FactSnapshot, Report};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn output_path(&self) -> &str;
    /// `None` means "use the local calendar year".
    fn current_year(&self) -> Option<i32>;
    fn top_authors_limit(&self) -> usize;
    fn output_formats(&self) -> &[String];
}

/// Supplies a consistent snapshot of the publication facts, or fails.
#[async_trait]
pub trait FactSource: Send + Sync {
    fn name(&self) -> &str;
    async fn snapshot(&self) -> Result<FactSnapshot>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<FactSnapshot>;
    async fn transform(&self, facts: FactSnapshot) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<String>;
}
