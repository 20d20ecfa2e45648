use crate::core::engine::AnalyticsEngine;
use crate::core::{ConfigProvider, FactSource, Pipeline, Storage};
use crate::domain::model::{FactSnapshot, Report};
use crate::utils::error::{InsightError, Result};
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const DEFAULT_ARCHIVE_NAME: &str = "report.zip";

/// Extracts a snapshot, computes every analytic and writes them as a ZIP of
/// CSV and/or JSON tables.
pub struct ReportPipeline<F: FactSource, S: Storage, C: ConfigProvider> {
    engine: AnalyticsEngine<F>,
    storage: S,
    config: C,
    archive_name: String,
}

impl<F: FactSource, S: Storage, C: ConfigProvider> ReportPipeline<F, S, C> {
    pub fn new(source: F, storage: S, config: C) -> Self {
        let mut engine =
            AnalyticsEngine::new(source).with_top_authors_limit(config.top_authors_limit());
        if let Some(year) = config.current_year() {
            engine = engine.with_current_year(year);
        }

        Self {
            engine,
            storage,
            config,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }

    pub fn with_archive_name(mut self, archive_name: impl Into<String>) -> Self {
        self.archive_name = archive_name.into();
        self
    }

    pub fn engine(&self) -> &AnalyticsEngine<F> {
        &self.engine
    }

    /// extract → transform → load; returns where the archive was written.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting report pipeline");

        let facts = self.extract().await?;
        tracing::info!("Extracted {} publications", facts.publications.len());

        let report = self.transform(facts).await?;

        let output_path = self.load(report).await?;
        tracing::info!("Report saved to: {}", output_path);
        Ok(output_path)
    }
}

fn to_csv<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| InsightError::IoError(e.into_error()))
}

fn add_table<T: Serialize, W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    formats: &[String],
    name: &str,
    records: &[T],
) -> Result<()> {
    for format in formats {
        let data = match format.as_str() {
            "csv" => to_csv(records)?,
            "json" => serde_json::to_vec_pretty(records)?,
            other => {
                tracing::warn!("Skipping unsupported output format: {}", other);
                continue;
            }
        };
        zip.start_file::<_, ()>(format!("{}.{}", name, format), FileOptions::default())?;
        zip.write_all(&data)?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl<F: FactSource, S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<F, S, C> {
    async fn extract(&self) -> Result<FactSnapshot> {
        self.engine.snapshot().await
    }

    async fn transform(&self, facts: FactSnapshot) -> Result<Report> {
        self.engine.analyze(&facts)
    }

    async fn load(&self, report: Report) -> Result<String> {
        let formats = self.config.output_formats();
        let output_path = format!("{}/{}", self.config.output_path(), self.archive_name);

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            add_table(&mut zip, formats, "year", &report.year)?;
            add_table(&mut zip, formats, "domain_trends", &report.domain_trends)?;
            add_table(&mut zip, formats, "top_authors", &report.top_authors)?;
            add_table(&mut zip, formats, "research_gap", &report.research_gap)?;
            add_table(&mut zip, formats, "influence", &report.influence)?;
            add_table(&mut zip, formats, "network", &report.network)?;
            add_table(&mut zip, formats, "paper_quality", &report.paper_quality)?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(&self.archive_name, &zip_data).await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFactSource;
    use crate::core::queries::fixtures::sample_snapshot;
    use std::collections::HashMap;
    use std::io::Read;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.get_file(path).await.ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()).into()
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn exists(&self, path: &str) -> bool {
            self.files.lock().await.contains_key(path)
        }
    }

    struct MockConfig {
        formats: Vec<String>,
    }

    impl ConfigProvider for MockConfig {
        fn data_dir(&self) -> &str {
            "unused"
        }

        fn output_path(&self) -> &str {
            "./out"
        }

        fn current_year(&self) -> Option<i32> {
            Some(2024)
        }

        fn top_authors_limit(&self) -> usize {
            5
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }
    }

    fn pipeline(formats: &[&str]) -> (ReportPipeline<InMemoryFactSource, MockStorage, MockConfig>, MockStorage) {
        let storage = MockStorage::new();
        let config = MockConfig {
            formats: formats.iter().map(|f| f.to_string()).collect(),
        };
        let pipeline = ReportPipeline::new(
            InMemoryFactSource::new(sample_snapshot()),
            storage.clone(),
            config,
        );
        (pipeline, storage)
    }

    #[tokio::test]
    async fn test_run_writes_all_tables() {
        let (pipeline, storage) = pipeline(&["csv", "json"]);
        let output_path = pipeline.run().await.unwrap();
        assert_eq!(output_path, "./out/report.zip");

        let zip_data = storage.get_file("report.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 14);

        let mut csv_content = String::new();
        archive
            .by_name("research_gap.csv")
            .unwrap()
            .read_to_string(&mut csv_content)
            .unwrap();
        assert!(csv_content.starts_with("domain,total_papers,growth,status"));
        assert!(csv_content.contains("Machine Learning,3,0,Research Gap"));
    }

    #[tokio::test]
    async fn test_json_only() {
        let (pipeline, storage) = pipeline(&["json"]);
        let pipeline = pipeline.with_archive_name("analytics.zip");
        pipeline.run().await.unwrap();

        let zip_data = storage.get_file("analytics.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 7);

        let mut json_content = String::new();
        archive
            .by_name("influence.json")
            .unwrap()
            .read_to_string(&mut json_content)
            .unwrap();
        let influence: serde_json::Value = serde_json::from_str(&json_content).unwrap();
        assert_eq!(influence[0]["faculty_name"], "Dr. Rao");
        assert_eq!(influence[0]["influence_score"], 7);
    }
}
