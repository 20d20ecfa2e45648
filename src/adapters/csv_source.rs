use crate::core::{FactSource, Storage};
use crate::domain::model::FactSnapshot;
use crate::utils::error::{InsightError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub const PUBLICATION_FILE: &str = "publication.csv";
pub const FACULTY_FILE: &str = "faculty.csv";
pub const DOMAIN_FILE: &str = "research_domain.csv";
pub const AUTHORSHIP_FILE: &str = "faculty_publication.csv";
pub const QUALITY_FILE: &str = "publication_quality.csv";

/// Reads one CSV file per relation from a [`Storage`] backend. Headers must
/// match the record field names; the quality file is optional.
#[derive(Debug, Clone)]
pub struct CsvFactSource<S: Storage> {
    storage: S,
    name: String,
}

impl<S: Storage> CsvFactSource<S> {
    pub fn new(storage: S, name: impl Into<String>) -> Self {
        Self {
            storage,
            name: name.into(),
        }
    }

    async fn read_required<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        if !self.storage.exists(file).await {
            return Err(InsightError::data_unavailable(
                &self.name,
                format!("required file {} not found", file),
            ));
        }
        self.read_table(file).await
    }

    async fn read_table<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let data = self.storage.read_file(file).await?;
        let rows = parse_rows(&data)?;
        tracing::debug!("Loaded {} rows from {}", rows.len(), file);
        Ok(rows)
    }
}

pub fn parse_rows<T: DeserializeOwned>(data: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    reader
        .deserialize()
        .map(|row| row.map_err(InsightError::from))
        .collect()
}

#[async_trait]
impl<S: Storage> FactSource for CsvFactSource<S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn snapshot(&self) -> Result<FactSnapshot> {
        let publications = self.read_required(PUBLICATION_FILE).await?;
        let faculty = self.read_required(FACULTY_FILE).await?;
        let domains = self.read_required(DOMAIN_FILE).await?;
        let authorships = self.read_required(AUTHORSHIP_FILE).await?;

        let quality = if self.storage.exists(QUALITY_FILE).await {
            self.read_table(QUALITY_FILE).await?
        } else {
            tracing::debug!("{} not present; every publication is Not Indexed", QUALITY_FILE);
            Vec::new()
        };

        Ok(FactSnapshot {
            publications,
            faculty,
            domains,
            authorships,
            quality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use crate::domain::model::Publication;
    use tempfile::TempDir;

    async fn write_fixture(storage: &LocalStorage, with_quality: bool) {
        storage
            .write_file(
                PUBLICATION_FILE,
                b"publication_id,title,publication_year,domain_id\n1, Graph Mining ,2022,1\n2,Edge AI,2023,1\n",
            )
            .await
            .unwrap();
        storage
            .write_file(FACULTY_FILE, b"faculty_id,faculty_name\n1,Dr. Rao\n")
            .await
            .unwrap();
        storage
            .write_file(DOMAIN_FILE, b"domain_id,domain_name\n1,Data Science\n")
            .await
            .unwrap();
        storage
            .write_file(AUTHORSHIP_FILE, b"faculty_id,publication_id\n1,1\n")
            .await
            .unwrap();
        if with_quality {
            storage
                .write_file(QUALITY_FILE, b"publication_id,quartile\n2,Q2\n")
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_snapshot_reads_all_relations() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());
        write_fixture(&storage, true).await;

        let source = CsvFactSource::new(storage, "fixture");
        let snapshot = source.snapshot().await.unwrap();

        assert_eq!(snapshot.publications.len(), 2);
        assert_eq!(snapshot.publications[0].title, "Graph Mining");
        assert_eq!(snapshot.faculty[0].faculty_name, "Dr. Rao");
        assert_eq!(snapshot.domains[0].domain_name, "Data Science");
        assert_eq!(snapshot.authorships.len(), 1);
        assert_eq!(snapshot.quality[0].quartile, "Q2");
    }

    #[tokio::test]
    async fn test_quality_file_is_optional() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());
        write_fixture(&storage, false).await;

        let snapshot = CsvFactSource::new(storage, "fixture")
            .snapshot()
            .await
            .unwrap();
        assert!(snapshot.quality.is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_file_is_data_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        let err = CsvFactSource::new(storage, "empty-dir")
            .snapshot()
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::DataUnavailable { .. }));
        assert!(err.to_string().contains(PUBLICATION_FILE));
    }

    #[test]
    fn test_parse_rows_rejects_non_numeric_year() {
        let data = b"publication_id,title,publication_year,domain_id\n1,Paper,soon,1\n";
        let result: Result<Vec<Publication>> = parse_rows(data);
        assert!(matches!(result, Err(InsightError::CsvError(_))));
    }
}
