use crate::core::queries::FactIndex;
use crate::core::search::{self, SearchField};
use crate::core::summary::{self, DEFAULT_TOP_AUTHORS};
use crate::core::{influence, trend};
use crate::domain::model::{
    DomainTrend, DomainYearCount, FactSnapshot, InfluenceEntry, NetworkEdge, QualityRow, Report,
    SearchHit, TopAuthor, YearTotal,
};
use crate::domain::ports::FactSource;
use crate::utils::error::{InsightError, Result};
use chrono::Datelike;

pub fn local_current_year() -> i32 {
    chrono::Local::now().year()
}

/// Runs analytics against a fresh snapshot from `F` on every call. Holds no
/// state beyond its settings, so one engine can serve concurrent callers.
pub struct AnalyticsEngine<F: FactSource> {
    source: F,
    current_year: i32,
    top_authors_limit: usize,
}

impl<F: FactSource> AnalyticsEngine<F> {
    pub fn new(source: F) -> Self {
        Self {
            source,
            current_year: local_current_year(),
            top_authors_limit: DEFAULT_TOP_AUTHORS,
        }
    }

    pub fn with_current_year(mut self, current_year: i32) -> Self {
        self.current_year = current_year;
        self
    }

    pub fn with_top_authors_limit(mut self, limit: usize) -> Self {
        self.top_authors_limit = limit;
        self
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub async fn snapshot(&self) -> Result<FactSnapshot> {
        tracing::debug!("Fetching snapshot from {}", self.source.name());
        let snapshot = self.source.snapshot().await.map_err(|e| match e {
            InsightError::DataUnavailable { .. } => e,
            other => InsightError::data_unavailable(self.source.name(), other.to_string()),
        })?;

        tracing::debug!(
            "Snapshot: {} publications, {} faculty, {} domains, {} authorships, {} quality rows",
            snapshot.publications.len(),
            snapshot.faculty.len(),
            snapshot.domains.len(),
            snapshot.authorships.len(),
            snapshot.quality.len()
        );
        Ok(snapshot)
    }

    pub async fn search(&self, field: SearchField, pattern: &str) -> Result<Vec<SearchHit>> {
        let snapshot = self.snapshot().await?;
        Ok(search::search(&FactIndex::new(&snapshot), field, pattern))
    }

    pub async fn year_analytics(&self) -> Result<Vec<YearTotal>> {
        let snapshot = self.snapshot().await?;
        Ok(FactIndex::new(&snapshot).year_totals())
    }

    pub async fn domain_analytics(&self) -> Result<Vec<DomainYearCount>> {
        let snapshot = self.snapshot().await?;
        Ok(FactIndex::new(&snapshot).domain_year_counts())
    }

    pub async fn top_authors(&self) -> Result<Vec<TopAuthor>> {
        let snapshot = self.snapshot().await?;
        Ok(self.top_authors_of(&FactIndex::new(&snapshot)))
    }

    pub async fn research_gap(&self) -> Result<Vec<DomainTrend>> {
        let snapshot = self.snapshot().await?;
        trend::classify_all(&FactIndex::new(&snapshot).domain_year_series())
    }

    pub async fn influence(&self) -> Result<Vec<InfluenceEntry>> {
        let snapshot = self.snapshot().await?;
        Ok(self.influence_of(&FactIndex::new(&snapshot)))
    }

    pub async fn network(&self) -> Result<Vec<NetworkEdge>> {
        let snapshot = self.snapshot().await?;
        Ok(FactIndex::new(&snapshot).faculty_domain_edges())
    }

    pub async fn paper_quality(&self) -> Result<Vec<QualityRow>> {
        let snapshot = self.snapshot().await?;
        Ok(FactIndex::new(&snapshot).publication_quality_rows())
    }

    fn top_authors_of(&self, index: &FactIndex<'_>) -> Vec<TopAuthor> {
        // Totals do not depend on the current year; only `recent` does.
        let activity = index.faculty_totals_and_recency(self.current_year);
        summary::top_authors(&activity, self.top_authors_limit)
    }

    fn influence_of(&self, index: &FactIndex<'_>) -> Vec<InfluenceEntry> {
        influence::rank(&index.faculty_totals_and_recency(self.current_year))
    }

    /// Every analytic over one snapshot.
    pub fn analyze(&self, snapshot: &FactSnapshot) -> Result<Report> {
        let index = FactIndex::new(snapshot);

        let report = Report {
            current_year: self.current_year,
            year: index.year_totals(),
            domain_trends: index.domain_year_counts(),
            top_authors: self.top_authors_of(&index),
            research_gap: trend::classify_all(&index.domain_year_series())?,
            influence: self.influence_of(&index),
            network: index.faculty_domain_edges(),
            paper_quality: index.publication_quality_rows(),
        };

        tracing::info!(
            "Analyzed {} years, {} domains, {} faculty, {} network edges",
            report.year.len(),
            report.research_gap.len(),
            report.influence.len(),
            report.network.len()
        );
        Ok(report)
    }

    pub async fn report(&self) -> Result<Report> {
        let snapshot = self.snapshot().await?;
        self.analyze(&snapshot)
    }
}
