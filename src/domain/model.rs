use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NOT_INDEXED: &str = "Not Indexed";

pub type PublicationId = u64;
pub type FacultyId = u64;
pub type DomainId = u64;

// ---- fact relations (read-only snapshot rows) ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub publication_id: PublicationId,
    pub title: String,
    pub publication_year: i32,
    pub domain_id: DomainId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub faculty_id: FacultyId,
    pub faculty_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchDomain {
    pub domain_id: DomainId,
    pub domain_name: String,
}

/// One Faculty_Publication link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorship {
    pub faculty_id: FacultyId,
    pub publication_id: PublicationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationQuality {
    pub publication_id: PublicationId,
    pub quartile: String,
}

/// A consistent, immutable view of every relation the engine reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactSnapshot {
    pub publications: Vec<Publication>,
    pub faculty: Vec<Faculty>,
    pub domains: Vec<ResearchDomain>,
    pub authorships: Vec<Authorship>,
    #[serde(default)]
    pub quality: Vec<PublicationQuality>,
}

// ---- result records ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotal {
    pub publication_year: i32,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainYearCount {
    pub domain_name: String,
    pub publication_year: i32,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopAuthor {
    pub faculty_name: String,
    pub total_publications: u64,
}

/// Per-faculty totals before scoring; `recent` counts publications inside
/// the trailing window ending at the current year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyActivity {
    #[serde(skip)]
    pub faculty_id: FacultyId,
    pub faculty_name: String,
    pub total_publications: u64,
    pub recent: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluenceEntry {
    pub faculty_name: String,
    pub total_publications: u64,
    pub recent: u64,
    pub influence_score: u64,
}

/// One publication-authorship-domain triple, resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorshipDomainFact {
    pub faculty_name: String,
    pub domain_name: String,
    pub publication_id: PublicationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub faculty_name: String,
    pub domain_name: String,
    pub papers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRow {
    pub title: String,
    pub domain_name: String,
    pub quartile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub authors: String,
    pub publication_year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendStatus {
    Stable,
    Emerging,
    #[serde(rename = "Research Gap")]
    ResearchGap,
}

impl TrendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendStatus::Stable => "Stable",
            TrendStatus::Emerging => "Emerging",
            TrendStatus::ResearchGap => "Research Gap",
        }
    }
}

impl fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTrend {
    pub domain: String,
    pub total_papers: u64,
    pub growth: i64,
    pub status: TrendStatus,
}

/// Every analytic computed from one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub current_year: i32,
    pub year: Vec<YearTotal>,
    pub domain_trends: Vec<DomainYearCount>,
    pub top_authors: Vec<TopAuthor>,
    pub research_gap: Vec<DomainTrend>,
    pub influence: Vec<InfluenceEntry>,
    pub network: Vec<NetworkEdge>,
    pub paper_quality: Vec<QualityRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_status_serializes_with_display_labels() {
        let json = serde_json::to_string(&TrendStatus::ResearchGap).unwrap();
        assert_eq!(json, "\"Research Gap\"");
        assert_eq!(TrendStatus::Emerging.to_string(), "Emerging");
    }

    #[test]
    fn test_faculty_activity_hides_internal_id() {
        let activity = FacultyActivity {
            faculty_id: 7,
            faculty_name: "Dr. Rao".to_string(),
            total_publications: 3,
            recent: 1,
        };
        let value = serde_json::to_value(&activity).unwrap();
        assert!(value.get("faculty_id").is_none());
        assert_eq!(value["recent"], 1);
    }
}
