use crate::core::aggregator::GroupedCounts;
use crate::domain::model::{DomainTrend, TrendStatus};
use crate::utils::error::{InsightError, Result};
use std::collections::BTreeMap;

pub const STABLE_MIN_TOTAL: u64 = 6;
pub const STABLE_MAX_GROWTH: i64 = 1;
pub const EMERGING_MIN_GROWTH: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendMetrics {
    pub total_papers: u64,
    pub growth: i64,
}

struct TrendRule {
    status: TrendStatus,
    matches: fn(&TrendMetrics) -> bool,
}

fn is_stable(m: &TrendMetrics) -> bool {
    m.total_papers >= STABLE_MIN_TOTAL && m.growth <= STABLE_MAX_GROWTH
}

fn is_emerging(m: &TrendMetrics) -> bool {
    m.growth >= EMERGING_MIN_GROWTH
}

// Predicates overlap; evaluation order decides the label.
const TREND_RULES: [TrendRule; 2] = [
    TrendRule {
        status: TrendStatus::Stable,
        matches: is_stable,
    },
    TrendRule {
        status: TrendStatus::Emerging,
        matches: is_emerging,
    },
];

const FALLBACK_STATUS: TrendStatus = TrendStatus::ResearchGap;

/// Growth is last-year count minus first-year count, zero for a single year.
pub fn measure(series: &BTreeMap<i32, u64>) -> Result<TrendMetrics> {
    let (first, last) = match (series.first_key_value(), series.last_key_value()) {
        (Some((_, first)), Some((_, last))) => (*first, *last),
        _ => {
            return Err(InsightError::invalid_argument(
                "year series must contain at least one year",
            ))
        }
    };

    let growth = if series.len() < 2 {
        0
    } else {
        last as i64 - first as i64
    };

    Ok(TrendMetrics {
        total_papers: series.values().sum(),
        growth,
    })
}

pub fn status_for(metrics: &TrendMetrics) -> TrendStatus {
    TREND_RULES
        .iter()
        .find(|rule| (rule.matches)(metrics))
        .map(|rule| rule.status)
        .unwrap_or(FALLBACK_STATUS)
}

pub fn classify(domain: &str, series: &BTreeMap<i32, u64>) -> Result<DomainTrend> {
    let metrics = measure(series).map_err(|_| {
        InsightError::invalid_argument(format!("empty year series for domain '{}'", domain))
    })?;

    Ok(DomainTrend {
        domain: domain.to_string(),
        total_papers: metrics.total_papers,
        growth: metrics.growth,
        status: status_for(&metrics),
    })
}

/// Classifies every domain in a domain → year → count table, in domain order.
pub fn classify_all(series: &GroupedCounts<String, i32>) -> Result<Vec<DomainTrend>> {
    let trends = series
        .iter()
        .map(|(domain, years)| classify(domain, years))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Classified {} domains", trends.len());
    Ok(trends)
}
