use crate::domain::model::{FacultyActivity, InfluenceEntry};
use std::cmp::Ordering;

pub const RECENT_WEIGHT: u64 = 2;
/// Recent means `year >= current_year - RECENT_WINDOW_YEARS`.
pub const RECENT_WINDOW_YEARS: i32 = 2;

pub fn is_recent(publication_year: i32, current_year: i32) -> bool {
    publication_year >= current_year - RECENT_WINDOW_YEARS
}

pub fn influence_score(total_publications: u64, recent: u64) -> u64 {
    total_publications.saturating_add(recent.saturating_mul(RECENT_WEIGHT))
}

/// Score descending, then faculty name ascending, then faculty id ascending.
fn rank_order(a: &(u64, &FacultyActivity), b: &(u64, &FacultyActivity)) -> Ordering {
    b.0.cmp(&a.0)
        .then_with(|| a.1.faculty_name.cmp(&b.1.faculty_name))
        .then_with(|| a.1.faculty_id.cmp(&b.1.faculty_id))
}

pub fn rank(activity: &[FacultyActivity]) -> Vec<InfluenceEntry> {
    let mut scored: Vec<(u64, &FacultyActivity)> = activity
        .iter()
        .map(|a| (influence_score(a.total_publications, a.recent), a))
        .collect();
    scored.sort_by(rank_order);

    scored
        .into_iter()
        .map(|(influence_score, a)| InfluenceEntry {
            faculty_name: a.faculty_name.clone(),
            total_publications: a.total_publications,
            recent: a.recent,
            influence_score,
        })
        .collect()
}
