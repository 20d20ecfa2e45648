use crate::domain::model::{FacultyActivity, TopAuthor};

pub const DEFAULT_TOP_AUTHORS: usize = 5;

/// Publication count descending, faculty name ascending, capped at `limit`.
pub fn top_authors(activity: &[FacultyActivity], limit: usize) -> Vec<TopAuthor> {
    let mut ranked: Vec<&FacultyActivity> = activity.iter().collect();
    ranked.sort_by(|a, b| {
        b.total_publications
            .cmp(&a.total_publications)
            .then_with(|| a.faculty_name.cmp(&b.faculty_name))
            .then_with(|| a.faculty_id.cmp(&b.faculty_id))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|a| TopAuthor {
            faculty_name: a.faculty_name.clone(),
            total_publications: a.total_publications,
        })
        .collect()
}
