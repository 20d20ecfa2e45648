use crate::core::queries::FactIndex;
use crate::domain::model::{Publication, SearchHit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Match against the publication's domain name.
    Domain,
    /// Match against the title.
    Keyword,
    /// Same matching as `Keyword`; kept as its own entry point.
    Topic,
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Case-insensitive substring search, newest publications first.
pub fn search(index: &FactIndex<'_>, field: SearchField, pattern: &str) -> Vec<SearchHit> {
    let needle = pattern.to_lowercase();

    let mut matches: Vec<&Publication> = index
        .snapshot()
        .publications
        .iter()
        .filter(|p| match field {
            SearchField::Domain => index
                .domain_of(p)
                .is_some_and(|name| contains_ignore_case(name, &needle)),
            SearchField::Keyword | SearchField::Topic => contains_ignore_case(&p.title, &needle),
        })
        .collect();

    matches.sort_by(|a, b| {
        b.publication_year
            .cmp(&a.publication_year)
            .then_with(|| a.publication_id.cmp(&b.publication_id))
    });

    tracing::debug!("{:?} search '{}' matched {} publications", field, pattern, matches.len());

    matches
        .into_iter()
        .map(|p| SearchHit {
            title: p.title.clone(),
            authors: index.authors_of(p.publication_id),
            publication_year: p.publication_year,
        })
        .collect()
}
