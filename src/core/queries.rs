//! Snapshot-side projections: the joins and groupings that feed the analytics.
//!
//! Joins follow inner-join semantics: a publication whose domain does not
//! resolve is left out of every domain-level projection, and an authorship
//! link is used only when both its faculty and its publication resolve.

use crate::core::aggregator::GroupedCounts;
use crate::core::{influence, network};
use crate::domain::model::{
    AuthorshipDomainFact, DomainId, DomainYearCount, FactSnapshot, FacultyActivity, FacultyId,
    NetworkEdge, Publication, PublicationId, QualityRow, YearTotal, NOT_INDEXED, UNKNOWN_AUTHOR,
};
use std::collections::{BTreeSet, HashMap};

pub struct FactIndex<'a> {
    snapshot: &'a FactSnapshot,
    domain_names: HashMap<DomainId, &'a str>,
    faculty_names: HashMap<FacultyId, &'a str>,
    publications: HashMap<PublicationId, &'a Publication>,
    authors_by_publication: HashMap<PublicationId, BTreeSet<&'a str>>,
}

impl<'a> FactIndex<'a> {
    pub fn new(snapshot: &'a FactSnapshot) -> Self {
        let domain_names: HashMap<_, _> = snapshot
            .domains
            .iter()
            .map(|d| (d.domain_id, d.domain_name.as_str()))
            .collect();
        let faculty_names: HashMap<_, _> = snapshot
            .faculty
            .iter()
            .map(|f| (f.faculty_id, f.faculty_name.as_str()))
            .collect();
        let publications: HashMap<_, _> = snapshot
            .publications
            .iter()
            .map(|p| (p.publication_id, p))
            .collect();

        let mut authors_by_publication: HashMap<PublicationId, BTreeSet<&'a str>> = HashMap::new();
        let mut dangling_links = 0usize;
        for link in &snapshot.authorships {
            match (
                faculty_names.get(&link.faculty_id),
                publications.contains_key(&link.publication_id),
            ) {
                (Some(name), true) => {
                    authors_by_publication
                        .entry(link.publication_id)
                        .or_default()
                        .insert(*name);
                }
                _ => dangling_links += 1,
            }
        }
        if dangling_links > 0 {
            tracing::warn!(
                "Ignoring {} authorship links with unknown faculty or publication",
                dangling_links
            );
        }

        let unresolved_domains = snapshot
            .publications
            .iter()
            .filter(|p| !domain_names.contains_key(&p.domain_id))
            .count();
        if unresolved_domains > 0 {
            tracing::warn!(
                "{} publications reference an unknown domain and are left out of domain analytics",
                unresolved_domains
            );
        }

        Self {
            snapshot,
            domain_names,
            faculty_names,
            publications,
            authors_by_publication,
        }
    }

    pub fn snapshot(&self) -> &'a FactSnapshot {
        self.snapshot
    }

    pub fn domain_of(&self, publication: &Publication) -> Option<&'a str> {
        self.domain_names.get(&publication.domain_id).copied()
    }

    /// Distinct author names joined by `,`, or the unknown-author sentinel.
    pub fn authors_of(&self, publication_id: PublicationId) -> String {
        match self.authors_by_publication.get(&publication_id) {
            Some(names) if !names.is_empty() => {
                names.iter().copied().collect::<Vec<_>>().join(",")
            }
            _ => UNKNOWN_AUTHOR.to_string(),
        }
    }

    /// Authorship links whose faculty and publication both resolve.
    fn resolved_links(&self) -> impl Iterator<Item = (FacultyId, &'a Publication)> + '_ {
        self.snapshot.authorships.iter().filter_map(|link| {
            self.faculty_names.get(&link.faculty_id)?;
            let publication = self.publications.get(&link.publication_id)?;
            Some((link.faculty_id, *publication))
        })
    }

    pub fn year_totals(&self) -> Vec<YearTotal> {
        let mut totals: GroupedCounts<(), i32> = GroupedCounts::new();
        for publication in &self.snapshot.publications {
            totals.increment((), publication.publication_year);
        }

        totals
            .triples()
            .map(|(_, year, total)| YearTotal {
                publication_year: *year,
                total,
            })
            .collect()
    }

    /// Domain name → year → publication count.
    pub fn domain_year_series(&self) -> GroupedCounts<String, i32> {
        self.snapshot
            .publications
            .iter()
            .filter_map(|p| {
                self.domain_of(p)
                    .map(|name| (name.to_string(), p.publication_year))
            })
            .collect()
    }

    pub fn domain_year_counts(&self) -> Vec<DomainYearCount> {
        self.domain_year_series()
            .triples()
            .map(|(domain_name, year, total)| DomainYearCount {
                domain_name: domain_name.clone(),
                publication_year: *year,
                total,
            })
            .collect()
    }

    /// Per faculty (by id) total authorships and those inside the recent window.
    /// Faculty without any resolved authorship are absent.
    pub fn faculty_totals_and_recency(&self, current_year: i32) -> Vec<FacultyActivity> {
        let by_year: GroupedCounts<FacultyId, i32> = self
            .resolved_links()
            .map(|(faculty_id, publication)| (faculty_id, publication.publication_year))
            .collect();

        by_year
            .iter()
            .filter_map(|(faculty_id, years)| {
                let faculty_name = self.faculty_names.get(faculty_id)?;
                let recent: u64 = years
                    .iter()
                    .filter(|(year, _)| influence::is_recent(**year, current_year))
                    .map(|(_, count)| *count)
                    .sum();
                Some(FacultyActivity {
                    faculty_id: *faculty_id,
                    faculty_name: faculty_name.to_string(),
                    total_publications: years.values().sum(),
                    recent,
                })
            })
            .collect()
    }

    pub fn authorship_domain_facts(&self) -> Vec<AuthorshipDomainFact> {
        self.resolved_links()
            .filter_map(|(faculty_id, publication)| {
                Some(AuthorshipDomainFact {
                    faculty_name: self.faculty_names.get(&faculty_id)?.to_string(),
                    domain_name: self.domain_of(publication)?.to_string(),
                    publication_id: publication.publication_id,
                })
            })
            .collect()
    }

    pub fn faculty_domain_edges(&self) -> Vec<NetworkEdge> {
        network::build(self.authorship_domain_facts())
    }

    pub fn publication_quality_rows(&self) -> Vec<QualityRow> {
        let mut quartiles: HashMap<PublicationId, Vec<&str>> = HashMap::new();
        for quality in &self.snapshot.quality {
            quartiles
                .entry(quality.publication_id)
                .or_default()
                .push(quality.quartile.as_str());
        }

        let mut rows: Vec<(&str, PublicationId, QualityRow)> = Vec::new();
        for publication in &self.snapshot.publications {
            let Some(domain_name) = self.domain_of(publication) else {
                continue;
            };
            let labels = quartiles
                .get(&publication.publication_id)
                .cloned()
                .unwrap_or_else(|| vec![NOT_INDEXED]);
            for quartile in labels {
                rows.push((
                    domain_name,
                    publication.publication_id,
                    QualityRow {
                        title: publication.title.clone(),
                        domain_name: domain_name.to_string(),
                        quartile: quartile.to_string(),
                    },
                ));
            }
        }

        rows.sort_by(|a, b| a.0.cmp(b.0).then(a.1.cmp(&b.1)));
        rows.into_iter().map(|(_, _, row)| row).collect()
    }
}
