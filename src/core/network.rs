use crate::core::aggregator::GroupedCounts;
use crate::domain::model::{AuthorshipDomainFact, NetworkEdge};
use std::collections::BTreeSet;

/// Builds the faculty × domain edge list. `papers` counts distinct
/// publications per (faculty name, domain name); duplicate facts for the same
/// publication are collapsed first, and pairs with no publication never appear.
pub fn build<I>(facts: I) -> Vec<NetworkEdge>
where
    I: IntoIterator<Item = AuthorshipDomainFact>,
{
    let distinct: BTreeSet<AuthorshipDomainFact> = facts.into_iter().collect();

    let weights: GroupedCounts<String, String> = distinct
        .into_iter()
        .map(|fact| (fact.faculty_name, fact.domain_name))
        .collect();

    let edges: Vec<NetworkEdge> = weights
        .triples()
        .map(|(faculty_name, domain_name, papers)| NetworkEdge {
            faculty_name: faculty_name.clone(),
            domain_name: domain_name.clone(),
            papers,
        })
        .collect();

    tracing::debug!("Built collaboration network with {} edges", edges.len());
    edges
}
