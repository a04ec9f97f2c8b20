//! Concept Hierarchy Filter
//!
//! Narrows a ranked candidate list to a bounded number of exercises per
//! relation to the target concept (same concept, direct children, direct
//! parents) while keeping rank order.

use std::collections::HashSet;

use crate::error::Result;
use crate::graph::ConceptGraph;
use crate::params::ItemTable;
use crate::types::HierarchyBounds;

/// Length of the rank prefix eligible for hierarchy picks: `⌊len / 2⌋ + 1`,
/// clamped to `len`.
///
/// The cutoff has no recorded rationale; it keeps low-ranked parent/child
/// exercises from displacing better-ranked target-concept ones.
pub fn eligible_prefix_len(len: usize) -> usize {
    (len / 2 + 1).min(len)
}

/// First `limit` exercises, in rank order, whose concept satisfies `matches`
fn take_matching<'a>(
    ordered: &'a [String],
    concepts: &[&str],
    limit: usize,
    matches: impl Fn(&str) -> bool,
) -> Vec<&'a str> {
    ordered
        .iter()
        .zip(concepts)
        .filter(|&(_, &concept)| matches(concept))
        .map(|(eid, _)| eid.as_str())
        .take(limit)
        .collect()
}

/// Filter `ordered` (most recommended first) by concept relation.
///
/// Each bucket takes the first `max_*` matching exercises in rank order. The
/// result is the union of the buckets restricted to the eligible rank prefix,
/// in rank order, without duplicates.
pub fn filter_by_hierarchy(
    ordered: &[String],
    items: &ItemTable,
    target_concept: &str,
    graph: &ConceptGraph,
    bounds: HierarchyBounds,
) -> Result<Vec<String>> {
    let parents: HashSet<&str> = graph.parents_of(target_concept)?.into_iter().collect();
    let children: HashSet<&str> = graph.children_of(target_concept)?.into_iter().collect();

    let concepts = ordered
        .iter()
        .map(|eid| items.lookup(eid).map(|item| item.concept.as_str()))
        .collect::<Result<Vec<_>>>()?;

    let target = take_matching(ordered, &concepts, bounds.max_target, |c| c == target_concept);
    let child = take_matching(ordered, &concepts, bounds.max_child, |c| children.contains(c));
    let parent = take_matching(ordered, &concepts, bounds.max_parent, |c| parents.contains(c));

    tracing::debug!(
        target_concept,
        ?target,
        ?child,
        ?parent,
        "hierarchy buckets"
    );

    let picked: HashSet<&str> = target.iter().chain(&child).chain(&parent).copied().collect();
    let mut seen = HashSet::with_capacity(picked.len());

    Ok(ordered[..eligible_prefix_len(ordered.len())]
        .iter()
        .filter(|eid| picked.contains(eid.as_str()) && seen.insert(eid.as_str()))
        .cloned()
        .collect())
}
