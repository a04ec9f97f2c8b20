//! Recommendation Pipeline
//!
//! Live path for one answered exercise: update mastery, rank the candidate
//! pool against the new estimate, filter it by concept hierarchy, then merge
//! the top-ranked and hierarchy-filtered picks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::ConceptGraph;
use crate::hierarchy::filter_by_hierarchy;
use crate::params::ItemTable;
use crate::posterior::update;
use crate::ranker::order_candidates;
use crate::types::{
    HierarchyBounds, RankOptions, RankedExercise, DEFAULT_RELATED_N, DEFAULT_TOP_N,
};

/// Recommendation tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Exercises taken from the head of the full ranking
    pub top_n: usize,
    /// Exercises taken from the head of the hierarchy-filtered ranking
    pub related_n: usize,
    pub bounds: HierarchyBounds,
    pub rank: RankOptions,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            related_n: DEFAULT_RELATED_N,
            bounds: HierarchyBounds::default(),
            rank: RankOptions::default(),
        }
    }
}

/// Inputs for one recommendation, borrowed from the caller's snapshot
#[derive(Debug, Clone, Copy)]
pub struct RecommendInput<'a> {
    pub is_correct: bool,
    pub exercise_id: &'a str,
    pub transfer: f64,
    pub prior_p_known: f64,
    pub candidates: &'a [String],
    pub target_concept: &'a str,
    pub items: &'a ItemTable,
    pub graph: &'a ConceptGraph,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Updated mastery estimate
    pub p_known: f64,
    /// Recommended exercises with ranking metadata, in rank order
    pub exercises: Vec<RankedExercise>,
}

impl Recommendation {
    pub fn exercise_ids(&self) -> Vec<String> {
        self.exercises.iter().map(|r| r.eid.clone()).collect()
    }
}

pub fn recommend(input: &RecommendInput<'_>, config: &RecommendConfig) -> Result<Recommendation> {
    let p_known = update(
        input.is_correct,
        input.exercise_id,
        input.transfer,
        input.items,
        input.prior_p_known,
    )?;

    let ranked = order_candidates(input.candidates, p_known, input.items, config.rank)?;
    let ranked_ids: Vec<String> = ranked.iter().map(|r| r.eid.clone()).collect();

    let related = filter_by_hierarchy(
        &ranked_ids,
        input.items,
        input.target_concept,
        input.graph,
        config.bounds,
    )?;

    let selected: HashSet<&str> = ranked_ids
        .iter()
        .take(config.top_n)
        .chain(related.iter().take(config.related_n))
        .map(String::as_str)
        .collect();

    let mut seen = HashSet::with_capacity(selected.len());
    let exercises: Vec<RankedExercise> = ranked
        .iter()
        .filter(|r| selected.contains(r.eid.as_str()) && seen.insert(r.eid.as_str()))
        .cloned()
        .collect();

    tracing::info!(
        exercise_id = input.exercise_id,
        prior = input.prior_p_known,
        p_known,
        candidates = input.candidates.len(),
        recommended = exercises.len(),
        "recommendation computed"
    );

    Ok(Recommendation { p_known, exercises })
}
