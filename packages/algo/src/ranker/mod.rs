//! Question Ranker
//!
//! Orders a candidate pool by how closely each exercise's predicted
//! correctness matches a target score derived from current mastery. As mastery
//! grows the target moves toward the hardest candidates in the pool.

use crate::error::Result;
use crate::params::ItemTable;
use crate::posterior::pcorrect;
use crate::sanitize::{ensure_finite, ensure_non_negative, ensure_probability};
use crate::types::{RankOptions, RankedExercise, DISTANCE_RESOLUTION};

/// Target score within `[min_score, max_score]` for mastery `p_known`.
pub fn target_score(min_score: f64, max_score: f64, p_known: f64, error_margin: f64) -> f64 {
    min_score + (max_score - min_score) * (1.0 - p_known + error_margin)
}

/// Sort key for an unscaled gap `|score - target|`; gaps closer than
/// [`DISTANCE_RESOLUTION`] tie.
///
/// The penalty scales every distance by the same factor, so ordering by the
/// gap is ordering by distance unless the penalty is zero, when all tie.
fn gap_key(gap: f64, penalty: f64) -> f64 {
    if penalty == 0.0 {
        return 0.0;
    }
    (gap / DISTANCE_RESOLUTION).round()
}

/// Rank `candidates`, most recommended first.
///
/// The output is a permutation of the input; equal distances keep input order.
pub fn order_candidates(
    candidates: &[String],
    p_known: f64,
    items: &ItemTable,
    options: RankOptions,
) -> Result<Vec<RankedExercise>> {
    let p_known = ensure_probability("pKnown", p_known)?;
    let error_margin = ensure_finite("errorMargin", options.error_margin)?;
    let penalty = ensure_non_negative("penalty", options.penalty)?;

    let ranked = candidates
        .iter()
        .map(|eid| {
            let item = items.lookup(eid)?;
            Ok(RankedExercise {
                eid: eid.clone(),
                concept: item.concept.clone(),
                score: pcorrect(p_known, item.slip, item.guess),
                distance: 0.0,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if ranked.is_empty() {
        return Ok(ranked);
    }

    let (min_score, max_score) = ranked
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.score), hi.max(r.score))
        });
    let target = target_score(min_score, max_score, p_known, error_margin);

    let mut keyed: Vec<(f64, RankedExercise)> = ranked
        .into_iter()
        .map(|mut r| {
            let gap = (r.score - target).abs();
            r.distance = gap * penalty;
            (gap_key(gap, penalty), r)
        })
        .collect();
    // stable: ties keep input order
    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    let ranked: Vec<RankedExercise> = keyed.into_iter().map(|(_, r)| r).collect();

    tracing::debug!(
        candidates = ranked.len(),
        p_known,
        min_score,
        max_score,
        target,
        "ranked candidates"
    );
    Ok(ranked)
}

/// Ranked exercise ids only
pub fn order_candidate_ids(
    candidates: &[String],
    p_known: f64,
    items: &ItemTable,
    options: RankOptions,
) -> Result<Vec<String>> {
    Ok(order_candidates(candidates, p_known, items, options)?
        .into_iter()
        .map(|r| r.eid)
        .collect())
}
