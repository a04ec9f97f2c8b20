//! Sequence Replayer
//!
//! Reconstructs a learner's mastery trajectory for one concept/modality by
//! replaying the full response history through the posterior update. Used for
//! batch recomputation (for example after concept or item parameters change),
//! not on the live recommendation path.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{BktError, Result};
use crate::params::{ConceptTable, ItemTable};
use crate::posterior::{pcorrect, update};
use crate::types::{Modality, ResponseEvent};

/// Replayed trajectory for one concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptTrajectory {
    pub concept: String,
    pub modality: Modality,
    /// `estimates[0]` is the concept's `init`; `estimates[k]` follows step `k`
    pub estimates: Vec<f64>,
}

/// Responses of `user_id` to exercises of `concept`/`modality`, indexed by
/// step. Fails unless there is exactly one response per step in `1..=n`.
fn ordered_responses<'a>(
    user_id: &str,
    concept: &str,
    modality: Modality,
    responses: &'a [ResponseEvent],
    items: &ItemTable,
) -> Result<Vec<&'a ResponseEvent>> {
    let matching: Vec<&ResponseEvent> = responses
        .iter()
        .filter(|event| event.user_id == user_id)
        .filter(|event| {
            items
                .get(&event.exercise_id)
                .is_some_and(|item| item.concept == concept && item.modality == modality)
        })
        .collect();

    let mut by_step: HashMap<u32, Vec<&ResponseEvent>> = HashMap::with_capacity(matching.len());
    for &event in &matching {
        by_step.entry(event.step).or_default().push(event);
    }

    let n = matching.len() as u32;
    (1..=n)
        .map(|step| match by_step.get(&step).map(Vec::as_slice) {
            Some([event]) => Ok(*event),
            other => Err(BktError::Sequence {
                user_id: user_id.to_string(),
                step,
                found: other.map_or(0, <[_]>::len),
            }),
        })
        .collect()
}

/// Replay `user_id`'s history on `concept`/`modality`.
///
/// Returns `n + 1` estimates where `n` is the number of matching responses.
pub fn replay(
    user_id: &str,
    concept: &str,
    modality: Modality,
    responses: &[ResponseEvent],
    concepts: &ConceptTable,
    items: &ItemTable,
) -> Result<Vec<f64>> {
    let params = concepts.lookup(concept, modality)?;
    let ordered = ordered_responses(user_id, concept, modality, responses, items)?;

    let mut estimates = Vec::with_capacity(ordered.len() + 1);
    estimates.push(params.init);
    for event in ordered {
        let prior = estimates[estimates.len() - 1];
        let next = update(
            event.correct,
            &event.exercise_id,
            params.transfer,
            items,
            prior,
        )?;
        estimates.push(next);
    }
    Ok(estimates)
}

/// Model-predicted probability of a correct answer at each replayed step.
///
/// Element `k` uses the estimate held before step `k + 1` and the item answered
/// at that step, so the trace has one entry per matching response.
pub fn predicted_correctness(
    user_id: &str,
    concept: &str,
    modality: Modality,
    responses: &[ResponseEvent],
    concepts: &ConceptTable,
    items: &ItemTable,
) -> Result<Vec<f64>> {
    let estimates = replay(user_id, concept, modality, responses, concepts, items)?;
    let ordered = ordered_responses(user_id, concept, modality, responses, items)?;

    ordered
        .iter()
        .zip(&estimates)
        .map(|(event, &p_known)| {
            let item = items.lookup(&event.exercise_id)?;
            Ok(pcorrect(p_known, item.slip, item.guess))
        })
        .collect()
}

/// Replay every concept in `concepts` for one user.
///
/// Concepts are replayed in parallel; output follows concept-table order.
pub fn replay_user(
    user_id: &str,
    responses: &[ResponseEvent],
    concepts: &ConceptTable,
    items: &ItemTable,
) -> Result<Vec<ConceptTrajectory>> {
    let targets: Vec<_> = concepts.iter().collect();
    let trajectories = targets
        .par_iter()
        .map(|concept| {
            replay(
                user_id,
                &concept.id,
                concept.modality,
                responses,
                concepts,
                items,
            )
            .map(|estimates| ConceptTrajectory {
                concept: concept.id.clone(),
                modality: concept.modality,
                estimates,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        user_id,
        concepts = trajectories.len(),
        "replayed user history"
    );
    Ok(trajectories)
}
