//! Posterior Updater
//!
//! Single-response Bayesian Knowledge Tracing update:
//! - Invert the observation model (slip/guess) conditioned on correctness
//! - Apply the learning transition: mastery may be gained at every opportunity

use crate::error::{BktError, Result};
use crate::params::ItemTable;
use crate::sanitize::{ensure_probability, is_degenerate_denominator};

/// Predicted probability of a correct response given mastery `p_known`.
pub fn pcorrect(p_known: f64, slip: f64, guess: f64) -> f64 {
    p_known * (1.0 - slip) + (1.0 - p_known) * guess
}

/// P(known | observation) before the learning transition.
///
/// Fails with an arithmetic error when the evidence has zero probability
/// (`slip = 1` on a correct answer, `guess = 1` on an incorrect one, combined
/// with a prior that rules out the other branch).
pub fn bayes_posterior(
    is_correct: bool,
    exercise_id: &str,
    slip: f64,
    guess: f64,
    prior: f64,
) -> Result<f64> {
    let (numerator, denominator) = if is_correct {
        let known = prior * (1.0 - slip);
        (known, known + (1.0 - prior) * guess)
    } else {
        let known = prior * slip;
        (known, known + (1.0 - prior) * (1.0 - guess))
    };

    if is_degenerate_denominator(denominator) {
        return Err(BktError::Arithmetic {
            exercise_id: exercise_id.to_string(),
            prior,
        });
    }
    Ok(numerator / denominator)
}

/// Update the mastery estimate after one response to `exercise_id`.
pub fn update(
    is_correct: bool,
    exercise_id: &str,
    transfer: f64,
    items: &ItemTable,
    prior_p_known: f64,
) -> Result<f64> {
    let prior = ensure_probability("priorPknown", prior_p_known)?;
    let transfer = ensure_probability("transfer", transfer)?;
    let item = items.lookup(exercise_id)?;

    let posterior = bayes_posterior(is_correct, exercise_id, item.slip, item.guess, prior)?;
    let result = posterior + (1.0 - posterior) * transfer;

    tracing::trace!(
        exercise_id,
        is_correct,
        prior,
        posterior,
        result,
        "bkt posterior update"
    );
    Ok(result)
}
