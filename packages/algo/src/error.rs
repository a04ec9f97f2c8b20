//! Error types for the estimation core

use thiserror::Error;

use crate::types::Modality;

/// Coarse error taxonomy used by callers to pick a user-visible response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Lookup,
    Sequence,
    Arithmetic,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BktError {
    #[error("invalid {context}: {reason}")]
    Validation { context: String, reason: String },

    #[error("exercise {exercise_id} has no item parameters")]
    UnknownExercise { exercise_id: String },

    #[error("concept {concept} has no parameters{}", modality_suffix(.modality))]
    UnknownConcept {
        concept: String,
        modality: Option<Modality>,
    },

    #[error("expected exactly 1 response for user {user_id} at step {step}, found {found}")]
    Sequence {
        user_id: String,
        step: u32,
        found: usize,
    },

    #[error("degenerate posterior for exercise {exercise_id} (prior {prior}): zero denominator")]
    Arithmetic { exercise_id: String, prior: f64 },
}

impl BktError {
    pub fn validation(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_exercise(exercise_id: impl Into<String>) -> Self {
        Self::UnknownExercise {
            exercise_id: exercise_id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::UnknownExercise { .. } | Self::UnknownConcept { .. } => ErrorKind::Lookup,
            Self::Sequence { .. } => ErrorKind::Sequence,
            Self::Arithmetic { .. } => ErrorKind::Arithmetic,
        }
    }
}

fn modality_suffix(modality: &Option<Modality>) -> String {
    match modality {
        Some(m) => format!(" for modality {m}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, BktError>;
