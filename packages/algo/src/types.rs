//! Common Types and Constants
//!
//! Shared data structures used across all estimation and ranking modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Constants ====================

/// Unscaled ranking gaps closer than this are treated as ties
pub const DISTANCE_RESOLUTION: f64 = 1e-9;

/// Default number of top-ranked exercises merged into a recommendation
pub const DEFAULT_TOP_N: usize = 2;

/// Default number of hierarchy-filtered exercises merged into a recommendation
pub const DEFAULT_RELATED_N: usize = 2;

/// Default bucket size for exercises of the target concept
pub const DEFAULT_MAX_TARGET: usize = 4;

/// Default bucket size for exercises of child concepts
pub const DEFAULT_MAX_CHILD: usize = 2;

/// Default bucket size for exercises of parent concepts
pub const DEFAULT_MAX_PARENT: usize = 2;

// ==================== Modality ====================

/// Whether a concept or exercise trains reading or writing.
///
/// Reading and writing the same nominal skill are estimated as distinct concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Read,
    Write,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Read => "read",
            Modality::Write => "write",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Parameter Records ====================

/// Wire keys of an item parameter record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Eid,
    Slip,
    Guess,
    Concept,
}

impl ItemField {
    pub const ALL: [ItemField; 4] = [
        ItemField::Eid,
        ItemField::Slip,
        ItemField::Guess,
        ItemField::Concept,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Eid => "eid",
            ItemField::Slip => "slip",
            ItemField::Guess => "guess",
            ItemField::Concept => "concept",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }
}

/// Exercise parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    /// Exercise id
    pub eid: String,
    /// Concept this exercise practices
    pub concept: String,
    /// P(incorrect | mastered)
    pub slip: f64,
    /// P(correct | not mastered)
    pub guess: f64,
    pub modality: Modality,
}

/// Concept parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Concept {
    pub id: String,
    pub modality: Modality,
    /// Prior mastery before any practice
    pub init: f64,
    /// P(learned) per practice opportunity
    pub transfer: f64,
}

// ==================== Responses ====================

/// One recorded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEvent {
    #[serde(alias = "uid")]
    pub user_id: String,
    #[serde(alias = "eid")]
    pub exercise_id: String,
    /// 1-based, contiguous per user per concept/modality
    pub step: u32,
    pub correct: bool,
}

// ==================== Ranking ====================

/// Ranking tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankOptions {
    /// Shifts the target score; positive values admit slightly harder exercises
    pub error_margin: f64,
    /// Scale applied to every distance
    pub penalty: f64,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            error_margin: 0.0,
            penalty: 1.0,
        }
    }
}

/// A candidate exercise with its ranking metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedExercise {
    pub eid: String,
    pub concept: String,
    /// Predicted probability of a correct answer
    pub score: f64,
    /// Weighted distance to the target score (lower ranks first)
    pub distance: f64,
}

/// Per-relation bucket sizes for the hierarchy filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyBounds {
    pub max_target: usize,
    pub max_child: usize,
    pub max_parent: usize,
}

impl HierarchyBounds {
    pub fn total(&self) -> usize {
        self.max_target + self.max_child + self.max_parent
    }
}

impl Default for HierarchyBounds {
    fn default() -> Self {
        Self {
            max_target: DEFAULT_MAX_TARGET,
            max_child: DEFAULT_MAX_CHILD,
            max_parent: DEFAULT_MAX_PARENT,
        }
    }
}
