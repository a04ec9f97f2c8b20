//! Concept Graph
//!
//! Directed prerequisite structure over concepts. A positive weight at
//! `(row = A, col = B)` means A is a parent (prerequisite) of B. Self edges are
//! ignored and only one-hop relations are exposed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BktError, Result};
use crate::sanitize::has_invalid_values;

/// Wire form: a concept list plus a square matrix aligned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMap {
    pub concepts: Vec<String>,
    pub adj_mat: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct ConceptGraph {
    concepts: Vec<String>,
    index: HashMap<String, usize>,
    /// Row-major, `n * n`
    weights: Vec<f64>,
}

impl ConceptGraph {
    pub fn from_adjacency(concepts: Vec<String>, adj_mat: Vec<Vec<f64>>) -> Result<Self> {
        let n = concepts.len();
        if adj_mat.len() != n {
            return Err(BktError::validation(
                "conceptMap.adjMat",
                format!("expected {n} rows, found {}", adj_mat.len()),
            ));
        }

        let mut index = HashMap::with_capacity(n);
        for (i, concept) in concepts.iter().enumerate() {
            if index.insert(concept.clone(), i).is_some() {
                return Err(BktError::validation(
                    "conceptMap.concepts",
                    format!("duplicate concept {concept}"),
                ));
            }
        }

        let mut weights = Vec::with_capacity(n * n);
        for (row, values) in adj_mat.iter().enumerate() {
            if values.len() != n {
                return Err(BktError::validation(
                    format!("conceptMap.adjMat[{row}]"),
                    format!("expected {n} columns, found {}", values.len()),
                ));
            }
            if has_invalid_values(values) {
                return Err(BktError::validation(
                    format!("conceptMap.adjMat[{row}]"),
                    "weights must be finite",
                ));
            }
            weights.extend_from_slice(values);
        }

        Ok(Self {
            concepts,
            index,
            weights,
        })
    }

    fn index_of(&self, concept: &str) -> Result<usize> {
        self.index
            .get(concept)
            .copied()
            .ok_or_else(|| BktError::UnknownConcept {
                concept: concept.to_string(),
                modality: None,
            })
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        from != to && self.weights[from * self.concepts.len() + to] > 0.0
    }

    /// Direct prerequisites of `concept`, in concept-list order
    pub fn parents_of(&self, concept: &str) -> Result<Vec<&str>> {
        let target = self.index_of(concept)?;
        Ok((0..self.concepts.len())
            .filter(|&row| self.has_edge(row, target))
            .map(|row| self.concepts[row].as_str())
            .collect())
    }

    /// Concepts that directly require `concept`, in concept-list order
    pub fn children_of(&self, concept: &str) -> Result<Vec<&str>> {
        let target = self.index_of(concept)?;
        Ok((0..self.concepts.len())
            .filter(|&col| self.has_edge(target, col))
            .map(|col| self.concepts[col].as_str())
            .collect())
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

impl TryFrom<ConceptMap> for ConceptGraph {
    type Error = BktError;

    fn try_from(map: ConceptMap) -> Result<Self> {
        Self::from_adjacency(map.concepts, map.adj_mat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// vars -> loops -> recursion, vars -> functions, self edge on loops
    fn graph() -> ConceptGraph {
        ConceptGraph::from_adjacency(
            vec![
                "vars".into(),
                "loops".into(),
                "functions".into(),
                "recursion".into(),
            ],
            vec![
                vec![0.0, 1.0, 0.5, 0.0],
                vec![0.0, 1.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_parents_and_children() {
        let g = graph();
        assert_eq!(g.parents_of("loops").unwrap(), vec!["vars"]);
        assert_eq!(g.children_of("loops").unwrap(), vec!["recursion"]);
        assert_eq!(g.children_of("vars").unwrap(), vec!["loops", "functions"]);
        assert!(g.parents_of("vars").unwrap().is_empty());
    }

    #[test]
    fn test_no_transitive_closure() {
        let g = graph();
        assert_eq!(g.parents_of("recursion").unwrap(), vec!["loops"]);
    }

    #[test]
    fn test_negative_weights_are_not_edges() {
        let g = ConceptGraph::from_adjacency(
            vec!["a".into(), "b".into()],
            vec![vec![0.0, -1.0], vec![0.0, 0.0]],
        )
        .unwrap();
        assert!(g.children_of("a").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_concept() {
        let err = graph().parents_of("closures").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_rejects_non_square_matrix() {
        let err = ConceptGraph::from_adjacency(
            vec!["a".into(), "b".into()],
            vec![vec![0.0, 1.0], vec![0.0]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("adjMat[1]"));

        assert!(ConceptGraph::from_adjacency(vec!["a".into()], vec![]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_concepts() {
        let err = ConceptGraph::from_adjacency(
            vec!["a".into(), "a".into()],
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_rejects_nan_weight() {
        assert!(ConceptGraph::from_adjacency(vec!["a".into()], vec![vec![f64::NAN]]).is_err());
    }

    #[test]
    fn test_from_wire_map() {
        let map: ConceptMap =
            serde_json::from_str(r#"{"concepts": ["a", "b"], "adjMat": [[0, 1], [0, 0]]}"#)
                .unwrap();
        let g = ConceptGraph::try_from(map).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.parents_of("b").unwrap(), vec!["a"]);
    }
}
