//! Request and response bodies
//!
//! Field names follow the JSON contract of the recommendation endpoint
//! (`isCorrect`, `exerciseID`, `itemParams`, `pkNew`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use bkt_algo::{
    predicted_correctness, recommend, replay_user, Concept, ConceptGraph, ConceptMap, ConceptTable,
    Item, ItemTable, Modality, RankedExercise, RecommendConfig, RecommendInput, ResponseEvent,
};

use crate::response::CliError;

// ==================== Recommend ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub is_correct: bool,
    pub read_or_write: Modality,
    #[serde(rename = "exerciseID")]
    pub exercise_id: String,
    pub transfer: f64,
    /// Raw `{eid, slip, guess, concept}` records, validated by [`ItemTable`]
    pub item_params: Vec<Value>,
    pub target_concept: String,
    pub concept_map: ConceptMap,
    pub prior_pknown: f64,
    #[serde(rename = "exerciseIDs")]
    pub exercise_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub pk_new: f64,
    pub exercise_info: Vec<RankedExercise>,
    pub suggested_exercises: Vec<String>,
}

pub fn handle_recommend(
    request: RecommendRequest,
    config: &RecommendConfig,
) -> Result<RecommendResponse, CliError> {
    let items = ItemTable::from_json_records(&request.item_params, request.read_or_write)?;
    let graph = ConceptGraph::try_from(request.concept_map)?;
    tracing::debug!(
        items = items.len(),
        concepts = graph.len(),
        candidates = request.exercise_ids.len(),
        "recommend request parsed"
    );

    let input = RecommendInput {
        is_correct: request.is_correct,
        exercise_id: &request.exercise_id,
        transfer: request.transfer,
        prior_p_known: request.prior_pknown,
        candidates: &request.exercise_ids,
        target_concept: &request.target_concept,
        items: &items,
        graph: &graph,
    };
    let recommendation = recommend(&input, config)?;

    Ok(RecommendResponse {
        pk_new: recommendation.p_known,
        suggested_exercises: recommendation.exercise_ids(),
        exercise_info: recommendation.exercises,
    })
}

// ==================== Replay ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayRequest {
    pub user_id: String,
    pub responses: Vec<ResponseEvent>,
    pub concept_params: Vec<Concept>,
    pub item_params: Vec<Item>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryReport {
    pub concept: String,
    pub modality: Modality,
    /// Mastery after each step; index 0 is the prior
    pub p_known: Vec<f64>,
    /// Predicted probability of a correct answer at each step
    pub p_correct: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayResponse {
    pub user_id: String,
    pub trajectories: Vec<TrajectoryReport>,
}

pub fn handle_replay(request: ReplayRequest) -> Result<ReplayResponse, CliError> {
    let concepts = ConceptTable::new(request.concept_params)?;
    let items = ItemTable::new(request.item_params)?;
    let user_id = request.user_id;
    tracing::debug!(
        %user_id,
        responses = request.responses.len(),
        concepts = concepts.len(),
        items = items.len(),
        "replay request parsed"
    );

    let trajectories = replay_user(&user_id, &request.responses, &concepts, &items)?
        .into_iter()
        .map(|trajectory| -> Result<TrajectoryReport, CliError> {
            let p_correct = predicted_correctness(
                &user_id,
                &trajectory.concept,
                trajectory.modality,
                &request.responses,
                &concepts,
                &items,
            )?;
            Ok(TrajectoryReport {
                concept: trajectory.concept,
                modality: trajectory.modality,
                p_known: trajectory.estimates,
                p_correct,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReplayResponse {
        user_id,
        trajectories,
    })
}
