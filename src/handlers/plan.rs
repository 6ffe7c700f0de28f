// src/handlers/plan.rs
use axum::{routing::post, Extension, Json, Router};
use std::sync::Arc;

use crate::error::ApiError;
use crate::model::{GenerateRequest, PLAN_MODEL};
use crate::models::plan::{PlanRequest, PlanResponse};
use crate::prompts::WORKOUT_PLAN_PROMPT;
use crate::retrieval::index::RETRIEVAL_K;
use crate::AppState;

pub fn plan_routes() -> Router {
    Router::new().route("/plan", post(generate_plan))
}

async fn generate_plan(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let index = state
        .exercise_index
        .as_ref()
        .ok_or(ApiError::NotConfigured("exercise index"))?;

    let query = request.retrieval_query();
    let hits = index
        .search(state.model.as_ref(), &query, RETRIEVAL_K)
        .await
        .map_err(|e| {
            tracing::error!("exercise retrieval failed: {}", e);
            ApiError::from(e)
        })?;
    tracing::debug!(hits = hits.len(), "retrieved exercises for plan query");

    let context = hits
        .iter()
        .map(|record| record.embedding_text())
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = WORKOUT_PLAN_PROMPT.render(&[
        ("context", context),
        ("age", request.age.to_string()),
        ("gender", request.gender.clone()),
        ("fitness_goal", request.fitness_goal.clone()),
        ("experience_level", request.experience_level.clone()),
        ("available_equipment", request.available_equipment.clone()),
        ("health_conditions", request.health_conditions.clone()),
    ])?;

    let raw = state
        .model
        .generate(
            GenerateRequest::new(PLAN_MODEL, prompt)
                .with_temperature(0.4)
                .with_json_output(),
        )
        .await
        .map_err(|e| {
            tracing::error!("workout plan generation failed: {}", e);
            ApiError::from(e)
        })?;

    let plan = match raw {
        None => {
            tracing::warn!("model returned an empty workout plan");
            Vec::new()
        }
        Some(text) => serde_json::from_str(&text).map_err(|e| {
            tracing::error!("unparseable workout plan from model: {}", e);
            ApiError::BadModelOutput(format!("failed to parse workout plan JSON: {}", e))
        })?,
    };

    Ok(Json(PlanResponse { plan }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testutil::post_json;
    use crate::model::mock::MockModel;
    use crate::retrieval::{ExerciseIndex, ExerciseRecord};
    use axum::http::StatusCode;
    use serde_json::json;

    fn catalog() -> Vec<ExerciseRecord> {
        ["Push-up", "Squat", "Plank"]
            .into_iter()
            .map(|name| ExerciseRecord {
                name: name.to_string(),
                target_muscle: "Full body".to_string(),
                description: "test exercise".to_string(),
                difficulty: "Beginner".to_string(),
                exercise_type: "Strength".to_string(),
                image_url: String::new(),
                video_url: String::new(),
            })
            .collect()
    }

    async fn app(model: MockModel) -> Router {
        let index = ExerciseIndex::build(&model, catalog()).await.unwrap();
        let state = Arc::new(AppState::new(Arc::new(model)).with_exercise_index(Arc::new(index)));
        plan_routes().layer(Extension(state))
    }

    fn plan_request() -> serde_json::Value {
        json!({
            "age": 30,
            "gender": "male",
            "fitness_goal": "muscle gain",
            "experience_level": "beginner",
            "available_equipment": "dumbbells",
            "health_conditions": "none"
        })
    }

    fn seven_day_plan() -> serde_json::Value {
        let days: Vec<serde_json::Value> = (1..=7)
            .map(|day| {
                json!({
                    "day": format!("Day {}", day),
                    "exercises": [{
                        "name": "Push-up",
                        "target_muscle": "Chest",
                        "description": "Bodyweight press.",
                        "difficulty": "Beginner",
                        "type": "Strength",
                        "image_url": "",
                        "video_url": "",
                        "reps": "12"
                    }]
                })
            })
            .collect();
        serde_json::Value::Array(days)
    }

    #[tokio::test]
    async fn test_plan_returns_model_array_verbatim() {
        let expected = seven_day_plan();
        let app = app(MockModel::replying(&expected.to_string())).await;

        let (status, body) = post_json(app, "/plan", plan_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plan"], expected);
        assert_eq!(body["plan"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_plan_empty_model_output_degrades_to_empty_array() {
        let app = app(MockModel::empty()).await;

        let (status, body) = post_json(app, "/plan", plan_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plan"], json!([]));
    }

    #[tokio::test]
    async fn test_plan_unparseable_output_is_500() {
        let app = app(MockModel::replying("sorry, no JSON today")).await;

        let (status, body) = post_json(app, "/plan", plan_request()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("failed to parse workout plan JSON"));
    }

    #[tokio::test]
    async fn test_plan_without_index_is_500() {
        let state = Arc::new(AppState::new(Arc::new(MockModel::replying("[]"))));
        let app = plan_routes().layer(Extension(state));

        let (status, body) = post_json(app, "/plan", plan_request()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("exercise index"));
    }
}
