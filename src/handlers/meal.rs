// src/handlers/meal.rs
use axum::{routing::post, Extension, Json, Router};
use regex::Regex;
use std::sync::Arc;

use crate::error::ApiError;
use crate::model::{GenerateRequest, MEAL_MODEL};
use crate::models::meal::{MealPlan, MealPlanText, UserProfile};
use crate::prompts::{MEAL_PLAN_JSON_PROMPT, MEAL_PLAN_PROMPT};
use crate::AppState;

lazy_static::lazy_static! {
    // Greedy match from the first '{' to the last '}', so prose or code
    // fences around the model's JSON don't break parsing.
    static ref JSON_BLOCK: Regex = Regex::new(r"\{[\s\S]*\}").expect("valid JSON block regex");
}

pub fn meal_routes() -> Router {
    Router::new()
        .route("/generate-meal", post(generate_meal))
        .route("/generate-meal/structured", post(generate_meal_structured))
}

/// Box-formatted text variant: the model's output goes back untouched.
async fn generate_meal(
    Extension(state): Extension<Arc<AppState>>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<MealPlanText>, ApiError> {
    let prompt = MEAL_PLAN_PROMPT.render(&profile.prompt_values())?;

    let meal_plan = state
        .model
        .generate(GenerateRequest::new(MEAL_MODEL, prompt))
        .await?
        .ok_or_else(|| ApiError::Upstream("model returned an empty meal plan".to_string()))?;

    Ok(Json(MealPlanText { meal_plan }))
}

/// Strict-JSON variant: extract the JSON block, parse it into the typed plan
/// shape, and cross-check it against the user's allergy list before returning.
async fn generate_meal_structured(
    Extension(state): Extension<Arc<AppState>>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<MealPlan>, ApiError> {
    let prompt = MEAL_PLAN_JSON_PROMPT.render(&profile.prompt_values())?;

    let raw = state
        .model
        .generate(GenerateRequest::new(MEAL_MODEL, prompt).with_json_output())
        .await?
        .ok_or_else(|| ApiError::Upstream("model returned an empty meal plan".to_string()))?;

    let plan = parse_meal_plan(&raw)?;
    check_allergens(&plan, &profile.allergies)?;

    Ok(Json(plan))
}

fn parse_meal_plan(raw: &str) -> Result<MealPlan, ApiError> {
    let block = JSON_BLOCK.find(raw).ok_or_else(|| {
        ApiError::BadModelOutput("no JSON object found in model output".to_string())
    })?;

    serde_json::from_str(block.as_str()).map_err(|e| {
        tracing::error!("unparseable meal plan from model: {}", e);
        ApiError::BadModelOutput(format!("failed to parse meal plan JSON: {}", e))
    })
}

/// The dietary rules live in the prompt, so the model can still slip. An
/// allergen anywhere in the plan rejects the whole response.
fn check_allergens(plan: &MealPlan, allergies: &[String]) -> Result<(), ApiError> {
    let mut violations = Vec::new();

    for allergy in allergies {
        let needle = allergy.trim().to_lowercase();
        if needle.is_empty() || needle == "none" {
            continue;
        }
        for (meal, section) in plan.sections() {
            for item in section.items() {
                if item.to_lowercase().contains(&needle) {
                    violations.push(format!("{}: '{}' matches allergy '{}'", meal, item, allergy));
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        tracing::warn!("rejecting generated meal plan: {}", violations.join("; "));
        Err(ApiError::RejectedPlan(violations.join("; ")))
    }
}
