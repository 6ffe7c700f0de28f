// src/models/plan.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub age: u32,
    pub gender: String,
    pub fitness_goal: String,
    pub experience_level: String,
    pub available_equipment: String,
    pub health_conditions: String,
}

impl PlanRequest {
    /// Free-text retrieval query built from every field.
    pub fn retrieval_query(&self) -> String {
        format!(
            "Generate plan for age={}, gender={}, goal={}, experience={}, equipment={}, conditions={}",
            self.age,
            self.gender,
            self.fitness_goal,
            self.experience_level,
            self.available_equipment,
            self.health_conditions
        )
    }
}

/// The model's JSON array is returned verbatim; day/exercise objects are not
/// reshaped on the way through.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: Vec<serde_json::Value>,
}
