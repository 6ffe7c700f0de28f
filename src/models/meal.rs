// src/models/meal.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bmi;

/// User health profile as submitted by the app. Wire names are camelCase.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub pregnant: bool,
    pub height_feet: u32,
    pub height_inches: u32,
    pub weight: f64,
    pub activity_level: String,
    pub budget: u32,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub diabetes_range: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub preferred_food_types: Vec<String>,
}

impl UserProfile {
    pub fn bmi(&self) -> f64 {
        bmi::calculate_bmi(self.height_feet, self.height_inches, self.weight)
    }

    /// Prompt bindings for the meal templates, lists joined and empties
    /// rendered the way the original prompt expects.
    pub fn prompt_values(&self) -> Vec<(&'static str, String)> {
        let bmi = self.bmi();
        vec![
            ("name", self.name.clone()),
            ("age", self.age.to_string()),
            ("gender", self.gender.clone()),
            ("pregnant", self.pregnant.to_string()),
            ("height_feet", self.height_feet.to_string()),
            ("height_inches", self.height_inches.to_string()),
            ("weight", self.weight.to_string()),
            ("bmi", bmi.to_string()),
            ("bmi_category", bmi::bmi_category(bmi).to_string()),
            (
                "calorie_target",
                bmi::suggested_calorie_intake(bmi).to_string(),
            ),
            ("activity_level", self.activity_level.clone()),
            ("budget", self.budget.to_string()),
            ("medical_conditions", join_or_none(&self.medical_conditions)),
            (
                "diabetes_range",
                self.diabetes_range
                    .clone()
                    .filter(|range| !range.is_empty())
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            ("allergies", join_or_none(&self.allergies)),
            ("food_preferences", join_or_none(&self.preferred_food_types)),
        ]
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// Raw-text variant response.
#[derive(Debug, Serialize)]
pub struct MealPlanText {
    pub meal_plan: String,
}

/// One meal section of the structured plan. `Drinks/Tea` keeps the original
/// wire spelling; `Drinks_Tea` is accepted as an alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSection {
    #[serde(rename = "Foods", default)]
    pub foods: Vec<String>,
    #[serde(rename = "Fruits", default)]
    pub fruits: Vec<String>,
    #[serde(rename = "Drinks/Tea", alias = "Drinks_Tea", default)]
    pub drinks_tea: Vec<String>,
    #[serde(rename = "Nutrition", default)]
    pub nutrition: String,
    #[serde(rename = "EstimatedCost", default)]
    pub estimated_cost: Value,
}

impl MealSection {
    /// Every edible/drinkable item named in this section.
    pub fn items(&self) -> impl Iterator<Item = &String> {
        self.foods
            .iter()
            .chain(self.fruits.iter())
            .chain(self.drinks_tea.iter())
    }
}

/// Fixed-shape structured meal plan. Totals stay as raw JSON values because
/// the model emits them inconsistently as strings or numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(rename = "Breakfast")]
    pub breakfast: MealSection,
    #[serde(rename = "Lunch")]
    pub lunch: MealSection,
    #[serde(rename = "Snack")]
    pub snack: MealSection,
    #[serde(rename = "Dinner")]
    pub dinner: MealSection,
    #[serde(rename = "TotalCalories", default)]
    pub total_calories: Value,
    #[serde(rename = "TotalEstimatedCost", default)]
    pub total_estimated_cost: Value,
    #[serde(rename = "WaterIntakeLiters", default)]
    pub water_intake_liters: Value,
    #[serde(rename = "Notes", default)]
    pub notes: Value,
}

impl MealPlan {
    pub fn sections(&self) -> [(&'static str, &MealSection); 4] {
        [
            ("Breakfast", &self.breakfast),
            ("Lunch", &self.lunch),
            ("Snack", &self.snack),
            ("Dinner", &self.dinner),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_accepts_camel_case_wire_names() {
        let json = r#"{
            "name": "Rahim",
            "age": 34,
            "gender": "male",
            "heightFeet": 5,
            "heightInches": 7,
            "weight": 70.0,
            "activityLevel": "moderate",
            "budget": 500,
            "medicalConditions": ["diabetes"],
            "diabetesRange": "7-9 mmol/L",
            "allergies": ["nuts"],
            "preferredFoodTypes": ["high-protein"]
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.height_feet, 5);
        assert!(!profile.pregnant);
        assert_eq!(profile.medical_conditions, vec!["diabetes"]);
        assert_eq!(profile.bmi(), 24.2);
    }

    #[test]
    fn test_prompt_values_render_empties_as_none() {
        let profile = UserProfile {
            name: String::new(),
            age: 25,
            gender: "female".to_string(),
            pregnant: false,
            height_feet: 5,
            height_inches: 2,
            weight: 50.0,
            activity_level: "light".to_string(),
            budget: 300,
            medical_conditions: vec![],
            diabetes_range: None,
            allergies: vec![],
            preferred_food_types: vec![],
        };

        let values = profile.prompt_values();
        let get = |key: &str| {
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("medical_conditions"), "None");
        assert_eq!(get("diabetes_range"), "N/A");
        assert_eq!(get("allergies"), "None");
    }

    #[test]
    fn test_meal_plan_accepts_both_drinks_spellings() {
        let json = r#"{
            "Breakfast": {"Foods": ["Ruti"], "Fruits": ["Guava"], "Drinks/Tea": ["Green tea"], "Nutrition": "fiber", "EstimatedCost": "40"},
            "Lunch": {"Foods": ["Rice", "Fish curry"], "Fruits": [], "Drinks_Tea": [], "Nutrition": "protein", "EstimatedCost": 120},
            "Snack": {"Foods": ["Chola"], "Fruits": [], "Drinks/Tea": [], "Nutrition": "", "EstimatedCost": "30"},
            "Dinner": {"Foods": ["Khichuri"], "Fruits": [], "Drinks/Tea": [], "Nutrition": "", "EstimatedCost": "80"},
            "TotalCalories": 1900,
            "TotalEstimatedCost": "270 TK",
            "WaterIntakeLiters": 2.5,
            "Notes": "Low sodium."
        }"#;

        let plan: MealPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.breakfast.drinks_tea, vec!["Green tea"]);
        assert_eq!(plan.lunch.foods.len(), 2);

        let back = serde_json::to_value(&plan).unwrap();
        assert!(back["Breakfast"].get("Drinks/Tea").is_some());
    }
}
