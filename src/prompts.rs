// src/prompts.rs
//! Prompt templates for all three generation endpoints.
//!
//! Templates are structured values with a declared placeholder list; `render`
//! refuses to produce a prompt with an unbound or unexpected placeholder, so
//! a half-filled prompt can never reach the model.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("missing value for placeholder '{0}'")]
    MissingPlaceholder(&'static str),
    #[error("unknown placeholder key '{0}'")]
    UnknownKey(String),
}

pub struct PromptTemplate {
    template: String,
    placeholders: &'static [&'static str],
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>, placeholders: &'static [&'static str]) -> Self {
        Self {
            template: template.into(),
            placeholders,
        }
    }

    /// Substitute `{name}` markers from the given bindings.
    pub fn render(&self, values: &[(&str, String)]) -> Result<String, TemplateError> {
        for (key, _) in values {
            if !self.placeholders.contains(key) {
                return Err(TemplateError::UnknownKey((*key).to_string()));
            }
        }

        let mut rendered = self.template.clone();
        for &placeholder in self.placeholders {
            let value = values
                .iter()
                .find(|(key, _)| *key == placeholder)
                .map(|(_, value)| value.as_str())
                .ok_or(TemplateError::MissingPlaceholder(placeholder))?;
            rendered = rendered.replace(&format!("{{{}}}", placeholder), value);
        }

        Ok(rendered)
    }
}

const CHAT_TEMPLATE: &str = r#"You are a helpful AI health assistant in the HealthyEats app.
You help users lead a healthy lifestyle by providing diet plans, fitness routines, and wellness advice.
Always keep your tone friendly, encouraging, and practical.

Conversation history:
{history}

User: {input}
Assistant:"#;

const WORKOUT_TEMPLATE: &str = r#"You are a certified fitness coach. Your task is to create a personalized 7-day workout plan based on the provided exercise data and user input. You MUST return a valid JSON response, with no additional text, explanations, or comments outside the JSON structure. Ensure the JSON is properly formatted and includes all required fields.

Exercise data:
{context}

User details:
- Age: {age}
- Gender: {gender}
- Fitness Goal: {fitness_goal}
- Experience Level: {experience_level}
- Available Equipment: {available_equipment}
- Health Conditions: {health_conditions}

Create a 7-day workout plan where each day includes 4-5 exercises. Each exercise must include:
- name
- target_muscle
- description
- difficulty
- type
- image_url
- video_url
- reps

Return the response in the following JSON structure:
[
  {"day": "Day 1", "exercises": [{"name": "", "target_muscle": "", "description": "", "difficulty": "", "type": "", "image_url": "", "video_url": "", "reps": ""}, ...]},
  {"day": "Day 2", "exercises": [{"name": "", "target_muscle": "", "description": "", "difficulty": "", "type": "", "image_url": "", "video_url": "", "reps": ""}, ...]},
  {"day": "Day 3", "exercises": [{"name": "", "target_muscle": "", "description": "", "difficulty": "", "type": "", "image_url": "", "video_url": "", "reps": ""}, ...]},
  {"day": "Day 4", "exercises": [{"name": "", "target_muscle": "", "description": "", "difficulty": "", "type": "", "image_url": "", "video_url": "", "reps": ""}, ...]},
  {"day": "Day 5", "exercises": [{"name": "", "target_muscle": "", "description": "", "difficulty": "", "type": "", "image_url": "", "video_url": "", "reps": ""}, ...]},
  {"day": "Day 6", "exercises": [{"name": "", "target_muscle": "", "description": "", "difficulty": "", "type": "", "image_url": "", "video_url": "", "reps": ""}, ...]},
  {"day": "Day 7", "exercises": [{"name": "", "target_muscle": "", "description": "", "difficulty": "", "type": "", "image_url": "", "video_url": "", "reps": ""}, ...]}
]

If no suitable exercises are found or if the input is invalid, return an empty JSON array: []"#;

/// Dietary rules and user stats shared by both meal prompt variants.
const MEAL_RULES_AND_STATS: &str = r#"You are a certified nutritionist and health AI for Bangladesh (2025).
Generate a full 1-day meal plan (Breakfast, Lunch, Snack, Dinner) for this user, suggesting healthy local fruits and drinks/tea based on all medical preferences and dietary needs, using only modern Bangladeshi foods. Do not suggest any food or drinks not commonly eaten in Bangladesh.

STRICT RULES:
- If BMI is LOW (underweight): Prioritize nutritious, high-calorie foods for weight gain, but ONLY if not restricted by medical conditions (e.g., no oily food for heart patients, no sweets for diabetics).
- If BMI is HIGH (overweight/obese): Prioritize calorie control, more fiber, and healthy, balanced foods.
- If the user has diabetes, always avoid foods/drinks with added sugar, honey, sweets, sugary fruits (like ripe mango, banana, jackfruit, chiku), and all desserts. Do NOT recommend milk tea, sweetened tea, fruit juice, or sugary drinks of any kind.
- If the user has heart, kidney, or liver conditions, do NOT recommend oily, deep-fried, salty, spicy foods, processed meats, or foods high in saturated fat. Prioritize easily digestible, low-sodium, and heart-healthy options.
- Respect ALL allergies and food restrictions. Never suggest any item that includes an allergen.
- All recommendations must be different for each meal in a day - do NOT repeat dishes, fruits, or drinks.
- Fruits: Only suggest fruits for 1 or 2 meals in the day (ideally breakfast and/or snack). For lunch and dinner, suggest fruits only if medically necessary; otherwise, use 'Fruits: None'. Never suggest fruit with every meal.
- Drinks/Tea: Recommend local healthy drinks/teas (lemon water, green tea, coconut water) only if culturally and medically appropriate. Avoid tea with lunch or dinner. Never recommend sweetened drinks for diabetics. If no drink is suitable, use 'Drinks/Tea: None'.
- Water: Always recommend a suitable total daily water intake (in liters), and list this clearly at the end.
- All meal recommendations must fit within the user's daily budget - show cost per meal and total day cost.
- The plan must be practical and use only locally available foods and preparation methods.
- If any usual Bangladeshi food is not appropriate due to the user's medical conditions, allergies, or religious/cultural restrictions (such as beef or pork), explicitly avoid it.

USER STATS:
- Name: {name}
- Age: {age}
- Gender: {gender}
- Pregnant: {pregnant}
- Height: {height_feet}ft {height_inches}in
- Weight: {weight}kg
- BMI: {bmi} ({bmi_category})
- Suggested Daily Calorie Intake: {calorie_target} kcal
- Activity Level: {activity_level}
- Budget: {budget} TK
- Medical Conditions: {medical_conditions}
- Diabetes Range: {diabetes_range}
- Allergies: {allergies}
- Food Preferences: {food_preferences}"#;

const MEAL_TEXT_INSTRUCTIONS: &str = r#"

Instructions:
- Provide breakfast, lunch, snack, and dinner for 1 day. All meals, fruits, and drinks/teas must be different.
- Fruits should be included with at most 2 meals (ideally breakfast and snack). If no fruit is needed for a meal, write 'Fruits: None'.
- Drinks/Teas should be culturally appropriate (e.g., tea at breakfast or snack), never at every meal, and never if medically inappropriate. If not suitable, write 'Drinks/Tea: None'.
- For each meal, list the foods, suggested fruits, drinks or teas, estimated calories, basic nutrition highlights, and estimated cost.
- Show total calories for the day, and total estimated cost for the day.
- At the end, recommend a suitable amount of water to drink (in liters).
- Highlight any special instructions or dietary cautions clearly (e.g., "This plan is higher in protein for low BMI", "All meals are low sodium for heart health", etc.).
- Output must be in a clear, human-friendly BOX format (NOT JSON).

Format your output as follows:

=============================
#        1-Day Meal Plan
# -----------------------------
# Breakfast:
# - Foods: [list]
# - Fruits: [list or None]
# - Drinks/Tea: [list or None]
# - Nutrition: [info]
# - Estimated Cost: [amount] TK

# Lunch:
# - Foods: [list]
# - Fruits: [list or None]
# - Drinks/Tea: [list or None]
# - Nutrition: [info]
# - Estimated Cost: [amount] TK

# Snack:
# - Foods: [list]
# - Fruits: [list or None]
# - Drinks/Tea: [list or None]
# - Nutrition: [info]
# - Estimated Cost: [amount] TK

# Dinner:
# - Foods: [list]
# - Fruits: [list or None]
# - Drinks/Tea: [list or None]
# - Nutrition: [info]
# - Estimated Cost: [amount] TK

-----------------------------
Total Estimated Cost: [amount] TK
Total Calories: [amount] kcal

Water Intake Recommendation: [liters] liters

Notes: [any special notes or cautions]
=============================

- Do NOT include any food, fruit, or drink that is inappropriate for the user's medical conditions, allergies, restrictions, or culture.
- If any meal must be particularly high in calories/protein/fiber/low in sodium/etc. due to BMI or health conditions, state this clearly."#;

const MEAL_JSON_INSTRUCTIONS: &str = r#"

Instructions:
- Provide breakfast, lunch, snack, and dinner for 1 day. All meals, fruits, and drinks/teas must be different.
- Fruits should be included with at most 2 meals (ideally breakfast and snack). If no fruit is needed for a meal, use an empty list.
- Drinks/Teas should be culturally appropriate (e.g., tea at breakfast or snack), never at every meal, and never if medically inappropriate. If not suitable, use an empty list.
- You MUST return a single valid JSON object and nothing else: no markdown, no comments, no text outside the JSON.

Return the response in exactly this JSON structure:
{"Breakfast": {"Foods": [], "Fruits": [], "Drinks/Tea": [], "Nutrition": "", "EstimatedCost": ""}, "Lunch": {"Foods": [], "Fruits": [], "Drinks/Tea": [], "Nutrition": "", "EstimatedCost": ""}, "Snack": {"Foods": [], "Fruits": [], "Drinks/Tea": [], "Nutrition": "", "EstimatedCost": ""}, "Dinner": {"Foods": [], "Fruits": [], "Drinks/Tea": [], "Nutrition": "", "EstimatedCost": ""}, "TotalCalories": "", "TotalEstimatedCost": "", "WaterIntakeLiters": "", "Notes": ""}

- Do NOT include any food, fruit, or drink that is inappropriate for the user's medical conditions, allergies, restrictions, or culture.
- If any meal must be particularly high in calories/protein/fiber/low in sodium/etc. due to BMI or health conditions, state this clearly in Notes."#;

const MEAL_PLACEHOLDERS: &[&str] = &[
    "name",
    "age",
    "gender",
    "pregnant",
    "height_feet",
    "height_inches",
    "weight",
    "bmi",
    "bmi_category",
    "calorie_target",
    "activity_level",
    "budget",
    "medical_conditions",
    "diabetes_range",
    "allergies",
    "food_preferences",
];

lazy_static::lazy_static! {
    /// Single-turn chat prompt carrying the running transcript.
    pub static ref CHAT_PROMPT: PromptTemplate =
        PromptTemplate::new(CHAT_TEMPLATE, &["history", "input"]);

    /// 7-day workout plan prompt; `context` is the retrieved exercise block.
    pub static ref WORKOUT_PLAN_PROMPT: PromptTemplate = PromptTemplate::new(
        WORKOUT_TEMPLATE,
        &[
            "context",
            "age",
            "gender",
            "fitness_goal",
            "experience_level",
            "available_equipment",
            "health_conditions",
        ],
    );

    /// Box-formatted human-readable meal plan.
    pub static ref MEAL_PLAN_PROMPT: PromptTemplate = PromptTemplate::new(
        format!("{}{}", MEAL_RULES_AND_STATS, MEAL_TEXT_INSTRUCTIONS),
        MEAL_PLACEHOLDERS,
    );

    /// Strict-JSON meal plan variant.
    pub static ref MEAL_PLAN_JSON_PROMPT: PromptTemplate = PromptTemplate::new(
        format!("{}{}", MEAL_RULES_AND_STATS, MEAL_JSON_INSTRUCTIONS),
        MEAL_PLACEHOLDERS,
    );
}
