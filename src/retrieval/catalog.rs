// src/retrieval/catalog.rs
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read exercise catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse exercise catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("exercise catalog is empty")]
    Empty,
}

/// One entry of the static exercise catalog. Loaded once at startup and held
/// immutably as the retrieval corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub name: String,
    pub target_muscle: String,
    pub description: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub image_url: String,
    pub video_url: String,
}

impl ExerciseRecord {
    /// Canonical text block that gets embedded and interpolated into the
    /// workout plan prompt.
    pub fn embedding_text(&self) -> String {
        format!(
            "Name: {}\nTarget Muscle: {}\nDescription: {}\nDifficulty: {}\nType: {}\nImage: {}\nVideo: {}",
            self.name,
            self.target_muscle,
            self.description,
            self.difficulty,
            self.exercise_type,
            self.image_url,
            self.video_url
        )
    }
}

/// Load and validate the catalog file. A missing or malformed catalog is a
/// startup-fatal condition for the ai-engine binary.
pub fn load_catalog(path: &Path) -> Result<Vec<ExerciseRecord>, CatalogError> {
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<ExerciseRecord> = serde_json::from_str(&raw)?;
    if records.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_text_layout() {
        let record = ExerciseRecord {
            name: "Push-up".to_string(),
            target_muscle: "Chest".to_string(),
            description: "Bodyweight press from a plank position.".to_string(),
            difficulty: "Beginner".to_string(),
            exercise_type: "Strength".to_string(),
            image_url: "https://example.com/pushup.jpg".to_string(),
            video_url: "https://example.com/pushup.mp4".to_string(),
        };

        let text = record.embedding_text();
        assert!(text.starts_with("Name: Push-up\n"));
        assert!(text.contains("Target Muscle: Chest"));
        assert!(text.contains("Type: Strength"));
    }

    #[test]
    fn test_type_field_round_trips_under_rename() {
        let json = r#"{
            "name": "Squat",
            "target_muscle": "Legs",
            "description": "Hip-dominant knee bend.",
            "difficulty": "Beginner",
            "type": "Strength",
            "image_url": "",
            "video_url": ""
        }"#;

        let record: ExerciseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.exercise_type, "Strength");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["type"], "Strength");
    }
}
