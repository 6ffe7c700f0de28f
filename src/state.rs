// src/state.rs
use std::sync::Arc;

use crate::conversation::ConversationStore;
use crate::model::GenerativeModel;
use crate::retrieval::ExerciseIndex;

/// Shared state injected into every handler via `Extension`. Both binaries
/// build one of these; the meal service simply leaves the index unset and
/// never mounts the routes that need it.
pub struct AppState {
    pub model: Arc<dyn GenerativeModel>,
    pub exercise_index: Option<Arc<ExerciseIndex>>,
    pub conversations: ConversationStore,
}

impl AppState {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            exercise_index: None,
            conversations: ConversationStore::new(),
        }
    }

    pub fn with_exercise_index(mut self, index: Arc<ExerciseIndex>) -> Self {
        self.exercise_index = Some(index);
        self
    }
}
