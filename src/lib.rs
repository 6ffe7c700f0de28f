// lib.rs - shared modules for both HealthyEats service binaries
pub mod bmi;
pub mod conversation;
pub mod error;
pub mod gemini_client;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod model;
pub mod models;
pub mod prompts;
pub mod retrieval;
pub mod state;

pub use state::AppState;
