// src/handlers/mod.rs
pub mod chat;
pub mod meal;
pub mod plan;
