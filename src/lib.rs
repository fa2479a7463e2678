// src/lib.rs

pub mod analysis;
pub mod api;
pub mod config;
pub mod llm;
pub mod state;
pub mod visits;
