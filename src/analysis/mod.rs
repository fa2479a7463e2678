// src/analysis/mod.rs
// Content classification pipeline

pub mod error;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod types;
pub mod validator;

pub use error::AnalysisFailure;
pub use parser::{ParseMode, parse_response};
pub use pipeline::ContentAnalyzer;
pub use prompt::build_prompt;
pub use types::{Analysis, ContentType, FAILURE_MARKER, PageVisit};
pub use validator::validate;
