//! Calorie ML - предсказание сожжённых калорий по параметрам тренировки

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod preprocessing;
pub mod registry;
pub mod types;

pub use error::{PipelineError, PredictionError};
pub use models::*;
pub use preprocessing::*;
pub use types::*;

// Re-export для удобства
pub use registry::ModelRegistry;
