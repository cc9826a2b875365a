//! Ошибки обучения и предсказания

use std::path::PathBuf;

use thiserror::Error;

/// Ошибки этапа обучения. Для процесса они фатальны.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data source unavailable: {path}: {source}")]
    DataSourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse training data: {0}")]
    Csv(#[from] csv::Error),

    #[error("training data is missing required column '{0}'")]
    MissingColumn(String),

    #[error("training data is empty")]
    EmptyDataset,

    #[error("no rows with a numeric Calories_Burned value")]
    NoValidTargets,

    #[error("regression fit failed: {0}")]
    Regression(String),

    #[error("training aborted: {0}")]
    TrainingAborted(String),
}

impl PipelineError {
    /// Проблема с источником данных (а не с самой моделью)
    pub fn is_data_source(&self) -> bool {
        matches!(
            self,
            PipelineError::DataSourceUnavailable { .. }
                | PipelineError::Csv(_)
                | PipelineError::MissingColumn(_)
                | PipelineError::EmptyDataset
                | PipelineError::NoValidTargets
        )
    }
}

/// Ошибки входных данных предсказания. Исправляются повторной отправкой.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("malformed prediction input: {0}")]
    Malformed(String),
}
