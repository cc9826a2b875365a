//! Модель калорий: предобработка + линейная регрессия

#![allow(non_snake_case)]

use std::path::Path;

use ndarray::Array1;

use crate::dataset;
use crate::error::{PipelineError, PredictionError};
use crate::models::regression::OrdinaryLeastSquares;
use crate::preprocessing::{ColumnTransformer, FeatureEngineer, TrainingSet};
use crate::types::{
    FeatureVector, FitMetrics, ModelSummary, PredictionOutput, TrainingRecord, WorkoutSession,
    FINAL_FEATURES,
};

/// Обученный пайплайн. После `fit` не изменяется.
pub struct CaloriePipeline {
    transformer: ColumnTransformer,
    regressor: OrdinaryLeastSquares,
    metrics: FitMetrics,
}

impl CaloriePipeline {
    /// Загрузка CSV, feature engineering и обучение
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let records = dataset::load_records(path)?;
        Self::fit_records(&records)
    }

    pub fn fit_records(records: &[TrainingRecord]) -> Result<Self, PipelineError> {
        let set = FeatureEngineer::build_training_set(records)?;
        Self::fit(&set)
    }

    pub fn fit(set: &TrainingSet) -> Result<Self, PipelineError> {
        if set.is_empty() {
            return Err(PipelineError::NoValidTargets);
        }
        if set.features.len() != set.targets.len() {
            return Err(PipelineError::Regression(format!(
                "X has {} rows, y has {}",
                set.features.len(),
                set.targets.len()
            )));
        }

        let mut transformer = ColumnTransformer::new();
        let X = transformer
            .fit_transform(&set.features)
            .map_err(PipelineError::Regression)?;
        let y = Array1::from_vec(set.targets.clone());

        let mut regressor = OrdinaryLeastSquares::new();
        regressor
            .fit(&X, &y, &transformer.informative_columns())
            .map_err(PipelineError::Regression)?;

        let fitted = regressor.predict(&X).map_err(PipelineError::Regression)?;
        let metrics = FitMetrics {
            n_samples: set.len(),
            dropped_rows: set.dropped_rows,
            r2: r2_score(&y, &fitted),
            mae: mean_absolute_error(&y, &fitted),
        };

        tracing::info!(
            "Calorie model trained on {} rows, categories {:?}. R2: {:.4}, MAE: {:.2}",
            metrics.n_samples,
            transformer.encoder().categories(),
            metrics.r2,
            metrics.mae
        );

        Ok(Self {
            transformer,
            regressor,
            metrics,
        })
    }

    /// Предсказание без отсечения отрицательных значений
    pub fn predict_raw(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, PredictionError> {
        let X = self
            .transformer
            .transform(rows)
            .map_err(PredictionError::Malformed)?;
        let predictions = self
            .regressor
            .predict(&X)
            .map_err(PredictionError::Malformed)?;
        Ok(predictions.to_vec())
    }

    /// Калории не бывают отрицательными: результат отсекается снизу нулём
    pub fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, PredictionError> {
        Ok(self
            .predict_raw(rows)?
            .into_iter()
            .map(|p| p.max(0.0))
            .collect())
    }

    pub fn predict_one(&self, row: &FeatureVector) -> Result<f64, PredictionError> {
        self.predict(std::slice::from_ref(row))?
            .first()
            .copied()
            .ok_or_else(|| PredictionError::Malformed("empty prediction".to_string()))
    }

    /// Предсказание по значениям из формы
    pub fn predict_calories(
        &self,
        session: &WorkoutSession,
    ) -> Result<PredictionOutput, PredictionError> {
        let training_volume = session.training_volume()?;
        let calories_burned = self.predict_one(&session.to_features()?)?;
        Ok(PredictionOutput {
            calories_burned,
            training_volume,
            workout_type: session.workout_type.clone(),
        })
    }

    pub fn metrics(&self) -> FitMetrics {
        self.metrics
    }

    pub fn summary(&self) -> ModelSummary {
        let encoder = self.transformer.encoder();
        ModelSummary {
            features: FINAL_FEATURES.iter().map(|f| f.to_string()).collect(),
            categories: encoder.categories().to_vec(),
            reference_category: encoder.reference_category().map(str::to_string),
            design_columns: self.transformer.design_columns(),
            intercept: self.regressor.intercept(),
            coefficients: self
                .regressor
                .weights()
                .map(|w| w.to_vec())
                .unwrap_or_default(),
            metrics: self.metrics,
        }
    }

    /// Коэффициент при колонке матрицы с указанным именем
    pub fn coefficient(&self, column: &str) -> Option<f64> {
        let index = self
            .transformer
            .design_columns()
            .iter()
            .position(|c| c == column)?;
        self.regressor.weights().map(|w| w[index])
    }
}

fn r2_score(y: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    let mean = y.mean().unwrap_or(0.0);
    let ss_tot: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let ss_res: f64 = y
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

fn mean_absolute_error(y: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    (y - predicted).mapv(f64::abs).mean().unwrap_or(0.0)
}
