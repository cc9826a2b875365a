//! Сборка матрицы признаков: числовой блок, затем категориальный

use ndarray::{concatenate, Array2, Axis};

use crate::preprocessing::{DataNormalizer, MedianImputer, OneHotEncoder};
use crate::types::{FeatureVector, CATEGORICAL_FEATURE, NUMERIC_FEATURES};

/// Медиана + стандартизация для числовых колонок, one-hot для `Workout_Type`
pub struct ColumnTransformer {
    imputer: MedianImputer,
    normalizer: DataNormalizer,
    encoder: OneHotEncoder,
    is_fitted: bool,
}

impl ColumnTransformer {
    pub fn new() -> Self {
        Self {
            imputer: MedianImputer::new(),
            normalizer: DataNormalizer::new(),
            encoder: OneHotEncoder::new(),
            is_fitted: false,
        }
    }

    pub fn fit(&mut self, rows: &[FeatureVector]) -> Result<(), String> {
        if rows.is_empty() {
            return Err("Empty dataset".to_string());
        }

        let numeric = numeric_matrix(rows);
        let imputed = self.imputer.fit_transform(&numeric)?;
        self.normalizer.fit(&imputed)?;
        self.encoder.fit(rows.iter().map(FeatureVector::category));

        self.is_fitted = true;
        Ok(())
    }

    pub fn transform(&self, rows: &[FeatureVector]) -> Result<Array2<f64>, String> {
        if !self.is_fitted {
            return Err("Transformer not fitted".to_string());
        }

        let numeric = numeric_matrix(rows);
        let imputed = self.imputer.transform(&numeric)?;
        let scaled = self.normalizer.transform(&imputed)?;
        let encoded = self.encoder.transform(rows.iter().map(FeatureVector::category))?;

        concatenate(Axis(1), &[scaled.view(), encoded.view()]).map_err(|e| e.to_string())
    }

    pub fn fit_transform(&mut self, rows: &[FeatureVector]) -> Result<Array2<f64>, String> {
        self.fit(rows)?;
        self.transform(rows)
    }

    /// Имена колонок матрицы в порядке их следования
    pub fn design_columns(&self) -> Vec<String> {
        NUMERIC_FEATURES
            .iter()
            .map(|name| name.to_string())
            .chain(
                self.encoder
                    .encoded_categories()
                    .iter()
                    .map(|c| format!("{CATEGORICAL_FEATURE}_{c}")),
            )
            .collect()
    }

    /// Колонки, несущие информацию: константные числовые исключаются,
    /// one-hot колонки всегда содержат хотя бы одну единицу на обучении
    pub fn informative_columns(&self) -> Vec<bool> {
        self.normalizer
            .degenerate_columns()
            .iter()
            .map(|degenerate| !degenerate)
            .chain(std::iter::repeat(true).take(self.encoder.n_columns()))
            .collect()
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }
}

impl Default for ColumnTransformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Числовой блок; пропуски -> NaN для импутера
fn numeric_matrix(rows: &[FeatureVector]) -> Array2<f64> {
    let mut matrix = Array2::zeros((rows.len(), NUMERIC_FEATURES.len()));
    for (i, row) in rows.iter().enumerate() {
        for (j, value) in row.numeric_values().iter().enumerate() {
            matrix[[i, j]] = value.unwrap_or(f64::NAN);
        }
    }
    matrix
}
