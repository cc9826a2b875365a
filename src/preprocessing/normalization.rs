//! Стандартизация признаков

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};

/// Порог, ниже которого колонка считается константной
const MIN_STD: f64 = 1e-10;

pub struct DataNormalizer {
    mean: Option<Array1<f64>>,
    std: Option<Array1<f64>>,
    degenerate: Vec<bool>,
}

impl DataNormalizer {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
            degenerate: Vec::new(),
        }
    }

    pub fn fit(&mut self, X: &Array2<f64>) -> Result<(), String> {
        if X.nrows() == 0 {
            return Err("Empty dataset".to_string());
        }

        // Среднее и популяционное стандартное отклонение по каждому признаку
        self.mean = Some(X.mean_axis(Axis(0)).ok_or("Failed to compute mean")?);
        let mut std = X.std_axis(Axis(0), 0.0);

        // Избегаем деления на ноль
        self.degenerate = std.iter().map(|s| *s < MIN_STD).collect();
        for val in std.iter_mut() {
            if *val < MIN_STD {
                *val = 1.0;
            }
        }

        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>, String> {
        let (Some(mean), Some(std)) = (self.mean.as_ref(), self.std.as_ref()) else {
            return Err("Normalizer not fitted".to_string());
        };
        if X.ncols() != mean.len() {
            return Err(format!("Expected {} columns, got {}", mean.len(), X.ncols()));
        }

        // Нормализация: (X - mean) / std
        let mut normalized = X.clone();
        for mut row in normalized.rows_mut() {
            for (i, val) in row.iter_mut().enumerate() {
                *val = (*val - mean[i]) / std[i];
            }
        }

        Ok(normalized)
    }

    pub fn fit_transform(&mut self, X: &Array2<f64>) -> Result<Array2<f64>, String> {
        self.fit(X)?;
        self.transform(X)
    }

    /// Колонки с нулевой дисперсией на обучении
    pub fn degenerate_columns(&self) -> &[bool] {
        &self.degenerate
    }
}

impl Default for DataNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
