//! Заполнение пропусков медианой

#![allow(non_snake_case)]

use ndarray::{Array1, Array2};

/// Пропуски в матрице кодируются как NaN
pub struct MedianImputer {
    medians: Option<Array1<f64>>,
}

impl MedianImputer {
    pub fn new() -> Self {
        Self { medians: None }
    }

    pub fn fit(&mut self, X: &Array2<f64>) -> Result<(), String> {
        if X.nrows() == 0 {
            return Err("Empty dataset".to_string());
        }

        let medians: Array1<f64> = X
            .columns()
            .into_iter()
            .map(|column| {
                let observed: Vec<f64> = column.iter().copied().filter(|v| !v.is_nan()).collect();
                // Колонка без единого значения заполняется нулём
                median(observed).unwrap_or(0.0)
            })
            .collect();

        self.medians = Some(medians);
        Ok(())
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>, String> {
        let medians = self.medians.as_ref().ok_or("Imputer not fitted")?;
        if X.ncols() != medians.len() {
            return Err(format!(
                "Expected {} columns, got {}",
                medians.len(),
                X.ncols()
            ));
        }

        let mut filled = X.clone();
        for mut row in filled.rows_mut() {
            for (i, val) in row.iter_mut().enumerate() {
                if val.is_nan() {
                    *val = medians[i];
                }
            }
        }

        Ok(filled)
    }

    pub fn fit_transform(&mut self, X: &Array2<f64>) -> Result<Array2<f64>, String> {
        self.fit(X)?;
        self.transform(X)
    }

    pub fn medians(&self) -> Option<&Array1<f64>> {
        self.medians.as_ref()
    }
}

impl Default for MedianImputer {
    fn default() -> Self {
        Self::new()
    }
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
