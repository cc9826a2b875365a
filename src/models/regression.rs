//! Линейная регрессия (МНК без регуляризации)

#![allow(non_snake_case)]

use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2, Axis};

/// Обёртка над `linfa_linear::LinearRegression` с выбрасыванием
/// неинформативных колонок: их коэффициент равен нулю
pub struct OrdinaryLeastSquares {
    weights: Option<Array1<f64>>,
    intercept: f64,
}

impl OrdinaryLeastSquares {
    pub fn new() -> Self {
        Self {
            weights: None,
            intercept: 0.0,
        }
    }

    pub fn fit(
        &mut self,
        X: &Array2<f64>,
        y: &Array1<f64>,
        informative: &[bool],
    ) -> Result<(), String> {
        if X.nrows() == 0 {
            return Err("Empty dataset".to_string());
        }
        if X.nrows() != y.len() {
            return Err(format!("X has {} rows, y has {}", X.nrows(), y.len()));
        }
        if informative.len() != X.ncols() {
            return Err(format!(
                "Column mask has {} entries, X has {} columns",
                informative.len(),
                X.ncols()
            ));
        }

        let active: Vec<usize> = (0..X.ncols()).filter(|&j| informative[j]).collect();
        let mut weights = Array1::zeros(X.ncols());

        if active.is_empty() {
            // Только свободный член
            self.intercept = y.mean().ok_or("Failed to compute mean")?;
            self.weights = Some(weights);
            return Ok(());
        }

        let dataset = Dataset::new(X.select(Axis(1), &active), y.clone());
        let fitted = LinearRegression::new()
            .fit(&dataset)
            .map_err(|e| e.to_string())?;

        let params = fitted.params();
        if params.iter().any(|p| !p.is_finite()) || !fitted.intercept().is_finite() {
            return Err("Singular design matrix".to_string());
        }

        for (k, &j) in active.iter().enumerate() {
            weights[j] = params[k];
        }
        self.intercept = fitted.intercept();
        self.weights = Some(weights);
        Ok(())
    }

    pub fn predict(&self, X: &Array2<f64>) -> Result<Array1<f64>, String> {
        let weights = self.weights.as_ref().ok_or("Model not trained")?;
        if X.ncols() != weights.len() {
            return Err(format!("Expected {} columns, got {}", weights.len(), X.ncols()));
        }
        Ok(X.dot(weights) + self.intercept)
    }

    pub fn weights(&self) -> Option<&Array1<f64>> {
        self.weights.as_ref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Default for OrdinaryLeastSquares {
    fn default() -> Self {
        Self::new()
    }
}
