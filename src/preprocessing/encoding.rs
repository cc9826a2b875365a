//! One-hot кодирование категориального признака

use std::collections::BTreeSet;

use ndarray::Array2;

/// Категории сортируются, первая выбрасывается как опорная.
/// Неизвестная или пустая категория кодируется нулевым вектором.
pub struct OneHotEncoder {
    categories: Vec<String>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            is_fitted: false,
        }
    }

    pub fn fit<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        // Пропуск не становится отдельной категорией (sklearn заводит для NaN свою колонку)
        let seen: BTreeSet<&str> = values.into_iter().flatten().collect();
        self.categories = seen.into_iter().map(str::to_string).collect();
        self.is_fitted = true;
    }

    /// Все категории, увиденные на обучении (включая опорную)
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn reference_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    /// Категории, получившие собственную колонку
    pub fn encoded_categories(&self) -> &[String] {
        self.categories.get(1..).unwrap_or(&[])
    }

    pub fn n_columns(&self) -> usize {
        self.encoded_categories().len()
    }

    pub fn is_known(&self, value: &str) -> bool {
        self.categories.iter().any(|c| c == value)
    }

    pub fn transform<'a, I>(&self, values: I) -> Result<Array2<f64>, String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        if !self.is_fitted {
            return Err("Encoder not fitted".to_string());
        }

        let values: Vec<Option<&str>> = values.into_iter().collect();
        let encoded = self.encoded_categories();
        let mut out = Array2::zeros((values.len(), encoded.len()));

        for (i, value) in values.into_iter().enumerate() {
            let Some(value) = value else { continue };
            if let Some(j) = encoded.iter().position(|c| c == value) {
                out[[i, j]] = 1.0;
            } else if !self.is_known(value) {
                tracing::debug!("Unseen Workout_Type '{}', encoding as zero vector", value);
            }
        }

        Ok(out)
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}
