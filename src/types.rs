/// Типы данных для модели калорий

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PredictionError;

/// Колонки, обязательные во входном CSV
pub const REQUIRED_COLUMNS: [&str; 15] = [
    "Sets",
    "Reps",
    "Calories",
    "serving_size_g",
    "Session_Duration (hours)",
    "Avg_BPM",
    "Max_BPM",
    "Resting_BPM",
    "Height (m)",
    "Age",
    "Fat_Percentage",
    "Experience_Level",
    "Workout_Frequency (days/week)",
    "Workout_Type",
    "Calories_Burned",
];

/// Числовые признаки в том порядке, в котором они идут в матрицу
pub const NUMERIC_FEATURES: [&str; 10] = [
    "Session_Duration (hours)",
    "Avg_BPM",
    "Max_BPM",
    "Resting_BPM",
    "Height (m)",
    "Age",
    "Fat_Percentage",
    "Experience_Level",
    "Workout_Frequency (days/week)",
    "Training_Volume",
];

pub const CATEGORICAL_FEATURE: &str = "Workout_Type";

pub const TARGET_COLUMN: &str = "Calories_Burned";

/// Полный список признаков модели: 10 числовых + 1 категориальный
pub const FINAL_FEATURES: [&str; 11] = [
    "Session_Duration (hours)",
    "Avg_BPM",
    "Max_BPM",
    "Resting_BPM",
    "Height (m)",
    "Age",
    "Fat_Percentage",
    "Experience_Level",
    "Workout_Frequency (days/week)",
    "Training_Volume",
    "Workout_Type",
];

/// Строка исходного датасета.
///
/// Пустые ячейки читаются как `None`. Целевая колонка читается мягко:
/// нечисловое значение превращается в `None`, а не в ошибку.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Счётчики читаются как числа с плавающей точкой: pandas пишет `3.0`
    /// для целых колонок с пропусками
    #[serde(rename = "Sets")]
    pub sets: Option<f64>,
    #[serde(rename = "Reps")]
    pub reps: Option<f64>,
    #[serde(rename = "Calories")]
    pub calories: Option<f64>,
    #[serde(rename = "serving_size_g")]
    pub serving_size_g: Option<f64>,
    #[serde(rename = "Session_Duration (hours)")]
    pub session_duration_hours: Option<f64>,
    #[serde(rename = "Avg_BPM")]
    pub avg_bpm: Option<f64>,
    #[serde(rename = "Max_BPM")]
    pub max_bpm: Option<f64>,
    #[serde(rename = "Resting_BPM")]
    pub resting_bpm: Option<f64>,
    #[serde(rename = "Height (m)")]
    pub height_m: Option<f64>,
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "Fat_Percentage")]
    pub fat_percentage: Option<f64>,
    #[serde(rename = "Experience_Level")]
    pub experience_level: Option<f64>,
    #[serde(rename = "Workout_Frequency (days/week)")]
    pub workout_frequency: Option<f64>,
    #[serde(rename = "Workout_Type")]
    pub workout_type: Option<String>,
    #[serde(rename = "Calories_Burned", deserialize_with = "csv::invalid_option")]
    pub calories_burned: Option<f64>,
}

/// Вектор признаков модели (11 полей).
///
/// `None` в числовом поле означает пропуск: при предсказании он заполняется
/// медианой, посчитанной на обучении.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub session_duration_hours: Option<f64>,
    pub avg_bpm: Option<f64>,
    pub max_bpm: Option<f64>,
    pub resting_bpm: Option<f64>,
    pub height_m: Option<f64>,
    pub age: Option<f64>,
    pub fat_percentage: Option<f64>,
    pub experience_level: Option<f64>,
    pub workout_frequency: Option<f64>,
    pub training_volume: Option<f64>,
    pub workout_type: Option<String>,
}

impl FeatureVector {
    /// Числовые значения в порядке `NUMERIC_FEATURES`
    pub fn numeric_values(&self) -> [Option<f64>; 10] {
        [
            self.session_duration_hours,
            self.avg_bpm,
            self.max_bpm,
            self.resting_bpm,
            self.height_m,
            self.age,
            self.fat_percentage,
            self.experience_level,
            self.workout_frequency,
            self.training_volume,
        ]
    }

    pub fn category(&self) -> Option<&str> {
        self.workout_type.as_deref()
    }

    /// Сборка из записи, где ключи - точные имена колонок модели.
    /// Отсутствующий ключ - ошибка, `null` - пропуск.
    pub fn from_columns(record: &Map<String, Value>) -> Result<Self, PredictionError> {
        let mut numeric = [None; 10];
        for (slot, name) in numeric.iter_mut().zip(NUMERIC_FEATURES) {
            *slot = numeric_field(record, name)?;
        }
        let [session_duration_hours, avg_bpm, max_bpm, resting_bpm, height_m, age, fat_percentage, experience_level, workout_frequency, training_volume] =
            numeric;

        let workout_type = match field(record, CATEGORICAL_FEATURE)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => {
                return Err(PredictionError::InvalidField {
                    field: CATEGORICAL_FEATURE.to_string(),
                    reason: format!("expected a string label, got {other}"),
                })
            }
        };

        Ok(Self {
            session_duration_hours,
            avg_bpm,
            max_bpm,
            resting_bpm,
            height_m,
            age,
            fat_percentage,
            experience_level,
            workout_frequency,
            training_volume,
            workout_type,
        })
    }
}

fn field<'a>(record: &'a Map<String, Value>, name: &str) -> Result<&'a Value, PredictionError> {
    record
        .get(name)
        .ok_or_else(|| PredictionError::MissingField(name.to_string()))
}

fn numeric_field(record: &Map<String, Value>, name: &str) -> Result<Option<f64>, PredictionError> {
    match field(record, name)? {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| PredictionError::InvalidField {
            field: name.to_string(),
            reason: format!("{n} is not representable as f64"),
        }),
        other => Err(PredictionError::InvalidField {
            field: name.to_string(),
            reason: format!("expected a number, got {other}"),
        }),
    }
}

/// Параметры тренировки, которые вводит пользователь
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub session_duration_hours: f64,
    pub avg_bpm: f64,
    pub max_bpm: f64,
    pub resting_bpm: f64,
    pub height_m: f64,
    pub age: f64,
    pub fat_percentage: f64,
    pub experience_level: f64,
    pub workout_frequency: f64,
    pub sets: i64,
    pub reps: i64,
    pub workout_type: String,
}

impl WorkoutSession {
    /// `sets × reps`; переполнение - ошибка ввода, а не паника
    pub fn training_volume(&self) -> Result<i64, PredictionError> {
        self.sets
            .checked_mul(self.reps)
            .ok_or_else(|| PredictionError::InvalidField {
                field: "Training_Volume".to_string(),
                reason: format!("{} sets x {} reps overflows", self.sets, self.reps),
            })
    }

    /// Перевод во вектор признаков; объём тренировки считается здесь,
    /// пайплайн сам его не выводит
    pub fn to_features(&self) -> Result<FeatureVector, PredictionError> {
        let training_volume = self.training_volume()?;
        Ok(FeatureVector {
            session_duration_hours: Some(self.session_duration_hours),
            avg_bpm: Some(self.avg_bpm),
            max_bpm: Some(self.max_bpm),
            resting_bpm: Some(self.resting_bpm),
            height_m: Some(self.height_m),
            age: Some(self.age),
            fat_percentage: Some(self.fat_percentage),
            experience_level: Some(self.experience_level),
            workout_frequency: Some(self.workout_frequency),
            training_volume: Some(training_volume as f64),
            workout_type: Some(self.workout_type.clone()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub calories_burned: f64,
    pub training_volume: i64,
    pub workout_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionOutput {
    pub predictions: Vec<f64>,
}

/// Качество модели на обучающей выборке
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    pub n_samples: usize,
    pub dropped_rows: usize,
    pub r2: f64,
    pub mae: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    pub features: Vec<String>,
    pub categories: Vec<String>,
    pub reference_category: Option<String>,
    pub design_columns: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub metrics: FitMetrics,
}
