//! Feature engineering для модели калорий

use crate::error::PipelineError;
use crate::types::{FeatureVector, TrainingRecord, TARGET_COLUMN};

/// Защита от деления на ноль в `Calorie_Density`
pub const DENSITY_EPSILON: f64 = 1e-6;

/// Запись с производными колонками
#[derive(Debug, Clone, PartialEq)]
pub struct EngineeredRecord {
    pub features: FeatureVector,
    /// Считается для анализа данных, в модель не попадает
    pub calorie_density: Option<f64>,
    pub target: Option<f64>,
}

/// Выборка для обучения: X и y выровнены по индексу
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    pub features: Vec<FeatureVector>,
    pub targets: Vec<f64>,
    /// Строки, отброшенные из-за нечислового `Calories_Burned`
    pub dropped_rows: usize,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

pub struct FeatureEngineer;

impl FeatureEngineer {
    /// `Sets × Reps`, точное целое произведение; переполнение - пропуск
    pub fn training_volume(sets: Option<i64>, reps: Option<i64>) -> Option<i64> {
        sets?.checked_mul(reps?)
    }

    /// Целое значение счётчика: `3.0` -> 3, дробное или нечисловое -> пропуск
    pub fn whole_count(value: Option<f64>) -> Option<i64> {
        let value = value?;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Some(value as i64)
        } else {
            None
        }
    }

    pub fn calorie_density(calories: Option<f64>, serving_size_g: Option<f64>) -> Option<f64> {
        match (calories, serving_size_g) {
            (Some(calories), Some(serving)) => Some(calories / (serving + DENSITY_EPSILON)),
            _ => None,
        }
    }

    pub fn engineer(record: &TrainingRecord) -> EngineeredRecord {
        let training_volume =
            Self::training_volume(Self::whole_count(record.sets), Self::whole_count(record.reps));

        let features = FeatureVector {
            session_duration_hours: present(record.session_duration_hours),
            avg_bpm: present(record.avg_bpm),
            max_bpm: present(record.max_bpm),
            resting_bpm: present(record.resting_bpm),
            height_m: present(record.height_m),
            age: present(record.age),
            fat_percentage: present(record.fat_percentage),
            experience_level: present(record.experience_level),
            workout_frequency: present(record.workout_frequency),
            training_volume: training_volume.map(|v| v as f64),
            workout_type: record.workout_type.clone().filter(|t| !t.is_empty()),
        };

        EngineeredRecord {
            features,
            calorie_density: Self::calorie_density(record.calories, record.serving_size_g),
            target: present(record.calories_burned),
        }
    }

    /// Построение X/y. Строки без числовой цели убираются одной маской из
    /// обеих частей; остальные строки не отбрасываются никогда.
    pub fn build_training_set(records: &[TrainingRecord]) -> Result<TrainingSet, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let mut set = TrainingSet::default();
        for record in records {
            let engineered = Self::engineer(record);
            match engineered.target {
                Some(target) => {
                    set.features.push(engineered.features);
                    set.targets.push(target);
                }
                None => set.dropped_rows += 1,
            }
        }

        if set.is_empty() {
            return Err(PipelineError::NoValidTargets);
        }

        if set.dropped_rows > 0 {
            tracing::info!(
                "Dropped {} rows with non-numeric {}, {} rows left",
                set.dropped_rows,
                TARGET_COLUMN,
                set.len()
            );
        }

        Ok(set)
    }
}

/// NaN считается пропуском
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(duration: f64, target: Option<f64>) -> TrainingRecord {
        TrainingRecord {
            sets: Some(4.0),
            reps: Some(12.0),
            calories: Some(300.0),
            serving_size_g: Some(150.0),
            session_duration_hours: Some(duration),
            avg_bpm: Some(140.0),
            workout_type: Some("Strength".to_string()),
            calories_burned: target,
            ..Default::default()
        }
    }

    #[test]
    fn training_volume_is_exact_product() {
        assert_eq!(FeatureEngineer::training_volume(Some(4), Some(12)), Some(48));
        assert_eq!(FeatureEngineer::training_volume(Some(0), Some(50)), Some(0));
        assert_eq!(FeatureEngineer::training_volume(None, Some(50)), None);
    }

    #[test]
    fn overflowing_volume_is_missing() {
        assert_eq!(FeatureEngineer::training_volume(Some(i64::MAX), Some(2)), None);

        let mut huge = record(1.0, Some(100.0));
        huge.sets = Some(4.0e18);
        huge.reps = Some(4.0);
        let engineered = FeatureEngineer::engineer(&huge);
        assert_eq!(engineered.features.training_volume, None);
    }

    #[test]
    fn whole_counts_only() {
        assert_eq!(FeatureEngineer::whole_count(Some(3.0)), Some(3));
        assert_eq!(FeatureEngineer::whole_count(Some(-2.0)), Some(-2));
        assert_eq!(FeatureEngineer::whole_count(Some(2.5)), None);
        assert_eq!(FeatureEngineer::whole_count(Some(f64::NAN)), None);
        assert_eq!(FeatureEngineer::whole_count(Some(f64::INFINITY)), None);
        assert_eq!(FeatureEngineer::whole_count(Some(1.0e19)), None);
        assert_eq!(FeatureEngineer::whole_count(None), None);
    }

    #[test]
    fn fractional_sets_are_imputed_not_rejected() {
        let mut odd = record(1.0, Some(100.0));
        odd.sets = Some(2.5);
        let set = FeatureEngineer::build_training_set(&[odd]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.features[0].training_volume, None);
    }

    #[test]
    fn zero_serving_size_does_not_divide_by_zero() {
        let density = FeatureEngineer::calorie_density(Some(250.0), Some(0.0)).unwrap();
        assert!(density.is_finite());
        assert_eq!(density, 250.0 / DENSITY_EPSILON);
    }

    #[test]
    fn engineer_fills_training_volume() {
        let engineered = FeatureEngineer::engineer(&record(1.0, Some(500.0)));
        assert_eq!(engineered.features.training_volume, Some(48.0));
        assert_eq!(engineered.features.max_bpm, None);
        assert_eq!(engineered.target, Some(500.0));
        assert!(engineered.calorie_density.is_some());
    }

    #[test]
    fn rows_without_target_are_dropped_with_same_mask() {
        let records = vec![
            record(1.0, Some(100.0)),
            record(2.0, None),
            record(3.0, Some(300.0)),
            record(4.0, Some(f64::NAN)),
        ];
        let set = FeatureEngineer::build_training_set(&records).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.features.len(), 2);
        assert_eq!(set.dropped_rows, 2);
        assert_eq!(set.features[0].session_duration_hours, Some(1.0));
        assert_eq!(set.features[1].session_duration_hours, Some(3.0));
        assert_eq!(set.targets, vec![100.0, 300.0]);
    }

    #[test]
    fn missing_features_do_not_drop_rows() {
        let mut sparse = record(1.0, Some(100.0));
        sparse.age = None;
        sparse.sets = None;
        let set = FeatureEngineer::build_training_set(&[sparse]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.features[0].training_volume, None);
    }

    #[test]
    fn all_targets_missing_is_an_error() {
        let records = vec![record(1.0, None), record(2.0, None)];
        assert!(matches!(
            FeatureEngineer::build_training_set(&records),
            Err(PipelineError::NoValidTargets)
        ));
    }
}
