/// Модуль предобработки данных

pub mod column_transformer;
pub mod encoding;
pub mod feature_engineering;
pub mod imputation;
pub mod normalization;

pub use column_transformer::ColumnTransformer;
pub use encoding::OneHotEncoder;
pub use feature_engineering::{EngineeredRecord, FeatureEngineer, TrainingSet};
pub use imputation::MedianImputer;
pub use normalization::DataNormalizer;
