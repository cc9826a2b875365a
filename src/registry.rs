//! Единственный экземпляр обученной модели на процесс

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::OnceCell;

use crate::error::PipelineError;
use crate::models::CaloriePipeline;

/// Модель обучается один раз на источнике `data_path` и дальше только читается.
/// Одновременные первые запросы ждут одно и то же обучение.
pub struct ModelRegistry {
    data_path: PathBuf,
    pipeline: OnceCell<Arc<CaloriePipeline>>,
}

impl ModelRegistry {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            pipeline: OnceCell::new(),
        }
    }

    /// Реестр с уже обученной моделью
    pub fn with_pipeline(data_path: impl Into<PathBuf>, pipeline: CaloriePipeline) -> Self {
        Self {
            data_path: data_path.into(),
            pipeline: OnceCell::new_with(Some(Arc::new(pipeline))),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn is_fitted(&self) -> bool {
        self.pipeline.initialized()
    }

    /// Обученная модель; при первом обращении - загрузка и обучение
    pub async fn get(&self) -> Result<Arc<CaloriePipeline>, PipelineError> {
        self.pipeline
            .get_or_try_init(|| async {
                let path = self.data_path.clone();
                tracing::info!("Training calorie model from {}", path.display());
                let pipeline = tokio::task::spawn_blocking(move || CaloriePipeline::from_path(&path))
                    .await
                    .map_err(|e| PipelineError::TrainingAborted(e.to_string()))??;
                Ok::<_, PipelineError>(Arc::new(pipeline))
            })
            .await
            .cloned()
    }

    /// Обучение при старте. Сообщение об отсутствующих данных - только
    /// для ошибок источника, остальные отчитываются как сбой обучения.
    pub async fn fit_at_startup(&self) -> anyhow::Result<Arc<CaloriePipeline>> {
        match self.get().await {
            Ok(pipeline) => Ok(pipeline),
            Err(e) if e.is_data_source() => Err(e).with_context(|| {
                format!(
                    "Data file '{}' not found or unusable. Please provide the data file.",
                    self.data_path.display()
                )
            }),
            Err(e) => Err(e).context("failed to train calorie model"),
        }
    }
}
