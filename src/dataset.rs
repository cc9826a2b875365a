//! Загрузка обучающих записей из CSV

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::PipelineError;
use crate::types::{TrainingRecord, REQUIRED_COLUMNS};

/// Чтение датасета с диска. Отсутствующий файл - `DataSourceUnavailable`.
pub fn load_records(path: &Path) -> Result<Vec<TrainingRecord>, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::DataSourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records(file)?;
    tracing::info!("Loaded {} training rows from {}", records.len(), path.display());
    Ok(records)
}

/// Чтение датасета из произвольного источника
pub fn read_records<R: Read>(reader: R) -> Result<Vec<TrainingRecord>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PipelineError::MissingColumn(column.to_string()));
        }
    }

    let records = reader
        .deserialize::<TrainingRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    if records.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    Ok(records)
}
