//! Конфигурация сервера

use std::path::PathBuf;

use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CALORIE_ML";
pub const CONFIG_FILE: &str = "calorie_ml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// CSV с обучающими данными
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Обучать модель при старте, а не на первом запросе
    pub eager_fit: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("expanded_fitness_data.csv"),
            host: "0.0.0.0".to_string(),
            port: 8000,
            eager_fit: true,
        }
    }
}

impl ServerConfig {
    /// Значения по умолчанию -> `calorie_ml.toml` (если есть) -> переменные `CALORIE_ML_*`
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&ServerConfig::default())?)
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
