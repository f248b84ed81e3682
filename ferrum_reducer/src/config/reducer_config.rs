use crate::framework::errors::FerrumReducerError;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReducerConfig {
    #[serde(rename = "job.name")]
    pub job_name: String,

    #[serde(rename = "intermediate.data.dir")]
    pub intermediate_data_dir: String,

    #[serde(rename = "output.data.dir")]
    pub output_data_dir: String,

    #[serde(rename = "number.of.mappers")]
    pub number_of_mappers: usize,

    #[serde(rename = "number.of.reducers")]
    pub number_of_reducers: usize,

    #[serde(rename = "log.level", default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ReducerConfig {
    pub fn from_xml_file(file_path: &str) -> Result<Self, FerrumReducerError> {
        let xml_str = std::fs::read_to_string(file_path).map_err(|err| {
            FerrumReducerError::ConfigError(format!("cannot read {}: {}", file_path, err))
        })?;
        Self::from_xml_str(&xml_str)
    }

    pub fn from_xml_str(xml_str: &str) -> Result<Self, FerrumReducerError> {
        let config: ReducerConfig = serde_xml_rs::from_str(xml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FerrumReducerError> {
        if self.job_name.trim().is_empty() {
            return Err(FerrumReducerError::ConfigError(
                "job.name must not be empty".to_string(),
            ));
        }
        if self.number_of_mappers == 0 {
            return Err(FerrumReducerError::ConfigError(
                "number.of.mappers must be at least 1".to_string(),
            ));
        }
        if self.number_of_reducers == 0 {
            return Err(FerrumReducerError::ConfigError(
                "number.of.reducers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn intermediate_dir(&self) -> PathBuf {
        PathBuf::from(&self.intermediate_data_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_data_dir)
    }

    /// Maps `log.level` onto a tracing level, falling back to INFO.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::INFO)
    }
}
