use crate::{pipeline::BatchShape, schema::FeatureSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// One model exposed through a single-record route and a batch upload route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub model_path: String,
    pub single_route: String,
    pub batch_route: String,
    #[serde(default = "default_upload_field")]
    pub upload_field: String,
    /// Ordered feature schema the model was trained on.
    pub features: FeatureSchema,
    /// Non-feature columns stripped from uploads; the first one present keys the output.
    #[serde(default)]
    pub identifier_columns: Vec<String>,
    #[serde(default)]
    pub batch_shape: BatchShape,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Regression,
    Classification,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub kind: TaskKind,
    /// Response field holding the prediction.
    pub field: String,
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default)]
    pub labels: BTreeMap<i64, String>,
    /// Labels for batch responses when they differ from the single-record ones.
    #[serde(default)]
    pub batch_labels: Option<BTreeMap<i64, String>>,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_upload_field() -> String {
    "file".to_string()
}

fn default_precision() -> u32 {
    2
}
