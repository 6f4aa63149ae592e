use crate::{
    config::TaskKind,
    pipeline::{BatchShape, InferenceService},
    schema::FeatureSpec,
};
use serde::{Deserialize, Serialize};

pub use crate::pipeline::ErrorResponse;

/// Entry of the `/v1/models` catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub task: TaskKind,
    pub single_route: String,
    pub batch_route: String,
    pub upload_field: String,
    pub output_field: String,
    pub batch_shape: BatchShape,
    pub features: Vec<FeatureSpec>,
    pub identifier_columns: Vec<String>,
}

impl From<&InferenceService> for ServiceInfo {
    fn from(service: &InferenceService) -> Self {
        let config = service.config();
        Self {
            name: config.name.clone(),
            task: config.output.kind,
            single_route: config.single_route.clone(),
            batch_route: config.batch_route.clone(),
            upload_field: config.upload_field.clone(),
            output_field: config.output.field.clone(),
            batch_shape: config.batch_shape,
            features: config.features.iter().cloned().collect(),
            identifier_columns: config.identifier_columns.clone(),
        }
    }
}
