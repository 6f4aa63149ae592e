use super::{OutputPolicy, SchemaAdapter, invoker, mapper, response};
use crate::{
    Result,
    config::{ServiceConfig, TaskKind},
    model::Model,
    schema::RawTable,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// One model plus the rules for adapting requests to it and shaping its answers.
///
/// Holds no per-request state, so a single instance is shared by every request.
pub struct InferenceService {
    config: ServiceConfig,
    single_policy: OutputPolicy,
    batch_policy: OutputPolicy,
    model: Arc<dyn Model>,
}

impl InferenceService {
    pub fn new(config: ServiceConfig, model: Arc<dyn Model>) -> Self {
        let output = &config.output;
        let (single_policy, batch_policy) = match output.kind {
            TaskKind::Regression => {
                let policy = OutputPolicy::Regression {
                    precision: output.precision,
                };
                (policy.clone(), policy)
            }
            TaskKind::Classification => (
                OutputPolicy::Classification {
                    labels: output.labels.clone(),
                },
                OutputPolicy::Classification {
                    labels: output
                        .batch_labels
                        .clone()
                        .unwrap_or_else(|| output.labels.clone()),
                },
            ),
        };

        Self {
            config,
            single_policy,
            batch_policy,
            model,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn adapter(&self) -> SchemaAdapter<'_> {
        SchemaAdapter::new(&self.config.features, &self.config.identifier_columns)
    }

    /// Scores one JSON object and returns `{<output field>: value}`.
    pub fn predict_single(&self, payload: &Value) -> Result<Value> {
        let adapted = self.adapter().adapt_record(payload)?;
        let outputs = invoker::invoke(self.model.as_ref(), &adapted.features)?;
        let results = mapper::map_results(outputs, &adapted.identifiers, &self.single_policy)?;
        response::single(&self.config.output.field, results)
    }

    /// Scores every row of an uploaded CSV file.
    pub fn predict_batch(&self, csv: &[u8]) -> Result<Value> {
        let raw = RawTable::from_csv(csv)?;
        let adapted = self.adapter().adapt_table(&raw)?;

        debug!(
            "Service {} scoring {} rows keyed by {}",
            self.name(),
            adapted.features.len(),
            adapted.identifiers.field_name()
        );

        let outputs = invoker::invoke(self.model.as_ref(), &adapted.features)?;
        let results = mapper::map_results(outputs, &adapted.identifiers, &self.batch_policy)?;
        response::batch(
            &self.config.output.field,
            adapted.identifiers.field_name(),
            results,
            self.config.batch_shape,
        )
    }
}
