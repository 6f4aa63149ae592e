use crate::{Error, Result, model::Model, schema::FeatureTable};
use std::time::Instant;
use tracing::debug;

/// Scores the whole table with a single model call.
///
/// Model failures are returned untouched; there is no row-level recovery and no retry.
pub fn invoke(model: &dyn Model, table: &FeatureTable) -> Result<Vec<f64>> {
    let started = Instant::now();
    let outputs = model.predict(table)?;

    debug!(
        "Model scored {} records in {} µs",
        table.len(),
        started.elapsed().as_micros()
    );

    if outputs.len() != table.len() {
        return Err(Error::internal(format!(
            "model returned {} outputs for {} records",
            outputs.len(),
            table.len()
        )));
    }

    Ok(outputs)
}
