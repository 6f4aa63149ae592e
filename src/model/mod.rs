mod linear;

pub use linear::{LinearModel, Link};

use crate::{Result, schema::FeatureTable};
use std::sync::Arc;
use tracing::info;

/// A loaded, immutable prediction capability.
///
/// Implementations receive the whole batch at once and must return exactly one raw
/// output per record, in record order. Regression models return the predicted value;
/// classifiers return the class code as a float.
pub trait Model: Send + Sync {
    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>>;
}

/// Loads the model artifact stored at `path`.
pub async fn load(path: &str) -> Result<Arc<dyn Model>> {
    let model = LinearModel::load(path).await?;
    info!(
        "Loaded model from {} ({} weighted features, {} categorical features)",
        path,
        model.weights.len(),
        model.categories.len()
    );
    Ok(Arc::new(model))
}
