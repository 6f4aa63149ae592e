use super::Model;
use crate::{
    Error, Result,
    schema::{FeatureRecord, FeatureTable},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    /// Raw score, for regression.
    #[default]
    Identity,
    /// Sigmoid of the score compared against `threshold`, yielding class code 0 or 1.
    Logistic,
}

/// Serialized linear model: `intercept + sum(weight * value) + sum(category weight)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub link: Link,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub categories: BTreeMap<String, BTreeMap<String, f64>>,
}

fn default_threshold() -> f64 {
    0.5
}

impl LinearModel {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let model: Self = serde_json::from_slice(bytes)?;
        if !(model.threshold > 0.0 && model.threshold < 1.0) {
            return Err(Error::config(format!(
                "model threshold must be in (0, 1), got {}",
                model.threshold
            )));
        }
        if model.weights.is_empty() && model.categories.is_empty() {
            return Err(Error::config("model has no weighted features"));
        }
        Ok(model)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        Self::from_json(&bytes)
    }

    fn resolve<'a, T>(
        table: &FeatureTable,
        entries: &'a BTreeMap<String, T>,
    ) -> Result<Vec<(usize, &'a str, &'a T)>> {
        entries
            .iter()
            .map(|(name, entry)| {
                table
                    .column_index(name)
                    .map(|index| (index, name.as_str(), entry))
                    .ok_or_else(|| {
                        Error::prediction(format!("feature '{name}' not found in input"))
                    })
            })
            .collect()
    }

    fn score(
        &self,
        record: &FeatureRecord,
        numeric: &[(usize, &str, &f64)],
        categorical: &[(usize, &str, &BTreeMap<String, f64>)],
    ) -> Result<f64> {
        let mut score = self.intercept;

        for (index, name, weight) in numeric {
            let value = record
                .get(*index)
                .and_then(|v| v.as_f64())
                .ok_or_else(|| {
                    Error::prediction(format!("feature '{name}' could not be converted to float"))
                })?;
            score += *weight * value;
        }

        for (index, name, table) in categorical {
            let value = record.get(*index).map(ToString::to_string).unwrap_or_default();
            let weight = table.get(&value).ok_or_else(|| {
                Error::prediction(format!(
                    "unknown category '{value}' for feature '{name}'"
                ))
            })?;
            score += weight;
        }

        Ok(match self.link {
            Link::Identity => score,
            Link::Logistic => {
                let probability = 1.0 / (1.0 + (-score).exp());
                if probability >= self.threshold { 1.0 } else { 0.0 }
            }
        })
    }
}

impl Model for LinearModel {
    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>> {
        let numeric = Self::resolve(table, &self.weights)?;
        let categorical = Self::resolve(table, &self.categories)?;

        table
            .records()
            .iter()
            .map(|record| self.score(record, &numeric, &categorical))
            .collect()
    }
}
