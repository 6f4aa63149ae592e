use super::PredictionResult;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Payload layout for batch responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchShape {
    /// `{"predictions": [{<id_field>: id, <field>: value}, ...]}`
    #[default]
    List,
    /// `{"<id>": value, ...}`
    Map,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// `{<field>: value}` for a one-row result.
pub fn single(field: &str, results: Vec<PredictionResult>) -> Result<Value> {
    let mut results = results.into_iter();
    match (results.next(), results.next()) {
        (Some(result), None) => {
            let mut body = Map::new();
            body.insert(field.to_string(), serde_json::to_value(result.value)?);
            Ok(Value::Object(body))
        }
        _ => Err(Error::internal("single prediction must yield exactly one result")),
    }
}

pub fn batch(
    field: &str,
    id_field: &str,
    results: Vec<PredictionResult>,
    shape: BatchShape,
) -> Result<Value> {
    match shape {
        BatchShape::List => {
            let predictions = results
                .into_iter()
                .map(|result| -> Result<Value> {
                    let mut entry = Map::new();
                    entry.insert(id_field.to_string(), serde_json::to_value(result.identifier)?);
                    entry.insert(field.to_string(), serde_json::to_value(result.value)?);
                    Ok(Value::Object(entry))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(json!({ "predictions": predictions }))
        }
        BatchShape::Map => {
            let mut body = Map::new();
            for result in results {
                let key = result.identifier.to_string();
                if body.contains_key(&key) {
                    return Err(Error::DuplicateIdentifier { value: key });
                }
                body.insert(key, serde_json::to_value(result.value)?);
            }
            Ok(Value::Object(body))
        }
    }
}
