use super::{PredictionResult, PredictionValue, RowIdentifiers};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// How raw model outputs become caller-facing values.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputPolicy {
    Regression { precision: u32 },
    Classification { labels: BTreeMap<i64, String> },
}

impl OutputPolicy {
    pub fn apply(&self, raw: f64) -> Result<PredictionValue> {
        match self {
            Self::Regression { precision } => {
                let rounded = round_to(raw, *precision)
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        Error::internal(format!("model produced a non-finite output: {raw}"))
                    })?;
                Ok(PredictionValue::Number(rounded))
            }
            Self::Classification { labels } => {
                let code = (raw.is_finite() && raw.fract() == 0.0).then_some(raw as i64);
                code.and_then(|c| labels.get(&c))
                    .map(|label| PredictionValue::Label(label.clone()))
                    .ok_or_else(|| Error::UnknownClass {
                        code: raw.to_string(),
                    })
            }
        }
    }
}

/// Rounds the exact binary value to `precision` decimals, ties to even.
/// Formatting never scales the value, so large outputs cannot overflow.
fn round_to(value: f64, precision: u32) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    format!("{:.*}", precision as usize, value).parse().ok()
}

/// Pairs each output with the identifier of the row it came from, in input order.
pub fn map_results(
    outputs: Vec<f64>,
    identifiers: &RowIdentifiers,
    policy: &OutputPolicy,
) -> Result<Vec<PredictionResult>> {
    if outputs.len() != identifiers.len() {
        return Err(Error::internal(format!(
            "{} outputs cannot be aligned with {} identifiers",
            outputs.len(),
            identifiers.len()
        )));
    }

    outputs
        .into_iter()
        .enumerate()
        .map(|(index, raw)| -> Result<PredictionResult> {
            let identifier = identifiers
                .get(index)
                .ok_or_else(|| Error::internal(format!("no identifier for row {index}")))?;
            Ok(PredictionResult {
                identifier,
                value: policy.apply(raw)?,
            })
        })
        .collect()
}
