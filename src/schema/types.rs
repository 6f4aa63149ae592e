use crate::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Storage type of a model feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Number,
    Integer,
    /// Stored as integer 0/1, the way the model was trained.
    Boolean,
    Category,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Category => "category",
        }
    }

    /// Coerces a JSON value into this kind, or `None` when it cannot be represented.
    pub fn coerce_json(&self, value: &Value) -> Option<FeatureValue> {
        match (self, value) {
            (Self::Number, Value::Number(n)) => n.as_f64().map(FeatureValue::Number),
            (Self::Integer, Value::Number(n)) => match n.as_i64() {
                Some(i) => Some(FeatureValue::Integer(i)),
                None => n.as_f64().and_then(integral),
            },
            (Self::Boolean, Value::Bool(b)) => Some(FeatureValue::Integer(i64::from(*b))),
            (Self::Boolean, Value::Number(n)) => n.as_f64().and_then(flag),
            (Self::Category, Value::String(s)) => Some(FeatureValue::Category(s.clone())),
            (Self::Category, Value::Number(n)) => Some(FeatureValue::Category(n.to_string())),
            _ => None,
        }
    }

    /// Coerces a CSV cell into this kind. Empty cells never coerce.
    pub fn coerce_text(&self, text: &str) -> Option<FeatureValue> {
        if text.is_empty() {
            return None;
        }
        match self {
            Self::Number => text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FeatureValue::Number),
            Self::Integer => match text.parse::<i64>() {
                Ok(i) => Some(FeatureValue::Integer(i)),
                Err(_) => text.parse::<f64>().ok().and_then(integral),
            },
            Self::Boolean => match text.to_ascii_lowercase().as_str() {
                "1" | "true" => Some(FeatureValue::Integer(1)),
                "0" | "false" => Some(FeatureValue::Integer(0)),
                other => other.parse::<f64>().ok().and_then(flag),
            },
            Self::Category => Some(FeatureValue::Category(text.to_string())),
        }
    }
}

fn integral(v: f64) -> Option<FeatureValue> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(FeatureValue::Integer(v as i64))
    } else {
        None
    }
}

fn flag(v: f64) -> Option<FeatureValue> {
    match integral(v)? {
        FeatureValue::Integer(i @ (0 | 1)) => Some(FeatureValue::Integer(i)),
        _ => None,
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Integer(i64),
    Category(String),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Integer(i) => Some(*i as f64),
            Self::Category(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Category(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
}

impl FeatureSpec {
    pub fn new(name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered feature set a model was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FeatureSpec>", into = "Vec<FeatureSpec>")]
pub struct FeatureSchema {
    features: Vec<FeatureSpec>,
}

impl FeatureSchema {
    pub fn new(features: Vec<FeatureSpec>) -> crate::Result<Self> {
        if features.is_empty() {
            return Err(Error::config("feature schema must not be empty"));
        }
        for (i, spec) in features.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(Error::config("feature names must not be empty"));
            }
            if features[..i].iter().any(|other| other.name == spec.name) {
                return Err(Error::config(format!(
                    "duplicate feature in schema: {}",
                    spec.name
                )));
            }
        }
        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureSpec> {
        self.features.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.features.iter().map(|f| f.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.name == name)
    }
}

impl TryFrom<Vec<FeatureSpec>> for FeatureSchema {
    type Error = Error;

    fn try_from(features: Vec<FeatureSpec>) -> crate::Result<Self> {
        Self::new(features)
    }
}

impl From<FeatureSchema> for Vec<FeatureSpec> {
    fn from(schema: FeatureSchema) -> Self {
        schema.features
    }
}

/// One entity to score; values are aligned with the owning table's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: Vec<FeatureValue>,
}

impl FeatureRecord {
    pub fn new(values: Vec<FeatureValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&FeatureValue> {
        self.values.get(index)
    }
}

/// Batch handed to the model: column names in model order plus one record per row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    records: Vec<FeatureRecord>,
}

impl FeatureTable {
    pub fn new(columns: Vec<String>, records: Vec<FeatureRecord>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&FeatureValue> {
        let index = self.column_index(column)?;
        self.records.get(row)?.get(index)
    }
}
