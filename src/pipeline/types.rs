use serde::Serialize;
use std::fmt;

/// Identifier field used in list-shaped batch responses when the upload carries no
/// business key column.
pub const POSITIONAL_ID_FIELD: &str = "row_id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    Index(usize),
    Key(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

/// How predictions are correlated back to input rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIdentifiers {
    /// Zero-based row position.
    Positional { len: usize },
    /// Values of a business key column, captured before the column was stripped.
    Keyed { column: String, values: Vec<String> },
}

impl RowIdentifiers {
    pub fn len(&self) -> usize {
        match self {
            Self::Positional { len } => *len,
            Self::Keyed { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn field_name(&self) -> &str {
        match self {
            Self::Positional { .. } => POSITIONAL_ID_FIELD,
            Self::Keyed { column, .. } => column,
        }
    }

    pub fn get(&self, index: usize) -> Option<Identifier> {
        match self {
            Self::Positional { len } => (index < *len).then_some(Identifier::Index(index)),
            Self::Keyed { values, .. } => values.get(index).cloned().map(Identifier::Key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionValue {
    Number(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub identifier: Identifier,
    pub value: PredictionValue,
}
