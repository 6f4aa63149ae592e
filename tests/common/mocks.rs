use std::sync::{Arc, Mutex};
use tabserve::{
    Error, Result,
    model::Model,
    schema::FeatureTable,
};

#[derive(Debug, Clone)]
enum Behaviour {
    /// Returns these outputs regardless of input.
    Fixed(Vec<f64>),
    /// Returns the numeric value of this column for every record.
    Column(String),
    Fail(String),
}

/// Mock model for testing
#[derive(Debug, Clone)]
pub struct MockModel {
    behaviour: Behaviour,
    pub calls: Arc<Mutex<Vec<FeatureTable>>>,
}

impl MockModel {
    pub fn with_outputs(outputs: Vec<f64>) -> Self {
        Self::new(Behaviour::Fixed(outputs))
    }

    pub fn echo_column(column: &str) -> Self {
        Self::new(Behaviour::Column(column.to_string()))
    }

    pub fn with_error(error: &str) -> Self {
        Self::new(Behaviour::Fail(error.to_string()))
    }

    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_calls(&self) -> Vec<FeatureTable> {
        self.calls.lock().unwrap().clone()
    }
}

impl Model for MockModel {
    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>> {
        self.calls.lock().unwrap().push(table.clone());

        match &self.behaviour {
            Behaviour::Fixed(outputs) => Ok(outputs.clone()),
            Behaviour::Column(column) => (0..table.len())
                .map(|row| {
                    table
                        .value(row, column)
                        .and_then(|v| v.as_f64())
                        .ok_or_else(|| Error::prediction(format!("no numeric {column}")))
                })
                .collect(),
            Behaviour::Fail(message) => Err(Error::prediction(message.clone())),
        }
    }
}
