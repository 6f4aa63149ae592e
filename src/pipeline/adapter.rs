use super::RowIdentifiers;
use crate::{
    Error, Result,
    schema::{FeatureRecord, FeatureSchema, FeatureTable, RawTable},
};
use serde_json::Value;

/// Features ready for the model plus the identifiers captured before stripping.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptedTable {
    pub features: FeatureTable,
    pub identifiers: RowIdentifiers,
}

/// Maps untyped input onto the model's ordered feature schema.
pub struct SchemaAdapter<'a> {
    schema: &'a FeatureSchema,
    identifier_columns: &'a [String],
}

impl<'a> SchemaAdapter<'a> {
    pub fn new(schema: &'a FeatureSchema, identifier_columns: &'a [String]) -> Self {
        Self {
            schema,
            identifier_columns,
        }
    }

    fn is_identifier(&self, name: &str) -> bool {
        self.identifier_columns.iter().any(|c| c == name)
    }

    /// Adapts a single JSON object into a one-row table with a positional identifier.
    pub fn adapt_record(&self, payload: &Value) -> Result<AdaptedTable> {
        let object = payload
            .as_object()
            .ok_or_else(|| Error::malformed("request body must be a JSON object"))?;

        let missing: Vec<String> = self
            .schema
            .iter()
            .filter(|spec| !object.contains_key(&spec.name))
            .map(|spec| spec.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingFeature { names: missing });
        }

        let unexpected: Vec<String> = object
            .keys()
            .filter(|key| !self.schema.contains(key) && !self.is_identifier(key))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            return Err(Error::SchemaMismatch {
                missing: Vec::new(),
                unexpected,
            });
        }

        let values = self
            .schema
            .iter()
            .map(|spec| {
                let raw = &object[&spec.name];
                spec.kind.coerce_json(raw).ok_or_else(|| Error::InvalidValue {
                    feature: spec.name.clone(),
                    row: 0,
                    expected: spec.kind.to_string(),
                    value: raw.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AdaptedTable {
            features: FeatureTable::new(self.schema.names(), vec![FeatureRecord::new(values)]),
            identifiers: RowIdentifiers::Positional { len: 1 },
        })
    }

    /// Adapts an uploaded table. The first configured identifier column found in the
    /// header becomes the row key; every configured identifier column is stripped.
    pub fn adapt_table(&self, raw: &RawTable) -> Result<AdaptedTable> {
        let missing: Vec<String> = self
            .schema
            .iter()
            .filter(|spec| raw.column_index(&spec.name).is_none())
            .map(|spec| spec.name.clone())
            .collect();
        let unexpected: Vec<String> = raw
            .headers
            .iter()
            .filter(|h| !self.schema.contains(h) && !self.is_identifier(h))
            .cloned()
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(Error::SchemaMismatch {
                missing,
                unexpected,
            });
        }

        if raw.rows.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let positions: Vec<usize> = self
            .schema
            .iter()
            .filter_map(|spec| raw.column_index(&spec.name))
            .collect();

        let mut records = Vec::with_capacity(raw.rows.len());
        for (row_index, row) in raw.rows.iter().enumerate() {
            let values = self
                .schema
                .iter()
                .zip(&positions)
                .map(|(spec, &position)| {
                    let cell = &row[position];
                    spec.kind.coerce_text(cell).ok_or_else(|| Error::InvalidValue {
                        feature: spec.name.clone(),
                        row: row_index,
                        expected: spec.kind.to_string(),
                        value: cell.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            records.push(FeatureRecord::new(values));
        }

        let identifiers = match self
            .identifier_columns
            .iter()
            .find_map(|c| raw.column_index(c).map(|index| (c, index)))
        {
            Some((column, index)) => RowIdentifiers::Keyed {
                column: column.clone(),
                values: raw.rows.iter().map(|row| row[index].clone()).collect(),
            },
            None => RowIdentifiers::Positional {
                len: raw.rows.len(),
            },
        };

        Ok(AdaptedTable {
            features: FeatureTable::new(self.schema.names(), records),
            identifiers,
        })
    }
}
