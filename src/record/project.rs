use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::BridgeError;
use crate::types::Submission;

use super::fields::{FieldSpec, parse_field_specs};

/// One flattened submission, keyed by the caller's requested field names in
/// the caller's order. A field absent from the submission holds `Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: String, value: Value) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// The result of a multi-record search: the caller's field list, the shaped
/// records, and pagination metadata (`size`, `nextPageToken` when the
/// upstream returned one, plus the normalized keys inherited from the
/// request).
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordSet {
    pub fields: Vec<String>,
    pub records: Vec<Record>,
    pub metadata: HashMap<String, String>,
}

/// Shapes raw submissions into flat records, one per submission, preserving
/// the caller's field order.
///
/// # Errors
/// Returns `MalformedField` when a nested spec's parent key is absent or not
/// an object on a submission, and `UnsupportedFieldType` if the parsed spec
/// list ever diverges from the field list.
pub fn project_records(
    fields: &[String],
    submissions: &[Submission],
) -> Result<Vec<Record>, BridgeError> {
    let specs = parse_field_specs(fields);
    if specs.len() != fields.len() {
        return Err(BridgeError::UnsupportedFieldType(format!(
            "parsed {} specs for {} fields",
            specs.len(),
            fields.len()
        )));
    }

    let mut records = Vec::with_capacity(submissions.len());
    for submission in submissions {
        let mut record = Record::new();
        for (field, spec) in fields.iter().zip(&specs) {
            let value = match spec {
                FieldSpec::Simple(name) => {
                    submission.get(name).cloned().unwrap_or(Value::Null)
                }
                FieldSpec::Nested { parent, child } => {
                    let group =
                        submission.get(parent).and_then(Value::as_object).ok_or_else(|| {
                            BridgeError::MalformedField(format!(
                                "field '{field}' expects an object at '{parent}'"
                            ))
                        })?;
                    group.get(child).cloned().unwrap_or(Value::Null)
                }
            };
            record.insert(field.clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Single-submission convenience over [`project_records`].
///
/// # Errors
/// Same failure modes as [`project_records`].
pub fn project_one(fields: &[String], submission: &Submission) -> Result<Record, BridgeError> {
    let mut records = project_records(fields, std::slice::from_ref(submission))?;
    Ok(records.remove(0))
}
