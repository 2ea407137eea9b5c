use regex::Regex;
use std::sync::LazyLock;

static FIELD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+)\[(.*?)\]").expect("field pattern is valid"));

/// How one caller-facing field name reads out of a submission: either a
/// top-level key, or one level into a nested object via `parent[child]`.
///
/// Decided once when the request's field list is parsed and never
/// re-inspected afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    Simple(String),
    Nested { parent: String, child: String },
}

impl FieldSpec {
    pub fn parse(field: &str) -> Self {
        match FIELD_PATTERN.captures(field) {
            Some(caps) => Self::Nested { parent: caps[1].to_string(), child: caps[2].to_string() },
            None => Self::Simple(field.to_string()),
        }
    }
}

/// Parses the caller's ordered field list, one spec per field.
pub fn parse_field_specs(fields: &[String]) -> Vec<FieldSpec> {
    fields.iter().map(|field| FieldSpec::parse(field)).collect()
}
