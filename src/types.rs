use serde_json::Value;

/// A submission is any valid JSON value. Top-level is expected to be an object
/// with nested `values` and `details` trees.
pub type Submission = Value;
