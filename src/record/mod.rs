// Submodules for separation of concerns
mod fields;
mod project;

// Public API re-exports
pub use fields::{FieldSpec, parse_field_specs};
pub use project::{Record, RecordSet, project_one, project_records};
