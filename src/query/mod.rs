// Submodules for separation of concerns
mod translate;
mod types;

// Public API re-exports
pub use translate::{submission_id, translate_count, translate_search};
pub use types::{DEFAULT_PAGE_SIZE, TranslatedQuery};
