//! Project storage for the Codepad backend.
//!
//! A project is a flat map of relative file paths to file contents, saved
//! under a caller-chosen identifier. Saves replace the whole record; there is
//! no merge, history or delete.

pub mod error;
pub mod memory;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use memory::InMemoryProjectStore;
pub use store::{ProjectStore, StoreResult};
pub use types::{ProjectFiles, ProjectRecord, ProjectSummary, SaveResult, DEFAULT_PROJECT_ID};
