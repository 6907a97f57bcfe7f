//! Zip export of in-memory project files.
//!
//! The packager is stateless: every call builds an independent archive from
//! its inputs, so it can be used from any number of requests at once.

pub mod error;
pub mod packager;

pub use error::ExportError;
pub use packager::{
    archive_file_name, export, is_excluded, ExportedArchive, DEFAULT_PROJECT_NAME,
    EXCLUDED_PATH_FRAGMENTS,
};
