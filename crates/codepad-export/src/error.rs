use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No files to export")]
    EmptyInput,

    #[error("archive write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}
