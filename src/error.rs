use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PdfNumError>;

#[derive(Debug, thiserror::Error)]
pub enum PdfNumError {
    #[error("File '{}' not found.", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf { path: PathBuf, reason: String },

    #[error("No PDF files to stitch")]
    NoFilesToStitch,

    #[error("Failed to create output file: {}", path.display())]
    FailedToCreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write PDF: {}", path.display())]
    FailedToWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("PDF structure error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to process glob entry: {0}")]
    FailedToProcessGlobEntry(#[from] glob::GlobError),

    #[error("Invalid file pattern: {0}")]
    FailedToParseGlobPattern(#[from] glob::PatternError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Usage(String),
}

impl PdfNumError {
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
