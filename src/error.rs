use miette::Diagnostic;
use thiserror::Error;

/// Main error type for retcon operations
#[derive(Error, Diagnostic, Debug)]
pub enum RetconError {
    #[error("IO error: {0}")]
    #[diagnostic(code(retcon::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(retcon::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Manifest error: {message}")]
    #[diagnostic(code(retcon::manifest))]
    Manifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unsupported input: {message}")]
    #[diagnostic(code(retcon::input))]
    Unsupported {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Export error: {message}")]
    #[diagnostic(code(retcon::export))]
    Export {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, RetconError>;
