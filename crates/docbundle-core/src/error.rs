use thiserror::Error;

/// Why a picked or dropped file was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Please upload a PDF file only.")]
    NotPdf { mime: String },

    #[error("A document is already being processed")]
    Busy,

    #[error("No file selected")]
    NoFile,
}

/// Misuse of the application shell lifecycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("A document is already being processed")]
    Busy,
}

/// A failed `/process_document` round trip
///
/// `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid client configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    Invalid(String),
}
