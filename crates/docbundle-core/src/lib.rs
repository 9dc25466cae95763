//! DocBundle client core
//!
//! Target-independent state for the bundle upload page:
//! - `upload`: single-file gate (exact PDF MIME, nothing while busy)
//! - `shell`: idle / processing / success / error lifecycle
//! - `results`: per-document cards, page cursors, edit buffer, copy text
//! - `transport`: the one multipart request, behind a trait
//!
//! The browser app drives these types from DOM events; tests drive them
//! directly.

pub mod config;
pub mod error;
pub mod results;
pub mod shell;
pub mod transport;
pub mod upload;

pub use config::{ClientConfig, PDF_MIME};
pub use error::{ConfigError, RequestError, ShellError, UploadRejection};
pub use results::{CardView, CopyTarget, DownloadLink, PageCursor, PagerView, PreviewView, ResultsView};
pub use shell::{process_upload, AppShell, ProcessingState, UploadTicket};
pub use transport::{interpret_response, ClassifyTransport, RawResponse};
pub use upload::{first_file, DragPhase, FileCandidate, UploadGate};

/// Blocking notice shown after every copy attempt
pub const COPIED_NOTICE: &str = "Copied to clipboard!";
