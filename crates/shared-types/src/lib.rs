//! Records exchanged with the document classification service
//!
//! The service splits an uploaded PDF bundle into logical documents and
//! returns one [`Document`] per piece. These are read-only snapshots: the
//! client renders them and never sends them back.

pub mod display;
pub mod types;

pub use display::{results_summary_label, DEFAULT_DOWNLOAD_NAME};
pub use types::{Document, ErrorBody, KeyHighlight, ProcessingResponse};
