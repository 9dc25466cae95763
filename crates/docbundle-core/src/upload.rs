//! Upload control state
//!
//! Decides whether a picked or dropped file may be handed to the shell and
//! tracks the drop zone highlight. The DOM layer owns the actual `File`.

use crate::error::UploadRejection;
use serde::{Deserialize, Serialize};

/// Metadata of a file offered through the picker or a drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    pub name: String,
    /// Declared MIME type as reported by the browser
    pub mime: String,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }
}

/// Drag events the drop zone reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Enter,
    Over,
    Leave,
    Drop,
}

impl DragPhase {
    /// Map a DOM event type (`dragenter`, `dragover`, ...) to a phase
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "dragenter" => Some(DragPhase::Enter),
            "dragover" => Some(DragPhase::Over),
            "dragleave" => Some(DragPhase::Leave),
            "drop" => Some(DragPhase::Drop),
            _ => None,
        }
    }
}

/// Gatekeeper for the single-file upload control
#[derive(Debug, Clone)]
pub struct UploadGate {
    accepted_mime: String,
    drag_active: bool,
}

impl UploadGate {
    pub fn new(accepted_mime: impl Into<String>) -> Self {
        Self {
            accepted_mime: accepted_mime.into(),
            drag_active: false,
        }
    }

    pub fn accepted_mime(&self) -> &str {
        &self.accepted_mime
    }

    /// Accept only an exact MIME match, and never while a request is in flight
    pub fn offer(&self, candidate: &FileCandidate, busy: bool) -> Result<(), UploadRejection> {
        if busy {
            tracing::debug!(file = %candidate.name, "upload ignored while processing");
            return Err(UploadRejection::Busy);
        }

        if candidate.mime != self.accepted_mime {
            tracing::warn!(
                file = %candidate.name,
                mime = %candidate.mime,
                "rejected non-PDF upload"
            );
            return Err(UploadRejection::NotPdf {
                mime: candidate.mime.clone(),
            });
        }

        tracing::info!(file = %candidate.name, size = candidate.size, "accepted upload");
        Ok(())
    }

    /// Record a drag event; returns whether the drop zone is highlighted
    pub fn drag(&mut self, phase: DragPhase) -> bool {
        self.drag_active = matches!(phase, DragPhase::Enter | DragPhase::Over);
        self.drag_active
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    /// CSS classes for the drop zone label
    pub fn label_class(&self, busy: bool) -> String {
        let mut class = String::from("file-upload-label");
        if self.drag_active {
            class.push_str(" drag-active");
        }
        if busy {
            class.push_str(" processing");
        }
        class
    }
}

/// Only the first of several picked/dropped files is considered
pub fn first_file<T>(files: impl IntoIterator<Item = T>) -> Result<T, UploadRejection> {
    files.into_iter().next().ok_or(UploadRejection::NoFile)
}
