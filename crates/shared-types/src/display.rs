//! Display formatting for classified documents
//!
//! Everything the results page shows about a [`Document`] is derived here,
//! so the browser renderer and the host tests agree on the exact strings.

use crate::types::Document;

/// Filename used when a document comes back without one
pub const DEFAULT_DOWNLOAD_NAME: &str = "document.pdf";

impl Document {
    /// Number of pages this document spans inside the bundle
    ///
    /// A malformed range (`page_end < page_start`) still counts as one page.
    pub fn page_count(&self) -> u32 {
        self.page_end.saturating_sub(self.page_start).saturating_add(1)
    }

    /// Heading for the result card; an empty title falls back to
    /// "Document N" (1-based)
    pub fn display_title(&self, index: usize) -> String {
        if self.title.is_empty() {
            format!("Document {}", index + 1)
        } else {
            self.title.clone()
        }
    }

    /// Confidence as a whole percentage, e.g. `0.92` -> `"92%"`
    pub fn confidence_label(&self) -> String {
        let pct = if self.confidence.is_finite() {
            (self.confidence * 100.0).round()
        } else {
            0.0
        };
        format!("{}%", pct as i64)
    }

    /// Page range inside the bundle, e.g. `"1-3"`
    pub fn page_range_label(&self) -> String {
        format!("{}-{}", self.page_start, self.page_end)
    }

    /// Key highlights as `field: value` lines
    pub fn key_fields_text(&self) -> String {
        self.key_highlights
            .iter()
            .map(|h| h.as_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A preview needs both the file URL and its name
    pub fn has_preview(&self) -> bool {
        self.download_url.is_some() && self.filename.is_some()
    }

    /// URL for the embedded viewer, opened at `page` and fit to width
    pub fn preview_url(&self, page: u32) -> Option<String> {
        if !self.has_preview() {
            return None;
        }
        self.download_url
            .as_ref()
            .map(|url| format!("{}#page={}&view=FitH&zoom=page-width", url, page))
    }

    /// Name offered to the browser when saving this document
    pub fn download_name(&self) -> &str {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_DOWNLOAD_NAME,
        }
    }
}

/// Heading line above the result cards
pub fn results_summary_label(count: usize) -> String {
    let noun = if count == 1 { "document" } else { "documents" };
    format!("Found {} {} in the uploaded bundle", count, noun)
}
