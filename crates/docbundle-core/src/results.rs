//! Results view model
//!
//! Holds the documents from the last successful response together with the
//! purely local UI state: per-document page cursor, the single key-field
//! edit in progress, and what to copy or download. Nothing here touches the
//! network and nothing here changes a [`Document`].

use serde::Serialize;
use shared_types::{results_summary_label, Document};

/// Page position inside one document's preview, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    current: u32,
    total: u32,
}

impl PageCursor {
    pub fn new(total: u32) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Move to `page` if it lies in `[1, total]`; otherwise nothing happens
    pub fn go_to(&mut self, page: u32) -> bool {
        if page >= 1 && page <= self.total {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        match self.current.checked_add(1) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    pub fn can_prev(&self) -> bool {
        self.current > 1
    }

    pub fn can_next(&self) -> bool {
        self.current < self.total
    }
}

/// What a copy button puts on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Summary,
    KeyFields,
}

/// A browser-native save of one split document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditSession {
    index: usize,
    buffer: String,
}

/// Pager state for a card whose document spans several pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerView {
    pub current: u32,
    pub total: u32,
    pub can_prev: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewView {
    pub url: String,
    pub frame_title: String,
    /// Present only when the document has more than one page
    pub pager: Option<PagerView>,
}

/// Everything the renderer needs to draw one result card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub index: usize,
    pub title: String,
    pub doc_type: String,
    pub confidence: String,
    pub pages: String,
    pub summary: String,
    /// `(field, value)` rows in service order
    pub highlights: Vec<(String, String)>,
    pub preview: Option<PreviewView>,
    /// Edit buffer when this card is in edit mode
    pub editing: Option<String>,
}

impl CardView {
    /// Highlight rows as displayed, `field: value`
    pub fn highlight_lines(&self) -> Vec<String> {
        self.highlights
            .iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    documents: Vec<Document>,
    cursors: Vec<PageCursor>,
    editing: Option<EditSession>,
}

impl ResultsView {
    pub fn new(documents: Vec<Document>) -> Self {
        let cursors = documents
            .iter()
            .map(|doc| PageCursor::new(doc.page_count()))
            .collect();
        Self {
            documents,
            cursors,
            editing: None,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn summary_label(&self) -> String {
        results_summary_label(self.documents.len())
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    pub fn cursor(&self, index: usize) -> Option<PageCursor> {
        self.cursors.get(index).copied()
    }

    pub fn current_page(&self, index: usize) -> u32 {
        self.cursors.get(index).map(|c| c.current()).unwrap_or(1)
    }

    pub fn next_page(&mut self, index: usize) -> bool {
        self.cursors.get_mut(index).is_some_and(|c| c.next())
    }

    pub fn prev_page(&mut self, index: usize) -> bool {
        self.cursors.get_mut(index).is_some_and(|c| c.prev())
    }

    pub fn go_to_page(&mut self, index: usize, page: u32) -> bool {
        let moved = self.cursors.get_mut(index).is_some_and(|c| c.go_to(page));
        if !moved {
            tracing::debug!(index, page, "ignored out-of-range page request");
        }
        moved
    }

    // ========================================================================
    // Key-field editing
    // ========================================================================

    /// Snapshot the document's key fields into the edit buffer
    pub fn begin_edit(&mut self, index: usize) -> bool {
        let Some(doc) = self.documents.get(index) else {
            return false;
        };
        self.editing = Some(EditSession {
            index,
            buffer: doc.key_fields_text(),
        });
        true
    }

    pub fn update_edit(&mut self, text: &str) {
        if let Some(session) = self.editing.as_mut() {
            session.buffer = text.to_string();
        }
    }

    /// Leave edit mode; the edited text is not written anywhere
    pub fn save_edit(&mut self) {
        if let Some(session) = self.editing.take() {
            tracing::debug!(index = session.index, "key-field edit closed without write-back");
        }
    }

    /// Leave edit mode and drop the buffer
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing.as_ref().map(|s| s.index)
    }

    pub fn edit_buffer(&self, index: usize) -> Option<&str> {
        self.editing
            .as_ref()
            .filter(|s| s.index == index)
            .map(|s| s.buffer.as_str())
    }

    /// Text shown for the key-field block: the buffer while editing,
    /// otherwise the formatted highlights
    pub fn key_fields_text(&self, index: usize) -> Option<String> {
        let doc = self.documents.get(index)?;
        Some(
            self.edit_buffer(index)
                .map(str::to_string)
                .unwrap_or_else(|| doc.key_fields_text()),
        )
    }

    // ========================================================================
    // Copy / download
    // ========================================================================

    pub fn copy_text(&self, index: usize, target: CopyTarget) -> Option<String> {
        match target {
            CopyTarget::Summary => self.documents.get(index).map(|d| d.summary.clone()),
            CopyTarget::KeyFields => self.key_fields_text(index),
        }
    }

    /// Only documents with both a URL and a filename offer a download
    pub fn download_link(&self, index: usize) -> Option<DownloadLink> {
        let doc = self.documents.get(index)?;
        if !doc.has_preview() {
            return None;
        }
        let url = doc.download_url.clone()?;
        Some(DownloadLink {
            url,
            filename: doc.download_name().to_string(),
        })
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn card(&self, index: usize) -> Option<CardView> {
        let doc = self.documents.get(index)?;
        let cursor = self.cursors.get(index).copied().unwrap_or(PageCursor::new(1));

        let preview = doc.preview_url(cursor.current()).map(|url| PreviewView {
            url,
            frame_title: format!(
                "Preview of {} - Page {}",
                doc.download_name(),
                cursor.current()
            ),
            pager: (cursor.total() > 1).then(|| PagerView {
                current: cursor.current(),
                total: cursor.total(),
                can_prev: cursor.can_prev(),
                can_next: cursor.can_next(),
            }),
        });

        Some(CardView {
            index,
            title: doc.display_title(index),
            doc_type: doc.doc_type.clone(),
            confidence: doc.confidence_label(),
            pages: doc.page_range_label(),
            summary: doc.summary.clone(),
            highlights: doc
                .key_highlights
                .iter()
                .map(|h| (h.field.clone(), h.value.clone()))
                .collect(),
            preview,
            editing: self.edit_buffer(index).map(str::to_string),
        })
    }

    /// One card per document, in response order
    pub fn cards(&self) -> Vec<CardView> {
        (0..self.documents.len())
            .filter_map(|index| self.card(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::KeyHighlight;

    fn doc(title: &str, page_start: u32, page_end: u32) -> Document {
        Document {
            doc_type: "paystub".to_string(),
            title: title.to_string(),
            page_start,
            page_end,
            confidence: 0.8,
            summary: format!("{} summary", title),
            key_highlights: vec![
                KeyHighlight::new("employer", "Acme Corp"),
                KeyHighlight::new("net_pay", "2,310.55"),
            ],
            filename: Some(format!("{}.pdf", title)),
            download_url: Some(format!("/download/{}.pdf", title)),
        }
    }

    fn promissory_note() -> Document {
        Document {
            doc_type: "Note".to_string(),
            title: "Promissory Note".to_string(),
            page_start: 1,
            page_end: 3,
            confidence: 0.92,
            summary: "...".to_string(),
            key_highlights: vec![KeyHighlight::new("Borrower", "Jane Doe")],
            filename: None,
            download_url: None,
        }
    }

    #[test]
    fn test_promissory_note_card() {
        let view = ResultsView::new(vec![promissory_note()]);
        let cards = view.cards();
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.title, "Promissory Note");
        assert_eq!(card.confidence, "92%");
        assert_eq!(card.pages, "1-3");
        assert_eq!(card.highlight_lines(), vec!["Borrower: Jane Doe".to_string()]);
        assert_eq!(card.preview, None);
        assert_eq!(card.editing, None);
    }

    #[test]
    fn test_cards_keep_response_order() {
        let view = ResultsView::new(vec![doc("w2", 1, 2), doc("paystub", 3, 3), doc("bank", 4, 9)]);
        let titles: Vec<_> = view.cards().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["w2", "paystub", "bank"]);
        assert_eq!(view.summary_label(), "Found 3 documents in the uploaded bundle");
    }

    #[test]
    fn test_pager_only_for_multi_page() {
        let view = ResultsView::new(vec![doc("single", 3, 3), doc("multi", 4, 6)]);
        let cards = view.cards();
        assert_eq!(cards[0].preview.as_ref().unwrap().pager, None);
        assert_eq!(
            cards[1].preview.as_ref().unwrap().pager,
            Some(PagerView {
                current: 1,
                total: 3,
                can_prev: false,
                can_next: true,
            })
        );
    }

    #[test]
    fn test_pagination_clamps_without_wraparound() {
        let mut view = ResultsView::new(vec![doc("multi", 4, 6)]);
        assert!(!view.prev_page(0));
        assert_eq!(view.current_page(0), 1);
        assert!(view.next_page(0));
        assert!(view.next_page(0));
        assert!(!view.next_page(0));
        assert_eq!(view.current_page(0), 3);
        assert!(!view.go_to_page(0, 0));
        assert!(!view.go_to_page(0, 4));
        assert!(view.go_to_page(0, 2));
        assert_eq!(view.current_page(0), 2);
    }

    #[test]
    fn test_preview_follows_cursor() {
        let mut view = ResultsView::new(vec![doc("multi", 4, 6)]);
        view.next_page(0);
        let preview = view.card(0).unwrap().preview.unwrap();
        assert_eq!(
            preview.url,
            "/download/multi.pdf#page=2&view=FitH&zoom=page-width"
        );
        assert_eq!(preview.frame_title, "Preview of multi.pdf - Page 2");
    }

    #[test]
    fn test_unknown_index_is_ignored() {
        let mut view = ResultsView::new(vec![doc("w2", 1, 2)]);
        assert!(!view.next_page(7));
        assert!(!view.begin_edit(7));
        assert_eq!(view.copy_text(7, CopyTarget::Summary), None);
        assert_eq!(view.download_link(7), None);
        assert_eq!(view.card(7), None);
    }

    #[test]
    fn test_edit_snapshot_and_cancel() {
        let original = doc("w2", 1, 2);
        let mut view = ResultsView::new(vec![original.clone()]);
        assert!(view.begin_edit(0));
        assert_eq!(
            view.edit_buffer(0),
            Some("employer: Acme Corp\nnet_pay: 2,310.55")
        );

        view.update_edit("employer: Someone Else");
        assert_eq!(
            view.copy_text(0, CopyTarget::KeyFields).as_deref(),
            Some("employer: Someone Else")
        );

        view.cancel_edit();
        assert_eq!(view.editing_index(), None);
        assert_eq!(
            view.key_fields_text(0).as_deref(),
            Some("employer: Acme Corp\nnet_pay: 2,310.55")
        );
        assert_eq!(view.documents()[0], original);
    }

    #[test]
    fn test_save_does_not_write_back() {
        let original = doc("w2", 1, 2);
        let mut view = ResultsView::new(vec![original.clone()]);
        view.begin_edit(0);
        view.update_edit("totally different");
        view.save_edit();
        assert_eq!(view.editing_index(), None);
        assert_eq!(view.documents()[0], original);
        assert_eq!(
            view.copy_text(0, CopyTarget::KeyFields).unwrap(),
            original.key_fields_text()
        );
    }

    #[test]
    fn test_single_edit_at_a_time() {
        let mut view = ResultsView::new(vec![doc("a", 1, 1), doc("b", 2, 2)]);
        view.begin_edit(0);
        view.update_edit("changed a");
        view.begin_edit(1);
        assert_eq!(view.editing_index(), Some(1));
        assert_eq!(view.edit_buffer(0), None);
        assert_eq!(view.card(0).unwrap().editing, None);
        assert!(view.card(1).unwrap().editing.is_some());
    }

    #[test]
    fn test_update_without_edit_is_noop() {
        let mut view = ResultsView::new(vec![doc("a", 1, 1)]);
        view.update_edit("ignored");
        assert_eq!(view.editing_index(), None);
    }

    #[test]
    fn test_copy_summary() {
        let view = ResultsView::new(vec![doc("w2", 1, 2)]);
        assert_eq!(
            view.copy_text(0, CopyTarget::Summary).as_deref(),
            Some("w2 summary")
        );
    }

    #[test]
    fn test_download_link() {
        let view = ResultsView::new(vec![doc("w2", 1, 2), promissory_note()]);
        assert_eq!(
            view.download_link(0),
            Some(DownloadLink {
                url: "/download/w2.pdf".to_string(),
                filename: "w2.pdf".to_string(),
            })
        );
        assert_eq!(view.download_link(1), None);
    }

    #[derive(Debug, Clone)]
    enum Nav {
        Next,
        Prev,
        GoTo(u32),
    }

    fn nav() -> impl Strategy<Value = Nav> {
        prop_oneof![
            Just(Nav::Next),
            Just(Nav::Prev),
            (0u32..40).prop_map(Nav::GoTo),
        ]
    }

    proptest! {
        #[test]
        fn cursor_never_leaves_page_range(
            start in 1u32..20,
            span in 0u32..15,
            moves in proptest::collection::vec(nav(), 0..60)
        ) {
            let mut view = ResultsView::new(vec![doc("p", start, start + span)]);
            let total = span + 1;
            for m in moves {
                match m {
                    Nav::Next => { view.next_page(0); }
                    Nav::Prev => { view.prev_page(0); }
                    Nav::GoTo(page) => { view.go_to_page(0, page); }
                }
                let page = view.current_page(0);
                prop_assert!(page >= 1 && page <= total);
            }
        }

        #[test]
        fn cancel_restores_pre_edit_text(edits in proptest::collection::vec(".{0,40}", 0..5)) {
            let original = doc("w2", 1, 2);
            let mut view = ResultsView::new(vec![original.clone()]);
            let before = view.key_fields_text(0).unwrap();
            view.begin_edit(0);
            for text in &edits {
                view.update_edit(text);
            }
            view.cancel_edit();
            prop_assert_eq!(view.key_fields_text(0).unwrap(), before);
            prop_assert_eq!(&view.documents()[0], &original);
        }

        #[test]
        fn card_count_matches_documents(count in 0usize..12) {
            let docs: Vec<_> = (0..count).map(|i| doc(&format!("d{}", i), 1, 1)).collect();
            let view = ResultsView::new(docs);
            let cards = view.cards();
            prop_assert_eq!(cards.len(), count);
            for (i, card) in cards.iter().enumerate() {
                prop_assert_eq!(card.index, i);
                prop_assert_eq!(&card.title, &format!("d{}", i));
            }
        }
    }
}
