//! Application shell: the request lifecycle
//!
//! ```text
//! Idle ──begin──▶ Processing ──finish(2xx + JSON)──▶ Success
//!   ▲                 │
//!   │                 └──finish(non-2xx / network / parse)──▶ Error
//!   └── Success / Error ──begin──▶ Processing
//! ```
//!
//! Exactly one request is in flight at a time. There is no retry, timeout
//! or cancellation; a request that never completes leaves the shell in
//! `Processing`.

use crate::config::ClientConfig;
use crate::error::{RequestError, ShellError, UploadRejection};
use crate::results::ResultsView;
use crate::transport::{interpret_response, ClassifyTransport, RawResponse};
use crate::upload::{FileCandidate, UploadGate};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingState {
    Idle,
    Processing,
    Success,
    /// User-facing failure message
    Error(String),
}

impl ProcessingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingState::Idle => "idle",
            ProcessingState::Processing => "processing",
            ProcessingState::Success => "success",
            ProcessingState::Error(_) => "error",
        }
    }
}

/// The one multipart request to issue for an accepted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub endpoint: String,
    pub field_name: String,
    pub file_name: String,
}

#[derive(Debug)]
pub struct AppShell {
    config: ClientConfig,
    gate: UploadGate,
    state: ProcessingState,
    results: ResultsView,
    bundle_name: Option<String>,
    requests_issued: u64,
}

impl AppShell {
    pub fn new(config: ClientConfig) -> Self {
        let gate = UploadGate::new(config.accepted_mime.clone());
        Self {
            config,
            gate,
            state: ProcessingState::Idle,
            results: ResultsView::default(),
            bundle_name: None,
            requests_issued: 0,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state == ProcessingState::Processing
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ProcessingState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn gate(&self) -> &UploadGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut UploadGate {
        &mut self.gate
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultsView {
        &mut self.results
    }

    /// Server-side name of the last processed bundle
    pub fn bundle_name(&self) -> Option<&str> {
        self.bundle_name.as_deref()
    }

    /// Requests started since the shell was created
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Upload control check for a picked or dropped file
    pub fn offer(&self, candidate: &FileCandidate) -> Result<(), UploadRejection> {
        self.gate.offer(candidate, self.is_processing())
    }

    /// Enter `Processing` and describe the request to send
    ///
    /// Clears the previous error and document list.
    pub fn begin(&mut self, candidate: &FileCandidate) -> Result<UploadTicket, ShellError> {
        if self.is_processing() {
            return Err(ShellError::Busy);
        }

        self.state = ProcessingState::Processing;
        self.results = ResultsView::default();
        self.bundle_name = None;
        self.requests_issued += 1;

        tracing::info!(
            file = %candidate.name,
            endpoint = %self.config.endpoint,
            "uploading bundle"
        );

        Ok(UploadTicket {
            endpoint: self.config.endpoint.clone(),
            field_name: self.config.field_name.clone(),
            file_name: candidate.name.clone(),
        })
    }

    /// Apply the outcome of the in-flight request
    pub fn finish(&mut self, outcome: Result<RawResponse, RequestError>) {
        if !self.is_processing() {
            tracing::warn!(state = ?self.state, "response arrived with no request in flight");
            return;
        }

        let parsed =
            outcome.and_then(|raw| interpret_response(&raw, &self.config.generic_error));

        match parsed {
            Ok(response) => {
                tracing::info!(
                    documents = response.documents.len(),
                    bundle = %response.filename,
                    "bundle processed"
                );
                self.bundle_name = Some(response.filename).filter(|name| !name.is_empty());
                self.results = ResultsView::new(response.documents);
                self.state = ProcessingState::Success;
            }
            Err(err) => {
                tracing::error!(error = ?err, "bundle processing failed");
                self.state = ProcessingState::Error(err.to_string());
            }
        }
    }
}

/// Run one upload end to end: gate, begin, send, finish
///
/// `on_change` runs after each state transition with no borrow held, so it
/// may borrow the shell to re-render.
pub async fn process_upload<T, F>(
    shell: &RefCell<AppShell>,
    transport: &T,
    candidate: &FileCandidate,
    file: &T::File,
    on_change: F,
) -> Result<(), UploadRejection>
where
    T: ClassifyTransport,
    F: Fn(),
{
    let ticket = {
        let mut shell = shell.borrow_mut();
        shell.offer(candidate)?;
        shell.begin(candidate).map_err(|_| UploadRejection::Busy)?
    };
    on_change();

    let outcome = transport.post_bundle(&ticket, file).await;

    shell.borrow_mut().finish(outcome);
    on_change();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::CopyTarget;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    const NOTE_RESPONSE: &str = r#"{
        "message": "Document processed successfully",
        "filename": "bundle.pdf",
        "total_documents": 1,
        "documents": [{
            "doc_type": "Note",
            "title": "Promissory Note",
            "page_start": 1,
            "page_end": 3,
            "confidence": 0.92,
            "summary": "...",
            "key_highlights": [{"field": "Borrower", "value": "Jane Doe"}]
        }]
    }"#;

    fn pdf() -> FileCandidate {
        FileCandidate::new("bundle.pdf", "application/pdf", 4096)
    }

    /// Replays a canned reply and counts requests
    struct CannedTransport {
        reply: Result<RawResponse, RequestError>,
        calls: Cell<u32>,
    }

    impl CannedTransport {
        fn new(reply: Result<RawResponse, RequestError>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
            }
        }
    }

    impl ClassifyTransport for CannedTransport {
        type File = Vec<u8>;

        async fn post_bundle(
            &self,
            ticket: &UploadTicket,
            file: &Vec<u8>,
        ) -> Result<RawResponse, RequestError> {
            assert_eq!(ticket.endpoint, "/process_document");
            assert_eq!(ticket.field_name, "file");
            assert!(!file.is_empty());
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    #[test]
    fn test_starts_idle() {
        let shell = AppShell::new(ClientConfig::default());
        assert_eq!(shell.state(), &ProcessingState::Idle);
        assert_eq!(shell.state().as_str(), "idle");
        assert!(shell.results().is_empty());
        assert_eq!(shell.error_message(), None);
    }

    #[test]
    fn test_begin_then_success() {
        let mut shell = AppShell::new(ClientConfig::default());
        let ticket = shell.begin(&pdf()).unwrap();
        assert_eq!(
            ticket,
            UploadTicket {
                endpoint: "/process_document".to_string(),
                field_name: "file".to_string(),
                file_name: "bundle.pdf".to_string(),
            }
        );
        assert!(shell.is_processing());

        shell.finish(Ok(RawResponse::new(200, NOTE_RESPONSE)));
        assert_eq!(shell.state(), &ProcessingState::Success);
        assert_eq!(shell.bundle_name(), Some("bundle.pdf"));

        let cards = shell.results().cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Promissory Note");
        assert_eq!(cards[0].confidence, "92%");
        assert_eq!(cards[0].pages, "1-3");
        assert_eq!(cards[0].highlight_lines(), vec!["Borrower: Jane Doe"]);
    }

    #[test]
    fn test_second_begin_while_processing_is_refused() {
        let mut shell = AppShell::new(ClientConfig::default());
        shell.begin(&pdf()).unwrap();
        assert_eq!(shell.begin(&pdf()), Err(ShellError::Busy));
        assert_eq!(shell.offer(&pdf()), Err(UploadRejection::Busy));
        assert_eq!(shell.requests_issued(), 1);
    }

    #[test]
    fn test_server_error_message() {
        let mut shell = AppShell::new(ClientConfig::default());
        shell.begin(&pdf()).unwrap();
        shell.finish(Ok(RawResponse::new(
            400,
            r#"{"error": "Only PDF files are allowed"}"#,
        )));
        assert_eq!(
            shell.state(),
            &ProcessingState::Error("Only PDF files are allowed".to_string())
        );
    }

    #[test]
    fn test_generic_error_message() {
        let mut shell = AppShell::new(ClientConfig::default());
        shell.begin(&pdf()).unwrap();
        shell.finish(Ok(RawResponse::new(500, "Internal Server Error")));
        assert_eq!(shell.error_message(), Some("Failed to process document"));
        assert!(shell.results().is_empty());
    }

    #[test]
    fn test_network_failure() {
        let mut shell = AppShell::new(ClientConfig::default());
        shell.begin(&pdf()).unwrap();
        shell.finish(Err(RequestError::Network("Failed to fetch".to_string())));
        assert_eq!(shell.error_message(), Some("Failed to fetch"));
    }

    #[test]
    fn test_new_upload_clears_previous_results_and_error() {
        let mut shell = AppShell::new(ClientConfig::default());
        shell.begin(&pdf()).unwrap();
        shell.finish(Ok(RawResponse::new(200, NOTE_RESPONSE)));
        assert_eq!(shell.results().len(), 1);

        shell.begin(&pdf()).unwrap();
        assert!(shell.results().is_empty());
        assert_eq!(shell.bundle_name(), None);
        shell.finish(Ok(RawResponse::new(500, "{}")));

        shell.begin(&pdf()).unwrap();
        assert_eq!(shell.error_message(), None);
        assert_eq!(shell.requests_issued(), 3);
    }

    #[test]
    fn test_finish_without_request_is_ignored() {
        let mut shell = AppShell::new(ClientConfig::default());
        shell.finish(Ok(RawResponse::new(200, NOTE_RESPONSE)));
        assert_eq!(shell.state(), &ProcessingState::Idle);
        assert!(shell.results().is_empty());
    }

    #[test]
    fn test_success_replaces_document_list() {
        let mut shell = AppShell::new(ClientConfig::default());
        shell.begin(&pdf()).unwrap();
        shell.finish(Ok(RawResponse::new(200, NOTE_RESPONSE)));
        shell.results_mut().begin_edit(0);
        shell.results_mut().update_edit("Borrower: John Roe");

        shell.begin(&pdf()).unwrap();
        shell.finish(Ok(RawResponse::new(200, NOTE_RESPONSE)));
        assert_eq!(shell.results().editing_index(), None);
        assert_eq!(
            shell.results().copy_text(0, CopyTarget::KeyFields).as_deref(),
            Some("Borrower: Jane Doe")
        );
    }

    #[tokio::test]
    async fn test_process_upload_sends_exactly_one_request() {
        let shell = RefCell::new(AppShell::new(ClientConfig::default()));
        let transport = CannedTransport::new(Ok(RawResponse::new(200, NOTE_RESPONSE)));
        let transitions = Cell::new(0);

        process_upload(&shell, &transport, &pdf(), &vec![b'%'; 8], || {
            transitions.set(transitions.get() + 1)
        })
        .await
        .unwrap();

        assert_eq!(transport.calls.get(), 1);
        assert_eq!(transitions.get(), 2);
        assert_eq!(shell.borrow().state(), &ProcessingState::Success);
        assert_eq!(shell.borrow().results().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_file_never_reaches_transport() {
        let shell = RefCell::new(AppShell::new(ClientConfig::default()));
        let transport = CannedTransport::new(Ok(RawResponse::new(200, NOTE_RESPONSE)));
        let docx = FileCandidate::new(
            "letter.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            100,
        );

        let result = process_upload(&shell, &transport, &docx, &vec![1], || {}).await;

        assert!(matches!(result, Err(UploadRejection::NotPdf { .. })));
        assert_eq!(transport.calls.get(), 0);
        assert_eq!(shell.borrow().state(), &ProcessingState::Idle);
        assert_eq!(shell.borrow().requests_issued(), 0);
    }

    #[tokio::test]
    async fn test_busy_shell_never_reaches_transport() {
        let shell = RefCell::new(AppShell::new(ClientConfig::default()));
        shell.borrow_mut().begin(&pdf()).unwrap();
        let transport = CannedTransport::new(Ok(RawResponse::new(200, NOTE_RESPONSE)));

        let result = process_upload(&shell, &transport, &pdf(), &vec![1], || {}).await;

        assert_eq!(result, Err(UploadRejection::Busy));
        assert_eq!(transport.calls.get(), 0);
        assert!(shell.borrow().is_processing());
    }

    #[tokio::test]
    async fn test_transport_error_lands_in_error_state() {
        let shell = RefCell::new(AppShell::new(ClientConfig::default()));
        let transport =
            CannedTransport::new(Err(RequestError::Network("Failed to fetch".to_string())));

        process_upload(&shell, &transport, &pdf(), &vec![1], || {})
            .await
            .unwrap();

        assert_eq!(transport.calls.get(), 1);
        assert_eq!(shell.borrow().error_message(), Some("Failed to fetch"));
    }
}
