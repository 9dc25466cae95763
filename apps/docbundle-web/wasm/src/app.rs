//! Mounted application: shared shell state plus delegated DOM events
//!
//! Listeners are attached once on the root element and dispatch on
//! `data-action` / element ids, so re-rendering never rebinds handlers.

use crate::actions::Action;
use crate::browser::{alert, copy_to_clipboard, js_error_message, trigger_download};
use crate::dom::{append_all, element, index_of, ACTION_ATTR};
use crate::transport::FetchTransport;
use crate::view::{
    render_error, render_header, render_results, render_upload, EDIT_TEXTAREA_CLASS,
    FILE_INPUT_ID, UPLOAD_CONTAINER_CLASS, UPLOAD_LABEL_ID,
};
use docbundle_core::{
    first_file, process_upload, AppShell, ClientConfig, CopyTarget, DragPhase, FileCandidate,
    UploadRejection,
};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DragEvent, Element, Event, File, FileList, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement,
};

#[derive(Clone)]
pub struct App {
    shell: Rc<RefCell<AppShell>>,
    document: Document,
    root: Element,
}

impl App {
    pub fn new(root: Element, config: ClientConfig) -> Result<Self, JsValue> {
        let document = root
            .owner_document()
            .ok_or_else(|| JsValue::from_str("Root element has no owner document"))?;
        Ok(Self {
            shell: Rc::new(RefCell::new(AppShell::new(config))),
            document,
            root,
        })
    }

    pub fn shell(&self) -> Ref<'_, AppShell> {
        self.shell.borrow()
    }

    /// Rebuild the whole page from the current shell state
    pub fn render(&self) -> Result<(), JsValue> {
        let shell = self.shell.borrow();
        let busy = shell.is_processing();

        let main = element(&self.document, "main", "App-main")?;
        main.append_child(&render_upload(&self.document, shell.gate(), busy)?.into())?;
        if let Some(message) = shell.error_message() {
            main.append_child(&render_error(&self.document, message)?.into())?;
        }
        if !shell.results().is_empty() {
            main.append_child(&render_results(&self.document, shell.results())?.into())?;
        }

        self.root.set_text_content(None);
        append_all(&self.root, &[render_header(&self.document)?, main])
    }

    fn rerender(&self) {
        if let Err(e) = self.render() {
            tracing::error!(error = %js_error_message(&e), "render failed");
        }
    }

    // ========================================================================
    // Event wiring
    // ========================================================================

    pub fn attach(&self) -> Result<(), JsValue> {
        let app = self.clone();
        self.listen("click", move |event| app.on_click(&event))?;

        let app = self.clone();
        self.listen("change", move |event| app.on_change(&event))?;

        let app = self.clone();
        self.listen("input", move |event| app.on_input(&event))?;

        for event_type in ["dragenter", "dragover", "dragleave", "drop"] {
            let app = self.clone();
            self.listen(event_type, move |event| app.on_drag(&event))?;
        }
        Ok(())
    }

    fn listen<F>(&self, event_type: &str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        self.root
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        // Bound to the root for the lifetime of the page
        closure.forget();
        Ok(())
    }

    fn on_click(&self, event: &Event) {
        let Some(target) = event_element(event) else {
            return;
        };
        let Ok(Some(button)) = target.closest(&format!("[{}]", ACTION_ATTR)) else {
            return;
        };
        let action = button
            .get_attribute(ACTION_ATTR)
            .and_then(|value| Action::parse(&value));
        let (Some(action), Some(index)) = (action, index_of(&button)) else {
            return;
        };

        if let Err(e) = self.handle_action(action, index) {
            tracing::error!(action = action.as_str(), error = %js_error_message(&e), "action failed");
        }
    }

    fn handle_action(&self, action: Action, index: usize) -> Result<(), JsValue> {
        match action {
            Action::PrevPage => {
                let moved = self.shell.borrow_mut().results_mut().prev_page(index);
                if moved {
                    self.render()?;
                }
            }
            Action::NextPage => {
                let moved = self.shell.borrow_mut().results_mut().next_page(index);
                if moved {
                    self.render()?;
                }
            }
            Action::Download => {
                let link = self.shell.borrow().results().download_link(index);
                if let Some(link) = link {
                    trigger_download(&self.document, &link)?;
                }
            }
            Action::CopySummary => self.copy(index, CopyTarget::Summary),
            Action::CopyFields => self.copy(index, CopyTarget::KeyFields),
            Action::Edit => {
                let started = self.shell.borrow_mut().results_mut().begin_edit(index);
                if started {
                    self.render()?;
                    self.focus_editor()?;
                }
            }
            Action::Save => {
                self.shell.borrow_mut().results_mut().save_edit();
                self.render()?;
            }
            Action::Cancel => {
                self.shell.borrow_mut().results_mut().cancel_edit();
                self.render()?;
            }
        }
        Ok(())
    }

    fn copy(&self, index: usize, target: CopyTarget) {
        let text = self.shell.borrow().results().copy_text(index, target);
        if let Some(text) = text {
            copy_to_clipboard(text);
        }
    }

    fn focus_editor(&self) -> Result<(), JsValue> {
        if let Some(textarea) = self
            .root
            .query_selector(&format!(".{}", EDIT_TEXTAREA_CLASS))?
        {
            textarea.dyn_into::<HtmlElement>()?.focus()?;
        }
        Ok(())
    }

    fn on_input(&self, event: &Event) {
        let Some(textarea) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
        else {
            return;
        };
        if textarea.class_name() != EDIT_TEXTAREA_CLASS {
            return;
        }
        self.shell
            .borrow_mut()
            .results_mut()
            .update_edit(&textarea.value());
    }

    fn on_change(&self, event: &Event) {
        let Some(input) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if input.id() != FILE_INPUT_ID {
            return;
        }
        event.prevent_default();

        let picked = input
            .files()
            .map_or(Err(UploadRejection::NoFile), |files| first_of(&files));
        // Allow picking the same file again later
        input.set_value("");

        match picked {
            Ok(file) => self.upload(file),
            Err(rejection) => self.report_rejection(&rejection),
        }
    }

    fn on_drag(&self, event: &Event) {
        let Some(phase) = DragPhase::from_event_type(&event.type_()) else {
            return;
        };
        // Only the upload control is a drop zone
        let in_zone = event_element(event)
            .and_then(|target| target.closest(&format!(".{}", UPLOAD_CONTAINER_CLASS)).ok())
            .flatten()
            .is_some();
        if !in_zone {
            return;
        }
        event.prevent_default();
        event.stop_propagation();

        let (label_class, busy) = {
            let mut shell = self.shell.borrow_mut();
            let busy = shell.is_processing();
            shell.gate_mut().drag(phase);
            (shell.gate().label_class(busy), busy)
        };
        if let Ok(Some(label)) = self.root.query_selector(&format!("#{}", UPLOAD_LABEL_ID)) {
            label.set_class_name(&label_class);
        }

        if phase != DragPhase::Drop {
            return;
        }
        if busy {
            tracing::debug!("drop ignored while processing");
            return;
        }

        let files = event
            .dyn_ref::<DragEvent>()
            .and_then(|e| e.data_transfer())
            .and_then(|dt| dt.files());
        match files.map(|files| first_of(&files)) {
            Some(Ok(file)) => self.upload(file),
            Some(Err(rejection)) => self.report_rejection(&rejection),
            None => {}
        }
    }

    // ========================================================================
    // Upload
    // ========================================================================

    fn upload(&self, file: File) {
        let candidate = FileCandidate::new(file.name(), file.type_(), file.size() as u64);
        let offered = self.shell.borrow().offer(&candidate);
        if let Err(rejection) = offered {
            self.report_rejection(&rejection);
            return;
        }

        let app = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = process_upload(
                &app.shell,
                &FetchTransport,
                &candidate,
                &file,
                || app.rerender(),
            )
            .await;
            if let Err(rejection) = result {
                app.report_rejection(&rejection);
            }
        });
    }

    fn report_rejection(&self, rejection: &UploadRejection) {
        match rejection {
            UploadRejection::NotPdf { .. } => alert(&rejection.to_string()),
            UploadRejection::Busy | UploadRejection::NoFile => {
                tracing::debug!(reason = %rejection, "upload not started");
            }
        }
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn first_of(files: &FileList) -> Result<File, UploadRejection> {
    first_file((0..files.length()).filter_map(|i| files.get(i)))
}
