//! DOM rendering of the upload control, error line and result cards

use crate::actions::Action;
use crate::dom::{action_button, append_all, element, set_disabled, text_element, INDEX_ATTR};
use docbundle_core::{CardView, PreviewView, ResultsView, UploadGate};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

pub const FILE_INPUT_ID: &str = "file-upload-input";
pub const UPLOAD_LABEL_ID: &str = "file-upload-label";
pub const UPLOAD_CONTAINER_CLASS: &str = "file-upload-container";
pub const EDIT_TEXTAREA_CLASS: &str = "highlights-textarea";

pub fn render_header(document: &Document) -> Result<Element, JsValue> {
    let header = element(document, "header", "App-header")?;
    append_all(
        &header,
        &[
            text_element(document, "h1", "", "AI-Document Processing Demo")?,
            text_element(
                document,
                "p",
                "",
                "Upload a PDF bundle to classify and extract mortgage documents",
            )?,
        ],
    )?;
    Ok(header)
}

// ============================================================================
// Upload control
// ============================================================================

pub fn render_upload(
    document: &Document,
    gate: &UploadGate,
    busy: bool,
) -> Result<Element, JsValue> {
    let container = element(document, "div", UPLOAD_CONTAINER_CLASS)?;
    let form = element(document, "form", "file-upload-form")?;

    let input = element(document, "input", "")?;
    input.set_id(FILE_INPUT_ID);
    input.set_attribute("type", "file")?;
    input.set_attribute("accept", ".pdf")?;
    set_disabled(&input, busy)?;

    let label = element(document, "label", &gate.label_class(busy))?;
    label.set_id(UPLOAD_LABEL_ID);
    label.set_attribute("for", FILE_INPUT_ID)?;

    let body = if busy {
        let state = element(document, "div", "processing-state")?;
        append_all(
            &state,
            &[
                element(document, "div", "spinner")?,
                text_element(document, "p", "", "Processing document with AI...")?,
                text_element(
                    document,
                    "p",
                    "processing-note",
                    "This may take up to 60 seconds",
                )?,
            ],
        )?;
        state
    } else {
        let state = element(document, "div", "upload-state")?;
        let prompt = element(document, "p", "upload-text")?;
        append_all(
            &prompt,
            &[text_element(
                document,
                "strong",
                "",
                "Drop your PDF bundle here",
            )?],
        )?;
        prompt.append_with_str_1(" or click to browse")?;
        append_all(
            &state,
            &[
                text_element(document, "div", "upload-icon", "📄")?,
                prompt,
                text_element(
                    document,
                    "p",
                    "upload-subtext",
                    "Upload a single PDF containing multiple mortgage documents",
                )?,
            ],
        )?;
        state
    };

    label.append_child(&body)?;
    append_all(&form, &[input, label])?;
    container.append_child(&form)?;
    Ok(container)
}

pub fn render_error(document: &Document, message: &str) -> Result<Element, JsValue> {
    let block = element(document, "div", "error-message")?;
    block.append_child(&text_element(
        document,
        "p",
        "",
        &format!("Error: {}", message),
    )?.into())?;
    Ok(block)
}

// ============================================================================
// Results
// ============================================================================

pub fn render_results(document: &Document, results: &ResultsView) -> Result<Element, JsValue> {
    let section = element(document, "div", "document-results")?;
    let list = element(document, "div", "documents-list")?;

    for card in results.cards() {
        list.append_child(&render_card(document, &card)?.into())?;
    }

    append_all(
        &section,
        &[
            text_element(document, "h2", "", "Processing Results")?,
            text_element(document, "p", "results-summary", &results.summary_label())?,
            list,
        ],
    )?;
    Ok(section)
}

fn render_card(document: &Document, card: &CardView) -> Result<Element, JsValue> {
    let item = element(document, "div", "document-item")?;
    append_all(
        &item,
        &[
            render_preview_section(document, card)?,
            render_details_section(document, card)?,
        ],
    )?;
    Ok(item)
}

fn render_preview_section(document: &Document, card: &CardView) -> Result<Element, JsValue> {
    let section = element(document, "div", "document-preview-section")?;
    let frame_box = element(document, "div", "pdf-preview")?;

    if let Some(preview) = &card.preview {
        render_preview(document, &frame_box, card.index, preview)?;
    }

    section.append_child(&frame_box)?;
    Ok(section)
}

fn render_preview(
    document: &Document,
    parent: &Element,
    index: usize,
    preview: &PreviewView,
) -> Result<(), JsValue> {
    let frame = element(document, "iframe", "pdf-preview-frame")?;
    frame.set_attribute("src", &preview.url)?;
    frame.set_attribute("title", &preview.frame_title)?;

    let overlay = element(document, "div", "preview-overlay")?;
    let nav = element(document, "div", "pdf-navigation")?;

    if let Some(pager) = &preview.pager {
        let controls = element(document, "div", "page-controls")?;
        let prev = action_button(
            document,
            "page-nav-btn",
            "⬅️",
            Action::PrevPage.as_str(),
            index,
        )?;
        set_disabled(&prev, !pager.can_prev)?;
        let next = action_button(
            document,
            "page-nav-btn",
            "➡️",
            Action::NextPage.as_str(),
            index,
        )?;
        set_disabled(&next, !pager.can_next)?;
        append_all(
            &controls,
            &[
                prev,
                text_element(
                    document,
                    "span",
                    "page-info",
                    &format!("{} / {}", pager.current, pager.total),
                )?,
                next,
            ],
        )?;
        nav.append_child(&controls)?;
    }

    nav.append_child(&action_button(
        document,
        "download-btn-large",
        "📄 Download PDF",
        Action::Download.as_str(),
        index,
    )?.into())?;

    overlay.append_child(&nav)?;
    append_all(parent, &[frame, overlay])
}

fn render_details_section(document: &Document, card: &CardView) -> Result<Element, JsValue> {
    let section = element(document, "div", "document-details-section")?;

    let header = element(document, "div", "document-header")?;
    let meta = element(document, "div", "document-meta-row")?;
    append_all(
        &meta,
        &[
            text_element(document, "span", "doc-type", &card.doc_type)?,
            text_element(
                document,
                "span",
                "confidence",
                &format!("{} confidence", card.confidence),
            )?,
            text_element(
                document,
                "span",
                "page-range",
                &format!("Pages {}", card.pages),
            )?,
        ],
    )?;
    append_all(
        &header,
        &[
            text_element(document, "h3", "document-title", &card.title)?,
            meta,
        ],
    )?;

    let summary = element(document, "div", "document-summary")?;
    let summary_content = element(document, "div", "summary-content")?;
    let copy_summary = action_button(
        document,
        "copy-btn-small",
        "📋 Copy",
        Action::CopySummary.as_str(),
        card.index,
    )?;
    copy_summary.set_attribute("title", "Copy summary")?;
    append_all(
        &summary_content,
        &[text_element(document, "p", "", &card.summary)?, copy_summary],
    )?;
    append_all(
        &summary,
        &[text_element(document, "h4", "", "AI Summary")?, summary_content],
    )?;

    append_all(
        &section,
        &[header, summary, render_highlights(document, card)?],
    )?;
    Ok(section)
}

fn render_highlights(document: &Document, card: &CardView) -> Result<Element, JsValue> {
    let block = element(document, "div", "key-highlights")?;
    let header = element(document, "div", "key-highlights-header")?;
    let actions = element(document, "div", "highlights-actions")?;
    let container = element(document, "div", "highlights-container")?;

    match &card.editing {
        Some(buffer) => {
            let edit_actions = element(document, "div", "edit-mode-actions")?;
            append_all(
                &edit_actions,
                &[
                    action_button(
                        document,
                        "save-btn",
                        "✓ Save",
                        Action::Save.as_str(),
                        card.index,
                    )?,
                    action_button(
                        document,
                        "cancel-btn",
                        "✕ Cancel",
                        Action::Cancel.as_str(),
                        card.index,
                    )?,
                ],
            )?;
            actions.append_child(&edit_actions)?;

            let textarea = text_element(document, "textarea", EDIT_TEXTAREA_CLASS, buffer)?;
            textarea.set_attribute("placeholder", "field: value (one per line)")?;
            textarea.set_attribute(INDEX_ATTR, &card.index.to_string())?;
            container.append_child(&textarea)?;
        }
        None => {
            let view_actions = element(document, "div", "view-mode-actions")?;
            let edit = action_button(
                document,
                "edit-btn-main",
                "✏️ Edit",
                Action::Edit.as_str(),
                card.index,
            )?;
            edit.set_attribute("title", "Edit fields")?;
            let copy_all = action_button(
                document,
                "copy-btn-main",
                "📋 Copy All",
                Action::CopyFields.as_str(),
                card.index,
            )?;
            copy_all.set_attribute("title", "Copy all fields")?;
            append_all(&view_actions, &[edit, copy_all])?;
            actions.append_child(&view_actions)?;

            let display = element(document, "div", "highlights-display")?;
            for (field, value) in &card.highlights {
                let row = element(document, "div", "highlight-item")?;
                append_all(
                    &row,
                    &[
                        text_element(
                            document,
                            "span",
                            "highlight-field",
                            &format!("{}:", field),
                        )?,
                        text_element(document, "span", "highlight-value", value)?,
                    ],
                )?;
                display.append_child(&row)?;
            }
            container.append_child(&display)?;
        }
    }

    append_all(
        &header,
        &[
            text_element(document, "h4", "", "Extracted Key Fields")?,
            actions,
        ],
    )?;
    append_all(&block, &[header, container])?;
    Ok(block)
}
