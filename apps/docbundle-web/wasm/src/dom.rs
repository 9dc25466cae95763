//! Small DOM construction helpers
//!
//! Text always goes through `set_text_content`, never `innerHTML`, since
//! titles, summaries and field values come from the service.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

pub const ACTION_ATTR: &str = "data-action";
pub const INDEX_ATTR: &str = "data-index";

/// `<tag class="...">`
pub fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// `<tag class="...">text</tag>`
pub fn text_element(
    document: &Document,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<Element, JsValue> {
    let el = element(document, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

/// A `type="button"` tagged with the action and card index it triggers
pub fn action_button(
    document: &Document,
    class: &str,
    label: &str,
    action: &str,
    index: usize,
) -> Result<Element, JsValue> {
    let button = text_element(document, "button", class, label)?;
    button.set_attribute("type", "button")?;
    button.set_attribute(ACTION_ATTR, action)?;
    button.set_attribute(INDEX_ATTR, &index.to_string())?;
    Ok(button)
}

pub fn set_disabled(el: &Element, disabled: bool) -> Result<(), JsValue> {
    if disabled {
        el.set_attribute("disabled", "")
    } else {
        el.remove_attribute("disabled")
    }
}

/// Append every child in order
pub fn append_all(parent: &Element, children: &[Element]) -> Result<(), JsValue> {
    for child in children {
        parent.append_child(child)?;
    }
    Ok(())
}

/// Card index stored on an element, if any
pub fn index_of(el: &Element) -> Option<usize> {
    el.get_attribute(INDEX_ATTR)?.parse().ok()
}
