//! Browser side effects: alerts, clipboard, downloads

use docbundle_core::{DownloadLink, COPIED_NOTICE};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use std::future::Future;
use web_sys::{Clipboard, Document, HtmlElement};

/// Fallback when a JS error carries no readable message
pub const UNKNOWN_ERROR: &str = "An error occurred";

/// Blocking `window.alert`
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            tracing::warn!(error = %js_error_message(&e), "alert failed");
        }
    }
}

/// Write `text` to the clipboard, then acknowledge
///
/// The acknowledgement is shown whether or not the write succeeded.
pub fn copy_to_clipboard(text: String) {
    wasm_bindgen_futures::spawn_local(copy_then_ack(
        async move { write_clipboard(&text).await },
        || alert(COPIED_NOTICE),
    ));
}

/// Await `write`, log a failure, then always run `ack`
pub async fn copy_then_ack<W, A>(write: W, ack: A)
where
    W: Future<Output = Result<(), JsValue>>,
    A: FnOnce(),
{
    if let Err(e) = write.await {
        tracing::warn!(error = %js_error_message(&e), "clipboard write failed");
    }
    ack();
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    // `navigator.clipboard` is undefined outside secure contexts
    let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("Clipboard API unavailable"));
    }
    let clipboard: Clipboard = clipboard.unchecked_into();
    JsFuture::from(clipboard.write_text(text)).await?;
    Ok(())
}

/// Save a split document via a transient `<a download>`
pub fn trigger_download(document: &Document, link: &DownloadLink) -> Result<(), JsValue> {
    let anchor = document.create_element("a")?;
    anchor.set_attribute("href", &link.url)?;
    anchor.set_attribute("download", &link.filename)?;
    let anchor: HtmlElement = anchor.dyn_into()?;
    anchor.click();
    tracing::info!(file = %link.filename, "download started");
    Ok(())
}

/// Best-effort readable text for a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    UNKNOWN_ERROR.to_string()
}
