//! `fetch`-backed transport for the bundle upload

use crate::browser::js_error_message;
use docbundle_core::{ClassifyTransport, RawResponse, RequestError, UploadTicket};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

/// Posts the bundle as `multipart/form-data` to a same-origin path
///
/// The browser sets the multipart boundary header itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl ClassifyTransport for FetchTransport {
    type File = File;

    async fn post_bundle(
        &self,
        ticket: &UploadTicket,
        file: &File,
    ) -> Result<RawResponse, RequestError> {
        let response = send(ticket, file)
            .await
            .map_err(|e| RequestError::Network(js_error_message(&e)))?;

        let status = response.status();
        let body = read_text(&response)
            .await
            .map_err(|e| RequestError::Decode(js_error_message(&e)))?;

        tracing::debug!(status, bytes = body.len(), "classification response received");
        Ok(RawResponse::new(status, body))
    }
}

async fn send(ticket: &UploadTicket, file: &File) -> Result<Response, JsValue> {
    let window = web_sys::window().ok_or("No window")?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(&ticket.field_name, file, &ticket.file_name)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(&ticket.endpoint, &opts)?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    response.dyn_into()
}

async fn read_text(response: &Response) -> Result<String, JsValue> {
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}
