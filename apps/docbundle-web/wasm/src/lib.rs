//! WASM front end for the document bundle classifier
//!
//! All state lives in Rust (`docbundle_core::AppShell`); the page only has
//! to load the module and mount it on an element.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { mount } from './pkg/docbundle_wasm.js';
//!
//! await init();
//! const app = mount("app");
//! console.log(app.state, app.documentCount);
//! ```
//!
//! Configuration is read from the mount element's `data-config` attribute
//! as JSON, e.g. `<div id="app" data-config='{"endpoint":"/process_document"}'>`.

pub mod actions;
pub mod app;
pub mod browser;
pub mod dom;
pub mod logging;
pub mod transport;
pub mod view;

use app::App;
use docbundle_core::ClientConfig;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub const CONFIG_ATTR: &str = "data-config";

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Render the app into the element with `root_id` and start listening
#[wasm_bindgen]
pub fn mount(root_id: &str) -> Result<DocBundleApp, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let root = document
        .get_element_by_id(root_id)
        .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", root_id)))?;

    let config = read_config(&root)?;
    logging::init_logging(&config.log_level);
    tracing::info!(endpoint = %config.endpoint, version = env!("CARGO_PKG_VERSION"), "mounting");

    let app = App::new(root, config)?;
    app.render()?;
    app.attach()?;
    Ok(DocBundleApp { app })
}

fn read_config(root: &Element) -> Result<ClientConfig, JsValue> {
    match root.get_attribute(CONFIG_ATTR) {
        Some(json) if !json.trim().is_empty() => ClientConfig::from_json(&json)
            .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", CONFIG_ATTR, e))),
        _ => Ok(ClientConfig::default()),
    }
}

/// Handle returned by `mount` for inspecting the running app
#[wasm_bindgen]
pub struct DocBundleApp {
    app: App,
}

#[wasm_bindgen]
impl DocBundleApp {
    /// `idle`, `processing`, `success` or `error`
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.app.shell().state().as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = errorMessage)]
    pub fn error_message(&self) -> Option<String> {
        self.app.shell().error_message().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = documentCount)]
    pub fn document_count(&self) -> usize {
        self.app.shell().results().len()
    }

    #[wasm_bindgen(getter, js_name = bundleName)]
    pub fn bundle_name(&self) -> Option<String> {
        self.app.shell().bundle_name().map(str::to_string)
    }

    /// The rendered cards as plain JS objects
    #[wasm_bindgen(js_name = getCards)]
    pub fn get_cards(&self) -> Result<JsValue, JsValue> {
        let cards = self.app.shell().results().cards();
        serde_wasm_bindgen::to_value(&cards)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
