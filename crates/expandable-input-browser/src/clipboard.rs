//! Browser clipboard source for paste handling.
//!
//! Implements `ClipboardSource` over a paste event's `DataTransfer`, the
//! `window.clipboardData` object of older engines, and `window.prompt`.

use expandable_input_core::ClipboardSource;
use wasm_bindgen::{JsCast, JsValue};

/// Browser clipboard context wrapping a ClipboardEvent's DataTransfer.
pub struct BrowserClipboard {
    data_transfer: Option<web_sys::DataTransfer>,
}

impl BrowserClipboard {
    /// Create from a ClipboardEvent.
    ///
    /// Call this in your paste event handler.
    pub fn from_event(evt: &web_sys::ClipboardEvent) -> Self {
        Self {
            data_transfer: evt.clipboard_data(),
        }
    }

    /// Create a context without event data (legacy engines, tests).
    pub fn empty() -> Self {
        Self {
            data_transfer: None,
        }
    }
}

impl ClipboardSource for BrowserClipboard {
    fn event_text(&self) -> Option<String> {
        let dt = self.data_transfer.as_ref()?;
        dt.get_data("text/plain").ok().filter(|s| !s.is_empty())
    }

    fn legacy_text(&self) -> Option<String> {
        // Only engines without event clipboard data expose the global object.
        if self.data_transfer.is_some() {
            return None;
        }
        match read_legacy_clipboard() {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("legacy clipboard read failed: {:?}", e);
                None
            }
        }
    }

    fn prompt(&self, message: &str) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message(message) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("prompt failed: {:?}", e);
                None
            }
        }
    }
}

/// Read `window.clipboardData.getData("Text")`.
fn read_legacy_clipboard() -> Result<Option<String>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = js_sys::Reflect::get(&window, &JsValue::from_str("clipboardData"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Ok(None);
    }

    let get_data: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("getData"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("clipboardData.getData is not a function"))?;
    let text = get_data.call1(&clipboard, &JsValue::from_str("Text"))?;

    Ok(text.as_string())
}
