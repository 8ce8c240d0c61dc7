//! Engine capability detection for browser-specific workarounds.
//!
//! Probes features directly instead of parsing the user agent, so engines
//! are classified by what they can do.

use std::sync::OnceLock;

use expandable_input_core::Capabilities;

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Get cached capability info. Detection runs once on first call.
pub fn capabilities() -> &'static Capabilities {
    CAPABILITIES.get_or_init(detect_capabilities)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn detect_capabilities() -> Capabilities {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Capabilities::default();
    };

    // Older engines report no support for the insertText command.
    let insert_text_command = document
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
        .and_then(|doc| doc.query_command_supported("insertText").ok())
        .unwrap_or(false);

    let caps = Capabilities {
        insert_text_command,
    };
    tracing::debug!(?caps, "detected engine capabilities");
    caps
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn detect_capabilities() -> Capabilities {
    Capabilities::default()
}
