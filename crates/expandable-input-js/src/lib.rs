//! WASM bindings for expandable contenteditable inputs.
//!
//! Exposes the plugin-style `expandableInput(element, option?, config?)`
//! entry point, `val` / `setVal` / `select` accessors that work on form
//! fields and contenteditable elements alike, document-level auto-attach,
//! and an `ExpandableInput` class for handle-based use.

mod types;
mod widget;

pub use types::*;
pub use widget::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use tracing::Level;
        use tracing::subscriber::set_global_default;
        use tracing_subscriber::Registry;
        use tracing_subscriber::layer::SubscriberExt;

        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(console_level)
                .build(),
        );

        // The host page may already have installed a subscriber.
        let _ = set_global_default(Registry::default().with(wasm_layer));
    }
}
