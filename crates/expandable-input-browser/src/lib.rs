//! Browser DOM layer for expandable inputs.
//!
//! This crate drives `expandable-input-core`'s controller from real DOM
//! elements and events. It assumes a `wasm32-unknown-unknown` target
//! environment.
//!
//! # Architecture
//!
//! - `contenteditable`: `EditableHost` over an `HtmlElement`
//! - `cursor`: Selection API handling and caret insertion
//! - `clipboard`: paste text sources
//! - `field`: `value` / `select` over native fields and contenteditable
//! - `events`: listener wiring, instance registry, auto-attach
//! - `platform`: engine capability detection
//!
//! # Re-exports
//!
//! This crate re-exports `expandable-input-core` for convenience, so consumers
//! only need to depend on `expandable-input-browser`.

// Re-export core crate
pub use expandable_input_core;
pub use expandable_input_core::*;

pub mod clipboard;
pub mod contenteditable;
pub mod cursor;
pub mod events;
pub mod field;
pub mod platform;

pub use clipboard::BrowserClipboard;
pub use contenteditable::{DomHost, is_editable};
pub use events::{
    AutoAttach, INSTANCE_ATTRIBUTE, SharedInput, attach, attached_input, detach, expandable_input,
    install_auto_attach, instance_id, invoke, live_instances, sweep_detached,
};
pub use field::{Field, NativeField};
pub use platform::capabilities;
