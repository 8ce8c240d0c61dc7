//! expandable-input-core: Pure Rust logic for auto-growing contenteditable inputs.
//!
//! This crate provides:
//! - `markup_to_text` / `text_to_markup` - the value codec for contenteditable content
//! - `ExpandableInput<H>` - the widget controller, generic over an `EditableHost`
//! - `InstanceRegistry` - per-element state side table
//! - `ExpandableConfig` - class names and behaviour knobs

pub mod config;
pub mod controller;
pub mod entities;
pub mod error;
pub mod markup;
pub mod platform;
pub mod registry;

pub use config::{ExpandableConfig, TAB_KEY_CODE};
pub use controller::{ExpandableInput, Operation, PasteOutcome};
pub use entities::{lookup_entity, resolve_reference};
pub use error::ExpandableError;
pub use markup::{
    EMPTY_LINE_PLACEHOLDERS, TextPiece, decode_entities, is_empty_line_placeholder, markup_to_text,
    text_pieces, text_to_markup,
};
pub use platform::{
    Capabilities, ClipboardSource, DisplayMode, EditableHost, PlatformError, resolve_paste_text,
};
pub use registry::{InstanceId, InstanceRegistry};
pub use smol_str::SmolStr;
