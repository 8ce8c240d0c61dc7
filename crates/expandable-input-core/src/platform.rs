//! Platform abstraction traits for the expandable input.
//!
//! These traits define the interface between the widget logic and the
//! element it drives. The browser implementation wraps a DOM `HtmlElement`;
//! tests use an in-memory host.

use crate::markup::TextPiece;

/// Error type for platform operations.
#[derive(Debug, Clone)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// How the element is laid out, as reported by its computed `display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    Inline,
    #[default]
    Block,
}

impl DisplayMode {
    /// Classify a computed `display` value. Only `inline` and `inline-block`
    /// count as inline.
    pub fn from_css(display: &str) -> Self {
        match display.trim() {
            "inline" | "inline-block" => DisplayMode::Inline,
            _ => DisplayMode::Block,
        }
    }
}

/// Features of the running engine that change how the widget behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `document.execCommand("insertText")` is supported.
    pub insert_text_command: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            insert_text_command: true,
        }
    }
}

impl Capabilities {
    /// Engines without structured text insertion flash unstyled content on
    /// attach, so they get the ready class one tick late.
    pub fn needs_deferred_ready_class(&self) -> bool {
        !self.insert_text_command
    }
}

/// The element an `ExpandableInput` drives.
///
/// All methods take `&self`: DOM handles are shared references and the
/// in-memory test host uses interior mutability.
pub trait EditableHost {
    /// The `name` attribute, if set.
    fn name_attribute(&self) -> Option<String>;

    /// Mirror a name onto the node's `name` property.
    fn set_name_property(&self, name: &str) -> Result<(), PlatformError>;

    /// Computed `display` style, if it can be read.
    fn computed_display(&self) -> Option<String>;

    fn add_class(&self, class: &str) -> Result<(), PlatformError>;

    fn remove_class(&self, class: &str) -> Result<(), PlatformError>;

    /// Add a class on the next event loop tick.
    fn add_class_deferred(&self, class: &str) -> Result<(), PlatformError>;

    /// Rendered width including padding and border, in px.
    fn outer_width(&self) -> f64;

    /// Set or clear (`None`) the inline `min-width` style.
    fn set_min_width(&self, value: Option<&str>) -> Result<(), PlatformError>;

    /// Serialized inner markup.
    fn inner_markup(&self) -> String;

    fn set_inner_markup(&self, markup: &str);

    /// Make the whole content the active selection.
    fn select_contents(&self) -> Result<(), PlatformError>;

    /// Insert text at the caret through the engine's editing command.
    ///
    /// Returns `false` if the engine refused the command.
    fn insert_text_command(&self, text: &str) -> Result<bool, PlatformError>;

    /// Delete the selected content and insert nodes built from `pieces`.
    fn replace_selection(&self, pieces: &[TextPiece<'_>]) -> Result<(), PlatformError>;

    /// Fire a `change` notification on the element.
    fn notify_change(&self) -> Result<(), PlatformError>;
}

/// Sources of plain text for a paste, in order of preference.
pub trait ClipboardSource {
    /// `text/plain` from the paste event's data transfer.
    fn event_text(&self) -> Option<String>;

    /// Text from the engine-global clipboard object of older engines.
    fn legacy_text(&self) -> Option<String>;

    /// Ask the user to paste manually. `None` when dismissed.
    fn prompt(&self, message: &str) -> Option<String>;
}

/// Resolve the text to paste, falling back to a prompt. Empty text counts as
/// nothing to paste.
pub fn resolve_paste_text<C: ClipboardSource + ?Sized>(clipboard: &C, prompt: &str) -> Option<String> {
    clipboard
        .event_text()
        .filter(|t| !t.is_empty())
        .or_else(|| clipboard.legacy_text().filter(|t| !t.is_empty()))
        .or_else(|| clipboard.prompt(prompt))
        .filter(|t| !t.is_empty())
}
