//! Conversion between contenteditable markup and plain text values.
//!
//! This is a lossy projection tuned for the markup browsers produce while a
//! user types into a contenteditable element: `<br>` and `<div>` wrappers act
//! as line separators, everything else is inline. It is not an HTML parser.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::entities::resolve_reference;

/// Inner markup a browser leaves behind once all visible text is deleted.
pub const EMPTY_LINE_PLACEHOLDERS: [&str; 2] = ["<br>", "<div><br></div>"];

static BR_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br>").unwrap());
static EMPTY_DIV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<div>\s*</div>").unwrap());
static DIV_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(<div>|</div>)").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());
static CHAR_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&([^;]+);").unwrap());

static TRAILING_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+$").unwrap());
static UNBOUNDED_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\B ").unwrap());

/// Project inner markup to the plain text value a user would expect.
///
/// Line breaks (`<br>`, empty and non-empty `<div>` wrappers) become `\n`,
/// other tags are dropped, space runs collapse, character references are
/// decoded and the result is trimmed.
pub fn markup_to_text(markup: &str) -> String {
    let text = BR_TAG.replace_all(markup, "\n");
    let text = EMPTY_DIV.replace_all(&text, "\n");
    let text = DIV_TAG.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = decode_entities(&text);
    text.trim().to_string()
}

/// Decode every `&...;` reference. Unknown references become empty strings.
pub fn decode_entities(text: &str) -> String {
    CHAR_REF
        .replace_all(text, |caps: &Captures<'_>| resolve_reference(&caps[1]))
        .into_owned()
}

/// Render a plain text value as inner markup.
///
/// Escapes `&`, `<` and `>`, keeps trailing whitespace and repeated spaces
/// visible with `&nbsp;` and turns newlines into `<br>`.
pub fn text_to_markup(text: &str) -> String {
    let markup = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    let markup = TRAILING_WHITESPACE.replace(&markup, "&nbsp;");
    let markup = markup.replace('\n', "<br>");
    UNBOUNDED_SPACE.replace_all(&markup, "&nbsp;").into_owned()
}

/// Whether the markup is one of the residual empty-line placeholders.
pub fn is_empty_line_placeholder(markup: &str) -> bool {
    EMPTY_LINE_PLACEHOLDERS.contains(&markup)
}

/// A piece of pasted plain text, ready to become a DOM node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPiece<'a> {
    Text(&'a str),
    LineBreak,
}

/// Split plain text into text runs and line breaks.
///
/// `\r\n` counts as a single break. Empty runs are skipped.
pub fn text_pieces(text: &str) -> Vec<TextPiece<'_>> {
    let mut pieces = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            pieces.push(TextPiece::LineBreak);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            pieces.push(TextPiece::Text(line));
        }
    }
    pieces
}
