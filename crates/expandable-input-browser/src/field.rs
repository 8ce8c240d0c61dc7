//! Value and select accessors that work on both form fields and
//! contenteditable elements.
//!
//! The variant is chosen by inspecting the element: native form controls
//! keep their own `value` / `select()` semantics, contenteditable elements go
//! through the markup codec and the Selection API.

use expandable_input_core::{PlatformError, markup_to_text, text_to_markup};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::contenteditable::is_editable;
use crate::cursor::select_node_contents;

/// A native form control.
#[derive(Clone, Debug)]
pub enum NativeField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

/// Anything with a text value.
#[derive(Clone, Debug)]
pub enum Field {
    Native(NativeField),
    Editable(HtmlElement),
}

impl Field {
    /// Classify an element. Form controls win over contenteditable, so a
    /// text input nested in an editable region keeps its native behaviour.
    /// Returns `None` for elements with no value.
    pub fn from_element(element: &Element) -> Option<Self> {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(Field::Native(NativeField::Input(input.clone())));
        }
        if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Some(Field::Native(NativeField::TextArea(textarea.clone())));
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Some(Field::Native(NativeField::Select(select.clone())));
        }
        element
            .dyn_ref::<HtmlElement>()
            .filter(|el| is_editable(el))
            .map(|el| Field::Editable(el.clone()))
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Field::Editable(_))
    }

    /// Current value as plain text.
    pub fn value(&self) -> String {
        match self {
            Field::Native(NativeField::Input(el)) => el.value(),
            Field::Native(NativeField::TextArea(el)) => el.value(),
            Field::Native(NativeField::Select(el)) => el.value(),
            Field::Editable(el) => markup_to_text(&el.inner_html()),
        }
    }

    /// Set the value. `None` clears it.
    pub fn set_value(&self, value: Option<&str>) {
        let value = value.unwrap_or_default();
        match self {
            Field::Native(NativeField::Input(el)) => el.set_value(value),
            Field::Native(NativeField::TextArea(el)) => el.set_value(value),
            Field::Native(NativeField::Select(el)) => el.set_value(value),
            Field::Editable(el) => el.set_inner_html(&text_to_markup(value)),
        }
    }

    /// Select the whole value.
    ///
    /// `<select>` elements have no text selection, so this is a no-op there.
    pub fn select(&self) -> Result<(), PlatformError> {
        match self {
            Field::Native(NativeField::Input(el)) => el.select(),
            Field::Native(NativeField::TextArea(el)) => el.select(),
            Field::Native(NativeField::Select(_)) => {}
            Field::Editable(el) => select_node_contents(el)?,
        }
        Ok(())
    }
}
