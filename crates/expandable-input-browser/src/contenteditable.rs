//! `EditableHost` implementation over a DOM element.

use expandable_input_core::{EditableHost, PlatformError, TextPiece};
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::cursor::{exec_insert_text, replace_selection_with, select_node_contents};

/// A contenteditable element driven by an `ExpandableInput`.
#[derive(Clone, Debug)]
pub struct DomHost {
    element: HtmlElement,
}

impl DomHost {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

/// Whether an element should be treated as a contenteditable field.
///
/// Accepts a `contenteditable` attribute other than `"false"` as well as the
/// computed `isContentEditable`, since the latter is false for elements not
/// yet in the document.
pub fn is_editable(element: &HtmlElement) -> bool {
    element.is_content_editable()
        || element
            .get_attribute("contenteditable")
            .is_some_and(|v| !v.eq_ignore_ascii_case("false"))
}

fn js_err(what: &str, e: JsValue) -> PlatformError {
    PlatformError(format!("{what} failed: {:?}", e))
}

impl EditableHost for DomHost {
    fn name_attribute(&self) -> Option<String> {
        self.element.get_attribute("name")
    }

    fn set_name_property(&self, name: &str) -> Result<(), PlatformError> {
        js_sys::Reflect::set(
            &self.element,
            &JsValue::from_str("name"),
            &JsValue::from_str(name),
        )
        .map_err(|e| js_err("set name", e))?;
        Ok(())
    }

    fn computed_display(&self) -> Option<String> {
        let window = web_sys::window()?;
        let style = window.get_computed_style(&self.element).ok()??;
        style.get_property_value("display").ok()
    }

    fn add_class(&self, class: &str) -> Result<(), PlatformError> {
        self.element
            .class_list()
            .add_1(class)
            .map_err(|e| js_err("classList.add", e))
    }

    fn remove_class(&self, class: &str) -> Result<(), PlatformError> {
        self.element
            .class_list()
            .remove_1(class)
            .map_err(|e| js_err("classList.remove", e))
    }

    fn add_class_deferred(&self, class: &str) -> Result<(), PlatformError> {
        let element = self.element.clone();
        let class = class.to_string();
        gloo_timers::callback::Timeout::new(0, move || {
            if let Err(e) = element.class_list().add_1(&class) {
                tracing::warn!("deferred classList.add failed: {:?}", e);
            }
        })
        .forget();
        Ok(())
    }

    fn outer_width(&self) -> f64 {
        self.element.get_bounding_client_rect().width()
    }

    fn set_min_width(&self, value: Option<&str>) -> Result<(), PlatformError> {
        let style = self.element.style();
        match value {
            Some(value) => style
                .set_property("min-width", value)
                .map_err(|e| js_err("set min-width", e)),
            None => style
                .remove_property("min-width")
                .map(|_| ())
                .map_err(|e| js_err("remove min-width", e)),
        }
    }

    fn inner_markup(&self) -> String {
        self.element.inner_html()
    }

    fn set_inner_markup(&self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn select_contents(&self) -> Result<(), PlatformError> {
        select_node_contents(&self.element)
    }

    fn insert_text_command(&self, text: &str) -> Result<bool, PlatformError> {
        exec_insert_text(text)
    }

    fn replace_selection(&self, pieces: &[TextPiece<'_>]) -> Result<(), PlatformError> {
        replace_selection_with(pieces)
    }

    fn notify_change(&self) -> Result<(), PlatformError> {
        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        let event = web_sys::Event::new_with_event_init_dict("change", &init)
            .map_err(|e| js_err("create change event", e))?;
        self.element
            .dispatch_event(&event)
            .map_err(|e| js_err("dispatch change", e))?;
        Ok(())
    }
}
