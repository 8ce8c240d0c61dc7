//! Plugin-style entry points and the `ExpandableInput` class.

use expandable_input_browser::{
    AutoAttach, ExpandableError, Field, InstanceId, Operation, attach, expandable_input,
    install_auto_attach, instance_id, invoke, sweep_detached,
};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::types::parse_config;

fn to_js(e: ExpandableError) -> JsError {
    JsError::new(&e.to_string())
}

fn field(element: &Element) -> Result<Field, JsError> {
    Field::from_element(element).ok_or_else(|| JsError::new("element has no value"))
}

// === Free functions ===

/// Attach to `element`, or run the operation named by `option`
/// (`"select"`, `"cleanup"`, `"refresh"`, `"destroy"`).
#[wasm_bindgen(js_name = expandableInput)]
pub fn expandable_input_js(
    element: &HtmlElement,
    option: Option<String>,
    config: JsValue,
) -> Result<(), JsError> {
    let config = parse_config(config)?;
    expandable_input(element, option.as_deref(), config).map_err(to_js)
}

/// Value of a form field or contenteditable element as plain text.
#[wasm_bindgen]
pub fn val(element: &Element) -> Result<String, JsError> {
    Ok(field(element)?.value())
}

/// Set the value of a form field or contenteditable element.
/// `undefined` clears it.
#[wasm_bindgen(js_name = setVal)]
pub fn set_val(element: &Element, value: Option<String>) -> Result<(), JsError> {
    field(element)?.set_value(value.as_deref());
    Ok(())
}

/// Select the whole value of a form field or contenteditable element.
#[wasm_bindgen]
pub fn select(element: &Element) -> Result<(), JsError> {
    field(element)?
        .select()
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Release instances whose elements have left the document.
#[wasm_bindgen(js_name = sweepDetached)]
pub fn sweep_detached_js() -> usize {
    sweep_detached()
}

/// Attach to `[contenteditable]` elements on their first focus.
///
/// Keep the returned handle alive, or call `forget()` on it.
#[wasm_bindgen(js_name = installAutoAttach)]
pub fn install_auto_attach_js(config: JsValue) -> Result<JsAutoAttach, JsError> {
    let config = parse_config(config)?;
    let guard = install_auto_attach(&gloo_utils::document(), config);
    tracing::debug!("auto-attach installed");
    Ok(JsAutoAttach { guard: Some(guard) })
}

/// Handle for the document-level auto-attach listener.
#[wasm_bindgen]
pub struct JsAutoAttach {
    guard: Option<AutoAttach>,
}

#[wasm_bindgen]
impl JsAutoAttach {
    /// Remove the listener. Already attached elements stay attached.
    pub fn uninstall(&mut self) {
        if self.guard.take().is_some() {
            tracing::debug!("auto-attach uninstalled");
        }
    }

    /// Keep the listener for the lifetime of the page.
    pub fn forget(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.forget();
        }
    }
}

// === ExpandableInput class ===

/// An attached expandable input.
#[wasm_bindgen(js_name = ExpandableInput)]
pub struct JsExpandableInput {
    element: HtmlElement,
    id: InstanceId,
}

#[wasm_bindgen(js_class = ExpandableInput)]
impl JsExpandableInput {
    /// Attach to a contenteditable element.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, config: JsValue) -> Result<JsExpandableInput, JsError> {
        let config = parse_config(config)?;
        let id = attach(&element, config).map_err(to_js)?;
        Ok(Self { element, id })
    }

    #[wasm_bindgen(getter)]
    pub fn element(&self) -> HtmlElement {
        self.element.clone()
    }

    /// Whether this handle's instance is still attached.
    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        instance_id(&self.element) == Some(self.id)
    }

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        Field::Editable(self.element.clone()).value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_value(&self, value: Option<String>) {
        Field::Editable(self.element.clone()).set_value(value.as_deref());
    }

    pub fn select(&self) -> Result<(), JsError> {
        self.run(Operation::Select)
    }

    /// Clear leftover empty-line markup.
    pub fn cleanup(&self) -> Result<(), JsError> {
        self.run(Operation::Cleanup)
    }

    /// Re-measure and re-apply display classes.
    pub fn refresh(&self) -> Result<(), JsError> {
        self.run(Operation::Refresh)
    }

    /// Remove classes, listeners and instance state.
    pub fn destroy(&self) -> Result<(), JsError> {
        self.run(Operation::Destroy)
    }
}

impl JsExpandableInput {
    fn run(&self, operation: Operation) -> Result<(), JsError> {
        if operation != Operation::Destroy && !self.is_attached() {
            return Err(JsError::new("expandable input was destroyed"));
        }
        invoke(&self.element, operation).map_err(to_js)
    }
}
