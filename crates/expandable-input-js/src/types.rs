//! Types exposed to JavaScript via wasm-bindgen.

use expandable_input_core::{ExpandableConfig, SmolStr};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Options accepted by `expandableInput` and `installAutoAttach`.
///
/// Every field is optional; missing fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsExpandableConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_class: Option<String>,
    /// Message shown when the clipboard can't be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paste_prompt: Option<String>,
    /// Key code that selects all content on keyup. Defaults to Tab.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_on_key_code: Option<u32>,
}

impl From<JsExpandableConfig> for ExpandableConfig {
    fn from(js: JsExpandableConfig) -> Self {
        let defaults = ExpandableConfig::default();
        ExpandableConfig {
            inline_class: js.inline_class.map(SmolStr::from).unwrap_or(defaults.inline_class),
            block_class: js.block_class.map(SmolStr::from).unwrap_or(defaults.block_class),
            ready_class: js.ready_class.map(SmolStr::from).unwrap_or(defaults.ready_class),
            paste_prompt: js.paste_prompt.map(SmolStr::from).unwrap_or(defaults.paste_prompt),
            select_on_key_code: js.select_on_key_code.unwrap_or(defaults.select_on_key_code),
        }
    }
}

/// Parse an optional config object. `undefined` and `null` give the defaults.
pub fn parse_config(value: JsValue) -> Result<ExpandableConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ExpandableConfig::default());
    }
    let js: JsExpandableConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    let config = ExpandableConfig::from(js);
    config.validate()?;
    Ok(config)
}
