//! Widget configuration.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::ExpandableError;

/// Key code of the Tab key, as reported by `KeyboardEvent.which`.
pub const TAB_KEY_CODE: u32 = 9;

/// Class names and behaviour knobs for an expandable input.
///
/// Deserializes from a camelCase object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpandableConfig {
    /// Added when the element's computed display is inline.
    pub inline_class: SmolStr,
    /// Added for every other display mode.
    pub block_class: SmolStr,
    /// Added one tick after attach on engines that need it.
    pub ready_class: SmolStr,
    /// Message shown when the clipboard cannot be read.
    pub paste_prompt: SmolStr,
    /// Key-up of this key code selects all content.
    pub select_on_key_code: u32,
}

impl Default for ExpandableConfig {
    fn default() -> Self {
        Self {
            inline_class: SmolStr::new_static("contenteditable-inline"),
            block_class: SmolStr::new_static("contenteditable-block"),
            ready_class: SmolStr::new_static("expandable-initialised"),
            paste_prompt: SmolStr::new_static("Paste something.."),
            select_on_key_code: TAB_KEY_CODE,
        }
    }
}

impl ExpandableConfig {
    /// Check that class names can be passed to `classList`.
    pub fn validate(&self) -> Result<(), ExpandableError> {
        for (field, class) in [
            ("inlineClass", &self.inline_class),
            ("blockClass", &self.block_class),
            ("readyClass", &self.ready_class),
        ] {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(ExpandableError::InvalidConfig(format!(
                    "{field} must be a single non-empty class name, got {class:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ExpandableConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.select_on_key_code, 9);
    }

    #[test]
    fn test_rejects_whitespace_class() {
        let config = ExpandableConfig {
            block_class: SmolStr::new("two classes"),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ExpandableError::InvalidConfig(_)));
        assert!(err.to_string().contains("blockClass"));
    }

    #[test]
    fn test_rejects_empty_class() {
        let config = ExpandableConfig {
            ready_class: SmolStr::default(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        insta::assert_yaml_snapshot!(ExpandableConfig::default(), @r#"
        inlineClass: contenteditable-inline
        blockClass: contenteditable-block
        readyClass: expandable-initialised
        pastePrompt: Paste something..
        selectOnKeyCode: 9
        "#);
    }
}
