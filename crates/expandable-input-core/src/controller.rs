//! The expandable input controller.
//!
//! `ExpandableInput` reacts to the events a contenteditable element receives
//! so it behaves like a native text field: it cleans up residual empty lines,
//! fires `change` on blur, selects everything when tabbed into and pastes
//! plain text only. Each reaction is independent; there is no state machine
//! beyond the value captured on focus.

use std::fmt;
use std::str::FromStr;

use crate::config::ExpandableConfig;
use crate::error::ExpandableError;
use crate::markup::{is_empty_line_placeholder, markup_to_text, text_pieces, text_to_markup};
use crate::platform::{
    Capabilities, ClipboardSource, DisplayMode, EditableHost, PlatformError, resolve_paste_text,
};

/// Operations callable by name on an attached element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Select all content.
    Select,
    /// Clear residual empty-line markup.
    Cleanup,
    /// Re-apply display classes and minimum width.
    Refresh,
    /// Undo styling and detach.
    Destroy,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Select => "select",
            Operation::Cleanup => "cleanup",
            Operation::Refresh => "refresh",
            Operation::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ExpandableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Operation::Select),
            "cleanup" => Ok(Operation::Cleanup),
            "refresh" => Ok(Operation::Refresh),
            "destroy" => Ok(Operation::Destroy),
            other => Err(ExpandableError::UnknownOperation(other.to_string())),
        }
    }
}

/// What a paste ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Inserted through the engine's insert-text command.
    Command(String),
    /// Inserted by replacing the selection with built nodes.
    Fragment(String),
    /// Nothing to insert (no clipboard data, prompt dismissed).
    Nothing,
}

/// Widget state for one contenteditable element.
pub struct ExpandableInput<H> {
    host: H,
    config: ExpandableConfig,
    capabilities: Capabilities,
    display: DisplayMode,
    value_on_focus: Option<String>,
}

impl<H: EditableHost> ExpandableInput<H> {
    /// Attach to a host and run one-time initialization.
    pub fn attach(host: H, config: ExpandableConfig, capabilities: Capabilities) -> Self {
        let mut input = Self {
            host,
            config,
            capabilities,
            display: DisplayMode::default(),
            value_on_focus: None,
        };
        input.copy_name();
        input.init_styling();
        if input.capabilities.needs_deferred_ready_class() {
            log_failure(
                "add ready class",
                input.host.add_class_deferred(&input.config.ready_class),
            );
        }
        input
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &ExpandableConfig {
        &self.config
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display
    }

    /// Plain text value of the element.
    pub fn value(&self) -> String {
        markup_to_text(&self.host.inner_markup())
    }

    /// Replace the content with a plain text value. `None` clears it.
    pub fn set_value(&self, text: Option<&str>) {
        self.host.set_inner_markup(&text_to_markup(text.unwrap_or_default()));
    }

    pub fn select_all(&self) -> Result<(), PlatformError> {
        self.host.select_contents()
    }

    // === Event reactions ===

    /// Content changed. Returns whether a residual empty line was cleared.
    pub fn handle_input(&mut self) -> bool {
        let markup = self.host.inner_markup();
        if is_empty_line_placeholder(&markup) {
            tracing::trace!(%markup, "clearing empty-line placeholder");
            self.host.set_inner_markup("");
            true
        } else {
            false
        }
    }

    pub fn handle_focus(&mut self) {
        self.value_on_focus = Some(self.value());
    }

    /// Returns whether a change notification was fired.
    pub fn handle_blur(&mut self) -> bool {
        let changed = self.take_blur_change();
        if changed {
            log_failure("notify change", self.host.notify_change());
        }
        changed
    }

    /// Consume the focus snapshot and report whether the value differs from
    /// it, without notifying.
    ///
    /// For callers that must release the controller before `change`
    /// listeners run.
    pub fn take_blur_change(&mut self) -> bool {
        let before = self.value_on_focus.take().unwrap_or_default();
        let after = self.value();
        if after == before {
            return false;
        }
        tracing::trace!(before_len = before.len(), after_len = after.len(), "value changed on blur");
        true
    }

    /// Returns whether the content was selected.
    pub fn handle_keyup(&mut self, key_code: u32) -> bool {
        if key_code != self.config.select_on_key_code {
            return false;
        }
        log_failure("select contents", self.select_all());
        true
    }

    /// Insert clipboard text as plain text. The caller suppresses the
    /// browser's default paste.
    pub fn handle_paste<C: ClipboardSource + ?Sized>(&mut self, clipboard: &C) -> PasteOutcome {
        let Some(text) = resolve_paste_text(clipboard, &self.config.paste_prompt) else {
            tracing::debug!("paste had no text");
            return PasteOutcome::Nothing;
        };

        if self.capabilities.insert_text_command {
            match self.host.insert_text_command(&text) {
                Ok(true) => return PasteOutcome::Command(text),
                Ok(false) => tracing::debug!("insertText refused, falling back to range insert"),
                Err(e) => tracing::warn!("insertText failed: {e}"),
            }
        }

        match self.host.replace_selection(&text_pieces(&text)) {
            Ok(()) => PasteOutcome::Fragment(text),
            Err(e) => {
                tracing::warn!("paste insert failed: {e}");
                PasteOutcome::Nothing
            }
        }
    }

    /// Run a named operation.
    pub fn invoke(&mut self, operation: Operation) -> Result<(), ExpandableError> {
        tracing::debug!(%operation, "invoking operation");
        match operation {
            Operation::Select => self.select_all()?,
            Operation::Cleanup => {
                self.handle_input();
            }
            Operation::Refresh => {
                self.host.set_min_width(None)?;
                self.init_styling();
            }
            Operation::Destroy => self.teardown()?,
        }
        Ok(())
    }

    // === Internal ===

    fn copy_name(&self) {
        if let Some(name) = self.host.name_attribute().filter(|n| !n.is_empty()) {
            log_failure("set name", self.host.set_name_property(&name));
        }
    }

    /// Tag the element with its display class and pin its minimum width so
    /// it does not shrink below the initial size.
    fn init_styling(&mut self) {
        self.display = self
            .host
            .computed_display()
            .map(|d| DisplayMode::from_css(&d))
            .unwrap_or_default();

        let (add, remove) = match self.display {
            DisplayMode::Inline => (&self.config.inline_class, &self.config.block_class),
            DisplayMode::Block => (&self.config.block_class, &self.config.inline_class),
        };
        log_failure("remove display class", self.host.remove_class(remove));
        log_failure("add display class", self.host.add_class(add));

        let min_width = format!("{}px", self.host.outer_width());
        log_failure("set min-width", self.host.set_min_width(Some(&min_width)));
    }

    fn teardown(&mut self) -> Result<(), PlatformError> {
        self.host.remove_class(&self.config.inline_class)?;
        self.host.remove_class(&self.config.block_class)?;
        self.host.remove_class(&self.config.ready_class)?;
        self.host.set_min_width(None)?;
        self.value_on_focus = None;
        Ok(())
    }
}

fn log_failure(what: &str, result: Result<(), PlatformError>) {
    if let Err(e) = result {
        tracing::warn!("{what} failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;

    use super::*;
    use crate::markup::TextPiece;

    #[derive(Default)]
    struct MockHost {
        name_attr: Option<String>,
        name_prop: RefCell<Option<String>>,
        display: Option<String>,
        width: f64,
        classes: RefCell<BTreeSet<String>>,
        deferred: RefCell<Vec<String>>,
        min_width: RefCell<Option<String>>,
        markup: RefCell<String>,
        selected_all: Cell<u32>,
        changes: Cell<u32>,
        accept_command: bool,
        commands: RefCell<Vec<String>>,
        fragments: RefCell<Vec<Vec<String>>>,
    }

    impl MockHost {
        fn with_markup(markup: &str) -> Self {
            Self {
                markup: RefCell::new(markup.to_string()),
                accept_command: true,
                ..Default::default()
            }
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().contains(class)
        }
    }

    impl EditableHost for MockHost {
        fn name_attribute(&self) -> Option<String> {
            self.name_attr.clone()
        }

        fn set_name_property(&self, name: &str) -> Result<(), PlatformError> {
            *self.name_prop.borrow_mut() = Some(name.to_string());
            Ok(())
        }

        fn computed_display(&self) -> Option<String> {
            self.display.clone()
        }

        fn add_class(&self, class: &str) -> Result<(), PlatformError> {
            self.classes.borrow_mut().insert(class.to_string());
            Ok(())
        }

        fn remove_class(&self, class: &str) -> Result<(), PlatformError> {
            self.classes.borrow_mut().remove(class);
            Ok(())
        }

        fn add_class_deferred(&self, class: &str) -> Result<(), PlatformError> {
            self.deferred.borrow_mut().push(class.to_string());
            Ok(())
        }

        fn outer_width(&self) -> f64 {
            self.width
        }

        fn set_min_width(&self, value: Option<&str>) -> Result<(), PlatformError> {
            *self.min_width.borrow_mut() = value.map(String::from);
            Ok(())
        }

        fn inner_markup(&self) -> String {
            self.markup.borrow().clone()
        }

        fn set_inner_markup(&self, markup: &str) {
            *self.markup.borrow_mut() = markup.to_string();
        }

        fn select_contents(&self) -> Result<(), PlatformError> {
            self.selected_all.set(self.selected_all.get() + 1);
            Ok(())
        }

        fn insert_text_command(&self, text: &str) -> Result<bool, PlatformError> {
            if self.accept_command {
                self.commands.borrow_mut().push(text.to_string());
            }
            Ok(self.accept_command)
        }

        fn replace_selection(&self, pieces: &[TextPiece<'_>]) -> Result<(), PlatformError> {
            let nodes = pieces
                .iter()
                .map(|p| match p {
                    TextPiece::Text(t) => t.to_string(),
                    TextPiece::LineBreak => "<br>".to_string(),
                })
                .collect();
            self.fragments.borrow_mut().push(nodes);
            Ok(())
        }

        fn notify_change(&self) -> Result<(), PlatformError> {
            self.changes.set(self.changes.get() + 1);
            Ok(())
        }
    }

    struct Clipboard(Option<&'static str>);

    impl ClipboardSource for Clipboard {
        fn event_text(&self) -> Option<String> {
            self.0.map(String::from)
        }

        fn legacy_text(&self) -> Option<String> {
            None
        }

        fn prompt(&self, _message: &str) -> Option<String> {
            None
        }
    }

    fn attach(host: MockHost) -> ExpandableInput<MockHost> {
        ExpandableInput::attach(host, ExpandableConfig::default(), Capabilities::default())
    }

    // === Initialization ===

    #[test]
    fn test_attach_copies_name() {
        let host = MockHost {
            name_attr: Some("title".into()),
            ..MockHost::with_markup("")
        };
        let input = attach(host);
        assert_eq!(input.host().name_prop.borrow().as_deref(), Some("title"));
    }

    #[test]
    fn test_attach_skips_empty_name() {
        let host = MockHost {
            name_attr: Some(String::new()),
            ..MockHost::with_markup("")
        };
        let input = attach(host);
        assert_eq!(*input.host().name_prop.borrow(), None);
    }

    #[test]
    fn test_inline_display_gets_inline_class() {
        for display in ["inline", "inline-block"] {
            let host = MockHost {
                display: Some(display.into()),
                ..MockHost::with_markup("")
            };
            let input = attach(host);
            assert_eq!(input.display_mode(), DisplayMode::Inline);
            assert!(input.host().has_class("contenteditable-inline"));
            assert!(!input.host().has_class("contenteditable-block"));
        }
    }

    #[test]
    fn test_block_display_gets_block_class() {
        let host = MockHost {
            display: Some("block".into()),
            ..MockHost::with_markup("")
        };
        let input = attach(host);
        assert_eq!(input.display_mode(), DisplayMode::Block);
        assert!(input.host().has_class("contenteditable-block"));
    }

    #[test]
    fn test_attach_pins_min_width() {
        let host = MockHost {
            width: 120.5,
            ..MockHost::with_markup("")
        };
        let input = attach(host);
        assert_eq!(input.host().min_width.borrow().as_deref(), Some("120.5px"));
    }

    #[test]
    fn test_ready_class_deferred_only_for_legacy_engines() {
        let input = attach(MockHost::with_markup(""));
        assert!(input.host().deferred.borrow().is_empty());

        let legacy = Capabilities {
            insert_text_command: false,
        };
        let input =
            ExpandableInput::attach(MockHost::with_markup(""), ExpandableConfig::default(), legacy);
        assert_eq!(*input.host().deferred.borrow(), vec!["expandable-initialised".to_string()]);
        // Not applied synchronously.
        assert!(!input.host().has_class("expandable-initialised"));
    }

    // === Input ===

    #[test]
    fn test_input_clears_lone_br() {
        let mut input = attach(MockHost::with_markup("<br>"));
        assert!(input.handle_input());
        assert_eq!(input.host().inner_markup(), "");
    }

    #[test]
    fn test_input_clears_empty_div_line() {
        let mut input = attach(MockHost::with_markup("<div><br></div>"));
        assert!(input.handle_input());
        assert_eq!(input.host().inner_markup(), "");
    }

    #[test]
    fn test_input_keeps_real_content() {
        let mut input = attach(MockHost::with_markup("a<br>"));
        assert!(!input.handle_input());
        assert_eq!(input.host().inner_markup(), "a<br>");
    }

    // === Focus / blur ===

    #[test]
    fn test_blur_without_change_is_silent() {
        let mut input = attach(MockHost::with_markup("same"));
        input.handle_focus();
        assert!(!input.handle_blur());
        assert_eq!(input.host().changes.get(), 0);
    }

    #[test]
    fn test_blur_after_change_notifies_once() {
        let mut input = attach(MockHost::with_markup("before"));
        input.handle_focus();
        input.host().set_inner_markup("after");
        assert!(input.handle_blur());
        assert_eq!(input.host().changes.get(), 1);

        // A second blur without a new focus compares against empty.
        assert!(input.handle_blur());
        assert_eq!(input.host().changes.get(), 2);
    }

    #[test]
    fn test_take_blur_change_does_not_notify() {
        let mut input = attach(MockHost::with_markup("before"));
        input.handle_focus();
        input.host().set_inner_markup("after");
        assert!(input.take_blur_change());
        assert_eq!(input.host().changes.get(), 0);

        // The snapshot was consumed.
        input.host().set_inner_markup("");
        assert!(!input.take_blur_change());
    }

    #[test]
    fn test_markup_only_change_is_not_a_change() {
        let mut input = attach(MockHost::with_markup("word"));
        input.handle_focus();
        input.host().set_inner_markup("<b>word</b>");
        assert!(!input.handle_blur());
    }

    // === Keyup ===

    #[test]
    fn test_tab_keyup_selects_all() {
        let mut input = attach(MockHost::with_markup("text"));
        assert!(input.handle_keyup(9));
        assert_eq!(input.host().selected_all.get(), 1);
    }

    #[test]
    fn test_other_keyup_does_nothing() {
        let mut input = attach(MockHost::with_markup("text"));
        assert!(!input.handle_keyup(13));
        assert_eq!(input.host().selected_all.get(), 0);
    }

    // === Paste ===

    #[test]
    fn test_paste_uses_insert_text_command() {
        let mut input = attach(MockHost::with_markup(""));
        let outcome = input.handle_paste(&Clipboard(Some("<b>plain</b>")));
        assert_eq!(outcome, PasteOutcome::Command("<b>plain</b>".into()));
        assert_eq!(*input.host().commands.borrow(), vec!["<b>plain</b>".to_string()]);
        assert!(input.host().fragments.borrow().is_empty());
    }

    #[test]
    fn test_paste_falls_back_to_fragment_when_command_refused() {
        let host = MockHost {
            accept_command: false,
            ..MockHost::with_markup("")
        };
        let mut input = attach(host);
        let outcome = input.handle_paste(&Clipboard(Some("a\nb")));
        assert_eq!(outcome, PasteOutcome::Fragment("a\nb".into()));
        assert_eq!(
            *input.host().fragments.borrow(),
            vec![vec!["a".to_string(), "<br>".to_string(), "b".to_string()]]
        );
    }

    #[test]
    fn test_paste_without_command_capability_builds_fragment() {
        let caps = Capabilities {
            insert_text_command: false,
        };
        let mut input =
            ExpandableInput::attach(MockHost::with_markup(""), ExpandableConfig::default(), caps);
        let outcome = input.handle_paste(&Clipboard(Some("x")));
        assert_eq!(outcome, PasteOutcome::Fragment("x".into()));
        assert!(input.host().commands.borrow().is_empty());
    }

    #[test]
    fn test_paste_nothing_inserts_nothing() {
        let mut input = attach(MockHost::with_markup(""));
        assert_eq!(input.handle_paste(&Clipboard(None)), PasteOutcome::Nothing);
        assert!(input.host().commands.borrow().is_empty());
        assert!(input.host().fragments.borrow().is_empty());
    }

    // === Value accessors ===

    #[test]
    fn test_value_get_set() {
        let input = attach(MockHost::with_markup(""));
        input.set_value(Some("a  b\nc"));
        assert_eq!(input.host().inner_markup(), "a &nbsp;b<br>c");
        assert_eq!(input.value(), "a  b\nc");

        input.set_value(None);
        assert_eq!(input.host().inner_markup(), "");
        assert_eq!(input.value(), "");
    }

    // === Operations ===

    #[test]
    fn test_parse_operations() {
        assert_eq!("select".parse::<Operation>().unwrap(), Operation::Select);
        assert_eq!("destroy".parse::<Operation>().unwrap(), Operation::Destroy);
        let err = "explode".parse::<Operation>().unwrap_err();
        assert!(matches!(err, ExpandableError::UnknownOperation(ref name) if name == "explode"));
        assert_eq!(err.to_string(), "unknown operation: explode");
    }

    #[test]
    fn test_invoke_select_and_cleanup() {
        let mut input = attach(MockHost::with_markup("<br>"));
        input.invoke(Operation::Select).unwrap();
        assert_eq!(input.host().selected_all.get(), 1);
        input.invoke(Operation::Cleanup).unwrap();
        assert_eq!(input.host().inner_markup(), "");
    }

    #[test]
    fn test_invoke_refresh_reclassifies() {
        let host = MockHost {
            display: Some("inline".into()),
            width: 10.0,
            ..MockHost::with_markup("")
        };
        let mut input = attach(host);
        assert!(input.host().has_class("contenteditable-inline"));
        input.invoke(Operation::Refresh).unwrap();
        assert!(input.host().has_class("contenteditable-inline"));
        assert_eq!(input.host().min_width.borrow().as_deref(), Some("10px"));
    }

    #[test]
    fn test_invoke_destroy_undoes_styling() {
        let mut input = attach(MockHost::with_markup(""));
        assert!(input.host().has_class("contenteditable-block"));
        input.invoke(Operation::Destroy).unwrap();
        assert!(input.host().classes.borrow().is_empty());
        assert_eq!(*input.host().min_width.borrow(), None);
    }
}
