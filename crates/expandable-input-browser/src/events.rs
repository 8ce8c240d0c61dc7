//! DOM event wiring and per-element instance management.
//!
//! Attached elements carry a `data-expandable-id` attribute pointing into a
//! thread-local `InstanceRegistry`. Each registry entry owns the element's
//! listeners, so removing the entry unbinds them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use expandable_input_core::{
    EditableHost, ExpandableConfig, ExpandableError, ExpandableInput, InstanceId, InstanceRegistry,
    Operation, PlatformError,
};
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::clipboard::BrowserClipboard;
use crate::contenteditable::{DomHost, is_editable};
use crate::platform::capabilities;

/// Attribute holding an element's `InstanceId`.
pub const INSTANCE_ATTRIBUTE: &str = "data-expandable-id";

/// Controller shared between the registry and the element's listeners.
pub type SharedInput = Rc<RefCell<ExpandableInput<DomHost>>>;

struct Attached {
    element: HtmlElement,
    input: SharedInput,
    /// Whether the element has been seen in the document. Elements attached
    /// before insertion are not swept until then.
    seen_connected: Cell<bool>,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static INSTANCES: RefCell<InstanceRegistry<Attached>> = RefCell::new(InstanceRegistry::new());
}

/// The instance attached to `element`, if any.
///
/// The attribute alone is not trusted: cloned nodes copy it, so the entry
/// must point back at this very element.
pub fn instance_id(element: &Element) -> Option<InstanceId> {
    let id: InstanceId = element.get_attribute(INSTANCE_ATTRIBUTE)?.parse().ok()?;
    INSTANCES.with_borrow(|registry| {
        registry
            .get(id)
            .filter(|attached| attached.element.is_same_node(Some(element.as_ref())))
            .map(|_| id)
    })
}

/// The controller attached to `element`, if any.
pub fn attached_input(element: &Element) -> Option<SharedInput> {
    let id = instance_id(element)?;
    INSTANCES.with_borrow(|registry| registry.get(id).map(|attached| Rc::clone(&attached.input)))
}

/// Number of live instances.
pub fn live_instances() -> usize {
    INSTANCES.with_borrow(|registry| registry.len())
}

/// Attach the widget to a contenteditable element.
///
/// Idempotent: an already attached element keeps its instance and the given
/// config is ignored.
pub fn attach(element: &HtmlElement, config: ExpandableConfig) -> Result<InstanceId, ExpandableError> {
    if let Some(id) = instance_id(element) {
        return Ok(id);
    }
    if !is_editable(element) {
        return Err(ExpandableError::NotEditable);
    }
    config.validate()?;

    let input = ExpandableInput::attach(DomHost::new(element.clone()), config, *capabilities());
    let input = Rc::new(RefCell::new(input));
    let listeners = bind_listeners(element, &input);

    let id = INSTANCES.with_borrow_mut(|registry| {
        registry.insert(Attached {
            element: element.clone(),
            input,
            seen_connected: Cell::new(element.is_connected()),
            _listeners: listeners,
        })
    });
    if let Err(e) = element.set_attribute(INSTANCE_ATTRIBUTE, &id.to_string()) {
        INSTANCES.with_borrow_mut(|registry| registry.remove(id));
        return Err(PlatformError(format!("set_attribute failed: {:?}", e)).into());
    }

    tracing::debug!(%id, "attached expandable input");
    Ok(id)
}

/// Remove the instance for `element` and unbind its listeners.
///
/// Returns whether anything was attached.
pub fn detach(element: &Element) -> bool {
    let Some(id) = instance_id(element) else {
        return false;
    };
    let removed = INSTANCES.with_borrow_mut(|registry| registry.remove(id));
    if let Err(e) = element.remove_attribute(INSTANCE_ATTRIBUTE) {
        tracing::warn!("remove_attribute failed: {:?}", e);
    }
    tracing::debug!(%id, "detached expandable input");
    removed.is_some()
}

/// Drop instances whose element has left the document.
///
/// Elements that have never been connected since attaching are kept, so an
/// element can be attached before it is inserted. Returns the number of
/// instances released.
pub fn sweep_detached() -> usize {
    let released = INSTANCES.with_borrow_mut(|registry| {
        registry.retain(|_, attached| {
            if attached.element.is_connected() {
                attached.seen_connected.set(true);
                true
            } else {
                !attached.seen_connected.get()
            }
        })
    });
    if released > 0 {
        tracing::debug!(released, "swept detached instances");
    }
    released
}

/// Run a named operation, attaching with the default config first if needed.
pub fn invoke(element: &HtmlElement, operation: Operation) -> Result<(), ExpandableError> {
    if operation == Operation::Destroy && instance_id(element).is_none() {
        return Ok(());
    }
    attach(element, ExpandableConfig::default())?;

    let input = attached_input(element).ok_or(ExpandableError::NotEditable)?;
    input
        .try_borrow_mut()
        .map_err(|_| PlatformError::from("instance is busy handling an event"))?
        .invoke(operation)?;

    if operation == Operation::Destroy {
        detach(element);
    }
    Ok(())
}

/// Attach, or run the operation named by `option`.
///
/// Mirrors the plugin-style entry point: no option attaches, a string
/// names an `Operation`.
pub fn expandable_input(
    element: &HtmlElement,
    option: Option<&str>,
    config: ExpandableConfig,
) -> Result<(), ExpandableError> {
    match option {
        None => attach(element, config).map(|_| ()),
        Some(name) => {
            let operation: Operation = name.parse()?;
            // Destroying an unattached element is a no-op, not attach-then-destroy.
            if operation != Operation::Destroy {
                attach(element, config)?;
            }
            invoke(element, operation)
        }
    }
}

fn bind_listeners(element: &HtmlElement, input: &SharedInput) -> Vec<EventListener> {
    vec![
        on(element, "input", input, EventListenerOptions::default(), |input, _| {
            input.handle_input();
        }),
        on(element, "focus", input, EventListenerOptions::default(), |input, _| {
            input.handle_focus();
        }),
        on_blur(element, input),
        on(element, "keyup", input, EventListenerOptions::default(), |input, event| {
            if let Some(key_event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                input.handle_keyup(key_event.key_code());
            }
        }),
        on(
            element,
            "paste",
            input,
            EventListenerOptions::enable_prevent_default(),
            |input, event| {
                event.prevent_default();
                let clipboard = event
                    .dyn_ref::<web_sys::ClipboardEvent>()
                    .map(BrowserClipboard::from_event)
                    .unwrap_or_else(BrowserClipboard::empty);
                let outcome = input.handle_paste(&clipboard);
                tracing::trace!(?outcome, "paste handled");
            },
        ),
    ]
}

/// Bind one handler.
///
/// Handlers that trigger DOM events synchronously (`insertText` fires
/// `input`) would re-enter the controller; nested events are skipped.
fn on<F>(
    element: &HtmlElement,
    event_type: &'static str,
    input: &SharedInput,
    options: EventListenerOptions,
    handler: F,
) -> EventListener
where
    F: Fn(&mut ExpandableInput<DomHost>, &web_sys::Event) + 'static,
{
    let input = Rc::clone(input);
    EventListener::new_with_options(element, event_type, options, move |event| {
        match input.try_borrow_mut() {
            Ok(mut input) => handler(&mut input, event),
            Err(_) => tracing::trace!(event_type, "instance busy, skipping nested event"),
        }
    })
}

/// Blur listener. `change` is dispatched after the controller is released,
/// so `change` listeners may run operations on (or destroy) the instance.
fn on_blur(element: &HtmlElement, input: &SharedInput) -> EventListener {
    let input = Rc::clone(input);
    EventListener::new(element, "blur", move |_| {
        let host = match input.try_borrow_mut() {
            Ok(mut input) => input.take_blur_change().then(|| input.host().clone()),
            Err(_) => {
                tracing::trace!("instance busy, skipping nested blur");
                None
            }
        };
        if let Some(host) = host {
            if let Err(e) = host.notify_change() {
                tracing::warn!("notify change failed: {e}");
            }
        }
    })
}

/// Guard for the document-level auto-attach listener. Dropping it uninstalls
/// the listener.
pub struct AutoAttach {
    listener: EventListener,
}

impl AutoAttach {
    /// Keep the listener installed for the lifetime of the page.
    pub fn forget(self) {
        self.listener.forget();
    }
}

/// Attach the widget to any `[contenteditable]` element on its first focus.
///
/// Listens in the capture phase on the document. The target's listener list
/// is only read once dispatch reaches it, so the focus listener bound here
/// still sees the event that triggered the attach.
pub fn install_auto_attach(document: &Document, config: ExpandableConfig) -> AutoAttach {
    let listener = EventListener::new_with_options(
        document,
        "focus",
        EventListenerOptions::run_in_capture_phase(),
        move |event| {
            let Some(element) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            if !element.has_attribute("contenteditable") || instance_id(&element).is_some() {
                return;
            }

            match attach(&element, config.clone()) {
                Ok(id) => tracing::trace!(%id, "auto-attached on focus"),
                Err(ExpandableError::NotEditable) => {}
                Err(e) => tracing::warn!("auto-attach failed: {e}"),
            }
        },
    );
    AutoAttach { listener }
}
