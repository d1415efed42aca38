use crate::utils::{current_scroll_offset, event_value};
use uce_monitoring::contact::{ContactError, ContactField, ContactMessage};
use uce_monitoring::page::scroll_button_visible;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Holds the state and callbacks for one contact form field.
#[derive(Clone)]
pub struct ValidatedField {
    pub field: ContactField,
    /// The current text content of the control.
    pub text: String,
    /// Why the current text is not acceptable, if it isn't.
    pub error: Option<ContactError>,
    /// The rendered control, for focusing and native validity.
    pub node: NodeRef,
    /// Callback for the control's `oninput` event.
    pub on_text_input: Callback<InputEvent>,
}

/// Custom hook to manage state for a validated contact form field.
#[hook]
pub fn use_validated_field(field: ContactField) -> ValidatedField {
    let text_state_handle: UseStateHandle<String> = use_state(String::new);
    let node = use_node_ref();

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            text_setter.set(event_value(&e));
        })
    };

    let mut probe = ContactMessage::default();
    probe.set(field, (*text_state_handle).clone());
    let error = probe.validate_field(field).err();

    ValidatedField {
        field,
        text: (*text_state_handle).clone(),
        error,
        node,
        on_text_input,
    }
}

/// Whether the window is scrolled further down than `threshold` pixels.
/// Re-renders only when the answer changes.
#[hook]
pub fn use_scrolled_past(threshold: f64) -> bool {
    let visible = use_state_eq(|| scroll_button_visible(current_scroll_offset(), threshold));

    {
        let visible = visible.clone();
        use_effect_with(threshold, move |&threshold| {
            let window = gloo_utils::window();
            let listener = Closure::<dyn FnMut()>::new(move || {
                visible.set(scroll_button_visible(current_scroll_offset(), threshold));
            });
            let registered = window
                .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())
                .is_ok();

            move || {
                if registered {
                    let _ = window.remove_event_listener_with_callback(
                        "scroll",
                        listener.as_ref().unchecked_ref(),
                    );
                }
                drop(listener);
            }
        });
    }

    *visible
}
