//! Yew components mounted into the static page: the price estimator, the
//! contact form and the scroll-to-top button.

use crate::config::{CONTACT_RECIPIENT, SCROLL_TOP_THRESHOLD_PX};
use crate::hooks::{use_scrolled_past, use_validated_field, ValidatedField};
use crate::utils::{event_value, scroll_to_top, sync_validity};
use log::{debug, warn};
use uce_monitoring::contact::{ContactField, ContactMessage};
use uce_monitoring::page::FormValidation;
use uce_monitoring::{estimate, FacilityType, PriceEstimateInput, DISCLAIMER, ESTIMATE_LABEL, PRICE_SUFFIX};
use web_sys::{HtmlElement, HtmlInputElement};
use yew::prelude::*;

/// Price estimator form. The estimate is recomputed on every render, so it
/// is shown on first mount and after every change of the controls.
#[function_component(PriceCalculator)]
pub fn price_calculator() -> Html {
    let facility = use_state(|| FacilityType::default().form_value().to_string());
    let surface = use_state(String::new);
    let instrumentation = use_state(|| false);

    let input = PriceEstimateInput::from_form_values(&facility, &surface, *instrumentation);
    let result = estimate(&input);

    {
        let price = result.annual_price_ron;
        use_effect_with(input, move |input| {
            debug!("Estimated {:?} at {} RON/year", input, price);
            || ()
        });
    }

    let on_facility_change = {
        let facility = facility.clone();
        Callback::from(move |e: Event| facility.set(event_value(&e)))
    };
    let on_surface_input = {
        let surface = surface.clone();
        Callback::from(move |e: InputEvent| surface.set(event_value(&e)))
    };
    let on_instrumentation_change = {
        let instrumentation = instrumentation.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            instrumentation.set(input.checked());
        })
    };

    html! {
        <div class="calculator">
            <form id="calc-form" class="calc-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                <div class="form-group">
                    <label for="calc-tip">{ "Tip clădire:" }</label>
                    <select id="calc-tip" name="tip" onchange={on_facility_change}>
                        { FacilityType::ALL.iter().map(|ft| html! {
                            <option value={ft.form_value()} selected={ft.form_value() == facility.as_str()}>
                                { ft.label() }
                            </option>
                        }).collect::<Html>() }
                    </select>
                </div>
                <div class="form-group">
                    <label for="calc-sup">{ "Suprafață (m²):" }</label>
                    <input type="number"
                        id="calc-sup"
                        name="sup"
                        min="0"
                        step="1"
                        placeholder="0"
                        value={(*surface).clone()}
                        oninput={on_surface_input}
                    />
                </div>
                <div class="form-group checkbox-group">
                    <label>
                        <input type="checkbox"
                            name="instr"
                            checked={*instrumentation}
                            onchange={on_instrumentation_change}
                        />
                        { "Instrumentare de bază (1 sesiune)" }
                    </label>
                </div>
            </form>
            <div id="calc-output" class="calc-output" aria-live="polite">
                <div class="calc-result" aria-label={result.display_text.clone()}>
                    <strong>{ ESTIMATE_LABEL }</strong>
                    { format!(" ~{} {}", result.formatted_price, PRICE_SUFFIX) }
                    <div class="calc-note">{ DISCLAIMER }</div>
                </div>
            </div>
        </div>
    }
}

fn render_field(field: &ValidatedField, show_error: bool, onblur: Callback<FocusEvent>) -> Html {
    let id = format!("contact-{}", field.field.form_name());
    let name = field.field.form_name();
    let required = field.field.is_required();
    let class = classes!((show_error && field.error.is_some()).then_some("invalid"));

    let control = match field.field {
        ContactField::Message => html! {
            <textarea id={id.clone()}
                name={name}
                rows="5"
                required={required}
                class={class}
                value={field.text.clone()}
                ref={field.node.clone()}
                oninput={field.on_text_input.clone()}
                onblur={onblur}
            />
        },
        other => {
            let kind = match other {
                ContactField::Email => "email",
                ContactField::Phone => "tel",
                _ => "text",
            };
            html! {
                <input type={kind}
                    id={id.clone()}
                    name={name}
                    required={required}
                    class={class}
                    value={field.text.clone()}
                    ref={field.node.clone()}
                    oninput={field.on_text_input.clone()}
                    onblur={onblur}
                />
            }
        }
    };

    html! {
        <div class="form-group">
            <label for={id}>
                { field.field.label() }
                if required { <span class="required">{ " *" }</span> }
            </label>
            { control }
            if show_error {
                if let Some(ref err) = field.error {
                    <div class="input-error">{ err.to_string() }</div>
                }
            }
        </div>
    }
}

/// Contact form that hands the message to the visitor's mail client.
#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let name = use_validated_field(ContactField::Name);
    let email = use_validated_field(ContactField::Email);
    let phone = use_validated_field(ContactField::Phone);
    let subject = use_validated_field(ContactField::Subject);
    let body = use_validated_field(ContactField::Message);
    let fields = [name, email, phone, subject, body];
    let validation = use_state(FormValidation::default);
    let status = use_state(|| None::<String>);

    let mut message = ContactMessage::default();
    for field in &fields {
        message.set(field.field, field.text.clone());
    }

    // Every edit re-syncs the native validity of each control, and editing
    // the form back into a valid state clears the submitted mark
    {
        let validation = validation.clone();
        let validities: Vec<(NodeRef, String)> = fields
            .iter()
            .map(|f| (f.node.clone(), f.error.as_ref().map(|e| e.to_string()).unwrap_or_default()))
            .collect();
        use_effect_with(message.clone(), move |message| {
            for (node, error) in &validities {
                sync_validity(node, error, false);
            }
            let mut current = *validation;
            if current.on_input(message.is_valid()) {
                validation.set(current);
            }
            || ()
        });
    }

    let onsubmit = {
        let validation = validation.clone();
        let status = status.clone();
        let message = message.clone();
        let nodes: Vec<(ContactField, NodeRef)> =
            fields.iter().map(|f| (f.field, f.node.clone())).collect();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut current = *validation;
            let may_send = current.submit(message.is_valid());
            validation.set(current);

            if !may_send {
                if let Some(first) = message.first_invalid() {
                    debug!("Contact form blocked, first invalid field: {:?}", first);
                    if let Some(element) = nodes
                        .iter()
                        .find(|(field, _)| *field == first)
                        .and_then(|(_, node)| node.cast::<HtmlElement>())
                    {
                        let _ = element.focus();
                    }
                }
                return;
            }

            let url = message.mailto_url(CONTACT_RECIPIENT);
            if let Err(err) = gloo_utils::window().location().set_href(&url) {
                warn!("Could not open mail client: {:?}", err);
            }
            status.set(Some(format!(
                "S-a deschis clientul de e-mail pentru trimitere. Dacă nu se deschide, scrie-ne direct la {}.",
                CONTACT_RECIPIENT
            )));
        })
    };

    let show_errors = validation.submitted();

    html! {
        <form id="contact-form"
            class={classes!("contact-form", show_errors.then_some("submitted"))}
            novalidate={true}
            {onsubmit}
        >
            { fields.iter().map(|field| {
                let onblur = {
                    let validation = validation.clone();
                    let node = field.node.clone();
                    let error = field.error.as_ref().map(|e| e.to_string()).unwrap_or_default();
                    Callback::from(move |_: FocusEvent| {
                        let report = validation.should_report_on_blur(error.is_empty());
                        sync_validity(&node, &error, report);
                    })
                };
                render_field(field, show_errors, onblur)
            }).collect::<Html>() }

            <button type="submit" class="btn-primary">{ "Trimite" }</button>

            if let Some(ref text) = *status {
                <p id="form-status" class="form-status success">{ text }</p>
            }
        </form>
    }
}

/// Floating button that appears once the page is scrolled down.
#[function_component(ScrollToTop)]
pub fn scroll_to_top_button() -> Html {
    let visible = use_scrolled_past(SCROLL_TOP_THRESHOLD_PX);

    html! {
        <button id="scroll-to-top"
            type="button"
            class="scroll-to-top"
            aria-label="Înapoi sus"
            style={if visible { "display: flex" } else { "display: none" }}
            onclick={Callback::from(|_: MouseEvent| scroll_to_top())}
        >
            { "↑" }
        </button>
    }
}
