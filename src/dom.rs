//! Enhancements applied directly to the static page markup: nav
//! highlighting and toggle, WhatsApp buttons, lazy images and the
//! development load-time log.
//!
//! Listeners registered here are leaked on purpose; they live as long as the
//! page does.

use crate::config::*;
use crate::utils::scroll_to_top;
use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use uce_monitoring::contact::whatsapp_url;
use uce_monitoring::page::{nav_link_selector, page_load_ms, ActiveSections};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, PerformanceNavigationTiming, Window,
};

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn on_event(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Observe `targets` and hand every intersection entry to `on_entry`.
fn observe_all(
    targets: &[Element],
    root_margin: Option<&str>,
    mut on_entry: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_entry(&entry, &observer);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    options.set_threshold(&JsValue::from_f64(0.0));

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for target in targets {
        observer.observe(target);
    }
    callback.forget();
    Ok(())
}

/// Highlight the nav link of the section in view, make the brand scroll to
/// the top and wire the mobile menu toggle.
pub fn enhance_navigation(document: &Document) -> Result<(), JsValue> {
    let sections = query_all(document, SECTION_SELECTOR)?;
    if !sections.is_empty() {
        let doc = document.clone();
        let mut active = ActiveSections::default();
        observe_all(&sections, Some(NAV_ROOT_MARGIN), move |entry, _| {
            let id = entry.target().id();
            if !active.update(&id, entry.is_intersecting()) {
                return;
            }
            if let Ok(Some(link)) = doc.query_selector(&nav_link_selector(&id)) {
                let _ = link
                    .class_list()
                    .toggle_with_force(ACTIVE_CLASS, active.is_active(&id));
            }
        })?;
        debug!("Observing {} sections for nav highlighting", sections.len());
    }

    if let Some(brand) = document.query_selector(NAV_BRAND_SELECTOR)? {
        on_event(&brand, "click", |e| {
            e.prevent_default();
            scroll_to_top();
        })?;
    }

    let toggle = document.query_selector(NAV_TOGGLE_SELECTOR)?;
    let menu = document.query_selector(NAV_LINKS_SELECTOR)?;
    if let (Some(toggle), Some(menu)) = (toggle, menu) {
        {
            let menu = menu.clone();
            on_event(&toggle, "click", move |_| {
                let _ = menu.class_list().toggle(ACTIVE_CLASS);
            })?;
        }
        for link in query_all(document, NAV_LINK_SELECTOR)? {
            let menu = menu.clone();
            on_event(&link, "click", move |_| {
                let _ = menu.class_list().remove_1(ACTIVE_CLASS);
            })?;
        }
    }
    Ok(())
}

/// Open a WhatsApp chat from every `[data-whatsapp]` element.
pub fn wire_whatsapp_buttons(document: &Document) -> Result<(), JsValue> {
    let buttons = query_all(document, WHATSAPP_SELECTOR)?;
    for button in &buttons {
        let element = button.clone();
        on_event(button, "click", move |e| {
            e.prevent_default();
            let phone = element.get_attribute("data-phone");
            let url = whatsapp_url(phone.as_deref(), DEFAULT_WHATSAPP_PHONE, WHATSAPP_MESSAGE);
            if let Err(err) = gloo_utils::window().open_with_url_and_target_and_features(
                &url,
                "_blank",
                "noopener,noreferrer",
            ) {
                warn!("Could not open WhatsApp link: {:?}", err);
            }
        })?;
    }
    debug!("Wired {} WhatsApp buttons", buttons.len());
    Ok(())
}

/// Mark lazy images as loaded once they scroll into view.
pub fn enable_lazy_images(window: &Window, document: &Document) -> Result<(), JsValue> {
    let images = query_all(document, LAZY_IMAGE_SELECTOR)?;
    if images.is_empty() {
        return Ok(());
    }

    let supported = js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false);
    if !supported {
        for image in &images {
            image.class_list().add_1(LOADED_CLASS)?;
        }
        return Ok(());
    }

    observe_all(&images, None, |entry, observer| {
        if entry.is_intersecting() {
            let image = entry.target();
            let _ = image.class_list().add_1(LOADED_CLASS);
            observer.unobserve(&image);
        }
    })
}

fn log_navigation_timing(window: &Window) {
    let Some(performance) = window.performance() else {
        return;
    };
    let entries = performance.get_entries_by_type("navigation");
    if let Ok(timing) = entries.get(0).dyn_into::<PerformanceNavigationTiming>() {
        info!(
            "Page load time: {} ms",
            page_load_ms(timing.fetch_start(), timing.load_event_end())
        );
    }
}

/// Log the navigation timing once the page has finished loading.
pub fn log_page_load(window: &Window, document: &Document) -> Result<(), JsValue> {
    // loadEventEnd is only filled in after the load handlers return
    let defer_log = |window: Window| {
        Timeout::new(0, move || log_navigation_timing(&window)).forget();
    };

    if document.ready_state() == "complete" {
        defer_log(window.clone());
        return Ok(());
    }

    let handle = window.clone();
    on_event(window, "load", move |_| defer_log(handle.clone()))
}

/// Run `f` once the DOM is parsed.
pub fn when_ready(document: &Document, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let mut f = Some(f);
    on_event(document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })
}
