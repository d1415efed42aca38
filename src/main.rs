//! Main module for the UCE Monitoring site using Yew.
//! Mounts the interactive widgets and enhances the static page markup.

use log::{debug, info, warn};
use uce_monitoring::page::is_dev_host;
use wasm_bindgen::JsValue;
use web_sys::Document;
use yew::html::BaseComponent;

mod components;
mod config;
mod dom;
mod hooks;
mod utils;

use components::{ContactForm, PriceCalculator, ScrollToTop};
use config::*;

/// Render `COMP` into the element with `root_id`, if the page has one.
fn mount<COMP>(document: &Document, root_id: &str)
where
    COMP: BaseComponent,
    COMP::Properties: Default,
{
    match document.get_element_by_id(root_id) {
        Some(root) => {
            yew::Renderer::<COMP>::with_root(root).render();
            debug!("Mounted widget into #{}", root_id);
        }
        None => debug!("No #{} on this page, skipping widget", root_id),
    }
}

fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("Could not set up {}: {:?}", what, err);
    }
}

fn init_all(document: &Document, dev_host: bool) {
    let window = gloo_utils::window();

    report("navigation", dom::enhance_navigation(document));
    report("floating buttons", dom::wire_whatsapp_buttons(document));
    report("lazy images", dom::enable_lazy_images(&window, document));

    mount::<PriceCalculator>(document, CALCULATOR_ROOT_ID);
    mount::<ContactForm>(document, CONTACT_ROOT_ID);
    mount::<ScrollToTop>(document, SCROLL_TOP_ROOT_ID);

    if dev_host {
        report("performance log", dom::log_page_load(&window, document));
    }
}

/// Entry point: wires the page once the DOM is ready.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();

    let hostname = gloo_utils::window()
        .location()
        .hostname()
        .unwrap_or_default();
    let dev_host = is_dev_host(&hostname, &DEV_HOSTS);
    utils::init_logger(utils::log_level(dev_host));
    info!("UCE Monitoring v{} starting on {}", env!("CARGO_PKG_VERSION"), hostname);

    let document = gloo_utils::document();
    let ready_document = document.clone();
    report(
        "page initialisation",
        dom::when_ready(&document, move || init_all(&ready_document, dev_host)),
    );
}
