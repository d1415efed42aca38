use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::{
    console, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior,
    ScrollToOptions,
};
use yew::prelude::*;

/// `log` backend that writes to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = JsValue::from_str(&format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Verbose logging on development hosts, warnings only in production.
pub fn log_level(dev_host: bool) -> LevelFilter {
    if dev_host {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn init_logger(level: LevelFilter) {
    // A second call keeps the first logger.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Current text of whichever form control fired `event`.
pub fn event_value<E: TargetCast>(event: &E) -> String {
    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

/// Push `message` into the control's native validity and, if `report` is
/// set, show the browser's validation bubble. An empty message marks the
/// control valid.
pub fn sync_validity(node: &NodeRef, message: &str, report: bool) {
    if let Some(input) = node.cast::<HtmlInputElement>() {
        input.set_custom_validity(message);
        if report {
            input.report_validity();
        }
    } else if let Some(area) = node.cast::<HtmlTextAreaElement>() {
        area.set_custom_validity(message);
        if report {
            area.report_validity();
        }
    }
}

pub fn current_scroll_offset() -> f64 {
    gloo_utils::window().scroll_y().unwrap_or(0.0)
}

pub fn scroll_to_top() {
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    gloo_utils::window().scroll_to_with_scroll_to_options(&options);
}
