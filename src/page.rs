//! Page-level behavior that does not need a browser: which nav links are
//! highlighted, when the scroll button shows, and the contact form's
//! submitted/validation state.

use std::collections::HashSet;

/// Sections currently inside the highlight band of the viewport.
#[derive(Debug, Default, Clone)]
pub struct ActiveSections {
    active: HashSet<String>,
}

impl ActiveSections {
    /// Record an intersection change. Returns `true` if the section's
    /// highlight state actually changed.
    pub fn update(&mut self, id: &str, intersecting: bool) -> bool {
        if intersecting {
            self.active.insert(id.to_string())
        } else {
            self.active.remove(id)
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.active.len()
    }
}

/// Selector for the in-page nav link pointing at section `id`.
pub fn nav_link_selector(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("nav a[href=\"#{}\"]", escaped)
}

pub fn scroll_button_visible(scroll_offset: f64, threshold: f64) -> bool {
    scroll_offset > threshold
}

/// Submitted state of a form.
///
/// A submit attempt marks the form as submitted, which is when validation
/// errors become visible. The mark is cleared again as soon as an edit
/// leaves every field valid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FormValidation {
    submitted: bool,
}

impl FormValidation {
    pub fn submitted(self) -> bool {
        self.submitted
    }

    /// Returns whether the form may be sent.
    pub fn submit(&mut self, all_valid: bool) -> bool {
        self.submitted = true;
        all_valid
    }

    /// Called after each edit. Returns `true` if the submitted mark was cleared.
    pub fn on_input(&mut self, all_valid: bool) -> bool {
        if self.submitted && all_valid {
            self.submitted = false;
            true
        } else {
            false
        }
    }

    /// Whether leaving a field should surface its validation message.
    pub fn should_report_on_blur(self, field_valid: bool) -> bool {
        self.submitted && !field_valid
    }
}

pub fn is_dev_host(hostname: &str, dev_hosts: &[&str]) -> bool {
    dev_hosts.iter().any(|host| host.eq_ignore_ascii_case(hostname))
}

/// Page load duration in whole milliseconds.
pub fn page_load_ms(fetch_start: f64, load_event_end: f64) -> i64 {
    (load_event_end - fetch_start).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_changes_are_reported() {
        let mut sections = ActiveSections::default();
        assert!(sections.update("servicii", true));
        assert!(!sections.update("servicii", true));
        assert!(sections.is_active("servicii"));

        assert!(sections.update("preturi", true));
        assert_eq!(sections.len(), 2);

        assert!(sections.update("servicii", false));
        assert!(!sections.update("servicii", false));
        assert!(!sections.is_active("servicii"));
        assert!(!sections.update("contact", false));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn link_selector_quotes_the_id() {
        assert_eq!(nav_link_selector("preturi"), "nav a[href=\"#preturi\"]");
        assert_eq!(nav_link_selector("a\"b"), "nav a[href=\"#a\\\"b\"]");
    }

    #[test]
    fn scroll_button_shows_strictly_past_threshold() {
        assert!(!scroll_button_visible(0.0, 300.0));
        assert!(!scroll_button_visible(300.0, 300.0));
        assert!(scroll_button_visible(300.5, 300.0));
    }

    #[test]
    fn submitted_mark_follows_validity() {
        let mut form = FormValidation::default();
        assert!(!form.should_report_on_blur(false));
        assert!(!form.on_input(true));

        assert!(!form.submit(false));
        assert!(form.submitted());
        assert!(form.should_report_on_blur(false));
        assert!(!form.should_report_on_blur(true));

        assert!(!form.on_input(false));
        assert!(form.submitted());
        assert!(form.on_input(true));
        assert!(!form.submitted());
    }

    #[test]
    fn valid_submit_keeps_the_mark() {
        let mut form = FormValidation::default();
        assert!(form.submit(true));
        assert!(form.submitted());
    }

    #[test]
    fn dev_hosts_match_exactly() {
        let hosts = ["localhost", "127.0.0.1"];
        assert!(is_dev_host("localhost", &hosts));
        assert!(is_dev_host("127.0.0.1", &hosts));
        assert!(!is_dev_host("uce.example.ro", &hosts));
        assert!(!is_dev_host("localhost.example.ro", &hosts));
    }

    #[test]
    fn load_time_is_rounded() {
        assert_eq!(page_load_ms(10.0, 512.6), 503);
        assert_eq!(page_load_ms(0.0, 0.0), 0);
    }
}
