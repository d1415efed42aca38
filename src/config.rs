//! Application-level configuration constants.

// Host elements the widgets mount into
pub const CALCULATOR_ROOT_ID: &str = "calc-root";
pub const CONTACT_ROOT_ID: &str = "contact-root";
pub const SCROLL_TOP_ROOT_ID: &str = "scroll-top-root";

// Static markup enhanced in place
pub const SECTION_SELECTOR: &str = "section[id]";
pub const NAV_LINK_SELECTOR: &str = "nav a[href^=\"#\"]";
pub const NAV_BRAND_SELECTOR: &str = ".nav-brand";
pub const NAV_TOGGLE_SELECTOR: &str = ".nav-toggle";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const WHATSAPP_SELECTOR: &str = "[data-whatsapp]";
pub const LAZY_IMAGE_SELECTOR: &str = "img[loading=\"lazy\"]";
pub const ACTIVE_CLASS: &str = "active";
pub const LOADED_CLASS: &str = "loaded";

// A section counts as current while it crosses the band between 40% and 50%
// of the viewport height.
pub const NAV_ROOT_MARGIN: &str = "-40% 0px -50% 0px";

pub const SCROLL_TOP_THRESHOLD_PX: f64 = 300.0;

// Contact channels
pub const CONTACT_RECIPIENT: &str = "ionescu.lupeanu.silviu@gmail.com";
pub const DEFAULT_WHATSAPP_PHONE: &str = "+40700000000";
pub const WHATSAPP_MESSAGE: &str = "Salut! Vreau ofertă pentru UCE (P130-2025).";

// Development-only diagnostics
pub const DEV_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];
