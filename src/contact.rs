//! Contact form model and outbound contact links.
//!
//! The site has no backend: a valid form is turned into a `mailto:` URL and
//! the visitor's own mail client sends it. WhatsApp buttons build a `wa.me`
//! deep link the same way.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub const DEFAULT_SUBJECT: &str = "Solicitare UCE";

// WHATWG "valid e-mail address", the rule behind <input type="email">
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl ContactField {
    /// Fields in the order they appear in the form.
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Subject,
        ContactField::Message,
    ];

    pub fn form_name(self) -> &'static str {
        match self {
            ContactField::Name => "nume",
            ContactField::Email => "email",
            ContactField::Phone => "telefon",
            ContactField::Subject => "subiect",
            ContactField::Message => "mesaj",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Nume",
            ContactField::Email => "Email",
            ContactField::Phone => "Telefon",
            ContactField::Subject => "Subiect",
            ContactField::Message => "Mesaj",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            ContactField::Name | ContactField::Email | ContactField::Message
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    Missing(ContactField),
    InvalidEmail(String),
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::Missing(field) => write!(f, "Câmpul {} este obligatoriu", field.label()),
            ContactError::InvalidEmail(value) => {
                write!(f, "Adresa de e-mail \"{}\" nu este validă", value)
            }
        }
    }
}

impl std::error::Error for ContactError {}

/// Current contents of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
            ContactField::Subject => self.subject = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn validate_field(&self, field: ContactField) -> Result<(), ContactError> {
        let value = self.value(field).trim();
        if value.is_empty() {
            return if field.is_required() {
                Err(ContactError::Missing(field))
            } else {
                Ok(())
            };
        }

        if field == ContactField::Email && !EMAIL_REGEX.is_match(value) {
            return Err(ContactError::InvalidEmail(value.to_string()));
        }
        Ok(())
    }

    /// First field, in form order, that fails validation.
    pub fn first_invalid(&self) -> Option<ContactField> {
        ContactField::ALL
            .into_iter()
            .find(|&field| self.validate_field(field).is_err())
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        ContactField::ALL
            .into_iter()
            .try_for_each(|field| self.validate_field(field))
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// "<subject or default> – <name>"
    pub fn subject_line(&self) -> String {
        let subject = self.subject.trim();
        let subject = if subject.is_empty() {
            DEFAULT_SUBJECT
        } else {
            subject
        };
        format!("{} – {}", subject, self.name.trim())
    }

    pub fn body(&self) -> String {
        format!(
            "Nume: {}\nEmail: {}\nTelefon: {}\n\nMesaj:\n{}",
            self.name.trim(),
            self.email.trim(),
            self.phone.trim(),
            self.message
        )
    }

    pub fn mailto_url(&self, recipient: &str) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            encode_component(&self.subject_line()),
            encode_component(&self.body())
        )
    }
}

/// Build a `wa.me` link. Only the digits of `phone` are kept; a missing or
/// digit-free phone falls back to `fallback_phone`.
pub fn whatsapp_url(phone: Option<&str>, fallback_phone: &str, message: &str) -> String {
    let digits_of = |s: &str| s.chars().filter(char::is_ascii_digit).collect::<String>();

    let mut digits = phone.map(digits_of).unwrap_or_default();
    if digits.is_empty() {
        digits = digits_of(fallback_phone);
    }
    format!("https://wa.me/{}?text={}", digits, encode_component(message))
}

// Marks form encoding escapes but a URI component keeps as they are
const COMPONENT_SAFE_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%7E", "~"),
];

/// Percent-encode a URI component the way `encodeURIComponent` does: spaces
/// become `%20` rather than `+`, since mail clients do not decode `+` in
/// mailto links, and `!'()~` stay literal.
pub fn encode_component(value: &str) -> String {
    let encoded = url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    COMPONENT_SAFE_MARKS
        .iter()
        .fold(encoded, |acc, (escaped, mark)| acc.replace(escaped, mark))
}
