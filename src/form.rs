//! Contact form validation and the live message counter.
//!
//! `ContactForm` mirrors what the page shows: the current field values, the
//! error marker under each field, and the counter text. The browser binding
//! copies values in before each submit and copies markers back out after.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::FormConfig;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormValues {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }
}

/// Per-field error text; `None` means the field is currently valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Characters left in the message budget. Goes negative instead of
/// truncating the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCounter {
    pub remaining: i64,
    pub over_limit: bool,
}

impl MessageCounter {
    pub fn for_message(message: &str, limit: usize) -> Self {
        let len = message.chars().count();
        MessageCounter {
            remaining: limit as i64 - len as i64,
            over_limit: len > limit,
        }
    }

    pub fn text(&self) -> String {
        format!("{} characters remaining", self.remaining)
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Check every field. Nothing carries over from earlier attempts.
pub fn validate(values: &FormValues, limit: usize) -> FieldErrors {
    let name = if values.name.trim().is_empty() {
        Some("Please enter your name.".to_string())
    } else {
        None
    };

    let email = if values.email.trim().is_empty() || !is_email(&values.email) {
        Some("Please enter a valid email address.".to_string())
    } else {
        None
    };

    let message = if values.message.trim().is_empty() {
        Some("Message cannot be empty.".to_string())
    } else if values.message.chars().count() > limit {
        Some(format!("Message exceeds {} characters.", limit))
    } else {
        None
    };

    FieldErrors {
        name,
        email,
        message,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted { acknowledgment: String },
    Rejected(FieldErrors),
}

pub struct ContactForm {
    config: FormConfig,
    values: FormValues,
    errors: FieldErrors,
    counter: MessageCounter,
}

impl ContactForm {
    pub fn new(config: FormConfig) -> Self {
        let counter = MessageCounter::for_message("", config.message_limit);
        ContactForm {
            config,
            values: FormValues::default(),
            errors: FieldErrors::default(),
            counter,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Error markers currently shown.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn counter(&self) -> MessageCounter {
        self.counter
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        if field == Field::Message {
            self.recount();
        }
    }

    /// Input event on the message field.
    pub fn input_message(&mut self, value: impl Into<String>) -> MessageCounter {
        self.set_field(Field::Message, value);
        self.counter
    }

    /// Validate everything. On success the form resets: values cleared,
    /// counter back to the full budget, no markers.
    pub fn submit(&mut self) -> Submission {
        let errors = validate(&self.values, self.config.message_limit);
        if errors.is_empty() {
            self.reset();
            log::debug!("[form] Contact form accepted");
            Submission::Accepted {
                acknowledgment: self.config.success_message.clone(),
            }
        } else {
            log::debug!("[form] Contact form rejected: {:?}", errors);
            self.errors = errors.clone();
            Submission::Rejected(errors)
        }
    }

    pub fn reset(&mut self) {
        self.values = FormValues::default();
        self.errors = FieldErrors::default();
        self.recount();
    }

    fn recount(&mut self) {
        self.counter = MessageCounter::for_message(&self.values.message, self.config.message_limit);
    }
}

// ── Error markers ─────────────────────────────────────

/// The page side of the error markers. Each field owns at most one note,
/// placed directly after its input.
pub trait MarkerHost {
    type Input;
    fn input(&self, field: Field) -> Option<Self::Input>;
    /// Remove the note directly following `input`, if there is one.
    fn remove_note_after(&self, input: &Self::Input);
    fn flag(&self, input: &Self::Input, invalid: bool);
    fn insert_note_after(&self, input: &Self::Input, message: &str);
}

/// Replace the marker of `field` only; other fields' notes are left alone.
pub fn mark_field<H: MarkerHost + ?Sized>(host: &H, field: Field, message: Option<&str>) {
    let Some(input) = host.input(field) else {
        return;
    };
    host.remove_note_after(&input);
    host.flag(&input, message.is_some());
    if let Some(message) = message {
        host.insert_note_after(&input, message);
    }
}

pub fn mark_all<H: MarkerHost + ?Sized>(host: &H, errors: &FieldErrors) {
    for field in Field::ALL {
        mark_field(host, field, errors.get(field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Slot {
        Input { field: Field, flagged: bool },
        Note(String),
    }

    /// One parent holding all three inputs, like a plain `<form>`.
    struct Siblings(RefCell<Vec<Slot>>);

    impl Siblings {
        fn form() -> Self {
            Siblings(RefCell::new(
                Field::ALL
                    .iter()
                    .map(|f| Slot::Input {
                        field: *f,
                        flagged: false,
                    })
                    .collect(),
            ))
        }

        fn position(&self, field: Field) -> usize {
            self.0
                .borrow()
                .iter()
                .position(|s| matches!(s, Slot::Input { field: f, .. } if *f == field))
                .unwrap()
        }

        /// Note text following `field` and whether it is flagged.
        fn marker(&self, field: Field) -> (bool, Option<String>) {
            let at = self.position(field);
            let slots = self.0.borrow();
            let flagged = matches!(slots[at], Slot::Input { flagged: true, .. });
            let note = match slots.get(at + 1) {
                Some(Slot::Note(text)) => Some(text.clone()),
                _ => None,
            };
            (flagged, note)
        }

        fn notes(&self) -> usize {
            self.0.borrow().iter().filter(|s| matches!(s, Slot::Note(_))).count()
        }
    }

    impl MarkerHost for Siblings {
        type Input = Field;

        fn input(&self, field: Field) -> Option<Field> {
            Some(field)
        }

        fn remove_note_after(&self, input: &Field) {
            let at = self.position(*input) + 1;
            let mut slots = self.0.borrow_mut();
            if matches!(slots.get(at), Some(Slot::Note(_))) {
                slots.remove(at);
            }
        }

        fn flag(&self, input: &Field, invalid: bool) {
            let at = self.position(*input);
            if let Slot::Input { flagged, .. } = &mut self.0.borrow_mut()[at] {
                *flagged = invalid;
            }
        }

        fn insert_note_after(&self, input: &Field, message: &str) {
            let at = self.position(*input) + 1;
            self.0.borrow_mut().insert(at, Slot::Note(message.to_string()));
        }
    }

    fn form() -> ContactForm {
        ContactForm::new(FormConfig::default())
    }

    fn fill(f: &mut ContactForm, name: &str, email: &str, message: &str) {
        f.set_field(Field::Name, name);
        f.set_field(Field::Email, email);
        f.set_field(Field::Message, message);
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("a@b.co"));
        assert!(is_email("jane.doe+tag@mail.example.org"));
        assert!(!is_email("a@b"));
        assert!(!is_email("a.com"));
        assert!(!is_email(""));
        assert!(!is_email("a b@c.de"));
        assert!(!is_email("a@@b.co"));
        assert!(!is_email(" a@b.co"));
    }

    #[test]
    fn counter_for_any_length() {
        for len in [0usize, 1, 150, 299, 300, 301, 450] {
            let msg = "x".repeat(len);
            let c = MessageCounter::for_message(&msg, 300);
            assert_eq!(c.remaining, 300 - len as i64);
            assert_eq!(c.over_limit, len > 300);
        }
        assert_eq!(MessageCounter::for_message("", 300).text(), "300 characters remaining");
        assert_eq!(
            MessageCounter::for_message(&"x".repeat(301), 300).text(),
            "-1 characters remaining"
        );
    }

    #[test]
    fn counter_counts_characters_not_bytes() {
        let c = MessageCounter::for_message("héllo ✓", 300);
        assert_eq!(c.remaining, 293);
    }

    #[test]
    fn input_updates_counter_without_truncating() {
        let mut f = form();
        let long = "y".repeat(310);
        let c = f.input_message(long.clone());
        assert_eq!(c.remaining, -10);
        assert!(c.over_limit);
        assert_eq!(f.values().message, long);
    }

    #[test]
    fn empty_submit_flags_every_field() {
        let mut f = form();
        match f.submit() {
            Submission::Rejected(errors) => {
                assert_eq!(errors.get(Field::Name), Some("Please enter your name."));
                assert_eq!(errors.get(Field::Email), Some("Please enter a valid email address."));
                assert_eq!(errors.get(Field::Message), Some("Message cannot be empty."));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(!f.errors().is_empty());
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut f = form();
        fill(&mut f, "   ", "jane@x.com", "\n\t ");
        let errors = match f.submit() {
            Submission::Rejected(e) => e,
            other => panic!("expected rejection, got {:?}", other),
        };
        assert!(errors.name.is_some());
        assert!(errors.email.is_none());
        assert_eq!(errors.message.as_deref(), Some("Message cannot be empty."));
    }

    #[test]
    fn long_message_is_rejected_and_kept() {
        let mut f = form();
        let long = "z".repeat(301);
        fill(&mut f, "Jane", "jane@x.com", &long);
        let errors = match f.submit() {
            Submission::Rejected(e) => e,
            other => panic!("expected rejection, got {:?}", other),
        };
        assert_eq!(errors.get(Field::Message), Some("Message exceeds 300 characters."));
        assert!(errors.name.is_none());
        assert_eq!(f.values().message, long);
        assert_eq!(f.values().name, "Jane");
    }

    #[test]
    fn markers_are_re_evaluated_each_submit() {
        let mut f = form();
        fill(&mut f, "", "bad", "hi");
        f.submit();
        assert!(f.errors().name.is_some());
        assert!(f.errors().email.is_some());

        f.set_field(Field::Name, "Jane");
        f.submit();
        assert!(f.errors().name.is_none());
        assert!(f.errors().email.is_some());
        assert!(f.errors().message.is_none());
    }

    #[test]
    fn valid_submit_resets_everything() {
        let mut f = form();
        fill(&mut f, "", "", "");
        f.submit();
        fill(&mut f, "Jane", "jane@x.com", "hi");
        assert_eq!(f.counter().remaining, 298);

        let outcome = f.submit();
        assert_eq!(
            outcome,
            Submission::Accepted {
                acknowledgment: "Submitted successfully. Validation passed!".to_string()
            }
        );
        assert_eq!(f.values(), &FormValues::default());
        assert!(f.errors().is_empty());
        assert_eq!(f.counter().text(), "300 characters remaining");
        assert!(!f.counter().over_limit);
    }

    #[test]
    fn custom_limit_is_used_in_messages() {
        let cfg = FormConfig {
            message_limit: 5,
            ..FormConfig::default()
        };
        let mut f = ContactForm::new(cfg);
        assert_eq!(f.counter().text(), "5 characters remaining");
        fill(&mut f, "Jane", "jane@x.com", "toolong");
        let errors = match f.submit() {
            Submission::Rejected(e) => e,
            other => panic!("expected rejection, got {:?}", other),
        };
        assert_eq!(errors.message.as_deref(), Some("Message exceeds 5 characters."));
    }

    #[test]
    fn later_fields_keep_earlier_notes() {
        let page = Siblings::form();
        let mut f = form();
        fill(&mut f, "", "jane@x.com", "hi");
        if let Submission::Rejected(errors) = f.submit() {
            mark_all(&page, &errors);
        }
        assert_eq!(
            page.marker(Field::Name),
            (true, Some("Please enter your name.".to_string()))
        );
        assert_eq!(page.marker(Field::Email), (false, None));
        assert_eq!(page.notes(), 1);
    }

    #[test]
    fn every_invalid_field_gets_its_own_note() {
        let page = Siblings::form();
        let mut f = form();
        if let Submission::Rejected(errors) = f.submit() {
            mark_all(&page, &errors);
            mark_all(&page, &errors);
        }
        assert_eq!(page.notes(), 3);
        for field in Field::ALL {
            let (flagged, note) = page.marker(field);
            assert!(flagged, "{:?} flagged", field);
            assert_eq!(note.as_deref(), f.errors().get(field));
        }

        fill(&mut f, "Jane", "bad", "hi");
        if let Submission::Rejected(errors) = f.submit() {
            mark_all(&page, &errors);
        }
        assert_eq!(page.marker(Field::Name), (false, None));
        assert_eq!(page.marker(Field::Message), (false, None));
        assert_eq!(
            page.marker(Field::Email),
            (true, Some("Please enter a valid email address.".to_string()))
        );
        assert_eq!(page.notes(), 1);

        mark_all(&page, &FieldErrors::default());
        assert_eq!(page.notes(), 0);
    }

    #[test]
    fn counter_follows_field_restored_after_accept() {
        let mut f = form();
        fill(&mut f, "Jane", "jane@x.com", "hi");
        assert!(matches!(f.submit(), Submission::Accepted { .. }));
        assert_eq!(f.counter().remaining, 300);
        // The page's reset brings back the textarea's default content.
        let c = f.input_message("Hello there");
        assert_eq!(c.text(), "289 characters remaining");
        assert_eq!(f.counter(), c);
    }
}
