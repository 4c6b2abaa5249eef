//! Contact form validation and the simulated submission flow.

use gloo_timers::callback::Timeout;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::dom::{self, Listener};
use crate::error::Result;

const FORM_ID: &str = "contactForm";
const FIELDS: &str = "input, select, textarea";
const REQUIRED_FIELDS: &str = "input[required], select[required], textarea[required]";
const SENDING_MS: u32 = 2000;
const SUCCESS_VISIBLE_MS: u32 = 5000;
const MIN_PHONE_LEN: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Tel,
    Other,
}

impl FieldKind {
    pub fn from_type(input_type: &str) -> Self {
        match input_type {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            _ => FieldKind::Other,
        }
    }
}

/// Returns the message to show for `value`, or `None` when it is valid.
pub fn validate(kind: FieldKind, required: bool, value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return required.then_some("This field is required");
    }
    match kind {
        FieldKind::Email if !EMAIL_RE.is_match(value) => Some("Please enter a valid email address"),
        FieldKind::Tel if value.chars().count() < MIN_PHONE_LEN => {
            Some("Please enter a valid phone number")
        }
        _ => None,
    }
}

fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn clear_error(field: &Element) {
    dom::remove_class(field, "error");
    if let Some(error) = field
        .parent_element()
        .and_then(|parent| dom::query_within(&parent, ".form-error"))
    {
        error.remove();
    }
}

fn show_error(field: &Element, message: &str) {
    dom::add_class(field, "error");
    let Some(parent) = field.parent_element() else {
        return;
    };
    let error = match dom::query_within(&parent, ".form-error") {
        Some(existing) => existing,
        None => {
            let Ok(created) = dom::document().and_then(|doc| Ok(doc.create_element("div")?)) else {
                return;
            };
            created.set_class_name("form-error");
            let _ = parent.append_child(&created);
            created
        }
    };
    error.set_text_content(Some(message));
}

fn validate_field(field: &Element) -> bool {
    clear_error(field);
    let kind = FieldKind::from_type(&field.get_attribute("type").unwrap_or_default());
    match validate(kind, field.has_attribute("required"), &field_value(field)) {
        Some(message) => {
            show_error(field, message);
            false
        }
        None => true,
    }
}

fn validate_form(form: &Element) -> bool {
    // Validate every field so each one shows its own message.
    dom::query_all_within(form, REQUIRED_FIELDS)
        .iter()
        .fold(true, |valid, field| validate_field(field) && valid)
}

fn show_success(form: &Element) {
    if let Some(existing) = dom::query_within(form, ".form-success") {
        existing.remove();
    }
    let Ok(message) = dom::document().and_then(|doc| Ok(doc.create_element("div")?)) else {
        return;
    };
    message.set_class_name("form-success");
    message.set_inner_html(
        r#"<i class="fas fa-check-circle"></i>
        <h3>Thank You!</h3>
        <p>Your message has been sent successfully. We'll get back to you soon.</p>"#,
    );
    let _ = form.insert_before(&message, form.first_child().as_ref());

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    message.scroll_into_view_with_scroll_into_view_options(&options);

    Timeout::new(SUCCESS_VISIBLE_MS, move || message.remove()).forget();
}

fn submit(form: Element) {
    let Some(button) = dom::query_within(&form, r#"button[type="submit"]"#) else {
        show_success(&form);
        reset(&form);
        return;
    };
    let original = button.inner_html();
    button.set_inner_html(r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#);
    set_disabled(&button, true);

    Timeout::new(SENDING_MS, move || {
        show_success(&form);
        reset(&form);
        button.set_inner_html(&original);
        set_disabled(&button, false);
    })
    .forget();
}

fn reset(form: &Element) {
    if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
        form.reset();
    }
}

fn set_disabled(button: &Element, disabled: bool) {
    if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
    }
}

pub fn attach() -> Result<Vec<Listener>> {
    let Some(form) = dom::by_id(FORM_ID) else {
        return Ok(Vec::new());
    };
    let mut listeners = Vec::new();

    let submitted = form.clone();
    listeners.push(Listener::new(&form, "submit", move |event: Event| {
        event.prevent_default();
        if validate_form(&submitted) {
            submit(submitted.clone());
        } else {
            debug!("contact form has invalid fields");
        }
    })?);

    for field in dom::query_all_within(&form, FIELDS) {
        let blurred = field.clone();
        listeners.push(Listener::new(&field, "blur", move |_| {
            validate_field(&blurred);
        })?);
        let typed = field.clone();
        listeners.push(Listener::new(&field, "input", move |_| clear_error(&typed))?);
    }

    info!("Contact form bound");
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_empty() {
        assert_eq!(validate(FieldKind::Other, true, "   "), Some("This field is required"));
        assert_eq!(validate(FieldKind::Other, false, ""), None);
        assert_eq!(validate(FieldKind::Email, false, ""), None);
    }

    #[test]
    fn test_email_pattern() {
        assert_eq!(validate(FieldKind::Email, true, "jane@example.com"), None);
        assert_eq!(
            validate(FieldKind::Email, true, "jane@example"),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            validate(FieldKind::Email, true, "jane doe@example.com"),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_phone_length() {
        assert_eq!(validate(FieldKind::Tel, true, "+2348012345"), None);
        assert_eq!(
            validate(FieldKind::Tel, true, "12345"),
            Some("Please enter a valid phone number")
        );
    }

    #[test]
    fn test_field_kind_from_type() {
        assert_eq!(FieldKind::from_type("email"), FieldKind::Email);
        assert_eq!(FieldKind::from_type("tel"), FieldKind::Tel);
        assert_eq!(FieldKind::from_type("text"), FieldKind::Other);
        assert_eq!(FieldKind::from_type(""), FieldKind::Other);
    }
}
