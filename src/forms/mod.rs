//! Typed form bodies for the HTML pages.
//!
//! Each form deserializes every field as raw text so a rejected submission
//! can be re-rendered exactly as typed. `validate` turns it into the service
//! input or the list of field errors.

pub mod artist;
pub mod choices;
pub mod show;
pub mod venue;

use std::sync::LazyLock;

use regex::Regex;

static PHONE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\-\.\s\(\)]+$").expect("valid phone regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field(&self, field: &str) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

pub(crate) fn required(errors: &mut FormErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, "This field is required.");
    }
    value.to_string()
}

pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn one_of(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    choices: &[&str],
) -> String {
    let value = required(errors, field, value);
    if !value.is_empty() && !choices.contains(&value.as_str()) {
        errors.push(field, "Not a valid choice.");
    }
    value
}

pub(crate) fn many_of(
    errors: &mut FormErrors,
    field: &'static str,
    values: &[String],
    choices: &[&str],
) -> Vec<String> {
    let values: Vec<String> = values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        errors.push(field, "This field is required.");
    }
    for value in &values {
        if !choices.contains(&value.as_str()) {
            errors.push(field, format!("'{value}' is not a valid choice."));
        }
    }
    values
}

pub(crate) fn phone(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let value = optional(value)?;
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !PHONE_CHARS.is_match(&value) || digits != 10 {
        errors.push(field, "Invalid phone number.");
    }
    Some(value)
}

pub(crate) fn link(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let value = optional(value)?;
    match url::Url::parse(&value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
        _ => errors.push(field, "Invalid URL."),
    }
    Some(value)
}

/// HTML checkboxes are only submitted when ticked.
pub(crate) fn checkbox(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "n" | "no" | "false" | "off" | "0"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_reports() {
        let mut errors = FormErrors::default();
        assert_eq!(required(&mut errors, "name", "  The Musical Hop "), "The Musical Hop");
        assert!(errors.is_empty());

        assert_eq!(required(&mut errors, "city", "   "), "");
        assert_eq!(errors.for_field("city").count(), 1);
    }

    #[test]
    fn test_phone_accepts_formatting() {
        let mut errors = FormErrors::default();
        assert_eq!(
            phone(&mut errors, "phone", "123-123-1234"),
            Some("123-123-1234".into())
        );
        phone(&mut errors, "phone", "(914) 003.1132");
        assert_eq!(phone(&mut errors, "phone", ""), None);
        assert!(errors.is_empty());

        phone(&mut errors, "phone", "123-1234");
        phone(&mut errors, "phone", "123-123-12345");
        phone(&mut errors, "phone", "call 1231231234");
        assert_eq!(errors.for_field("phone").count(), 3);
    }

    #[test]
    fn test_link_requires_http_scheme() {
        let mut errors = FormErrors::default();
        link(&mut errors, "website", "https://www.themusicalhop.com");
        link(&mut errors, "website", "http://example.com/a?b=c");
        assert!(errors.is_empty());

        link(&mut errors, "website", "ftp://example.com");
        link(&mut errors, "website", "www.example.com");
        link(&mut errors, "website", "javascript:alert(1)");
        assert_eq!(errors.for_field("website").count(), 3);
    }

    #[test]
    fn test_many_of_rejects_unknown_and_empty() {
        let choices = ["Jazz", "Folk"];

        let mut errors = FormErrors::default();
        let picked = many_of(&mut errors, "genres", &["Jazz".into(), "".into()], &choices);
        assert_eq!(picked, vec!["Jazz".to_string()]);
        assert!(errors.is_empty());

        many_of(&mut errors, "genres", &[], &choices);
        many_of(&mut errors, "genres", &["Polka".into()], &choices);
        assert_eq!(errors.for_field("genres").count(), 2);
    }

    #[test]
    fn test_checkbox_values() {
        assert!(checkbox(Some("y")));
        assert!(checkbox(Some("on")));
        assert!(!checkbox(Some("false")));
        assert!(!checkbox(None));
    }

    #[test]
    fn test_finish() {
        assert_eq!(FormErrors::default().finish(5), Ok(5));

        let mut errors = FormErrors::default();
        errors.push("name", "This field is required.");
        assert!(errors.finish(5).is_err());
    }
}
