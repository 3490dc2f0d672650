//! Built-in validation rules.
//!
//! Every rule is a plain function from a [`FieldValue`] (plus its typed
//! parameters) to an optional error message, so each one can be called and
//! tested on its own. The [`RuleCatalog`](crate::RuleCatalog) wraps these
//! same functions under their catalog names.
//!
//! Unless noted otherwise a rule checks for a blank value first and reports
//! its "required" message before looking at the content.

use std::sync::LazyLock;

use email_address::{EmailAddress, Options};
use regex::Regex;

use crate::FieldValue;

pub mod messages;

/// Default minimum length for the `password` rule.
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Default minimum length for the `textarea` rule.
pub const DEFAULT_TEXTAREA_MIN_LENGTH: usize = 10;

static PIN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("PIN code pattern is valid"));

static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5,6}$").expect("ZIP code pattern is valid"));

/// Plain addresses only: no `Name <addr>` form, no `user@[127.0.0.1]`.
const EMAIL_OPTIONS: Options = Options {
    minimum_sub_domains: 0,
    allow_domain_literal: true,
    allow_display_text: true,
}
.without_display_text()
.without_domain_literal();

/// Fails when the value is blank.
pub fn required(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        Some(messages::REQUIRED.to_string())
    } else {
        None
    }
}

/// Fails when the value is not a plain email address.
///
/// Display text, domain literals and whitespace (inside a quoted local part)
/// are rejected.
pub fn email(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        return Some(messages::EMAIL_REQUIRED.to_string());
    }
    let text = value.as_text();
    let text = text.trim();
    if !text.contains(char::is_whitespace)
        && EmailAddress::parse_with_options(text, EMAIL_OPTIONS).is_ok()
    {
        None
    } else {
        Some(messages::EMAIL_INVALID.to_string())
    }
}

/// Fails when the password is shorter than `min_length` characters.
///
/// The password is not trimmed: surrounding spaces count.
pub fn password(value: &FieldValue, min_length: usize) -> Option<String> {
    if value.is_blank() {
        return Some(messages::PASSWORD_REQUIRED.to_string());
    }
    if value.as_text().chars().count() < min_length {
        Some(messages::password_too_short(min_length))
    } else {
        None
    }
}

/// Fails when the value differs from `original`.
pub fn confirm_password(value: &FieldValue, original: &str) -> Option<String> {
    if value.is_blank() {
        return Some(messages::CONFIRM_PASSWORD_REQUIRED.to_string());
    }
    if value.as_text() != original {
        Some(messages::PASSWORD_MISMATCH.to_string())
    } else {
        None
    }
}

/// Fails unless the value holds exactly ten digits once formatting
/// characters (spaces, dashes, parentheses) are stripped.
pub fn phone(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        return Some(messages::PHONE_REQUIRED.to_string());
    }
    let digits = value.as_text().chars().filter(char::is_ascii_digit).count();
    if digits != 10 {
        Some(messages::PHONE_INVALID.to_string())
    } else {
        None
    }
}

/// Fails unless the value is exactly six digits.
pub fn pin_code(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        return Some(messages::PIN_CODE_REQUIRED.to_string());
    }
    if PIN_CODE.is_match(value.as_text().trim()) {
        None
    } else {
        Some(messages::PIN_CODE_INVALID.to_string())
    }
}

/// Fails unless the value is five or six digits.
pub fn zip_code(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        return Some(messages::ZIP_CODE_REQUIRED.to_string());
    }
    if ZIP_CODE.is_match(value.as_text().trim()) {
        None
    } else {
        Some(messages::ZIP_CODE_INVALID.to_string())
    }
}

/// Fails when the value has fewer than `min` characters.
///
/// A blank value counts as length zero; there is no separate required
/// message.
pub fn min_length(value: &FieldValue, min: usize) -> Option<String> {
    if text_length(value) < min {
        Some(messages::too_short(min))
    } else {
        None
    }
}

/// Fails when the value has more than `max` characters. Blank passes.
pub fn max_length(value: &FieldValue, max: usize) -> Option<String> {
    if value.is_blank() {
        return None;
    }
    if text_length(value) > max {
        Some(messages::too_long(max))
    } else {
        None
    }
}

/// Fails when the value is not numeric.
pub fn number(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        return Some(messages::REQUIRED.to_string());
    }
    let numeric = match value {
        FieldValue::Number(n) => n.is_finite(),
        other => other
            .as_text()
            .trim()
            .parse::<f64>()
            .is_ok_and(f64::is_finite),
    };
    if numeric {
        None
    } else {
        Some(messages::NOT_A_NUMBER.to_string())
    }
}

/// Fails when the value does not parse as an absolute URL.
pub fn url(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        return Some(messages::URL_REQUIRED.to_string());
    }
    match url::Url::parse(value.as_text().trim()) {
        Ok(_) => None,
        Err(_) => Some(messages::URL_INVALID.to_string()),
    }
}

/// Fails when nothing is selected.
pub fn select(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        Some(messages::SELECT_REQUIRED.to_string())
    } else {
        None
    }
}

/// Fails when the value is not truthy (an unchecked box).
pub fn checkbox(value: &FieldValue) -> Option<String> {
    if value.is_truthy() {
        None
    } else {
        Some(messages::CHECKBOX_REQUIRED.to_string())
    }
}

/// Fails when the trimmed text is shorter than `min_length` characters.
pub fn textarea(value: &FieldValue, min_length: usize) -> Option<String> {
    if value.is_blank() {
        return Some(messages::REQUIRED.to_string());
    }
    if value.as_text().trim().chars().count() < min_length {
        Some(messages::text_too_short(min_length))
    } else {
        None
    }
}

fn text_length(value: &FieldValue) -> usize {
    match value {
        FieldValue::Null => 0,
        FieldValue::List(items) => items.len(),
        other => other.as_text().chars().count(),
    }
}
