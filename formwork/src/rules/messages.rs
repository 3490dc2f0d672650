//! Fixed user-facing messages produced by the built-in rules.

pub const REQUIRED: &str = "This field is required";

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";

pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const CONFIRM_PASSWORD_REQUIRED: &str = "Please confirm your password";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Please enter a valid 10-digit phone number";

pub const PIN_CODE_REQUIRED: &str = "PIN code is required";
pub const PIN_CODE_INVALID: &str = "PIN code must be 6 digits";

pub const ZIP_CODE_REQUIRED: &str = "ZIP code is required";
pub const ZIP_CODE_INVALID: &str = "ZIP code must be 5 or 6 digits";

pub const NOT_A_NUMBER: &str = "This must be a number";

pub const URL_REQUIRED: &str = "URL is required";
pub const URL_INVALID: &str = "Please enter a valid URL";

pub const SELECT_REQUIRED: &str = "Please select an option";
pub const CHECKBOX_REQUIRED: &str = "This field must be checked";

pub fn password_too_short(min_length: usize) -> String {
    format!("Password must be at least {min_length} characters long")
}

pub fn too_short(min_length: usize) -> String {
    format!("Must be at least {min_length} characters")
}

pub fn too_long(max_length: usize) -> String {
    format!("Must be no more than {max_length} characters")
}

pub fn text_too_short(min_length: usize) -> String {
    format!("Must be at least {min_length} characters long")
}
