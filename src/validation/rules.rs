use once_cell::sync::Lazy;
use regex::Regex;

use super::ErrorKind;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://([^\s/?#@]+@)?[^\s/?#:@]+(:[0-9]+)?([/?#]\S*)?$")
        .expect("url pattern is a valid regex")
});

/// Minimum password length, in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_valid_password(value: &str) -> bool {
    value.encode_utf16().count() >= MIN_PASSWORD_LEN
}

/// Absolute URL with both a scheme and a host.
pub fn is_valid_url(value: &str) -> bool {
    URL_PATTERN.is_match(value)
}

pub fn email(value: &str) -> Result<(), ErrorKind> {
    if value.is_empty() {
        Err(ErrorKind::Required)
    } else if !is_valid_email(value) {
        Err(ErrorKind::InvalidFormat)
    } else {
        Ok(())
    }
}

pub fn password(value: &str) -> Result<(), ErrorKind> {
    if value.is_empty() {
        Err(ErrorKind::Required)
    } else if !is_valid_password(value) {
        Err(ErrorKind::TooShort)
    } else {
        Ok(())
    }
}

pub fn confirm_password(value: &str, password: &str) -> Result<(), ErrorKind> {
    if value.is_empty() {
        Err(ErrorKind::Required)
    } else if value != password {
        Err(ErrorKind::Mismatch)
    } else {
        Ok(())
    }
}

pub fn optional_url(value: &str) -> Result<(), ErrorKind> {
    if value.is_empty() || is_valid_url(value) {
        Ok(())
    } else {
        Err(ErrorKind::InvalidFormat)
    }
}

pub fn required_text(value: &str) -> Result<(), ErrorKind> {
    if value.trim().is_empty() {
        Err(ErrorKind::Required)
    } else {
        Ok(())
    }
}

pub fn choice(value: &str, options: &[&str]) -> Result<(), ErrorKind> {
    if value.trim().is_empty() {
        Err(ErrorKind::Required)
    } else if options.contains(&value) {
        Ok(())
    } else {
        Err(ErrorKind::InvalidFormat)
    }
}
