//! Field validation shared by the incremental and submit-time passes.
//!
//! Both passes route through [`check`], so a value accepted while typing is
//! accepted again at submit and vice versa. The only difference between the
//! passes is how an empty value is treated.

mod image;
pub mod rules;

use std::fmt;

pub use image::{mime_for_path, validate_image, ImageUpload, ACCEPTED_IMAGE_TYPES, MAX_IMAGE_BYTES};

/// Reasons a field (or a collection of fields) can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Required,
    InvalidFormat,
    TooShort,
    Mismatch,
    UnsupportedType,
    TooLarge,
    IncompleteCollection,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Required => "required",
            ErrorKind::InvalidFormat => "invalid format",
            ErrorKind::TooShort => "too short",
            ErrorKind::Mismatch => "mismatch",
            ErrorKind::UnsupportedType => "unsupported type",
            ErrorKind::TooLarge => "too large",
            ErrorKind::IncompleteCollection => "incomplete collection",
        };
        f.write_str(label)
    }
}

/// Which validation pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Fired on every edit; empty values are left alone.
    Incremental,
    /// Fired over every active field when the screen is submitted.
    Submit,
}

/// How a single text value is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Email,
    Password,
    ConfirmPassword,
    OptionalUrl,
    RequiredText,
    /// A selection that must be one of the listed labels.
    Choice(&'static [&'static str]),
    Free,
}

/// Sibling values a rule may depend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    /// Live password value, compared against by [`Rule::ConfirmPassword`].
    pub password: &'a str,
}

/// Outcome of running a rule during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(ErrorKind),
    /// The incremental pass does not look at empty values.
    Skipped,
}

/// Applies `rule` to `value` for the given pass.
pub fn validate(rule: Rule, value: &str, context: &ValidationContext<'_>, pass: Pass) -> Verdict {
    if pass == Pass::Incremental && value.is_empty() {
        return Verdict::Skipped;
    }
    match check(rule, value, context) {
        Ok(()) => Verdict::Valid,
        Err(kind) => Verdict::Invalid(kind),
    }
}

/// The predicate behind every pass.
pub fn check(rule: Rule, value: &str, context: &ValidationContext<'_>) -> Result<(), ErrorKind> {
    match rule {
        Rule::Email => rules::email(value),
        Rule::Password => rules::password(value),
        Rule::ConfirmPassword => rules::confirm_password(value, context.password),
        Rule::OptionalUrl => rules::optional_url(value),
        Rule::RequiredText => rules::required_text(value),
        Rule::Choice(options) => rules::choice(value, options),
        Rule::Free => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CONTEXT: ValidationContext<'static> = ValidationContext { password: "" };

    #[test]
    fn incremental_pass_skips_empty_values() {
        for rule in [Rule::Email, Rule::Password, Rule::RequiredText, Rule::OptionalUrl] {
            assert_eq!(
                validate(rule, "", &NO_CONTEXT, Pass::Incremental),
                Verdict::Skipped
            );
        }
    }

    #[test]
    fn submit_pass_reports_required_for_empty_values() {
        assert_eq!(
            validate(Rule::Email, "", &NO_CONTEXT, Pass::Submit),
            Verdict::Invalid(ErrorKind::Required)
        );
        assert_eq!(
            validate(Rule::Password, "", &NO_CONTEXT, Pass::Submit),
            Verdict::Invalid(ErrorKind::Required)
        );
        assert_eq!(
            validate(Rule::RequiredText, "   ", &NO_CONTEXT, Pass::Submit),
            Verdict::Invalid(ErrorKind::Required)
        );
        assert_eq!(
            validate(Rule::OptionalUrl, "", &NO_CONTEXT, Pass::Submit),
            Verdict::Valid
        );
    }

    #[test]
    fn both_passes_agree_on_non_empty_values() {
        let context = ValidationContext { password: "abcdefgh" };
        let cases = [
            (Rule::Email, "a@b.com"),
            (Rule::Email, "a@b"),
            (Rule::Password, "short"),
            (Rule::Password, "longenough"),
            (Rule::ConfirmPassword, "abcdefgh"),
            (Rule::ConfirmPassword, "abcdefgX"),
            (Rule::OptionalUrl, "https://linkedin.com/in/someone"),
            (Rule::OptionalUrl, "not a url"),
            (Rule::RequiredText, "   "),
        ];
        for (rule, value) in cases {
            assert_eq!(
                validate(rule, value, &context, Pass::Incremental),
                validate(rule, value, &context, Pass::Submit),
                "{rule:?} disagreed on {value:?}"
            );
        }
    }

    #[test]
    fn confirm_password_uses_context_password() {
        let context = ValidationContext { password: "newpassword" };
        assert_eq!(
            check(Rule::ConfirmPassword, "oldpassword", &context),
            Err(ErrorKind::Mismatch)
        );
        assert_eq!(check(Rule::ConfirmPassword, "newpassword", &context), Ok(()));
    }

    #[test]
    fn free_text_always_passes() {
        assert_eq!(check(Rule::Free, "", &NO_CONTEXT), Ok(()));
        assert_eq!(check(Rule::Free, "anything", &NO_CONTEXT), Ok(()));
    }
}
