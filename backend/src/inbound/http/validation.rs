//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error tagged with the failing
//! field so clients can attach messages to form inputs.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

/// Trim a required string, rejecting blank values.
pub(crate) fn non_blank(value: String, field: FieldName) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must not be empty"),
            "blank_field",
        ));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional string, treating blank values as absent.
pub(crate) fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Require a plausible email shape: one `@` with non-empty sides.
pub(crate) fn valid_email(value: String, field: FieldName) -> Result<String, Error> {
    let trimmed = non_blank(value, field)?;
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must be a valid email address"),
            "invalid_email",
        ));
    }
    Ok(trimmed)
}

/// Registration password policy: at least eight characters spanning
/// lowercase, uppercase, digit, and symbol classes.
pub(crate) fn strong_password(value: &str, field: FieldName) -> Result<(), Error> {
    let long_enough = value.chars().count() >= 8;
    let has_lower = value.chars().any(|c| c.is_lowercase());
    let has_upper = value.chars().any(|c| c.is_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| !c.is_alphanumeric());
    if long_enough && has_lower && has_upper && has_digit && has_symbol {
        Ok(())
    } else {
        Err(field_error(
            field,
            "password must be at least 8 characters and mix lower/upper case, digits, and symbols"
                .to_owned(),
            "weak_password",
        ))
    }
}

/// Parse a `YYYY-MM-DD` calendar day.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} must be a YYYY-MM-DD date"),
            "invalid_date",
        )
    })
}

/// Resolve an IANA time zone name.
pub(crate) fn parse_zone(value: &str, field: FieldName) -> Result<Tz, Error> {
    value.trim().parse::<Tz>().map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} must be a known IANA time zone"),
            "invalid_time_zone",
        )
    })
}

/// Require a count of at least one day.
pub(crate) fn at_least_one_day(value: u32, field: FieldName) -> Result<u32, Error> {
    if value == 0 {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must be at least 1"),
            "out_of_range",
        ));
    }
    Ok(value)
}

/// Require a non-negative vehicle capacity.
pub(crate) fn non_negative(value: i64, field: FieldName) -> Result<i64, Error> {
    if value < 0 {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must not be negative"),
            "out_of_range",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn non_blank_trims_and_rejects_whitespace() {
        assert_eq!(
            non_blank("  acme  ".into(), FieldName::new("username")).expect("trimmed"),
            "acme"
        );
        let err = non_blank("   ".into(), FieldName::new("username")).expect_err("blank");
        assert_eq!(
            err.details().and_then(|d| d.get("field")).and_then(|f| f.as_str()),
            Some("username")
        );
    }

    #[rstest]
    #[case("ops@acme.test", true)]
    #[case("no-at-sign", false)]
    #[case("@acme.test", false)]
    #[case("ops@", false)]
    fn email_shapes_are_checked(#[case] input: &str, #[case] ok: bool) {
        let result = valid_email(input.into(), FieldName::new("email"));
        assert_eq!(result.is_ok(), ok);
    }

    #[rstest]
    #[case("Secret#Pass1", true)]
    #[case("short#P1", true)]
    #[case("alllowercase1#", false)]
    #[case("NoDigits#Here", false)]
    #[case("NoSymbols123", false)]
    #[case("Sh#1a", false)]
    fn password_policy_requires_all_classes(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(
            strong_password(input, FieldName::new("password")).is_ok(),
            ok
        );
    }

    #[rstest]
    fn dates_and_zones_parse() {
        assert!(parse_date("2025-03-03", FieldName::new("date")).is_ok());
        assert!(parse_date("03/03/2025", FieldName::new("date")).is_err());
        assert!(parse_zone("Europe/Amsterdam", FieldName::new("timezone")).is_ok());
        assert!(parse_zone("Mars/Olympus", FieldName::new("timezone")).is_err());
    }

    #[rstest]
    fn ranges_are_enforced() {
        assert!(at_least_one_day(0, FieldName::new("days")).is_err());
        assert_eq!(at_least_one_day(14, FieldName::new("days")), Ok(14));
        assert!(non_negative(-1, FieldName::new("capacity")).is_err());
        assert_eq!(non_negative(0, FieldName::new("capacity")), Ok(0));
    }
}
