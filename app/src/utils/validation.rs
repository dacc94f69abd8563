use std::borrow::Cow;

use serde::Deserialize;
use validator::{ValidationError, ValidationErrors};

/// A number as submitted in a JSON body: either a JSON number or text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Resolves to a number, recording a `numeric` error under `field` when
    /// the input is not one. Blank text counts as absent.
    pub fn parse(
        value: Option<Numeric>,
        field: &'static str,
        errors: &mut ValidationErrors,
    ) -> Option<f64> {
        match value? {
            Numeric::Number(number) => Some(number),
            Numeric::Text(text) => parse_number(Some(text), field, errors),
        }
    }
}

/// Parses submitted text as a finite number. Blank text counts as absent;
/// anything else that is not a number adds a `numeric` error under `field`.
pub fn parse_number(
    value: Option<String>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let text = present(value)?;
    match text.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            errors.add(
                field,
                field_error("numeric", format!("The {} must be a number.", field)),
            );
            None
        }
    }
}

/// Trims surrounding whitespace from a submitted string.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Trims a submitted string and treats an empty result as absent, so a
/// `required` rule rejects blank input.
pub fn present(value: Option<String>) -> Option<String> {
    trimmed(value).filter(|v| !v.is_empty())
}

pub fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(None, None ; "absent")]
    #[test_case(Some(""), None ; "empty")]
    #[test_case(Some("  \t"), None ; "whitespace")]
    #[test_case(Some(" Yapeyu 73 "), Some("Yapeyu 73") ; "padded")]
    fn present_drops_blank_input(input: Option<&str>, expected: Option<&str>) {
        assert_eq!(
            present(input.map(str::to_string)),
            expected.map(str::to_string)
        );
    }

    #[test]
    fn trimmed_keeps_empty_strings() {
        assert_eq!(trimmed(Some("  ".to_string())), Some(String::new()));
    }

    #[test_case(None, None ; "absent")]
    #[test_case(Some(""), None ; "empty")]
    #[test_case(Some(" -34.61 "), Some(-34.61) ; "padded number")]
    #[test_case(Some("25"), Some(25.0) ; "integer")]
    fn parse_number_accepts_numbers_and_blanks(input: Option<&str>, expected: Option<f64>) {
        let mut errors = ValidationErrors::new();

        assert_eq!(parse_number(input.map(str::to_string), "radius", &mut errors), expected);
        assert!(errors.errors().is_empty());
    }

    #[test_case("abc" ; "word")]
    #[test_case("NaN" ; "nan")]
    #[test_case("inf" ; "infinity")]
    fn parse_number_flags_non_numbers(input: &str) {
        let mut errors = ValidationErrors::new();

        assert_eq!(parse_number(Some(input.to_string()), "lat", &mut errors), None);
        let messages = errors.field_errors();
        assert_eq!(messages["lat"][0].code, "numeric");
        assert_eq!(messages["lat"][0].message.as_deref(), Some("The lat must be a number."));
    }

    #[test]
    fn numeric_body_values_accept_numbers_and_numeric_text() {
        let mut errors = ValidationErrors::new();
        let number: Numeric = serde_json::from_str("-34.61").unwrap();
        let text: Numeric = serde_json::from_str("\"-58.42\"").unwrap();
        let junk: Numeric = serde_json::from_str("\"x\"").unwrap();

        assert_eq!(Numeric::parse(Some(number), "latitude", &mut errors), Some(-34.61));
        assert_eq!(Numeric::parse(Some(text), "longitude", &mut errors), Some(-58.42));
        assert!(errors.errors().is_empty());

        assert_eq!(Numeric::parse(Some(junk), "latitude", &mut errors), None);
        assert!(errors.field_errors().contains_key("latitude"));
    }

    #[test]
    fn field_error_carries_message() {
        let error = field_error("range", "out of range");
        assert_eq!(error.code, "range");
        assert_eq!(error.message.as_deref(), Some("out of range"));
    }
}
