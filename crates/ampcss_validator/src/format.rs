//! Human readable messages for validation errors
use crate::result::{ValidationError, ValidationResult};
use ampcss_css3::errors::ValidationErrorCode;

/// Message template of an error code. `%1`..`%n` are replaced with the params of the error.
pub fn message_format(code: ValidationErrorCode) -> &'static str {
    use ValidationErrorCode::*;

    match code {
        CssSyntaxStrayTrailingBackslash => "CSS syntax error in tag '%1' - stray trailing backslash.",
        CssSyntaxUnterminatedComment => "CSS syntax error in tag '%1' - unterminated comment.",
        CssSyntaxUnterminatedString => "CSS syntax error in tag '%1' - unterminated string.",
        CssSyntaxBadUrl => "CSS syntax error in tag '%1' - bad url.",
        CssSyntaxEofInPreludeOfQualifiedRule => {
            "CSS syntax error in tag '%1' - end of stylesheet encountered in prelude of a qualified rule."
        }
        CssSyntaxUnterminatedBlock => "CSS syntax error in tag '%1' - unterminated block.",
        CssSyntaxInvalidDeclaration => "CSS syntax error in tag '%1' - invalid declaration.",
        CssSyntaxIncompleteDeclaration => "CSS syntax error in tag '%1' - incomplete declaration.",
        CssSyntaxInvalidAtRule => "CSS syntax error in tag '%1' - saw invalid at rule '@%2'.",
        CssSyntaxMalformedMediaQuery => "CSS syntax error in tag '%1' - malformed media query.",
        CssSyntaxDisallowedMediaType => "CSS syntax error in tag '%1' - disallowed media type '%2'.",
        CssSyntaxDisallowedMediaFeature => "CSS syntax error in tag '%1' - disallowed media feature '%2'.",
        CssSyntaxDisallowedPropertyValue => {
            "CSS syntax error in tag '%1' - the property '%2' is set to the disallowed value '%3'."
        }
        CssSyntaxDisallowedPropertyValueWithHint => {
            "CSS syntax error in tag '%1' - the property '%2' is set to the disallowed value '%3'. Allowed values: %4."
        }
        CssSyntaxPropertyDisallowedWithinAtRule => {
            "CSS syntax error in tag '%1' - the property '%2' is disallowed within @keyframes '%3'. Allowed properties: %4."
        }
        CssSyntaxDisallowedImportant => "Usage of the !important CSS qualifier is not allowed.",
        CssSyntaxMissingUrl => "CSS syntax error in tag '%1' - missing url.",
        CssSyntaxInvalidUrl => "CSS syntax error in tag '%1' - invalid url '%2'.",
        CssSyntaxInvalidUrlProtocol => "CSS syntax error in tag '%1' - invalid url protocol '%2:'.",
        CssSyntaxDisallowedRelativeUrl => "CSS syntax error in tag '%1' - disallowed relative url '%2'.",
        CssSyntaxDisallowedDomain => "CSS syntax error in tag '%1' - disallowed domain '%2'.",
        CssExcessivelyNested => "CSS excessively nested in tag '%1'.",
    }
}

fn collapse_whitespace(value: &str) -> String {
    let mut collapsed = String::with_capacity(value.len());
    let mut in_whitespace = false;

    for c in value.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }

    collapsed
}

/// Substitutes the params into the format. Runs of whitespace in a param are collapsed to a
/// single space and `%%` becomes `%`.
fn apply_format(format: &str, params: &[String]) -> String {
    let mut message = format.to_string();

    for (idx, param) in params.iter().enumerate() {
        message = message.replace(&format!("%{}", idx + 1), &collapse_whitespace(param));
    }

    message.replace("%%", "%")
}

pub fn render_error_message(error: &ValidationError) -> String {
    apply_format(message_format(error.code), &error.params)
}

/// Renders a single error as `<severity>: <file>:<line>:<col> <message>`
pub fn render_error_line(filename: &str, error: &ValidationError) -> String {
    let filename = filename.split('#').next().unwrap_or(filename);

    format!(
        "{}: {}:{}:{} {}",
        error.severity,
        filename,
        error.line,
        error.col,
        render_error_message(error)
    )
}

/// Renders the status followed by one line per error
pub fn render_validation_result(result: &ValidationResult, filename: &str) -> Vec<String> {
    let mut rendered = vec![result.status.to_string()];
    rendered.extend(result.errors.iter().map(|e| render_error_line(filename, e)));
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{ErrorCategory, Severity, ValidationStatus};
    use test_case::test_case;

    fn error(code: ValidationErrorCode, params: &[&str]) -> ValidationError {
        ValidationError {
            severity: Severity::Error,
            code,
            line: 2,
            col: 8,
            params: params.iter().map(|p| p.to_string()).collect(),
            category: ErrorCategory::AuthorStylesheetProblem,
        }
    }

    #[test_case(
        ValidationErrorCode::CssSyntaxDisallowedPropertyValue,
        &["style amp-custom", "position", "fixed"],
        "CSS syntax error in tag 'style amp-custom' - the property 'position' is set to the disallowed value 'fixed'."
        ; "property value"
    )]
    #[test_case(
        ValidationErrorCode::CssSyntaxInvalidAtRule,
        &["style", "import"],
        "CSS syntax error in tag 'style' - saw invalid at rule '@import'."
        ; "at rule"
    )]
    #[test_case(
        ValidationErrorCode::CssSyntaxInvalidUrl,
        &["style", "a\n\t b"],
        "CSS syntax error in tag 'style' - invalid url 'a b'."
        ; "whitespace is collapsed"
    )]
    #[test_case(
        ValidationErrorCode::CssSyntaxDisallowedImportant,
        &[],
        "Usage of the !important CSS qualifier is not allowed."
        ; "no params"
    )]
    fn test_render_error_message(code: ValidationErrorCode, params: &[&str], expected: &str) {
        assert_eq!(render_error_message(&error(code, params)), expected);
    }

    #[test]
    fn test_apply_format() {
        assert_eq!(apply_format("%1 is 100%% %2", &["a".into(), " b  c ".into()]), "a is 100%  b c ");
    }

    #[test]
    fn test_render_validation_result() {
        let result = ValidationResult {
            status: ValidationStatus::Fail,
            errors: vec![error(ValidationErrorCode::CssSyntaxBadUrl, &["style amp-custom"])],
        };

        assert_eq!(
            render_validation_result(&result, "ads/style.css#top"),
            vec![
                "FAIL".to_string(),
                "ERROR: ads/style.css:2:8 CSS syntax error in tag 'style amp-custom' - bad url.".to_string(),
            ]
        );
    }
}
