use ampcss_css3::errors::{ErrorToken, ValidationErrorCode};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Pass,
    Fail,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Pass => write!(f, "PASS"),
            ValidationStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Higher level classification of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// A problem in the author stylesheet (`style amp-custom`)
    AuthorStylesheetProblem,
    Generic,
}

fn is_author_stylesheet(tag_spec_name: &str) -> bool {
    tag_spec_name == "style amp-custom" || tag_spec_name == "style amp-custom (AMP4ADS)"
}

impl ErrorCategory {
    fn of(code: ValidationErrorCode, params: &[String]) -> Self {
        use ValidationErrorCode::*;

        let stylesheet_code = !matches!(
            code,
            CssSyntaxUnterminatedBlock
                | CssSyntaxMalformedMediaQuery
                | CssSyntaxDisallowedMediaType
                | CssSyntaxDisallowedMediaFeature
                | CssExcessivelyNested
        );

        match params.first() {
            Some(tag) if stylesheet_code && is_author_stylesheet(tag) => ErrorCategory::AuthorStylesheetProblem,
            _ if code == CssSyntaxDisallowedImportant => ErrorCategory::AuthorStylesheetProblem,
            _ => ErrorCategory::Generic,
        }
    }
}

/// An error as reported to the caller of the validator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub severity: Severity,
    pub code: ValidationErrorCode,
    pub line: usize,
    pub col: usize,
    pub params: Vec<String>,
    pub category: ErrorCategory,
}

impl ValidationError {
    /// Converts an error token. The first param is replaced with the tag spec name.
    pub fn from_token(token: &ErrorToken, severity: Severity, tag_spec_name: &str) -> Self {
        let mut params = token.params.clone();
        if let Some(first) = params.first_mut() {
            *first = tag_spec_name.to_string();
        }

        Self {
            severity,
            code: token.code,
            line: token.line(),
            col: token.col(),
            category: ErrorCategory::of(token.code, &params),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub errors: Vec<ValidationError>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            status: ValidationStatus::Pass,
            errors: Vec::new(),
        }
    }

    /// Adds an error. Any error with `Error` severity fails the result.
    pub fn add(&mut self, error: ValidationError) {
        if error.severity == Severity::Error {
            self.status = ValidationStatus::Fail;
        }
        self.errors.push(error);
    }

    pub fn is_pass(&self) -> bool {
        self.status == ValidationStatus::Pass
    }

    /// Sum of the specificity of all errors. Of two results for the same input, the one
    /// with the higher value describes the problems more precisely.
    pub fn specificity(&self) -> u32 {
        self.errors.iter().map(|e| e.code.specificity()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampcss_shared::char_stream::Location;
    use serde_json::json;

    #[test]
    fn test_from_token_replaces_context() {
        let token = ErrorToken::new(
            ValidationErrorCode::CssSyntaxInvalidAtRule,
            vec!["style".into(), "import".into()],
            Location::new(3, 1, 20),
        );
        let error = ValidationError::from_token(&token, Severity::Error, "style amp-custom");

        assert_eq!(error.params, vec!["style amp-custom", "import"]);
        assert_eq!((error.line, error.col), (3, 1));
        assert_eq!(error.category, ErrorCategory::AuthorStylesheetProblem);

        let error = ValidationError::from_token(&token, Severity::Error, "style amp-keyframes");
        assert_eq!(error.category, ErrorCategory::Generic);
    }

    #[test]
    fn test_status() {
        let token = ErrorToken::with_style_context(ValidationErrorCode::CssSyntaxMalformedMediaQuery, Location::default());

        let mut result = ValidationResult::new();
        result.add(ValidationError::from_token(&token, Severity::Warning, "style amp-custom"));
        assert!(result.is_pass());

        result.add(ValidationError::from_token(&token, Severity::Error, "style amp-custom"));
        assert!(!result.is_pass());
        assert_eq!(result.specificity(), 118);
    }

    #[test]
    fn test_serialize() {
        let token = ErrorToken::new(ValidationErrorCode::CssSyntaxDisallowedImportant, vec![], Location::new(1, 4, 4));
        let mut result = ValidationResult::new();
        result.add(ValidationError::from_token(&token, Severity::Error, "style amp-custom"));

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "status": "FAIL",
                "errors": [{
                    "severity": "ERROR",
                    "code": "CSS_SYNTAX_DISALLOWED_IMPORTANT",
                    "line": 1,
                    "col": 4,
                    "params": [],
                    "category": "AUTHOR_STYLESHEET_PROBLEM",
                }],
            })
        );
    }
}
