//! Error tokens that are emitted by the tokenizer, the parser and the rule visitors
use ampcss_shared::char_stream::Location;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Validation error codes. The names are shared with the HTML validator that consumes the
/// errors, so they serialize to their `CSS_SYNTAX_*` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorCode {
    CssSyntaxStrayTrailingBackslash,
    CssSyntaxUnterminatedComment,
    CssSyntaxUnterminatedString,
    CssSyntaxBadUrl,
    CssSyntaxEofInPreludeOfQualifiedRule,
    CssSyntaxUnterminatedBlock,
    CssSyntaxInvalidDeclaration,
    CssSyntaxIncompleteDeclaration,
    CssSyntaxInvalidAtRule,
    CssSyntaxMalformedMediaQuery,
    CssSyntaxDisallowedMediaType,
    CssSyntaxDisallowedMediaFeature,
    CssSyntaxDisallowedPropertyValue,
    CssSyntaxDisallowedPropertyValueWithHint,
    CssSyntaxPropertyDisallowedWithinAtRule,
    CssSyntaxDisallowedImportant,
    CssSyntaxMissingUrl,
    CssSyntaxInvalidUrl,
    CssSyntaxInvalidUrlProtocol,
    CssSyntaxDisallowedRelativeUrl,
    CssSyntaxDisallowedDomain,
    CssExcessivelyNested,
}

impl ValidationErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CssSyntaxStrayTrailingBackslash => "CSS_SYNTAX_STRAY_TRAILING_BACKSLASH",
            Self::CssSyntaxUnterminatedComment => "CSS_SYNTAX_UNTERMINATED_COMMENT",
            Self::CssSyntaxUnterminatedString => "CSS_SYNTAX_UNTERMINATED_STRING",
            Self::CssSyntaxBadUrl => "CSS_SYNTAX_BAD_URL",
            Self::CssSyntaxEofInPreludeOfQualifiedRule => "CSS_SYNTAX_EOF_IN_PRELUDE_OF_QUALIFIED_RULE",
            Self::CssSyntaxUnterminatedBlock => "CSS_SYNTAX_UNTERMINATED_BLOCK",
            Self::CssSyntaxInvalidDeclaration => "CSS_SYNTAX_INVALID_DECLARATION",
            Self::CssSyntaxIncompleteDeclaration => "CSS_SYNTAX_INCOMPLETE_DECLARATION",
            Self::CssSyntaxInvalidAtRule => "CSS_SYNTAX_INVALID_AT_RULE",
            Self::CssSyntaxMalformedMediaQuery => "CSS_SYNTAX_MALFORMED_MEDIA_QUERY",
            Self::CssSyntaxDisallowedMediaType => "CSS_SYNTAX_DISALLOWED_MEDIA_TYPE",
            Self::CssSyntaxDisallowedMediaFeature => "CSS_SYNTAX_DISALLOWED_MEDIA_FEATURE",
            Self::CssSyntaxDisallowedPropertyValue => "CSS_SYNTAX_DISALLOWED_PROPERTY_VALUE",
            Self::CssSyntaxDisallowedPropertyValueWithHint => "CSS_SYNTAX_DISALLOWED_PROPERTY_VALUE_WITH_HINT",
            Self::CssSyntaxPropertyDisallowedWithinAtRule => "CSS_SYNTAX_PROPERTY_DISALLOWED_WITHIN_AT_RULE",
            Self::CssSyntaxDisallowedImportant => "CSS_SYNTAX_DISALLOWED_IMPORTANT",
            Self::CssSyntaxMissingUrl => "CSS_SYNTAX_MISSING_URL",
            Self::CssSyntaxInvalidUrl => "CSS_SYNTAX_INVALID_URL",
            Self::CssSyntaxInvalidUrlProtocol => "CSS_SYNTAX_INVALID_URL_PROTOCOL",
            Self::CssSyntaxDisallowedRelativeUrl => "CSS_SYNTAX_DISALLOWED_RELATIVE_URL",
            Self::CssSyntaxDisallowedDomain => "CSS_SYNTAX_DISALLOWED_DOMAIN",
            Self::CssExcessivelyNested => "CSS_EXCESSIVELY_NESTED",
        }
    }

    /// Relative specificity of the error. When several candidate results are compared, the
    /// one with the most specific errors is reported.
    pub fn specificity(&self) -> u32 {
        match self {
            Self::CssSyntaxInvalidAtRule => 20,
            Self::CssSyntaxStrayTrailingBackslash => 39,
            Self::CssSyntaxUnterminatedComment => 40,
            Self::CssSyntaxUnterminatedString => 41,
            Self::CssSyntaxBadUrl => 42,
            Self::CssSyntaxEofInPreludeOfQualifiedRule => 43,
            Self::CssSyntaxInvalidDeclaration => 44,
            Self::CssSyntaxIncompleteDeclaration => 45,
            Self::CssSyntaxMissingUrl => 50,
            Self::CssSyntaxInvalidUrl => 51,
            Self::CssSyntaxInvalidUrlProtocol => 52,
            Self::CssSyntaxDisallowedRelativeUrl => 53,
            Self::CssSyntaxDisallowedDomain => 54,
            Self::CssSyntaxUnterminatedBlock => 58,
            Self::CssSyntaxMalformedMediaQuery
            | Self::CssSyntaxDisallowedMediaType
            | Self::CssSyntaxDisallowedMediaFeature => 59,
            Self::CssSyntaxDisallowedPropertyValue
            | Self::CssSyntaxDisallowedPropertyValueWithHint
            | Self::CssSyntaxPropertyDisallowedWithinAtRule => 60,
            Self::CssSyntaxDisallowedImportant => 61,
            Self::CssExcessivelyNested => 62,
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error found in a stylesheet. The location is always copied from the token or node that
/// triggered the error. The first param is the name of the context (`style` by default) and is
/// replaced by the caller with the name of the tag the stylesheet came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorToken {
    pub code: ValidationErrorCode,
    pub params: Vec<String>,
    pub location: Location,
}

impl ErrorToken {
    pub fn new(code: ValidationErrorCode, params: Vec<String>, location: Location) -> Self {
        Self {
            code,
            params,
            location,
        }
    }

    /// Creates an error with only the default `style` context param
    pub fn with_style_context(code: ValidationErrorCode, location: Location) -> Self {
        Self::new(code, vec!["style".to_string()], location)
    }

    /// Line number, starting at 1
    pub fn line(&self) -> usize {
        self.location.line
    }

    /// Column, starting at 0
    pub fn col(&self) -> usize {
        self.location.column
    }
}

impl fmt::Display for ErrorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.location, self.code, self.params.join(", "))
    }
}

impl Serialize for ErrorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ErrorToken", 4)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("params", &self.params)?;
        state.serialize_field("line", &self.line())?;
        state.serialize_field("col", &self.col())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_error_token_wire_shape() {
        let error = ErrorToken::new(
            ValidationErrorCode::CssSyntaxDisallowedPropertyValue,
            vec!["style".into(), "position".into(), "fixed".into()],
            Location::new(1, 4, 4),
        );

        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(
            value,
            json!({
                "code": "CSS_SYNTAX_DISALLOWED_PROPERTY_VALUE",
                "params": ["style", "position", "fixed"],
                "line": 1,
                "col": 4,
            })
        );
    }

    #[test_case(ValidationErrorCode::CssSyntaxEofInPreludeOfQualifiedRule ; "eof in prelude")]
    #[test_case(ValidationErrorCode::CssSyntaxDisallowedPropertyValueWithHint ; "with hint")]
    #[test_case(ValidationErrorCode::CssSyntaxInvalidUrlProtocol ; "url protocol")]
    #[test_case(ValidationErrorCode::CssExcessivelyNested ; "excessively nested")]
    fn test_code_serializes_as_display_name(code: ValidationErrorCode) {
        assert_eq!(serde_json::to_value(code).unwrap(), json!(code.to_string()));
    }

    #[test]
    fn test_error_token_display() {
        let error = ErrorToken::with_style_context(
            ValidationErrorCode::CssSyntaxUnterminatedString,
            Location::new(2, 3, 10),
        );
        assert_eq!(error.to_string(), "2:3 CSS_SYNTAX_UNTERMINATED_STRING [style]");
    }
}
