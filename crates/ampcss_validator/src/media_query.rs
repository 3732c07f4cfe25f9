use crate::css_spec::MediaQuerySpec;
use ampcss_css3::analysis::parse_media_queries;
use ampcss_css3::errors::{ErrorToken, ValidationErrorCode};
use ampcss_css3::node::{strip_min_max, strip_vendor_prefix, Stylesheet};
use ampcss_css3::tokenizer::Token;

fn disallowed(token: &Token, code: ValidationErrorCode) -> ErrorToken {
    let value = token.value().unwrap_or_default().to_string();
    log::debug!("{} {} '{}'", token.location, code, value);

    ErrorToken::new(code, vec!["style".to_string(), value], token.location)
}

/// Parses the media queries of the stylesheet and reports malformed queries and media types
/// or features that the profile does not list
pub fn validate_media_queries(stylesheet: &Stylesheet, spec: &MediaQuerySpec, errors: &mut Vec<ErrorToken>) {
    let mut media_types = Vec::new();
    let mut media_features = Vec::new();
    parse_media_queries(stylesheet, &mut media_types, &mut media_features, errors);

    for token in &media_types {
        let media_type = token.value().unwrap_or_default().to_ascii_lowercase();
        if !spec.media_type.iter().any(|t| t == strip_vendor_prefix(&media_type)) {
            errors.push(disallowed(token, ValidationErrorCode::CssSyntaxDisallowedMediaType));
        }
    }

    for token in &media_features {
        let feature = token.value().unwrap_or_default().to_ascii_lowercase();
        if !spec.feature.iter().any(|f| f == strip_min_max(strip_vendor_prefix(&feature))) {
            errors.push(disallowed(token, ValidationErrorCode::CssSyntaxDisallowedMediaFeature));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampcss_css3::parser_config::ParserConfig;
    use ampcss_css3::Css3;

    fn spec() -> MediaQuerySpec {
        MediaQuerySpec {
            issues_as_error: false,
            media_type: vec!["screen".into(), "print".into()],
            feature: vec!["width".into(), "device-pixel-ratio".into()],
        }
    }

    fn check(css: &str) -> Vec<(ValidationErrorCode, String, usize)> {
        let result = Css3::parse_str(css, &ParserConfig::default());
        let mut errors = Vec::new();
        validate_media_queries(&result.stylesheet, &spec(), &mut errors);

        errors
            .into_iter()
            .map(|e| (e.code, e.params.last().cloned().unwrap_or_default(), e.location.column))
            .collect()
    }

    #[test]
    fn test_allowed_media_queries() {
        assert!(check("@media SCREEN and (max-width: 10px), print and (-webkit-min-device-pixel-ratio: 2) {}").is_empty());
    }

    #[test]
    fn test_disallowed_type_and_feature() {
        assert_eq!(
            check("@media tv and (min-color: 8) {}"),
            vec![
                (ValidationErrorCode::CssSyntaxDisallowedMediaType, "tv".to_string(), 7),
                (ValidationErrorCode::CssSyntaxDisallowedMediaFeature, "min-color".to_string(), 15),
            ]
        );
    }

    #[test]
    fn test_malformed_media_query() {
        assert_eq!(
            check("@media screen and {}"),
            vec![(ValidationErrorCode::CssSyntaxMalformedMediaQuery, "style".to_string(), 0)]
        );
    }
}
