//! CSS rules for AMP4ADS creatives
//!
//! - `position` may not be `fixed` or `sticky`.
//! - `transition` may only animate `opacity` and `transform`.
//! - Keyframes may only set `transform`, `opacity` and `animation-timing-function`.
use ampcss_css3::errors::{ErrorToken, ValidationErrorCode};
use ampcss_css3::node::{strip_vendor_prefix, AtRule, Declaration, QualifiedRule, Stylesheet};
use ampcss_css3::visitor::RuleVisitor;

const TRANSITION_ALLOWED: &str = "['opacity', 'transform']";
const KEYFRAMES_ALLOWED: &str = "['animation-timing-function', 'opacity', 'transform']";

struct Amp4AdsVisitor<'a, 'e> {
    errors: &'e mut Vec<ErrorToken>,
    /// Set while visiting the contents of a `@keyframes` rule. Keyframes can not contain
    /// at-rules, so a single level is enough.
    in_keyframes: Option<&'a AtRule>,
}

impl Amp4AdsVisitor<'_, '_> {
    fn add_error(&mut self, code: ValidationErrorCode, params: &[&str], declaration: &Declaration) {
        log::debug!("{} {} in AMP4ADS stylesheet", declaration.location, code);

        let params = params.iter().map(|p| p.to_string()).collect();
        self.errors.push(ErrorToken::new(code, params, declaration.location));
    }
}

impl<'a> RuleVisitor<'a> for Amp4AdsVisitor<'a, '_> {
    fn visit_declaration(&mut self, declaration: &'a Declaration) {
        if declaration.name != "position" {
            return;
        }

        let ident = declaration.first_ident();
        if ident == "fixed" || ident == "sticky" {
            self.add_error(
                ValidationErrorCode::CssSyntaxDisallowedPropertyValue,
                &["style", "position", ident],
                declaration,
            );
        }
    }

    fn visit_qualified_rule(&mut self, rule: &'a QualifiedRule) {
        for declaration in &rule.declarations {
            let name = strip_vendor_prefix(&declaration.name);

            if name == "transition" {
                let ident = declaration.first_ident();
                let property = strip_vendor_prefix(ident);
                if property != "opacity" && property != "transform" {
                    self.add_error(
                        ValidationErrorCode::CssSyntaxDisallowedPropertyValueWithHint,
                        &["style", "transition", ident, TRANSITION_ALLOWED],
                        declaration,
                    );
                }
            }

            if let Some(keyframes) = self.in_keyframes {
                if name != "transform" && name != "opacity" && name != "animation-timing-function" {
                    let keyframes_name = keyframes.prelude_ident().unwrap_or(keyframes.name.as_str());
                    self.add_error(
                        ValidationErrorCode::CssSyntaxPropertyDisallowedWithinAtRule,
                        &["style", declaration.name.as_str(), keyframes_name, KEYFRAMES_ALLOWED],
                        declaration,
                    );
                }
            }
        }
    }

    fn visit_at_rule(&mut self, at_rule: &'a AtRule) {
        self.in_keyframes = match strip_vendor_prefix(&at_rule.name) {
            "keyframes" => Some(at_rule),
            _ => None,
        };
    }

    fn leave_at_rule(&mut self, _at_rule: &'a AtRule) {
        self.in_keyframes = None;
    }
}

/// Checks the stylesheet against the AMP4ADS rules and appends an error for every violation
pub fn validate_amp4ads_css(stylesheet: &Stylesheet, errors: &mut Vec<ErrorToken>) {
    let mut visitor = Amp4AdsVisitor {
        errors,
        in_keyframes: None,
    };
    stylesheet.accept(&mut visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampcss_css3::parser_config::ParserConfig;
    use ampcss_css3::Css3;
    use test_case::test_case;

    fn check(css: &str) -> Vec<ErrorToken> {
        let result = Css3::parse_str(css, &ParserConfig::default());
        assert!(result.errors.is_empty(), "unexpected parse errors: {:?}", result.errors);

        let mut errors = Vec::new();
        validate_amp4ads_css(&result.stylesheet, &mut errors);
        errors
    }

    fn params(error: &ErrorToken) -> Vec<&str> {
        error.params.iter().map(String::as_str).collect()
    }

    #[test_case("a { position: fixed; }", "fixed" ; "fixed")]
    #[test_case("a { position:sticky }", "sticky" ; "sticky without whitespace")]
    #[test_case("@media screen { a { top: 0; position: fixed } }", "fixed" ; "inside media")]
    fn test_disallowed_position(css: &str, value: &str) {
        let errors = check(css);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ValidationErrorCode::CssSyntaxDisallowedPropertyValue);
        assert_eq!(params(&errors[0]), vec!["style", "position", value]);
    }

    #[test_case("a { position: static; }" ; "static")]
    #[test_case("a { position: absolute }" ; "absolute")]
    #[test_case("a { -webkit-position: fixed }" ; "prefixed property is not checked")]
    #[test_case("a { transition: opacity 1s, left 2s }" ; "only the first transition is checked")]
    #[test_case("a { -moz-transition: -webkit-transform 1s }" ; "prefixed transform")]
    #[test_case("@-webkit-keyframes x { 50% { -webkit-transform: none; animation-timing-function: ease } }" ; "prefixed keyframes")]
    #[test_case("@media x { a { color: red } } @keyframes y { to { opacity: 0 } } b { color: blue }" ; "keyframes context is reset")]
    fn test_allowed(css: &str) {
        assert!(check(css).is_empty());
    }

    #[test]
    fn test_transition_hint() {
        let errors = check("a { transition: left 1s; }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ValidationErrorCode::CssSyntaxDisallowedPropertyValueWithHint);
        assert_eq!(
            params(&errors[0]),
            vec!["style", "transition", "left", "['opacity', 'transform']"]
        );
        assert_eq!(errors[0].location.column, 4);
    }

    #[test]
    fn test_transition_without_ident() {
        let errors = check("a { transition: 1s }");
        assert_eq!(errors.len(), 1);
        assert_eq!(params(&errors[0])[2], "");
    }

    #[test]
    fn test_keyframes() {
        let errors = check("@keyframes spin {\n  from { color: red; transform: none }\n  to { -webkit-left: 0 }\n}");
        assert_eq!(errors.len(), 2);

        assert_eq!(errors[0].code, ValidationErrorCode::CssSyntaxPropertyDisallowedWithinAtRule);
        assert_eq!(
            params(&errors[0]),
            vec![
                "style",
                "color",
                "spin",
                "['animation-timing-function', 'opacity', 'transform']"
            ]
        );
        assert_eq!(errors[0].location.line, 2);
        assert_eq!(errors[0].location.column, 9);

        assert_eq!(params(&errors[1])[1], "-webkit-left");
        assert_eq!(errors[1].location.line, 3);
    }

    #[test]
    fn test_keyframes_without_name() {
        let errors = check("@keyframes { from { color: red } }");
        assert_eq!(errors.len(), 1);
        assert_eq!(params(&errors[0])[2], "keyframes");
    }

    #[test]
    fn test_transition_inside_keyframes() {
        let errors = check("@keyframes k { from { transition: top 1s } }");
        let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ValidationErrorCode::CssSyntaxDisallowedPropertyValueWithHint,
                ValidationErrorCode::CssSyntaxPropertyDisallowedWithinAtRule,
            ]
        );
    }

    #[test]
    fn test_leave_clears_keyframes_unconditionally() {
        // The nested @media leaves the keyframes context before `to` is visited
        let errors = check("@keyframes k { @media x { } to { color: red } }");
        assert!(errors.is_empty());
    }
}
