use ampcss_css3::analysis::extract_important_declarations;
use ampcss_css3::errors::{ErrorToken, ValidationErrorCode};
use ampcss_css3::node::Stylesheet;

/// Reports every `!important` declaration. The error has no params.
pub fn validate_no_important(stylesheet: &Stylesheet, errors: &mut Vec<ErrorToken>) {
    for declaration in extract_important_declarations(stylesheet) {
        log::debug!("{} !important on {}", declaration.location, declaration.name);
        errors.push(ErrorToken::new(
            ValidationErrorCode::CssSyntaxDisallowedImportant,
            Vec::new(),
            declaration.location,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampcss_css3::parser_config::ParserConfig;
    use ampcss_css3::Css3;

    #[test]
    fn test_important_is_reported() {
        let result = Css3::parse_str("a { color: red !important;\n  top: 0 }\nb { left: 0 ! IMPORTANT }", &ParserConfig::default());

        let mut errors = Vec::new();
        validate_no_important(&result.stylesheet, &mut errors);

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.params.is_empty()));
        assert_eq!((errors[0].location.line, errors[0].location.column), (1, 4));
        assert_eq!((errors[1].location.line, errors[1].location.column), (3, 4));
    }
}
