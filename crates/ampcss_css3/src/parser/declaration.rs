use crate::errors::{ErrorToken, ValidationErrorCode};
use crate::node::Declaration;
use crate::tokenizer::{Token, TokenType};
use crate::Css3;

impl Css3<'_> {
    /// Parses a list of declarations until the end of the current stream. At-rules are
    /// parsed to skip them, but are reported as errors as they are not allowed here.
    pub(crate) fn parse_a_list_of_declarations(&mut self) -> Vec<Declaration> {
        log::trace!("parse_a_list_of_declarations");

        let mut declarations = Vec::new();
        loop {
            self.stream.consume();
            let token_type = self.stream.current().token_type.clone();
            match token_type {
                TokenType::Whitespace | TokenType::Semicolon => {}
                TokenType::Eof => return declarations,
                TokenType::AtKeyword(_) => {
                    let rule = self.parse_an_at_rule();
                    log::debug!("{} at-rule @{} inside a declaration list", rule.location, rule.name);
                    self.errors.push(ErrorToken::new(
                        ValidationErrorCode::CssSyntaxInvalidAtRule,
                        vec!["style".to_string(), rule.name],
                        rule.location,
                    ));
                }
                TokenType::Ident(_) => {
                    if let Some(declaration) = self.parse_a_declaration() {
                        declarations.push(declaration);
                    }
                }
                _ => {
                    let location = self.stream.current().location;
                    self.add_error(ValidationErrorCode::CssSyntaxInvalidDeclaration, location);

                    self.stream.reconsume();
                    while !self.at_declaration_end() {
                        self.stream.consume();
                        let mut skipped = Vec::new();
                        if !self.consume_a_component_value(&mut skipped, 0) {
                            self.add_nesting_error();
                        }
                    }
                }
            }
        }
    }

    /// Parses the declaration that starts at the current ident token. Returns `None` when the
    /// colon is missing, in which case the tokens up to the next `;` are skipped.
    fn parse_a_declaration(&mut self) -> Option<Declaration> {
        log::trace!("parse_a_declaration");

        let start = self.stream.current().clone();
        let TokenType::Ident(name) = &start.token_type else {
            return None;
        };
        let mut declaration = Declaration::new(name, start.location);

        while self.stream.next().is_whitespace() {
            self.stream.consume();
        }

        self.stream.consume();
        if self.stream.current().token_type != TokenType::Colon {
            self.add_error(ValidationErrorCode::CssSyntaxIncompleteDeclaration, start.location);

            self.stream.reconsume();
            while !self.at_declaration_end() {
                self.stream.consume();
            }
            return None;
        }

        let mut value = Vec::new();
        while !self.at_declaration_end() {
            self.stream.consume();
            if !self.consume_a_component_value(&mut value, 0) {
                self.add_nesting_error();
            }
        }
        value.retain(|t| !t.is_eof());

        declaration.important = strip_important(&mut value);
        declaration.value = value;

        Some(declaration)
    }
}

/// Removes a trailing `! important` (whitespace allowed around both parts) from the value.
/// Returns true when it was found.
fn strip_important(value: &mut Vec<Token>) -> bool {
    let mut found_important = false;

    for index in (0..value.len()).rev() {
        let token = &value[index];
        if token.is_whitespace() {
            continue;
        }

        if token.ascii_match("important") {
            found_important = true;
        } else if found_important && token.is_delim('!') {
            value.truncate(index);
            return true;
        } else {
            return false;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use crate::errors::ValidationErrorCode;
    use crate::node::{Declaration, Rule};
    use crate::parser_config::ParserConfig;
    use crate::serializer::serialize_tokens;
    use crate::Css3;
    use test_case::test_case;

    fn parse_declarations(css: &str) -> (Vec<Declaration>, Vec<ValidationErrorCode>) {
        let result = Css3::parse_str(&format!("a {{{css}}}"), &ParserConfig::default());
        let errors = result.errors.iter().map(|e| e.code).collect();

        match result.stylesheet.rules.into_iter().next() {
            Some(Rule::Qualified(rule)) => (rule.declarations, errors),
            other => panic!("expected a qualified rule, got {other:?}"),
        }
    }

    #[test_case("color: red !important", true, " red " ; "important")]
    #[test_case("color: red ! IMPORTANT ", true, " red " ; "spaced and uppercase")]
    #[test_case("color: red!important", true, " red" ; "no whitespace")]
    #[test_case("color: red important", false, " red important" ; "missing bang")]
    #[test_case("color: red !importantx", false, " red !importantx" ; "other ident")]
    #[test_case("color: !important", true, " " ; "only important")]
    fn test_important(css: &str, important: bool, value: &str) {
        let (declarations, errors) = parse_declarations(css);
        assert!(errors.is_empty());
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].important, important);
        assert_eq!(serialize_tokens(&declarations[0].value), value);
    }

    #[test]
    fn test_declaration_value_keeps_blocks() {
        let (declarations, _) = parse_declarations("background: url(a.png) rgb(1, 2, 3); x: [a;b]");
        assert_eq!(declarations.len(), 2);
        assert_eq!(serialize_tokens(&declarations[0].value), " url(a.png) rgb(1, 2, 3)");
        assert_eq!(serialize_tokens(&declarations[1].value), " [a;b]");
    }

    #[test]
    fn test_incomplete_declaration() {
        let (declarations, errors) = parse_declarations("color red; width: 1px");
        assert_eq!(errors, vec![ValidationErrorCode::CssSyntaxIncompleteDeclaration]);
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, "width");
    }

    #[test]
    fn test_invalid_declaration() {
        let (declarations, errors) = parse_declarations("1px: red; (a;b); width: 1px");
        assert_eq!(errors, vec![ValidationErrorCode::CssSyntaxInvalidDeclaration; 2]);
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, "width");
    }

    #[test]
    fn test_at_rule_in_declaration_list() {
        let result = Css3::parse_str("a { @media x { b {} } color: red }", &ParserConfig::default());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ValidationErrorCode::CssSyntaxInvalidAtRule);
        assert_eq!(result.errors[0].params, vec!["style".to_string(), "media".to_string()]);
        assert_eq!(result.errors[0].location.column, 4);

        let Rule::Qualified(rule) = &result.stylesheet.rules[0] else {
            panic!("expected a qualified rule");
        };
        assert_eq!(rule.declarations.len(), 1);
        assert_eq!(rule.declarations[0].name, "color");
    }

    #[test]
    fn test_declaration_location() {
        let (declarations, _) = parse_declarations("\n  color: red;\n  width: 1px");
        assert_eq!(declarations[0].location.line, 2);
        assert_eq!(declarations[0].location.column, 2);
        assert_eq!(declarations[1].location.line, 3);
        assert_eq!(declarations[1].location.column, 2);
    }
}
