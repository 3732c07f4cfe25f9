use crate::errors::ValidationErrorCode;
use crate::node::{QualifiedRule, Rule};
use crate::tokenizer::TokenType;
use crate::Css3;

impl Css3<'_> {
    /// Parses a list of rules until the end of the current stream. At the top level of a
    /// stylesheet the `<!--` and `-->` markers are skipped.
    pub(crate) fn parse_a_list_of_rules(&mut self, top_level: bool) -> Vec<Rule> {
        log::trace!("parse_a_list_of_rules, top level: {top_level}");

        let mut rules = Vec::new();
        loop {
            self.stream.consume();
            let token_type = self.stream.current().token_type.clone();
            match token_type {
                TokenType::Whitespace => {}
                TokenType::Eof => return rules,
                TokenType::Cdo | TokenType::Cdc if top_level => {}
                TokenType::AtKeyword(_) => rules.push(Rule::At(self.parse_an_at_rule())),
                _ => {
                    if let Some(rule) = self.parse_a_qualified_rule() {
                        rules.push(Rule::Qualified(rule));
                    }
                }
            }
        }
    }

    /// Parses a qualified rule starting at the current token. Returns `None` when the input
    /// ends before the rule's block.
    fn parse_a_qualified_rule(&mut self) -> Option<QualifiedRule> {
        log::trace!("parse_a_qualified_rule");

        let mut rule = QualifiedRule::new(self.stream.current().location);
        self.stream.reconsume();

        loop {
            self.stream.consume();
            let token_type = self.stream.current().token_type.clone();
            match token_type {
                TokenType::Eof => {
                    self.add_error(ValidationErrorCode::CssSyntaxEofInPreludeOfQualifiedRule, rule.location);
                    return None;
                }
                TokenType::LCurly => {
                    let contents = self.extract_a_simple_block();
                    rule.prelude.retain(|t| !t.is_eof());
                    rule.declarations = self.with_stream(contents, |parser| parser.parse_a_list_of_declarations());

                    return Some(rule);
                }
                _ => {
                    if !self.consume_a_component_value(&mut rule.prelude, 0) {
                        self.add_nesting_error();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ValidationErrorCode;
    use crate::node::Rule;
    use crate::parser_config::ParserConfig;
    use crate::walker::Walker;
    use crate::Css3;

    macro_rules! test {
        ($input:expr, $expected:expr) => {
            let result = Css3::parse_str($input, &ParserConfig::default());
            assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);

            let w = Walker::new(&result.stylesheet);
            assert_eq!(w.walk_to_string(), $expected);
        };
    }

    #[test]
    fn test_parse_rule() {
        test!(
            "body { color: red }",
            "[Stylesheet (1)]\n  [Rule] prelude: body\n    [Declaration] property: color important: false\n      [Whitespace]\n      [Ident] red\n      [Whitespace]\n"
        );
        test!("body { }", "[Stylesheet (1)]\n  [Rule] prelude: body\n");
        test!(
            "a:hover, .b[c=\"d\"] {}",
            "[Stylesheet (1)]\n  [Rule] prelude: a:hover, .b[c=\"d\"]\n"
        );
    }

    #[test]
    fn test_rule_name() {
        let result = Css3::parse_str("from{}", &ParserConfig::default());
        let Rule::Qualified(rule) = &result.stylesheet.rules[0] else {
            panic!("expected a qualified rule");
        };
        assert_eq!(rule.rule_name(), "from");
    }

    #[test]
    fn test_eof_in_prelude() {
        let result = Css3::parse_str("a {} b c", &ParserConfig::default());
        assert_eq!(result.stylesheet.rules.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].code,
            ValidationErrorCode::CssSyntaxEofInPreludeOfQualifiedRule
        );
        assert_eq!(result.errors[0].location.column, 5);
    }

    #[test]
    fn test_stray_closing_brace() {
        let result = Css3::parse_str("} a { color: red }", &ParserConfig::default());
        assert!(result.errors.is_empty());
        assert_eq!(result.stylesheet.rules.len(), 1);

        let Rule::Qualified(rule) = &result.stylesheet.rules[0] else {
            panic!("expected a qualified rule");
        };
        assert_eq!(rule.location.column, 0);
        assert_eq!(rule.declarations.len(), 1);
    }

    #[test]
    fn test_cdo_inside_block_is_a_rule() {
        let result = Css3::parse_str("@media x { <!-- a {} }", &ParserConfig::default());
        let Rule::At(media) = &result.stylesheet.rules[0] else {
            panic!("expected an at-rule");
        };
        assert_eq!(media.rules.as_ref().map(|r| r.len()), Some(1));
    }
}
