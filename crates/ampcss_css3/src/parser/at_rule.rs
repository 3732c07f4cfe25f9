use crate::node::{strip_vendor_prefix, AtRule};
use crate::parser_config::BlockType;
use crate::tokenizer::TokenType;
use crate::Css3;

impl Css3<'_> {
    /// Parses the at-rule that starts at the current at-keyword token. How a block is parsed
    /// depends on the block type configured for the at-rule name.
    pub(crate) fn parse_an_at_rule(&mut self) -> AtRule {
        log::trace!("parse_an_at_rule");

        let start = self.stream.current();
        let name = match &start.token_type {
            TokenType::AtKeyword(name) => name.as_str(),
            _ => "",
        };
        let mut rule = AtRule::new(name, start.location);

        loop {
            self.stream.consume();
            let token_type = self.stream.current().token_type.clone();
            match token_type {
                TokenType::Semicolon | TokenType::Eof => {
                    rule.prelude.retain(|t| !t.is_eof());
                    return rule;
                }
                TokenType::LCurly => {
                    rule.prelude.retain(|t| !t.is_eof());
                    let contents = self.extract_a_simple_block();

                    let block_type = self.config.block_type_for(strip_vendor_prefix(&rule.name));
                    log::trace!("block type for @{}: {:?}", rule.name, block_type);

                    match block_type {
                        BlockType::ParseAsRules => {
                            rule.rules = Some(self.with_stream(contents, |parser| parser.parse_a_list_of_rules(false)));
                        }
                        BlockType::ParseAsDeclarations => {
                            rule.declarations =
                                self.with_stream(contents, |parser| parser.parse_a_list_of_declarations());
                            rule.rules = Some(Vec::new());
                        }
                        BlockType::ParseAsIgnore => {
                            rule.rules = Some(Vec::new());
                        }
                    }

                    return rule;
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
    use crate::node::Rule;
    use crate::parser_config::{BlockType, ParserConfig};
    use crate::tokenizer::TokenType;
    use crate::walker::Walker;
    use crate::Css3;

    fn parse_at_rule(css: &str, config: &ParserConfig) -> crate::node::AtRule {
        let result = Css3::parse_str(css, config);
        assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);

        match result.stylesheet.rules.into_iter().next() {
            Some(Rule::At(rule)) => rule,
            other => panic!("expected an at-rule, got {other:?}"),
        }
    }

    #[test]
    fn test_at_rule_without_block() {
        let rule = parse_at_rule("@import url(x.css) screen;", &ParserConfig::default());
        assert_eq!(rule.name, "import");
        assert!(!rule.has_block());
        assert_eq!(rule.prelude.len(), 4);
        assert_eq!(rule.prelude[1].token_type, TokenType::Url("x.css".into()));
    }

    #[test]
    fn test_at_rule_with_rules() {
        let result = Css3::parse_str(
            "@media screen and (min-width: 10px) { a { color: red } @supports (x) { b {} } }",
            &ParserConfig::default(),
        );
        assert!(result.errors.is_empty());

        let w = Walker::new(&result.stylesheet);
        assert_eq!(
            w.walk_to_string(),
            "[Stylesheet (1)]\n  [AtRule] name: media prelude: screen and (min-width: 10px)\n    [Rule] prelude: a\n      [Declaration] property: color important: false\n        [Whitespace]\n        [Ident] red\n        [Whitespace]\n    [AtRule] name: supports prelude: (x)\n      [Rule] prelude: b\n"
        );
    }

    #[test]
    fn test_at_rule_with_declarations() {
        let rule = parse_at_rule(
            "@font-face { font-family: x; src: url(x.woff) }",
            &ParserConfig::default(),
        );
        assert_eq!(rule.name, "font-face");
        assert!(rule.has_block());
        assert_eq!(rule.rules.as_ref().map(|r| r.len()), Some(0));
        assert_eq!(rule.declarations.len(), 2);
        assert_eq!(rule.declarations[1].name, "src");
    }

    #[test]
    fn test_vendor_prefixed_block_type() {
        let rule = parse_at_rule("@-webkit-keyframes spin { from { opacity: 0 } }", &ParserConfig::default());
        assert_eq!(rule.name, "-webkit-keyframes");
        assert_eq!(rule.prelude_ident(), Some("spin"));
        assert_eq!(rule.rules.as_ref().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_ignored_block() {
        let mut config = ParserConfig::default();
        config.at_rule_spec.insert("page".into(), BlockType::ParseAsIgnore);

        let rule = parse_at_rule("@page { margin: 1cm }", &config);
        assert!(rule.has_block());
        assert!(rule.declarations.is_empty());
        assert_eq!(rule.rules.as_ref().map(|r| r.len()), Some(0));
    }
}
