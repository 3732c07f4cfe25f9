use crate::css_spec::CssSpec;
use ampcss_css3::errors::{ErrorToken, ValidationErrorCode};
use ampcss_css3::node::{AtRule, Stylesheet};
use ampcss_css3::visitor::RuleVisitor;

/// Reports every at-rule that the profile does not allow
struct InvalidAtRuleVisitor<'s, 'e> {
    spec: &'s CssSpec,
    errors: &'e mut Vec<ErrorToken>,
}

impl<'a> RuleVisitor<'a> for InvalidAtRuleVisitor<'_, '_> {
    fn visit_at_rule(&mut self, at_rule: &'a AtRule) {
        if self.spec.is_at_rule_valid(&at_rule.name) {
            return;
        }

        log::debug!("{} at-rule @{} is not allowed", at_rule.location, at_rule.name);
        self.errors.push(ErrorToken::new(
            ValidationErrorCode::CssSyntaxInvalidAtRule,
            vec!["style".to_string(), at_rule.name.clone()],
            at_rule.location,
        ));
    }
}

pub fn validate_at_rules(stylesheet: &Stylesheet, spec: &CssSpec, errors: &mut Vec<ErrorToken>) {
    let mut visitor = InvalidAtRuleVisitor { spec, errors };
    stylesheet.accept(&mut visitor);
}
