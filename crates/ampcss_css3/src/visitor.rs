//! Traversal of a parsed stylesheet.
//!
//! A rule set implements [`RuleVisitor`] and overrides the hooks it needs. The traversal is
//! depth first in document order:
//!
//! - `visit_stylesheet`, then every top level rule, then `leave_stylesheet`
//! - for an at-rule: `visit_at_rule`, its nested rules, its declarations, `leave_at_rule`
//! - for a qualified rule: `visit_qualified_rule`, its declarations, `leave_qualified_rule`
//!
//! The visitor is generic over the lifetime of the stylesheet, so it can keep references to
//! nodes it has seen (for instance the enclosing `@keyframes` rule).
use crate::node::{AtRule, Declaration, QualifiedRule, Rule, Stylesheet};

#[allow(unused_variables)]
pub trait RuleVisitor<'a> {
    fn visit_stylesheet(&mut self, stylesheet: &'a Stylesheet) {}
    fn leave_stylesheet(&mut self, stylesheet: &'a Stylesheet) {}

    fn visit_at_rule(&mut self, at_rule: &'a AtRule) {}
    fn leave_at_rule(&mut self, at_rule: &'a AtRule) {}

    fn visit_qualified_rule(&mut self, rule: &'a QualifiedRule) {}
    fn leave_qualified_rule(&mut self, rule: &'a QualifiedRule) {}

    fn visit_declaration(&mut self, declaration: &'a Declaration) {}
    fn leave_declaration(&mut self, declaration: &'a Declaration) {}
}

impl Stylesheet {
    pub fn accept<'a>(&'a self, visitor: &mut dyn RuleVisitor<'a>) {
        visitor.visit_stylesheet(self);
        for rule in &self.rules {
            rule.accept(visitor);
        }
        visitor.leave_stylesheet(self);
    }
}

impl Rule {
    pub fn accept<'a>(&'a self, visitor: &mut dyn RuleVisitor<'a>) {
        match self {
            Rule::Qualified(rule) => rule.accept(visitor),
            Rule::At(rule) => rule.accept(visitor),
        }
    }
}

impl AtRule {
    pub fn accept<'a>(&'a self, visitor: &mut dyn RuleVisitor<'a>) {
        visitor.visit_at_rule(self);
        for rule in self.rules.iter().flatten() {
            rule.accept(visitor);
        }
        for declaration in &self.declarations {
            declaration.accept(visitor);
        }
        visitor.leave_at_rule(self);
    }
}

impl QualifiedRule {
    pub fn accept<'a>(&'a self, visitor: &mut dyn RuleVisitor<'a>) {
        visitor.visit_qualified_rule(self);
        for declaration in &self.declarations {
            declaration.accept(visitor);
        }
        visitor.leave_qualified_rule(self);
    }
}

impl Declaration {
    pub fn accept<'a>(&'a self, visitor: &mut dyn RuleVisitor<'a>) {
        visitor.visit_declaration(self);
        visitor.leave_declaration(self);
    }
}
