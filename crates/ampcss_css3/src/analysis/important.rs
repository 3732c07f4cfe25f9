use crate::node::{Declaration, Stylesheet};
use crate::visitor::RuleVisitor;

struct ImportantPropertyVisitor<'a> {
    important: Vec<&'a Declaration>,
}

impl<'a> RuleVisitor<'a> for ImportantPropertyVisitor<'a> {
    fn visit_declaration(&mut self, declaration: &'a Declaration) {
        if declaration.important {
            self.important.push(declaration);
        }
    }
}

/// Returns the declarations marked `!important`, in document order
pub fn extract_important_declarations(stylesheet: &Stylesheet) -> Vec<&Declaration> {
    let mut visitor = ImportantPropertyVisitor { important: Vec::new() };
    stylesheet.accept(&mut visitor);

    visitor.important
}
