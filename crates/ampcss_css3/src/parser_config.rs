use ampcss_shared::char_stream::Location;
use std::collections::HashMap;

/// Defines how the contents of an at-rule block are parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// The block contains a list of rules, like `@media`
    ParseAsRules,
    /// The block contains a list of declarations, like `@font-face`
    ParseAsDeclarations,
    /// The block is consumed but its contents are dropped
    ParseAsIgnore,
}

/// ParserConfig holds the configuration for the parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Block type per at-rule name. Names are looked up without vendor prefix.
    pub at_rule_spec: HashMap<String, BlockType>,
    /// Block type for at-rules that are not in `at_rule_spec`
    pub default_spec: BlockType,
    /// Location of the first character of the stylesheet in the containing document
    pub location: Location,
}

impl Default for ParserConfig {
    fn default() -> Self {
        let mut at_rule_spec = HashMap::new();
        at_rule_spec.insert("font-face".to_string(), BlockType::ParseAsDeclarations);
        at_rule_spec.insert("page".to_string(), BlockType::ParseAsDeclarations);
        at_rule_spec.insert("media".to_string(), BlockType::ParseAsRules);
        at_rule_spec.insert("supports".to_string(), BlockType::ParseAsRules);
        at_rule_spec.insert("keyframes".to_string(), BlockType::ParseAsRules);
        at_rule_spec.insert("document".to_string(), BlockType::ParseAsRules);

        Self {
            at_rule_spec,
            default_spec: BlockType::ParseAsRules,
            location: Location::default(),
        }
    }
}

impl ParserConfig {
    /// Configuration for the contents of a `style` attribute. Every at-rule found there is
    /// parsed as a list of declarations.
    pub fn inline_style() -> Self {
        Self {
            at_rule_spec: HashMap::new(),
            default_spec: BlockType::ParseAsDeclarations,
            location: Location::default(),
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Returns the block type for the given at-rule name, which must already be stripped of
    /// any vendor prefix
    pub fn block_type_for(&self, name: &str) -> BlockType {
        self.at_rule_spec
            .get(&name.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.default_spec)
    }
}
