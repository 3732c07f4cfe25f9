//! CSS spec profiles. A profile lists the allowed at-rules and how their blocks are parsed,
//! whether `!important` is allowed, which url protocols may be referenced and whether the
//! AMP4ADS rules apply.
use ampcss_css3::node::strip_vendor_prefix;
use ampcss_css3::parser_config::{BlockType, ParserConfig};
use ampcss_shared::char_stream::Location;
use ampcss_shared::errors::Error;
use ampcss_shared::types::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// The profiles that ship with the validator
const BUILTIN_SPECS_JSON: &str = include_str!("../resources/css_specs.json");

/// Name of the at-rule entry that applies to every at-rule without its own entry
pub const DEFAULT_AT_RULE: &str = "$DEFAULT";

/// How an at-rule block is treated by a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AtRuleBlockType {
    /// The at-rule is not allowed. Its block is skipped by the parser.
    ParseAsError,
    ParseAsIgnore,
    ParseAsRules,
    ParseAsDeclarations,
}

impl AtRuleBlockType {
    fn parser_block_type(self) -> BlockType {
        match self {
            Self::ParseAsError | Self::ParseAsIgnore => BlockType::ParseAsIgnore,
            Self::ParseAsRules => BlockType::ParseAsRules,
            Self::ParseAsDeclarations => BlockType::ParseAsDeclarations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtRuleSpec {
    pub name: String,
    pub block_type: AtRuleBlockType,
}

/// Restrictions on the urls a stylesheet may reference
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlSpec {
    /// Lowercase protocols without the trailing colon
    pub allowed_protocol: Vec<String>,
    pub allow_relative: bool,
    pub allow_empty: bool,
    /// Lowercase host names that may not be referenced
    pub disallowed_domain: Vec<String>,
}

/// Allowed media types and features of `@media` rules
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaQuerySpec {
    /// Report problems as errors instead of warnings
    pub issues_as_error: bool,
    /// Lowercase media types without vendor prefix
    pub media_type: Vec<String>,
    /// Lowercase media features without vendor prefix and without `min-`/`max-`
    pub feature: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssSpec {
    /// Name of the profile, taken from its key in the json file
    #[serde(skip)]
    pub name: String,
    /// Reported as the first param of every error
    pub tag_spec_name: String,
    pub at_rule_spec: Vec<AtRuleSpec>,
    #[serde(default)]
    pub allow_important: bool,
    #[serde(default)]
    pub validate_amp4ads: bool,
    #[serde(default)]
    pub image_url_spec: UrlSpec,
    #[serde(default)]
    pub font_url_spec: UrlSpec,
    /// When set, media queries are parsed and checked against it
    #[serde(default)]
    pub media_query_spec: Option<MediaQuerySpec>,
}

impl CssSpec {
    /// Loads all profiles from a json object keyed by profile name
    pub fn load_profiles(json: &str) -> Result<BTreeMap<String, CssSpec>> {
        let mut profiles: BTreeMap<String, CssSpec> = serde_json::from_str(json).map_err(Error::JsonSerde)?;

        for (name, spec) in profiles.iter_mut() {
            spec.name = name.clone();
            spec.check()?;
        }

        Ok(profiles)
    }

    /// Loads the profile `name` from a json object keyed by profile name
    pub fn from_json(name: &str, json: &str) -> Result<CssSpec> {
        let mut profiles = Self::load_profiles(json)?;

        match profiles.remove(name) {
            Some(spec) => Ok(spec),
            None => Err(Error::Config(format!("unknown css spec profile '{}'", name)).into()),
        }
    }

    /// Loads the profile `name` from a json profile file
    pub fn from_file(name: &str, path: impl AsRef<Path>) -> Result<CssSpec> {
        let path = path.as_ref();
        log::debug!("loading css spec profile {} from {}", name, path.display());

        let json = fs::read_to_string(path).map_err(Error::IO)?;
        Self::from_json(name, &json)
    }

    /// Returns one of the built-in profiles (`AMP` or `AMP4ADS`)
    pub fn builtin(name: &str) -> Result<CssSpec> {
        Self::from_json(name, BUILTIN_SPECS_JSON)
    }

    /// Names of the built-in profiles
    pub fn builtin_names() -> Result<Vec<String>> {
        Ok(Self::load_profiles(BUILTIN_SPECS_JSON)?.into_keys().collect())
    }

    fn check(&self) -> Result<()> {
        let defaults = self.at_rule_spec.iter().filter(|s| s.name == DEFAULT_AT_RULE).count();
        if defaults != 1 {
            return Err(Error::Config(format!(
                "css spec '{}' needs exactly one {} at-rule entry, found {}",
                self.name, DEFAULT_AT_RULE, defaults
            ))
            .into());
        }

        Ok(())
    }

    fn default_block_type(&self) -> AtRuleBlockType {
        self.at_rule_spec
            .iter()
            .find(|s| s.name == DEFAULT_AT_RULE)
            .map(|s| s.block_type)
            .unwrap_or(AtRuleBlockType::ParseAsError)
    }

    /// Returns how the at-rule with the given name is treated. Vendor prefixes are ignored.
    pub fn block_type_for(&self, at_rule_name: &str) -> AtRuleBlockType {
        let name = strip_vendor_prefix(at_rule_name).to_ascii_lowercase();

        self.at_rule_spec
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.block_type)
            .unwrap_or_else(|| self.default_block_type())
    }

    pub fn is_at_rule_valid(&self, at_rule_name: &str) -> bool {
        self.block_type_for(at_rule_name) != AtRuleBlockType::ParseAsError
    }

    /// Parser configuration for stylesheets of this profile. Disallowed at-rules are parsed as
    /// ignored blocks and reported afterwards.
    pub fn parser_config(&self, location: Location) -> ParserConfig {
        let mut at_rule_spec = HashMap::new();
        for spec in self.at_rule_spec.iter().filter(|s| s.name != DEFAULT_AT_RULE) {
            at_rule_spec.insert(spec.name.to_ascii_lowercase(), spec.block_type.parser_block_type());
        }

        ParserConfig {
            at_rule_spec,
            default_spec: self.default_block_type().parser_block_type(),
            location,
        }
    }
}
