//! Validation of stylesheets against a CSS spec profile
//!
//! The [`CssValidator`] tokenizes and parses a stylesheet, then runs every rule-set of its
//! profile over the parsed tree. All problems end up in a single [`ValidationResult`] in the
//! order in which they were found.
use crate::css_spec::CssSpec;
use crate::result::{Severity, ValidationError, ValidationResult};
use ampcss_css3::analysis::extract_urls;
use ampcss_css3::errors::ErrorToken;
use ampcss_css3::Css3;
use ampcss_shared::char_stream::Location;

pub mod amp4ads;
pub mod at_rule;
pub mod css_spec;
pub mod format;
pub mod important;
pub mod media_query;
pub mod result;
pub mod url_check;

pub use amp4ads::validate_amp4ads_css;

/// Validates stylesheets against a single profile
pub struct CssValidator {
    spec: CssSpec,
}

impl CssValidator {
    pub fn new(spec: CssSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &CssSpec {
        &self.spec
    }

    /// Validates a standalone stylesheet
    pub fn validate(&self, css: &str) -> ValidationResult {
        self.validate_at(css, Location::default())
    }

    /// Validates a stylesheet that starts at `location` in its host document
    pub fn validate_at(&self, css: &str, location: Location) -> ValidationResult {
        log::trace!("validating stylesheet against profile {}", self.spec.name);

        let config = self.spec.parser_config(location);
        let parsed = Css3::parse_str(css, &config);
        let stylesheet = parsed.stylesheet;

        let mut css_errors = parsed.errors;
        let mut css_warnings = Vec::new();

        let mut urls = Vec::new();
        extract_urls(&stylesheet, &mut urls, &mut css_errors);

        if let Some(media_query_spec) = &self.spec.media_query_spec {
            let buffer = match media_query_spec.issues_as_error {
                true => &mut css_errors,
                false => &mut css_warnings,
            };
            media_query::validate_media_queries(&stylesheet, media_query_spec, buffer);
        }

        if self.spec.validate_amp4ads {
            validate_amp4ads_css(&stylesheet, &mut css_errors);
        }

        let mut result = ValidationResult::new();
        self.add_all(&mut result, &css_errors, Severity::Error);
        self.add_all(&mut result, &css_warnings, Severity::Warning);

        if !self.spec.allow_important {
            let mut important_errors = Vec::new();
            important::validate_no_important(&stylesheet, &mut important_errors);
            self.add_all(&mut result, &important_errors, Severity::Error);
        }

        let mut url_errors = Vec::new();
        for url in &urls {
            let url_spec = match url.at_rule_scope.as_str() {
                "font-face" => &self.spec.font_url_spec,
                _ => &self.spec.image_url_spec,
            };
            url_errors.extend(url_check::validate_url(url_spec, url));
        }
        self.add_all(&mut result, &url_errors, Severity::Error);

        let mut at_rule_errors = Vec::new();
        at_rule::validate_at_rules(&stylesheet, &self.spec, &mut at_rule_errors);
        self.add_all(&mut result, &at_rule_errors, Severity::Error);

        log::debug!(
            "profile {}: {} with {} errors",
            self.spec.name,
            result.status,
            result.errors.len()
        );

        result
    }

    fn add_all(&self, result: &mut ValidationResult, tokens: &[ErrorToken], severity: Severity) {
        for token in tokens {
            result.add(ValidationError::from_token(token, severity, &self.spec.tag_spec_name));
        }
    }
}
