use crate::css_spec::UrlSpec;
use ampcss_css3::analysis::ParsedCssUrl;
use ampcss_css3::errors::{ErrorToken, ValidationErrorCode};
use url::{ParseError, Url};

/// Base used to check that relative urls resolve
const RELATIVE_BASE: &str = "https://relative.invalid/";

/// Scheme and host of a url that parsed successfully. Both are empty for relative urls.
struct UrlParts {
    scheme: String,
    host: String,
}

fn parse_url(url: &str) -> Option<UrlParts> {
    match Url::parse(url.trim()) {
        Ok(parsed) => Some(UrlParts {
            scheme: parsed.scheme().to_string(),
            host: parsed.host_str().unwrap_or_default().to_string(),
        }),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE).ok()?;
            let joined = base.join(url.trim()).ok()?;

            // Only a scheme relative url (`//host/path`) names a host
            let host = match url.trim_start().starts_with("//") {
                true => joined.host_str().unwrap_or_default().to_string(),
                false => String::new(),
            };
            Some(UrlParts {
                scheme: String::new(),
                host,
            })
        }
        Err(_) => None,
    }
}

/// Extracts anything before the first colon as the protocol, as long as it contains no
/// `/`, `?`, `#` or `.`. This is more aggressive than url parsing, so `java script:` is
/// still treated as a protocol.
fn protocol_prefix(url: &str) -> Option<String> {
    let (prefix, rest) = url.split_once(':')?;

    if prefix.is_empty() || prefix.contains(['/', '?', '#', '.']) {
        return None;
    }
    if rest.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return None;
    }

    Some(prefix.to_lowercase().trim_start().to_string())
}

/// Checks a url found in a stylesheet against the url spec. At most one error is returned;
/// it is located at the url.
pub fn validate_url(spec: &UrlSpec, url: &ParsedCssUrl) -> Option<ErrorToken> {
    let error = |code: ValidationErrorCode, param: Option<&str>| {
        let mut params = vec!["style".to_string()];
        params.extend(param.map(String::from));

        log::debug!("{} {} for url '{}'", url.location, code, url.url);
        Some(ErrorToken::new(code, params, url.location))
    };

    if url.url.chars().all(char::is_whitespace) {
        return match spec.allow_empty {
            true => None,
            false => error(ValidationErrorCode::CssSyntaxMissingUrl, None),
        };
    }

    let Some(parts) = parse_url(&url.url) else {
        return error(ValidationErrorCode::CssSyntaxInvalidUrl, Some(&url.url));
    };

    let protocol = protocol_prefix(&url.url).unwrap_or_else(|| parts.scheme.clone());
    if !protocol.is_empty() && !spec.allowed_protocol.contains(&protocol) {
        return error(ValidationErrorCode::CssSyntaxInvalidUrlProtocol, Some(&protocol));
    }

    if !spec.allow_relative && parts.scheme.is_empty() {
        return error(ValidationErrorCode::CssSyntaxDisallowedRelativeUrl, Some(&url.url));
    }

    let domain = parts.host.to_lowercase();
    if !domain.is_empty() && spec.disallowed_domain.contains(&domain) {
        return error(ValidationErrorCode::CssSyntaxDisallowedDomain, Some(&domain));
    }

    None
}
