//! Visitors that extract information from a parsed stylesheet: the urls it references, the
//! media types and features of its `@media` rules and its `!important` declarations.
mod important;
mod media_query;
mod urls;

pub use important::extract_important_declarations;
pub use media_query::parse_media_queries;
pub use urls::{extract_urls, extract_urls_from_declaration, ParsedCssUrl};
