//! Daum dictionary quick-search
//!
//! Fetches a dictionary search results page, extracts the translation
//! entries of every language section, and turns them into launcher items.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export the main entry points
pub use application::DictionaryLookup;
pub use domain::{Entry, ResultGroup, ResultItem};
pub use infrastructure::parsing::{HtmlParser, SearchResultParser};
pub use utils::{Nested, flatten};

/// Parse a search results page with the default markers
pub fn parse_into_items(html: &str) -> infrastructure::DictResult<Vec<ResultItem>> {
    let parser = SearchResultParser::new()?;
    Ok(parser.parse(html))
}
