//! HTML parsing infrastructure for dictionary search pages
//!
//! Trait-based parsing over `scraper` documents, with element selection
//! expressed as predicate queries.

pub mod config;
pub mod query;
pub mod search_result_parser;

// Re-export public types
pub use crate::infrastructure::error::{DictError, DictResult};
pub use config::{ParsingConfig, SearchPageSelectors};
pub use query::{AttrPredicate, CompiledQuery, ElementQuery};
pub use search_result_parser::SearchResultParser;

use scraper::Html;

/// Infallible, side-effect free HTML parser
pub trait HtmlParser {
    type Output;

    /// Parse an already built document
    fn parse_document(&self, html: &Html) -> Self::Output;

    /// Parse raw markup text
    fn parse(&self, html: &str) -> Self::Output {
        self.parse_document(&Html::parse_document(html))
    }
}
