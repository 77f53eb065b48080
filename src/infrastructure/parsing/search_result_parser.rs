//! Search results page parser
//!
//! Walks every language section of a results page, pulls out the matched
//! words with their links and definition lists, and projects them into
//! display items in document order.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::config::{ParsingConfig, SearchPageSelectors};
use super::query::{CompiledQuery, ElementQuery};
use super::{DictResult, HtmlParser};
use crate::domain::search_result::{Entry, ResultGroup, ResultItem, into_items};
use crate::utils::normalize_whitespace;

/// Parser for dictionary search results pages
#[derive(Debug, Clone)]
pub struct SearchResultParser {
    base_url: String,
    entry_group: CompiledQuery,
    language_heading: CompiledQuery,
    word_link: CompiledQuery,
    definition_list: CompiledQuery,
    link_attr: String,
}

impl SearchResultParser {
    /// Create a parser with default markers
    pub fn new() -> DictResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    /// Create parser with custom marker configuration
    ///
    /// Each marker set is compiled once here; a marker that does not form a
    /// valid selector is reported as [`DictError::InvalidSelector`](super::DictError).
    pub fn with_config(config: &ParsingConfig) -> DictResult<Self> {
        let selectors: &SearchPageSelectors = &config.search_page;

        Ok(Self {
            base_url: config.base_url.clone(),
            entry_group: ElementQuery::new()
                .class(&selectors.entry_group_class)
                .compile()?,
            language_heading: ElementQuery::new()
                .tag(&selectors.language_heading_tag)
                .compile()?,
            word_link: ElementQuery::new()
                .tag(&selectors.word_link_tag)
                .attr_contains(&selectors.word_link_attr, &selectors.word_link_marker)
                .any_class(&selectors.word_link_classes)
                .compile()?,
            definition_list: ElementQuery::new()
                .tag(&selectors.definition_list_tag)
                .class(&selectors.definition_list_class)
                .compile()?,
            link_attr: selectors.word_link_attr.clone(),
        })
    }

    /// Extract one group per language section, in document order
    pub fn parse_groups(&self, html: &Html) -> Vec<ResultGroup> {
        let groups: Vec<ResultGroup> = self
            .entry_group
            .find_all(html.root_element())
            .into_iter()
            .enumerate()
            .map(|(index, element)| self.extract_group(element, index))
            .collect();

        debug!(
            "Extracted {} groups ({} entries) using {}",
            groups.len(),
            groups.iter().map(ResultGroup::len).sum::<usize>(),
            self.entry_group
        );
        groups
    }

    fn extract_group(&self, group: ElementRef<'_>, index: usize) -> ResultGroup {
        let language = self
            .language_heading
            .find_first(group)
            .map(|heading| element_text(&heading))
            .unwrap_or_default();

        let anchors = self.word_link.find_all(group);
        let words: Vec<String> = anchors.iter().map(element_text).collect();
        let links: Vec<String> = anchors
            .iter()
            .filter_map(|a| a.value().attr(&self.link_attr))
            .map(|href| self.resolve_link(href))
            .collect();
        let definitions: Vec<Vec<String>> = self
            .definition_list
            .find_all(group)
            .iter()
            .map(definition_fragments)
            .collect();

        if words.len() != definitions.len() {
            warn!(
                "Group {} ({}) has {} words but {} definition lists; keeping {}",
                index,
                language,
                words.len(),
                definitions.len(),
                words.len().min(definitions.len())
            );
        }

        let entries = words
            .into_iter()
            .zip(links)
            .zip(definitions)
            .map(|((word, link), defs)| Entry::new(word, link, defs))
            .collect();

        ResultGroup::new(language, entries)
    }

    /// Prefix origin-relative destinations with the base origin
    fn resolve_link(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url, href)
        }
    }
}

impl HtmlParser for SearchResultParser {
    type Output = Vec<ResultItem>;

    fn parse_document(&self, html: &Html) -> Self::Output {
        into_items(&self.parse_groups(html))
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Non-empty text fragments of a definition list, each whitespace-collapsed
fn definition_fragments(list: &ElementRef<'_>) -> Vec<String> {
    list.text()
        .map(normalize_whitespace)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
