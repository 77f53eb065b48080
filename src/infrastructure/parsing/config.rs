//! Parsing configuration for search result extraction
//!
//! Centralized configuration for the markup markers the parser looks for.

use serde::{Deserialize, Serialize};

use crate::infrastructure::config::daum;

/// Main parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Origin prefixed to origin-relative word links
    pub base_url: String,

    /// Markers for the search results page
    pub search_page: SearchPageSelectors,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            base_url: daum::BASE_URL.to_string(),
            search_page: SearchPageSelectors::default(),
        }
    }
}

impl ParsingConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Markers identifying the parts of a search results page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPageSelectors {
    /// Class carried by each language section
    pub entry_group_class: String,

    /// Tag of the language heading inside a section
    pub language_heading_tag: String,

    /// Tag of word anchors
    pub word_link_tag: String,

    /// Attribute holding an anchor's destination
    pub word_link_attr: String,

    /// Substring of the destination that marks a word definition page
    pub word_link_marker: String,

    /// Presentation classes of anchors that label a matched word
    pub word_link_classes: Vec<String>,

    /// Tag of a definition list
    pub definition_list_tag: String,

    /// Class of a definition list
    pub definition_list_class: String,
}

impl Default for SearchPageSelectors {
    fn default() -> Self {
        Self {
            entry_group_class: "card_word".to_string(),
            language_heading_tag: "h4".to_string(),
            word_link_tag: "a".to_string(),
            word_link_attr: "href".to_string(),
            word_link_marker: "wordid".to_string(),
            word_link_classes: vec!["txt_searchword".to_string(), "txt_cleansch".to_string()],
            definition_list_tag: "ul".to_string(),
            definition_list_class: "list_search".to_string(),
        }
    }
}
