//! Dictionary lookup service
//!
//! Coordinates one lookup: fetch the search page, parse it, hand back
//! display items.

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, info};

use crate::domain::search_result::ResultItem;
use crate::infrastructure::config::DictionaryConfig;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::{HtmlParser, ParsingConfig, SearchResultParser};
use crate::infrastructure::AppConfig;

/// High-level lookup service
pub struct DictionaryLookup {
    http_client: HttpClient,
    parser: SearchResultParser,
    dictionary: DictionaryConfig,
}

impl DictionaryLookup {
    /// Create a new lookup service from the application configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let http_client =
            HttpClient::with_config(config.http.clone()).context("Failed to create HTTP client")?;
        let parsing_config = ParsingConfig::default().with_base_url(&config.dictionary.base_url);
        let parser = SearchResultParser::with_config(&parsing_config)
            .context("Failed to create search result parser")?;

        Ok(Self {
            http_client,
            parser,
            dictionary: config.dictionary.clone(),
        })
    }

    /// Fetch and parse results for `query`
    pub async fn lookup(&self, query: &str) -> Result<Vec<ResultItem>> {
        let html = self
            .http_client
            .fetch_html_string(
                &self.dictionary.search_url(),
                &[(self.dictionary.query_param.as_str(), query)],
            )
            .await
            .with_context(|| format!("Failed to fetch results for '{query}'"))?;

        let items = self.parse(&html);
        info!("Found {} results for '{}'", items.len(), query);
        Ok(items)
    }

    /// Parse an already fetched results page
    pub fn parse(&self, html: &str) -> Vec<ResultItem> {
        let start = Instant::now();
        let items = self.parser.parse(html);
        debug!("Parsed {} items in {:?}", items.len(), start.elapsed());
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{http_response, serve_once};

    #[test]
    fn test_service_creation() {
        assert!(DictionaryLookup::new(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.dictionary.base_url = "not a url".to_string();
        assert!(DictionaryLookup::new(&config).is_err());
    }

    #[test]
    fn test_parse_uses_configured_origin() {
        let mut config = AppConfig::default();
        config.dictionary.base_url = "https://dic.example.org".to_string();
        let service = DictionaryLookup::new(&config).unwrap();

        let items = service.parse(
            r#"<div class="card_word"><h4>영어사전</h4>
               <a href="/word/view.do?wordid=ekw1" class="txt_searchword">apple</a>
               <ul class="list_search"><li>사과</li></ul></div>"#,
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].arg, "https://dic.example.org/word/view.do?wordid=ekw1");
    }

    #[tokio::test]
    async fn test_lookup_propagates_fetch_failure() {
        let mut config = AppConfig::default();
        config.dictionary.base_url = "http://127.0.0.1:9".to_string();
        config.http.timeout_seconds = 2;
        let service = DictionaryLookup::new(&config).unwrap();

        let err = service.lookup("apple").await.unwrap_err();

        let dict_err = err.downcast_ref::<crate::infrastructure::DictError>().unwrap();
        assert!(dict_err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_lookup_propagates_http_status_failure() {
        let (addr, _server) = serve_once(http_response("500 Internal Server Error", "")).await;
        let mut config = AppConfig::default();
        config.dictionary.base_url = format!("http://{addr}");
        let service = DictionaryLookup::new(&config).unwrap();

        let err = service.lookup("apple").await.unwrap_err();

        let dict_err = err.downcast_ref::<crate::infrastructure::DictError>().unwrap();
        assert!(matches!(dict_err, crate::infrastructure::DictError::HttpRequestFailed { status: 500, .. }));
        assert_eq!(dict_err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_lookup_parses_fetched_page() {
        let page = r#"<div class="card_word"><h4>영어사전</h4>
            <a href="/word/view.do?wordid=ekw1" class="txt_searchword">apple</a>
            <ul class="list_search"><li>사과</li></ul></div>"#;
        let (addr, server) = serve_once(http_response("200 OK", page)).await;
        let mut config = AppConfig::default();
        config.dictionary.base_url = format!("http://{addr}");
        let service = DictionaryLookup::new(&config).unwrap();

        let items = service.lookup("apple").await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subtitle, "영어사전 | 사과");
        assert_eq!(items[0].arg, format!("http://{addr}/word/view.do?wordid=ekw1"));
        assert!(server.await.unwrap().starts_with("GET /search.do?q=apple "));
    }
}
