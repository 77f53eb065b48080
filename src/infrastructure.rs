//! Infrastructure layer for fetching, parsing, and launcher output
//!
//! HTTP access to the dictionary service, search page parsing, script filter
//! feedback, configuration, and logging.

pub mod alfred; // Launcher feedback output
pub mod config; // Configuration constants and defaults
pub mod error;
pub mod http_client;
pub mod logging; // Logging infrastructure
pub mod parsing; // Search results page parsing

// Re-export commonly used items
pub use alfred::{Feedback, FeedbackItem};
pub use config::{AppConfig, DictionaryConfig, LoggingConfig, daum};
pub use error::{DictError, DictResult};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{LoggingHandle, build_dispatch};
pub use parsing::{HtmlParser, ParsingConfig, SearchResultParser};
