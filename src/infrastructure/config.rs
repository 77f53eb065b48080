//! Configuration infrastructure
//!
//! There is no configuration file: every setting has a compiled default, and
//! the only environment the app reads is what the launcher provides.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::infrastructure::error::{DictError, DictResult};
use crate::infrastructure::http_client::HttpClientConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub dictionary: DictionaryConfig,
    pub http: HttpClientConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Defaults with logging taken from the launcher's variables
    pub fn from_launcher_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            logging: LoggingConfig::from_launcher_env(lookup),
            ..Self::default()
        }
    }

    /// Check the settings that would otherwise only fail at fetch time
    pub fn validate(&self) -> DictResult<()> {
        Url::parse(&self.dictionary.base_url).map_err(|e| {
            DictError::configuration("dictionary.base_url", format!("Invalid base URL: {e}"))
        })?;
        Url::parse(&self.dictionary.search_url()).map_err(|e| {
            DictError::configuration("dictionary.search_path", format!("Invalid search URL: {e}"))
        })?;
        if self.dictionary.query_param.trim().is_empty() {
            return Err(DictError::configuration(
                "dictionary.query_param",
                "Query parameter name is empty",
            ));
        }
        if self.http.timeout_seconds == 0 {
            return Err(DictError::configuration(
                "http.timeout_seconds",
                "Timeout must be at least one second",
            ));
        }
        Ok(())
    }
}

/// Dictionary service endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Origin of the service, also used to absolutize word links
    pub base_url: String,

    /// Path of the search endpoint
    pub search_path: String,

    /// Name of the query parameter
    pub query_param: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: daum::BASE_URL.to_string(),
            search_path: daum::SEARCH_PATH.to_string(),
            query_param: daum::QUERY_PARAM.to_string(),
        }
    }
}

impl DictionaryConfig {
    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.search_path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Enable console output (stderr)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log files; falls back to the user cache directory
    pub log_dir: Option<PathBuf>,

    /// Log file name prefix; files are named `{prefix}.YYYY-MM-DD.log`
    pub file_prefix: String,

    /// Maximum number of log files kept in `log_dir`
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_prefix: defaults::LOG_FILE_PREFIX.to_string(),
            max_files: defaults::LOG_MAX_FILES,
        }
    }
}

impl LoggingConfig {
    /// Apply the launcher's debug flag and cache directory.
    ///
    /// Debug mode raises the level and turns on both outputs; otherwise
    /// nothing is logged.
    ///
    /// `lookup` returns the value of a launcher variable, if set.
    pub fn from_launcher_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if lookup(launcher::DEBUG_VAR).is_some_and(|v| v == "1") {
            config.level = "debug".to_string();
            config.console_output = true;
            config.file_output = true;
        }
        if let Some(cache_dir) = lookup(launcher::CACHE_DIR_VAR).filter(|v| !v.is_empty()) {
            config.log_dir = Some(PathBuf::from(cache_dir));
        }
        config
    }

    /// Resolved log directory
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(defaults::APP_DIR_NAME)
        })
    }
}

/// Daum dictionary endpoints
pub mod daum {
    /// Base origin of the dictionary service
    pub const BASE_URL: &str = "http://dic.daum.net";

    /// Search endpoint path
    pub const SEARCH_PATH: &str = "/search.do";

    /// Query parameter carrying the search text
    pub const QUERY_PARAM: &str = "q";
}

/// Variables set by the launcher for script filters
pub mod launcher {
    /// Set to "1" when the workflow debugger is open
    pub const DEBUG_VAR: &str = "alfred_debug";

    /// Per-workflow cache directory
    pub const CACHE_DIR_VAR: &str = "alfred_workflow_cache";

    /// Workflow name, used in error feedback
    pub const WORKFLOW_NAME_VAR: &str = "alfred_workflow_name";
}

/// Default configuration values
pub mod defaults {
    /// Application directory name under the user cache directory
    pub const APP_DIR_NAME: &str = "daum-dict";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

    /// Default user agent
    pub const USER_AGENT: &str = concat!("daum-dict/", env!("CARGO_PKG_VERSION"));

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting
    pub const LOG_JSON_FORMAT: bool = false;

    /// Console output is off by default: the launcher shows stderr only in its debugger
    pub const LOG_CONSOLE_OUTPUT: bool = false;

    /// File output is off by default: the launcher runs one process per keystroke
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Default log file name prefix
    pub const LOG_FILE_PREFIX: &str = "daum-dict";

    /// Default number of daily log files kept
    pub const LOG_MAX_FILES: usize = 5;
}
