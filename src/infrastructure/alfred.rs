//! Script filter feedback for the Alfred launcher
//!
//! Items are collected into a [`Feedback`] batch and written once as
//! `{"items": [...]}` JSON.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::search_result::ResultItem;
use crate::infrastructure::error::DictResult;

/// System icon for web results
pub const ICON_WEB: &str = "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/BookmarkIcon.icns";

/// System icon for errors
pub const ICON_ERROR: &str = "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/AlertStopIcon.icns";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub path: String,
}

impl Icon {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

/// One display record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    pub valid: bool,
    pub icon: Icon,
}

/// A batch of items sent to the launcher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub items: Vec<FeedbackItem>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: FeedbackItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Add a selectable web item for a dictionary result
    pub fn add_result(&mut self, result: &ResultItem) -> &mut Self {
        self.add_item(FeedbackItem {
            title: result.title.clone(),
            subtitle: result.subtitle.clone(),
            arg: Some(result.arg.clone()),
            valid: true,
            icon: Icon::new(ICON_WEB),
        })
    }

    /// Feedback holding a single non-actionable error item
    pub fn error(workflow_name: &str, message: &str) -> Self {
        let mut feedback = Self::new();
        feedback.add_item(FeedbackItem {
            title: format!("Error in workflow '{workflow_name}'"),
            subtitle: message.to_string(),
            arg: None,
            valid: false,
            icon: Icon::new(ICON_ERROR),
        });
        feedback
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Write the batch as JSON and flush
    pub fn send<W: Write>(&self, mut writer: W) -> DictResult<()> {
        serde_json::to_writer(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl<'a> FromIterator<&'a ResultItem> for Feedback {
    fn from_iter<I: IntoIterator<Item = &'a ResultItem>>(iter: I) -> Self {
        let mut feedback = Self::new();
        for result in iter {
            feedback.add_result(result);
        }
        feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultItem {
        ResultItem {
            title: "apple".to_string(),
            subtitle: "영어사전 | 사과".to_string(),
            arg: "http://dic.daum.net/word/view.do?wordid=ekw000008612".to_string(),
        }
    }

    #[test]
    fn test_add_result_is_valid_web_item() {
        let mut feedback = Feedback::new();
        feedback.add_result(&sample());

        let item = &feedback.items[0];
        assert!(item.valid);
        assert_eq!(item.icon.path, ICON_WEB);
        assert_eq!(item.arg.as_deref(), Some("http://dic.daum.net/word/view.do?wordid=ekw000008612"));
    }

    #[test]
    fn test_send_writes_items_json() {
        let feedback: Feedback = [sample()].iter().collect();
        let mut out = Vec::new();
        feedback.send(&mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["items"][0]["title"], "apple");
        assert_eq!(json["items"][0]["subtitle"], "영어사전 | 사과");
        assert_eq!(json["items"][0]["valid"], true);
        assert_eq!(json["items"][0]["icon"]["path"], ICON_WEB);
    }

    #[test]
    fn test_empty_feedback_serializes_empty_items() {
        let mut out = Vec::new();
        Feedback::new().send(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"items\":[]}\n");
    }

    #[test]
    fn test_error_feedback_is_not_actionable() {
        let feedback = Feedback::error("Daum Dictionary", "HTTP request failed: 500 - Internal Server Error");
        assert_eq!(feedback.len(), 1);
        let item = &feedback.items[0];
        assert!(!item.valid);
        assert!(item.arg.is_none());
        assert_eq!(item.icon.path, ICON_ERROR);
        assert_eq!(item.title, "Error in workflow 'Daum Dictionary'");

        let json = serde_json::to_value(&feedback).unwrap();
        assert!(json["items"][0].get("arg").is_none());
    }
}
