//! Domain module - dictionary search results
//!
//! Groups and entries as extracted from a results page, and the flat
//! display items built from them.

pub mod search_result;

pub use search_result::{Entry, ResultGroup, ResultItem, into_items};
