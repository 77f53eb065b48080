//! Application layer - use cases built on the infrastructure

pub mod lookup_service;

pub use lookup_service::DictionaryLookup;
