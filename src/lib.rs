//! Spell checking against a case-insensitive word dictionary stored in a
//! fixed-size chained hash table.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod lexer;
pub mod pipeline;
pub mod report;
pub mod shared;

pub use config::Config;
pub use dictionary::WordDictionary;
pub use error::{ConfigError, LoadError};
pub use shared::SharedDictionary;
