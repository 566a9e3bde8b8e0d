use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by [`crate::dictionary::WordDictionary::load`].
///
/// Entries inserted before the failure stay in the table; calling `unload`
/// afterwards is always safe.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read dictionary {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not allocate an entry for {word:?}")]
    AllocationFailure { word: String },

    #[error("word {word:?} is longer than {max} bytes")]
    WordTooLong { word: String, max: usize },

    #[error("dictionary is already loaded, unload it first")]
    AlreadyLoaded,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
