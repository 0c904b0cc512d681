use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum FlagsError {
    #[error("Unknown flag category: {0}")]
    UnknownRule(String),

    #[error("No field_flags mapping configured for field: {0}")]
    MissingMapping(String),

    #[error("Flag entry {0:?} needs a field name (e.g. \"field:media\")")]
    MissingField(String),

    #[error("Invalid regex mapping key {key}: {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Album not found: {0}")]
    AlbumNotFound(Uuid),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FlagsError>;
