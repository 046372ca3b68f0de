//! Navigation definition errors.
//!
//! These are configuration-time failures. Building a model from a valid
//! definition never fails.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The definition file could not be read.
    #[error("Failed to read navigation definition {path}: {message}")]
    Io { path: String, message: String },

    /// The definition is not valid YAML/JSON for the expected shape.
    #[error("Failed to parse navigation definition {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// An item has an empty `id`.
    #[error("Empty item id in section {section}")]
    EmptyItemId { section: String },

    /// Two items share an `id` (checked across main and footer).
    #[error("Duplicate item id '{id}' in section {section}")]
    DuplicateItemId { id: String, section: String },

    /// A section declares `module: ""`.
    #[error("Empty module slug in section {section}")]
    EmptyModuleSlug { section: String },
}

impl NavigationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO",
            Self::Parse { .. } => "PARSE",
            Self::EmptyItemId { .. } => "EMPTY_ITEM_ID",
            Self::DuplicateItemId { .. } => "DUPLICATE_ITEM_ID",
            Self::EmptyModuleSlug { .. } => "EMPTY_MODULE_SLUG",
        }
    }
}

pub type NavigationResult<T> = Result<T, NavigationError>;
