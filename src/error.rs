// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(CatalogError),
    Network(String),
    Image(String),
}

/// Problems found while loading the prompt catalog.
///
/// A bundled catalog is checked at build time by the tests, so in practice
/// these surface only for user-supplied data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The data file is not valid JSON or does not have the expected shape.
    Parse(String),

    /// Two items share the same `id`.
    DuplicateId(String),

    /// An item has an empty (or whitespace-only) category.
    EmptyCategory(String),

    /// The bundled data asset is missing from the binary.
    Missing,
}

impl CatalogError {
    /// Returns the notification message shown when a catalog fails to load.
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::Parse(_) => "データファイルを読み込めませんでした",
            CatalogError::DuplicateId(_) => "データファイルに重複した ID があります",
            CatalogError::EmptyCategory(_) => "カテゴリーが空の項目があります",
            CatalogError::Missing => "データファイルが見つかりません",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "invalid catalog data: {}", msg),
            CatalogError::DuplicateId(id) => write!(f, "duplicate item id: {}", id),
            CatalogError::EmptyCategory(id) => write!(f, "item {} has an empty category", id),
            CatalogError::Missing => write!(f, "bundled catalog asset is missing"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Catalog(CatalogError::Parse(err.to_string()))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
