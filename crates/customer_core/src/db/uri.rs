//! Store connection URI parsing.
//!
//! # Responsibility
//! - Turn the configured connection string into a concrete store location.
//!
//! # Invariants
//! - Parsing never touches the filesystem.
//! - Only the `sqlite` scheme (or a bare path) is accepted.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

/// Store used when no URI is configured.
pub const DEFAULT_STORE_URI: &str = "sqlite://customer_store.sqlite3";

const SQLITE_SCHEME_PREFIX: &str = "sqlite://";
const SQLITE_MEMORY_URI: &str = "sqlite::memory:";
const SQLITE_SCHEME: &str = "sqlite:";

/// Location of the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUri {
    /// Private in-memory store, discarded when the connection closes.
    Memory,
    /// SQLite database file.
    File(PathBuf),
}

/// Malformed store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyUri,
    Malformed(String),
    MissingPath(String),
    UnsupportedScheme(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUri => write!(f, "store uri cannot be empty"),
            Self::Malformed(uri) => write!(
                f,
                "malformed store uri `{uri}`; expected sqlite://<path> or sqlite::memory:"
            ),
            Self::MissingPath(uri) => write!(f, "store uri `{uri}` has no database path"),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "unsupported store uri scheme `{scheme}`; expected sqlite:// or sqlite::memory:"
            ),
        }
    }
}

impl Error for ConfigError {}

impl FromStr for StoreUri {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyUri);
        }

        if trimmed == SQLITE_MEMORY_URI {
            return Ok(Self::Memory);
        }

        if let Some(path) = trimmed.strip_prefix(SQLITE_SCHEME_PREFIX) {
            if path.is_empty() {
                return Err(ConfigError::MissingPath(trimmed.to_string()));
            }
            return Ok(Self::File(PathBuf::from(path)));
        }

        if trimmed.starts_with(SQLITE_SCHEME) {
            return Err(ConfigError::Malformed(trimmed.to_string()));
        }

        if let Some((scheme, _)) = trimmed.split_once("://") {
            return Err(ConfigError::UnsupportedScheme(scheme.to_string()));
        }

        Ok(Self::File(PathBuf::from(trimmed)))
    }
}

impl Default for StoreUri {
    fn default() -> Self {
        Self::File(PathBuf::from(&DEFAULT_STORE_URI[SQLITE_SCHEME_PREFIX.len()..]))
    }
}

impl Display for StoreUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "{SQLITE_MEMORY_URI}"),
            Self::File(path) => write!(f, "{SQLITE_SCHEME_PREFIX}{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreUri, DEFAULT_STORE_URI};
    use std::path::PathBuf;

    #[test]
    fn parses_memory_uri() {
        assert_eq!("sqlite::memory:".parse::<StoreUri>(), Ok(StoreUri::Memory));
    }

    #[test]
    fn parses_relative_and_absolute_sqlite_uris() {
        assert_eq!(
            "sqlite://data/customers.db".parse::<StoreUri>(),
            Ok(StoreUri::File(PathBuf::from("data/customers.db")))
        );
        assert_eq!(
            "sqlite:///var/lib/customers.db".parse::<StoreUri>(),
            Ok(StoreUri::File(PathBuf::from("/var/lib/customers.db")))
        );
    }

    #[test]
    fn bare_path_is_a_file_store() {
        assert_eq!(
            " ./customers.db ".parse::<StoreUri>(),
            Ok(StoreUri::File(PathBuf::from("./customers.db")))
        );
    }

    #[test]
    fn rejects_malformed_uris() {
        assert_eq!("   ".parse::<StoreUri>(), Err(ConfigError::EmptyUri));
        assert_eq!(
            "sqlite://".parse::<StoreUri>(),
            Err(ConfigError::MissingPath("sqlite://".to_string()))
        );
        for uri in ["sqlite:", "sqlite:customers.db", "sqlite:/var/lib/customers.db"] {
            assert_eq!(
                uri.parse::<StoreUri>(),
                Err(ConfigError::Malformed(uri.to_string()))
            );
        }
        assert_eq!(
            "mongodb://localhost:27017/test".parse::<StoreUri>(),
            Err(ConfigError::UnsupportedScheme("mongodb".to_string()))
        );
    }

    #[test]
    fn default_matches_default_uri_constant() {
        assert_eq!(
            StoreUri::default(),
            DEFAULT_STORE_URI.parse::<StoreUri>().unwrap()
        );
        assert_eq!(StoreUri::default().to_string(), DEFAULT_STORE_URI);
    }
}
