use std::{fmt, str::FromStr};

use thiserror::Error;

/// Persistence backend selected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// JSON array kept in a single file.
    File,
    /// `products` table in a SQLite database.
    Sqlite,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown storage backend: {0} (expected \"file\" or \"sqlite\")")]
pub struct UnknownBackend(pub String);

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::File => "file",
            Backend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(Backend::File),
            "sqlite" | "sql" => Ok(Backend::Sqlite),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}
