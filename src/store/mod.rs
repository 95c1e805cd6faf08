mod error;
pub mod file;
pub mod sql;

pub use error::StoreError;
pub use file::FileStore;
pub use sql::SqlStore;

use crate::configuration::Backend;

/// Whole-blob persistence: read everything, replace everything.
pub trait Store: Send + Sync {
    fn read(&self) -> Result<Vec<u8>, StoreError>;
    fn write(&self, data: &[u8]) -> Result<(), StoreError>;
}

/// An opened backend, ready to be wrapped by a repository.
#[derive(Clone)]
pub enum StoreHandle {
    File(FileStore),
    Sql(SqlStore),
}

impl StoreHandle {
    pub fn backend(&self) -> Backend {
        match self {
            StoreHandle::File(_) => Backend::File,
            StoreHandle::Sql(_) => Backend::Sqlite,
        }
    }
}

/// Open the store selected by `backend`. `identifier` is a file path for the
/// file backend and a database path for SQLite.
pub fn open(
    backend: Backend,
    identifier: &str,
    create_missing: bool,
) -> Result<StoreHandle, StoreError> {
    let handle = match backend {
        Backend::File if create_missing => {
            StoreHandle::File(FileStore::open_or_create(identifier)?)
        }
        Backend::File => StoreHandle::File(FileStore::open(identifier)?),
        Backend::Sqlite => StoreHandle::Sql(SqlStore::open(identifier)?),
    };
    Ok(handle)
}

/// Same as [`open`], with the backend given by its discriminator string.
pub fn factory(
    discriminator: &str,
    identifier: &str,
    create_missing: bool,
) -> Result<StoreHandle, StoreError> {
    let backend: Backend = discriminator.parse()?;
    open(backend, identifier, create_missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn factory_opens_file_backend() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        let handle = factory("file", path.to_str().unwrap(), true).unwrap();
        assert_eq!(handle.backend(), Backend::File);
    }

    #[test]
    fn factory_opens_sqlite_backend() {
        let handle = factory("sqlite", ":memory:", false).unwrap();
        assert_eq!(handle.backend(), Backend::Sqlite);
    }

    #[test]
    fn factory_rejects_unknown_discriminator() {
        let err = factory("arquivo", "products.json", true).err().unwrap();
        assert!(matches!(err, StoreError::UnknownBackend(_)));
    }

    #[test]
    fn factory_fails_on_missing_file_without_create() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        let err = factory("file", path.to_str().unwrap(), false).err().unwrap();
        assert!(matches!(err, StoreError::Init { .. }));
    }
}
