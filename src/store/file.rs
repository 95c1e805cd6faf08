use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Store, StoreError};

const BACKEND: &str = "file";

/// Byte store over a single file on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open an existing file. A missing or unreadable file is an initialization error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = fs::File::open(&path)
            .map_err(|e| StoreError::init(BACKEND, path.display().to_string(), e))?;
        let meta = file
            .metadata()
            .map_err(|e| StoreError::init(BACKEND, path.display().to_string(), e))?;
        if !meta.is_file() {
            return Err(StoreError::init(
                BACKEND,
                path.display().to_string(),
                "not a regular file",
            ));
        }
        Ok(Self { path })
    }

    /// Open the file, seeding it with an empty JSON array when it does not exist yet.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        match fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    fs::create_dir_all(dir)
                        .map_err(|e| StoreError::init(BACKEND, path.display().to_string(), e))?;
                }
                fs::write(&path, b"[]")
                    .map_err(|e| StoreError::init(BACKEND, path.display().to_string(), e))?;
                log::info!("📄 Created empty data file {}", path.display());
            }
            Err(e) => return Err(StoreError::init(BACKEND, path.display().to_string(), e)),
        }
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Store for FileStore {
    fn read(&self) -> Result<Vec<u8>, StoreError> {
        Ok(fs::read(&self.path)?)
    }

    fn write(&self, data: &[u8]) -> Result<(), StoreError> {
        // Readers see either the old or the new contents, never a partial file.
        let staging = self.staging_path();
        fs::write(&staging, data)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
