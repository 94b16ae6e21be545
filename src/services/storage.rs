use crate::error::StorageError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Destination for generated images
pub trait ImageStorage: Send + Sync {
    /// Store `bytes` under `filename` and return its public reference.
    ///
    /// Called once per generated image; storing the same name twice must
    /// be harmless.
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StorageError>;
}

impl<T: ImageStorage + ?Sized> ImageStorage for Arc<T> {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StorageError> {
        (**self).upload(bytes, filename)
    }
}

/// Writes images into a directory served under `public_url`
pub struct DirectoryStorage {
    root: PathBuf,
    public_url: String,
}

impl DirectoryStorage {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageStorage for DirectoryStorage {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StorageError> {
        let name = Path::new(filename);
        // Only plain file names; no separators or parent references
        if filename.is_empty() || name.file_name() != Some(name.as_os_str()) {
            return Err(StorageError::Rejected(format!(
                "invalid file name: {filename:?}"
            )));
        }

        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(name);
        std::fs::write(&path, bytes)?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "Stored image");
        Ok(format!("{}/{}", self.public_url, filename))
    }
}

/// Keeps uploads in memory; for tests and dry runs
pub struct InMemoryStorage {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, filename: &str) -> Option<Vec<u8>> {
        self.files.read().ok()?.get(filename).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStorage for InMemoryStorage {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StorageError> {
        let mut files = self
            .files
            .write()
            .map_err(|_| StorageError::Rejected("storage lock poisoned".to_string()))?;
        files.insert(filename.to_string(), bytes.to_vec());
        Ok(format!("memory://{filename}"))
    }
}
