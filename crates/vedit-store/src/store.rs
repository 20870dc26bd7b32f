//! The artifact store.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::naming;

/// A flat directory of named artifacts.
///
/// There is no locking across requests: concurrent writes to the same
/// artifact name are last-writer-wins. Writes are staged to a temp file in
/// the same directory and renamed into place, so readers never see a torn
/// file under a final name.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an artifact name to its path, rejecting traversal attempts.
    pub fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    /// Whether an artifact with this name exists.
    ///
    /// Invalid names simply do not exist.
    pub async fn exists(&self, name: &str) -> bool {
        match self.path_for(name) {
            Ok(path) => fs::metadata(&path).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Write an artifact atomically (staging file + rename).
    pub async fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        let staging = self.staging_path(name)?;
        fs::write(&staging, bytes).await?;
        self.commit(&staging, name).await
    }

    /// Read an artifact's bytes.
    pub async fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        let path = self.path_for(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::not_found(name))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read an artifact as UTF-8 text.
    pub async fn read_to_string(&self, name: &str) -> StoreResult<String> {
        let bytes = self.read(name).await?;
        String::from_utf8(bytes)
            .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Persist an upload under a fresh collision-resistant name.
    ///
    /// Returns the generated artifact name.
    pub async fn save_upload(&self, original_name: &str, bytes: &[u8]) -> StoreResult<String> {
        let name = naming::upload_name(original_name);
        self.write(&name, bytes).await?;

        debug!(artifact = %name, size = bytes.len(), "Upload stored");
        Ok(name)
    }

    /// A unique staging path for producing `name`.
    ///
    /// The staging file keeps the artifact's extension (encoders pick the
    /// container format from it) and lives in the store directory so the
    /// final rename never crosses filesystems. Hand this to a producer,
    /// then [`commit`](Self::commit) the result.
    pub fn staging_path(&self, name: &str) -> StoreResult<PathBuf> {
        validate_name(name)?;
        Ok(self
            .root
            .join(format!(".stage-{}-{}", Uuid::new_v4(), name)))
    }

    /// Atomically move a staged file into place as `name`.
    pub async fn commit(&self, staging: &Path, name: &str) -> StoreResult<()> {
        let path = self.path_for(name)?;
        fs::rename(staging, &path).await?;

        debug!(artifact = %name, "Artifact committed");
        Ok(())
    }
}

/// Reject names that could escape the store directory.
fn validate_name(name: &str) -> StoreResult<()> {
    if name.is_empty()
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.starts_with('.')
    {
        return Err(StoreError::invalid_name(name));
    }
    Ok(())
}
