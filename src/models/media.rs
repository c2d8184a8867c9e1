use std::path::{Path, PathBuf};

use crate::errors::RelayError;

/// Captured image or video produced by the motion detector.
///
/// Owned by this process for a single run: read by the email and upload
/// steps, then deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    path: PathBuf,
    file_name: String,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, RelayError> {
        let path = path.into();

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| RelayError::InvalidMediaPath(path.display().to_string()))?;

        Ok(Self { path, file_name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the file, used as attachment name and storage key.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Destination of the file inside `folder`, e.g. `/Public/snap1.jpg`.
    pub fn destination_in(&self, folder: &str) -> String {
        format!("{folder}{}", self.file_name)
    }

    /// Reads the whole file into memory.
    pub async fn read(&self) -> Result<Vec<u8>, RelayError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|err| RelayError::MediaUnreadable {
                path: self.path.display().to_string(),
                reason: err.to_string(),
            })
    }

    pub async fn delete(&self) -> Result<(), RelayError> {
        tokio::fs::remove_file(&self.path)
            .await
            .map_err(|err| RelayError::Cleanup {
                path: self.path.display().to_string(),
                reason: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;

    #[test]
    fn test_destination_ignores_directory_depth() {
        for path in ["snap1.jpg", "/tmp/snap1.jpg", "/tmp/cam/2024/06/snap1.jpg"] {
            let media = MediaFile::new(path).unwrap();

            assert_eq!(media.file_name(), "snap1.jpg");
            assert_eq!(
                media.destination_in(consts::DROPBOX_PUBLIC_FOLDER),
                "/Public/snap1.jpg"
            );
        }
    }

    #[test]
    fn test_new_rejects_paths_without_file_name() {
        for path in ["", "/", "/tmp/.."] {
            assert!(matches!(
                MediaFile::new(path),
                Err(RelayError::InvalidMediaPath(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let media = MediaFile::new(dir.path().join("missing.jpg")).unwrap();

        let result = media.read().await;

        assert!(matches!(result, Err(RelayError::MediaUnreadable { .. })));
    }

    #[tokio::test]
    async fn test_read_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap1.jpg");
        std::fs::write(&path, [0xff, 0xd8, 0xff, 0xe0]).unwrap();
        let media = MediaFile::new(&path).unwrap();

        assert_eq!(media.read().await.unwrap(), vec![0xff, 0xd8, 0xff, 0xe0]);
        media.delete().await.unwrap();

        assert!(!path.exists());
    }
}
