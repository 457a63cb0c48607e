use std::path::{Path, PathBuf};
use tokio::fs;

use super::StoredIdentity;

/// Identity fields kept as a json object on disk.
#[derive(Debug)]
pub struct FileStore(PathBuf);

impl FileStore {
    pub fn open(p: impl AsRef<Path>) -> Self {
        Self(p.as_ref().to_owned())
    }

    pub async fn load(&self) -> crate::Result<StoredIdentity> {
        if fs::try_exists(&self.0).await? {
            let bytes = fs::read(&self.0).await?;
            serde_json::from_slice(&bytes).map_err(From::from)
        } else {
            Ok(StoredIdentity::default())
        }
    }

    pub async fn save(&self, value: &StoredIdentity) -> crate::Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(&self.0, bytes).await.map_err(From::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tomuss_average_{}_{name}.json", std::process::id()))
    }

    #[tokio::test]
    async fn test_missing_file() {
        let store = FileStore::open(temp_path("missing"));
        assert_eq!(store.load().await.unwrap(), StoredIdentity::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = temp_path("saved");
        let store = FileStore::open(&path);
        let stored = StoredIdentity {
            name: Some("DOE JANE".into()),
            email: Some("jane.doe@etu.univ-lyon1.fr".into()),
            student_id: None,
        };
        store.save(&stored).await.unwrap();
        assert_eq!(store.load().await.unwrap(), stored);
        fs::remove_file(&path).await.unwrap();
    }
}
