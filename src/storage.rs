use std::path::PathBuf;

/// Key-value file storage. Backs the config file and the persisted
/// auth token.
pub trait StorageManager: Send + Sync {
    fn write(&self, ident: &str, data: &[u8]) -> std::io::Result<()>;
    fn read(&self, ident: &str) -> std::io::Result<Vec<u8>>;
    fn exists(&self, ident: &str) -> bool;
    fn delete(&self, ident: &str) -> std::io::Result<()>;
}

#[derive(Clone)]
pub struct BackendLocal {
    pub base_dir: PathBuf,
}

impl BackendLocal {
    pub fn new(storage_dir: &str) -> std::io::Result<Self> {
        let path = PathBuf::from(storage_dir);
        std::fs::create_dir_all(&path)?;
        Ok(BackendLocal { base_dir: path })
    }

    fn path_for(&self, ident: &str) -> PathBuf {
        self.base_dir.join(ident)
    }
}

impl StorageManager for BackendLocal {
    fn exists(&self, ident: &str) -> bool {
        std::fs::metadata(self.path_for(ident)).is_ok()
    }

    fn read(&self, ident: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.path_for(ident))
    }

    fn write(&self, ident: &str, data: &[u8]) -> std::io::Result<()> {
        // write to a sibling temp file, then rename into place
        let path = self.path_for(ident);
        let temp_path = self.path_for(&format!(".{ident}.tmp"));

        std::fs::write(&temp_path, data)?;
        std::fs::rename(&temp_path, &path)
    }

    fn delete(&self, ident: &str) -> std::io::Result<()> {
        std::fs::remove_file(self.path_for(ident))
    }
}

/// Reads a storage value as a trimmed UTF-8 string, `None` when the key is
/// missing, empty, or not valid UTF-8.
pub fn read_string(store: &dyn StorageManager, ident: &str) -> Option<String> {
    if !store.exists(ident) {
        return None;
    }
    let bytes = store.read(ident).ok()?;
    let value = String::from_utf8(bytes).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackendLocal::new(tmp.path().to_str().unwrap()).unwrap();

        store.write("token", b"abc123").unwrap();
        assert!(store.exists("token"));
        assert_eq!(store.read("token").unwrap(), b"abc123");

        store.delete("token").unwrap();
        assert!(!store.exists("token"));
    }

    #[test]
    fn test_read_string_trims_and_rejects_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackendLocal::new(tmp.path().to_str().unwrap()).unwrap();

        store.write("token", b"  abc123\n").unwrap();
        assert_eq!(read_string(&store, "token"), Some("abc123".to_string()));

        store.write("token", b"   \n").unwrap();
        assert_eq!(read_string(&store, "token"), None);

        assert_eq!(read_string(&store, "missing"), None);
    }
}
