use std::path::PathBuf;

use crate::domain::model::catalog::Catalog;
use crate::domain::repository::CatalogRepository;

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるCatalogRepository実装。
/// ファイル1つ = Book配列をシリアライズした単一blob。
/// add/removeのたびに全体が書き直される。
pub struct JsonCatalogRepository {
    path: PathBuf,
}

impl JsonCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogRepository for JsonCatalogRepository {
    type Error = JsonStoreError;

    fn load(&self) -> Result<Option<Catalog>, Self::Error> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        Ok(Some(catalog))
    }

    fn save(&self, catalog: &Catalog) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(catalog)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::book::Book;

    #[test]
    fn roundtrip_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        let repo = JsonCatalogRepository::new(&path);

        // 初回loadはNone（空カタログ扱いは呼び出し側）
        assert!(repo.load().unwrap().is_none());

        let mut catalog = Catalog::new();
        catalog.add(Book::new("Roundtrip", 12.5, "https://example.com/r.png").unwrap());

        repo.save(&catalog).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().name(), "Roundtrip");
        assert_eq!(loaded.get(0).unwrap().price(), 12.5);
    }

    #[test]
    fn save_overwrites_whole_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        let repo = JsonCatalogRepository::new(&path);

        let mut catalog = Catalog::new();
        catalog.add(Book::new("A", 1.0, "https://example.com/a.png").unwrap());
        catalog.add(Book::new("B", 2.0, "https://example.com/b.png").unwrap());
        repo.save(&catalog).unwrap();

        catalog.remove_at(0).unwrap();
        repo.save(&catalog).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().name(), "B");
    }

    #[test]
    fn blob_is_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        let repo = JsonCatalogRepository::new(&path);

        let mut catalog = Catalog::new();
        catalog.add(Book::new("A", 1.0, "https://example.com/a.png").unwrap());
        repo.save(&catalog).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["name"], "A");
        assert_eq!(parsed[0]["imageUrl"], "https://example.com/a.png");
    }
}
