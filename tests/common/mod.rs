//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use catalog_mcp::application::service::CatalogService;
use catalog_mcp::domain::model::book::Book;
use catalog_mcp::domain::model::catalog::Catalog;
use catalog_mcp::domain::repository::CatalogRepository;

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリリポジトリ。
/// cloneはストアを共有するので、同じデータを別Serviceで読み直せる。
#[derive(Clone)]
pub struct InMemoryRepo {
    store: Rc<RefCell<HashMap<String, String>>>,
}

const STORE_KEY: &str = "booksData";

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl CatalogRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Option<Catalog>, Self::Error> {
        let store = self.store.borrow();
        match store.get(STORE_KEY) {
            Some(json) => {
                let catalog: Catalog = serde_json::from_str(json).unwrap();
                Ok(Some(catalog))
            }
            None => Ok(None),
        }
    }

    fn save(&self, catalog: &Catalog) -> Result<(), Self::Error> {
        let json = serde_json::to_string(catalog).unwrap();
        self.store.borrow_mut().insert(STORE_KEY.to_string(), json);
        Ok(())
    }
}

// =============================================================================
// TestCatalog — 定番フィクスチャ
// =============================================================================

/// テスト用の標準カタログ:
/// ```text
/// [0] The Rust Programming Language — 30
/// [1] Clean Code — 10
/// [2] Programming Pearls — 20
/// ```
pub struct TestCatalog;

impl TestCatalog {
    pub fn standard() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(
            Book::new(
                "The Rust Programming Language",
                30.0,
                "https://example.com/trpl.png",
            )
            .unwrap(),
        );
        catalog.add(Book::new("Clean Code", 10.0, "https://example.com/clean-code.png").unwrap());
        catalog
            .add(Book::new("Programming Pearls", 20.0, "https://example.com/pearls.png").unwrap());
        catalog
    }

    /// カタログをInMemoryRepoに保存してServiceを返す。
    /// repoのcloneも返すので、再openで永続化内容を検証できる。
    pub fn service_with(catalog: &Catalog) -> (CatalogService<InMemoryRepo>, InMemoryRepo) {
        let repo = InMemoryRepo::new();
        repo.save(catalog).unwrap();
        let service = CatalogService::open(repo.clone()).unwrap();
        (service, repo)
    }
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
