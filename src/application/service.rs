use crate::domain::model::book::Book;
use crate::domain::model::catalog::Catalog;
use crate::domain::repository::CatalogRepository;

use super::error::AppError;

/// カタログに対するユースケース。
/// 起動時に一度だけ読み込み、add/removeのたびにblob全体を書き戻す。
/// sortはメモリ上の正準順序だけを変え、次のadd/removeで初めてディスクに届く
/// （元の挙動: sort後にsetItemしない）。
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
    catalog: Catalog,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// 保存済みカタログを読み込んでServiceを作る。未保存なら空から始める。
    pub fn open(repo: R) -> Result<Self, AppError> {
        let catalog = repo
            .load()
            .map_err(|e| AppError::Storage(Box::new(e)))?
            .unwrap_or_default();
        tracing::info!(books = catalog.len(), "catalog loaded");
        Ok(Self { repo, catalog })
    }

    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// 検証済みBookを末尾に追加し、カタログ全体を永続化する。
    pub fn add_book(&mut self, book: Book) -> Result<(), AppError> {
        self.catalog.add(book);
        self.persist()?;
        tracing::debug!(books = self.catalog.len(), "book added");
        Ok(())
    }

    /// 指定位置のBookを削除してカタログ全体を永続化する。削除したBookを返す。
    /// 範囲外なら何も変えずにエラー。
    pub fn remove_book(&mut self, index: usize) -> Result<Book, AppError> {
        let removed = self.catalog.remove_at(index)?;
        self.persist()?;
        tracing::debug!(index, books = self.catalog.len(), "book removed");
        Ok(removed)
    }

    /// 価格で正準順序を並べ替える。永続化はしない。
    pub fn sort_by_price(&mut self, ascending: bool) {
        self.catalog.sort_by_price(ascending);
        tracing::debug!(ascending, "catalog sorted by price");
    }

    /// 名前で正準順序を並べ替える。永続化はしない。
    pub fn sort_by_name(&mut self, ascending: bool) {
        self.catalog.sort_by_name(ascending);
        tracing::debug!(ascending, "catalog sorted by name");
    }

    /// 価格帯で絞り込んだ新しい列を返す。カタログは変更しない。
    /// 不正な境界はエラーで、正準状態には一切触れない。
    pub fn filter_by_price(&self, min: f64, max: f64) -> Result<Vec<Book>, AppError> {
        Ok(self.catalog.filter_by_price(min, max)?)
    }

    fn persist(&self) -> Result<(), AppError> {
        self.repo
            .save(&self.catalog)
            .map_err(|e| AppError::Storage(Box::new(e)))
    }
}
