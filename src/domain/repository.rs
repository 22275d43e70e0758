use super::model::catalog::Catalog;

/// 永続化の抽象。Infra層が実装する。
pub trait CatalogRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 保存済みカタログを読み込む。未保存ならNone（呼び出し側で空扱い）。
    fn load(&self) -> Result<Option<Catalog>, Self::Error>;

    /// カタログ全体を書き戻す。
    fn save(&self, catalog: &Catalog) -> Result<(), Self::Error>;
}
