use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::book::Book;
use crate::domain::error::DomainError;

/// Book カタログ — 集約ルート。順序付きコレクションで、
/// 位置インデックスが削除・描画の唯一のハンドル。
/// JSON上は素のBook配列としてシリアライズされる（永続blobと同形）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// 末尾に追加する。検証はBook::newで済んでいるため再チェックしない。
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// 指定位置のBookを取り除いて返す。他の要素の相対順序は保たれる。
    /// 範囲外インデックスはエラー。
    pub fn remove_at(&mut self, index: usize) -> Result<Book, DomainError> {
        if index >= self.books.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.books.len(),
            });
        }
        Ok(self.books.remove(index))
    }

    /// 価格で全体を並べ替える（in-place、数値比較）。
    pub fn sort_by_price(&mut self, ascending: bool) {
        self.books.sort_by(|a, b| {
            let ord = a.price().total_cmp(&b.price());
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    /// 名前で全体を並べ替える（in-place）。
    /// localeCompare相当として大文字小文字を無視した辞書順で比較し、
    /// 同名は元の表記で安定化する。
    pub fn sort_by_name(&mut self, ascending: bool) {
        self.books.sort_by(|a, b| {
            let ord = compare_names(a.name(), b.name());
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    /// 価格が [min, max] に収まるBookの新しい列を返す。
    /// 元の順序を保ち、カタログ自体は変更しない。
    /// 境界は 0 <= min <= max（かつ有限）でなければエラー。
    pub fn filter_by_price(&self, min: f64, max: f64) -> Result<Vec<Book>, DomainError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 || min > max {
            return Err(DomainError::InvalidPriceRange { min, max });
        }
        Ok(self
            .books
            .iter()
            .filter(|b| b.price() >= min && b.price() <= max)
            .cloned()
            .collect())
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
