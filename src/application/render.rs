use std::fmt::Write as _;

use crate::domain::model::book::Book;
use crate::domain::model::page::{FontSize, PageSettings};

/// Book列 → カードリスト（テキスト）変換。
/// 差分更新はせず、呼び出しごとに出力全体を作り直す（full replace）。
/// 変更系の操作は必ずこのrenderを通して最新のビューを返すこと。
pub struct CardRenderer;

impl CardRenderer {
    /// 1要素につき1カード。各カードは渡された列の中での現在位置を示し、
    /// その位置をパラメータにした削除操作を提示する。
    pub fn render(books: &[Book]) -> String {
        if books.is_empty() {
            return "Catalog is empty. Use `book_add` to add a book.".to_string();
        }

        let mut buf = format!("# Book Catalog ({} books)\n\n", books.len());
        for (index, book) in books.iter().enumerate() {
            let _ = writeln!(buf, "[{index}] {}", book.name());
            let _ = writeln!(buf, "    price: {}", book.price());
            let _ = writeln!(buf, "    image: {}", book.image_url());
            let _ = writeln!(buf, "    remove: book_remove {{\"index\": {index}}}");
        }
        buf
    }

    /// ページ設定のサマリ（body style相当）とチェック済みFeatureリスト。
    pub fn render_page(settings: &PageSettings) -> String {
        let background = settings.background().unwrap_or("default");
        let font_size = settings
            .font_size()
            .map(FontSize::as_str)
            .unwrap_or("default");

        let mut buf = format!("background: {background}\nfont-size: {font_size}\n");

        let enabled = settings.enabled_features();
        if enabled.is_empty() {
            buf.push_str("features: (none)\n");
        } else {
            buf.push_str("features:\n");
            for label in enabled {
                let _ = writeln!(buf, "- {label}");
            }
        }
        buf
    }
}
