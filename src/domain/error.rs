#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("book name is required")]
    NameRequired,

    #[error("invalid book price: {0} (must be a positive number)")]
    InvalidPrice(f64),

    #[error("image URL is required")]
    ImageUrlRequired,

    #[error("index {index} out of range: catalog has {len} books")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid filter range: min={min}, max={max} (require 0 <= min <= max)")]
    InvalidPriceRange { min: f64, max: f64 },
}

impl DomainError {
    /// 検証エラーの原因となった入力フィールド名（フォーカス復帰相当の案内用）。
    /// フォーム由来でないエラーはNone。
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NameRequired => Some("name"),
            Self::InvalidPrice(_) => Some("price"),
            Self::ImageUrlRequired => Some("image_url"),
            Self::IndexOutOfRange { .. } | Self::InvalidPriceRange { .. } => None,
        }
    }
}
