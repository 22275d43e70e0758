use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// カタログの1エントリ。IDは持たず、Catalog内の位置が唯一のハンドル。
/// 生成時のみ検証される（sort/filterで再検証はしない）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    name: String,
    price: f64,
    image_url: String,
}

impl Book {
    /// 入力値を検証して生成する。first-failure-wins:
    /// name → price → image_url の順にチェックし、最初のエラーだけを返す。
    pub fn new(
        name: impl Into<String>,
        price: f64,
        image_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::NameRequired);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(DomainError::InvalidPrice(price));
        }
        let image_url = image_url.into();
        if image_url.is_empty() {
            return Err(DomainError::ImageUrlRequired);
        }
        Ok(Self {
            name,
            price,
            image_url,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}
