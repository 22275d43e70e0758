use serde::{Deserialize, Serialize};

/// フォントサイズ（radioグループ相当）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// チェックボックス1個分の状態。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    label: String,
    checked: bool,
}

impl Feature {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn checked(&self) -> bool {
        self.checked
    }
}

/// ページ全体のUI状態。カタログとはデータを一切共有せず、永続化もしない。
#[derive(Debug, Clone, Default)]
pub struct PageSettings {
    background: Option<String>,
    font_size: Option<FontSize>,
    features: Vec<Feature>,
}

impl PageSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn font_size(&self) -> Option<FontSize> {
        self.font_size
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// 背景色を設定する。空文字はデフォルトに戻す。
    pub fn set_background(&mut self, color: &str) {
        self.background = if color.is_empty() {
            None
        } else {
            Some(color.to_string())
        };
    }

    /// フォントサイズを選択する。選択中のサイズを再選択すると解除される
    /// （radioのdeselect挙動）。選択後の状態を返す。
    pub fn select_font_size(&mut self, size: FontSize) -> Option<FontSize> {
        self.font_size = if self.font_size == Some(size) {
            None
        } else {
            Some(size)
        };
        self.font_size
    }

    /// チェックボックスをトグルする。未知のラベルは初回トグルで登録され
    /// checked状態になる。トグル後の状態を返す。
    pub fn toggle_feature(&mut self, label: &str) -> bool {
        if let Some(feature) = self.features.iter_mut().find(|f| f.label == label) {
            feature.checked = !feature.checked;
            feature.checked
        } else {
            self.features.push(Feature {
                label: label.to_string(),
                checked: true,
            });
            true
        }
    }

    /// チェック済みFeatureのラベルを登録順で返す。
    pub fn enabled_features(&self) -> Vec<&str> {
        self.features
            .iter()
            .filter(|f| f.checked)
            .map(|f| f.label.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_set_and_reset() {
        let mut page = PageSettings::new();
        assert_eq!(page.background(), None);

        page.set_background("beige");
        assert_eq!(page.background(), Some("beige"));

        page.set_background("");
        assert_eq!(page.background(), None);
    }

    #[test]
    fn font_size_select() {
        let mut page = PageSettings::new();
        assert_eq!(page.select_font_size(FontSize::Large), Some(FontSize::Large));
        assert_eq!(page.font_size(), Some(FontSize::Large));

        // 別サイズへの切り替え
        assert_eq!(page.select_font_size(FontSize::Small), Some(FontSize::Small));
    }

    #[test]
    fn font_size_reselect_deselects() {
        let mut page = PageSettings::new();
        page.select_font_size(FontSize::Medium);

        // 選択中のサイズを再選択 → 解除
        assert_eq!(page.select_font_size(FontSize::Medium), None);
        assert_eq!(page.font_size(), None);
    }

    #[test]
    fn toggle_feature_registers_and_flips() {
        let mut page = PageSettings::new();

        assert!(page.toggle_feature("dark-mode"));
        assert!(page.toggle_feature("wishlist"));
        assert_eq!(page.enabled_features(), vec!["dark-mode", "wishlist"]);

        // 再トグルでオフ、登録順は保たれる
        assert!(!page.toggle_feature("dark-mode"));
        assert_eq!(page.enabled_features(), vec!["wishlist"]);

        // 3回目でまたオン、登録順（初回トグル順）で並ぶ
        assert!(page.toggle_feature("dark-mode"));
        assert_eq!(page.enabled_features(), vec!["dark-mode", "wishlist"]);
    }

    #[test]
    fn enabled_features_empty_by_default() {
        let page = PageSettings::new();
        assert!(page.enabled_features().is_empty());
    }
}
