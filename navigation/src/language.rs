use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    #[serde(alias = "jp")]
    Ja,
}

/// User-facing strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub no_item: &'static str,
    pub not_supported: &'static str,
}

const EN: Messages = Messages {
    no_item: "No adjacent items",
    not_supported: "Not supported",
};

const JA: Messages = Messages {
    no_item: "隣接項目はありません",
    not_supported: "非対象",
};

impl Language {
    pub fn messages(self) -> Messages {
        match self {
            Self::En => EN,
            Self::Ja => JA,
        }
    }

    /// Maps a BCP 47 tag such as `ja-JP` or `en_US.UTF-8`.
    pub fn from_locale(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ja" | "jp" => Self::Ja,
            _ => Self::En,
        }
    }

    pub fn detect() -> Self {
        sys_locale::get_locale()
            .map(|tag| Self::from_locale(&tag))
            .unwrap_or_default()
    }
}
