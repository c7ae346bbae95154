use std::fmt;

use serde::Serialize;

/// Response language. Only the allow-listed codes are ever selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    It,
}

impl Locale {
    pub const SUPPORTED: [Locale; 2] = [Locale::En, Locale::It];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::It => "it",
        }
    }

    /// Exact match against the allow-list.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Pick the language for one request.
///
/// The header wins when present, even if its value is unsupported; in that
/// case the query parameter is not consulted and `default` is kept.
pub fn select_locale(header: Option<&str>, query: Option<&str>, default: Locale) -> Locale {
    header
        .or(query)
        .and_then(Locale::from_code)
        .unwrap_or(default)
}
