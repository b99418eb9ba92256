//! Storefront theme setting

use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings key holding `{"theme": "<code>"}`
pub const THEME_SETTING_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Cyberpunk,
    Windows11,
    Apple,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Cyberpunk, Theme::Windows11, Theme::Apple];

    pub const fn code(&self) -> &'static str {
        match self {
            Theme::Cyberpunk => "cyberpunk",
            Theme::Windows11 => "windows11",
            Theme::Apple => "apple",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Read the stored setting; anything unreadable falls back to the default.
    pub fn from_setting(value: Option<&serde_json::Value>) -> Self {
        value
            .and_then(|v| v.get("theme"))
            .and_then(serde_json::Value::as_str)
            .and_then(Self::from_code)
            .unwrap_or_default()
    }

    pub fn to_setting(self) -> serde_json::Value {
        serde_json::json!({ "theme": self.code() })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
