use std::str::FromStr;

/// Storefront language. Sent to the API as the `lang` request header and
/// controls the language of names, descriptions and branch names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

impl Language {
    /// Header value understood by the storefront API.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hebrew => "he",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "he" | "hebrew" => Ok(Language::Hebrew),
            other => Err(format!("unknown language \"{other}\" (expected en or he)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub language: Language,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub poll_interval_secs: u64,
}
