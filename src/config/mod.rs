use std::str::FromStr;
use std::time::Duration;

use crate::errors::{NewsboardError, NewsboardResult};

pub const DEFAULT_OUTPUT: &str = "index.html";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MAX_ARTICLES: usize = 8;
pub const DEFAULT_SUMMARY_CHARS: usize = 150;
pub const DEFAULT_BULLETS: usize = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BUDGET_SECS: u64 = 300;

/// Some publishers reject non-browser clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key; translation is disabled when absent.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub output_path: String,
    pub max_articles: usize,
    pub per_source_limit: Option<usize>,
    pub summary_chars: usize,
    pub bullet_count: usize,
    pub request_timeout: Duration,
    pub translation_budget: Duration,
    pub user_agent: String,
    pub sources_path: Option<String>,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> NewsboardResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> NewsboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_articles = parse_var(&var, "NEWSBOARD_MAX_ARTICLES")?
            .unwrap_or(DEFAULT_MAX_ARTICLES);
        if max_articles == 0 {
            return Err(NewsboardError::Config(
                "NEWSBOARD_MAX_ARTICLES must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_key: var("GEMINI_API_KEY"),
            model: var("NEWSBOARD_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: var("NEWSBOARD_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            output_path: var("NEWSBOARD_OUTPUT").unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
            max_articles,
            per_source_limit: parse_var(&var, "NEWSBOARD_PER_SOURCE")?,
            summary_chars: parse_var(&var, "NEWSBOARD_SUMMARY_CHARS")?
                .unwrap_or(DEFAULT_SUMMARY_CHARS),
            bullet_count: parse_var(&var, "NEWSBOARD_BULLETS")?.unwrap_or(DEFAULT_BULLETS),
            request_timeout: Duration::from_secs(
                parse_var(&var, "NEWSBOARD_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            translation_budget: Duration::from_secs(
                parse_var(&var, "NEWSBOARD_BUDGET_SECS")?.unwrap_or(DEFAULT_BUDGET_SECS),
            ),
            user_agent: var("NEWSBOARD_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            sources_path: var("NEWSBOARD_SOURCES"),
        })
    }

    pub fn translation_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> NewsboardResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| NewsboardError::Config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(None),
    }
}
