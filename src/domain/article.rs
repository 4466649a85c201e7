use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageStatus {
    Translated,
    Original,
}

impl LanguageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageStatus::Translated => "translated",
            LanguageStatus::Original => "original",
        }
    }
}

impl std::fmt::Display for LanguageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleBody {
    Bullets(Vec<String>),
    Summary(String),
}

impl ArticleBody {
    pub fn is_empty(&self) -> bool {
        match self {
            ArticleBody::Bullets(items) => {
                items.is_empty() || items.iter().all(|b| b.trim().is_empty())
            }
            ArticleBody::Summary(text) => text.trim().is_empty(),
        }
    }
}

/// A normalized, render-ready news item.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub headline: String,
    pub body: ArticleBody,
    pub image_url: String,
    pub link: String,
    pub source_name: String,
    pub language: LanguageStatus,
    pub published: Option<DateTime<Utc>>,
}

impl Article {
    pub fn is_translated(&self) -> bool {
        self.language == LanguageStatus::Translated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_emptiness() {
        assert!(ArticleBody::Bullets(vec![]).is_empty());
        assert!(ArticleBody::Bullets(vec!["  ".to_string()]).is_empty());
        assert!(ArticleBody::Summary(" ".to_string()).is_empty());
        assert!(!ArticleBody::Bullets(vec!["one".to_string()]).is_empty());
        assert!(!ArticleBody::Summary("text".to_string()).is_empty());
    }

    #[test]
    fn test_language_status_display() {
        assert_eq!(LanguageStatus::Translated.to_string(), "translated");
        assert_eq!(LanguageStatus::Original.to_string(), "original");
    }
}
