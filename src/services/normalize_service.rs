use std::sync::OnceLock;
use std::time::{Duration, Instant};

use regex::Regex;
use scraper::Html;
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::domain::{Article, ArticleBody, LanguageStatus, RawEntry};
use crate::errors::TranslationError;
use crate::services::translation_service::{TranslationRequest, Translator};
use crate::sources::FeedBatch;

pub const PLACEHOLDER_IMAGE_BASE: &str = "https://placehold.co/600x400/1e293b/FFF";
pub const ELLIPSIS: &str = "...";
pub const NO_SUMMARY: &str = "No summary available.";
/// Link target for entries without a usable web link.
pub const NO_LINK: &str = "#";

pub type ImageExtractor = fn(&RawEntry) -> Option<String>;
pub type SummaryExtractor = fn(&RawEntry) -> Option<&str>;

/// Tried in order; the first hit wins.
pub const IMAGE_EXTRACTORS: &[ImageExtractor] = &[media_image, image_link, thumbnail_image];

/// Tried in order; the first field with visible text wins.
pub const SUMMARY_EXTRACTORS: &[SummaryExtractor] = &[summary_field, description_field];

/// The URL, if it is an absolute `http` or `https` URL. Anything else
/// (`javascript:`, `data:`, relative paths) is unsafe to put in `href`/`src`.
pub fn web_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| parsed.to_string())
}

fn media_image(entry: &RawEntry) -> Option<String> {
    entry
        .media
        .iter()
        .filter(|m| {
            m.mime_type
                .as_deref()
                .map_or(true, |mime| mime.starts_with("image"))
        })
        .find_map(|m| web_url(&m.url))
}

fn image_link(entry: &RawEntry) -> Option<String> {
    entry
        .links
        .iter()
        .filter(|l| {
            l.media_type
                .as_deref()
                .is_some_and(|t| t.starts_with("image"))
        })
        .find_map(|l| web_url(&l.href))
}

fn thumbnail_image(entry: &RawEntry) -> Option<String> {
    entry.thumbnail.as_deref().and_then(web_url)
}

fn summary_field(entry: &RawEntry) -> Option<&str> {
    entry.summary.as_deref()
}

fn description_field(entry: &RawEntry) -> Option<&str> {
    entry.description.as_deref()
}

/// Generated fallback image labelled with the source name
pub fn placeholder_image(source_name: &str) -> String {
    let label: String = url::form_urlencoded::byte_serialize(source_name.as_bytes()).collect();
    format!("{}?text={}", PLACEHOLDER_IMAGE_BASE, label)
}

pub fn resolve_image(entry: &RawEntry, source_name: &str) -> String {
    IMAGE_EXTRACTORS
        .iter()
        .find_map(|extract| extract(entry))
        .unwrap_or_else(|| placeholder_image(source_name))
}

fn whitespace() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Visible text of an HTML fragment, entities decoded and whitespace collapsed
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    whitespace().replace_all(text.trim(), " ").into_owned()
}

/// Truncate to at most `max_chars` characters, appending an ellipsis when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}{}", cut.trim_end(), ELLIPSIS)
}

/// Plain-text summary from the first field that has visible text
pub fn plain_summary(entry: &RawEntry, max_chars: usize) -> Option<String> {
    SUMMARY_EXTRACTORS
        .iter()
        .filter_map(|extract| extract(entry))
        .map(strip_markup)
        .find(|text| !text.is_empty())
        .map(|text| truncate_chars(&text, max_chars))
}

fn excerpt(text: &str) -> String {
    truncate_chars(text, 40)
}

#[derive(Debug, Clone)]
pub struct NormalizeSettings {
    pub max_articles: usize,
    pub summary_chars: usize,
    pub bullet_count: usize,
    pub translation_budget: Option<Duration>,
}

impl NormalizeSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_articles: config.max_articles,
            summary_chars: config.summary_chars,
            bullet_count: config.bullet_count,
            translation_budget: Some(config.translation_budget),
        }
    }
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            max_articles: crate::config::DEFAULT_MAX_ARTICLES,
            summary_chars: crate::config::DEFAULT_SUMMARY_CHARS,
            bullet_count: crate::config::DEFAULT_BULLETS,
            translation_budget: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub articles: Vec<Article>,
    pub translation_failures: usize,
}

pub struct NormalizeService<'a> {
    settings: NormalizeSettings,
    translator: Option<&'a dyn Translator>,
}

impl<'a> NormalizeService<'a> {
    pub fn new(settings: NormalizeSettings, translator: Option<&'a dyn Translator>) -> Self {
        Self {
            settings,
            translator,
        }
    }

    /// Normalize entries across all batches, in order, stopping at the article cap
    pub fn normalize_all(&self, batches: &[FeedBatch]) -> NormalizeReport {
        let started = Instant::now();
        let mut report = NormalizeReport::default();

        let entries = batches
            .iter()
            .flat_map(|batch| batch.entries.iter().map(move |e| (batch.source.name.as_str(), e)))
            .take(self.settings.max_articles);

        for (source_name, entry) in entries {
            let within_budget = self
                .settings
                .translation_budget
                .map_or(true, |budget| started.elapsed() < budget);

            let (article, failure) = self.normalize_entry(entry, source_name, within_budget);

            info!(
                n = report.articles.len() + 1,
                source = %source_name,
                title = %excerpt(&entry.title),
                language = %article.language,
                "article ready"
            );

            if failure.is_some() {
                report.translation_failures += 1;
            }
            report.articles.push(article);
        }

        report
    }

    /// Build one article. The returned error, if any, explains why it stayed untranslated.
    pub fn normalize_entry(
        &self,
        entry: &RawEntry,
        source_name: &str,
        within_budget: bool,
    ) -> (Article, Option<TranslationError>) {
        let summary = plain_summary(entry, self.settings.summary_chars);

        let translated = self.translator.map(|translator| {
            if !within_budget {
                return Err(TranslationError::BudgetExhausted);
            }
            let request = TranslationRequest {
                title: entry.title.clone(),
                summary: summary.clone().unwrap_or_default(),
                bullet_count: self.settings.bullet_count,
            };
            translator
                .translate(&request)
                .and_then(|t| {
                    let bullets: Vec<String> = t
                        .bullets
                        .into_iter()
                        .map(|b| b.trim().to_string())
                        .filter(|b| !b.is_empty())
                        .collect();
                    if t.headline.trim().is_empty() || bullets.is_empty() {
                        Err(TranslationError::Malformed(
                            "missing headline or bullets".to_string(),
                        ))
                    } else {
                        Ok((t.headline.trim().to_string(), bullets))
                    }
                })
        });

        let (headline, body, language, failure) = match translated {
            Some(Ok((headline, bullets))) => (
                headline,
                ArticleBody::Bullets(bullets),
                LanguageStatus::Translated,
                None,
            ),
            Some(Err(e)) => {
                warn!(title = %excerpt(&entry.title), error = %e, "translation failed, keeping original");
                (
                    entry.title.clone(),
                    fallback_body(entry, summary),
                    LanguageStatus::Original,
                    Some(e),
                )
            }
            None => (
                entry.title.clone(),
                fallback_body(entry, summary),
                LanguageStatus::Original,
                None,
            ),
        };

        let article = Article {
            headline,
            body,
            image_url: resolve_image(entry, source_name),
            link: web_url(&entry.link).unwrap_or_else(|| NO_LINK.to_string()),
            source_name: source_name.to_string(),
            language,
            published: entry.published,
        };

        (article, failure)
    }
}

fn fallback_body(entry: &RawEntry, summary: Option<String>) -> ArticleBody {
    let text = summary
        .or_else(|| {
            let title = entry.title.trim();
            (!title.is_empty()).then(|| title.to_string())
        })
        .unwrap_or_else(|| NO_SUMMARY.to_string());
    ArticleBody::Summary(text)
}
