use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::errors::{NewsboardError, NewsboardResult, TranslationError};

/// What gets sent for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub title: String,
    pub summary: String,
    pub bullet_count: usize,
}

/// A localized headline and its bullet points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub headline: String,
    pub bullets: Vec<String>,
}

const API_KEY_HEADER: &str = "x-goog-api-key";

/// The key as a header value, marked sensitive so it never shows up in debug output.
fn api_key_header(api_key: &str) -> NewsboardResult<HeaderValue> {
    let mut value = HeaderValue::from_str(api_key)
        .map_err(|_| NewsboardError::InvalidHeader(API_KEY_HEADER.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg_attr(test, mockall::automock)]
pub trait Translator {
    fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslationError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// The record the model is asked to return.
#[derive(Deserialize)]
struct TranslationRecord {
    headline: String,
    bullets: BulletsField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BulletsField {
    List(Vec<String>),
    Text(String),
}

/// Gemini `generateContent` client. Built once per run and passed in.
pub struct GeminiTranslator {
    client: Client,
    endpoint: String,
}

impl fmt::Debug for GeminiTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiTranslator")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiTranslator {
    pub fn new(
        api_key: &str,
        api_base: &str,
        model: &str,
        timeout: std::time::Duration,
    ) -> NewsboardResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key_header(api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                model
            ),
        })
    }

    pub fn from_config(config: &Config) -> NewsboardResult<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| NewsboardError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        Self::new(api_key, &config.api_base, &config.model, config.request_timeout)
    }
}

impl Translator for GeminiTranslator {
    fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslationError> {
        let prompt = build_prompt(request);
        let payload = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self.client.post(&self.endpoint).json(&payload).send()?;

        let status = response.status().as_u16();
        match status {
            200..=299 => {}
            401 | 403 => return Err(TranslationError::Auth(status)),
            429 => return Err(TranslationError::Quota),
            _ => {
                let body = response.text().unwrap_or_default();
                return Err(TranslationError::Status {
                    status,
                    body: body.chars().take(200).collect(),
                });
            }
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| TranslationError::Malformed(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        debug!(chars = text.len(), "translation response received");
        parse_translation(&text)
    }
}

pub fn build_prompt(request: &TranslationRequest) -> String {
    format!(
        "You are an editor for an Arabic video game news site.\n\
         Translate the headline of the news item below into Arabic and summarize \
         its content as exactly {count} short Arabic bullet points.\n\
         Respond with a JSON object with two string fields:\n\
         \"headline\": the Arabic headline,\n\
         \"bullets\": the bullet points as HTML list items, e.g. \"<li>...</li><li>...</li>\".\n\n\
         Headline: {title}\n\
         Content: {summary}\n",
        count = request.bullet_count,
        title = request.title,
        summary = request.summary,
    )
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("fence pattern is valid")
    })
}

/// Parse the model's JSON record into a translation with at least one bullet
pub fn parse_translation(text: &str) -> Result<Translation, TranslationError> {
    let json = code_fence()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text);

    let record: TranslationRecord =
        serde_json::from_str(json).map_err(|e| TranslationError::Malformed(e.to_string()))?;

    let headline = record.headline.trim().to_string();
    if headline.is_empty() {
        return Err(TranslationError::Malformed("empty headline".to_string()));
    }

    let bullets = match record.bullets {
        BulletsField::List(items) => items
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect(),
        BulletsField::Text(text) => split_bullets(&text),
    };

    if bullets.is_empty() {
        return Err(TranslationError::Malformed("no bullet points".to_string()));
    }

    Ok(Translation { headline, bullets })
}

/// Split bullet text given either as `<li>` markup or as one bullet per line
fn split_bullets(text: &str) -> Vec<String> {
    if text.contains("<li") {
        let fragment = Html::parse_fragment(text);
        let Ok(selector) = Selector::parse("li") else {
            return Vec::new();
        };
        return fragment
            .select(&selector)
            .map(|li| li.text().collect::<String>().trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
    }

    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| matches!(c, '-' | '*' | '•'))
                .trim()
                .to_string()
        })
        .filter(|b| !b.is_empty())
        .collect()
}
