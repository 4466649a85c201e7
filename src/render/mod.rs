//! Turns normalized articles into the final HTML page.
//!
//! Rendering is a pure function of [`RenderContext`]. Every feed-derived
//! string is HTML-escaped before it reaches the template.

pub mod output;
pub mod template;

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::{Article, ArticleBody};
use crate::services::normalize_service::{placeholder_image, web_url, NO_LINK};

pub use output::write_document;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub generated_at: DateTime<Utc>,
    pub source_label: String,
    pub articles: Vec<Article>,
}

/// Age of `published` as seen at `now`, in whole hours or minutes.
pub fn time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(published).num_seconds();
    if seconds > 3600 {
        return plural(seconds / 3600, "hour");
    }
    if seconds > 60 {
        return plural(seconds / 60, "minute");
    }
    "Just now".to_string()
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

pub fn render(context: RenderContext) -> String {
    let content = if context.articles.is_empty() {
        template::EMPTY_STATE.to_string()
    } else {
        let mut grid = String::from("    <div class=\"grid\">\n");
        for article in &context.articles {
            grid.push_str(&render_card(article, context.generated_at));
        }
        grid.push_str("    </div>");
        grid
    };

    template::PAGE
        .replace("{{source_label}}", &encode_text(&context.source_label))
        .replace(
            "{{generated_at}}",
            &context.generated_at.format(DATE_FORMAT).to_string(),
        )
        .replace("{{content}}", &content)
}

fn render_card(article: &Article, now: DateTime<Utc>) -> String {
    let mut card = String::new();
    let fallback_image = placeholder_image("News");
    let link = web_url(&article.link).unwrap_or_else(|| NO_LINK.to_string());
    let image = web_url(&article.image_url).unwrap_or_else(|| placeholder_image(&article.source_name));

    let _ = writeln!(
        card,
        "        <article class=\"card\" data-language=\"{}\">",
        article.language.as_str()
    );
    let _ = writeln!(
        card,
        "            <a href=\"{}\" target=\"_blank\" rel=\"noopener\">",
        encode_double_quoted_attribute(&link)
    );
    let _ = writeln!(
        card,
        "                <img src=\"{}\" alt=\"\" loading=\"lazy\" onerror=\"this.onerror=null;this.src='{}'\">",
        encode_double_quoted_attribute(&image),
        fallback_image
    );
    card.push_str("                <div class=\"content\">\n");

    let tag = if article.is_translated() {
        ""
    } else {
        template::ORIGINAL_TAG
    };
    let _ = writeln!(
        card,
        "                    <div class=\"source\">{}{}</div>",
        encode_text(&article.source_name),
        tag
    );
    let _ = writeln!(
        card,
        "                    <h2>{}</h2>",
        encode_text(&article.headline)
    );

    match &article.body {
        ArticleBody::Bullets(bullets) => {
            card.push_str("                    <ul>");
            for bullet in bullets {
                let _ = write!(card, "<li>{}</li>", encode_text(bullet));
            }
            card.push_str("</ul>\n");
        }
        ArticleBody::Summary(text) => {
            let _ = writeln!(card, "                    <p>{}</p>", encode_text(text));
        }
    }

    if let Some(published) = article.published {
        let _ = writeln!(
            card,
            "                    <div class=\"date-tag\" title=\"{}\">{}</div>",
            published.format(DATE_FORMAT),
            time_ago(published, now)
        );
    }

    card.push_str("                </div>\n            </a>\n        </article>\n");
    card
}
