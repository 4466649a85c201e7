use std::time::Duration;

use feed_rs::parser;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::domain::{FeedSource, LinkRef, MediaRef, RawEntry};
use crate::errors::{NewsboardError, NewsboardResult};
use crate::sources::traits::FeedFetcher;

/// Fetches RSS, Atom and JSON feeds over HTTP(S), or from disk for `file://` URLs.
pub struct RssAtomFetcher {
    client: Client,
}

impl RssAtomFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> NewsboardResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| NewsboardError::InvalidHeader(USER_AGENT.to_string()))?,
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> NewsboardResult<Self> {
        Self::new(config.request_timeout, &config.user_agent)
    }

    fn source_headers(source: &FeedSource) -> NewsboardResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &source.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| NewsboardError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| NewsboardError::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn fetch_bytes(&self, source: &FeedSource) -> NewsboardResult<Vec<u8>> {
        let url = Url::parse(&source.url).map_err(|e| NewsboardError::InvalidUrl(e.to_string()))?;

        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| NewsboardError::InvalidUrl(source.url.clone()))?;
                Ok(std::fs::read(path)?)
            }
            "http" | "https" => {
                let response = self
                    .client
                    .get(url)
                    .headers(Self::source_headers(source)?)
                    .send()?;

                let status = response.status();
                if !status.is_success() {
                    return Err(NewsboardError::HttpStatus {
                        url: source.url.clone(),
                        status: status.as_u16(),
                    });
                }

                Ok(response.bytes()?.to_vec())
            }
            other => Err(NewsboardError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                other, source.url
            ))),
        }
    }

    /// Parse raw feed bytes into entries, keeping the feed's own order
    pub fn entries_from_bytes(bytes: &[u8]) -> NewsboardResult<Vec<RawEntry>> {
        let parsed = parser::parse(bytes).map_err(|e| NewsboardError::FeedParse(e.to_string()))?;

        Ok(parsed.entries.into_iter().map(raw_entry).collect())
    }
}

impl FeedFetcher for RssAtomFetcher {
    fn fetch(&self, source: &FeedSource) -> NewsboardResult<Vec<RawEntry>> {
        let bytes = self.fetch_bytes(source)?;
        debug!(source = %source.name, bytes = bytes.len(), "fetched feed");
        Self::entries_from_bytes(&bytes)
    }
}

fn raw_entry(entry: feed_rs::model::Entry) -> RawEntry {
    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let link = select_entry_link(&entry.links);

    let links: Vec<LinkRef> = entry
        .links
        .into_iter()
        .map(|l| LinkRef {
            href: l.href,
            media_type: l.media_type,
        })
        .collect();

    let mut media = Vec::new();
    let mut thumbnail = None;
    for object in &entry.media {
        for content in &object.content {
            if let Some(url) = &content.url {
                media.push(MediaRef {
                    url: url.to_string(),
                    mime_type: content.content_type.as_ref().map(|m| m.to_string()),
                });
            }
        }
        if thumbnail.is_none() {
            thumbnail = object
                .thumbnails
                .iter()
                .map(|t| t.image.uri.trim())
                .find(|uri| !uri.is_empty())
                .map(str::to_string);
        }
    }

    let summary = entry.summary.map(|s| s.content);
    let description = entry.content.and_then(|c| c.body);

    RawEntry::new(title, link)
        .with_summary(summary)
        .with_description(description)
        .with_media(media)
        .with_links(links)
        .with_thumbnail(thumbnail)
        .with_published(entry.published.or(entry.updated))
}

/// The article link: first alternate (or rel-less) link, else the first link
fn select_entry_link(links: &[feed_rs::model::Link]) -> String {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Gematsu</title>
    <link>https://gematsu.com/</link>
    <description>Video game news</description>
    <item>
      <title>Persona 6 announced</title>
      <link>https://gematsu.com/2024/06/persona-6</link>
      <description><![CDATA[<p>Atlus has <b>announced</b> Persona 6.</p>]]></description>
      <enclosure url="https://gematsu.com/img/p6.jpg" length="1234" type="image/jpeg"/>
      <pubDate>Tue, 11 Jun 2024 10:00:00 +0000</pubDate>
      <guid>https://gematsu.com/2024/06/persona-6</guid>
    </item>
    <item>
      <title>Famitsu sales</title>
      <link>https://gematsu.com/2024/06/famitsu-sales</link>
      <description>Weekly numbers.</description>
      <media:thumbnail url="https://gematsu.com/img/sales-thumb.jpg"/>
      <pubDate>Mon, 10 Jun 2024 09:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

    const SAMPLE_ATOM: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Game Blog</title>
  <link href="https://example.com/"/>
  <id>https://example.com/feed.atom</id>
  <updated>2024-01-15T12:00:00Z</updated>
  <entry>
    <title>Patch notes</title>
    <link rel="enclosure" type="image/png" href="https://example.com/patch.png"/>
    <link rel="alternate" href="https://example.com/posts/patch"/>
    <id>https://example.com/posts/patch</id>
    <updated>2024-01-15T12:00:00Z</updated>
    <content type="html"><![CDATA[<article><p>Full patch notes.</p></article>]]></content>
  </entry>
</feed>"#;

    #[test]
    fn test_rss_entries_in_feed_order() {
        let entries = RssAtomFetcher::entries_from_bytes(SAMPLE_RSS).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Persona 6 announced");
        assert_eq!(entries[0].link, "https://gematsu.com/2024/06/persona-6");
        assert_eq!(entries[1].title, "Famitsu sales");
        assert!(entries[0].published.is_some());
    }

    #[test]
    fn test_rss_description_is_summary() {
        let entries = RssAtomFetcher::entries_from_bytes(SAMPLE_RSS).unwrap();

        let summary = entries[0].summary.as_deref().unwrap();
        assert!(summary.contains("announced"));
        assert!(entries[0].description.is_none());
    }

    #[test]
    fn test_rss_enclosure_becomes_media() {
        let entries = RssAtomFetcher::entries_from_bytes(SAMPLE_RSS).unwrap();

        assert_eq!(entries[0].media.len(), 1);
        assert_eq!(entries[0].media[0].url, "https://gematsu.com/img/p6.jpg");
        assert_eq!(entries[0].media[0].mime_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_rss_media_thumbnail() {
        let entries = RssAtomFetcher::entries_from_bytes(SAMPLE_RSS).unwrap();

        assert_eq!(
            entries[1].thumbnail.as_deref(),
            Some("https://gematsu.com/img/sales-thumb.jpg")
        );
    }

    #[test]
    fn test_atom_prefers_alternate_link() {
        let entries = RssAtomFetcher::entries_from_bytes(SAMPLE_ATOM).unwrap();

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.link, "https://example.com/posts/patch");
        assert!(entry.summary.is_none());
        assert!(entry.description.as_deref().unwrap().contains("Full patch notes"));
        assert!(entry
            .links
            .iter()
            .any(|l| l.media_type.as_deref() == Some("image/png")));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = RssAtomFetcher::entries_from_bytes(b"<html>not a feed</html>").unwrap_err();
        assert!(matches!(err, NewsboardError::FeedParse(_)));
    }

    #[test]
    fn test_file_url_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        std::fs::write(&path, SAMPLE_RSS).unwrap();

        let fetcher = RssAtomFetcher::new(Duration::from_secs(5), "test-agent").unwrap();
        let url = Url::from_file_path(&path).unwrap();
        let entries = fetcher
            .fetch(&FeedSource::new("Local", url.as_str()))
            .unwrap();

        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_unsupported_scheme_rejected() {
        let fetcher = RssAtomFetcher::new(Duration::from_secs(5), "test-agent").unwrap();
        let err = fetcher
            .fetch(&FeedSource::new("FTP", "ftp://example.com/feed"))
            .unwrap_err();
        assert!(matches!(err, NewsboardError::InvalidUrl(_)));
    }

    #[test]
    fn test_source_headers_override_defaults_on_the_wire() {
        use crate::test_support::StubServer;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, ResponseTemplate};

        let server = StubServer::start(vec![Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(SAMPLE_RSS, "application/rss+xml"))]);
        let source = FeedSource::new("Stub", format!("{}/feed.xml", server.uri()))
            .with_header("User-Agent", "custom-agent")
            .with_header("X-Feed-Token", "abc");

        let fetcher = RssAtomFetcher::new(Duration::from_secs(5), "test-agent").unwrap();
        let entries = fetcher.fetch(&source).unwrap();
        assert_eq!(entries.len(), 2);

        let received = server.received();
        assert_eq!(received.len(), 1);
        let agents: Vec<&str> = received[0]
            .headers
            .get_all("user-agent")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert_eq!(agents, vec!["custom-agent"]);
        assert_eq!(
            received[0].headers.get("x-feed-token").and_then(|v| v.to_str().ok()),
            Some("abc")
        );
    }

    #[test]
    fn test_default_user_agent_without_override() {
        use crate::test_support::StubServer;
        use wiremock::matchers::method;
        use wiremock::{Mock, ResponseTemplate};

        let server = StubServer::start(vec![Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(SAMPLE_RSS, "application/rss+xml"))]);

        let fetcher = RssAtomFetcher::new(Duration::from_secs(5), "test-agent").unwrap();
        fetcher
            .fetch(&FeedSource::new("Stub", format!("{}/feed.xml", server.uri())))
            .unwrap();

        let received = server.received();
        assert_eq!(
            received[0].headers.get("user-agent").and_then(|v| v.to_str().ok()),
            Some("test-agent")
        );
    }

    #[test]
    fn test_error_status_is_http_status() {
        use crate::test_support::StubServer;
        use wiremock::matchers::method;
        use wiremock::{Mock, ResponseTemplate};

        let server = StubServer::start(vec![
            Mock::given(method("GET")).respond_with(ResponseTemplate::new(503))
        ]);

        let fetcher = RssAtomFetcher::new(Duration::from_secs(5), "test-agent").unwrap();
        let err = fetcher
            .fetch(&FeedSource::new("Down", format!("{}/feed.xml", server.uri())))
            .unwrap_err();

        assert!(matches!(err, NewsboardError::HttpStatus { status: 503, .. }));
    }

    #[test]
    fn test_invalid_source_header_rejected() {
        let source = FeedSource::new("Bad", "https://example.com/feed")
            .with_header("Bad Header", "x");
        let err = RssAtomFetcher::source_headers(&source).unwrap_err();
        assert!(matches!(err, NewsboardError::InvalidHeader(_)));
    }
}
