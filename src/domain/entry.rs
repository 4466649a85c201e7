use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub url: String,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub href: String,
    pub media_type: Option<String>,
}

/// One feed item as parsed, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    /// Feed summary (RSS `description`, Atom `summary`). May contain markup.
    pub summary: Option<String>,
    /// Full content body, used when there is no summary.
    pub description: Option<String>,
    pub media: Vec<MediaRef>,
    pub links: Vec<LinkRef>,
    pub thumbnail: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

impl RawEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            summary: None,
            description: None,
            media: Vec::new(),
            links: Vec::new(),
            thumbnail: None,
            published: None,
        }
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_media(mut self, media: Vec<MediaRef>) -> Self {
        self.media = media;
        self
    }

    pub fn with_links(mut self, links: Vec<LinkRef>) -> Self {
        self.links = links;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    pub fn with_published(mut self, published: Option<DateTime<Utc>>) -> Self {
        self.published = published;
        self
    }
}
