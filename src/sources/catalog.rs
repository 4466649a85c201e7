use std::fs;
use std::path::Path;

use opml::{Outline, OPML};

use crate::domain::FeedSource;
use crate::errors::{NewsboardError, NewsboardResult};

/// Read sources from a JSON array of `{name, url, headers?}` objects
pub fn load_sources_json(path: impl AsRef<Path>) -> NewsboardResult<Vec<FeedSource>> {
    let content = fs::read_to_string(path)?;
    parse_sources_json(&content)
}

pub fn parse_sources_json(content: &str) -> NewsboardResult<Vec<FeedSource>> {
    let sources: Vec<FeedSource> =
        serde_json::from_str(content).map_err(|e| NewsboardError::SourcesParse(e.to_string()))?;

    if let Some(bad) = sources
        .iter()
        .find(|s| s.name.trim().is_empty() || s.url.trim().is_empty())
    {
        return Err(NewsboardError::SourcesParse(format!(
            "source needs both a name and a url: {:?}",
            bad
        )));
    }

    Ok(sources)
}

/// Import sources from OPML content, walking nested outlines
pub fn import_opml(content: &str) -> NewsboardResult<Vec<FeedSource>> {
    let opml = OPML::from_str(content).map_err(|e| NewsboardError::OpmlParse(e.to_string()))?;

    let mut sources = Vec::new();
    collect_outlines(&opml.body.outlines, &mut sources);
    Ok(sources)
}

pub fn load_opml(path: impl AsRef<Path>) -> NewsboardResult<Vec<FeedSource>> {
    let content = fs::read_to_string(path)?;
    import_opml(&content)
}

fn collect_outlines(outlines: &[Outline], sources: &mut Vec<FeedSource>) {
    for outline in outlines {
        if let Some(url) = outline.xml_url.as_deref().filter(|u| !u.is_empty()) {
            let name = outline
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| outline.text.clone());
            sources.push(FeedSource::new(name, url));
        }

        collect_outlines(&outline.outlines, sources);
    }
}

/// Export sources as OPML. Per-source headers have no OPML representation and are dropped.
pub fn export_opml(sources: &[FeedSource]) -> NewsboardResult<String> {
    let mut opml = OPML::default();
    opml.head = Some(opml::Head {
        title: Some("Newsboard Sources".to_string()),
        ..Default::default()
    });

    for source in sources {
        opml.body.outlines.push(Outline {
            text: source.name.clone(),
            r#type: Some("rss".to_string()),
            xml_url: Some(source.url.clone()),
            title: Some(source.name.clone()),
            ..Default::default()
        });
    }

    opml.to_string()
        .map_err(|e| NewsboardError::OpmlParse(e.to_string()))
}
