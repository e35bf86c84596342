//! Release feed (`releases.atom`) parsing

use crate::core::{KilnError, KilnResult};

const TAG_PATH_MARKER: &str = "/releases/tag/";

/// Build the feed URI for a repository
pub fn releases_feed_uri(repository: &str) -> String {
    format!("{}/releases.atom", repository)
}

/// Extract release tag names from an Atom feed, in document order
///
/// The tag is read from the entry's `<link href=".../releases/tag/<tag>">`.
/// Entries without such a link fall back to their `<title>`.
pub fn parse_release_tags(xml: &str) -> KilnResult<Vec<String>> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| KilnError::Release(format!("Failed to parse release feed: {}", e)))?;

    let tags = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "entry")
        .filter_map(|entry| tag_from_link(entry).or_else(|| tag_from_title(entry)))
        .collect();

    Ok(tags)
}

fn tag_from_link(entry: roxmltree::Node<'_, '_>) -> Option<String> {
    entry
        .children()
        .filter(|n| n.tag_name().name() == "link")
        .filter_map(|link| link.attribute("href"))
        .find_map(|href| {
            let pos = href.find(TAG_PATH_MARKER)?;
            let tag = href[pos + TAG_PATH_MARKER.len()..].trim_end_matches('/');
            (!tag.is_empty()).then(|| tag.to_string())
        })
}

fn tag_from_title(entry: roxmltree::Node<'_, '_>) -> Option<String> {
    entry
        .children()
        .find(|n| n.tag_name().name() == "title")
        .and_then(|title| title.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/" xml:lang="en-US">
  <id>tag:github.com,2008:https://github.com/user/project/releases</id>
  <link type="text/html" rel="alternate" href="https://github.com/user/project/releases"/>
  <link type="application/atom+xml" rel="self" href="https://github.com/user/project/releases.atom"/>
  <title>Release notes from project</title>
  <updated>2017-01-04T12:00:00Z</updated>
  <entry>
    <id>tag:github.com,2008:Repository/1/v0.1.11-rust</id>
    <updated>2017-01-04T12:00:00Z</updated>
    <link rel="alternate" type="text/html" href="https://github.com/user/project/releases/tag/v0.1.11-rust"/>
    <title>v0.1.11-rust</title>
    <content type="html">&lt;p&gt;Rust bits&lt;/p&gt;</content>
  </entry>
  <entry>
    <id>tag:github.com,2008:Repository/1/v0.1.11</id>
    <updated>2017-01-03T12:00:00Z</updated>
    <link rel="alternate" type="text/html" href="https://github.com/user/project/releases/tag/v0.1.11"/>
    <title>Version 0.1.11</title>
  </entry>
  <entry>
    <id>tag:github.com,2008:Repository/1/v0.1.10-rust</id>
    <updated>2017-01-02T12:00:00Z</updated>
    <link rel="alternate" type="text/html" href="https://github.com/user/project/releases/tag/v0.1.10-rust"/>
    <title>v0.1.10-rust</title>
  </entry>
</feed>
"#;
