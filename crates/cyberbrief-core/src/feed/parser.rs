use chrono::{DateTime, Local};
use feed_rs::parser;

use super::models::FeedItem;
use crate::{Error, Result};

/// Parse RSS 2.0 or Atom 1.0 content into a uniform item list.
///
/// Field extraction tolerates the two schemas' aliases: feed-rs folds
/// RSS `link` text and Atom `link href` into `entry.links`, RSS
/// `description` and Atom `summary` into `entry.summary`, and
/// `pubDate` / `published` / `updated` into the two timestamp fields.
/// Items missing a title or link are dropped; one malformed item never
/// aborts the batch.
pub fn parse_items(content: &str) -> Result<Vec<FeedItem>> {
    let feed = parser::parse(content.as_bytes()).map_err(|e| Error::FeedParse(e.to_string()))?;

    let items = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .unwrap_or_default();

            let link = entry
                .links
                .first()
                .map(|l| l.href.trim().to_string())
                .unwrap_or_default();

            // Non-empty title AND link are the only hard requirements.
            if title.is_empty() || link.is_empty() {
                return None;
            }

            // description: summary (RSS description / Atom summary)
            // first, Atom content body as the last resort.
            let description = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();

            // pubDate, then Atom published, then updated. An
            // unparseable date string arrives here as None and is
            // treated as recent downstream (inclusion bias).
            let published = entry
                .published
                .or(entry.updated)
                .map(DateTime::<Local>::from);

            Some(FeedItem {
                title,
                link,
                description,
                published,
            })
        })
        .collect();

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Security Feed</title>
    <item>
      <title>Ransomware hits logistics giant</title>
      <link>https://example.com/ransomware-logistics</link>
      <description>Operations halted across three regions.</description>
      <pubDate>Tue, 25 Aug 2026 09:30:00 GMT</pubDate>
    </item>
    <item>
      <title></title>
      <link>https://example.com/no-title</link>
      <description>This one has no title.</description>
    </item>
    <item>
      <title>No link here</title>
      <description>This one has no link.</description>
    </item>
    <item>
      <title>Nonstandard date survives</title>
      <link>https://example.com/bad-date</link>
      <pubDate>sometime last week</pubDate>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Security Blog</title>
  <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
  <updated>2026-08-26T12:00:00Z</updated>
  <entry>
    <title>New phishing kit analysis</title>
    <link href="https://blog.example.org/phishing-kit"/>
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <updated>2026-08-26T12:00:00Z</updated>
    <summary>Credential harvesting targeting enterprise SSO.</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_rss_items_parsed_with_aliases() {
        let items = parse_items(RSS_SAMPLE).unwrap();
        let first = &items[0];
        assert_eq!(first.title, "Ransomware hits logistics giant");
        assert_eq!(first.link, "https://example.com/ransomware-logistics");
        assert!(first.description.contains("three regions"));
        assert!(first.published.is_some());
    }

    #[test]
    fn test_items_missing_title_or_link_are_dropped() {
        let items = parse_items(RSS_SAMPLE).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| !i.title.is_empty() && !i.link.is_empty()));
    }

    #[test]
    fn test_unparseable_date_keeps_item_with_no_timestamp() {
        let items = parse_items(RSS_SAMPLE).unwrap();
        let survivor = items
            .iter()
            .find(|i| i.title == "Nonstandard date survives")
            .unwrap();
        assert!(survivor.published.is_none());
    }

    #[test]
    fn test_atom_entries_use_href_and_summary() {
        let items = parse_items(ATOM_SAMPLE).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://blog.example.org/phishing-kit");
        assert!(items[0].description.contains("enterprise SSO"));
        assert!(items[0].published.is_some());
    }

    #[test]
    fn test_malformed_document_is_an_error_not_a_panic() {
        assert!(parse_items("this is not xml at all").is_err());
    }
}
