//! Streaming RSS title extraction.
//!
//! Walks the document with a pull parser and keeps a stack of local element
//! names. A title counts only when it sits at `<root>/channel/item/title`;
//! character data nested deeper inside the title is ignored.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

const CHANNEL: &[u8] = b"channel";
const ITEM: &[u8] = b"item";
const TITLE: &[u8] = b"title";

/// Depth of a title element: root, channel, item, title.
const TITLE_DEPTH: usize = 4;

/// Feed parsing failures.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The document is not well-formed XML or has no root element.
    #[error("malformed feed document at byte {position}: {reason}")]
    Malformed { position: u64, reason: String },

    /// The document parsed but contains no titled item.
    #[error("No items")]
    Empty,
}

/// Return the title of the first item in the feed, in document order.
pub fn latest_item(document: &[u8]) -> Result<String, FeedError> {
    item_titles(document)?
        .into_iter()
        .next()
        .ok_or(FeedError::Empty)
}

/// Return every item title in document order.
///
/// Items without a title element contribute nothing.
pub fn item_titles(document: &[u8]) -> Result<Vec<String>, FeedError> {
    let mut reader = Reader::from_reader(document);
    let mut buf = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut titles = Vec::new();
    let mut current: Option<String> = None;
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| malformed(&reader, e))?;

        match event {
            Event::Start(e) => {
                saw_root = true;
                path.push(e.local_name().as_ref().to_vec());
                if is_title_path(&path) {
                    current = Some(String::new());
                }
            }
            Event::Empty(e) => {
                saw_root = true;
                path.push(e.local_name().as_ref().to_vec());
                if is_title_path(&path) {
                    titles.push(String::new());
                }
                path.pop();
                if path.is_empty() {
                    break;
                }
            }
            Event::Text(text) if path.len() == TITLE_DEPTH => {
                if let Some(title) = current.as_mut() {
                    let unescaped = text.unescape().map_err(|e| malformed(&reader, e))?;
                    title.push_str(&unescaped);
                }
            }
            Event::CData(data) if path.len() == TITLE_DEPTH => {
                if let Some(title) = current.as_mut() {
                    let raw = data.into_inner();
                    let decoded = std::str::from_utf8(&raw).map_err(|e| malformed(&reader, e))?;
                    title.push_str(decoded);
                }
            }
            Event::End(_) => {
                if path.len() == TITLE_DEPTH {
                    if let Some(title) = current.take() {
                        titles.push(title);
                    }
                }
                path.pop();
                if path.is_empty() {
                    break;
                }
            }
            Event::Eof => {
                if !saw_root {
                    return Err(malformed(&reader, "document has no root element"));
                }
                return Err(malformed(&reader, "unexpected end of document"));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(titles)
}

fn is_title_path(path: &[Vec<u8>]) -> bool {
    path.len() == TITLE_DEPTH
        && path[1] == CHANNEL
        && path[2] == ITEM
        && path[3] == TITLE
}

fn malformed<R>(reader: &Reader<R>, reason: impl ToString) -> FeedError {
    FeedError::Malformed {
        position: reader.buffer_position() as u64,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S3_FEED: &str = r#"
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Amazon Simple Storage Service (US Standard) Service Status</title>
    <link>http://status.aws.amazon.com/</link>
    <link rel="alternate" href="http://status.aws.amazon.com/rss/all.rss" type="application/rss+xml" title="Amazon Web Services Status Feed"/>
    <title type="text">Current service status feed for Amazon Simple Storage Service (US Standard).</title>
    <language>en-us</language>
    <pubDate>Wed,  8 Mar 2017 13:16:09 PST</pubDate>
    <ttl>5</ttl>
     <item>
      <title type="text">Service disruption: [RESOLVED] Increased Error Rates</title>
      <link>http://status.aws.amazon.com/</link>
      <pubDate>Tue, 28 Feb 2017 14:11:00 PST</pubDate>
      <guid>http://status.aws.amazon.com/#s3-us-standard_1488319860</guid>
      <description>The Amazon S3 service is operating normally.</description>
     </item>
    <item>
    <title type="text">Informational message: Increased Error Rates</title>
    <pubDate>Tue, 28 Feb 2017 13:13:00 PST</pubDate>
    </item>
  </channel>
</rss>
"#;

    #[test]
    fn returns_first_item_title() {
        let title = latest_item(S3_FEED.as_bytes()).unwrap();
        assert_eq!(title, "Service disruption: [RESOLVED] Increased Error Rates");
    }

    #[test]
    fn keeps_document_order() {
        let titles = item_titles(S3_FEED.as_bytes()).unwrap();
        assert_eq!(
            titles,
            vec![
                "Service disruption: [RESOLVED] Increased Error Rates",
                "Informational message: Increased Error Rates",
            ]
        );
    }

    #[test]
    fn channel_without_items_is_empty() {
        let err = latest_item(b"<rss><channel></channel></rss>").unwrap_err();
        assert!(matches!(err, FeedError::Empty));
        assert_eq!(err.to_string(), "No items");
    }

    #[test]
    fn untitled_items_are_skipped() {
        let doc = b"<rss><channel><item><link>x</link></item><item><title>second</title></item></channel></rss>";
        assert_eq!(latest_item(doc).unwrap(), "second");

        let doc = b"<rss><channel><item><link>x</link></item></channel></rss>";
        assert!(matches!(latest_item(doc), Err(FeedError::Empty)));
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        let err = latest_item(b"<rss><channel><item><title>x</item></channel></rss>").unwrap_err();
        assert!(matches!(err, FeedError::Malformed { .. }));
    }

    #[test]
    fn truncated_and_empty_documents_are_malformed() {
        assert!(matches!(
            latest_item(b"<rss><channel><item><title>x</title>"),
            Err(FeedError::Malformed { .. })
        ));
        assert!(matches!(latest_item(b""), Err(FeedError::Malformed { .. })));
        assert!(matches!(
            latest_item(b"not xml at all"),
            Err(FeedError::Malformed { .. })
        ));
    }

    #[test]
    fn title_text_is_unescaped_but_not_trimmed() {
        let doc = b"<rss><channel><item><title>  A &amp; B <![CDATA[<RESOLVED>]]> </title></item></channel></rss>";
        assert_eq!(latest_item(doc).unwrap(), "  A & B <RESOLVED> ");
    }

    #[test]
    fn titles_outside_items_are_ignored() {
        let doc = b"<rss><channel><title>channel</title><item><guid>1</guid><title>item</title></item></channel></rss>";
        assert_eq!(latest_item(doc).unwrap(), "item");
    }

    #[test]
    fn root_element_name_is_not_checked() {
        let doc = b"<feed><channel><item><title>any root</title></item></channel></feed>";
        assert_eq!(latest_item(doc).unwrap(), "any root");
    }
}
