use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// One syndication entry with field fallbacks already applied.
///
/// `title` is never empty (a missing title becomes `"No title"`); `link` and
/// `summary` may be empty when the feed carries neither the primary field nor
/// its alternate form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub summary: String,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed feed XML: {0}")]
    Malformed(String),
}

/// The two supported feed dialects. RSS `<item>` records are the primary
/// dialect; Atom `<entry>` records are used only when the document contains
/// no items at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Rss,
    Atom,
}

/// Which entry field the cursor is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    Summary,
}

/// Collects raw field candidates for one entry; the fallback chains are
/// applied in [`EntryBuilder::finish`] so each chain stays explicit:
///
/// - title:   `<title>` text, else `"No title"`
/// - link:    `<link>` text, else `<link href="...">` attribute, else `""`
/// - summary: `<description>` text, else `<summary>` text, else `""`
#[derive(Debug, Default)]
struct EntryBuilder {
    title: Option<String>,
    link_text: Option<String>,
    link_href: Option<String>,
    description: Option<String>,
    summary: Option<String>,
}

impl EntryBuilder {
    fn append(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link_text,
            Field::Description => &mut self.description,
            Field::Summary => &mut self.summary,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn set_link_href(&mut self, href: String) {
        // First alternate-form link wins; the direct text form still takes
        // precedence in finish()
        if self.link_href.is_none() && !href.trim().is_empty() {
            self.link_href = Some(href);
        }
    }

    fn finish(self) -> Entry {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "No title".to_string());
        let link = self
            .link_text
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .or(self.link_href)
            .unwrap_or_default();
        let summary = self.description.or(self.summary).unwrap_or_default();
        Entry {
            title,
            link,
            summary,
        }
    }
}

/// Parse a feed document into at most `limit` entries, in document order.
///
/// Element names are matched by local name, so the Atom namespace (prefixed
/// or default) is transparent. RSS `<item>` records take precedence: Atom
/// `<entry>` records are only returned when the document yields no items.
///
/// # Errors
///
/// [`ParseError::Malformed`] when the bytes are not well-formed XML. An
/// empty or entry-less document is not an error; it parses to zero entries.
pub fn parse_feed(bytes: &[u8], limit: usize) -> Result<Vec<Entry>, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut items: Vec<Entry> = Vec::new();
    let mut entries: Vec<Entry> = Vec::new();
    let mut current: Option<(Dialect, EntryBuilder)> = None;
    let mut field: Option<Field> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| ParseError::Malformed(e.to_string()))?
        {
            Event::Start(e) => match e.local_name().as_ref() {
                b"item" if current.is_none() => {
                    current = Some((Dialect::Rss, EntryBuilder::default()));
                }
                b"entry" if current.is_none() => {
                    current = Some((Dialect::Atom, EntryBuilder::default()));
                }
                name => {
                    if let Some((_, builder)) = current.as_mut() {
                        field = match name {
                            b"title" => Some(Field::Title),
                            b"link" => {
                                capture_link_href(&e, builder);
                                Some(Field::Link)
                            }
                            b"description" => Some(Field::Description),
                            b"summary" => Some(Field::Summary),
                            _ => None,
                        };
                    }
                }
            },
            Event::Empty(e) => {
                // Atom's <link href="..."/> form arrives as an empty element
                if let Some((_, builder)) = current.as_mut() {
                    if e.local_name().as_ref() == b"link" {
                        capture_link_href(&e, builder);
                    }
                }
            }
            Event::Text(e) => {
                if let (Some((_, builder)), Some(f)) = (current.as_mut(), field) {
                    let text = e
                        .unescape()
                        .map_err(|e| ParseError::Malformed(e.to_string()))?;
                    builder.append(f, &text);
                }
            }
            Event::CData(e) => {
                if let (Some((_, builder)), Some(f)) = (current.as_mut(), field) {
                    builder.append(f, &String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"item" | b"entry" => {
                    if let Some((dialect, builder)) = current.take() {
                        match dialect {
                            Dialect::Rss => items.push(builder.finish()),
                            Dialect::Atom => entries.push(builder.finish()),
                        }
                        field = None;
                    }
                }
                _ => field = None,
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let records = if !items.is_empty() { items } else { entries };
    Ok(records.into_iter().take(limit).collect())
}

fn capture_link_href(e: &BytesStart<'_>, builder: &mut EntryBuilder) {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"href" {
            if let Ok(value) = attr.unescape_value() {
                builder.set_link_href(value.into_owned());
            }
        }
    }
}
