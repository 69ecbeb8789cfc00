use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use relnotes_core::{FeedDocument, FeedEntry};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed feed xml near byte {position}: {message}")]
    Xml { position: u64, message: String },
    #[error("expected an atom <feed> root, found <{0}>")]
    NotAtom(String),
    #[error("document has no root element")]
    Empty,
}

impl ParseError {
    fn xml(position: u64, err: impl std::fmt::Display) -> Self {
        ParseError::Xml {
            position,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    FeedUpdated,
    Title,
    Updated,
    Content,
}

#[derive(Debug, Default)]
struct EntryBuilder {
    title: String,
    updated: String,
    link: Option<String>,
    content: String,
}

impl EntryBuilder {
    fn build(self) -> FeedEntry {
        FeedEntry::new(
            self.title.trim(),
            self.updated.trim(),
            self.link.unwrap_or_default(),
            self.content.trim(),
        )
    }
}

/// Tracks where we are in the document and what has been collected so far.
#[derive(Debug, Default)]
struct FeedBuilder {
    stack: Vec<String>,
    feed_updated: Option<String>,
    feed_updated_done: bool,
    entry: Option<EntryBuilder>,
    entries: Vec<FeedEntry>,
}

impl FeedBuilder {
    fn open(&mut self, start: &BytesStart<'_>, position: u64) -> Result<(), ParseError> {
        let name = local_name(start);
        if self.stack.is_empty() && name != "feed" {
            return Err(ParseError::NotAtom(name));
        }
        if self.stack.len() == 1 && name == "entry" {
            self.entry = Some(EntryBuilder::default());
        }
        if name == "link" {
            self.take_link(start, position)?;
        }
        self.stack.push(name);
        Ok(())
    }

    fn open_empty(&mut self, start: &BytesStart<'_>, position: u64) -> Result<(), ParseError> {
        let name = local_name(start);
        if self.stack.is_empty() && name != "feed" {
            return Err(ParseError::NotAtom(name));
        }
        if name == "link" {
            self.take_link(start, position)?;
        }
        if self.stack.is_empty() {
            // `<feed/>`: a root with nothing in it.
            self.stack.push(name);
            self.close();
        }
        Ok(())
    }

    fn close(&mut self) {
        let Some(name) = self.stack.pop() else {
            return;
        };
        match (self.stack.len(), name.as_str()) {
            (1, "updated") => self.feed_updated_done = true,
            (1, "entry") => {
                if let Some(entry) = self.entry.take() {
                    self.entries.push(entry.build());
                }
            }
            _ => {}
        }
    }

    fn current_field(&self) -> Option<Field> {
        match self.stack.as_slice() {
            [_, updated] if updated == "updated" && !self.feed_updated_done => {
                Some(Field::FeedUpdated)
            }
            [_, entry, field, ..] if entry == "entry" => match field.as_str() {
                "title" => Some(Field::Title),
                "updated" => Some(Field::Updated),
                "content" => Some(Field::Content),
                _ => None,
            },
            _ => None,
        }
    }

    fn append(&mut self, text: &str) {
        let target = match (self.current_field(), self.entry.as_mut()) {
            (Some(Field::FeedUpdated), _) => self.feed_updated.get_or_insert_with(String::new),
            (Some(Field::Title), Some(entry)) => &mut entry.title,
            (Some(Field::Updated), Some(entry)) => &mut entry.updated,
            (Some(Field::Content), Some(entry)) => &mut entry.content,
            _ => return,
        };
        target.push_str(text);
    }

    /// Only the first `<link>` of an entry counts.
    fn take_link(&mut self, start: &BytesStart<'_>, position: u64) -> Result<(), ParseError> {
        let Some(entry) = self.entry.as_mut() else {
            return Ok(());
        };
        if self.stack.len() != 2 || entry.link.is_some() {
            return Ok(());
        }
        for attr in start.attributes() {
            let attr = attr.map_err(|err| ParseError::xml(position, err))?;
            if attr.key.local_name().as_ref() == b"href" {
                let value = attr
                    .unescape_value()
                    .map_err(|err| ParseError::xml(position, err))?;
                entry.link = Some(value.trim().to_string());
                break;
            }
        }
        Ok(())
    }

    fn finish(self, saw_root: bool) -> Result<FeedDocument, ParseError> {
        if !saw_root {
            return Err(ParseError::Empty);
        }
        let updated = self
            .feed_updated
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(FeedDocument::new(updated, self.entries))
    }
}

/// Parses an Atom document into the feed-level `<updated>` text and its
/// entries in document order.
///
/// Per entry: `<title>` becomes the date label, `<link href>` the link and
/// `<content>` (escaped text or CDATA) the raw HTML body. Missing children
/// become empty strings.
pub fn parse_feed(xml: &str) -> Result<FeedDocument, ParseError> {
    // Text is trimmed once per field when the entry is built, so whitespace
    // between adjacent text and CDATA events survives.
    let mut reader = Reader::from_str(xml);

    let mut builder = FeedBuilder::default();
    let mut saw_root = false;

    loop {
        let position = reader.buffer_position() as u64;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(ParseError::xml(position, err)),
        };
        match event {
            Event::Start(start) => {
                builder.open(&start, position)?;
                saw_root = true;
            }
            Event::Empty(start) => {
                builder.open_empty(&start, position)?;
                saw_root = true;
            }
            Event::End(_) => builder.close(),
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| ParseError::xml(position, err))?;
                builder.append(&value);
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                builder.append(&value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish(saw_root)
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}
