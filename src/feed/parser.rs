use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::model::{Feed, Item};

/// Errors that can occur while parsing an RSS document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not well-formed XML (bad syntax, mismatched tags,
    /// undecodable text, unknown entities).
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be parsed.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),

    /// The input contained no root element.
    #[error("document is empty: no root element found")]
    Empty,

    /// The root element is not `<rss>`.
    #[error("expected element type <rss> but have <{0}>")]
    UnexpectedRoot(String),

    /// The document ended while an element was still open.
    #[error("unexpected end of document: <{0}> is not closed")]
    Unclosed(String),
}

/// What an open element means to the document model.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    Rss,
    Channel,
    Item,
    /// A modeled scalar element; `name` is the key passed to `field_mut`.
    Field { name: String, in_item: bool },
    /// Anything the model does not capture (extensions, nested children).
    Other,
}

struct Open {
    frame: Frame,
    tag: String,
}

/// Parses an RSS 2.0 document into a [`Feed`].
///
/// Scalar fields take the concatenated character data and CDATA of their
/// element; text of nested children is not included. When an element
/// repeats, the last occurrence wins. Unprefixed elements are matched by
/// name; prefixed ones are ignored except `content:encoded` inside an item.
///
/// # Errors
///
/// Returns [`ParseError`] when the input is not well-formed, is empty, or
/// its root element is not `<rss>`. No partial feed is returned.
///
/// # Security
///
/// SEC-002: quick-xml (0.37) never expands `<!ENTITY>` declarations. Only the
/// five predefined XML entities and character references are resolved;
/// anything else surfaces as an unescape error.
pub fn parse(bytes: &[u8]) -> Result<Feed, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().check_end_names = true;

    let mut feed = Feed::default();
    let mut stack: Vec<Open> = Vec::new();
    let mut current_item: Option<Item> = None;
    let mut text = String::new();
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let frame = classify(&e, stack.last().map(|o| &o.frame))?;
                match &frame {
                    Frame::Rss => {
                        seen_root = true;
                        feed.version = read_version(&e, &reader)?;
                    }
                    Frame::Item => current_item = Some(read_item_attrs(&e, &reader)?),
                    Frame::Field { .. } => text.clear(),
                    _ => {}
                }
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(Open { frame, tag });
            }
            Event::Empty(e) => {
                let frame = classify(&e, stack.last().map(|o| &o.frame))?;
                match frame {
                    Frame::Rss => {
                        // <rss/>: nothing else can follow
                        feed.version = read_version(&e, &reader)?;
                        break;
                    }
                    Frame::Item => feed.items.push(read_item_attrs(&e, &reader)?),
                    Frame::Field { name, in_item } => {
                        assign(&mut feed, current_item.as_mut(), &name, in_item, String::new())
                    }
                    Frame::Channel | Frame::Other => {}
                }
            }
            Event::Text(e) => {
                if matches!(stack.last(), Some(Open { frame: Frame::Field { .. }, .. })) {
                    text.push_str(&e.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(e) => {
                if matches!(stack.last(), Some(Open { frame: Frame::Field { .. }, .. })) {
                    let raw = reader.decoder().decode(&e).map_err(quick_xml::Error::from)?;
                    text.push_str(&raw);
                }
            }
            Event::End(_) => {
                // check_end_names rejects end tags that do not match the open element
                match stack.pop().map(|open| open.frame) {
                    Some(Frame::Rss) => break,
                    Some(Frame::Item) => {
                        if let Some(item) = current_item.take() {
                            feed.items.push(item);
                        }
                    }
                    Some(Frame::Field { name, in_item }) => assign(
                        &mut feed,
                        current_item.as_mut(),
                        &name,
                        in_item,
                        std::mem::take(&mut text),
                    ),
                    _ => {}
                }
            }
            Event::Eof => {
                if let Some(open) = stack.last() {
                    return Err(ParseError::Unclosed(open.tag.clone()));
                }
                if !seen_root {
                    return Err(ParseError::Empty);
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(
        version = %feed.version,
        items = feed.items.len(),
        "Parsed RSS document"
    );
    Ok(feed)
}

/// Decides what a newly opened element means, given its parent.
fn classify(e: &BytesStart<'_>, parent: Option<&Frame>) -> Result<Frame, ParseError> {
    let qname = e.name();
    let local = String::from_utf8_lossy(qname.local_name().as_ref()).into_owned();
    let prefixed = qname.prefix().is_some();

    let Some(parent) = parent else {
        if local != "rss" {
            return Err(ParseError::UnexpectedRoot(
                String::from_utf8_lossy(qname.as_ref()).into_owned(),
            ));
        }
        return Ok(Frame::Rss);
    };

    let frame = match parent {
        Frame::Rss if !prefixed && local == "channel" => Frame::Channel,
        Frame::Channel if !prefixed && local == "item" => Frame::Item,
        Frame::Channel if !prefixed && is_channel_field(&local) => Frame::Field {
            name: local,
            in_item: false,
        },
        Frame::Item if (!prefixed || local == "encoded") && is_item_field(&local) => {
            Frame::Field {
                name: local,
                in_item: true,
            }
        }
        _ => Frame::Other,
    };
    Ok(frame)
}

fn is_channel_field(name: &str) -> bool {
    Feed::default().field_mut(name).is_some()
}

fn is_item_field(name: &str) -> bool {
    Item::default().field_mut(name).is_some()
}

fn assign(feed: &mut Feed, item: Option<&mut Item>, name: &str, in_item: bool, value: String) {
    let slot = if in_item {
        item.and_then(|item| item.field_mut(name))
    } else {
        feed.field_mut(name)
    };
    if let Some(slot) = slot {
        *slot = value;
    }
}

fn read_version(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<String, ParseError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"version" {
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(quick_xml::Error::from)?;
            return Ok(value.into_owned());
        }
    }
    Ok(String::new())
}

/// Starts a new item, capturing every attribute on the `<item>` tag.
fn read_item_attrs(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Item, ParseError> {
    let mut item = Item::default();
    let mut attributes = e.attributes();
    // Repeated names are resolved by CustomAttrs (last value wins)
    attributes.with_checks(false);
    for attr in attributes {
        let attr = attr?;
        let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(quick_xml::Error::from)?;
        item.other_attrs.insert(name, value);
    }
    Ok(item)
}
