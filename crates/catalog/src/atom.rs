// ABOUTME: Event-driven decoder for the Atom top-chart feed into the typed Feed model.
// ABOUTME: Resolves store-namespaced attributes (im:id, im:bundleId) and fails on ill-formed XML.

use quick_xml::escape::{resolve_xml_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::DecodeError;
use crate::models::{Artist, Category, ContentType, Entry, Feed, Image, Link};

/// Namespace of the store-specific elements and attributes.
pub const STORE_NAMESPACE: &str = "http://itunes.apple.com/rss";

/// Decodes a top-chart feed body.
///
/// Entries and their repeated children (links, categories, artists, images)
/// keep document order. Elements the model does not know about are skipped.
pub fn decode_feed(data: &[u8]) -> Result<Feed, DecodeError> {
    let mut reader = NsReader::from_reader(data);
    let mut buf = Vec::new();

    let mut builder = FeedBuilder::default();
    let mut path: Vec<String> = Vec::new();
    // One character-data buffer per open element; child elements never
    // clear or contribute to their parent's text.
    let mut texts: Vec<String> = Vec::new();
    let mut seen_root = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| DecodeError::xml(reader.error_position(), e))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

                if path.is_empty() {
                    if name != "feed" {
                        return Err(DecodeError::UnexpectedRoot(name));
                    }
                    seen_root = true;
                }

                let attrs = collect_attributes(&reader, e)?;
                let parent: Vec<&str> = path.iter().map(String::as_str).collect();
                builder.start(&parent, &name, &attrs)?;

                path.push(name);
                texts.push(String::new());

                if is_empty {
                    let current: Vec<&str> = path.iter().map(String::as_str).collect();
                    builder.end(&current, String::new());
                    path.pop();
                    texts.pop();
                }
            }
            Event::End(_) => {
                let text = texts.pop().unwrap_or_default();
                let current: Vec<&str> = path.iter().map(String::as_str).collect();
                builder.end(&current, text.trim().to_string());
                path.pop();
            }
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| DecodeError::xml(reader.buffer_position(), err))?;
                if let Some(text) = texts.last_mut() {
                    text.push_str(&decoded);
                }
            }
            Event::CData(e) => {
                if let Some(text) = texts.last_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::GeneralRef(e) => {
                let position = reader.buffer_position();
                let resolved = if let Some(ch) = e
                    .resolve_char_ref()
                    .map_err(|err| DecodeError::xml(position, err))?
                {
                    ch.to_string()
                } else {
                    let entity = e.decode().map_err(|err| DecodeError::xml(position, err))?;
                    match resolve_xml_entity(&entity) {
                        Some(resolved) => resolved.to_string(),
                        None => {
                            return Err(DecodeError::xml(
                                position,
                                format!("unknown entity &{};", entity),
                            ))
                        }
                    }
                };
                if let Some(text) = texts.last_mut() {
                    text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();

        // Anything after the root element closes is not part of the feed.
        if seen_root && path.is_empty() {
            break;
        }
    }

    if let Some(open) = path.last() {
        return Err(DecodeError::xml(
            reader.buffer_position(),
            format!("unexpected end of document inside <{}>", open),
        ));
    }
    if !seen_root {
        return Err(DecodeError::Empty);
    }

    Ok(builder.feed)
}

/// An attribute with its local name and whether it is bound to [`STORE_NAMESPACE`].
struct Attr {
    store: bool,
    name: String,
    value: String,
}

fn collect_attributes(reader: &NsReader<&[u8]>, e: &BytesStart) -> Result<Vec<Attr>, DecodeError> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DecodeError::xml(reader.buffer_position(), err))?;
        let (ns, local) = reader.resolve_attribute(attr.key);
        let store = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == STORE_NAMESPACE.as_bytes());
        let raw = String::from_utf8_lossy(&attr.value).to_string();
        let value = unescape(&raw)
            .map_err(|err| DecodeError::xml(reader.buffer_position(), err))?
            .into_owned();
        attrs.push(Attr {
            store,
            name: String::from_utf8_lossy(local.as_ref()).to_string(),
            value,
        });
    }
    Ok(attrs)
}

/// Value of an unqualified attribute, or empty.
fn plain(attrs: &[Attr], name: &str) -> String {
    attrs
        .iter()
        .find(|a| !a.store && a.name == name)
        .map(|a| a.value.clone())
        .unwrap_or_default()
}

/// Value of a store-namespaced attribute, or empty.
fn store(attrs: &[Attr], name: &str) -> String {
    attrs
        .iter()
        .find(|a| a.store && a.name == name)
        .map(|a| a.value.clone())
        .unwrap_or_default()
}

fn link_from(attrs: &[Attr]) -> Link {
    Link {
        rel: plain(attrs, "rel"),
        media_type: plain(attrs, "type"),
        href: plain(attrs, "href"),
    }
}

#[derive(Default)]
struct FeedBuilder {
    feed: Feed,
    entry: Option<Entry>,
}

impl FeedBuilder {
    /// Handles an opening tag. `parent` is the path of enclosing elements.
    fn start(&mut self, parent: &[&str], name: &str, attrs: &[Attr]) -> Result<(), DecodeError> {
        match (parent, name) {
            (["feed"], "link") => self.feed.links.push(link_from(attrs)),
            (["feed"], "entry") => self.entry = Some(Entry::default()),
            (["feed", "entry"], _) => {
                let Some(entry) = self.entry.as_mut() else {
                    return Ok(());
                };
                match name {
                    "id" => {
                        entry.id.id = store(attrs, "id");
                        entry.id.bundle_id = store(attrs, "bundleId");
                    }
                    "link" => entry.links.push(link_from(attrs)),
                    "contentType" => {
                        entry.content_type = ContentType {
                            term: plain(attrs, "term"),
                            label: plain(attrs, "label"),
                        }
                    }
                    "category" => entry.categories.push(Category {
                        id: store(attrs, "id"),
                        term: plain(attrs, "term"),
                        scheme: plain(attrs, "scheme"),
                        label: plain(attrs, "label"),
                    }),
                    "artist" => entry.artists.push(Artist {
                        name: String::new(),
                        href: plain(attrs, "href"),
                    }),
                    "price" => {
                        entry.price.amount = plain(attrs, "amount");
                        entry.price.currency = plain(attrs, "currency");
                    }
                    "image" => {
                        let raw = plain(attrs, "height");
                        let height = if raw.is_empty() {
                            0
                        } else {
                            raw.parse::<u16>().map_err(|_| DecodeError::InvalidAttribute {
                                attribute: "height".to_string(),
                                value: raw.clone(),
                            })?
                        };
                        entry.images.push(Image {
                            url: String::new(),
                            height,
                        });
                    }
                    "releaseDate" => entry.release_date.label = plain(attrs, "label"),
                    "content" => entry.content.kind = plain(attrs, "type"),
                    _ => {}
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handles a closing tag. `path` includes the element being closed.
    fn end(&mut self, path: &[&str], text: String) {
        match path {
            ["feed", "id"] => self.feed.id = text,
            ["feed", "title"] => self.feed.title = text,
            ["feed", "updated"] => self.feed.updated = text,
            ["feed", "icon"] => self.feed.icon = text,
            ["feed", "rights"] => self.feed.rights = text,
            ["feed", "author", "name"] => self.feed.author.name = text,
            ["feed", "author", "uri"] => self.feed.author.uri = text,
            ["feed", "entry"] => {
                if let Some(entry) = self.entry.take() {
                    self.feed.entries.push(entry);
                }
            }
            ["feed", "entry", field] => {
                let Some(entry) = self.entry.as_mut() else {
                    return;
                };
                match *field {
                    "updated" => entry.updated = text,
                    "id" => entry.id.url = text,
                    "title" => entry.title = text,
                    "summary" => entry.summary = text,
                    "name" => entry.name = text,
                    "rights" => entry.rights = text,
                    "price" => entry.price.display = text,
                    "releaseDate" => entry.release_date.date = text,
                    "content" => entry.content.body = text,
                    "artist" => {
                        if let Some(artist) = entry.artists.last_mut() {
                            artist.name = text;
                        }
                    }
                    "image" => {
                        if let Some(image) = entry.images.last_mut() {
                            image.url = text;
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
