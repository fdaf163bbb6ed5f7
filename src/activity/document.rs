//! Navigable XML document model backed by quick-xml.
//!
//! The activity code only ever needs to look up children, attributes and
//! text by name, so it works against the [`XmlNode`] trait rather than the
//! parser's event stream. Names are matched on their local part, which lets
//! `<ns3:TPX>` and `<TPX xmlns="...">` resolve the same way.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Read-only access to a node of a parsed document.
pub trait XmlNode {
    /// Local name of the element.
    fn name(&self) -> &str;

    /// Value of the attribute with the given local name.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text content directly inside this element.
    fn text(&self) -> &str;

    /// First child element with the given local name.
    fn child(&self, name: &str) -> Option<&Self>;

    /// All child elements with the given local name, in document order.
    fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a
    where
        Self: 'a;
}

/// Errors raised while reading or parsing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid XML at byte {position}: {message}")]
    InvalidXml { position: usize, message: String },

    #[error("Unclosed element <{0}> at end of document")]
    Unclosed(String),

    #[error("Document has more than one root element")]
    MultipleRoots,

    #[error("Document has no root element")]
    Empty,
}

/// An element with its attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start<B>(
        start: &BytesStart<'_>,
        position: usize,
        reader: &Reader<B>,
    ) -> Result<Self, DocumentError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| DocumentError::InvalidXml {
                position,
                message: format!("Bad attribute on <{}>: {}", name, e),
            })?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
            let value = attr
                .decode_and_unescape_value(reader)
                .map_err(|e| DocumentError::InvalidXml {
                    position,
                    message: format!("Failed to unescape attribute {}: {}", key, e),
                })?
                .to_string();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }
}

impl XmlNode for Element {
    fn name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a
    where
        Self: 'a,
    {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// A fully parsed document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Read and parse the file at `path`.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read(path)?;
        Self::parse_bytes(&content)
    }

    /// Parse a document from XML text.
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        Self::parse_bytes(content.as_bytes())
    }

    /// Parse a document from raw bytes.
    ///
    /// Text is decoded with the encoding named in the XML declaration
    /// (UTF-8 when absent). Bytes in comments and processing instructions
    /// are never decoded.
    pub fn parse_bytes(content: &[u8]) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_reader(content);
        reader.trim_text(true);

        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    open.push(Element::from_start(e, position, &reader)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = Element::from_start(e, position, &reader)?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    // quick-xml already rejects mismatched end tags
                    let element = open.pop().ok_or_else(|| DocumentError::InvalidXml {
                        position,
                        message: "Unexpected closing tag".to_string(),
                    })?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = open.last_mut() {
                        let text = e.unescape().map_err(|e| DocumentError::InvalidXml {
                            position,
                            message: format!("Failed to unescape text: {}", e),
                        })?;
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DocumentError::InvalidXml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    });
                }
                _ => {}
            }
        }

        if let Some(unclosed) = open.pop() {
            return Err(DocumentError::Unclosed(unclosed.name));
        }

        root.map(|root| Self { root }).ok_or(DocumentError::Empty)
    }

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DocumentError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(DocumentError::MultipleRoots);
    }
    *root = Some(element);
    Ok(())
}
