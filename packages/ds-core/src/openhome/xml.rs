//! Generic XML element tree for SOAP envelopes and embedded documents.
//!
//! OpenHome replies are irregular: a list with one entry looks exactly like a
//! scalar child, and a text field may or may not carry attributes. Instead of
//! probing for those cases at every use site, lookups go through two tagged
//! variants that classify the shape once:
//!
//! - [`Shape`] - a child name occurring zero, one or many times
//! - [`FieldValue`] - a text node with or without attributes
//!
//! Decoders only ever see the normalized result ([`Shape::into_vec`],
//! [`FieldValue::text`]).

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use thiserror::Error;

use super::utils::encode;

/// Errors raised while building an element tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The underlying reader rejected the document.
    #[error("malformed XML: {0}")]
    Syntax(String),

    /// The document ended before an element was closed.
    #[error("unclosed element <{0}>")]
    Unclosed(String),

    /// The document contains no element at all.
    #[error("document has no root element")]
    NoRoot,

    /// The root element is not the one the caller expected.
    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Element Tree
// ─────────────────────────────────────────────────────────────────────────────

/// One parsed XML element with its attributes, decoded text and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parses a document and returns its root element.
    ///
    /// Text content has entities decoded, so an embedded document carried as
    /// escaped text comes back as plain XML ready for a second parse.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);
        // Open elements paired with their raw (still escaped) text.
        let mut stack: Vec<(XmlElement, String)> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push((Self::from_start(e), String::new())),
                Ok(Event::Empty(ref e)) => attach(&mut stack, &mut root, Self::from_start(e))?,
                Ok(Event::End(_)) => {
                    let (mut element, raw) = stack
                        .pop()
                        .ok_or_else(|| XmlError::Syntax("unexpected closing tag".into()))?;
                    element.text = html_escape::decode_html_entities(&raw).into_owned();
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref t)) => {
                    let text = String::from_utf8_lossy(t);
                    match stack.last_mut() {
                        Some((_, raw)) => raw.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => return Err(outside_root("text")),
                    }
                }
                Ok(Event::CData(ref c)) => {
                    // CDATA is literal; escape it so the single decode at End restores it.
                    let (_, raw) = stack.last_mut().ok_or_else(|| outside_root("CDATA"))?;
                    raw.push_str(&encode(&String::from_utf8_lossy(c)));
                }
                Ok(Event::GeneralRef(ref r)) => {
                    let (_, raw) = stack.last_mut().ok_or_else(|| outside_root("entity reference"))?;
                    raw.push('&');
                    raw.push_str(&String::from_utf8_lossy(r));
                    raw.push(';');
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XmlError::Syntax(e.to_string())),
                _ => {}
            }
        }

        if let Some((open, _)) = stack.pop() {
            return Err(XmlError::Unclosed(open.name));
        }
        root.ok_or(XmlError::NoRoot)
    }

    /// Parses a document and checks the local name of its root element.
    pub fn parse_rooted(xml: &str, expected: &'static str) -> Result<Self, XmlError> {
        let root = Self::parse(xml)?;
        if root.local_name() != expected {
            return Err(XmlError::UnexpectedRoot {
                expected,
                found: root.name,
            });
        }
        Ok(root)
    }

    fn from_start(e: &BytesStart) -> Self {
        let attributes = e
            .attributes()
            .flatten()
            .map(|a| {
                let key = String::from_utf8_lossy(a.key.as_ref()).to_string();
                let raw = String::from_utf8_lossy(&a.value);
                (key, html_escape::decode_html_entities(&raw).into_owned())
            })
            .collect();

        Self {
            name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
            attributes,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Qualified element name, including any namespace prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Attributes in document order, values entity-decoded.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns an attribute value by qualified name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Decoded text content with surrounding whitespace removed.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Decoded text content exactly as it appeared, whitespace included.
    ///
    /// Used for opaque payloads (embedded metadata documents) that are handed
    /// back to the caller unchanged.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Returns the first child with the given local name.
    #[must_use]
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name() == local)
    }

    /// Returns the text of the first child with the given local name.
    #[must_use]
    pub fn child_text(&self, local: &str) -> Option<&str> {
        self.child(local).map(XmlElement::text)
    }

    /// Returns the untrimmed text of the first child with the given local name.
    #[must_use]
    pub fn child_raw_text(&self, local: &str) -> Option<&str> {
        self.child(local).map(XmlElement::raw_text)
    }

    /// Classifies how often a child occurs. See [`Shape`].
    #[must_use]
    pub fn shape(&self, local: &str) -> Shape<'_> {
        let mut matches: Vec<&XmlElement> =
            self.children.iter().filter(|c| c.local_name() == local).collect();
        match matches.len() {
            0 => Shape::Absent,
            1 => Shape::One(matches.remove(0)),
            _ => Shape::Many(matches),
        }
    }

    /// Classifies the first child with the given local name as a text field.
    #[must_use]
    pub fn field(&self, local: &str) -> Option<FieldValue<'_>> {
        self.shape(local).first().map(FieldValue::from_element)
    }

    /// Depth-first search for the first descendant with the given local name.
    #[must_use]
    pub fn descendant(&self, local: &str) -> Option<&XmlElement> {
        self.children.iter().find_map(|c| {
            if c.local_name() == local {
                Some(c)
            } else {
                c.descendant(local)
            }
        })
    }
}

fn attach(
    stack: &mut [(XmlElement, String)],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(element),
        None if root.is_some() => {
            return Err(XmlError::Syntax(format!(
                "multiple root elements (second is <{}>)",
                element.name
            )))
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn outside_root(what: &str) -> XmlError {
    XmlError::Syntax(format!("{what} outside the root element"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Shape Normalization
// ─────────────────────────────────────────────────────────────────────────────

/// How many times a child element occurs under its parent.
///
/// Devices collapse a one-entry list into a bare element, which is
/// indistinguishable from a scalar field until the occurrences are counted.
/// List decoders call [`Shape::into_vec`]; scalar decoders call
/// [`Shape::first`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<'a> {
    Absent,
    One(&'a XmlElement),
    Many(Vec<&'a XmlElement>),
}

impl<'a> Shape<'a> {
    /// Canonical ordered sequence: empty, one element, or all elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<&'a XmlElement> {
        match self {
            Self::Absent => Vec::new(),
            Self::One(element) => vec![element],
            Self::Many(elements) => elements,
        }
    }

    /// First occurrence, used where a repeated field means "pick the first".
    #[must_use]
    pub fn first(&self) -> Option<&'a XmlElement> {
        match self {
            Self::Absent => None,
            Self::One(element) => Some(*element),
            Self::Many(elements) => elements.first().copied(),
        }
    }

    /// Number of occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::One(_) => 1,
            Self::Many(elements) => elements.len(),
        }
    }

    /// True when the child does not occur at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// A text-bearing element, with or without attributes.
///
/// `<dc:title>X</dc:title>` and `<dc:title lang="en">X</dc:title>` both carry
/// the value `X`; [`FieldValue::text`] returns it for either shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Plain(&'a str),
    Attributed {
        attributes: &'a [(String, String)],
        text: &'a str,
    },
}

impl<'a> FieldValue<'a> {
    /// Classifies an element by whether it carries attributes.
    #[must_use]
    pub fn from_element(element: &'a XmlElement) -> Self {
        if element.attributes.is_empty() {
            Self::Plain(element.text())
        } else {
            Self::Attributed {
                attributes: &element.attributes,
                text: element.text(),
            }
        }
    }

    /// The trimmed text, whichever shape the field has.
    #[must_use]
    pub fn text(&self) -> &'a str {
        match self {
            Self::Plain(text) | Self::Attributed { text, .. } => *text,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SOAP Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// A parsed SOAP response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    root: XmlElement,
}

impl Envelope {
    /// Parses a SOAP response body.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        XmlElement::parse_rooted(xml, "Envelope").map(|root| Self { root })
    }

    /// The `Body` element, if present.
    #[must_use]
    pub fn body(&self) -> Option<&XmlElement> {
        self.root.child("Body")
    }

    /// The action response element inside the body (e.g. `TrackResponse`).
    #[must_use]
    pub fn response(&self, local: &str) -> Option<&XmlElement> {
        self.body().and_then(|body| body.child(local))
    }

    /// Describes the SOAP fault carried by the body, if any.
    ///
    /// Prefers the UPnP error code and description over the generic
    /// `faultstring` ("UPnPError") when the device provides them.
    #[must_use]
    pub fn fault(&self) -> Option<String> {
        let fault = self.body()?.child("Fault")?;

        if let Some(upnp) = fault.descendant("UPnPError") {
            let code = upnp.child_text("errorCode").unwrap_or_default();
            let description = upnp.child_text("errorDescription").unwrap_or_default();
            if !code.is_empty() || !description.is_empty() {
                return Some(format!("UPnPError {code}: {description}").trim().to_string());
            }
        }

        Some(
            fault
                .child_text("faultstring")
                .filter(|s| !s.is_empty())
                .unwrap_or("Unknown SOAP fault")
                .to_string(),
        )
    }
}
