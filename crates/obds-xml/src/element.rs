//! A minimal owned element tree.
//!
//! Both document formats are small enough to be held in memory. Reading goes
//! through the tree so that a value can be looked up as attribute or child
//! element alike; writing builds a tree first so that empty elements can be
//! pruned before serialization.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Result, XmlError};

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
    /// Written even when it carries no content.
    pub keep_empty: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Trimmed text content, `None` when blank.
    pub fn text(&self) -> Option<String> {
        let text = self.text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// A value given either as attribute or as child element text. Blank
    /// values count as absent.
    pub fn value(&self, name: &str) -> Option<String> {
        self.attribute(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .or_else(|| self.child(name).and_then(Element::text))
    }

    /// Items of a `Menge_*` container. Items placed directly below `self`
    /// are accepted as well.
    pub fn items<'a>(&'a self, container: &str, item: &'a str) -> Vec<&'a Element> {
        let mut items: Vec<_> = self
            .child(container)
            .map(|container| container.children(item).collect())
            .unwrap_or_default();
        items.extend(self.children(item));
        items
    }

    /// Text values of a `Menge_*` container.
    pub fn item_values(&self, container: &str, item: &str) -> Vec<String> {
        self.items(container, item)
            .into_iter()
            .filter_map(Element::text)
            .collect()
    }

    // Builder methods used by the writer.

    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            self.attributes.push((name.to_string(), value.to_string()));
        }
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_leaf(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with_child(Element::new(name).with_text(value)),
            None => self,
        }
    }

    #[must_use]
    pub fn keep_empty(mut self) -> Self {
        self.keep_empty = true;
        self
    }

    fn has_content(&self) -> bool {
        !self.text.trim().is_empty() || !self.attributes.is_empty() || !self.children.is_empty()
    }

    /// Remove empty descendants. Returns `None` when `self` ends up empty.
    pub fn pruned(mut self) -> Option<Element> {
        self.children = self
            .children
            .into_iter()
            .filter_map(Element::pruned)
            .collect();
        (self.keep_empty || self.has_content()).then_some(self)
    }
}

fn resolve_entity(name: &str) -> Result<char> {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name
            .strip_prefix("#x")
            .map(|hex| u32::from_str_radix(hex, 16))
            .or_else(|| name.strip_prefix('#').map(str::parse::<u32>))
            .and_then(std::result::Result::ok)
            .and_then(char::from_u32),
    };
    resolved.ok_or_else(|| XmlError::UnknownEntity {
        name: name.to_string(),
    })
}

fn start_element(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(std::str::from_utf8(start.local_name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.local_name().as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Parse a document into its root element. A leading byte order mark is
/// ignored, namespace prefixes are dropped.
pub fn parse_element_tree(xml: &str) -> Result<Element> {
    let xml = xml.strip_prefix(BYTE_ORDER_MARK).unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        let finished = match reader.read_event()? {
            Event::Start(start) => {
                stack.push(start_element(&start)?);
                None
            }
            Event::Empty(start) => Some(start_element(&start)?),
            Event::End(_) => stack.pop(),
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(std::str::from_utf8(&text)?);
                }
                None
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(std::str::from_utf8(&data)?);
                }
                None
            }
            Event::GeneralRef(reference) => {
                let resolved = resolve_entity(std::str::from_utf8(&reference)?)?;
                if let Some(current) = stack.last_mut() {
                    current.text.push(resolved);
                }
                None
            }
            Event::Eof => break,
            _ => None,
        };

        if let Some(element) = finished {
            match stack.last_mut() {
                Some(parent) => parent.children.push(element),
                None if root.is_none() => root = Some(element),
                None => {}
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed { element: open.name });
    }
    root.ok_or(XmlError::MissingRoot)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// Serialize with XML declaration and two-space indentation.
pub fn write_element_tree(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    let bytes = writer.into_inner();
    Ok(std::str::from_utf8(&bytes)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_attributes_and_children_alike() {
        let root = parse_element_tree(
            r#"<Meldung Meldung_ID="M1"><Melder_ID> R1 </Melder_ID><Anmerkung/></Meldung>"#,
        )
        .expect("parsed");
        assert_eq!(root.value("Meldung_ID").as_deref(), Some("M1"));
        assert_eq!(root.value("Melder_ID").as_deref(), Some("R1"));
        assert_eq!(root.value("Anmerkung"), None);
        assert_eq!(root.value("Missing"), None);
    }

    #[test]
    fn resolves_entities() {
        let root = parse_element_tree("<a>A &amp; B &#65;&#x42;</a>").expect("parsed");
        assert_eq!(root.text().as_deref(), Some("A & B AB"));
    }

    #[test]
    fn strips_byte_order_mark() {
        let root = parse_element_tree("\u{feff}<?xml version=\"1.0\"?><a/>").expect("parsed");
        assert_eq!(root.name, "a");
    }

    #[test]
    fn rejects_broken_documents() {
        assert!(parse_element_tree("<a><b></a>").is_err());
        assert!(parse_element_tree("<a>").is_err());
        assert!(matches!(
            parse_element_tree("   "),
            Err(XmlError::MissingRoot)
        ));
    }

    #[test]
    fn collects_container_items() {
        let root = parse_element_tree(
            "<p><Menge_OPS><OP_OPS>5-601.0</OP_OPS><OP_OPS>8-137</OP_OPS></Menge_OPS></p>",
        )
        .expect("parsed");
        assert_eq!(
            root.item_values("Menge_OPS", "OP_OPS"),
            vec!["5-601.0".to_string(), "8-137".to_string()]
        );
    }

    #[test]
    fn pruning_drops_empty_elements() {
        let tree = Element::new("a")
            .with_child(Element::new("empty"))
            .with_child(Element::new("nested").with_child(Element::new("empty")))
            .with_child(Element::new("kept").keep_empty())
            .with_leaf("leaf", Some("x"));
        let pruned = tree.pruned().expect("root");
        let names: Vec<_> = pruned.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["kept", "leaf"]);
    }
}
