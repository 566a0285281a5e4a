//! Namespace-resolved element tree over `quick_xml::NsReader`.
//!
//! Elements are stored in document order. Each node records the index one
//! past its last descendant, so the subtree of node `i` is `i + 1..end`.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::core::FaturaError;

/// A parsed XML document.
#[derive(Debug, Default)]
pub struct XmlDocument {
    nodes: Vec<Node>,
}

#[derive(Debug)]
struct Node {
    namespace: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<usize>,
    end: usize,
}

fn xml_err(e: impl std::fmt::Display) -> FaturaError {
    FaturaError::Xml(e.to_string())
}

fn utf8(bytes: &[u8]) -> Result<&str, FaturaError> {
    std::str::from_utf8(bytes).map_err(|e| FaturaError::Xml(format!("invalid UTF-8: {e}")))
}

impl XmlDocument {
    /// Parse `xml` into a tree. Any syntax error, unbalanced tag or text
    /// outside the root element fails the whole document.
    pub fn parse(xml: &str) -> Result<Self, FaturaError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut nodes: Vec<Node> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        loop {
            let (ns, event) = match reader.read_resolved_event() {
                Ok(pair) => pair,
                Err(e) => return Err(FaturaError::Xml(format!("XML parse error: {e}"))),
            };
            match event {
                Event::Start(ref e) => {
                    let index = push_element(&mut nodes, &ns, e, open.last().copied())?;
                    open.push(index);
                }
                Event::Empty(ref e) => {
                    let index = push_element(&mut nodes, &ns, e, open.last().copied())?;
                    nodes[index].end = index + 1;
                }
                Event::End(_) => {
                    if let Some(index) = open.pop() {
                        nodes[index].end = nodes.len();
                    }
                }
                Event::Text(ref e) => {
                    let text = e.unescape().map_err(xml_err)?;
                    append_text(&mut nodes, &open, &text)?;
                }
                Event::CData(ref e) => {
                    let text = utf8(e)?;
                    append_text(&mut nodes, &open, text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(&index) = open.last() {
            return Err(FaturaError::Xml(format!(
                "unexpected end of document inside <{}>",
                nodes[index].name
            )));
        }
        if nodes.is_empty() {
            return Err(FaturaError::Xml("document has no root element".into()));
        }
        Ok(Self { nodes })
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        (0..self.nodes.len()).map(move |index| Element { doc: self, index })
    }

    /// The first top-level element.
    pub fn root(&self) -> Option<Element<'_>> {
        self.elements().next()
    }

    /// All elements named `{ns}name`, including the root, in document order.
    pub fn descendants<'q>(&self, ns: &'q str, name: &'q str) -> impl Iterator<Item = Element<'_>> {
        self.elements().filter(move |e| e.is(ns, name))
    }

    /// Number of elements in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a successfully parsed document.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn push_element(
    nodes: &mut Vec<Node>,
    ns: &ResolveResult<'_>,
    start: &BytesStart<'_>,
    parent: Option<usize>,
) -> Result<usize, FaturaError> {
    let namespace = match ns {
        ResolveResult::Bound(ns) => Some(utf8(ns.as_ref())?.to_string()),
        _ => None,
    };
    let name = utf8(start.local_name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();
        attributes.push((key, value));
    }

    let index = nodes.len();
    nodes.push(Node {
        namespace,
        name,
        attributes,
        text: String::new(),
        parent,
        end: index + 1,
    });
    Ok(index)
}

fn append_text(nodes: &mut [Node], open: &[usize], text: &str) -> Result<(), FaturaError> {
    match open.last() {
        Some(&index) => {
            nodes[index].text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(FaturaError::Xml("text outside of the root element".into())),
    }
}

/// A borrowed element of an [`XmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    doc: &'a XmlDocument,
    index: usize,
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.index == other.index
    }
}

impl Eq for Element<'_> {}

impl<'a> Element<'a> {
    fn node(self) -> &'a Node {
        &self.doc.nodes[self.index]
    }

    fn at(self, index: usize) -> Element<'a> {
        Element {
            doc: self.doc,
            index,
        }
    }

    /// Resolved namespace URI, if the element is in one.
    pub fn namespace(self) -> Option<&'a str> {
        self.node().namespace.as_deref()
    }

    /// Local name without prefix.
    pub fn name(self) -> &'a str {
        &self.node().name
    }

    /// Whether this element is `{ns}name`.
    pub fn is(self, ns: &str, name: &str) -> bool {
        self.name() == name && self.namespace() == Some(ns)
    }

    /// Direct text content.
    pub fn text(self) -> &'a str {
        &self.node().text
    }

    /// Value of the attribute with local name `name`.
    pub fn attribute(self, name: &str) -> Option<&'a str> {
        self.node()
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Enclosing element, `None` for the root.
    pub fn parent(self) -> Option<Element<'a>> {
        self.node().parent.map(|index| self.at(index))
    }

    /// Nearest enclosing `{ns}name`, excluding this element.
    pub fn ancestor(self, ns: &str, name: &str) -> Option<Element<'a>> {
        let mut current = self.parent();
        while let Some(e) = current {
            if e.is(ns, name) {
                return Some(e);
            }
            current = e.parent();
        }
        None
    }

    /// Every element below this one, in document order.
    pub fn subtree(self) -> impl Iterator<Item = Element<'a>> {
        (self.index + 1..self.node().end).map(move |index| self.at(index))
    }

    /// Direct children named `{ns}name`.
    pub fn children<'q>(self, ns: &'q str, name: &'q str) -> impl Iterator<Item = Element<'a>> {
        self.subtree()
            .filter(move |e| e.node().parent == Some(self.index) && e.is(ns, name))
    }

    /// First direct child named `{ns}name`.
    pub fn child(self, ns: &str, name: &str) -> Option<Element<'a>> {
        self.children(ns, name).next()
    }

    /// Descendants named `{ns}name`, in document order.
    pub fn descendants<'q>(self, ns: &'q str, name: &'q str) -> impl Iterator<Item = Element<'a>> {
        self.subtree().filter(move |e| e.is(ns, name))
    }

    /// First descendant named `{ns}name`.
    pub fn descendant(self, ns: &str, name: &str) -> Option<Element<'a>> {
        self.descendants(ns, name).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "urn:a";
    const B: &str = "urn:b";

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<r:Root xmlns:r="urn:a" xmlns:x="urn:b">
  <x:Item code="1">first</x:Item>
  <r:Group>
    <x:Item code="2">second &amp; more</x:Item>
    <x:Empty unit="C62"/>
  </r:Group>
  <Item>no namespace</Item>
  <x:Note><![CDATA[<raw>]]></x:Note>
</r:Root>"#;

    #[test]
    fn resolves_namespaces_and_text() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        let root = doc.root().unwrap();
        assert!(root.is(A, "Root"));
        let items: Vec<_> = root.descendants(B, "Item").map(|e| e.text()).collect();
        assert_eq!(items, vec!["first", "second & more"]);
        assert_eq!(root.child(B, "Note").unwrap().text(), "<raw>");
        let plain = root.children("", "Item").count();
        assert_eq!(plain, 0, "unprefixed element has no namespace");
    }

    #[test]
    fn child_only_matches_direct_children() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.children(B, "Item").count(), 1);
        let group = root.child(A, "Group").unwrap();
        assert_eq!(group.child(B, "Item").unwrap().attribute("code"), Some("2"));
        let empty = group.child(B, "Empty").unwrap();
        assert_eq!(empty.attribute("unit"), Some("C62"));
        assert_eq!(empty.subtree().count(), 0);
        assert_eq!(empty.ancestor(A, "Root"), Some(root));
    }

    #[test]
    fn prefixes_do_not_matter() {
        let doc = XmlDocument::parse(r#"<Root xmlns="urn:a"><q:Item xmlns:q="urn:b">v</q:Item></Root>"#)
            .unwrap();
        let root = doc.root().unwrap();
        assert!(root.is(A, "Root"));
        assert_eq!(root.descendant(B, "Item").unwrap().text(), "v");
    }

    #[test]
    fn skips_byte_order_mark() {
        let doc = XmlDocument::parse("\u{feff}<?xml version=\"1.0\"?><a xmlns=\"urn:a\">x</a>").unwrap();
        assert_eq!(doc.root().unwrap().text(), "x");
    }

    #[test]
    fn rejects_malformed_documents() {
        for bad in [
            "",
            "not xml at all",
            "<a><b></a>",
            "<a><b></b>",
            "<a attr=\"1></a>",
        ] {
            assert!(
                matches!(XmlDocument::parse(bad), Err(FaturaError::Xml(_))),
                "{bad:?} should fail"
            );
        }
    }
}
