//! Markup tree nodes

use super::error::MarkupError;
use super::escape::{escape_text, sanitize_comment, verbatim_segments};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Write;

/// A named node with optional text, attributes and ordered children
///
/// Nodes carry no domain knowledge. Children and attributes keep insertion
/// order, which legacy readers rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupNode {
    name: String,
    text: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
    is_comment: bool,
    verbatim: bool,
}

impl MarkupNode {
    /// Creates an empty node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a node holding escaped text
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Creates a node whose text is written as a verbatim block
    pub fn verbatim(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            verbatim: true,
            ..Self::default()
        }
    }

    /// Appends an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Marks the node as a comment; it is written out but ignored by readers
    pub fn into_comment(mut self) -> Self {
        self.is_comment = true;
        self
    }

    /// Appends a child node
    pub fn add_child(&mut self, child: MarkupNode) {
        self.children.push(child);
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw, unescaped text content
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Children in insertion order
    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&MarkupNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Whether the node is written as a comment
    pub fn is_comment(&self) -> bool {
        self.is_comment
    }

    /// Whether the text is written as a verbatim block
    pub fn is_verbatim(&self) -> bool {
        self.verbatim
    }

    /// Serializes the node and its subtree
    ///
    /// # Errors
    ///
    /// Returns an error if the writer rejects an event
    pub fn to_text(&self) -> Result<String, MarkupError> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), MarkupError> {
        if self.is_comment {
            // Comments hold the element's own serialization, with `--` broken up
            let mut inner = Writer::new(Vec::new());
            self.write_element(&mut inner)?;
            let inner = String::from_utf8(inner.into_inner())?;
            let content = format!(" {} ", sanitize_comment(&inner));
            writer.write_event(Event::Comment(BytesText::from_escaped(content)))?;
            return Ok(());
        }
        self.write_element(writer)
    }

    fn write_element<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), MarkupError> {
        let attributes = self.attributes.iter().map(|(key, value)| Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_text(value).into_bytes()),
        });
        let start = BytesStart::new(self.name.as_str()).with_attributes(attributes);
        writer.write_event(Event::Start(start))?;

        if let Some(text) = &self.text {
            if self.verbatim {
                for segment in verbatim_segments(text) {
                    writer.write_event(Event::CData(BytesCData::new(segment)))?;
                }
            } else if !text.is_empty() {
                writer.write_event(Event::Text(BytesText::from_escaped(escape_text(text))))?;
            }
        }

        for child in &self.children {
            child.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_node() {
        assert_eq!(MarkupNode::new("anime").to_text().unwrap(), "<anime></anime>");
    }

    #[test]
    fn test_text_is_escaped() {
        let node = MarkupNode::text("my_status", "On-Hold & <more>");
        assert_eq!(
            node.to_text().unwrap(),
            "<my_status>On-Hold &amp; &lt;more&gt;</my_status>"
        );
    }

    #[test]
    fn test_verbatim_is_not_escaped() {
        let node = MarkupNode::verbatim("series_title", "Tom & Jerry");
        assert_eq!(
            node.to_text().unwrap(),
            "<series_title><![CDATA[Tom & Jerry]]></series_title>"
        );
    }

    #[test]
    fn test_attributes_keep_order_and_are_escaped() {
        let node = MarkupNode::new("entry")
            .with_attribute("b", "1")
            .with_attribute("a", "x\"y\n");
        assert_eq!(
            node.to_text().unwrap(),
            "<entry b=\"1\" a=\"x&quot;y&#10;\"></entry>"
        );
        assert_eq!(node.attributes()[0].0, "b");
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut parent = MarkupNode::new("anime");
        parent.add_child(MarkupNode::text("z", "1"));
        parent.add_child(MarkupNode::text("a", "2"));
        parent.add_child(MarkupNode::text("m", "3"));

        let names: Vec<&str> = parent.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(parent.to_text().unwrap(), "<anime><z>1</z><a>2</a><m>3</m></anime>");
        assert_eq!(parent.child("a").and_then(|c| c.text_content()), Some("2"));
    }

    #[test]
    fn test_comment_node() {
        let mut node = MarkupNode::new("anime");
        node.add_child(MarkupNode::verbatim("series_title", "Bleach -- TYBW"));
        let node = node.into_comment();

        assert!(node.is_comment());
        assert_eq!(
            node.to_text().unwrap(),
            "<!-- <anime><series_title><![CDATA[Bleach - - TYBW]]></series_title></anime> -->"
        );
    }

    #[test]
    fn test_verbatim_terminator_is_split_across_sections() {
        let node = MarkupNode::verbatim("my_comments", "see [[a]]> here");
        assert_eq!(
            node.to_text().unwrap(),
            "<my_comments><![CDATA[see [[a]]]]><![CDATA[> here]]></my_comments>"
        );
    }

    #[test]
    fn test_empty_verbatim_keeps_cdata() {
        let node = MarkupNode::verbatim("my_tags", "");
        assert_eq!(node.to_text().unwrap(), "<my_tags><![CDATA[]]></my_tags>");
    }
}
