//! Markup documents

use super::error::MarkupError;
use super::node::MarkupNode;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

/// A complete markup document: declaration plus top-level nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    version: String,
    encoding: String,
    children: Vec<MarkupNode>,
}

impl Default for MarkupDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupDocument {
    /// Creates an empty XML 1.0, UTF-8 document
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: "UTF-8".to_string(),
            children: Vec::new(),
        }
    }

    /// Appends a top-level node
    pub fn add_child(&mut self, child: MarkupNode) {
        self.children.push(child);
    }

    /// Top-level nodes in insertion order
    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    /// Serializes the whole document, starting with the declaration line
    ///
    /// Output is compact: the only newline is the one after the declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer rejects an event
    pub fn to_text(&self) -> Result<String, MarkupError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new(
            &self.version,
            Some(self.encoding.as_str()),
            None,
        )))?;
        writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;

        for child in &self.children {
            child.write_to(&mut writer)?;
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_declaration_only() {
        let doc = MarkupDocument::new();
        assert_eq!(doc.to_text().unwrap(), "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    #[test]
    fn test_document_with_root() {
        let mut root = MarkupNode::new("myanimelist");
        root.add_child(MarkupNode::text("myinfo", ""));
        let mut doc = MarkupDocument::new();
        doc.add_child(root);

        assert_eq!(
            doc.to_text().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<myanimelist><myinfo></myinfo></myanimelist>"
        );
        assert_eq!(doc.children().len(), 1);
    }

    #[test]
    fn test_comment_child_in_document() {
        let mut root = MarkupNode::new("myanimelist");
        root.add_child(MarkupNode::text("kept", "1"));
        root.add_child(MarkupNode::text("skipped", "a & b").into_comment());
        let mut doc = MarkupDocument::new();
        doc.add_child(root);

        assert!(doc
            .to_text()
            .unwrap()
            .ends_with("<myanimelist><kept>1</kept><!-- <skipped>a &amp; b</skipped> --></myanimelist>"));
    }
}
