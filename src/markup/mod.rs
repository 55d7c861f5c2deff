//! Minimal markup tree
//!
//! A format-agnostic tree of named nodes that serializes itself to an XML
//! document through `quick_xml::Writer`. It performs no validation; callers
//! decide what a well-formed tree means for their format.
//!
//! ```
//! use malxport::markup::{MarkupDocument, MarkupNode};
//!
//! let mut root = MarkupNode::new("myanimelist");
//! root.add_child(MarkupNode::verbatim("series_title", "Tom & Jerry"));
//!
//! let mut doc = MarkupDocument::new();
//! doc.add_child(root);
//! assert!(doc.to_text().unwrap().contains("<![CDATA[Tom & Jerry]]>"));
//! ```

pub mod document;
pub mod error;
pub mod escape;
pub mod node;

pub use document::MarkupDocument;
pub use error::MarkupError;
pub use node::MarkupNode;
