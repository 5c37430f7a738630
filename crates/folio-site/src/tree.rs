//! Structural document tree.

use folio_highlight::Language;

/// A node of a document body.
///
/// `Heading` and `CodeBlock` are the node kinds the layout composer acts on;
/// every other element is carried as a generic [`Node::Element`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Generic element with attributes in source order.
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<Node>,
    },
    /// Text content; escaped on output.
    Text(String),
    /// Markup passed through unchanged (author-written inline HTML).
    Raw(String),
    Heading {
        level: u8,
        id: String,
        children: Vec<Node>,
    },
    /// Code listing awaiting highlighting.
    CodeBlock {
        source: String,
        language: Option<String>,
    },
    /// Highlighted code listing.
    Highlighted {
        /// Tag as written by the author.
        language: Option<String>,
        /// Grammar the listing was lexed with.
        grammar: Language,
        /// Escaped span markup.
        markup: String,
    },
    /// Publication date element.
    Time {
        /// Machine-readable date (`YYYY-MM-DD`).
        datetime: String,
        label: String,
    },
}

impl Node {
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children,
        }
    }

    pub fn element_with_attrs(
        tag: impl Into<String>,
        attrs: Vec<(String, String)>,
        children: Vec<Node>,
    ) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs,
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Child nodes, if this node kind has any.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element { children, .. } | Self::Heading { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::CodeBlock { source, .. } => out.push_str(source),
            Self::Time { label, .. } => out.push_str(label),
            Self::Element { children, .. } | Self::Heading { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Self::Raw(_) | Self::Highlighted { .. } => {}
        }
    }
}
