//! ADF (Atlassian Document Format) document construction.
//!
//! Jira descriptions are tree-shaped rich-text documents: a `doc` root
//! holding content blocks (paragraphs, headings, lists, code blocks,
//! rules), where paragraphs hold text nodes and text nodes carry optional
//! marks (strong, em, link). The constructors here are pure and total;
//! every document they produce satisfies [`AdfDocument::is_valid`].

use serde::{Deserialize, Serialize};

/// Root node discriminator required by Jira.
pub const DOC_TYPE: &str = "doc";

/// ADF schema version accepted by the create-issue endpoint.
pub const DOC_VERSION: u32 = 1;

/// A complete ADF document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdfDocument {
    /// Root discriminator, always `"doc"` for documents built here.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Schema version, always `1` for documents built here.
    pub version: u32,
    /// Ordered content blocks.
    pub content: Vec<AdfNode>,
}

impl AdfDocument {
    /// Document with no content blocks.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_content(Vec::new())
    }

    /// Document wrapping the given content blocks.
    #[must_use]
    pub fn with_content(content: Vec<AdfNode>) -> Self {
        Self {
            doc_type: DOC_TYPE.to_string(),
            version: DOC_VERSION,
            content,
        }
    }

    /// Structural validity check used as the boundary contract before a
    /// document is handed to the submission layer. Documents built by
    /// this module always pass; deserialized ones may not.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.doc_type == DOC_TYPE && self.version == DOC_VERSION
    }
}

/// A content block inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfNode {
    Paragraph {
        content: Vec<TextNode>,
    },
    Heading {
        attrs: HeadingAttrs,
        content: Vec<TextNode>,
    },
    BulletList {
        content: Vec<ListItem>,
    },
    OrderedList {
        content: Vec<ListItem>,
    },
    CodeBlock {
        #[serde(skip_serializing_if = "Option::is_none")]
        attrs: Option<CodeBlockAttrs>,
        content: Vec<TextNode>,
    },
    Rule,
}

impl AdfNode {
    /// Paragraph wrapping a single plain text node.
    #[must_use]
    pub fn paragraph_text(text: impl Into<String>) -> Self {
        Self::Paragraph {
            content: vec![TextNode::plain(text)],
        }
    }
}

/// Heading level attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    /// Heading level, 1 through 6.
    pub level: u8,
}

/// Code block language attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    pub language: String,
}

/// A list item wrapping one paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub content: Vec<AdfNode>,
}

impl ListItem {
    /// List item wrapping one paragraph of plain text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            item_type: "listItem".to_string(),
            content: vec![AdfNode::paragraph_text(text)],
        }
    }
}

/// A text leaf, optionally annotated with marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub text: String,
    /// Additive annotations; an empty list is omitted from the wire form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl TextNode {
    /// Unmarked text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::marked(text, Vec::new())
    }

    /// Text carrying the given marks.
    #[must_use]
    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            node_type: "text".to_string(),
            text: text.into(),
            marks,
        }
    }
}

/// A text annotation. Marks are additive, not mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Link { attrs: LinkAttrs },
}

impl Mark {
    /// Link mark pointing at `href`.
    #[must_use]
    pub fn link(href: impl Into<String>) -> Self {
        Self::Link {
            attrs: LinkAttrs { href: href.into() },
        }
    }
}

/// Link target attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

/// Render plain text as one paragraph per non-empty line.
///
/// Lines that are empty after trimming are dropped. Empty input yields a
/// document with no content. Input with non-whitespace form that still
/// filters down to zero lines is wrapped whole in a single paragraph so
/// that no text is silently dropped into an empty document.
#[must_use]
pub fn from_plain_text(text: &str) -> AdfDocument {
    if text.is_empty() {
        return AdfDocument::empty();
    }

    let paragraphs: Vec<AdfNode> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(AdfNode::paragraph_text)
        .collect();

    if paragraphs.is_empty() && !text.trim().is_empty() {
        return AdfDocument::with_content(vec![AdfNode::paragraph_text(text)]);
    }

    AdfDocument::with_content(paragraphs)
}

/// Wrap pre-marked text nodes into a single paragraph. Marks pass
/// through unmodified.
#[must_use]
pub fn from_formatted_nodes(nodes: Vec<TextNode>) -> AdfDocument {
    AdfDocument::with_content(vec![AdfNode::Paragraph { content: nodes }])
}

/// Render string items as a bullet or ordered list, one item per string.
/// Empty input yields an empty document.
#[must_use]
pub fn from_list(items: &[String], ordered: bool) -> AdfDocument {
    if items.is_empty() {
        return AdfDocument::empty();
    }

    let content = items.iter().map(ListItem::text).collect();
    let list = if ordered {
        AdfNode::OrderedList { content }
    } else {
        AdfNode::BulletList { content }
    };

    AdfDocument::with_content(vec![list])
}

/// Render a heading, clamping the level into `[1, 6]`. A trailing
/// paragraph is appended only when `content` is non-empty.
#[must_use]
pub fn from_heading(heading_text: &str, level: u8, content: &str) -> AdfDocument {
    let mut blocks = vec![AdfNode::Heading {
        attrs: HeadingAttrs {
            level: level.clamp(1, 6),
        },
        content: vec![TextNode::plain(heading_text)],
    }];

    if !content.is_empty() {
        blocks.push(AdfNode::paragraph_text(content));
    }

    AdfDocument::with_content(blocks)
}

/// Render a code block. The language attribute is present only when
/// supplied and non-empty.
#[must_use]
pub fn from_code_block(code: &str, language: Option<&str>) -> AdfDocument {
    let attrs = language
        .filter(|lang| !lang.is_empty())
        .map(|lang| CodeBlockAttrs {
            language: lang.to_string(),
        });

    AdfDocument::with_content(vec![AdfNode::CodeBlock {
        attrs,
        content: vec![TextNode::plain(code)],
    }])
}

/// Concatenate already-built content blocks into one document, dropping
/// absent entries.
#[must_use]
pub fn combine(blocks: Vec<Option<AdfNode>>) -> AdfDocument {
    AdfDocument::with_content(blocks.into_iter().flatten().collect())
}
