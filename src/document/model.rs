/*!
 * Core document model types.
 *
 * A parsed document is an immutable tree of [`Node`] values over a closed
 * set of markdown node kinds. Every node carries a [`NodeId`] assigned at
 * parse time; the rewriter addresses nodes by that identity, never by
 * payload equality, so two text leaves with identical text stay distinct.
 */

/// Stable per-node identity, assigned in pre-order at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Column alignment for table nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlignment {
    /// No explicit alignment
    None,
    /// Left-aligned column
    Left,
    /// Center-aligned column
    Center,
    /// Right-aligned column
    Right,
}

/// One element of the parsed document tree.
///
/// Nodes are immutable values: every structural change produces a new
/// node, and untouched subtrees may be shared freely between snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    data: NodeData,
}

/// The closed, tagged set of node payloads.
///
/// Composite variants carry an ordered child list (never absent, may be
/// empty); leaf variants carry a terminal payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Document root
    Document(Vec<Node>),
    /// Heading with level 1-6
    Heading { level: u8, children: Vec<Node> },
    /// Paragraph of inline content
    Paragraph(Vec<Node>),
    /// Block quote
    BlockQuote(Vec<Node>),
    /// Ordered list with its starting index
    OrderedList { start: u64, children: Vec<Node> },
    /// Unordered list
    UnorderedList(Vec<Node>),
    /// One list item
    ListItem(Vec<Node>),
    /// Table with per-column alignments; children are the head then rows
    Table {
        alignments: Vec<ColumnAlignment>,
        children: Vec<Node>,
    },
    /// Table header row
    TableHead(Vec<Node>),
    /// Table body row
    TableRow(Vec<Node>),
    /// Table cell
    TableCell(Vec<Node>),
    /// Footnote definition block
    FootnoteDefinition { label: String, children: Vec<Node> },
    /// Hyperlink with destination URL and inline children
    Link {
        destination: String,
        title: String,
        children: Vec<Node>,
    },
    /// Image with source URL and alt-text children
    Image {
        destination: String,
        title: String,
        children: Vec<Node>,
    },
    /// Emphasized inline span
    Emphasis(Vec<Node>),
    /// Strong inline span
    Strong(Vec<Node>),
    /// Struck-through inline span
    Strikethrough(Vec<Node>),
    /// Plain prose text
    Text(String),
    /// Inline code span
    InlineCode(String),
    /// Fenced or indented code block
    CodeBlock {
        language: Option<String>,
        literal: String,
    },
    /// Raw block-level markup
    HtmlBlock(String),
    /// Raw inline markup
    InlineHtml(String),
    /// Footnote reference
    FootnoteReference(String),
    /// Soft line break
    SoftBreak,
    /// Hard line break
    LineBreak,
    /// Thematic break (horizontal rule)
    ThematicBreak,
}

/// Fieldless mirror of [`NodeData`], used for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Heading,
    Paragraph,
    BlockQuote,
    OrderedList,
    UnorderedList,
    ListItem,
    Table,
    TableHead,
    TableRow,
    TableCell,
    FootnoteDefinition,
    Link,
    Image,
    Emphasis,
    Strong,
    Strikethrough,
    Text,
    InlineCode,
    CodeBlock,
    HtmlBlock,
    InlineHtml,
    FootnoteReference,
    SoftBreak,
    LineBreak,
    ThematicBreak,
}

impl Node {
    /// Create a node with an explicit identity.
    ///
    /// The parser is the normal source of identities; this constructor
    /// exists for building trees programmatically.
    pub fn new(id: NodeId, data: NodeData) -> Self {
        Self { id, data }
    }

    /// The stable identity of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The kind tag of this node.
    pub fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Document(_) => NodeKind::Document,
            NodeData::Heading { .. } => NodeKind::Heading,
            NodeData::Paragraph(_) => NodeKind::Paragraph,
            NodeData::BlockQuote(_) => NodeKind::BlockQuote,
            NodeData::OrderedList { .. } => NodeKind::OrderedList,
            NodeData::UnorderedList(_) => NodeKind::UnorderedList,
            NodeData::ListItem(_) => NodeKind::ListItem,
            NodeData::Table { .. } => NodeKind::Table,
            NodeData::TableHead(_) => NodeKind::TableHead,
            NodeData::TableRow(_) => NodeKind::TableRow,
            NodeData::TableCell(_) => NodeKind::TableCell,
            NodeData::FootnoteDefinition { .. } => NodeKind::FootnoteDefinition,
            NodeData::Link { .. } => NodeKind::Link,
            NodeData::Image { .. } => NodeKind::Image,
            NodeData::Emphasis(_) => NodeKind::Emphasis,
            NodeData::Strong(_) => NodeKind::Strong,
            NodeData::Strikethrough(_) => NodeKind::Strikethrough,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::InlineCode(_) => NodeKind::InlineCode,
            NodeData::CodeBlock { .. } => NodeKind::CodeBlock,
            NodeData::HtmlBlock(_) => NodeKind::HtmlBlock,
            NodeData::InlineHtml(_) => NodeKind::InlineHtml,
            NodeData::FootnoteReference(_) => NodeKind::FootnoteReference,
            NodeData::SoftBreak => NodeKind::SoftBreak,
            NodeData::LineBreak => NodeKind::LineBreak,
            NodeData::ThematicBreak => NodeKind::ThematicBreak,
        }
    }

    /// Borrow the raw payload.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Ordered child list; empty for leaf nodes.
    pub fn children(&self) -> &[Node] {
        match &self.data {
            NodeData::Document(children)
            | NodeData::Heading { children, .. }
            | NodeData::Paragraph(children)
            | NodeData::BlockQuote(children)
            | NodeData::OrderedList { children, .. }
            | NodeData::UnorderedList(children)
            | NodeData::ListItem(children)
            | NodeData::Table { children, .. }
            | NodeData::TableHead(children)
            | NodeData::TableRow(children)
            | NodeData::TableCell(children)
            | NodeData::FootnoteDefinition { children, .. }
            | NodeData::Link { children, .. }
            | NodeData::Image { children, .. }
            | NodeData::Emphasis(children)
            | NodeData::Strong(children)
            | NodeData::Strikethrough(children) => children,
            _ => &[],
        }
    }

    /// Whether this node is a terminal payload rather than a composite.
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self.data,
            NodeData::Document(_)
                | NodeData::Heading { .. }
                | NodeData::Paragraph(_)
                | NodeData::BlockQuote(_)
                | NodeData::OrderedList { .. }
                | NodeData::UnorderedList(_)
                | NodeData::ListItem(_)
                | NodeData::Table { .. }
                | NodeData::TableHead(_)
                | NodeData::TableRow(_)
                | NodeData::TableCell(_)
                | NodeData::FootnoteDefinition { .. }
                | NodeData::Link { .. }
                | NodeData::Image { .. }
                | NodeData::Emphasis(_)
                | NodeData::Strong(_)
                | NodeData::Strikethrough(_)
        )
    }

    /// Structural copy with the child list replaced.
    ///
    /// The kind, identity and any leaf payload are preserved. Calling
    /// this on a leaf returns the leaf unchanged.
    pub fn with_children(&self, new_children: Vec<Node>) -> Node {
        let data = match &self.data {
            NodeData::Document(_) => NodeData::Document(new_children),
            NodeData::Heading { level, .. } => NodeData::Heading {
                level: *level,
                children: new_children,
            },
            NodeData::Paragraph(_) => NodeData::Paragraph(new_children),
            NodeData::BlockQuote(_) => NodeData::BlockQuote(new_children),
            NodeData::OrderedList { start, .. } => NodeData::OrderedList {
                start: *start,
                children: new_children,
            },
            NodeData::UnorderedList(_) => NodeData::UnorderedList(new_children),
            NodeData::ListItem(_) => NodeData::ListItem(new_children),
            NodeData::Table { alignments, .. } => NodeData::Table {
                alignments: alignments.clone(),
                children: new_children,
            },
            NodeData::TableHead(_) => NodeData::TableHead(new_children),
            NodeData::TableRow(_) => NodeData::TableRow(new_children),
            NodeData::TableCell(_) => NodeData::TableCell(new_children),
            NodeData::FootnoteDefinition { label, .. } => NodeData::FootnoteDefinition {
                label: label.clone(),
                children: new_children,
            },
            NodeData::Link {
                destination, title, ..
            } => NodeData::Link {
                destination: destination.clone(),
                title: title.clone(),
                children: new_children,
            },
            NodeData::Image {
                destination, title, ..
            } => NodeData::Image {
                destination: destination.clone(),
                title: title.clone(),
                children: new_children,
            },
            NodeData::Emphasis(_) => NodeData::Emphasis(new_children),
            NodeData::Strong(_) => NodeData::Strong(new_children),
            NodeData::Strikethrough(_) => NodeData::Strikethrough(new_children),
            leaf => leaf.clone(),
        };
        Node { id: self.id, data }
    }

    /// The prose payload of a text leaf, if this is one.
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Copy of a text leaf with its payload replaced and identity kept.
    ///
    /// Returns `None` for any other kind; the rewriter relies on the
    /// identity being preserved so a position stays addressable across
    /// successive rewrites.
    pub fn with_text(&self, text: String) -> Option<Node> {
        match &self.data {
            NodeData::Text(_) => Some(Node {
                id: self.id,
                data: NodeData::Text(text),
            }),
            _ => None,
        }
    }

    /// The destination URL of a link or image node.
    pub fn destination(&self) -> Option<&str> {
        match &self.data {
            NodeData::Link { destination, .. } | NodeData::Image { destination, .. } => {
                Some(destination)
            }
            _ => None,
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(Node::subtree_len).sum::<usize>()
    }
}
