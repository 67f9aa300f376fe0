/*!
 * Adapter from the pulldown-cmark event stream to the [`Node`] tree.
 *
 * The parser library owns the markdown grammar; this module only maps its
 * events onto the closed node-kind set and assigns each node a stable
 * [`NodeId`] in the order nodes are opened, so identities are monotone in
 * document order.
 */

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag};

use super::model::{ColumnAlignment, Node, NodeData, NodeId};

/// Parse markdown text into a document tree.
///
/// Never fails: malformed markdown degrades the way the underlying parser
/// degrades, it does not abort.
pub fn parse(text: &str) -> Node {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut builder = TreeBuilder::new();
    for event in parser {
        match event {
            Event::Start(tag) => builder.open(tag),
            Event::End(_) => builder.close(),
            Event::Text(s) => builder.text(&s),
            Event::Code(s) => builder.leaf(NodeData::InlineCode(s.into_string())),
            Event::Html(s) => builder.block_html(&s),
            Event::InlineHtml(s) => builder.leaf(NodeData::InlineHtml(s.into_string())),
            Event::FootnoteReference(s) => {
                builder.leaf(NodeData::FootnoteReference(s.into_string()))
            }
            Event::SoftBreak => builder.leaf(NodeData::SoftBreak),
            Event::HardBreak => builder.leaf(NodeData::LineBreak),
            Event::Rule => builder.leaf(NodeData::ThematicBreak),
            // Task markers, math and metadata are not enabled
            _ => {}
        }
    }
    builder.finish()
}

/// What an open frame will become once its children are complete.
enum FrameKind {
    Document,
    Heading(u8),
    Paragraph,
    BlockQuote,
    OrderedList(u64),
    UnorderedList,
    ListItem,
    Table(Vec<ColumnAlignment>),
    TableHead,
    TableRow,
    TableCell,
    FootnoteDefinition(String),
    Link { destination: String, title: String },
    Image { destination: String, title: String },
    Emphasis,
    Strong,
    Strikethrough,
    CodeBlock(Option<String>),
    HtmlBlock,
    /// Unrecognized container: children are spliced into the parent
    Transparent,
}

struct Frame {
    id: NodeId,
    kind: FrameKind,
    children: Vec<Node>,
    literal: String,
}

/// Stack-based tree builder; `open` reserves an id so identities follow
/// pre-order even though composites are materialized on `close`.
struct TreeBuilder {
    next_id: u32,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        let mut builder = Self {
            next_id: 0,
            stack: Vec::new(),
        };
        builder.push(FrameKind::Document);
        builder
    }

    fn next(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, kind: FrameKind) {
        let id = self.next();
        self.stack.push(Frame {
            id,
            kind,
            children: Vec::new(),
            literal: String::new(),
        });
    }

    fn open(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::Heading { level, .. } => FrameKind::Heading(level as u8),
            Tag::BlockQuote(_) => FrameKind::BlockQuote,
            Tag::CodeBlock(block_kind) => {
                let language = match block_kind {
                    CodeBlockKind::Fenced(info) => {
                        let token = info.split_whitespace().next().unwrap_or("");
                        if token.is_empty() {
                            None
                        } else {
                            Some(token.to_string())
                        }
                    }
                    CodeBlockKind::Indented => None,
                };
                FrameKind::CodeBlock(language)
            }
            Tag::List(Some(start)) => FrameKind::OrderedList(start),
            Tag::List(None) => FrameKind::UnorderedList,
            Tag::Item => FrameKind::ListItem,
            Tag::FootnoteDefinition(label) => FrameKind::FootnoteDefinition(label.into_string()),
            Tag::Table(alignments) => {
                let alignments = alignments.into_iter().map(column_alignment).collect();
                FrameKind::Table(alignments)
            }
            Tag::TableHead => FrameKind::TableHead,
            Tag::TableRow => FrameKind::TableRow,
            Tag::TableCell => FrameKind::TableCell,
            Tag::Emphasis => FrameKind::Emphasis,
            Tag::Strong => FrameKind::Strong,
            Tag::Strikethrough => FrameKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => FrameKind::Link {
                destination: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => FrameKind::Image {
                destination: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::HtmlBlock => FrameKind::HtmlBlock,
            _ => FrameKind::Transparent,
        };
        self.push(kind);
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if matches!(frame.kind, FrameKind::Transparent) {
            // Splice unknown containers into the parent
            if let Some(parent) = self.stack.last_mut() {
                parent.children.extend(frame.children);
            }
            return;
        }
        let node = frame.into_node();
        self.attach(node);
    }

    /// Prose text: merged with a preceding text leaf so one logical run
    /// stays one leaf, or collected as literal content of code/html frames.
    fn text(&mut self, s: &str) {
        if let Some(frame) = self.stack.last_mut() {
            if matches!(frame.kind, FrameKind::CodeBlock(_) | FrameKind::HtmlBlock) {
                frame.literal.push_str(s);
                return;
            }
            if let Some(last) = frame.children.last_mut() {
                if let Some(merged) = last.text().map(|prev| format!("{prev}{s}")) {
                    if let Some(node) = last.with_text(merged) {
                        *last = node;
                        return;
                    }
                }
            }
        }
        self.leaf(NodeData::Text(s.to_string()));
    }

    fn block_html(&mut self, s: &str) {
        if let Some(frame) = self.stack.last_mut() {
            if matches!(frame.kind, FrameKind::HtmlBlock) {
                frame.literal.push_str(s);
                return;
            }
        }
        self.leaf(NodeData::HtmlBlock(s.to_string()));
    }

    fn leaf(&mut self, data: NodeData) {
        let id = self.next();
        self.attach(Node::new(id, data));
    }

    fn attach(&mut self, node: Node) {
        if let Some(frame) = self.stack.last_mut() {
            frame.children.push(node);
        }
    }

    fn finish(mut self) -> Node {
        // Close any frames left open by truncated input
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(root) => root.into_node(),
            None => Node::new(NodeId(0), NodeData::Document(Vec::new())),
        }
    }
}

impl Frame {
    fn into_node(self) -> Node {
        let data = match self.kind {
            FrameKind::Document => NodeData::Document(self.children),
            FrameKind::Heading(level) => NodeData::Heading {
                level,
                children: self.children,
            },
            FrameKind::Paragraph => NodeData::Paragraph(self.children),
            FrameKind::BlockQuote => NodeData::BlockQuote(self.children),
            FrameKind::OrderedList(start) => NodeData::OrderedList {
                start,
                children: self.children,
            },
            FrameKind::UnorderedList => NodeData::UnorderedList(self.children),
            FrameKind::ListItem => NodeData::ListItem(self.children),
            FrameKind::Table(alignments) => NodeData::Table {
                alignments,
                children: self.children,
            },
            FrameKind::TableHead => NodeData::TableHead(self.children),
            FrameKind::TableRow => NodeData::TableRow(self.children),
            FrameKind::TableCell => NodeData::TableCell(self.children),
            FrameKind::FootnoteDefinition(label) => NodeData::FootnoteDefinition {
                label,
                children: self.children,
            },
            FrameKind::Link { destination, title } => NodeData::Link {
                destination,
                title,
                children: self.children,
            },
            FrameKind::Image { destination, title } => NodeData::Image {
                destination,
                title,
                children: self.children,
            },
            FrameKind::Emphasis => NodeData::Emphasis(self.children),
            FrameKind::Strong => NodeData::Strong(self.children),
            FrameKind::Strikethrough => NodeData::Strikethrough(self.children),
            FrameKind::CodeBlock(language) => NodeData::CodeBlock {
                language,
                literal: self.literal,
            },
            FrameKind::HtmlBlock => NodeData::HtmlBlock(self.literal),
            FrameKind::Transparent => NodeData::Document(self.children),
        };
        Node::new(self.id, data)
    }
}

fn column_alignment(alignment: Alignment) -> ColumnAlignment {
    match alignment {
        Alignment::None => ColumnAlignment::None,
        Alignment::Left => ColumnAlignment::Left,
        Alignment::Center => ColumnAlignment::Center,
        Alignment::Right => ColumnAlignment::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::NodeKind;

    fn collect_ids(node: &Node, ids: &mut Vec<u32>) {
        ids.push(node.id().0);
        for child in node.children() {
            collect_ids(child, ids);
        }
    }

    #[test]
    fn test_parse_simpleDocument_shouldBuildExpectedKinds() {
        let root = parse("# Title\n\nSome *emphasized* prose.\n");
        assert_eq!(root.kind(), NodeKind::Document);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].kind(), NodeKind::Heading);
        assert_eq!(root.children()[1].kind(), NodeKind::Paragraph);
    }

    #[test]
    fn test_parse_nodeIds_shouldBeUnique() {
        let root = parse("# A\n\n- one\n- two\n\n> quoted\n");
        let mut ids = Vec::new();
        collect_ids(&root, &mut ids);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len(), "duplicate node id assigned");
    }

    #[test]
    fn test_parse_duplicateText_shouldKeepDistinctIdentities() {
        let root = parse("same\n\nsame\n");
        let first = &root.children()[0].children()[0];
        let second = &root.children()[1].children()[0];
        assert_eq!(first.text(), Some("same"));
        assert_eq!(second.text(), Some("same"));
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_parse_codeBlock_shouldCaptureLanguageAndLiteral() {
        let root = parse("```swift\nlet x = 1\n```\n");
        let block = &root.children()[0];
        assert_eq!(block.kind(), NodeKind::CodeBlock);
        match block.data() {
            NodeData::CodeBlock { language, literal } => {
                assert_eq!(language.as_deref(), Some("swift"));
                assert_eq!(literal, "let x = 1\n");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_parse_link_shouldCaptureDestination() {
        let root = parse("See [SE-0301](0301-concurrency.md).\n");
        let paragraph = &root.children()[0];
        let link = paragraph
            .children()
            .iter()
            .find(|n| n.kind() == NodeKind::Link)
            .expect("link node");
        assert_eq!(link.destination(), Some("0301-concurrency.md"));
    }

    #[test]
    fn test_parse_table_shouldKeepRowStructure() {
        let root = parse("| a | b |\n| - | - |\n| 1 | 2 |\n");
        let table = &root.children()[0];
        assert_eq!(table.kind(), NodeKind::Table);
        assert_eq!(table.children()[0].kind(), NodeKind::TableHead);
        assert_eq!(table.children()[1].kind(), NodeKind::TableRow);
    }
}
