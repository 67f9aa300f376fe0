/*!
 * Visitor dispatch over the closed node-kind set.
 *
 * Two traversal flavors share the same dispatch shape:
 *
 * - [`MarkupWalker`] - synchronous read-only descent, used by the row
 *   segmenter and link scanning.
 * - [`AsyncMarkupRewriter`] - suspending rebuild traversal, used by the
 *   translation driver. Handlers may await at any node; children are
 *   visited strictly left to right and a parent is only reconstructed
 *   after all of its children have completed.
 *
 * Every kind has a dedicated handler method defaulting to plain descent,
 * so an implementation overrides only the kinds it cares about.
 */

use async_trait::async_trait;

use super::model::{Node, NodeKind};

/// Synchronous read-only traversal with per-kind handlers.
pub trait MarkupWalker {
    /// Dispatch on the node kind.
    fn visit(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Document => self.visit_document(node),
            NodeKind::Heading => self.visit_heading(node),
            NodeKind::Paragraph => self.visit_paragraph(node),
            NodeKind::BlockQuote => self.visit_block_quote(node),
            NodeKind::OrderedList => self.visit_ordered_list(node),
            NodeKind::UnorderedList => self.visit_unordered_list(node),
            NodeKind::ListItem => self.visit_list_item(node),
            NodeKind::Table => self.visit_table(node),
            NodeKind::TableHead => self.visit_table_head(node),
            NodeKind::TableRow => self.visit_table_row(node),
            NodeKind::TableCell => self.visit_table_cell(node),
            NodeKind::FootnoteDefinition => self.visit_footnote_definition(node),
            NodeKind::Link => self.visit_link(node),
            NodeKind::Image => self.visit_image(node),
            NodeKind::Emphasis => self.visit_emphasis(node),
            NodeKind::Strong => self.visit_strong(node),
            NodeKind::Strikethrough => self.visit_strikethrough(node),
            NodeKind::Text => self.visit_text(node),
            NodeKind::InlineCode => self.visit_inline_code(node),
            NodeKind::CodeBlock => self.visit_code_block(node),
            NodeKind::HtmlBlock => self.visit_html_block(node),
            NodeKind::InlineHtml => self.visit_inline_html(node),
            NodeKind::FootnoteReference => self.visit_footnote_reference(node),
            NodeKind::SoftBreak => self.visit_soft_break(node),
            NodeKind::LineBreak => self.visit_line_break(node),
            NodeKind::ThematicBreak => self.visit_thematic_break(node),
        }
    }

    /// Visit every child in document order.
    fn descend_into(&mut self, node: &Node) {
        for child in node.children() {
            self.visit(child);
        }
    }

    fn visit_document(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_heading(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_paragraph(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_block_quote(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_ordered_list(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_unordered_list(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_list_item(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_table(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_table_head(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_table_row(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_table_cell(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_footnote_definition(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_link(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_image(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_emphasis(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_strong(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_strikethrough(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_text(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_inline_code(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_code_block(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_html_block(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_inline_html(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_footnote_reference(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_soft_break(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_line_break(&mut self, node: &Node) {
        self.descend_into(node);
    }
    fn visit_thematic_break(&mut self, node: &Node) {
        self.descend_into(node);
    }
}

/// Suspending rebuild traversal with per-kind handlers.
///
/// The default handler awaits each child in order and recombines the
/// results via [`Node::with_children`]; a handler failure aborts the
/// remainder of the traversal and propagates to the caller.
#[async_trait]
pub trait AsyncMarkupRewriter: Send {
    /// Error produced by failing handlers.
    type Error: Send;

    /// Dispatch on the node kind.
    async fn visit(&mut self, node: &Node) -> Result<Node, Self::Error> {
        match node.kind() {
            NodeKind::Document => self.visit_document(node).await,
            NodeKind::Heading => self.visit_heading(node).await,
            NodeKind::Paragraph => self.visit_paragraph(node).await,
            NodeKind::BlockQuote => self.visit_block_quote(node).await,
            NodeKind::OrderedList => self.visit_ordered_list(node).await,
            NodeKind::UnorderedList => self.visit_unordered_list(node).await,
            NodeKind::ListItem => self.visit_list_item(node).await,
            NodeKind::Table => self.visit_table(node).await,
            NodeKind::TableHead => self.visit_table_head(node).await,
            NodeKind::TableRow => self.visit_table_row(node).await,
            NodeKind::TableCell => self.visit_table_cell(node).await,
            NodeKind::FootnoteDefinition => self.visit_footnote_definition(node).await,
            NodeKind::Link => self.visit_link(node).await,
            NodeKind::Image => self.visit_image(node).await,
            NodeKind::Emphasis => self.visit_emphasis(node).await,
            NodeKind::Strong => self.visit_strong(node).await,
            NodeKind::Strikethrough => self.visit_strikethrough(node).await,
            NodeKind::Text => self.visit_text(node).await,
            NodeKind::InlineCode => self.visit_inline_code(node).await,
            NodeKind::CodeBlock => self.visit_code_block(node).await,
            NodeKind::HtmlBlock => self.visit_html_block(node).await,
            NodeKind::InlineHtml => self.visit_inline_html(node).await,
            NodeKind::FootnoteReference => self.visit_footnote_reference(node).await,
            NodeKind::SoftBreak => self.visit_soft_break(node).await,
            NodeKind::LineBreak => self.visit_line_break(node).await,
            NodeKind::ThematicBreak => self.visit_thematic_break(node).await,
        }
    }

    /// Rebuild a composite after visiting every child, left to right.
    async fn default_visit(&mut self, node: &Node) -> Result<Node, Self::Error> {
        let mut new_children = Vec::with_capacity(node.children().len());
        for child in node.children() {
            new_children.push(self.visit(child).await?);
        }
        Ok(node.with_children(new_children))
    }

    async fn visit_document(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_heading(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_paragraph(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_block_quote(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_ordered_list(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_unordered_list(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_list_item(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_table(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_table_head(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_table_row(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_table_cell(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_footnote_definition(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_link(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_image(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_emphasis(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_strong(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_strikethrough(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_text(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_inline_code(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_code_block(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_html_block(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_inline_html(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_footnote_reference(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_soft_break(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_line_break(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
    async fn visit_thematic_break(&mut self, node: &Node) -> Result<Node, Self::Error> {
        self.default_visit(node).await
    }
}

/// Walker that collects the text leaves of a tree in document order.
#[derive(Default)]
pub struct TextLeafCollector {
    /// Collected `(id, text)` pairs, pre-order
    pub leaves: Vec<(super::model::NodeId, String)>,
}

impl MarkupWalker for TextLeafCollector {
    fn visit_text(&mut self, node: &Node) {
        if let Some(text) = node.text() {
            self.leaves.push((node.id(), text.to_string()));
        }
    }
}

impl TextLeafCollector {
    /// Collect every text leaf under `root` in document order.
    pub fn collect(root: &Node) -> Vec<(super::model::NodeId, String)> {
        let mut collector = Self::default();
        collector.visit(root);
        collector.leaves
    }
}
