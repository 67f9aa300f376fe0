/*!
 * Serialization of a document tree back to markdown text.
 *
 * The output is deterministic and stable under re-parsing: formatting a
 * tree, parsing the result and formatting again yields identical text, so
 * unaffected subtrees keep the same serialized form across rewrites.
 */

use super::model::{ColumnAlignment, Node, NodeData, NodeKind};

/// Serialize a node (and its subtree) to markdown text.
pub fn format(node: &Node) -> String {
    match node.data() {
        NodeData::Document(children) => format_blocks(children),
        _ if is_inline(node.kind()) => {
            let mut out = String::new();
            write_inline(&mut out, node);
            out
        }
        _ => format_block(node),
    }
}

fn is_inline(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Text
            | NodeKind::InlineCode
            | NodeKind::Emphasis
            | NodeKind::Strong
            | NodeKind::Strikethrough
            | NodeKind::Link
            | NodeKind::Image
            | NodeKind::InlineHtml
            | NodeKind::FootnoteReference
            | NodeKind::SoftBreak
            | NodeKind::LineBreak
    )
}

fn format_blocks(blocks: &[Node]) -> String {
    blocks
        .iter()
        .map(format_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_block(node: &Node) -> String {
    match node.data() {
        NodeData::Document(children) => format_blocks(children),
        NodeData::Heading { level, children } => {
            format!("{} {}", "#".repeat(*level as usize), inlines(children))
        }
        NodeData::Paragraph(children) => inlines(children),
        NodeData::BlockQuote(children) => quote_lines(&format_blocks(children)),
        NodeData::CodeBlock { language, literal } => fenced(language.as_deref(), literal),
        NodeData::OrderedList { start, children } => {
            let mut out = Vec::new();
            for (i, item) in children.iter().enumerate() {
                let marker = format!("{}. ", start + i as u64);
                out.push(list_item(&marker, item));
            }
            out.join("\n")
        }
        NodeData::UnorderedList(children) => {
            let items: Vec<String> = children.iter().map(|item| list_item("- ", item)).collect();
            items.join("\n")
        }
        NodeData::ListItem(children) => item_content(children),
        NodeData::Table {
            alignments,
            children,
        } => format_table(alignments, children),
        NodeData::TableHead(cells) | NodeData::TableRow(cells) => table_row(cells),
        NodeData::TableCell(children) => inlines(children),
        NodeData::FootnoteDefinition { label, children } => {
            let body = format_blocks(children);
            let mut lines = body.lines();
            let first = lines.next().unwrap_or_default();
            let mut out = format!("[^{label}]: {first}");
            for line in lines {
                out.push_str("\n    ");
                out.push_str(line);
            }
            out
        }
        NodeData::HtmlBlock(raw) => raw.trim_end().to_string(),
        NodeData::ThematicBreak => "---".to_string(),
        _ => {
            let mut out = String::new();
            write_inline(&mut out, node);
            out
        }
    }
}

fn inlines(children: &[Node]) -> String {
    let mut out = String::new();
    for child in children {
        write_inline(&mut out, child);
    }
    out
}

fn write_inline(out: &mut String, node: &Node) {
    match node.data() {
        NodeData::Text(text) => out.push_str(text),
        NodeData::InlineCode(code) => {
            // A span containing a backtick needs a longer delimiter
            if code.contains('`') {
                out.push_str(&format!("`` {code} ``"));
            } else {
                out.push_str(&format!("`{code}`"));
            }
        }
        NodeData::Emphasis(children) => {
            out.push('*');
            out.push_str(&inlines(children));
            out.push('*');
        }
        NodeData::Strong(children) => {
            out.push_str("**");
            out.push_str(&inlines(children));
            out.push_str("**");
        }
        NodeData::Strikethrough(children) => {
            out.push_str("~~");
            out.push_str(&inlines(children));
            out.push_str("~~");
        }
        NodeData::Link {
            destination,
            title,
            children,
        } => {
            out.push('[');
            out.push_str(&inlines(children));
            out.push_str("](");
            out.push_str(destination);
            if !title.is_empty() {
                out.push_str(&format!(" \"{title}\""));
            }
            out.push(')');
        }
        NodeData::Image {
            destination,
            title,
            children,
        } => {
            out.push_str("![");
            out.push_str(&inlines(children));
            out.push_str("](");
            out.push_str(destination);
            if !title.is_empty() {
                out.push_str(&format!(" \"{title}\""));
            }
            out.push(')');
        }
        NodeData::InlineHtml(raw) => out.push_str(raw),
        NodeData::FootnoteReference(label) => out.push_str(&format!("[^{label}]")),
        NodeData::SoftBreak => out.push('\n'),
        NodeData::LineBreak => out.push_str("\\\n"),
        _ => out.push_str(&format_block(node)),
    }
}

/// Prefix every line of a quoted body with `> ` (bare `>` on blanks).
fn quote_lines(body: &str) -> String {
    body.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn fenced(language: Option<&str>, literal: &str) -> String {
    let fence = if literal.contains("```") { "````" } else { "```" };
    let mut out = format!("{fence}{}\n", language.unwrap_or(""));
    out.push_str(literal);
    if !literal.is_empty() && !literal.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(fence);
    out
}

/// Item body: consecutive inline children fold into one paragraph run,
/// block children (nested lists, quotes) format on their own lines.
fn item_content(children: &[Node]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut run = String::new();
    for child in children {
        if is_inline(child.kind()) {
            write_inline(&mut run, child);
        } else {
            if !run.is_empty() {
                parts.push(std::mem::take(&mut run));
            }
            parts.push(format_block(child));
        }
    }
    if !run.is_empty() {
        parts.push(run);
    }
    parts.join("\n")
}

fn list_item(marker: &str, item: &Node) -> String {
    let indent = " ".repeat(marker.len());
    let body = format_block(item);
    let mut lines = body.lines();
    let first = lines.next().unwrap_or_default();
    let mut out = format!("{marker}{first}");
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

fn table_row(cells: &[Node]) -> String {
    let mut out = String::from("|");
    for cell in cells {
        out.push(' ');
        out.push_str(&format_block(cell));
        out.push_str(" |");
    }
    out
}

fn format_table(alignments: &[ColumnAlignment], children: &[Node]) -> String {
    let mut lines = Vec::new();
    let mut rows = children.iter();
    if let Some(head) = rows.next() {
        lines.push(format_block(head));
        let mut separator = String::from("|");
        for alignment in alignments {
            let marker = match alignment {
                ColumnAlignment::None => "---",
                ColumnAlignment::Left => ":---",
                ColumnAlignment::Center => ":---:",
                ColumnAlignment::Right => "---:",
            };
            separator.push_str(&format!(" {marker} |"));
        }
        lines.push(separator);
    }
    for row in rows {
        lines.push(format_block(row));
    }
    lines.join("\n")
}
