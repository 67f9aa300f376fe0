/*!
 * Document modeling for structured proposal texts.
 *
 * This module provides the tree core:
 * - `model`: immutable typed node tree with stable per-node identities
 * - `parser`: adapter from the supplied markdown parser to the tree
 * - `format`: deterministic serialization back to markdown text
 * - `visitor`: double-dispatch traversal, synchronous and suspending
 * - `rewrite`: single-node substitution preserving all other structure
 */

pub mod format;
pub mod model;
pub mod parser;
pub mod rewrite;
pub mod visitor;

// Re-export types used by other modules
pub use format::format;
pub use model::{ColumnAlignment, Node, NodeData, NodeId, NodeKind};
pub use parser::parse;
pub use rewrite::replace_node;
pub use visitor::{AsyncMarkupRewriter, MarkupWalker, TextLeafCollector};
