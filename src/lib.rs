/*!
 * # propdoc - Progressive document translation core
 *
 * A Rust library for displaying and progressively translating structured
 * proposal documents while preserving their markdown structure.
 *
 * ## Features
 *
 * - Immutable typed document tree with stable per-node identities
 * - Double-dispatch traversal, synchronous and suspending flavors
 * - Single-leaf tree rewriting that preserves all sibling structure
 * - Streaming per-leaf translation emitting whole-tree snapshots,
 *   cancellable by dropping the stream
 * - Row segmentation with collision-resistant heading anchors
 * - Hyperlink classification (scroll, cross-document, external)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `document`: the tree core
 *   - `document::model`: node types and identities
 *   - `document::parser`: adapter from the markdown parser
 *   - `document::format`: serialization back to markdown
 *   - `document::visitor`: traversal dispatch
 *   - `document::rewrite`: single-node substitution
 * - `translation`: the streaming translation driver and session state
 * - `rows`: row segmentation and heading slugs
 * - `links`: link classification and source-URL helpers
 * - `providers`: translation service clients
 * - `app_config`: configuration management
 * - `errors`: custom error types for the crate
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod document;
pub mod errors;
pub mod links;
pub mod providers;
pub mod rows;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{Node, NodeData, NodeId, NodeKind, format, parse, replace_node};
pub use errors::{AppError, ProviderError, TranslationError};
pub use links::{LinkAction, LinkClassifier};
pub use rows::{Row, rows, slugify};
pub use translation::{MarkdownTranslator, SessionState, TranslationStream};
