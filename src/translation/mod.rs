/*!
 * Progressive document translation.
 *
 * This module provides:
 * - `driver`: the streaming translation driver and snapshot stream
 * - `session`: per-session lifecycle state and progress tracking
 *
 * Translation is a correctness- and ordering-focused pipeline: leaves
 * are translated strictly in document order, one at a time, and each
 * applied leaf yields a complete new tree value. Nothing is ever
 * mutated in place, so past snapshots stay valid for any reader.
 */

pub mod driver;
pub mod session;

// Re-export main types
pub use driver::{MarkdownTranslator, TranslationStream};
pub use session::{SessionHandle, SessionProgress, SessionState};
