/*!
 * Row segmentation for addressable rendering.
 *
 * A document's top-level children become an ordered list of rows, each
 * independently re-renderable and addressable for anchor scrolling.
 * Heading rows get a content-derived slug id (with `-1`, `-2`, ...
 * suffixes on collision); every other row is addressed by its position.
 *
 * Rows are derived on every render pass, never cached, so everything
 * here is pure and deterministic.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

use crate::document::{Node, NodeKind, format};

/// Leading heading marker: up to 3 spaces, 1-6 `#`, then whitespace
static HEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,3}#{1,6}\s+").expect("valid heading marker regex"));

/// Fallback id for headings whose text folds away entirely
const EMPTY_SLUG_FALLBACK: &str = "section";

/// One addressable, independently re-renderable unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    /// Slug for headings, decimal offset for everything else
    pub id: String,
    /// Re-serialized markdown of one top-level child
    pub markup: String,
}

/// Derive the ordered row list from a document root.
pub fn rows(root: &Node) -> Vec<Row> {
    let mut slug_count: HashMap<String, usize> = HashMap::new();
    root.children()
        .iter()
        .enumerate()
        .map(|(offset, child)| {
            let markup = format(child);
            if child.kind() == NodeKind::Heading {
                let slug = slugify(&markup);
                let seen = slug_count.entry(slug.clone()).or_insert(0);
                let id = if *seen == 0 {
                    slug.clone()
                } else {
                    format!("{}-{}", slug, seen)
                };
                *seen += 1;
                Row { id, markup }
            } else {
                Row {
                    id: offset.to_string(),
                    markup,
                }
            }
        })
        .collect()
}

/// Derive an anchor slug from a markdown heading line.
///
/// Deterministic and total: identical input always yields identical
/// output, and input that folds away entirely falls back to
/// `"section"`. Transliteration is an NFKD fold that keeps the ASCII
/// approximation and drops what has none.
pub fn slugify(heading: &str) -> String {
    // 1) strip the leading heading marker
    let stripped = HEADING_MARKER.replace(heading, "");

    // 2) drop backticks and parentheses, keeping their content
    let cleaned: String = stripped
        .chars()
        .filter(|c| !matches!(c, '`' | '(' | ')'))
        .collect();

    // 3) + 4) decompose, keep the ASCII approximation, lowercase
    let folded: String = cleaned
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase();

    // 5) + 6) collapse runs outside [a-z0-9] into single hyphens,
    // trimming at both ends
    let mut slug = String::with_capacity(folded.len());
    let mut run_pending = false;
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if run_pending && !slug.is_empty() {
                slug.push('-');
            }
            run_pending = false;
            slug.push(c);
        } else {
            run_pending = true;
        }
    }

    // 7) fallback for headings that folded away entirely
    if slug.is_empty() {
        slug.push_str(EMPTY_SLUG_FALLBACK);
    }
    slug
}

/// `#`-prefixed form of [`slugify`], for use in anchor URLs.
pub fn anchor(heading: &str) -> String {
    format!("#{}", slugify(heading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    #[test]
    fn test_slugify_inlineCode_shouldMatchKnownVector() {
        assert_eq!(
            slugify("### `~Copyable` as logical negation"),
            "copyable-as-logical-negation"
        );
        // Deterministic across repeated calls
        assert_eq!(
            slugify("### `~Copyable` as logical negation"),
            "copyable-as-logical-negation"
        );
    }

    #[test]
    fn test_slugify_diacritics_shouldFoldToAscii() {
        assert_eq!(slugify("## Café résumé"), "cafe-resume");
    }

    #[test]
    fn test_slugify_parentheses_shouldKeepContent() {
        assert_eq!(slugify("# Result (or why)"), "result-or-why");
    }

    #[test]
    fn test_slugify_nonLatin_shouldFallBackToSection() {
        assert_eq!(slugify("## 日本語"), "section");
        assert_eq!(slugify("##   "), "section");
    }

    #[test]
    fn test_slugify_punctuationRuns_shouldCollapseToSingleHyphen() {
        assert_eq!(slugify("# a -- b ?? c"), "a-b-c");
    }

    #[test]
    fn test_anchor_shouldPrefixHash() {
        assert_eq!(anchor("## Overview"), "#overview");
    }

    #[test]
    fn test_rows_headings_shouldGetSlugIds() {
        let root = parse("# Overview\n\nsome prose\n\n## Detailed design\n");
        let rows = rows(&root);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "overview");
        assert_eq!(rows[0].markup, "# Overview");
        assert_eq!(rows[1].id, "1");
        assert_eq!(rows[1].markup, "some prose");
        assert_eq!(rows[2].id, "detailed-design");
    }

    #[test]
    fn test_rows_slugCollision_shouldSuffixFromOne() {
        let root = parse("# Overview\n\n## Overview\n\n### Overview\n");
        let rows = rows(&root);
        assert_eq!(rows[0].id, "overview");
        assert_eq!(rows[1].id, "overview-1");
        assert_eq!(rows[2].id, "overview-2");
    }

    #[test]
    fn test_rows_recomputation_shouldBeDeterministic() {
        let root = parse("# A\n\ntext\n\n# A\n");
        assert_eq!(rows(&root), rows(&root));
    }
}
