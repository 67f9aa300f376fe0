/*!
 * Common test utilities for the propdoc test suite
 */

use propdoc::document::{Node, TextLeafCollector, parse};

/// A small proposal-shaped document exercising most node kinds.
pub const SAMPLE_PROPOSAL: &str = "\
# Structured Concurrency

## Introduction

This proposal describes *structured* concurrency.

## Motivation

Current code relies on [completion handlers](#introduction) heavily.

```swift
func fetch() async throws -> Data
```

## Detailed design

- Tasks form a tree
- Cancellation propagates

> Child tasks never outlive their parent.

See also [SE-0296](0296-async-await.md).
";

/// Parse the sample proposal.
pub fn sample_document() -> Node {
    parse(SAMPLE_PROPOSAL)
}

/// Text leaf payloads of a tree, in document order.
pub fn leaf_texts(root: &Node) -> Vec<String> {
    TextLeafCollector::collect(root)
        .into_iter()
        .map(|(_, text)| text)
        .collect()
}

/// A document with `n` single-word paragraphs, "leaf0" through "leaf{n-1}".
pub fn numbered_document(n: usize) -> Node {
    let source: Vec<String> = (0..n).map(|i| format!("leaf{i}")).collect();
    parse(&source.join("\n\n"))
}
