/*!
 * Tests for the document tree surface: parsing, formatting and
 * single-leaf rewriting.
 */

use propdoc::document::{TextLeafCollector, format, parse, replace_node};

use crate::common;

#[test]
fn test_parse_sampleProposal_shouldExposeTopLevelChildren() {
    let root = common::sample_document();
    // heading, heading, para, heading, para, code, heading, list, quote, para
    assert_eq!(root.children().len(), 10);
}

#[test]
fn test_format_unchangedTree_shouldBeStableAcrossReparse() {
    let root = common::sample_document();
    let once = format(&root);
    let twice = format(&parse(&once));
    assert_eq!(once, twice);
}

#[test]
fn test_replaceNode_structuralPreservation_shouldOnlyTouchTargetSpan() {
    let root = common::sample_document();
    let leaves = TextLeafCollector::collect(&root);
    let (target_id, target_text) = leaves
        .iter()
        .find(|(_, text)| text == "Tasks form a tree")
        .cloned()
        .expect("known leaf");

    let replacement = find_leaf(&root, target_id)
        .with_text("Tasks form a forest".to_string())
        .expect("text leaf");
    let rewritten = replace_node(&root, target_id, &replacement);

    // Sibling count and order at every level are unchanged
    assert_eq!(rewritten.children().len(), root.children().len());
    for (old, new) in root.children().iter().zip(rewritten.children()) {
        assert_eq!(old.id(), new.id());
        assert_eq!(old.kind(), new.kind());
    }

    // The serialized form differs only within the replaced leaf's span
    let before = format(&root);
    let after = format(&rewritten);
    assert_eq!(before.replace(&target_text, "Tasks form a forest"), after);
}

#[test]
fn test_replaceNode_everyLeafOnceInOrder_shouldTranslateWholeDocument() {
    let root = common::numbered_document(5);
    let mut current = root.clone();
    for (id, text) in TextLeafCollector::collect(&root) {
        let leaf = find_leaf(&current, id);
        let replacement = leaf.with_text(text.to_uppercase()).expect("text leaf");
        current = replace_node(&current, id, &replacement);
    }
    assert_eq!(
        common::leaf_texts(&current),
        vec!["LEAF0", "LEAF1", "LEAF2", "LEAF3", "LEAF4"]
    );
}

/// Locate a node by id; panics if absent (test helper).
fn find_leaf(root: &propdoc::Node, id: propdoc::NodeId) -> propdoc::Node {
    if root.id() == id {
        return root.clone();
    }
    for child in root.children() {
        if let Some(found) = try_find(child, id) {
            return found;
        }
    }
    panic!("node {id:?} not found");
}

fn try_find(node: &propdoc::Node, id: propdoc::NodeId) -> Option<propdoc::Node> {
    if node.id() == id {
        return Some(node.clone());
    }
    node.children().iter().find_map(|c| try_find(c, id))
}
