/*!
 * Tests for row segmentation over realistic proposal documents.
 */

use propdoc::document::format;
use propdoc::rows::{anchor, rows};

use crate::common;

#[test]
fn test_rows_sampleProposal_shouldAddressEveryTopLevelChild() {
    let root = common::sample_document();
    let rows = rows(&root);
    assert_eq!(rows.len(), root.children().len());

    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "structured-concurrency",
            "introduction",
            "2",
            "motivation",
            "4",
            "5",
            "detailed-design",
            "7",
            "8",
            "9",
        ]
    );
}

#[test]
fn test_rows_markup_shouldConcatenateBackToDocument() {
    let root = common::sample_document();
    let joined = rows(&root)
        .into_iter()
        .map(|r| r.markup)
        .collect::<Vec<_>>()
        .join("\n\n");
    assert_eq!(joined, format(&root));
}

#[test]
fn test_rows_anchorLink_shouldResolveToHeadingRowId() {
    // The sample links to "#introduction"; a scroll target must exist
    let root = common::sample_document();
    let rows = rows(&root);
    let target = anchor("## Introduction");
    let fragment = target.trim_start_matches('#');
    assert!(rows.iter().any(|r| r.id == fragment));
}

#[test]
fn test_rows_afterLeafRewrite_shouldKeepNonHeadingIdsStable() {
    use propdoc::document::{TextLeafCollector, replace_node};
    use propdoc::{Node, NodeData};

    let root = common::sample_document();
    let (id, _) = TextLeafCollector::collect(&root)
        .into_iter()
        .find(|(_, text)| text == "Tasks form a tree")
        .expect("known leaf");

    let replacement = Node::new(id, NodeData::Text("replaced".to_string()));
    let rewritten = replace_node(&root, id, &replacement);

    let before = rows(&root);
    let after = rows(&rewritten);
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.id, a.id);
    }
}
