/*!
 * Single-leaf tree rewriting.
 *
 * Pure reconstruction of a tree with exactly one node substituted. The
 * target is addressed by its [`NodeId`], never by payload equality: two
 * leaves can carry identical text, and matching on content would replace
 * the wrong occurrence.
 */

use super::model::{Node, NodeId};

/// Produce a new root with the node identified by `target` replaced.
///
/// Every other node keeps its kind, identity, payload and child order;
/// untouched leaves are shared-by-clone, so the cost is O(tree size). If
/// no node carries `target` the result is value-equal to the input.
pub fn replace_node(root: &Node, target: NodeId, replacement: &Node) -> Node {
    if root.id() == target {
        return replacement.clone();
    }
    if root.is_leaf() {
        return root.clone();
    }
    let children = root
        .children()
        .iter()
        .map(|child| replace_node(child, target, replacement))
        .collect();
    root.with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::visitor::TextLeafCollector;
    use crate::document::{format, parse};

    #[test]
    fn test_replaceNode_shouldSubstituteExactlyOneLeaf() {
        let root = parse("alpha\n\nbeta\n\ngamma\n");
        let leaves = TextLeafCollector::collect(&root);
        let (target_id, _) = leaves[1];

        let original_leaf = &root.children()[1].children()[0];
        let replacement = original_leaf.with_text("BETA".to_string()).unwrap();
        let rewritten = replace_node(&root, target_id, &replacement);

        assert_eq!(format(&rewritten), "alpha\n\nBETA\n\ngamma");
        assert_eq!(rewritten.children().len(), root.children().len());
    }

    #[test]
    fn test_replaceNode_duplicateText_shouldUseIdentityNotContent() {
        let root = parse("same\n\nsame\n");
        let leaves = TextLeafCollector::collect(&root);
        assert_eq!(leaves.len(), 2);

        // Target the second occurrence specifically
        let (second_id, _) = leaves[1];
        let second_leaf = &root.children()[1].children()[0];
        let replacement = second_leaf.with_text("changed".to_string()).unwrap();
        let rewritten = replace_node(&root, second_id, &replacement);

        assert_eq!(format(&rewritten), "same\n\nchanged");
    }

    #[test]
    fn test_replaceNode_missingTarget_shouldReturnEqualTree() {
        let root = parse("alpha\n\nbeta\n");
        let replacement = Node::new(
            NodeId(9999),
            crate::document::NodeData::Text("x".to_string()),
        );
        let rewritten = replace_node(&root, NodeId(9999), &replacement);
        assert_eq!(rewritten, root);
    }

    #[test]
    fn test_replaceNode_shouldPreserveSiblingOrderAtEveryLevel() {
        let root = parse("- one\n- two\n- three\n");
        let leaves = TextLeafCollector::collect(&root);
        let (target_id, _) = leaves[1];
        let list = &root.children()[0];
        let leaf = &list.children()[1].children()[0];
        let replacement = leaf.with_text("TWO".to_string()).unwrap();

        let rewritten = replace_node(&root, target_id, &replacement);
        assert_eq!(format(&rewritten), "- one\n- TWO\n- three");

        let new_list = &rewritten.children()[0];
        assert_eq!(new_list.children().len(), 3);
        assert_eq!(new_list.id(), list.id());
    }

    #[test]
    fn test_replaceNode_replacementKeepsId_shouldStayAddressable() {
        let root = parse("word\n");
        let leaves = TextLeafCollector::collect(&root);
        let (id, _) = leaves[0];
        let leaf = &root.children()[0].children()[0];

        let first = replace_node(&root, id, &leaf.with_text("once".to_string()).unwrap());
        let second_leaf = &first.children()[0].children()[0];
        let second = replace_node(
            &first,
            id,
            &second_leaf.with_text("twice".to_string()).unwrap(),
        );

        assert_eq!(format(&second), "twice");
    }
}
