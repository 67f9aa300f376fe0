/*!
 * Tests for link classification against documents and row anchors.
 */

use propdoc::links::{LinkAction, LinkClassifier, collect_links};
use propdoc::rows::rows;

use crate::common;

#[test]
fn test_collectLinks_sampleProposal_shouldFindBothLinks() {
    let root = common::sample_document();
    assert_eq!(
        collect_links(&root),
        vec!["#introduction", "0296-async-await.md"]
    );
}

#[test]
fn test_classify_sampleAnchorLink_shouldScrollToExistingRow() {
    let root = common::sample_document();
    let classifier = LinkClassifier::default();

    let action = classifier.classify("#introduction");
    let LinkAction::ScrollTo(fragment) = action else {
        panic!("anchor link should scroll");
    };
    // The scroll target is a row id of the same document
    assert!(rows(&root).iter().any(|row| row.id == fragment));
}

#[test]
fn test_classify_sampleRelativeLink_shouldShowSiblingProposal() {
    let classifier = LinkClassifier::default();
    match classifier.classify("0296-async-await.md") {
        LinkAction::ShowDocument { id, source_url } => {
            assert_eq!(id, "SE-0296");
            assert!(source_url.is_none());
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[test]
fn test_classify_everySampleLink_shouldNeverOpenExternally() {
    let root = common::sample_document();
    let classifier = LinkClassifier::default();
    for destination in collect_links(&root) {
        assert!(
            !matches!(
                classifier.classify(&destination),
                LinkAction::OpenExternal(_)
            ),
            "{destination} should stay in-app"
        );
    }
}

#[test]
fn test_withProject_customProject_shouldMatchItsOwnPaths() {
    let classifier =
        LinkClassifier::with_project("example.org", "rfc-archive", "RFC-").expect("valid project");

    match classifier.classify("https://example.org/team/rfc-archive/blob/main/docs/0042-naming.md")
    {
        LinkAction::ShowDocument { id, .. } => assert_eq!(id, "RFC-0042"),
        other => panic!("unexpected action: {other:?}"),
    }

    // The default project's host no longer matches
    assert!(matches!(
        classifier.classify(
            "https://github.com/apple/swift-evolution/blob/main/proposals/0042-naming.md"
        ),
        LinkAction::OpenExternal(_)
    ));
}
