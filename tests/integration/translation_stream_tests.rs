/*!
 * End-to-end tests for the streaming translation driver.
 *
 * These drive full documents through [`MarkdownTranslator`] with mock
 * providers and assert the snapshot ordering, skip, failure and
 * cancellation contracts.
 */

use futures::StreamExt;
use std::sync::atomic::Ordering;
use std::time::Duration;

use propdoc::document::parse;
use propdoc::providers::MockTranslator;
use propdoc::translation::{MarkdownTranslator, SessionState};

use crate::common;

/// Assert that exactly the first `translated` leaves of `snapshot` carry
/// the bracketed marker and the rest still match the source document.
fn assert_prefix_translated(snapshot: &propdoc::Node, source_texts: &[String], translated: usize) {
    let texts = common::leaf_texts(snapshot);
    assert_eq!(texts.len(), source_texts.len());
    for (offset, (text, source)) in texts.iter().zip(source_texts).enumerate() {
        if offset < translated {
            assert_eq!(text, &format!("[訳] {source}"), "leaf {offset}");
        } else {
            assert_eq!(text, source, "leaf {offset}");
        }
    }
}

#[tokio::test]
async fn test_translateStream_bracketedProvider_shouldEmitOneOrderedSnapshotPerLeaf() {
    let root = common::sample_document();
    let source_texts = common::leaf_texts(&root);
    let translator = MarkdownTranslator::new(MockTranslator::bracketed());

    let mut stream = translator.translate_stream(root);
    let mut snapshots = Vec::new();
    while let Some(item) = stream.next().await {
        snapshots.push(item.expect("bracketed provider never fails"));
    }

    // One snapshot per text leaf, each extending the translated prefix
    assert_eq!(snapshots.len(), source_texts.len());
    for (offset, snapshot) in snapshots.iter().enumerate() {
        assert_prefix_translated(snapshot, &source_texts, offset + 1);
    }
    assert_eq!(stream.session().state(), SessionState::Completed);

    let progress = stream.session().progress();
    assert_eq!(progress.translated_leaves, source_texts.len());
    assert_eq!(progress.snapshots_emitted, source_texts.len());
}

#[tokio::test]
async fn test_translateStream_identityProvider_shouldEmitNothing() {
    let root = common::sample_document();
    let total = common::leaf_texts(&root).len();
    let translator = MarkdownTranslator::new(MockTranslator::identity());

    let mut stream = translator.translate_stream(root);
    assert!(stream.next().await.is_none());
    assert_eq!(stream.session().state(), SessionState::Completed);

    // Every leaf was processed, none produced a snapshot
    let progress = stream.session().progress();
    assert_eq!(progress.translated_leaves, total);
    assert_eq!(progress.snapshots_emitted, 0);
}

#[tokio::test]
async fn test_translateDocument_identityProvider_shouldReturnValueEqualTree() {
    let root = common::sample_document();
    let translator = MarkdownTranslator::new(MockTranslator::identity());
    let translated = translator
        .translate_document(&root)
        .await
        .expect("identity provider never fails");
    assert_eq!(translated, root);
}

#[tokio::test]
async fn test_translateStream_failingProvider_shouldEmitPrefixThenError() {
    let root = common::numbered_document(10);
    let source_texts = common::leaf_texts(&root);
    let mock = MockTranslator::fail_after(3);
    let counter = mock.call_counter();
    let translator = MarkdownTranslator::new(mock);

    let mut stream = translator.translate_stream(root);
    let mut snapshots = Vec::new();
    let mut error = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) => {
                error = Some(e);
                break;
            }
        }
    }

    // Snapshots for leaves 0..3, then the failure, then nothing
    assert_eq!(snapshots.len(), 3);
    assert_prefix_translated(&snapshots[2], &source_texts, 3);
    let error = error.expect("stream must surface the provider error");
    assert!(!error.is_cancelled());
    assert!(stream.next().await.is_none());
    assert_eq!(stream.session().state(), SessionState::Failed);

    // The failing call itself was the fourth and last
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_translateStream_droppedEarly_shouldStopCallingProvider() {
    // More leaves than the channel buffers, so the producer has to wait
    // on the consumer well before the end of the document
    let root = common::numbered_document(30);
    let source_texts = common::leaf_texts(&root);
    let mock = MockTranslator::bracketed();
    let counter = mock.call_counter();
    let translator = MarkdownTranslator::new(mock);

    let mut stream = translator.translate_stream(root);
    let first = stream.next().await.expect("first snapshot").expect("ok");
    let second = stream.next().await.expect("second snapshot").expect("ok");
    assert_prefix_translated(&first, &source_texts, 1);
    assert_prefix_translated(&second, &source_texts, 2);

    let session = stream.session().clone();
    drop(stream);

    // Give the producer a moment to observe the closed channel
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(session.is_cancelled());
    assert_eq!(session.state(), SessionState::Cancelled);
    assert!(
        counter.load(Ordering::SeqCst) < 30,
        "producer kept translating after cancellation"
    );
}

#[tokio::test]
async fn test_translateStream_secondSession_shouldSupersedeFirst() {
    let translator = MarkdownTranslator::new(MockTranslator::bracketed());

    let first = translator.translate_stream(common::numbered_document(30));
    let second = translator.translate_stream(common::numbered_document(3));

    // Starting the second session cancels the first before its next call
    assert!(first.session().is_cancelled());
    assert!(!second.session().is_cancelled());

    let snapshots: Vec<_> = second.collect().await;
    assert_eq!(snapshots.len(), 3);
    assert!(snapshots.into_iter().all(|item| item.is_ok()));
}

#[tokio::test]
async fn test_translateStream_emptyDocument_shouldCompleteImmediately() {
    let translator = MarkdownTranslator::new(MockTranslator::bracketed());
    let mut stream = translator.translate_stream(parse(""));
    assert!(stream.next().await.is_none());
    assert_eq!(stream.session().state(), SessionState::Completed);
    assert_eq!(stream.session().progress().percent(), 100.0);
}

#[tokio::test]
async fn test_translateStream_codeOnlyDocument_shouldLeaveCodeUntouched() {
    let root = parse("```swift\nlet answer = 42\n```\n");
    let mock = MockTranslator::bracketed();
    let counter = mock.call_counter();
    let translator = MarkdownTranslator::new(mock);

    let mut stream = translator.translate_stream(root);
    assert!(stream.next().await.is_none());
    assert_eq!(stream.session().state(), SessionState::Completed);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}
