/*!
 * Streaming translation driver.
 *
 * Drives a full-document translation by walking the tree with the
 * suspending rewriter, calling the provider once per text leaf in
 * document order, splicing each replacement back via the tree rewriter
 * and emitting a snapshot of the whole tree after every applied leaf.
 *
 * Snapshots are delivered through a bounded channel wrapped in a
 * [`futures::Stream`]; dropping the stream cancels the session
 * cooperatively. Element k of the stream has leaves `[0, k]` translated
 * and the rest still in the source language.
 */

use async_trait::async_trait;
use futures::Stream;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use crate::document::{AsyncMarkupRewriter, Node, TextLeafCollector, replace_node};
use crate::errors::TranslationError;
use crate::providers::TranslationProvider;
use crate::translation::session::{SessionHandle, SessionState};

/// Snapshots buffered before the producer starts waiting on the consumer
const SNAPSHOT_BUFFER: usize = 16;

/// Translation driver owning a provider and at most one running session.
///
/// Starting a new snapshot stream supersedes any session still running
/// for this translator: the previous session observes cancellation
/// before its next provider call.
#[derive(Debug)]
pub struct MarkdownTranslator<P> {
    provider: Arc<P>,
    active: Mutex<Option<SessionHandle>>,
}

impl<P: TranslationProvider + 'static> MarkdownTranslator<P> {
    /// Create a driver around a translation provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            active: Mutex::new(None),
        }
    }

    /// The session currently registered with this driver, if any.
    pub fn active_session(&self) -> Option<SessionHandle> {
        self.active.lock().clone()
    }

    /// Translate a whole document in one pass and return the final tree.
    ///
    /// With a provider that returns every input unchanged the result is
    /// value-equal to the input tree.
    pub async fn translate_document(&self, root: &Node) -> Result<Node, TranslationError> {
        let handle = SessionHandle::new(TextLeafCollector::collect(root).len());
        handle.set_state(SessionState::Running);
        let mut rewriter = TranslationRewriter {
            provider: Arc::clone(&self.provider),
            root: root.clone(),
            tx: None,
            handle: handle.clone(),
        };
        let result = rewriter.visit(root).await;
        match &result {
            Ok(_) => handle.set_state(SessionState::Completed),
            Err(e) if e.is_cancelled() => handle.set_state(SessionState::Cancelled),
            Err(_) => handle.set_state(SessionState::Failed),
        }
        result
    }

    /// Start a streaming translation session over `root`.
    ///
    /// The returned stream yields one full-tree snapshot per applied
    /// leaf, in document order; a leaf whose translation equals its
    /// source text advances the session without a snapshot. Dropping the
    /// stream cancels the session cleanly.
    pub fn translate_stream(&self, root: Node) -> TranslationStream {
        let total_leaves = TextLeafCollector::collect(&root).len();
        let handle = SessionHandle::new(total_leaves);

        // Exclusivity: a newly started session supersedes the previous one
        if let Some(previous) = self.active.lock().replace(handle.clone()) {
            if previous.state() == SessionState::Running {
                warn!("Superseding a running translation session");
                previous.cancel();
            }
        }

        let (tx, rx) = mpsc::channel(SNAPSHOT_BUFFER);
        handle.set_state(SessionState::Running);
        info!("Translation session started: {} text leaves", total_leaves);

        let provider = Arc::clone(&self.provider);
        let task_handle = handle.clone();
        tokio::spawn(async move {
            let mut rewriter = TranslationRewriter {
                provider,
                root: root.clone(),
                tx: Some(tx.clone()),
                handle: task_handle.clone(),
            };
            match rewriter.visit(&root).await {
                Ok(_) => {
                    let progress = task_handle.progress();
                    info!(
                        "Translation session completed: {}/{} leaves, {} snapshots",
                        progress.translated_leaves,
                        progress.total_leaves,
                        progress.snapshots_emitted
                    );
                    task_handle.set_state(SessionState::Completed);
                }
                Err(e) if e.is_cancelled() => {
                    debug!("Translation session cancelled by consumer");
                    task_handle.set_state(SessionState::Cancelled);
                }
                Err(e) => {
                    warn!("Translation session failed: {}", e);
                    let _ = tx.send(Err(e)).await;
                    task_handle.set_state(SessionState::Failed);
                }
            }
        });

        TranslationStream { rx, handle }
    }
}

/// Suspending rewriter that translates text leaves one at a time.
///
/// `root` is the session's current snapshot; every applied leaf produces
/// the next snapshot via [`replace_node`] keyed on the leaf identity.
struct TranslationRewriter<P> {
    provider: Arc<P>,
    root: Node,
    tx: Option<mpsc::Sender<Result<Node, TranslationError>>>,
    handle: SessionHandle,
}

impl<P: TranslationProvider> TranslationRewriter<P> {
    fn cancelled(&self) -> bool {
        if self.handle.is_cancelled() {
            return true;
        }
        self.tx.as_ref().is_some_and(|tx| tx.is_closed())
    }

    async fn emit(&mut self) -> Result<(), TranslationError> {
        if let Some(tx) = &self.tx {
            if tx.send(Ok(self.root.clone())).await.is_err() {
                return Err(TranslationError::Cancelled);
            }
            self.handle.snapshot_emitted();
        }
        Ok(())
    }
}

#[async_trait]
impl<P: TranslationProvider> AsyncMarkupRewriter for TranslationRewriter<P> {
    type Error = TranslationError;

    async fn visit_text(&mut self, node: &Node) -> Result<Node, TranslationError> {
        // Cooperative cancellation point, checked before every call
        if self.cancelled() {
            return Err(TranslationError::Cancelled);
        }
        let Some(source) = node.text() else {
            return Ok(node.clone());
        };
        debug!("Translating leaf {} ({} chars)", node.id(), source.len());
        let translated = self.provider.translate(source).await?;
        self.handle.leaf_translated();

        // Skip rule: identical output advances the cursor silently
        if translated == source {
            return Ok(node.clone());
        }

        let replacement = node
            .with_text(translated)
            .unwrap_or_else(|| node.clone());
        self.root = replace_node(&self.root, node.id(), &replacement);
        self.emit().await?;
        Ok(replacement)
    }
}

/// Ordered, cancellable stream of document snapshots.
///
/// The stream is finite (at most one element per text leaf) and not
/// restartable; dropping it signals cancellation to the producer.
pub struct TranslationStream {
    rx: mpsc::Receiver<Result<Node, TranslationError>>,
    handle: SessionHandle,
}

impl TranslationStream {
    /// Handle observing the session driving this stream.
    pub fn session(&self) -> &SessionHandle {
        &self.handle
    }

    /// Explicitly cancel the session without dropping the stream.
    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

impl Stream for TranslationStream {
    type Item = Result<Node, TranslationError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for TranslationStream {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}
