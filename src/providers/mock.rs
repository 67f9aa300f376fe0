/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock translators that simulate different behaviors:
 * - `MockTranslator::bracketed()` - marks every leaf as translated
 * - `MockTranslator::identity()` - returns the input unchanged
 * - `MockTranslator::fail_after(n)` - succeeds n times, then errors
 * - `MockTranslator::uppercase()` - uppercases the input
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Wrap the input in a translation marker
    Bracketed,
    /// Return the input unchanged (exercises the skip rule)
    Identity,
    /// Uppercase the input
    Uppercase,
    /// Succeed for the first `n` calls, then fail every call
    FailAfter(usize),
    /// Fail every call
    Failing,
}

/// Mock translator for testing driver behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate calls issued so far
    call_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock that marks every leaf as translated
    pub fn bracketed() -> Self {
        Self::new(MockBehavior::Bracketed)
    }

    /// Mock that returns its input unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Mock that uppercases its input
    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    /// Mock that succeeds `n` times and then fails
    pub fn fail_after(n: usize) -> Self {
        Self::new(MockBehavior::FailAfter(n))
    }

    /// Mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of translate calls this mock has received
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter, for asserting after a stream
    /// consumed the translator.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
        }
    }
}

#[async_trait]
impl TranslationProvider for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Bracketed => Ok(format!("[訳] {text}")),
            MockBehavior::Identity => Ok(text.to_string()),
            MockBehavior::Uppercase => Ok(text.to_uppercase()),
            MockBehavior::FailAfter(n) if count < n => Ok(format!("[訳] {text}")),
            MockBehavior::FailAfter(_) | MockBehavior::Failing => {
                Err(ProviderError::RequestFailed("mock failure".to_string()))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => {
                Err(ProviderError::ConnectionError("mock is failing".to_string()))
            }
            _ => Ok(()),
        }
    }
}
