/*!
 * Provider implementations for external translation services.
 *
 * The translation driver only ever sees the [`TranslationProvider`]
 * trait: one string in, one string out, invoked once per text leaf.
 * Implementations:
 * - `http`: JSON-over-HTTP client for a LibreTranslate-style endpoint
 * - `mock`: configurable test double
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the translation
/// driver. Timeouts are the provider's responsibility; the driver treats a
/// timed-out call like any other failure.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate a single string of prose
    ///
    /// # Arguments
    /// * `text` - The source text of one leaf
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the provider is reachable
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod http;
pub mod mock;

pub use http::HttpTranslator;
pub use mock::{MockBehavior, MockTranslator};
