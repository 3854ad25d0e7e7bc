use async_trait::async_trait;

use crate::error::Result;

/// Turns a stored document reference into plain text. May fail per call;
/// callers decide whether a failure is fatal (the synchronizer skips the
/// document, the reconciler never needs extraction).
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract_text(&self, content_ref: &str) -> Result<String>;
}
