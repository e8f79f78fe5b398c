use crate::{error::ChatgateError, message::InferenceOutput};
use async_trait::async_trait;

/// Inference collaborator: the LLM behind every reply.
///
/// The reply pipeline only ever sees this trait. Transport concerns
/// (timeouts, rate limits, token accounting) stay inside implementations.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Run one completion for an already-enriched prompt.
    ///
    /// When `use_grounding` is set the provider should attach web-search
    /// grounding and report what it found in [`InferenceOutput::grounding`].
    async fn infer(
        &self,
        prompt: &str,
        use_grounding: bool,
    ) -> Result<InferenceOutput, ChatgateError>;

    /// Check if the provider is reachable and configured.
    async fn is_available(&self) -> bool;
}
