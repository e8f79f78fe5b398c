//! Turn driver: enrich, infer, gate, rewrite once, normalize, format.

use std::sync::Arc;

use chatgate_core::config::ReplyConfig;
use chatgate_core::context::PromptContext;
use chatgate_core::message::InferenceOutput;
use chatgate_core::traits::Inference;
use tracing::{debug, info, warn};

use crate::current_events::normalize_current_events;
use crate::format::{format_reply, ReplyParts};
use crate::intro::IntroRotation;
use crate::keywords::{is_current_events, is_intro_request};
use crate::prompt::{enrich_prompt, EnrichOptions};
use crate::quality::evaluate_reply;
use crate::rewrite::RewriteAttempt;
use crate::{SAFE_FALLBACK, UNSTABLE_MODEL_REPLY};

/// Call the provider; a failed call becomes the unstable-model draft, which
/// the quality gate rejects like any other defective answer.
pub(crate) async fn infer_or_sentinel(
    inference: &dyn Inference,
    prompt: &str,
    use_grounding: bool,
) -> InferenceOutput {
    match inference.infer(prompt, use_grounding).await {
        Ok(output) => output,
        Err(e) => {
            warn!("inference via {} failed: {e}", inference.name());
            InferenceOutput::text(UNSTABLE_MODEL_REPLY)
        }
    }
}

/// Produces chat replies for one assistant.
///
/// Stateless between turns apart from the intro rotation.
pub struct ReplyPipeline {
    inference: Arc<dyn Inference>,
    intro: IntroRotation,
}

impl ReplyPipeline {
    pub fn new(inference: Arc<dyn Inference>) -> Self {
        Self {
            inference,
            intro: IntroRotation::new(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.inference.name()
    }

    /// Answer `prompt` from `author` given a snapshot of the channel context.
    ///
    /// Inference runs at most twice: the first draft and, if the quality
    /// gate rejects it, a single rewrite. A rewrite that is rejected too is
    /// replaced by the safe fallback.
    pub async fn generate_reply(
        &self,
        prompt: &str,
        author: &str,
        context: &PromptContext,
        config: &ReplyConfig,
    ) -> ReplyParts {
        let prompt = prompt.trim();
        if prompt.is_empty() || is_intro_request(prompt) {
            info!("reply: intro requested by {author}, skipping inference");
            return ReplyParts::single(self.intro.next_intro());
        }

        let anchor = context.time_anchor();
        let current = is_current_events(prompt);
        let use_grounding = config.grounding && current;
        let enriched = enrich_prompt(prompt, author, context, EnrichOptions::from_config(config));

        let draft = infer_or_sentinel(self.inference.as_ref(), &enriched, use_grounding).await;
        let verdict = evaluate_reply(prompt, &draft.text);
        debug!("reply: first draft verdict {}", verdict.reason);

        let (text, grounding) = if verdict.passed {
            (draft.text, draft.grounding)
        } else {
            warn!("reply: draft rejected ({})", verdict.reason);
            let attempt = RewriteAttempt::new(prompt, &draft.text, verdict.reason);
            let rewrite = attempt
                .run(self.inference.as_ref(), Some(&anchor), use_grounding)
                .await;
            let second = evaluate_reply(prompt, &rewrite.text);
            if second.passed {
                info!("reply: rewrite accepted");
                (rewrite.text, rewrite.grounding)
            } else {
                warn!("reply: rewrite rejected ({}), using fallback", second.reason);
                (SAFE_FALLBACK.to_string(), rewrite.grounding)
            }
        };

        let normalized =
            normalize_current_events(prompt, &text, Some(&anchor), grounding.as_ref());
        format_reply(&normalized)
    }
}
