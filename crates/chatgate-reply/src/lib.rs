//! # chatgate-reply
//!
//! Reply quality gate and current-events verification for chatgate.
//!
//! A turn flows through [`prompt::enrich_prompt`], the inference provider,
//! [`quality::evaluate_reply`], at most one [`rewrite::RewriteAttempt`],
//! [`current_events::normalize_current_events`] and finally
//! [`format::format_reply`]. [`pipeline::ReplyPipeline`] drives the whole turn.

pub mod current_events;
pub mod format;
pub mod intro;
pub mod keywords;
mod keywords_data;
pub mod pipeline;
pub mod prompt;
pub mod quality;
pub mod rewrite;

pub use format::{format_reply, ReplyParts};
pub use pipeline::ReplyPipeline;
pub use quality::{evaluate_reply, QualityVerdict, ReasonCode};

/// Max chars in one chat message.
pub const MAX_REPLY_LENGTH: usize = 460;

/// Max non-empty lines in one chat message.
pub const MAX_REPLY_LINES: usize = 8;

/// The one sentence allowed when a fact cannot be verified.
pub const SAFE_FALLBACK: &str = "Nao tenho confirmacao confiavel dessa informacao agora.";

/// Source line of the canonical fallback block.
pub const PENDING_SOURCE_LINE: &str =
    "Fonte: pendente de confirmacao (me envie um link oficial para eu checar).";

/// Token the model may use to ask for a reply split into two messages.
pub const MULTIPART_SEPARATOR: &str = "[[PARTE2]]";

/// Folded marker the quality gate looks for in failed-inference drafts.
pub const UNSTABLE_MODEL_MARKER: &str = "modelo instavel";

/// Draft substituted when the inference call fails.
pub const UNSTABLE_MODEL_REPLY: &str = "Modelo instavel no momento, tenta de novo em instantes.";
