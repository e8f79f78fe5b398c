use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};

use crate::text::preview;

/// Chat excerpts kept per channel.
pub const MAX_RECENT_CHAT: usize = 12;

/// Chars kept from each chat excerpt.
pub const CHAT_PREVIEW_LEN: usize = 140;

/// Kind of content the channel is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Game,
    Movie,
    Series,
    Video,
    Post,
    Topic,
}

impl ContentKind {
    /// Label used inside prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Game => "jogo",
            Self::Movie => "filme",
            Self::Series => "serie",
            Self::Video => "video",
            Self::Post => "post",
            Self::Topic => "tema",
        }
    }

    /// Parse an admin-command argument (English or Portuguese).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "game" | "jogo" => Some(Self::Game),
            "movie" | "filme" => Some(Self::Movie),
            "series" | "serie" | "série" => Some(Self::Series),
            "video" | "vídeo" => Some(Self::Video),
            "post" => Some(Self::Post),
            "topic" | "tema" | "assunto" => Some(Self::Topic),
            _ => None,
        }
    }
}

/// A single line of recent chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExcerpt {
    pub author: String,
    /// Already compacted to [`CHAT_PREVIEW_LEN`].
    pub text: String,
}

/// What the assistant knows about a channel when a prompt arrives.
///
/// The reply pipeline reads a snapshot; only [`ContextStore`] mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptContext {
    /// Free-text mood of the channel ("chat animado", "clima tenso").
    #[serde(default)]
    pub vibe: String,
    /// When the current stream went live.
    #[serde(default)]
    pub live_since: Option<DateTime<Utc>>,
    /// Oldest first, at most [`MAX_RECENT_CHAT`].
    #[serde(default)]
    pub recent_chat: VecDeque<ChatExcerpt>,
    #[serde(default)]
    pub last_bot_reply: Option<String>,
    #[serde(default)]
    pub style_profile: String,
    #[serde(default)]
    pub observability: BTreeMap<ContentKind, String>,
    /// Server UTC clock at snapshot time.
    pub clock: DateTime<Utc>,
}

impl Default for PromptContext {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl PromptContext {
    /// Empty context pinned to `clock`.
    pub fn new(clock: DateTime<Utc>) -> Self {
        Self {
            vibe: String::new(),
            live_since: None,
            recent_chat: VecDeque::with_capacity(MAX_RECENT_CHAT),
            last_bot_reply: None,
            style_profile: String::new(),
            observability: BTreeMap::new(),
            clock,
        }
    }

    /// Append a chat line, evicting the oldest beyond [`MAX_RECENT_CHAT`].
    pub fn push_chat(&mut self, author: &str, text: &str) {
        let text = preview(text, CHAT_PREVIEW_LEN);
        if text.is_empty() {
            return;
        }
        if self.recent_chat.len() == MAX_RECENT_CHAT {
            self.recent_chat.pop_front();
        }
        self.recent_chat.push_back(ChatExcerpt {
            author: author.trim().to_string(),
            text,
        });
    }

    /// The last `n` chat excerpts, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ChatExcerpt> {
        let skip = self.recent_chat.len().saturating_sub(n);
        self.recent_chat.iter().skip(skip)
    }

    /// "2h 05min" since the stream went live, if it is live.
    pub fn uptime_label(&self) -> Option<String> {
        let since = self.live_since?;
        let minutes = (self.clock - since).num_minutes().max(0);
        Some(format!("{}h {:02}min", minutes / 60, minutes % 60))
    }

    /// Server-time anchor used in temporal annotations.
    pub fn time_anchor(&self) -> String {
        self.clock.format("%d/%m/%Y %H:%M UTC").to_string()
    }
}

/// Keyed store of per-channel contexts.
///
/// Chat ingestion and admin commands write here; the reply pipeline only
/// receives cloned snapshots, so no lock is ever held across inference.
#[derive(Debug, Default)]
pub struct ContextStore {
    channels: RwLock<HashMap<String, PromptContext>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only copy of a channel's context with its clock set to `now`.
    ///
    /// Unknown channels yield an empty context.
    pub fn snapshot(&self, channel: &str, now: DateTime<Utc>) -> PromptContext {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        let mut ctx = channels
            .get(channel)
            .cloned()
            .unwrap_or_else(|| PromptContext::new(now));
        ctx.clock = now;
        ctx
    }

    fn update(&self, channel: &str, f: impl FnOnce(&mut PromptContext)) {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        let ctx = channels
            .entry(channel.to_string())
            .or_insert_with(|| PromptContext::new(Utc::now()));
        f(ctx);
    }

    pub fn ingest_chat(&self, channel: &str, author: &str, text: &str) {
        self.update(channel, |ctx| ctx.push_chat(author, text));
    }

    pub fn record_bot_reply(&self, channel: &str, reply: &str) {
        let reply = reply.trim();
        if reply.is_empty() {
            return;
        }
        self.update(channel, |ctx| ctx.last_bot_reply = Some(reply.to_string()));
    }

    pub fn set_vibe(&self, channel: &str, vibe: &str) {
        self.update(channel, |ctx| ctx.vibe = vibe.trim().to_string());
    }

    pub fn set_style_profile(&self, channel: &str, profile: &str) {
        self.update(channel, |ctx| ctx.style_profile = profile.trim().to_string());
    }

    pub fn set_observability(&self, channel: &str, kind: ContentKind, description: &str) {
        let description = description.trim().to_string();
        self.update(channel, |ctx| {
            if description.is_empty() {
                ctx.observability.remove(&kind);
            } else {
                ctx.observability.insert(kind, description);
            }
        });
    }

    pub fn clear_observability(&self, channel: &str, kind: ContentKind) {
        self.update(channel, |ctx| {
            ctx.observability.remove(&kind);
        });
    }

    /// Mark the channel live since `since`, or offline with `None`.
    pub fn mark_live(&self, channel: &str, since: Option<DateTime<Utc>>) {
        self.update(channel, |ctx| ctx.live_since = since);
    }

    /// Known channel ids, sorted.
    pub fn channels(&self) -> Vec<String> {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = channels.keys().cloned().collect();
        names.sort();
        names
    }
}
