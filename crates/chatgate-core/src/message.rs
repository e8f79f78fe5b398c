use serde::{Deserialize, Serialize};

/// Cap applied to the query and source lists carried in grounding metadata.
pub const MAX_GROUNDING_ITEMS: usize = 3;

/// Web-search evidence reported by the inference provider.
///
/// Counts reflect everything the provider saw; the lists keep at most
/// [`MAX_GROUNDING_ITEMS`] distinct entries each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingMetadata {
    /// Whether grounding was requested for this call.
    pub enabled: bool,
    /// Whether any evidence came back.
    pub has_signal: bool,
    pub query_count: usize,
    pub source_count: usize,
    /// Citation chunks the answer was grounded on.
    pub chunk_count: usize,
    #[serde(default)]
    pub web_search_queries: Vec<String>,
    #[serde(default)]
    pub source_urls: Vec<String>,
}

impl GroundingMetadata {
    /// Build metadata for a grounded call from the raw evidence lists.
    pub fn from_evidence(queries: Vec<String>, urls: Vec<String>, chunk_count: usize) -> Self {
        let queries = distinct_non_empty(queries);
        let urls = distinct_non_empty(urls);
        let query_count = queries.len();
        let source_count = urls.len();

        Self {
            enabled: true,
            has_signal: query_count > 0 || source_count > 0 || chunk_count > 0,
            query_count,
            source_count,
            chunk_count,
            web_search_queries: queries.into_iter().take(MAX_GROUNDING_ITEMS).collect(),
            source_urls: urls.into_iter().take(MAX_GROUNDING_ITEMS).collect(),
        }
    }

    /// Grounding was requested but nothing came back: no queries, no
    /// sources, no chunks.
    pub fn lacks_evidence(&self) -> bool {
        self.enabled
            && !self.has_signal
            && self.query_count == 0
            && self.source_count == 0
            && self.chunk_count == 0
    }
}

fn distinct_non_empty(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_string();
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// One completion returned by the inference provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferenceOutput {
    pub text: String,
    /// Present only when grounding was requested.
    #[serde(default)]
    pub grounding: Option<GroundingMetadata>,
    /// Model identifier (if applicable).
    #[serde(default)]
    pub model: Option<String>,
    /// Wall-clock processing time in milliseconds.
    #[serde(default)]
    pub processing_time_ms: u64,
}

impl InferenceOutput {
    /// Plain text output without grounding.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_grounding(mut self, grounding: GroundingMetadata) -> Self {
        self.grounding = Some(grounding);
        self
    }
}
