//! Google Gemini API provider.
//!
//! Calls the Gemini `generateContent` endpoint. Auth via URL query param.
//! When grounding is requested the `google_search` tool is attached and the
//! response's grounding block is mapped into [`GroundingMetadata`].

use async_trait::async_trait;
use chatgate_core::{
    error::ChatgateError,
    message::{GroundingMetadata, InferenceOutput},
    traits::Inference,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Host Gemini uses for opaque grounding redirect links.
const GROUNDING_REDIRECT_HOST: &str = "vertexaisearch.cloud.google.com";

/// Google Gemini API provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Create from config values.
    pub fn from_config(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    grounding_metadata: Option<GeminiGrounding>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGrounding {
    #[serde(default)]
    web_search_queries: Vec<String>,
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

fn build_request(prompt: &str, use_grounding: bool) -> GeminiRequest {
    let tools = if use_grounding {
        vec![GeminiTool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: prompt.to_string(),
            }],
        }],
        tools,
    }
}

/// Source URL for a web chunk. Redirect links hide the publisher, so the
/// chunk title (which Gemini sets to the publisher's domain) is used instead.
fn chunk_source(chunk: &WebChunk) -> Option<String> {
    let host = url::Url::parse(&chunk.uri)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    match host.as_deref() {
        Some(GROUNDING_REDIRECT_HOST) | None => {
            let title = chunk.title.trim();
            (!title.is_empty()).then(|| format!("https://{title}"))
        }
        Some(_) => Some(chunk.uri.clone()),
    }
}

fn parse_grounding(grounding: &GeminiGrounding) -> GroundingMetadata {
    let urls: Vec<String> = grounding
        .grounding_chunks
        .iter()
        .filter_map(|c| c.web.as_ref())
        .filter_map(chunk_source)
        .collect();
    GroundingMetadata::from_evidence(
        grounding.web_search_queries.clone(),
        urls,
        grounding.grounding_chunks.len(),
    )
}

fn parse_response(parsed: &GeminiResponse, use_grounding: bool) -> (String, Option<GroundingMetadata>) {
    let candidate = parsed.candidates.as_ref().and_then(|c| c.first());

    let text = candidate
        .and_then(|c| c.content.as_ref())
        .map(|c| {
            c.parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    // A grounded request that came back without a grounding block found nothing.
    let grounding = use_grounding.then(|| {
        candidate
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(parse_grounding)
            .unwrap_or_else(|| GroundingMetadata::from_evidence(Vec::new(), Vec::new(), 0))
    });

    (text, grounding)
}

#[async_trait]
impl Inference for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn infer(
        &self,
        prompt: &str,
        use_grounding: bool,
    ) -> Result<InferenceOutput, ChatgateError> {
        let start = Instant::now();
        let body = build_request(prompt, use_grounding);

        let url = format!(
            "{GEMINI_BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        debug!(
            "gemini: POST models/{}:generateContent (grounding: {use_grounding})",
            self.model
        );

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatgateError::Provider(format!("gemini request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(ChatgateError::Provider(format!(
                "gemini returned {status}: {text}"
            )));
        }

        let parsed: GeminiResponse = resp.json().await.map_err(|e| {
            ChatgateError::Provider(format!("gemini: failed to parse response: {e}"))
        })?;

        let (text, grounding) = parse_response(&parsed, use_grounding);
        if let Some(g) = &grounding {
            debug!(
                "gemini: grounding queries={} sources={} chunks={}",
                g.query_count, g.source_count, g.chunk_count
            );
        }

        Ok(InferenceOutput {
            text,
            grounding,
            model: Some(self.model.clone()),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn is_available(&self) -> bool {
        if self.api_key.is_empty() {
            warn!("gemini: no API key configured");
            return false;
        }
        let url = format!("{GEMINI_BASE_URL}/models?key={}", self.api_key);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("gemini not available: {e}");
                false
            }
        }
    }
}
