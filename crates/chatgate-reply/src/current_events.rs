//! Verifiable current-events contract.
//!
//! Accepted current-events answers get a temporal anchor; high-risk ones also
//! get a clamped `Confianca: media` and a `Fonte:` line rebuilt from the
//! grounding evidence. Whatever cannot be verified collapses into the
//! canonical fallback block.

use chatgate_core::message::GroundingMetadata;
use chatgate_core::text::{char_len, compact_message, non_empty_lines, preview};
use tracing::debug;

use crate::keywords::{
    has_temporal_anchor, has_uncertainty, is_current_events, is_high_risk, is_label_line,
};
use crate::{
    MAX_REPLY_LENGTH, MAX_REPLY_LINES, MULTIPART_SEPARATOR, PENDING_SOURCE_LINE, SAFE_FALLBACK,
};

/// Used in `Recorte temporal:` when the caller has no server-time anchor.
pub const DEFAULT_TEMPORAL_ANCHOR: &str = "agora (UTC)";

/// Source line when grounding brought neither hosts nor queries.
pub const DEFAULT_SOURCE_LINE: &str = "Fonte: busca web em tempo real";

/// Confidence forced on accepted high-risk answers.
pub const CLAMPED_CONFIDENCE_LINE: &str = "Confianca: media";

/// Hostnames listed in a rebuilt source line.
const MAX_SOURCE_HOSTS: usize = 2;
/// Chars kept from a search query quoted in a source line.
const SOURCE_QUERY_PREVIEW_LEN: usize = 80;
/// Below this many chars a body line is dropped instead of compacted.
const MIN_COMPACTED_LINE: usize = 24;

/// `Recorte temporal: <anchor>.`
pub fn temporal_line(time_anchor: Option<&str>) -> String {
    let anchor = time_anchor
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_TEMPORAL_ANCHOR);
    format!("Recorte temporal: {}.", anchor.trim_end_matches('.'))
}

/// The canonical safe-fallback block: fallback sentence, temporal line,
/// `Confianca: baixa` and the pending-source line.
pub fn canonical_fallback(time_anchor: Option<&str>) -> String {
    format!(
        "{SAFE_FALLBACK}\n{}\nConfianca: baixa\n{PENDING_SOURCE_LINE}",
        temporal_line(time_anchor)
    )
}

fn host_of(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw.trim()).ok()?;
    let host = parsed.host_str()?;
    Some(host.trim_start_matches("www.").to_string())
}

/// Rebuild the `Fonte:` line from grounding: up to two distinct hostnames,
/// else the first search query, else the default real-time search source.
pub fn source_line(grounding: Option<&GroundingMetadata>) -> String {
    let Some(grounding) = grounding else {
        return DEFAULT_SOURCE_LINE.to_string();
    };

    let mut hosts: Vec<String> = Vec::new();
    for host in grounding.source_urls.iter().filter_map(|u| host_of(u)) {
        if !hosts.contains(&host) {
            hosts.push(host);
        }
        if hosts.len() == MAX_SOURCE_HOSTS {
            break;
        }
    }
    if !hosts.is_empty() {
        return format!("Fonte: {}", hosts.join(", "));
    }

    if let Some(query) = grounding
        .web_search_queries
        .iter()
        .map(|q| q.trim())
        .find(|q| !q.is_empty())
    {
        return format!(
            "Fonte: busca web por \"{}\"",
            preview(query, SOURCE_QUERY_PREVIEW_LEN)
        );
    }

    DEFAULT_SOURCE_LINE.to_string()
}

/// Body lines of a draft that is about to carry annotations. Separators
/// become line breaks so the annotations cannot land in a dropped part.
fn body_lines(answer: &str) -> Vec<String> {
    non_empty_lines(&answer.replace(MULTIPART_SEPARATOR, "\n"))
}

/// Keep whole body lines while they fit; compact the first one that does not
/// (if enough room is left) and drop the rest.
fn fit_lines(lines: &[String], max_lines: usize, max_chars: usize) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut used = 0;

    for line in lines.iter().take(max_lines) {
        let sep = usize::from(!kept.is_empty());
        let remaining = max_chars.saturating_sub(used + sep);
        let len = char_len(line);
        if len <= remaining {
            used += sep + len;
            kept.push(line.clone());
            continue;
        }
        if remaining >= MIN_COMPACTED_LINE {
            kept.push(compact_message(line, remaining));
        }
        break;
    }

    kept.join("\n")
}

/// Fit `body` plus trailing `annotations` into the reply budget. Annotations
/// are kept verbatim; the body absorbs every cut.
fn fit_with_annotations(body: &[String], annotations: &[String]) -> String {
    let reserved_chars: usize = annotations.iter().map(|a| char_len(a) + 1).sum();
    let line_budget = MAX_REPLY_LINES.saturating_sub(annotations.len());
    let char_budget = MAX_REPLY_LENGTH.saturating_sub(reserved_chars);

    let mut text = fit_lines(body, line_budget, char_budget);
    if text.is_empty() && !body.is_empty() && line_budget > 0 {
        text = compact_message(&body.join(" "), char_budget);
    }
    if char_len(&text) > char_budget {
        text = text.chars().take(char_budget).collect();
    }

    let mut out: Vec<String> = Vec::with_capacity(annotations.len() + 1);
    if !text.trim().is_empty() {
        out.push(text);
    }
    out.extend(annotations.iter().cloned());
    out.join("\n")
}

/// Apply the current-events contract to a draft (accepted or fallback).
///
/// Prompts that are not current events pass through untouched. For
/// high-risk prompts an uncertain draft, or grounding that came back empty,
/// yields the canonical fallback; otherwise any confidence the draft
/// declared is replaced by `Confianca: media`.
pub fn normalize_current_events(
    prompt: &str,
    answer: &str,
    time_anchor: Option<&str>,
    grounding: Option<&GroundingMetadata>,
) -> String {
    if !is_current_events(prompt) {
        return answer.to_string();
    }

    let high_risk = is_high_risk(prompt);
    let uncertain = has_uncertainty(answer);
    let anchored = has_temporal_anchor(answer);
    let grounding = grounding.filter(|g| g.enabled);

    if high_risk && uncertain {
        debug!("current events: high-risk draft is uncertain, using canonical fallback");
        return canonical_fallback(time_anchor);
    }
    if high_risk && grounding.is_some_and(GroundingMetadata::lacks_evidence) {
        debug!("current events: grounding returned no evidence, using canonical fallback");
        return canonical_fallback(time_anchor);
    }

    let temporal = (!anchored && !uncertain).then(|| temporal_line(time_anchor));

    if !high_risk {
        return match temporal {
            Some(line) => fit_with_annotations(&body_lines(answer), &[line]),
            None => answer.to_string(),
        };
    }

    let body: Vec<String> = body_lines(answer)
        .into_iter()
        .filter(|l| !is_label_line(l, "confianca") && !is_label_line(l, "fonte"))
        .collect();

    let mut annotations: Vec<String> = Vec::with_capacity(3);
    annotations.extend(temporal);
    annotations.push(CLAMPED_CONFIDENCE_LINE.to_string());
    annotations.push(source_line(grounding));

    fit_with_annotations(&body, &annotations)
}
