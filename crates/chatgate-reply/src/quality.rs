//! Quality gate for draft answers.
//!
//! [`evaluate_reply`] runs an ordered list of checks and stops at the first
//! one that fires. The order decides which reason a draft with several
//! defects is rejected for, and the rewrite guidance follows that reason.

use chatgate_core::text::{char_len, fold_accents, fold_line, non_empty_lines};
use serde::Serialize;
use std::collections::HashSet;

use crate::keywords::{
    generic_hits, has_confidence_label, has_follow_up_offer, has_overconfidence,
    has_source_anchor, has_source_request, has_temporal_anchor, has_uncertainty,
    is_current_events, is_existence_question, is_follow_up, is_high_risk, is_label_line,
    opens_generic, takes_existence_position, STOP_WORDS,
};
use crate::{PENDING_SOURCE_LINE, SAFE_FALLBACK, UNSTABLE_MODEL_MARKER};

/// Prompts at least this long are "complex".
const COMPLEX_PROMPT_LEN: usize = 40;
/// Answers shorter than this are "short".
const SHORT_ANSWER_LEN: usize = 70;
/// Current-events prompts shorter than this skip the temporal-anchor check.
const MIN_ANCHORED_PROMPT_LEN: usize = 18;
/// High-risk answers at least this long must cite a source.
const MIN_SOURCED_ANSWER_LEN: usize = 120;
/// Prefix length for fuzzy focus-term matching.
const PREFIX_MATCH_LEN: usize = 5;

/// Why a draft was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReasonCode {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "resposta_vazia")]
    Empty,
    #[serde(rename = "modelo_indisponivel")]
    ModelUnavailable,
    #[serde(rename = "resposta_generica")]
    Generic,
    #[serde(rename = "abertura_generica")]
    GenericOpening,
    #[serde(rename = "resposta_existencia_sem_posicao")]
    ExistenceWithoutPosition,
    #[serde(rename = "resposta_curta_sem_substancia")]
    ShortWithoutSubstance,
    #[serde(rename = "off_topic")]
    OffTopic,
    #[serde(rename = "tema_atual_sem_ancora_temporal")]
    MissingTemporalAnchor,
    #[serde(rename = "incerteza_fora_fallback_canonico")]
    UncertaintyOutsideFallback,
    #[serde(rename = "tema_atual_sem_confianca_explicita")]
    MissingConfidence,
    #[serde(rename = "tema_atual_sem_base_verificavel")]
    MissingVerifiableBasis,
    #[serde(rename = "incerteza_sem_pedido_de_fonte")]
    UncertaintyWithoutSourceRequest,
    #[serde(rename = "termina_com_pergunta_aberta")]
    OpenEndedQuestion,
    #[serde(rename = "confianca_absoluta_sem_base")]
    UnfoundedCertainty,
}

impl ReasonCode {
    /// Every reason, passing first.
    pub const ALL: [ReasonCode; 15] = [
        Self::Ok,
        Self::Empty,
        Self::ModelUnavailable,
        Self::Generic,
        Self::GenericOpening,
        Self::ExistenceWithoutPosition,
        Self::ShortWithoutSubstance,
        Self::OffTopic,
        Self::MissingTemporalAnchor,
        Self::UncertaintyOutsideFallback,
        Self::MissingConfidence,
        Self::MissingVerifiableBasis,
        Self::UncertaintyWithoutSourceRequest,
        Self::OpenEndedQuestion,
        Self::UnfoundedCertainty,
    ];

    /// Wire code, as written to logs and corrective prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Empty => "resposta_vazia",
            Self::ModelUnavailable => "modelo_indisponivel",
            Self::Generic => "resposta_generica",
            Self::GenericOpening => "abertura_generica",
            Self::ExistenceWithoutPosition => "resposta_existencia_sem_posicao",
            Self::ShortWithoutSubstance => "resposta_curta_sem_substancia",
            Self::OffTopic => "off_topic",
            Self::MissingTemporalAnchor => "tema_atual_sem_ancora_temporal",
            Self::UncertaintyOutsideFallback => "incerteza_fora_fallback_canonico",
            Self::MissingConfidence => "tema_atual_sem_confianca_explicita",
            Self::MissingVerifiableBasis => "tema_atual_sem_base_verificavel",
            Self::UncertaintyWithoutSourceRequest => "incerteza_sem_pedido_de_fonte",
            Self::OpenEndedQuestion => "termina_com_pergunta_aberta",
            Self::UnfoundedCertainty => "confianca_absoluta_sem_base",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the quality gate for one draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityVerdict {
    pub passed: bool,
    pub reason: ReasonCode,
}

impl QualityVerdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: ReasonCode::Ok,
        }
    }

    pub fn fail(reason: ReasonCode) -> Self {
        Self {
            passed: false,
            reason,
        }
    }
}

/// Lowercased, accent-folded alphanumeric tokens of at least three chars,
/// with a trailing `s` dropped from tokens longer than four chars.
pub fn tokenize(text: &str) -> Vec<String> {
    fold_accents(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 3)
        .map(|t| {
            let mut token = t.to_string();
            if token.chars().count() > 4 && token.ends_with('s') {
                token.pop();
            }
            token
        })
        .collect()
}

/// Distinct prompt tokens that are not stop words, in prompt order.
pub fn focus_terms(prompt: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for token in tokenize(prompt) {
        if !STOP_WORDS.contains(&token.as_str()) && !terms.contains(&token) {
            terms.push(token);
        }
    }
    terms
}

fn shares_prefix(a: &str, b: &str) -> bool {
    a.chars().count() >= PREFIX_MATCH_LEN
        && b.chars().count() >= PREFIX_MATCH_LEN
        && a.chars().take(PREFIX_MATCH_LEN).eq(b.chars().take(PREFIX_MATCH_LEN))
}

/// How many focus terms show up in the answer, verbatim or by a shared
/// five-char prefix.
pub fn focus_overlap(terms: &[String], answer: &str) -> usize {
    let tokens: HashSet<String> = tokenize(answer).into_iter().collect();
    terms
        .iter()
        .filter(|term| tokens.contains(*term) || tokens.iter().any(|t| shares_prefix(term, t)))
        .count()
}

fn same_line(line: &str, expected: &str) -> bool {
    fold_line(line).trim_end_matches('.') == fold_line(expected).trim_end_matches('.')
}

/// Lines are exactly the canonical fallback block: the fallback sentence, a
/// `Recorte temporal:` line (any anchor), `Confianca: baixa` and the
/// pending-source line, with nothing else.
pub fn is_canonical_fallback(lines: &[String]) -> bool {
    let [sentence, temporal, confidence, source] = lines else {
        return false;
    };
    same_line(sentence, SAFE_FALLBACK)
        && is_label_line(temporal, "recorte temporal")
        && same_line(confidence, "Confianca: baixa")
        && same_line(source, PENDING_SOURCE_LINE)
}

/// Run the quality gate on a draft answer for `prompt`.
pub fn evaluate_reply(prompt: &str, answer: &str) -> QualityVerdict {
    let lines = non_empty_lines(answer);
    let Some(first_line) = lines.first() else {
        return QualityVerdict::fail(ReasonCode::Empty);
    };
    let body = lines.join("\n");

    if fold_accents(&body).contains(UNSTABLE_MODEL_MARKER) {
        return QualityVerdict::fail(ReasonCode::ModelUnavailable);
    }

    let prompt = prompt.trim();
    let focus = focus_terms(prompt);
    let overlap = focus_overlap(&focus, &body);
    let generic = generic_hits(&body);

    if generic >= 2 && overlap <= 1 {
        return QualityVerdict::fail(ReasonCode::Generic);
    }
    if opens_generic(first_line) && overlap <= 1 {
        return QualityVerdict::fail(ReasonCode::GenericOpening);
    }
    if is_existence_question(prompt) && !takes_existence_position(first_line) {
        return QualityVerdict::fail(ReasonCode::ExistenceWithoutPosition);
    }

    let prompt_len = char_len(prompt);
    let answer_len = char_len(&body);
    let short = answer_len < SHORT_ANSWER_LEN;

    if prompt_len >= COMPLEX_PROMPT_LEN && short && overlap <= 1 {
        return QualityVerdict::fail(ReasonCode::ShortWithoutSubstance);
    }
    if focus.len() >= 3 && overlap == 0 && (generic >= 1 || short) {
        return QualityVerdict::fail(ReasonCode::OffTopic);
    }

    let current = is_current_events(prompt);
    let high_risk = is_high_risk(prompt);
    let follow_up = is_follow_up(prompt);
    let uncertain = has_uncertainty(&body);
    let anchored = has_temporal_anchor(&body);

    if current && !follow_up && prompt_len >= MIN_ANCHORED_PROMPT_LEN && !anchored && !uncertain {
        return QualityVerdict::fail(ReasonCode::MissingTemporalAnchor);
    }
    if high_risk && uncertain && !is_canonical_fallback(&lines) {
        return QualityVerdict::fail(ReasonCode::UncertaintyOutsideFallback);
    }
    if high_risk && !follow_up && !has_confidence_label(&lines) {
        return QualityVerdict::fail(ReasonCode::MissingConfidence);
    }
    if high_risk
        && !follow_up
        && !uncertain
        && !has_source_anchor(&body)
        && answer_len >= MIN_SOURCED_ANSWER_LEN
    {
        return QualityVerdict::fail(ReasonCode::MissingVerifiableBasis);
    }
    if current && uncertain && !has_source_request(&body) {
        return QualityVerdict::fail(ReasonCode::UncertaintyWithoutSourceRequest);
    }
    if body.ends_with('?') && !uncertain && !has_follow_up_offer(&body) {
        return QualityVerdict::fail(ReasonCode::OpenEndedQuestion);
    }
    if has_overconfidence(&body) && !anchored && !uncertain {
        return QualityVerdict::fail(ReasonCode::UnfoundedCertainty);
    }

    QualityVerdict::pass()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::current_events::canonical_fallback;

    fn reason(prompt: &str, answer: &str) -> ReasonCode {
        evaluate_reply(prompt, answer).reason
    }

    #[test]
    fn test_tokenize_stems_plurals() {
        assert_eq!(
            tokenize("Os Bichos e as revoluções!"),
            vec!["bicho", "revolucoe"]
        );
    }

    #[test]
    fn test_focus_terms_skip_stop_words() {
        assert_eq!(
            focus_terms("qual o diretor da revolucao dos bichos 2026?"),
            vec!["diretor", "revolucao", "bicho", "2026"]
        );
    }

    #[test]
    fn test_focus_overlap_prefix_match() {
        let terms = focus_terms("a revolucao dos bichos");
        assert_eq!(terms, vec!["revolucao", "bicho"]);
        assert_eq!(focus_overlap(&terms, "Um livro revolucionario sobre bichos."), 2);
    }

    #[test]
    fn test_empty_answer() {
        assert_eq!(reason("qualquer coisa", "  \n \n"), ReasonCode::Empty);
    }

    #[test]
    fn test_unstable_model_marker() {
        assert_eq!(
            reason("qual o boss final", crate::UNSTABLE_MODEL_REPLY),
            ReasonCode::ModelUnavailable
        );
    }

    #[test]
    fn test_generic_answer() {
        assert_eq!(
            reason(
                "qual o diretor da revolucao dos bichos 2026?",
                "Depende, em geral pode variar conforme a adaptacao."
            ),
            ReasonCode::Generic
        );
    }

    #[test]
    fn test_generic_opening() {
        assert_eq!(
            reason(
                "qual o melhor build de mago no elden ring",
                "Boa pergunta! Eu iria de inteligencia pura com cajado."
            ),
            ReasonCode::GenericOpening
        );
    }

    #[test]
    fn test_existence_without_position() {
        assert_eq!(
            reason(
                "existe versao de hollow knight para celular?",
                "Hollow Knight saiu para PC, Switch, PlayStation e Xbox."
            ),
            ReasonCode::ExistenceWithoutPosition
        );
        assert!(
            evaluate_reply(
                "existe versao de hollow knight para celular?",
                "Nao, Hollow Knight saiu para PC, Switch, PlayStation e Xbox."
            )
            .passed
        );
    }

    #[test]
    fn test_short_without_substance() {
        assert_eq!(
            reason(
                "por que o final de dark souls e considerado tao marcante",
                "Porque sim, e muito bom."
            ),
            ReasonCode::ShortWithoutSubstance
        );
    }

    #[test]
    fn test_off_topic() {
        assert_eq!(
            reason(
                "quem compoe a trilha de hollow knight",
                "Pizza de calabresa combina com refrigerante gelado."
            ),
            ReasonCode::OffTopic
        );
    }

    #[test]
    fn test_current_events_without_anchor() {
        assert_eq!(
            reason(
                "saiu o trailer novo do GTA 6?",
                "Sim, o trailer mostra Lucia e Jason em Vice City."
            ),
            ReasonCode::MissingTemporalAnchor
        );
    }

    #[test]
    fn test_uncertainty_outside_fallback() {
        assert_eq!(
            reason(
                "quem ganhou a eleição para prefeito ontem em São Paulo?",
                "Talvez tenha sido o candidato da situacao em Sao Paulo, mas nao sei ao certo quem ganhou."
            ),
            ReasonCode::UncertaintyOutsideFallback
        );
    }

    #[test]
    fn test_canonical_fallback_passes_high_risk() {
        let fallback = canonical_fallback(Some("16/10/2026 14:05 UTC"));
        assert!(evaluate_reply("quem ganhou a eleição para prefeito ontem em São Paulo?", &fallback).passed);
    }

    #[test]
    fn test_fallback_sentence_with_extra_lines_is_not_canonical() {
        let answer = format!(
            "{SAFE_FALLBACK}\nTalvez o candidato X tenha vencido.\nConfianca: alta\nFonte: me envie o link"
        );
        assert_eq!(
            reason("quem ganhou a eleição ontem em São Paulo?", &answer),
            ReasonCode::UncertaintyOutsideFallback
        );
    }

    #[test]
    fn test_canonical_fallback_shape() {
        let block = non_empty_lines(&canonical_fallback(Some("16/10/2026 14:05 UTC")));
        assert!(is_canonical_fallback(&block));
        assert!(is_canonical_fallback(&non_empty_lines(&canonical_fallback(None))));
        assert!(!is_canonical_fallback(&block[..1]));

        let mut padded = block.clone();
        padded.push("Talvez amanha saia o resultado.".into());
        assert!(!is_canonical_fallback(&padded));

        let mut confident = block;
        confident[2] = "Confianca: alta".into();
        assert!(!is_canonical_fallback(&confident));
    }

    #[test]
    fn test_high_risk_missing_confidence() {
        assert_eq!(
            reason(
                "qual a cotação do dólar hoje?",
                "Hoje o dolar fechou em R$ 5,40 segundo o Banco Central."
            ),
            ReasonCode::MissingConfidence
        );
    }

    #[test]
    fn test_high_risk_missing_verifiable_basis() {
        let answer = "Hoje o dolar fechou em alta de quase um por cento, puxado pelo cenario externo \
                      e pela expectativa de corte de gastos que ficou para a semana que vem.\n\
                      Confianca: alta";
        assert_eq!(
            reason("qual a cotação do dólar hoje?", answer),
            ReasonCode::MissingVerifiableBasis
        );
    }

    #[test]
    fn test_follow_up_skips_anchor_and_annotation_checks() {
        let unanchored = "O dolar fechou em R$ 5,40.";
        assert!(evaluate_reply("e o dolar hoje?", unanchored).passed);
        assert_eq!(
            reason("qual o dolar hoje?", unanchored),
            ReasonCode::MissingTemporalAnchor
        );

        let anchored = "Hoje o dolar fechou em R$ 5,40.";
        assert!(evaluate_reply("e o dolar hoje?", anchored).passed);
        assert_eq!(
            reason("qual o dolar hoje?", anchored),
            ReasonCode::MissingConfidence
        );

        let long_unsourced = "Hoje o dolar fechou em alta de quase um por cento, puxado pelo cenario externo \
                              e pela expectativa de corte de gastos que ficou para a semana que vem.";
        assert!(evaluate_reply("e o dolar hoje?", long_unsourced).passed);
    }

    #[test]
    fn test_high_risk_accepted_with_annotations() {
        let answer = "Hoje o dolar fechou em R$ 5,40.\nConfianca: media\nFonte: g1.globo.com";
        assert!(evaluate_reply("qual a cotação do dólar hoje?", answer).passed);
    }

    #[test]
    fn test_uncertainty_without_source_request() {
        assert_eq!(
            reason(
                "saiu o trailer novo do GTA 6?",
                "Nao tenho confirmacao de trailer novo."
            ),
            ReasonCode::UncertaintyWithoutSourceRequest
        );
        assert!(
            evaluate_reply(
                "saiu o trailer novo do GTA 6?",
                "Nao tenho confirmacao de trailer novo; me manda o link se viu algo."
            )
            .passed
        );
    }

    #[test]
    fn test_open_ended_question() {
        assert_eq!(
            reason(
                "qual o melhor boss de hollow knight",
                "O melhor boss de Hollow Knight e o Radiance. Qual voce prefere?"
            ),
            ReasonCode::OpenEndedQuestion
        );
        assert!(
            evaluate_reply(
                "qual o melhor boss de hollow knight",
                "O melhor boss de Hollow Knight e o Radiance. Quer que eu explique por que?"
            )
            .passed
        );
    }

    #[test]
    fn test_unfounded_certainty() {
        assert_eq!(
            reason(
                "qual o melhor boss de hollow knight",
                "Com certeza o melhor boss de Hollow Knight e o Radiance."
            ),
            ReasonCode::UnfoundedCertainty
        );
    }

    #[test]
    fn test_good_answer_passes() {
        let verdict = evaluate_reply(
            "qual o diretor da revolucao dos bichos 2026?",
            "O diretor da Revolucao dos Bichos de 2026 e Andy Serkis, que tambem atua no filme.",
        );
        assert_eq!(verdict, QualityVerdict::pass());
    }

    #[test]
    fn test_reason_codes_are_unique() {
        let codes: HashSet<&str> = ReasonCode::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(codes.len(), ReasonCode::ALL.len());
    }
}
