//! Keyword predicates over prompts and draft answers.
//!
//! Static keyword data lives in `keywords_data.rs`; every predicate here is a
//! pure function of its input text.

use chatgate_core::text::{any_term, char_len, count_terms, fold_line, match_key};
use regex::Regex;
use std::sync::LazyLock;

pub(crate) use crate::keywords_data::*;

/// Year literals from 2025 through 2039.
#[allow(clippy::expect_used)]
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b20(2[5-9]|3[0-9])\b").expect("valid regex"));

/// Day/month dates such as `16/10` or `16/10/2026`.
#[allow(clippy::expect_used)]
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}/\d{1,2}(/\d{2,4})?\b").expect("valid regex")
});

/// Words of a match key, without the padding.
fn words(key: &str) -> Vec<&str> {
    key.split_whitespace().collect()
}

/// Prompt needs recent or real-time information.
pub fn is_current_events(prompt: &str) -> bool {
    let key = match_key(prompt);
    any_term(&key, CURRENT_EVENTS_KW) || any_term(&key, HIGH_RISK_KW)
}

/// Current-events prompt on a topic that requires confidence and source lines.
pub fn is_high_risk(prompt: &str) -> bool {
    any_term(&match_key(prompt), HIGH_RISK_KW)
}

/// Prompt continues the previous turn: an `e ...`/`entao ...` opener of at
/// most seven words, a continuation phrase, or a short prompt leaning on a
/// pronoun.
pub fn is_follow_up(prompt: &str) -> bool {
    let key = match_key(prompt);
    let words = words(&key);
    let Some(first) = words.first() else {
        return false;
    };

    if matches!(*first, "e" | "entao") && words.len() <= 7 {
        return true;
    }
    if FOLLOW_UP_OPENERS
        .iter()
        .any(|opener| key.starts_with(&format!(" {opener}")))
    {
        return true;
    }
    words.len() <= 8 && words.iter().any(|w| FOLLOW_UP_PRONOUNS.contains(w))
}

/// Prompt asks whether something exists ("existe...", "tem...", "ha...").
pub fn is_existence_question(prompt: &str) -> bool {
    let key = match_key(prompt);
    words(&key)
        .first()
        .is_some_and(|w| EXISTENCE_OPENERS.contains(w))
}

/// First line of an answer takes a yes/no/existential position.
pub fn takes_existence_position(first_line: &str) -> bool {
    let key = match_key(first_line);
    words(&key)
        .first()
        .is_some_and(|w| EXISTENCE_POSITIONS.contains(w))
}

/// Prompt is phrased as a direct question.
pub fn is_question(prompt: &str) -> bool {
    if prompt.trim_end().ends_with('?') {
        return true;
    }
    let key = match_key(prompt);
    let starts_with_phrase = QUESTION_OPENER_PHRASES
        .iter()
        .any(|p| key.starts_with(&format!(" {p} ")));
    starts_with_phrase
        || words(&key)
            .first()
            .is_some_and(|w| QUESTION_OPENERS.contains(w))
}

/// Serious technical prompt: long enough, technical vocabulary, and either
/// a relevance signal or a current-events topic.
pub fn is_serious_technical(prompt: &str) -> bool {
    if char_len(prompt.trim()) < 24 {
        return false;
    }
    let key = match_key(prompt);
    any_term(&key, TECHNICAL_KW) && (any_term(&key, RELEVANCE_KW) || is_current_events(prompt))
}

/// Text names a time: temporal words, a 2025–2039 year or a day/month date.
pub fn has_temporal_anchor(text: &str) -> bool {
    any_term(&match_key(text), TEMPORAL_KW) || YEAR_RE.is_match(text) || DATE_RE.is_match(text)
}

pub fn has_uncertainty(text: &str) -> bool {
    any_term(&match_key(text), UNCERTAINTY_KW)
}

pub fn has_source_request(text: &str) -> bool {
    any_term(&match_key(text), SOURCE_REQUEST_KW)
}

pub fn has_source_anchor(text: &str) -> bool {
    any_term(&match_key(text), SOURCE_ANCHOR_KW)
}

pub fn has_follow_up_offer(text: &str) -> bool {
    any_term(&match_key(text), FOLLOW_UP_OFFER_KW)
}

pub fn has_overconfidence(text: &str) -> bool {
    any_term(&match_key(text), OVERCONFIDENT_KW)
}

/// Number of distinct generic filler phrases in the text.
pub fn generic_hits(text: &str) -> usize {
    count_terms(&match_key(text), GENERIC_PHRASES)
}

/// Line opens with a generic filler phrase.
pub fn opens_generic(line: &str) -> bool {
    let key = match_key(line);
    GENERIC_OPENINGS
        .iter()
        .any(|opening| key.starts_with(&format!(" {opening}")))
}

/// Line is a `Label: ...` annotation for the given folded label.
pub fn is_label_line(line: &str, label: &str) -> bool {
    fold_line(line)
        .strip_prefix(label)
        .is_some_and(|rest| rest.trim_start().starts_with(':'))
}

/// Any line carries a `Confianca:` label.
pub fn has_confidence_label(lines: &[String]) -> bool {
    lines.iter().any(|l| is_label_line(l, "confianca"))
}

/// Prompt asks the bot to introduce itself.
pub fn is_intro_request(prompt: &str) -> bool {
    let key = match_key(prompt);
    let key = key.trim();
    INTRO_TRIGGERS.contains(&key)
}

/// Reply tone requested by the prompt's wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Brief,
    Analytical,
    Playful,
}

/// Pick a tone bucket; brief wins over analytical, analytical over playful.
pub fn detect_tone(prompt: &str) -> Option<Tone> {
    let key = match_key(prompt);
    if any_term(&key, BRIEF_KW) {
        Some(Tone::Brief)
    } else if any_term(&key, ANALYTICAL_KW) {
        Some(Tone::Analytical)
    } else if any_term(&key, PLAYFUL_KW) {
        Some(Tone::Playful)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_events_detection() {
        assert!(is_current_events("Quais as últimas notícias do GTA 6?"));
        assert!(is_current_events("qual a cotação do dólar hoje"));
        assert!(!is_current_events("qual o diretor da revolucao dos bichos 2026?"));
        assert!(!is_current_events("como faz bolo de cenoura"));
        assert!(!is_current_events("qual o ultimo chefe de hollow knight"));
        assert!(is_current_events("o que rolou na última hora no servidor?"));
    }

    #[test]
    fn test_high_risk_detection() {
        assert!(is_high_risk("quem ganhou a eleição ontem?"));
        assert!(is_high_risk("qual a cotacao do dolar agora?"));
        assert!(!is_high_risk("saiu o trailer novo do filme hoje?"));
        assert!(is_high_risk("quem foi campeão do brasileirão ontem?"));
        assert!(!is_high_risk("qual campeao de lol e melhor"));
    }

    #[test]
    fn test_follow_up_detection() {
        assert!(is_follow_up("e o segundo filme?"));
        assert!(is_follow_up("Então quem dirigiu?"));
        assert!(is_follow_up("quantos anos ele tem?"));
        assert!(is_follow_up("explica melhor a parte do final por favor"));
        assert!(!is_follow_up("qual o melhor jogo de 2025?"));
        assert!(!is_follow_up(
            "e se eu quisesse montar um pc gamer com orcamento de cinco mil reais"
        ));
    }

    #[test]
    fn test_existence_question() {
        assert!(is_existence_question("Existe versão de Elden Ring para celular?"));
        assert!(is_existence_question("há alguma continuação?"));
        assert!(!is_existence_question("quem tem o recorde?"));
        assert!(takes_existence_position("Sim, existe desde 2025."));
        assert!(takes_existence_position("Não, ainda não saiu."));
        assert!(!takes_existence_position("O jogo saiu para PC."));
    }

    #[test]
    fn test_question_detection() {
        assert!(is_question("o que aconteceu no final"));
        assert!(is_question("me conta uma coisa?"));
        assert!(!is_question("me conta uma piada"));
    }

    #[test]
    fn test_serious_technical() {
        assert!(is_serious_technical(
            "essa vulnerabilidade no kernel linux é grave pro meu servidor?"
        ));
        assert!(!is_serious_technical("linux e bom?"));
        assert!(!is_serious_technical("qual o melhor sabor de pizza do mundo todo"));
    }

    #[test]
    fn test_temporal_anchor() {
        assert!(has_temporal_anchor("Até 16/10 o jogo não tinha data."));
        assert!(has_temporal_anchor("Lançado em 2026."));
        assert!(has_temporal_anchor("Atualmente está em beta."));
        assert!(!has_temporal_anchor("O jogo está em beta."));
        assert!(!has_temporal_anchor("Custa 2049 reais."));
    }

    #[test]
    fn test_label_lines() {
        assert!(is_label_line("Confiança: média", "confianca"));
        assert!(is_label_line("fonte : g1", "fonte"));
        assert!(!is_label_line("Fontes diversas apontam", "fonte"));
    }

    #[test]
    fn test_generic_detection() {
        assert_eq!(generic_hits("Depende, em geral pode variar."), 3);
        assert!(opens_generic("Boa pergunta! O jogo saiu."));
        assert!(!opens_generic("O jogo depende de DLC."));
    }

    #[test]
    fn test_intro_request() {
        assert!(is_intro_request("Se apresente!"));
        assert!(is_intro_request("quem é você?"));
        assert!(!is_intro_request("se apresente para o chat novo amanha"));
    }

    #[test]
    fn test_detect_tone() {
        assert_eq!(detect_tone("resume rapido o lore"), Some(Tone::Brief));
        assert_eq!(detect_tone("explica a diferença entre os dois"), Some(Tone::Analytical));
        assert_eq!(detect_tone("conta uma piada kkk"), Some(Tone::Playful));
        assert_eq!(detect_tone("qual o nome do boss"), None);
    }
}
