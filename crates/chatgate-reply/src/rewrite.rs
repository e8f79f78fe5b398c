//! Corrective re-prompt for a rejected draft.
//!
//! One rejection buys exactly one rewrite. The corrective prompt carries the
//! original question, the rejected draft, the reason code with its guidance,
//! and a fixed rule list.

use chatgate_core::message::InferenceOutput;
use chatgate_core::text::preview;
use chatgate_core::traits::Inference;
use tracing::info;

use crate::current_events::canonical_fallback;
use crate::pipeline::infer_or_sentinel;
use crate::quality::ReasonCode;

/// Chars of the rejected draft quoted back to the model.
const REJECTED_DRAFT_PREVIEW_LEN: usize = 600;

/// Rules every rewrite must follow.
pub const REWRITE_RULES: &[&str] = &[
    "A primeira linha responde diretamente a pergunta.",
    "No maximo 4 linhas.",
    "Pelo menos um fato concreto (nome, numero, data ou lugar).",
    "Em tema atual, separe o que esta confirmado do que e rumor e feche com as linhas \"Confianca:\" e \"Fonte:\".",
    "Nao termine com pergunta aberta.",
    "Se nao for possivel verificar, responda exatamente com o bloco de fallback abaixo.",
];

/// Correction guidance for each reason code.
pub fn reason_guidance(reason: ReasonCode) -> &'static str {
    match reason {
        ReasonCode::Ok => "Mantenha a resposta direta e objetiva.",
        ReasonCode::Empty => "A resposta veio vazia. Escreva uma resposta completa.",
        ReasonCode::ModelUnavailable => {
            "A geracao anterior falhou. Gere a resposta do zero, sem mencionar a falha."
        }
        ReasonCode::Generic => {
            "A resposta ficou generica. Troque frases como \"depende\" e \"em geral\" por fatos ligados a pergunta."
        }
        ReasonCode::GenericOpening => {
            "A resposta abriu com enrolacao. Comece pela informacao pedida."
        }
        ReasonCode::ExistenceWithoutPosition => {
            "A pergunta e se algo existe. Comece com \"Sim,\" ou \"Nao,\" e depois explique."
        }
        ReasonCode::ShortWithoutSubstance => {
            "A resposta foi curta demais para a pergunta. Traga os elementos que a pergunta cita."
        }
        ReasonCode::OffTopic => {
            "A resposta fugiu do assunto. Responda usando os termos da pergunta."
        }
        ReasonCode::MissingTemporalAnchor => {
            "Tema atual sem data. Diga a data ou o periodo a que a informacao se refere."
        }
        ReasonCode::UncertaintyOutsideFallback => {
            "Houve incerteza em tema sensivel. Ou confirme com fonte, ou use exatamente o bloco de fallback."
        }
        ReasonCode::MissingConfidence => {
            "Tema sensivel sem nivel de confianca. Inclua a linha \"Confianca: alta|media|baixa\"."
        }
        ReasonCode::MissingVerifiableBasis => {
            "Tema sensivel sem base verificavel. Cite o veiculo ou site e inclua a linha \"Fonte:\"."
        }
        ReasonCode::UncertaintyWithoutSourceRequest => {
            "Voce demonstrou incerteza sem pedir fonte. Peca um link oficial a quem perguntou."
        }
        ReasonCode::OpenEndedQuestion => {
            "A resposta terminou com pergunta aberta. Termine com uma afirmacao."
        }
        ReasonCode::UnfoundedCertainty => {
            "Certeza absoluta sem base. Remova o exagero ou diga de quando e a informacao."
        }
    }
}

/// A rejected draft awaiting its single rewrite.
#[derive(Debug, Clone, Copy)]
pub struct RewriteAttempt<'a> {
    pub original_prompt: &'a str,
    pub rejected_draft: &'a str,
    pub reason: ReasonCode,
}

impl<'a> RewriteAttempt<'a> {
    pub fn new(original_prompt: &'a str, rejected_draft: &'a str, reason: ReasonCode) -> Self {
        Self {
            original_prompt,
            rejected_draft,
            reason,
        }
    }

    /// Build the corrective prompt.
    pub fn corrective_prompt(&self, time_anchor: Option<&str>) -> String {
        let mut out = String::from("Sua resposta anterior foi reprovada no controle de qualidade.\n");
        out.push_str(&format!("Pergunta original: {}\n", self.original_prompt.trim()));
        out.push_str(&format!(
            "Resposta reprovada: {}\n",
            preview(self.rejected_draft, REJECTED_DRAFT_PREVIEW_LEN)
        ));
        out.push_str(&format!(
            "Motivo: {} - {}\n",
            self.reason,
            reason_guidance(self.reason)
        ));
        if let Some(anchor) = time_anchor {
            out.push_str(&format!("Horario do servidor: {anchor}\n"));
        }

        out.push_str("\nReescreva seguindo as regras:\n");
        for (i, rule) in REWRITE_RULES.iter().enumerate() {
            out.push_str(&format!("{}. {rule}\n", i + 1));
        }
        out.push_str(&format!("\nBloco de fallback:\n{}\n", canonical_fallback(time_anchor)));
        out.push_str("\nResponda apenas com o texto final.");
        out
    }

    /// Run the rewrite: exactly one more inference call.
    pub async fn run(
        &self,
        inference: &dyn Inference,
        time_anchor: Option<&str>,
        use_grounding: bool,
    ) -> InferenceOutput {
        info!("rewrite: retrying draft rejected as {}", self.reason);
        let prompt = self.corrective_prompt(time_anchor);
        infer_or_sentinel(inference, &prompt, use_grounding).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_reason_has_distinct_guidance() {
        let mut seen = std::collections::HashSet::new();
        for reason in ReasonCode::ALL {
            assert!(seen.insert(reason_guidance(reason)), "duplicate guidance for {reason}");
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn test_corrective_prompt_contents() {
        let attempt = RewriteAttempt::new(
            "qual o diretor da revolucao dos bichos 2026?",
            "Depende, em geral pode variar conforme a adaptacao.",
            ReasonCode::Generic,
        );
        let prompt = attempt.corrective_prompt(Some("16/10/2026 14:05 UTC"));

        assert!(prompt.contains("Pergunta original: qual o diretor da revolucao dos bichos 2026?"));
        assert!(prompt.contains("Resposta reprovada: Depende, em geral pode variar"));
        assert!(prompt.contains("Motivo: resposta_generica - "));
        assert!(prompt.contains(reason_guidance(ReasonCode::Generic)));
        assert!(prompt.contains("Horario do servidor: 16/10/2026 14:05 UTC"));
        assert!(prompt.contains("1. A primeira linha responde diretamente a pergunta."));
        assert!(prompt.contains(&format!("{}. ", REWRITE_RULES.len())));
        assert!(prompt.contains(crate::SAFE_FALLBACK));
    }

    #[test]
    fn test_corrective_prompt_truncates_long_draft() {
        let draft = "blablabla ".repeat(200);
        let attempt = RewriteAttempt::new("pergunta", &draft, ReasonCode::OffTopic);
        let prompt = attempt.corrective_prompt(None);
        assert!(prompt.len() < draft.len());
        assert!(!prompt.contains("Horario do servidor"));
    }
}
