//! Outbound prompt construction.
//!
//! Sections are appended in a fixed order and each one only when it applies:
//! live context, the question (wrapped in the verifiable variant for current
//! events), then the instruction blocks and the numbered quality script.

use chatgate_core::config::ReplyConfig;
use chatgate_core::context::PromptContext;
use chatgate_core::text::preview;

use crate::current_events::canonical_fallback;
use crate::keywords::{
    detect_tone, is_current_events, is_existence_question, is_follow_up, is_high_risk,
    is_question, is_serious_technical, Tone,
};
use crate::{MAX_REPLY_LENGTH, MULTIPART_SEPARATOR};

/// Chars of the last bot reply quoted for continuity.
const LAST_REPLY_PREVIEW_LEN: usize = 280;

/// Chars of the style profile carried into the tone instruction.
const STYLE_PROFILE_PREVIEW_LEN: usize = 200;

/// Knobs the enricher reads from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Embed the channel's live context; when off only the clock is sent.
    pub include_live_context: bool,
    /// Recent chat excerpts to embed.
    pub history_window: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self::from_config(&ReplyConfig::default())
    }
}

impl EnrichOptions {
    pub fn from_config(config: &ReplyConfig) -> Self {
        Self {
            include_live_context: config.live_context,
            history_window: config.history_window(),
        }
    }
}

fn live_summary(ctx: &PromptContext) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    if !ctx.vibe.trim().is_empty() {
        lines.push(format!("Clima do chat: {}", ctx.vibe.trim()));
    }
    if let Some(uptime) = ctx.uptime_label() {
        lines.push(format!("Live no ar ha {uptime}"));
    }
    for (kind, description) in &ctx.observability {
        lines.push(format!("Na tela ({}): {}", kind.label(), description.trim()));
    }
    if lines.is_empty() {
        return None;
    }
    Some(format!("Contexto da live:\n{}", lines.join("\n")))
}

fn chat_history(ctx: &PromptContext, window: usize) -> Option<String> {
    let lines: Vec<String> = ctx
        .recent(window)
        .map(|excerpt| format!("- {}: {}", excerpt.author, excerpt.text))
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!("Chat recente:\n{}", lines.join("\n")))
}

fn verifiable_question(prompt: &str, author: &str, serious: bool, anchor: &str) -> String {
    let high_risk = is_high_risk(prompt);
    let mut out = format!("Pergunta de {author} sobre tema atual: {prompt}\n");

    if serious {
        out.push_str(
            "Modo detalhado: o tema e tecnico e quem perguntou pode agir com base na resposta.\n\
             - Aponte ambiguidades da pergunta antes de concluir.\n\
             - Separe o que esta confirmado do que e hipotese ou rumor.\n\
             - Diga a data ou versao a que cada fato se refere.\n",
        );
    } else {
        out.push_str(
            "Modo conciso:\n\
             - No maximo 4 linhas.\n\
             - Diga de quando e a informacao (data, periodo ou \"ate o momento\").\n",
        );
    }
    if high_risk {
        out.push_str(
            "- Termine com as linhas \"Confianca: alta|media|baixa\" e \"Fonte: <veiculo ou site>\".\n",
        );
    }
    out.push_str(&format!(
        "- Se nao conseguir verificar, responda exatamente:\n{}",
        canonical_fallback(Some(anchor))
    ));
    out
}

fn direct_answer_instruction(prompt: &str) -> Option<&'static str> {
    if is_existence_question(prompt) {
        return Some(
            "Formato: a pergunta e se algo existe. Comece a primeira linha com \"Sim,\" ou \"Nao,\" e so depois explique.",
        );
    }
    is_question(prompt).then_some(
        "Formato: a primeira linha responde diretamente a pergunta, sem introducao.",
    )
}

fn tone_instruction(prompt: &str, style_profile: &str) -> Option<String> {
    let tone = match detect_tone(prompt) {
        Some(Tone::Brief) => Some("Tom: resposta curta, uma ou duas frases."),
        Some(Tone::Analytical) => {
            Some("Tom: analitico, compare pontos concretos e explique o porque.")
        }
        Some(Tone::Playful) => Some("Tom: descontraido e bem-humorado, sem perder o fato."),
        None => None,
    };
    let style = style_profile.trim();
    match (tone, style.is_empty()) {
        (None, true) => None,
        (Some(tone), true) => Some(tone.to_string()),
        (None, false) => Some(format!(
            "Estilo do canal: {}",
            preview(style, STYLE_PROFILE_PREVIEW_LEN)
        )),
        (Some(tone), false) => Some(format!(
            "{tone}\nEstilo do canal: {}",
            preview(style, STYLE_PROFILE_PREVIEW_LEN)
        )),
    }
}

fn quality_script(current: bool, high_risk: bool, serious: bool) -> String {
    let steps: Vec<String> = if current && high_risk {
        vec![
            "Responda o fato pedido na primeira linha.".into(),
            "Inclua a data ou o periodo da informacao.".into(),
            "Separe confirmado de rumor.".into(),
            "Inclua a linha \"Confianca: alta|media|baixa\".".into(),
            "Inclua a linha \"Fonte:\" com veiculo ou site.".into(),
            "Sem confirmacao, use exatamente o bloco de fallback.".into(),
        ]
    } else if current {
        vec![
            "Responda o fato pedido na primeira linha.".into(),
            "Inclua a data ou o periodo da informacao.".into(),
            "Separe confirmado de rumor.".into(),
            "Se estiver incerto, peca um link oficial.".into(),
        ]
    } else {
        let mut steps: Vec<String> = vec![
            "Responda direto na primeira linha.".into(),
            "Traga pelo menos um fato concreto (nome, numero, data ou lugar).".into(),
            "Nao termine com pergunta aberta.".into(),
            format!("No maximo {MAX_REPLY_LENGTH} caracteres por mensagem."),
        ];
        if !serious {
            steps.push(format!(
                "Se precisar de duas mensagens, separe-as com {MULTIPART_SEPARATOR}."
            ));
        }
        steps
    };

    let mut out = String::from("Checklist antes de responder:");
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("\n{}. {step}", i + 1));
    }
    out
}

/// Build the prompt sent to inference for one turn.
pub fn enrich_prompt(
    prompt: &str,
    author: &str,
    ctx: &PromptContext,
    opts: EnrichOptions,
) -> String {
    let prompt = prompt.trim();
    let anchor = ctx.time_anchor();

    if !opts.include_live_context {
        return format!("Horario do servidor: {anchor}\n\n{prompt}");
    }

    let author = match author.trim() {
        "" => "alguem do chat",
        name => name,
    };
    let current = is_current_events(prompt);
    let high_risk = is_high_risk(prompt);
    let serious = is_serious_technical(prompt);

    let mut sections: Vec<String> = Vec::new();
    sections.extend(live_summary(ctx));
    sections.extend(chat_history(ctx, opts.history_window));
    if let Some(last) = ctx.last_bot_reply.as_deref().filter(|r| !r.trim().is_empty()) {
        sections.push(format!(
            "Sua ultima resposta: {}",
            preview(last, LAST_REPLY_PREVIEW_LEN)
        ));
    }
    sections.push(format!("Horario do servidor: {anchor}"));

    if current {
        sections.push(verifiable_question(prompt, author, serious, &anchor));
    } else {
        sections.push(format!("Pergunta de {author}: {prompt}"));
    }

    sections.push(
        "Sem enrolacao: nada de \"depende\", \"em geral\" ou \"boa pergunta\". Responda com fatos ligados a pergunta."
            .to_string(),
    );
    sections.extend(direct_answer_instruction(prompt).map(str::to_string));
    if is_follow_up(prompt) {
        sections.push(
            "Continuidade: a pergunta continua a conversa anterior. Use sua ultima resposta e o chat recente para entender a referencia."
                .to_string(),
        );
    }
    if serious {
        sections.push(
            "Prioridade de pesquisa: confirme versoes, datas e avisos oficiais antes de recomendar qualquer acao."
                .to_string(),
        );
        sections.push(format!(
            "Responda em uma unica mensagem, sem usar {MULTIPART_SEPARATOR}."
        ));
    }
    if !current {
        sections.extend(tone_instruction(prompt, &ctx.style_profile));
    }
    sections.push(quality_script(current, high_risk, serious));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgate_core::context::ContentKind;
    use chrono::{TimeZone, Utc};

    fn ctx() -> PromptContext {
        let clock = Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 0).unwrap();
        PromptContext::new(clock)
    }

    fn opts() -> EnrichOptions {
        EnrichOptions {
            include_live_context: true,
            history_window: 5,
        }
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
    }

    #[test]
    fn test_minimal_prompt_without_live_context() {
        let mut ctx = ctx();
        ctx.vibe = "chat animado".into();
        let out = enrich_prompt(
            "  e o segundo filme?  ",
            "ana",
            &ctx,
            EnrichOptions {
                include_live_context: false,
                history_window: 5,
            },
        );
        assert_eq!(out, "Horario do servidor: 16/10/2026 14:05 UTC\n\ne o segundo filme?");
    }

    #[test]
    fn test_live_context_sections() {
        let mut ctx = ctx();
        ctx.vibe = "chat animado".into();
        ctx.live_since = Some(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap());
        ctx.observability.insert(ContentKind::Game, "Hollow Knight".into());
        for i in 1..=8 {
            ctx.push_chat("viewer", &format!("mensagem {i}"));
        }
        ctx.last_bot_reply = Some("O Radiance e o chefe final.".into());

        let out = enrich_prompt("qual o melhor amuleto?", "ana", &ctx, opts());
        assert!(out.contains("Clima do chat: chat animado"));
        assert!(out.contains("Live no ar ha 2h 05min"));
        assert!(out.contains("Na tela (jogo): Hollow Knight"));
        assert!(!out.contains("mensagem 3"));
        assert!(out.contains("- viewer: mensagem 4"));
        assert!(out.contains("- viewer: mensagem 8"));
        assert!(out.contains("Sua ultima resposta: O Radiance e o chefe final."));
        assert!(out.contains("Pergunta de ana: qual o melhor amuleto?"));

        assert!(position(&out, "Contexto da live") < position(&out, "Chat recente"));
        assert!(position(&out, "Chat recente") < position(&out, "Sua ultima resposta"));
        assert!(position(&out, "Sua ultima resposta") < position(&out, "Horario do servidor"));
        assert!(position(&out, "Horario do servidor") < position(&out, "Pergunta de ana"));
    }

    #[test]
    fn test_general_prompt_instructions_in_order() {
        let out = enrich_prompt("qual o melhor amuleto de hollow knight?", "ana", &ctx(), opts());
        let anti_generic = position(&out, "Sem enrolacao");
        let direct = position(&out, "Formato: a primeira linha");
        let checklist = position(&out, "Checklist antes de responder");
        assert!(anti_generic < direct && direct < checklist);
        assert!(out.contains(MULTIPART_SEPARATOR));
        assert!(!out.contains("Continuidade"));
        assert!(!out.contains("Confianca:"));
    }

    #[test]
    fn test_existence_question_requires_position() {
        let out = enrich_prompt("existe hollow knight para celular?", "ana", &ctx(), opts());
        assert!(out.contains("Comece a primeira linha com \"Sim,\" ou \"Nao,\""));
    }

    #[test]
    fn test_follow_up_gets_continuity() {
        let out = enrich_prompt("e o segundo filme?", "ana", &ctx(), opts());
        assert!(out.contains("Continuidade"));
    }

    #[test]
    fn test_high_risk_current_events_wrapper() {
        let out = enrich_prompt("qual a cotação do dólar hoje?", "ana", &ctx(), opts());
        assert!(out.contains("Pergunta de ana sobre tema atual"));
        assert!(out.contains("Modo conciso"));
        assert!(out.contains("\"Confianca: alta|media|baixa\" e \"Fonte: <veiculo ou site>\""));
        assert!(out.contains(&canonical_fallback(Some("16/10/2026 14:05 UTC"))));
        assert!(out.contains("Inclua a linha \"Fonte:\""));
        assert!(!out.contains("Tom:"));
    }

    #[test]
    fn test_current_events_skips_tone_and_style() {
        let mut ctx = ctx();
        ctx.style_profile = "girias leves".into();
        let out = enrich_prompt("resume rapido as ultimas noticias do GTA 6", "ana", &ctx, opts());
        assert!(!out.contains("Tom:"));
        assert!(!out.contains("Estilo do canal"));
        assert!(!out.contains("Confianca: alta|media|baixa"));
    }

    #[test]
    fn test_tone_and_style_profile() {
        let mut ctx = ctx();
        ctx.style_profile = "girias leves".into();
        let out = enrich_prompt("conta uma piada sobre dark souls kkk", "ana", &ctx, opts());
        assert!(out.contains("Tom: descontraido"));
        assert!(out.contains("Estilo do canal: girias leves"));
    }

    #[test]
    fn test_serious_technical_prompt() {
        let out = enrich_prompt(
            "essa vulnerabilidade no kernel linux é grave pro meu servidor?",
            "ana",
            &ctx(),
            opts(),
        );
        assert!(out.contains("Prioridade de pesquisa"));
        assert!(out.contains(&format!("sem usar {MULTIPART_SEPARATOR}")));
        assert!(!out.contains(&format!("separe-as com {MULTIPART_SEPARATOR}")));
    }

    #[test]
    fn test_empty_author_is_named() {
        let out = enrich_prompt("qual o melhor amuleto?", "  ", &ctx(), opts());
        assert!(out.contains("Pergunta de alguem do chat: qual o melhor amuleto?"));
    }
}
