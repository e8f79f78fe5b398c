//! Self-introduction replies. These never reach the model.

use std::sync::atomic::{AtomicUsize, Ordering};

pub const INTRO_TEMPLATES: [&str; 4] = [
    "Oi, chat! Sou o assistente do canal: respondo duvidas sobre o que esta rolando na live, jogos, filmes e noticias. Se eu nao tiver confirmacao de algo, eu aviso.",
    "Fala, galera! Estou aqui pra responder perguntas do chat de forma direta. Em assunto atual eu digo de quando e a informacao e de onde ela veio.",
    "Salve! Sou o bot de respostas da live. Pergunta o que quiser sobre o conteudo do canal; se for noticia, eu trago data e fonte.",
    "E ai, chat! Eu respondo curto e direto, sem enrolacao. Quando nao der pra confirmar algo, eu falo que nao tenho confirmacao em vez de chutar.",
];

/// Round-robin over [`INTRO_TEMPLATES`], shared by all turns of a pipeline.
#[derive(Debug, Default)]
pub struct IntroRotation {
    next: AtomicUsize,
}

impl IntroRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next template; safe to call from concurrent turns.
    pub fn next_intro(&self) -> &'static str {
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        INTRO_TEMPLATES[i % INTRO_TEMPLATES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_REPLY_LENGTH, MAX_REPLY_LINES};

    #[test]
    fn test_rotation_cycles_through_templates() {
        let rotation = IntroRotation::new();
        let seen: Vec<&str> = (0..5).map(|_| rotation.next_intro()).collect();
        assert_eq!(&seen[..4], &INTRO_TEMPLATES[..]);
        assert_eq!(seen[4], INTRO_TEMPLATES[0]);
    }

    #[test]
    fn test_templates_fit_one_message() {
        for template in INTRO_TEMPLATES {
            assert!(template.chars().count() <= MAX_REPLY_LENGTH);
            assert!(template.lines().count() <= MAX_REPLY_LINES);
        }
    }
}
