//! Static keyword tables for prompt and reply classification.
//!
//! Every entry is already folded (lowercase, no diacritics, no punctuation)
//! and is matched at word starts against a `text::match_key`. A trailing
//! space pins an entry to a whole word.

/// Prompts that need recent or real-time information.
pub(crate) const CURRENT_EVENTS_KW: &[&str] = &[
    "hoje",
    "agora ",
    "atual",
    "ultimas noticia",
    "ultima noticia",
    "ultima hora",
    "ultimos acontecimento",
    "ultima atualizacao",
    "noticia",
    "recente",
    "esta semana",
    "essa semana",
    "nesta semana",
    "ontem",
    "neste momento",
    "no momento",
    "aconteceu",
    "acontecendo",
    "ao vivo",
    "tempo real",
    "lancamento",
    "lancou",
    "estreia",
    "estreou",
    "saiu o",
    "saiu a",
    "anuncio",
    "anunciou",
    "em alta",
    "trending",
    "novidade",
];

/// Current-events topics where a wrong answer does real harm. Each one also
/// marks the prompt as current events.
pub(crate) const HIGH_RISK_KW: &[&str] = &[
    "eleicao",
    "eleicoes",
    "eleito",
    "presidente",
    "governo",
    "ministro",
    "senado",
    "stf ",
    "guerra",
    "conflito",
    "ataque",
    "atentado",
    "cotacao",
    "dolar",
    "bitcoin",
    "bolsa de valores",
    "inflacao",
    "juros",
    "preco do",
    "preco da",
    "morreu",
    "morte de",
    "faleceu",
    "preso",
    "prisao",
    "policia",
    "escandalo",
    "polemica",
    "acidente",
    "terremoto",
    "enchente",
    "quem ganhou",
    "placar",
    "venceu",
    "foi campeao",
    "e campeao",
    "ficou campeao",
    "sagrou campeao",
    "sera campeao",
];

/// Words or phrases that anchor an answer in time.
pub(crate) const TEMPORAL_KW: &[&str] = &[
    "hoje",
    "ontem",
    "agora ",
    "neste momento",
    "no momento",
    "atualmente",
    "ate o momento",
    "ate agora",
    "recorte temporal",
    "desde ",
    "esta semana",
    "nesta semana",
    "essa semana",
    "semana passada",
    "mes passado",
    "este ano",
    "neste ano",
    "ano passado",
    "utc ",
    "atualizado em",
    "janeiro",
    "fevereiro",
    "marco de",
    "abril",
    "maio de",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Uncertainty language in an answer.
pub(crate) const UNCERTAINTY_KW: &[&str] = &[
    "nao tenho confirmacao",
    "nao consegui confirmar",
    "nao consigo confirmar",
    "sem confirmacao",
    "nao ha confirmacao",
    "nao foi confirmad",
    "nao sei ",
    "nao tenho certeza",
    "nao tenho informac",
    "nao tenho dados",
    "nao tenho acesso",
    "talvez",
    "provavelmente",
    "possivelmente",
    "pode ser que",
    "nao esta claro",
    "incerto",
];

/// The answer asks the viewer for a source or points to one.
pub(crate) const SOURCE_REQUEST_KW: &[&str] = &[
    "fonte",
    "link",
    "envie",
    "me manda",
    "me passa",
    "confira",
    "verifique",
    "checar",
    "consulte",
    "site oficial",
    "canal oficial",
];

/// The answer cites where its information came from.
pub(crate) const SOURCE_ANCHOR_KW: &[&str] = &[
    "fonte",
    "segundo ",
    "de acordo com",
    "conforme ",
    "informou",
    "noticiou",
    "publicou",
    "reportou",
    "http",
    "www ",
    "g1 ",
    "folha",
    "uol ",
    "estadao",
    "reuters",
    "bbc ",
    "cnn ",
    "nota oficial",
    "comunicado",
    "site oficial",
];

/// The answer offers to continue instead of leaving a bare question.
pub(crate) const FOLLOW_UP_OFFER_KW: &[&str] = &[
    "quer que eu",
    "se quiser",
    "posso detalhar",
    "posso explicar",
    "quer saber mais",
    "me manda",
    "me passa",
    "envie",
];

/// Filler phrases typical of evasive answers.
pub(crate) const GENERIC_PHRASES: &[&str] = &[
    "depende",
    "em geral",
    "de modo geral",
    "de forma geral",
    "no geral",
    "geralmente",
    "pode variar",
    "varia muito",
    "cada caso e um caso",
    "e relativo",
    "e subjetivo",
    "varios fatores",
    "nao existe uma resposta",
    "boa pergunta",
    "otima pergunta",
    "excelente pergunta",
];

/// Generic openings for the first line of an answer.
pub(crate) const GENERIC_OPENINGS: &[&str] = &[
    "depende",
    "isso depende",
    "tudo depende",
    "em geral",
    "de modo geral",
    "no geral",
    "boa pergunta",
    "otima pergunta",
    "excelente pergunta",
    "entao ",
    "olha ",
    "bom ",
];

/// Over-confident assertions.
pub(crate) const OVERCONFIDENT_KW: &[&str] = &[
    "com certeza",
    "certeza absoluta",
    "sem duvida",
    "sem sombra de duvida",
    "garantido",
    "100%",
    "definitivamente",
    "e fato que",
    "todo mundo sabe",
    "obviamente",
];

/// First words of an existence question.
pub(crate) const EXISTENCE_OPENERS: &[&str] = &["existe", "existem", "tem", "ha", "havia", "teve"];

/// First words of an answer that takes a position on existence.
pub(crate) const EXISTENCE_POSITIONS: &[&str] = &[
    "sim", "nao", "existe", "existem", "tem", "ha", "havia", "teve", "nenhum", "nenhuma", "nunca",
    "claro", "ainda", "ja",
];

/// First words of a direct question.
pub(crate) const QUESTION_OPENERS: &[&str] = &[
    "qual", "quais", "quem", "quando", "onde", "como", "porque", "quanto", "quantos", "quantas",
    "existe", "existem", "tem", "ha", "vale", "pode", "da", "consegue", "sabe", "e",
];

/// Two-word question openers.
pub(crate) const QUESTION_OPENER_PHRASES: &[&str] = &["o que", "por que", "pra que", "para que"];

/// Pronouns and elisions that point back to the previous turn.
pub(crate) const FOLLOW_UP_PRONOUNS: &[&str] = &[
    "ele", "ela", "eles", "elas", "dele", "dela", "deles", "delas", "isso", "disso", "nisso",
    "esse", "essa", "desse", "dessa", "nesse", "nessa", "aquilo", "daquilo", "mesmo", "mesma",
];

/// Openers that continue the previous turn regardless of length.
pub(crate) const FOLLOW_UP_OPENERS: &[&str] = &[
    "e sobre",
    "e quanto",
    "e depois",
    "e ai",
    "continua",
    "continue",
    "mais detalhes",
    "explica melhor",
    "como assim",
];

/// Technical vocabulary for the seriousness check.
pub(crate) const TECHNICAL_KW: &[&str] = &[
    "api ",
    "servidor",
    "kernel",
    "linux",
    "windows",
    "driver",
    "gpu",
    "cpu",
    "placa de video",
    "processador",
    "rust ",
    "python",
    "javascript",
    "banco de dados",
    "seguranca",
    "vulnerabilidade",
    "cve ",
    "patch",
    "atualizacao",
    "versao",
    "bug ",
    "falha",
    "exploit",
    "protocolo",
    "latencia",
    "criptografia",
    "llm ",
    "modelo de linguagem",
    "compilador",
    "framework",
    "firmware",
    "nvidia",
    "amd ",
    "intel ",
];

/// Signals that the asker will act on the answer.
pub(crate) const RELEVANCE_KW: &[&str] = &[
    "importante",
    "impacto",
    "afeta",
    "grave",
    "critico",
    "critica",
    "urgente",
    "risco",
    "seguro ",
    "vale a pena",
    "devo ",
    "recomenda",
    "confiavel",
];

/// Tone buckets.
pub(crate) const BRIEF_KW: &[&str] = &[
    "rapido",
    "resumo",
    "resume",
    "resumindo",
    "curto",
    "tldr",
    "em uma frase",
    "sim ou nao",
];

pub(crate) const ANALYTICAL_KW: &[&str] = &[
    "explica",
    "analisa",
    "compara",
    "diferenca",
    "por que",
    "detalha",
    "vantage",
    "desvantage",
    "pros e contras",
];

pub(crate) const PLAYFUL_KW: &[&str] = &[
    "kkk", "haha", "rsrs", "zoeira", "zoa", "piada", "meme", "brincadeira", "engracad", "lol ",
];

/// Exact (folded) prompts asking the bot to introduce itself.
pub(crate) const INTRO_TRIGGERS: &[&str] = &[
    "se apresente",
    "se apresenta",
    "apresente se",
    "apresenta se",
    "quem e voce",
    "quem e vc",
    "quem e tu",
    "quem voce e",
];

/// Words ignored when extracting focus terms (compared after stemming).
pub(crate) const STOP_WORDS: &[&str] = &[
    "que", "qual", "quai", "quais", "quem", "como", "onde", "quando", "porque", "para", "pra",
    "por", "com", "sem", "uma", "umas", "uns", "dos", "das", "nos", "nas", "pelo", "pela", "pelos",
    "pelas", "num", "numa", "voce", "voces", "vce", "isso", "esse", "essa", "este", "esta", "ele",
    "ela", "eles", "elas", "sobre", "mais", "menos", "muito", "muita", "tem", "ter", "ser",
    "sao", "foi", "era", "entao", "tambem", "aqui", "ali", "seu", "sua", "meu", "minha", "nao",
    "sim", "mas", "existe", "existem", "acha", "sabe", "fala", "diz", "algum", "alguma", "todo",
    "toda", "cada", "ainda", "agora", "hoje", "bem", "tipo", "mano", "chat", "bot", "the", "and",
    "vai", "vou", "ja", "ate", "quanto", "quantos", "quantas", "alguem",
];
