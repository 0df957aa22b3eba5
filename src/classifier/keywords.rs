//! Keyword rule engine — the always-available classification path.
//!
//! Operates on the raw lower-cased `subject + " " + message` text, not the
//! stemmed feature string: several keywords are multi-word phrases that
//! depend on exact substrings, punctuation and digits included.
//!
//! Precedence is fixed: productive keywords are checked first, then
//! unproductive ones, and text matching neither set defaults to productive —
//! ambiguous content is treated as actionable rather than silently dropped.

use aho_corasick::AhoCorasick;
use tracing::debug;

use crate::classifier::types::Label;
use crate::error::ConfigError;

/// Keywords that mark a message as actionable.
pub const PRODUCTIVE_KEYWORDS: &[&str] = &[
    // Urgency and deadlines
    "urgente", "urgência", "asap", "prazo", "deadline", "data limite",
    "hoje", "amanhã", "imediatamente", "já", "agora", "rapidamente",
    "emergência", "emergencia", "crítico", "critico", "prioridade",
    // Meetings and appointments
    "reunião", "reuniao", "meeting", "encontro", "agendamento", "agenda",
    "compromisso", "apresentação", "apresentacao", "conferência", "conferencia",
    "call", "videoconferência", "videoconferencia", "webinar",
    // Projects and tasks
    "projeto", "project", "tarefa", "task", "atividade", "ação", "acao",
    "trabalho", "job", "entrega", "delivery", "execução", "execucao",
    "desenvolvimento", "implementação", "implementacao", "criação", "criacao",
    // Needs and requests
    "necessário", "necessario", "preciso", "precisa", "required", "needed",
    "solicitação", "solicitacao", "request", "pedido", "demanda", "requisito",
    "obrigatório", "obrigatorio", "essencial", "fundamental",
    // Questions and support
    "dúvida", "duvida", "question", "pergunta", "ajuda", "help", "suporte",
    "support", "assistência", "assistencia", "orientação", "orientacao",
    "consulta", "esclarecimento", "explicação", "explicacao",
    // Problems and fixes
    "problema", "issue", "erro", "bug", "falha", "defeito", "inconsistência",
    "inconsistencia", "corrigir", "fix", "resolver", "solucionar", "reparar",
    "correção", "correcao", "ajuste", "melhoria", "otimização", "otimizacao",
    // Updates and status
    "atualização", "atualizacao", "update", "status", "situação", "situacao",
    "progresso", "progress", "andamento", "evolução", "evolucao",
    "desenvolvimento", "crescimento", "expansão", "expansao",
    // Review and approval
    "revisar", "review", "aprovar", "approve", "confirmar", "confirm",
    "validar", "verificar", "checar", "analisar", "avaliar", "examinar",
    "auditoria", "inspeção", "inspecao", "fiscalização", "fiscalizacao",
    // Business
    "negócio", "negocio", "business", "cliente", "customer", "venda", "sale",
    "contrato", "contract", "proposta", "proposal", "orçamento", "orcamento",
    "budget", "custo", "cost", "preço", "preco", "price", "valor",
    "receita", "lucro", "profit", "investimento", "investment",
    // Technology and systems
    "sistema", "system", "software", "aplicação", "aplicacao", "app",
    "plataforma", "platform", "integração", "integracao", "api",
    "banco de dados", "database", "servidor", "server", "hosting",
    // Human resources
    "funcionário", "funcionario", "employee", "colaborador", "equipe",
    "team", "gestão", "gestao", "management", "liderança", "lideranca",
    "treinamento", "training", "capacitação", "capacitacao",
];

/// Keywords that mark a message as non-actionable.
pub const UNPRODUCTIVE_KEYWORDS: &[&str] = &[
    // Thanks and greetings
    "obrigado", "obrigada", "thank", "thanks", "valeu",
    "parabéns", "parabens", "congratulations", "congrats", "felicitações",
    "felicitacoes", "feliz", "happy", "alegre", "contento", "satisfeito",
    "gratidão", "gratidao", "grateful", "agradecido", "agradecida",
    // Special dates
    "aniversário", "aniversario", "birthday", "natal", "christmas",
    "páscoa", "pascoa", "easter", "ano novo", "new year", "feriado",
    "holiday", "celebration", "celebração", "celebracao", "festa", "party",
    "comemoração", "comemoracao", "festa de aniversário", "festa de aniversario",
    // Invitations and social events
    "convite", "invitation", "convida", "convidar", "evento", "event",
    "encontro social", "social meeting", "happy hour", "churrasco",
    "barbecue", "churrascão", "churrascao", "confraternização", "confraternizacao",
    "festa de formatura", "formatura", "graduation", "casamento", "wedding",
    "batizado", "baptism",
    // Spam and advertising
    "spam", "lixo", "trash", "publicidade", "advertisement", "propaganda",
    "promoção", "promocao", "promotion", "oferta", "offer", "desconto",
    "discount", "venda", "sale", "liquidação", "liquidacao", "clearance",
    "marketing", "ad", "anúncio", "anuncio", "comercial",
    "promocional", "promotional", "cupom", "coupon",
    // Newsletters and news
    "newsletter", "boletim", "notícias", "noticias", "news", "atualização",
    "atualizacao", "update", "informações", "informacoes", "information",
    "divulgação", "divulgacao", "disclosure", "comunicado", "announcement",
    "press release", "comunicado de imprensa", "nota oficial",
    // Non-professional content
    "piada", "joke", "engraçado", "engracado", "funny", "humor", "comédia",
    "comedia", "meme", "vídeo engraçado", "video engraçado", "funny video",
    "gif", "gif engraçado", "funny gif", "meme engraçado",
    "hilário", "hilario", "hilarious", "cômico", "comico", "comic",
    // Personal messages
    "pessoal", "personal", "particular", "private", "íntimo", "intimo",
    "família", "family", "amigos", "friends", "amigo", "friend",
    "vida pessoal", "personal life", "privado", "confidencial",
    "confidential",
    // Irrelevant content
    "irrelevante", "irrelevant", "desnecessário", "desnecessario",
    "unnecessary", "inútil", "inutil", "useless", "sem importância",
    "sem importancia", "unimportant", "fútil", "frivolous", "bobagem",
    "nonsense", "sem sentido", "meaningless", "vazio", "empty",
    // Offensive or inappropriate content
    "ofensivo", "offensive", "inadequado", "inappropriate", "inapropriado",
    "inconveniente", "inconvenient", "desrespeitoso", "disrespectful",
    "grosseiro", "rude", "mal educado", "mal-educado",
    // Political or religious content
    "político", "politico", "political", "eleição", "eleicao", "election",
    "candidato", "candidate", "partido", "religioso", "religious",
    "igreja", "church", "templo", "temple", "fé", "faith", "crença", "belief",
];

/// Substring matcher over the two fixed keyword sets.
#[derive(Debug)]
pub struct KeywordEngine {
    productive: AhoCorasick,
    unproductive: AhoCorasick,
}

impl KeywordEngine {
    /// Build the engine with the shipped pt-BR keyword sets.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_sets(PRODUCTIVE_KEYWORDS, UNPRODUCTIVE_KEYWORDS)
    }

    /// Build the engine from custom keyword sets.
    ///
    /// Both sets must be non-empty: an empty set would silently turn the
    /// rule engine into a constant function.
    pub fn with_sets(productive: &[&str], unproductive: &[&str]) -> Result<Self, ConfigError> {
        if productive.is_empty() {
            return Err(ConfigError::EmptyKeywordSet { label: "productive" });
        }
        if unproductive.is_empty() {
            return Err(ConfigError::EmptyKeywordSet {
                label: "unproductive",
            });
        }

        let productive = AhoCorasick::new(productive)
            .map_err(|e| ConfigError::PatternBuild(format!("productive set: {e}")))?;
        let unproductive = AhoCorasick::new(unproductive)
            .map_err(|e| ConfigError::PatternBuild(format!("unproductive set: {e}")))?;

        Ok(Self {
            productive,
            unproductive,
        })
    }

    /// True iff any productive keyword occurs as a substring.
    pub fn is_productive(&self, text: &str) -> bool {
        self.productive.is_match(text)
    }

    /// True iff any unproductive keyword occurs as a substring.
    pub fn is_unproductive(&self, text: &str) -> bool {
        self.unproductive.is_match(text)
    }

    /// Classify from raw subject and body.
    ///
    /// Matching runs on the lower-cased concatenation with punctuation and
    /// digits intact. Never fails, for any input.
    pub fn classify(&self, subject: &str, message: &str) -> Label {
        let combined = format!("{subject} {message}").to_lowercase();

        if self.is_productive(&combined) {
            debug!("productive keyword matched");
            return Label::Productive;
        }
        if self.is_unproductive(&combined) {
            debug!("unproductive keyword matched");
            return Label::Unproductive;
        }

        // Neither set matched — treat ambiguous content as actionable.
        Label::Productive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn productive_keyword_wins() {
        let engine = KeywordEngine::new().unwrap();
        let label = engine.classify("Problema urgente no sistema", "Preciso de ajuda urgente");
        assert_eq!(label, Label::Productive);
    }

    #[test]
    fn unproductive_keyword_matches() {
        let engine = KeywordEngine::new().unwrap();
        let label = engine.classify(
            "Feliz aniversário!",
            "Espero que tenha tido um dia maravilhoso.",
        );
        assert_eq!(label, Label::Unproductive);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let engine = KeywordEngine::new().unwrap();
        assert_eq!(engine.classify("URGENTE", ""), Label::Productive);
    }

    #[test]
    fn substring_containment_not_whole_word() {
        // "urgentemente" contains "urgente" — substring semantics.
        let engine = KeywordEngine::new().unwrap();
        assert_eq!(
            engine.classify("", "respondam urgentemente"),
            Label::Productive
        );
    }

    #[test]
    fn productive_checked_before_unproductive() {
        // "reunião" (productive) and "festa" (unproductive) in one message.
        let engine = KeywordEngine::new().unwrap();
        let label = engine.classify("Reunião sobre a festa da empresa", "");
        assert_eq!(label, Label::Productive);
    }

    #[test]
    fn defaults_to_productive_when_nothing_matches() {
        let engine = KeywordEngine::new().unwrap();
        assert_eq!(engine.classify("xyzzy", "qwerty"), Label::Productive);
    }

    #[test]
    fn empty_input_defaults_to_productive() {
        // The rule engine itself has no empty-content rule; that guard
        // lives in the hybrid policy.
        let engine = KeywordEngine::new().unwrap();
        assert_eq!(engine.classify("", ""), Label::Productive);
    }

    #[test]
    fn multi_word_phrases_match() {
        let engine = KeywordEngine::new().unwrap();
        assert!(engine.is_productive("migrar o banco de dados"));
        assert!(engine.is_unproductive("feliz ano novo para todos"));
    }

    #[test]
    fn empty_productive_set_rejected() {
        let err = KeywordEngine::with_sets(&[], &["x"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyKeywordSet {
                label: "productive"
            }
        ));
    }

    #[test]
    fn engine_is_debug_formattable() {
        // unwrap_err on Result<KeywordEngine, _> needs Debug on both sides.
        let engine = KeywordEngine::new().unwrap();
        assert!(format!("{engine:?}").contains("KeywordEngine"));
    }

    #[test]
    fn empty_unproductive_set_rejected() {
        let err = KeywordEngine::with_sets(&["x"], &[]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyKeywordSet {
                label: "unproductive"
            }
        ));
    }
}
