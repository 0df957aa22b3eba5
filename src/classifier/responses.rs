//! Deterministic reply templates.
//!
//! Selection is `subject length mod pool size` — a pure function of the
//! input, so identical inputs always render identical replies. Pools are
//! validated non-empty at construction; after that, generation can never
//! fail for any subject, including the empty string.

use crate::classifier::types::Label;
use crate::error::ConfigError;

/// Placeholder substituted with the subject in productive templates.
const SUBJECT_PLACEHOLDER: &str = "{subject}";

/// Reply used when a message normalizes to nothing at all.
pub const EMPTY_CONTENT_REPLY: &str =
    "Este email parece estar vazio ou não contém conteúdo significativo.";

/// Replies for actionable messages. Each renders the subject in place.
pub const PRODUCTIVE_TEMPLATES: &[&str] = &[
    "Obrigado pelo seu email sobre '{subject}'. Vou analisar e retornar em breve.",
    "Recebi sua mensagem sobre '{subject}'. Vou verificar e fornecer uma resposta detalhada.",
    "Obrigado por entrar em contato sobre '{subject}'. Vou tratar desta questão e responder adequadamente.",
    "Confirmo o recebimento do seu email sobre '{subject}'. Vou processar esta solicitação e retornar em breve.",
    "Obrigado pelo contato. Recebi sua mensagem sobre '{subject}' e vou analisar cuidadosamente.",
    "Confirmo o recebimento do email sobre '{subject}'. Vou verificar os detalhes e retornar com informações.",
    "Obrigado pela sua mensagem sobre '{subject}'. Vou processar esta solicitação e entrar em contato em breve.",
    "Recebi seu email sobre '{subject}'. Vou analisar a situação e fornecer uma resposta completa.",
    "Obrigado pelo email sobre '{subject}'. Vou investigar e retornar com uma solução.",
    "Confirmo o recebimento da sua solicitação sobre '{subject}'. Vou processar e retornar em breve.",
];

/// Replies for non-actionable messages. Not parameterized.
pub const UNPRODUCTIVE_TEMPLATES: &[&str] = &[
    "Obrigado pela sua mensagem. Agradeço por pensar em mim.",
    "Obrigado por entrar em contato. Vou manter isso em mente.",
    "Recebi seu email. Obrigado por compartilhar isso comigo.",
    "Obrigado pela sua mensagem. Agradeço a atualização.",
    "Obrigado pelo contato. Aprecio sua consideração.",
    "Recebi sua mensagem. Obrigado por compartilhar.",
    "Obrigado pelo email. Agradeço o pensamento.",
    "Recebi sua comunicação. Obrigado por manter contato.",
    "Obrigado pela mensagem. Agradeço sua atenção.",
    "Recebi seu contato. Obrigado por compartilhar suas ideias.",
];

/// Deterministic, stateless reply selection per label.
#[derive(Debug)]
pub struct ResponseGenerator {
    productive: Vec<String>,
    unproductive: Vec<String>,
}

impl ResponseGenerator {
    /// Build the generator with the shipped pt-BR template pools.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_pools(PRODUCTIVE_TEMPLATES, UNPRODUCTIVE_TEMPLATES)
    }

    /// Build the generator from custom pools. Empty pools are fatal:
    /// the modulo selection requires non-zero pool sizes.
    pub fn with_pools(productive: &[&str], unproductive: &[&str]) -> Result<Self, ConfigError> {
        if productive.is_empty() {
            return Err(ConfigError::EmptyTemplatePool {
                label: "productive",
            });
        }
        if unproductive.is_empty() {
            return Err(ConfigError::EmptyTemplatePool {
                label: "unproductive",
            });
        }

        Ok(Self {
            productive: productive.iter().map(|s| s.to_string()).collect(),
            unproductive: unproductive.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Render the reply for a label, selecting by subject length.
    pub fn generate(&self, label: Label, subject: &str) -> String {
        let len = subject.chars().count();
        match label {
            Label::Productive => {
                let template = &self.productive[len % self.productive.len()];
                template.replace(SUBJECT_PLACEHOLDER, subject)
            }
            Label::Unproductive => self.unproductive[len % self.unproductive.len()].clone(),
        }
    }
}
