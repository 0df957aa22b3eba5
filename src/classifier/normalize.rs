//! Text normalization and feature extraction.
//!
//! Turns raw subject/body text into the canonical feature string the
//! statistical model consumes: lowercase, URLs and email addresses stripped,
//! only alphabetic characters kept, stop words and short tokens dropped,
//! remaining tokens stemmed. Cleaning is total — any input, including the
//! empty string, produces a (possibly empty) string, never an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Portuguese stop words dropped during tokenization.
///
/// Membership is tested after cleaning, so only entries that survive the
/// alphabetic filter ever match.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "de", "a", "o", "que", "e", "do", "da", "em", "um", "para", "é", "com", "não", "uma",
        "os", "no", "se", "na", "por", "mais", "as", "dos", "como", "mas", "foi", "ao", "ele",
        "das", "tem", "à", "seu", "sua", "ou", "ser", "quando", "muito", "há", "nos", "já",
        "está", "eu", "também", "só", "pelo", "pela", "até", "isso", "ela", "entre", "era",
        "depois", "sem", "mesmo", "aos", "ter", "seus", "quem", "nas", "me", "esse", "eles",
        "estão", "você", "tinha", "foram", "essa", "num", "nem", "suas", "meu", "às", "minha",
        "têm", "numa", "pelos", "elas", "havia", "seja", "qual", "será", "nós", "tenho", "lhe",
        "deles", "essas", "esses", "pelas", "este", "fosse", "dele", "tu", "te", "vocês", "vos",
        "lhes", "meus", "minhas", "teu", "tua", "teus", "tuas", "nosso", "nossa", "nossos",
        "nossas", "dela", "delas", "esta", "estes", "estas", "aquele", "aquela", "aqueles",
        "aquelas", "isto", "aquilo", "estou", "estamos", "estive", "esteve", "estivemos",
        "estiveram", "estava", "estávamos", "estavam", "seria", "sou", "somos", "são",
        "fui", "fomos", "sido", "sendo", "tinham", "tive", "teve", "tivemos", "tiveram",
        "tendo", "tido", "vai", "vão", "vou", "pode", "podem",
    ]
    .into_iter()
    .collect()
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http[s]?://\S+").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static NON_ALPHA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Minimum token length kept after cleaning (strictly greater than).
const MIN_TOKEN_LEN: usize = 2;

/// Cleans text and extracts stemmed feature strings.
pub struct TextNormalizer {
    stemmer: Stemmer,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::Portuguese),
        }
    }

    /// Clean raw text into a lowercase alphabetic-only string.
    ///
    /// Strips URLs, embedded email addresses, digits, and punctuation;
    /// collapses whitespace runs; trims both ends.
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = text.to_lowercase();
        let text = URL_RE.replace_all(&text, "");
        let text = EMAIL_RE.replace_all(&text, "");
        let text = NON_ALPHA_RE.replace_all(&text, "");
        let text = WHITESPACE_RE.replace_all(&text, " ");
        text.trim().to_string()
    }

    /// Split cleaned text into word tokens, drop stop words and short
    /// tokens, and stem what remains.
    pub fn tokenize_and_reduce(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|token| !STOP_WORDS.contains(token) && token.len() > MIN_TOKEN_LEN)
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect()
    }

    /// Combine subject and body into the single feature string passed to
    /// the statistical model. Both fields are cleaned independently.
    pub fn extract_features(&self, subject: &str, message: &str) -> String {
        let combined = format!("{} {}", self.clean(subject), self.clean(message));
        self.tokenize_and_reduce(&combined).join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
