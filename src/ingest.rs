//! Line-oriented batch ingestion.
//!
//! Parses the exchange format used for bulk email drops: one record per
//! line, `sender|subject|message`, fields trimmed. Blank lines and lines
//! with fewer than three fields are skipped, not fatal — a partially
//! malformed batch still yields its parseable records.

use std::path::Path;

use tracing::warn;

use crate::error::IngestError;

/// One parsed batch record.
#[derive(Debug, Clone)]
pub struct EmailRecord {
    /// Sender address. Opaque to the classifier; carried through for the
    /// caller's bookkeeping.
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Parse batch content into records.
///
/// The message field may itself contain `|` characters: only the first two
/// separators split the line.
pub fn parse_batch(content: &str) -> Vec<EmailRecord> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut parts = line.splitn(3, '|');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(email), Some(subject), Some(message)) => Some(EmailRecord {
                    email: email.trim().to_string(),
                    subject: subject.trim().to_string(),
                    message: message.trim().to_string(),
                }),
                _ => {
                    warn!(line, "skipping malformed batch line");
                    None
                }
            }
        })
        .collect()
}

/// Read and parse a `.txt` batch file.
pub fn read_batch_file(path: &Path) -> Result<Vec<EmailRecord>, IngestError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "txt" {
        return Err(IngestError::UnsupportedExtension { extension });
    }

    let content = std::fs::read_to_string(path)?;
    Ok(parse_batch(&content))
}
