//! Transcript parser with validation

#![allow(clippy::result_large_err)]

use crate::errors::{transcript_invalid, Result};
use crate::transcript::format::TranscriptV0;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    Json,
    Yaml,
}

impl TranscriptFormat {
    /// `.json` is JSON; anything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TranscriptFormat::Json,
            _ => TranscriptFormat::Yaml,
        }
    }
}

/// Parse a transcript file, choosing the format by extension
pub fn parse_transcript_file(path: &Path) -> Result<TranscriptV0> {
    let content = fs::read_to_string(path).map_err(|e| {
        transcript_invalid(&format!("Failed to read transcript {}: {}", path.display(), e))
    })?;
    parse_transcript_str(&content, TranscriptFormat::from_path(path))
}

pub fn parse_transcript_str(content: &str, format: TranscriptFormat) -> Result<TranscriptV0> {
    let transcript: TranscriptV0 = match format {
        TranscriptFormat::Json => serde_json::from_str(content)
            .map_err(|e| transcript_invalid(&format!("JSON parse error: {}", e)))?,
        TranscriptFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| transcript_invalid(&format!("YAML parse error: {}", e)))?,
    };
    validate_transcript(&transcript)?;
    Ok(transcript)
}

fn validate_transcript(transcript: &TranscriptV0) -> Result<()> {
    if transcript.schema_version != 0 {
        return Err(transcript_invalid(&format!(
            "Unsupported schema_version: {}. Expected 0",
            transcript.schema_version
        )));
    }
    if transcript.session_id.trim().is_empty() {
        return Err(transcript_invalid("session_id must not be empty"));
    }

    let mut seen = HashSet::new();
    for message in &transcript.messages {
        if message.id.trim().is_empty() {
            return Err(transcript_invalid("message id must not be empty"));
        }
        if !seen.insert(message.id.as_str()) {
            return Err(transcript_invalid(&format!(
                "Duplicate message id {}",
                message.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
schema_version: 0
session_id: s-1
messages:
  - id: m-1
    sender: alice
    timestamp: 2026-03-01T09:00:00Z
    subject: kickoff
    body: hello
"#;

    #[test]
    fn test_parse_yaml() {
        let transcript = parse_transcript_str(YAML, TranscriptFormat::Yaml).unwrap();
        let messages = transcript.to_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].session_id.as_str(), "s-1");
        assert_eq!(messages[0].subject, "kickoff");
    }

    #[test]
    fn test_rejects_unknown_schema_version() {
        let doc = YAML.replace("schema_version: 0", "schema_version: 3");
        let err = parse_transcript_str(&doc, TranscriptFormat::Yaml).unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_TRANSCRIPT");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TranscriptFormat::from_path(Path::new("t.JSON")), TranscriptFormat::Json);
        assert_eq!(TranscriptFormat::from_path(Path::new("t.yml")), TranscriptFormat::Yaml);
    }
}
