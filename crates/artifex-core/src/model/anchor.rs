//! Citation anchor classification

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    QuoteAnchor,
    ExternalSource,
    Inference,
    Synthesis,
    Axiomatic,
    Unrecognized,
}

/// One classified `anchors` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// `§N` or `§N-M` into the transcript corpus
    Quote { start: u32, end: u32 },
    /// `EV-NNN` evidence record or `ext:...` source
    External(String),
    Inference,
    Synthesis,
    Axiomatic,
    Unrecognized(String),
}

impl Anchor {
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "inference" => return Anchor::Inference,
            "synthesis" => return Anchor::Synthesis,
            "axiomatic" => return Anchor::Axiomatic,
            _ => {}
        }
        if let Some(range) = trimmed.strip_prefix('§') {
            return parse_quote(range).unwrap_or_else(|| Anchor::Unrecognized(raw.to_string()));
        }
        if is_evidence_record(trimmed)
            || trimmed
                .strip_prefix("ext:")
                .is_some_and(|rest| !rest.trim().is_empty())
        {
            return Anchor::External(trimmed.to_string());
        }
        Anchor::Unrecognized(raw.to_string())
    }

    pub fn kind(&self) -> AnchorKind {
        match self {
            Anchor::Quote { .. } => AnchorKind::QuoteAnchor,
            Anchor::External(_) => AnchorKind::ExternalSource,
            Anchor::Inference => AnchorKind::Inference,
            Anchor::Synthesis => AnchorKind::Synthesis,
            Anchor::Axiomatic => AnchorKind::Axiomatic,
            Anchor::Unrecognized(_) => AnchorKind::Unrecognized,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Anchor::Unrecognized(_))
    }
}

// Digit runs past `u32::MAX` saturate; they are still quote anchors, only out of range.
fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

// `§0` still classifies as a quote so the range rule can report it.
fn parse_quote(range: &str) -> Option<Anchor> {
    match range.split_once('-') {
        None => {
            let n = parse_number(range)?;
            Some(Anchor::Quote { start: n, end: n })
        }
        Some((start, end)) => {
            let start = parse_number(start)?;
            let end = parse_number(end)?;
            (start <= end).then_some(Anchor::Quote { start, end })
        }
    }
}

fn is_evidence_record(raw: &str) -> bool {
    raw.strip_prefix("EV-")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_form() {
        assert_eq!(Anchor::classify("§12"), Anchor::Quote { start: 12, end: 12 });
        assert_eq!(Anchor::classify("§10-14"), Anchor::Quote { start: 10, end: 14 });
        assert_eq!(Anchor::classify("EV-007").kind(), AnchorKind::ExternalSource);
        assert_eq!(Anchor::classify("ext:doi/10.1000/1").kind(), AnchorKind::ExternalSource);
        assert_eq!(Anchor::classify("inference"), Anchor::Inference);
        assert_eq!(Anchor::classify("synthesis"), Anchor::Synthesis);
        assert_eq!(Anchor::classify("axiomatic"), Anchor::Axiomatic);
    }

    #[test]
    fn malformed_forms_are_unrecognized() {
        for raw in ["§", "§14-10", "§a", "EV-", "ext:", "see above", "Inference"] {
            assert_eq!(Anchor::classify(raw).kind(), AnchorKind::Unrecognized, "{}", raw);
        }
    }

    #[test]
    fn oversized_numbers_stay_quotes() {
        assert_eq!(
            Anchor::classify("§4294967296"),
            Anchor::Quote { start: u32::MAX, end: u32::MAX }
        );
        assert_eq!(
            Anchor::classify("§3-99999999999"),
            Anchor::Quote { start: 3, end: u32::MAX }
        );
        assert_eq!(Anchor::classify("§99999999999-3").kind(), AnchorKind::Unrecognized);
    }
}
