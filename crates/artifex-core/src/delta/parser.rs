use crate::delta::fence::{extract_delta_blocks, DeltaBlock};
use crate::model::section::field_is_present;
use crate::model::{CrossRef, Location, OpKind, Operation, Section, Violation};
use serde_json::{Map, Value};

const ALLOWED_KEYS: [&str; 7] = [
    "operation",
    "section",
    "target_id",
    "payload",
    "rationale",
    "evidence_refs",
    "references",
];

/// Operations and rejections extracted from one message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub operations: Vec<Operation>,
    pub violations: Vec<Violation>,
}

/// Parse every delta block in a message body
///
/// Blocks are independent: a rejected block records exactly one violation
/// and its siblings are still parsed. Pure function of its inputs.
pub fn parse_message(message_id: &str, body: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    for block in extract_delta_blocks(body) {
        match parse_block(message_id, &block) {
            Ok(op) => outcome.operations.push(op),
            Err(violation) => {
                tracing::debug!(
                    message_id,
                    block = block.ordinal,
                    rule_id = %violation.rule_id,
                    "delta block rejected"
                );
                outcome.violations.push(violation);
            }
        }
    }
    outcome
}

/// Validate one block into an operation
///
/// # Errors
///
/// Returns the single `W1xx` violation describing why the block was dropped.
pub fn parse_block(message_id: &str, block: &DeltaBlock) -> Result<Operation, Violation> {
    let reject = |rule_id: &str, message: String| {
        Violation::rejection(rule_id, message, Location::block(message_id, block.ordinal))
    };

    let value: Value = serde_json::from_str(&block.body)
        .map_err(|e| reject("W101", format!("delta block is not valid JSON: {}", e)))?;
    let Value::Object(object) = value else {
        return Err(reject("W101", "delta block is not a JSON object".to_string()));
    };
    if let Some(unknown) = object.keys().find(|k| !ALLOWED_KEYS.contains(&k.as_str())) {
        return Err(reject("W101", format!("unknown key '{}' in delta block", unknown)));
    }

    let (Some(operation), Some(section), Some(payload)) = (
        object.get("operation"),
        object.get("section"),
        object.get("payload"),
    ) else {
        return Err(reject(
            "W102",
            "delta block must carry operation, section and payload".to_string(),
        ));
    };
    let Value::Object(payload) = payload else {
        return Err(reject("W102", "payload must be a JSON object".to_string()));
    };
    let rationale = match object.get("rationale") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(reject("W102", "rationale must be a string".to_string())),
    };

    let kind = operation
        .as_str()
        .and_then(OpKind::from_wire)
        .ok_or_else(|| reject("W103", format!("unknown operation {}", operation)))?;
    let section = section
        .as_str()
        .and_then(Section::from_wire)
        .ok_or_else(|| reject("W104", format!("unknown section {}", section)))?;

    let target_id = match (kind, object.get("target_id")) {
        (OpKind::Add, None | Some(Value::Null)) => None,
        (OpKind::Add, Some(other)) => {
            return Err(reject(
                "W105",
                format!("ADD must not carry a target_id (got {})", other),
            ))
        }
        (_, Some(Value::String(id))) if !id.trim().is_empty() => Some(id.trim().to_string()),
        (kind, _) => {
            return Err(reject(
                "W106",
                format!("{} requires a target_id string", kind),
            ))
        }
    };

    let evidence_refs =
        parse_evidence_refs(object.get("evidence_refs")).map_err(|m| reject("W109", m))?;
    let references =
        parse_references(object.get("references")).map_err(|m| reject("W109", m))?;

    match kind {
        OpKind::Add => {
            for field in section.required_fields() {
                let value = payload.get(*field);
                if !field_is_present(value) {
                    return Err(reject(
                        "W107",
                        format!("ADD to {} is missing required field '{}'", section, field),
                    ));
                }
                if let Some(value) = value {
                    if !section.field_has_expected_shape(field, value) {
                        return Err(reject(
                            "W107",
                            format!("field '{}' of {} has the wrong type", field, section),
                        ));
                    }
                }
            }
        }
        OpKind::Kill => {
            let reason = payload.get("reason").and_then(Value::as_str);
            if reason.map_or(true, |r| r.trim().is_empty()) {
                return Err(reject("W108", "KILL requires a non-empty reason".to_string()));
            }
        }
        OpKind::Edit => {}
    }

    Ok(Operation {
        kind,
        section,
        target_id,
        payload: payload.clone(),
        rationale,
        evidence_refs,
        references,
    })
}

fn parse_evidence_refs(value: Option<&Value>) -> Result<Vec<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| {
                entry
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("evidence_refs entry {} is not a string", entry))
            })
            .collect(),
        Some(_) => Err("evidence_refs must be a list of strings".to_string()),
    }
}

fn parse_references(value: Option<&Value>) -> Result<Vec<CrossRef>, String> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err("references must be a list".to_string()),
    };
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let object = entry
                .as_object()
                .ok_or_else(|| format!("references[{}] is not an object", i))?;
            let text = |key: &str, object: &Map<String, Value>| {
                object
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| format!("references[{}] is missing '{}'", i, key))
            };
            Ok(CrossRef {
                session: text("session", object)?,
                item: text("item", object)?,
                relation: text("relation", object)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(body: &str) -> DeltaBlock {
        DeltaBlock {
            ordinal: 1,
            line: 1,
            body: body.to_string(),
        }
    }

    fn rejected(body: &str) -> String {
        parse_block("m-1", &block(body)).unwrap_err().rule_id
    }

    #[test]
    fn accepts_minimal_add() {
        let op = parse_block(
            "m-1",
            &block(r#"{"operation":"ADD","section":"hypothesis_slate","target_id":null,"payload":{"name":"n","claim":"c"}}"#),
        )
        .unwrap();
        assert_eq!(op.kind, OpKind::Add);
        assert_eq!(op.section, Section::HypothesisSlate);
        assert!(op.target_id.is_none());
    }

    #[test]
    fn each_failure_has_its_own_rule() {
        assert_eq!(rejected("{not json"), "W101");
        assert_eq!(rejected("[1,2]"), "W101");
        assert_eq!(
            rejected(r#"{"operation":"ADD","section":"hypothesis_slate","payload":{},"extra":1}"#),
            "W101"
        );
        assert_eq!(rejected(r#"{"operation":"ADD","section":"hypothesis_slate"}"#), "W102");
        assert_eq!(
            rejected(r#"{"operation":"MOVE","section":"hypothesis_slate","payload":{}}"#),
            "W103"
        );
        assert_eq!(rejected(r#"{"operation":"ADD","section":"appendix","payload":{}}"#), "W104");
        assert_eq!(
            rejected(r#"{"operation":"ADD","section":"hypothesis_slate","target_id":"H1","payload":{"name":"n","claim":"c"}}"#),
            "W105"
        );
        assert_eq!(
            rejected(r#"{"operation":"EDIT","section":"hypothesis_slate","target_id":null,"payload":{}}"#),
            "W106"
        );
        assert_eq!(
            rejected(r#"{"operation":"ADD","section":"hypothesis_slate","payload":{"name":"n"}}"#),
            "W107"
        );
        assert_eq!(
            rejected(r#"{"operation":"KILL","section":"hypothesis_slate","target_id":"H1","payload":{}}"#),
            "W108"
        );
        assert_eq!(
            rejected(r#"{"operation":"EDIT","section":"hypothesis_slate","target_id":"H1","payload":{},"references":[{"session":"s"}]}"#),
            "W109"
        );
    }

    #[test]
    fn typed_required_fields_are_checked() {
        assert_eq!(
            rejected(r#"{"operation":"ADD","section":"discriminative_tests","payload":{"name":"t","procedure":"p","discriminates":"H1"}}"#),
            "W107"
        );
    }

    #[test]
    fn one_bad_block_does_not_affect_siblings() {
        let body = "```delta\n{oops}\n```\ntext\n```delta\n{\"operation\":\"KILL\",\"section\":\"hypothesis_slate\",\"target_id\":\"H2\",\"payload\":{\"reason\":\"dup\"}}\n```\n";
        let outcome = parse_message("m-9", body);
        assert_eq!(outcome.operations.len(), 1);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].location.block, Some(1));
        assert_eq!(outcome.operations[0].reason(), Some("dup"));
    }
}
