//! Canned records and damaged-text samples.
//!
//! The damaged constants each hold a record that went through some real-world
//! mangling (chat paste, Python repr, hand editing). Every member of
//! [`damaged_corpus`] repairs back to a record that passes structural and
//! entry validation.

use serde_json::{json, Map, Value};
use veripod_engine::Keypair;

/// Entries for a plausible event ticket, mixing bare and typed values.
pub fn ticket_entries() -> Map<String, Value> {
    let mut entries = Map::new();
    entries.insert("attendeeName".into(), json!("Dana Ito"));
    entries.insert("attendeeEmail".into(), json!("dana@example.org"));
    entries.insert("eventName".into(), json!("ZuConnect 2024"));
    entries.insert("ticketName".into(), json!("General Admission"));
    entries.insert("isConsumed".into(), json!({"type": "boolean", "value": false}));
    entries.insert("signedTimestamp".into(), json!(1_731_226_670_791_i64));
    entries.insert(
        "ticketSecret".into(),
        json!({"type": "cryptographic", "value": "31415926535897932384"}),
    );
    entries
}

/// A single-entry map for tests that do not care about content.
pub fn minimal_entries() -> Map<String, Value> {
    let mut entries = Map::new();
    entries.insert("name".into(), json!("Ada"));
    entries
}

/// Signs [`ticket_entries`] with a keypair derived from `seed`.
pub fn signed_record(seed: [u8; 32]) -> Value {
    Keypair::from_seed(&seed).sign_record(ticket_entries())
}

/// [`signed_record`] serialized to compact JSON.
pub fn signed_record_text(seed: [u8; 32]) -> String {
    signed_record(seed).to_string()
}

/// Returns a copy of `record` with the attendee name swapped out, which
/// breaks the signature without touching the record shape.
pub fn tampered(record: &Value) -> Value {
    let mut copy = record.clone();
    if let Some(entries) = copy.get_mut("entries").and_then(Value::as_object_mut) {
        entries.insert("attendeeName".into(), json!("Mallory"));
    }
    copy
}

pub const TRAILING_COMMA: &str =
    r#"{"entries": {"name": "Ada"}, "signature": "c2ln", "signerPublicKey": "a2V5", }"#;

pub const UNQUOTED_KEYS: &str =
    r#"{entries: {name: "Ada"}, signature: "c2ln", signerPublicKey: "a2V5"}"#;

pub const SINGLE_QUOTES: &str =
    r#"{'entries': {'name': 'Ada'}, 'signature': 'c2ln', 'signerPublicKey': 'a2V5'}"#;

pub const PYTHON_LITERALS: &str = r#"{"entries": {"vip": True, "waitlisted": False, "claimedAt": {"type": "null", "value": None}}, "signature": "c2ln", "signerPublicKey": "a2V5"}"#;

pub const COMMENTED: &str = r#"{
  // exported 2024-11-10
  "entries": {"name": "Ada"}, /* redacted */
  "signature": "c2ln",
  "signerPublicKey": "a2V5"
}"#;

pub const DOUBLED_QUOTES: &str = r#"{""entries"": {""name"": ""Ada""}, ""signature"": ""c2ln"", ""signerPublicKey"": ""a2V5""}"#;

pub const REPEATED_COMMAS: &str =
    r#"{"entries": {"name": "Ada",, "seat": "12F"}, "signature": "c2ln",, "signerPublicKey": "a2V5"}"#;

pub const MIXED_DAMAGE: &str = r#"{
  // pasted from chat
  entries: {name: 'Ada', vip: True,},
  signature: "c2ln",
  'signerPublicKey': "a2V5",
}"#;

/// Not a record at all. Stays broken after repair.
pub const UNREPAIRABLE: &str = r#"{"entries": {"name": "Ada""#;

/// Every repairable sample above.
pub fn damaged_corpus() -> Vec<&'static str> {
    vec![
        TRAILING_COMMA,
        UNQUOTED_KEYS,
        SINGLE_QUOTES,
        PYTHON_LITERALS,
        COMMENTED,
        DOUBLED_QUOTES,
        REPEATED_COMMAS,
        MIXED_DAMAGE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use veripod::Verifier;
    use veripod_core::{is_valid_record_json, repair, validate_entries, RecordView};
    use veripod_engine::Ed25519Engine;

    #[test]
    fn ticket_entries_pass_validation() {
        assert!(validate_entries(&ticket_entries()).is_ok());
    }

    #[tokio::test]
    async fn minimal_record_verifies_end_to_end() {
        let text = Keypair::from_seed(&[9u8; 32])
            .sign_record(minimal_entries())
            .to_string();
        let outcome = Verifier::new(Ed25519Engine::new()).verify(&text).await.unwrap();
        assert!(outcome.signature_valid);
        assert!(!outcome.repaired);
        assert_eq!(outcome.entry_count, 1);
        assert_eq!(outcome.entries["name"], json!("Ada"));
    }

    #[test]
    fn signed_record_is_deterministic() {
        assert_eq!(signed_record([7u8; 32]), signed_record([7u8; 32]));
    }

    #[test]
    fn tampering_changes_the_attendee() {
        let record = signed_record([7u8; 32]);
        let forged = tampered(&record);
        assert_ne!(record, forged);
        assert_eq!(forged["entries"]["attendeeName"], json!("Mallory"));
    }

    #[test]
    fn corpus_members_repair_to_valid_records() {
        for text in damaged_corpus() {
            let result = repair(text);
            let value = result.value.as_ref().unwrap_or_else(|| {
                panic!("sample did not repair: {text}");
            });
            assert!(is_valid_record_json(&result.canonical_text), "sample: {text}");
            let view = RecordView::from_value(value).unwrap();
            assert!(validate_entries(view.entries()).is_ok(), "sample: {text}");
        }
    }

    #[test]
    fn unrepairable_sample_stays_broken() {
        let result = repair(UNREPAIRABLE);
        assert!(result.value.is_none());
        assert!(result.error.is_some());
    }
}
