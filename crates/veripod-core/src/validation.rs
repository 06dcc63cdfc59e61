//! Record validation: top-level structure and per-entry checks.
//!
//! Structure is checked field by field in a fixed order, so a record with
//! several problems always reports the same first one. Entry validation
//! walks the entries map in insertion order and stops at the first bad
//! entry.

use serde_json::{Map, Value};

use crate::entry::{check_value_shape, is_valid_entry_name, resolve_entry};
use crate::error::{EntryError, StructureError};

/// A structurally validated borrow of a parsed record.
///
/// Holding a `RecordView` proves the three required fields exist with the
/// right JSON types. Entry contents are a separate concern; see
/// [`validate_entries`].
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    entries: &'a Map<String, Value>,
    signature: &'a str,
    signer_public_key: &'a str,
}

impl<'a> RecordView<'a> {
    /// Validate the top-level shape of `value` and borrow its fields.
    pub fn from_value(value: &'a Value) -> Result<Self, StructureError> {
        // 1. Must be an object.
        let record = value.as_object().ok_or(StructureError::NotAnObject)?;

        // 2. entries: present, and an object.
        let entries = match record.get("entries") {
            None => return Err(StructureError::MissingEntries),
            Some(v) => v.as_object().ok_or(StructureError::EntriesNotAnObject)?,
        };

        // 3. signature: present, a non-empty string.
        let signature = match record.get("signature") {
            None => return Err(StructureError::MissingSignature),
            Some(v) => match v.as_str() {
                Some(s) if !s.is_empty() => s,
                _ => return Err(StructureError::InvalidSignature),
            },
        };

        // 4. signerPublicKey: present, a non-empty string.
        let signer_public_key = match record.get("signerPublicKey") {
            None => return Err(StructureError::MissingSignerPublicKey),
            Some(v) => match v.as_str() {
                Some(s) if !s.is_empty() => s,
                _ => return Err(StructureError::InvalidSignerPublicKey),
            },
        };

        Ok(RecordView {
            entries,
            signature,
            signer_public_key,
        })
    }

    pub fn entries(&self) -> &'a Map<String, Value> {
        self.entries
    }

    pub fn signature(&self) -> &'a str {
        self.signature
    }

    pub fn signer_public_key(&self) -> &'a str {
        self.signer_public_key
    }
}

/// Validate top-level record structure.
pub fn validate_structure(value: &Value) -> Result<(), StructureError> {
    RecordView::from_value(value).map(|_| ())
}

/// Validate every entry in map order, failing on the first bad one.
///
/// Checks, per entry: identifier-shaped name, resolvable type, and value
/// shape matching the type. An empty map is valid.
pub fn validate_entries(entries: &Map<String, Value>) -> Result<(), EntryError> {
    for (name, raw) in entries {
        if !is_valid_entry_name(name) {
            return Err(EntryError::InvalidName {
                name: name.clone(),
            });
        }
        let resolved = resolve_entry(name, raw)?;
        check_value_shape(name, resolved.ty, resolved.value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use serde_json::json;

    fn good_record() -> Value {
        json!({
            "entries": {"attendeeName": "Alice", "seats": 2},
            "signature": "c2lnbmF0dXJl",
            "signerPublicKey": "cHVibGlja2V5"
        })
    }

    #[test]
    fn test_valid_record() {
        let record = good_record();
        let view = RecordView::from_value(&record).unwrap();
        assert_eq!(view.signature(), "c2lnbmF0dXJl");
        assert_eq!(view.signer_public_key(), "cHVibGlja2V5");
        assert_eq!(view.entries().len(), 2);
        assert!(validate_entries(view.entries()).is_ok());
    }

    #[test]
    fn test_not_an_object() {
        for value in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            assert!(matches!(
                validate_structure(&value),
                Err(StructureError::NotAnObject)
            ));
        }
    }

    #[test]
    fn test_missing_entries() {
        let record = json!({"signature": "s", "signerPublicKey": "k"});
        assert!(matches!(
            validate_structure(&record),
            Err(StructureError::MissingEntries)
        ));
    }

    #[test]
    fn test_entries_wrong_type() {
        for entries in [json!([1]), json!("x"), json!(null)] {
            let record = json!({"entries": entries, "signature": "s", "signerPublicKey": "k"});
            assert!(matches!(
                validate_structure(&record),
                Err(StructureError::EntriesNotAnObject)
            ));
        }
    }

    #[test]
    fn test_missing_signature() {
        let record = json!({"entries": {}, "signerPublicKey": "k"});
        assert!(matches!(
            validate_structure(&record),
            Err(StructureError::MissingSignature)
        ));
    }

    #[test]
    fn test_empty_signature() {
        let record = json!({"entries": {}, "signature": "", "signerPublicKey": "k"});
        assert!(matches!(
            validate_structure(&record),
            Err(StructureError::InvalidSignature)
        ));
    }

    #[test]
    fn test_non_string_signature() {
        let record = json!({"entries": {}, "signature": 7, "signerPublicKey": "k"});
        assert!(matches!(
            validate_structure(&record),
            Err(StructureError::InvalidSignature)
        ));
    }

    #[test]
    fn test_missing_signer_public_key() {
        let record = json!({"entries": {}, "signature": "s"});
        assert!(matches!(
            validate_structure(&record),
            Err(StructureError::MissingSignerPublicKey)
        ));
    }

    #[test]
    fn test_empty_signer_public_key() {
        let record = json!({"entries": {}, "signature": "s", "signerPublicKey": ""});
        assert!(matches!(
            validate_structure(&record),
            Err(StructureError::InvalidSignerPublicKey)
        ));
    }

    #[test]
    fn test_first_failed_check_wins() {
        // Both signature and signerPublicKey are missing; signature is
        // checked first.
        let record = json!({"entries": {}});
        assert!(matches!(
            validate_structure(&record),
            Err(StructureError::MissingSignature)
        ));
    }

    #[test]
    fn test_structure_before_entries() {
        // A record with a bad entry AND a missing signature reports the
        // structural problem; entry validation is a later stage.
        let record = json!({"entries": {"1bad": 1}});
        assert!(matches!(
            validate_structure(&record),
            Err(StructureError::MissingSignature)
        ));
    }

    #[test]
    fn test_empty_entries_is_valid() {
        let record = json!({"entries": {}, "signature": "s", "signerPublicKey": "k"});
        assert!(validate_structure(&record).is_ok());
        assert!(validate_entries(record["entries"].as_object().unwrap()).is_ok());
    }

    #[test]
    fn test_extra_top_level_fields_ignored() {
        let record = json!({
            "entries": {}, "signature": "s", "signerPublicKey": "k",
            "version": 2, "meta": {"source": "test"}
        });
        assert!(validate_structure(&record).is_ok());
    }

    #[test]
    fn test_entries_fail_fast_in_insertion_order() {
        // serde_json is built with preserve_order, so the first inserted
        // bad entry is the one reported.
        let mut entries = Map::new();
        entries.insert("ok".to_string(), json!("fine"));
        entries.insert("bad-name".to_string(), json!(1));
        entries.insert("alsoBad".to_string(), json!([1]));

        let err = validate_entries(&entries).unwrap_err();
        assert!(matches!(err, EntryError::InvalidName { name } if name == "bad-name"));
    }

    #[test]
    fn test_entry_type_mismatch_reported() {
        let mut entries = Map::new();
        entries.insert(
            "flag".to_string(),
            json!({"type": "boolean", "value": "true"}),
        );

        let err = validate_entries(&entries).unwrap_err();
        assert!(matches!(
            err,
            EntryError::TypeMismatch {
                ty: EntryType::Boolean,
                ..
            }
        ));
    }

    #[test]
    fn test_full_typed_record_validates() {
        let record = json!({
            "entries": {
                "attendeeEmail": {"type": "string", "value": "a@b.example"},
                "ticketId": {"type": "string", "value": "0x1a2b"},
                "seat": {"type": "int", "value": "12"},
                "nonce": {"type": "cryptographic", "value": "31337"},
                "checkedIn": {"type": "boolean", "value": false},
                "issuedAt": {"type": "date", "value": "2024-11-09T08:00:00.000"},
                "issuerKey": {"type": "eddsa_pubkey", "value": "AAAA"},
                "payload": {"type": "bytes", "value": "aGVsbG8"},
                "note": {"type": "null", "value": null}
            },
            "signature": "s",
            "signerPublicKey": "k"
        });
        let view = RecordView::from_value(&record).unwrap();
        assert!(validate_entries(view.entries()).is_ok());
    }
}
