//! Proptest strategies for records, entries, and damaged text.
//!
//! Damage styles mirror the mangling the repair pass is built for, and each
//! one is value-preserving for the alphabets these generators use, so
//! properties can compare a repaired record against the original value.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Names the entry validator accepts.
pub fn entry_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}".prop_map(String::from)
}

/// Bare values, which the validator types by inference.
pub fn bare_entry_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[A-Za-z0-9 ]{0,24}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

/// Explicit `{type, value}` pairs covering the full type set.
pub fn typed_entry_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[A-Za-z0-9 ]{0,24}".prop_map(|s| json!({"type": "string", "value": s})),
        any::<i64>().prop_map(|n| json!({"type": "int", "value": n})),
        any::<i64>().prop_map(|n| json!({"type": "int", "value": n.to_string()})),
        any::<u64>().prop_map(|n| json!({"type": "cryptographic", "value": n.to_string()})),
        any::<bool>().prop_map(|b| json!({"type": "boolean", "value": b})),
        "20[0-9]{2}-0[1-9]-1[0-9]".prop_map(|d| json!({"type": "date", "value": d})),
        "[A-Za-z0-9+/]{43}".prop_map(|k| json!({"type": "eddsa_pubkey", "value": k})),
        "[A-Za-z0-9]{8,24}".prop_map(|b| json!({"type": "bytes", "value": b})),
        Just(json!({"type": "null", "value": null})),
    ]
}

pub fn entry_value() -> impl Strategy<Value = Value> {
    prop_oneof![bare_entry_value(), typed_entry_value()]
}

/// An entries map with unique names.
pub fn entries_map(max_entries: usize) -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(entry_name(), entry_value(), 0..=max_entries)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// A structurally complete record. The signature fields are plausible
/// base64 text but carry no cryptographic meaning.
pub fn record_value(max_entries: usize) -> impl Strategy<Value = Value> {
    (entries_map(max_entries), "[A-Za-z0-9+/]{43,86}", "[A-Za-z0-9+/]{43}").prop_map(
        |(entries, signature, signer)| {
            json!({
                "entries": entries,
                "signature": signature,
                "signerPublicKey": signer,
            })
        },
    )
}

/// [`record_value`] serialized to compact JSON.
pub fn record_text(max_entries: usize) -> impl Strategy<Value = String> {
    record_value(max_entries).prop_map(|value| value.to_string())
}

/// A damaged rendering of a record, paired with the value it should
/// repair back to.
pub fn damaged_record_text() -> impl Strategy<Value = (String, Value)> {
    (record_value(4), 0usize..6).prop_map(|(value, style)| {
        let text = value.to_string();
        (damage(&text, style), value)
    })
}

/// Text that stresses the repair walker without any shape guarantee.
pub fn arbitrary_text() -> impl Strategy<Value = String> {
    prop_oneof![
        damaged_record_text().prop_map(|(text, _)| text),
        record_text(3),
        "[{}\\[\\],:'\"A-Za-z0-9 \\\\]{0,60}".prop_map(String::from),
        ".{0,80}".prop_map(String::from),
    ]
}

fn damage(text: &str, style: usize) -> String {
    match style {
        // Trailing comma before the closing brace.
        0 => format!("{},}}", &text[..text.len() - 1]),
        // Byte-order mark plus a line comment.
        1 => format!("\u{feff}// wallet export\n{text}"),
        // The top-level key loses its quotes.
        2 => text.replacen("\"entries\"", "entries", 1),
        // Pretty-printed with a trailing comma.
        3 => {
            let pretty = serde_json::from_str::<Value>(text)
                .map(|v| serde_json::to_string_pretty(&v).unwrap_or_else(|_| text.to_string()))
                .unwrap_or_else(|_| text.to_string());
            format!("{},\n}}", pretty.trim_end().trim_end_matches('}').trim_end())
        }
        // Every comma doubled. Generated strings never contain commas.
        4 => text.replace(',', ",,"),
        // Python boolean literals. Generated strings never contain colons.
        _ => text.replace(":true", ":True").replace(":false", ":False"),
    }
}
