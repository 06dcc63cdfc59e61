//! Golden vectors for canonical entry encoding.
//!
//! The canonical form (keys sorted recursively, compact JSON) feeds the
//! content digest, so any drift in the encoding silently changes every
//! content id. These vectors pin the encoding byte for byte. Digest and
//! content-id consistency are checked by recomputation rather than
//! hardcoded hashes.

use serde_json::{Map, Value};
use veripod_engine::canonical_entry_bytes;

/// One canonical-encoding vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name.
    pub name: &'static str,
    /// Entries in deliberately non-canonical insertion order.
    pub entries_json: &'static str,
    /// Expected canonical encoding: keys sorted recursively, compact.
    pub expected_canonical: &'static str,
}

/// Every golden vector.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "ticket entries, insertion order reversed",
            entries_json: r#"{"signedTimestamp":1731226670791,"attendeeName":"Joe","attendeeEmail":"joe@example.com"}"#,
            expected_canonical: r#"{"attendeeEmail":"joe@example.com","attendeeName":"Joe","signedTimestamp":1731226670791}"#,
        },
        GoldenVector {
            name: "typed pair keys sorted recursively",
            entries_json: r#"{"ticket":{"value":"GA","type":"string"},"zone":"B"}"#,
            expected_canonical: r#"{"ticket":{"type":"string","value":"GA"},"zone":"B"}"#,
        },
        GoldenVector {
            name: "byte-wise key order, capitals and underscores first",
            entries_json: r#"{"b":1,"A":2,"_u":3}"#,
            expected_canonical: r#"{"A":2,"_u":3,"b":1}"#,
        },
        GoldenVector {
            name: "empty entries",
            entries_json: r#"{}"#,
            expected_canonical: r#"{}"#,
        },
        GoldenVector {
            name: "string escapes survive re-serialization",
            entries_json: r#"{"quote":"say \"hi\"","amp":"a&b"}"#,
            expected_canonical: r#"{"amp":"a&b","quote":"say \"hi\""}"#,
        },
        GoldenVector {
            name: "numeric forms preserved, key prefixes sort shorter first",
            entries_json: r#"{"n":-42,"big":"31415926535897932384","flag":true,"nothing":{"type":"null","value":null}}"#,
            expected_canonical: r#"{"big":"31415926535897932384","flag":true,"n":-42,"nothing":{"type":"null","value":null}}"#,
        },
    ]
}

/// Parse a vector's entries, keeping insertion order.
pub fn parse_entries(text: &str) -> Map<String, Value> {
    serde_json::from_str(text).expect("vector entries are valid JSON")
}

/// Check every vector against the engine's canonical encoding.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in all_vectors() {
        let entries = parse_entries(vector.entries_json);
        let canonical = canonical_entry_bytes(&entries);
        if canonical != vector.expected_canonical.as_bytes() {
            return Err(format!(
                "vector {:?}: canonical mismatch, got {}",
                vector.name,
                String::from_utf8_lossy(&canonical),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_verify() {
        verify_all_vectors().unwrap();
    }

    #[test]
    fn test_content_digest_ignores_insertion_order() {
        for vector in all_vectors() {
            let forward = parse_entries(vector.entries_json);
            let mut pairs: Vec<(String, Value)> = forward.clone().into_iter().collect();
            pairs.reverse();
            let backward: Map<String, Value> = pairs.into_iter().collect();

            let a = blake3::hash(&canonical_entry_bytes(&forward));
            let b = blake3::hash(&canonical_entry_bytes(&backward));
            assert_eq!(
                hex::encode(a.as_bytes()),
                hex::encode(b.as_bytes()),
                "vector {:?}",
                vector.name
            );
        }
    }

    #[test]
    fn test_distinct_vectors_have_distinct_digests() {
        let digests: Vec<String> = all_vectors()
            .iter()
            .map(|v| hex::encode(blake3::hash(&canonical_entry_bytes(&parse_entries(v.entries_json))).as_bytes()))
            .collect();
        for (i, a) in digests.iter().enumerate() {
            for b in digests.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_vector_canonical_text_is_itself_canonical() {
        // Re-encoding the expected canonical text must be a fixed point.
        for vector in all_vectors() {
            let entries = parse_entries(vector.expected_canonical);
            assert_eq!(
                canonical_entry_bytes(&entries),
                vector.expected_canonical.as_bytes(),
                "vector {:?}",
                vector.name
            );
        }
    }
}
