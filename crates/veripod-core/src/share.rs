//! Share-URL codec: record text to URL-safe token and back.
//!
//! Tokens are unpadded URL-safe base64 over a canonical form of the
//! record text. Canonicalization keeps tokens short and makes two
//! spellings of the same record encode identically; text that does not
//! parse is still encodable, with whitespace collapsed instead.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use url::Url;

use crate::error::ShareUrlError;

/// Query parameter carrying the record token.
pub const RECORD_PARAM: &str = "pod";

/// Canonicalize record text for encoding.
///
/// Valid JSON is re-serialized compactly (no insignificant whitespace).
/// Invalid text falls back to whitespace-collapse so the codec stays
/// total.
pub fn canonicalize(text: &str) -> String {
    let trimmed = text.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|_| collapse_whitespace(trimmed)),
        Err(_) => collapse_whitespace(trimmed),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Encode record text as a URL-safe token.
pub fn encode_record(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(canonicalize(text).as_bytes())
}

/// Decode a token back to record text.
///
/// Tolerates padded tokens from older encoders. Returns None for
/// non-base64 input and for payloads that are not UTF-8.
pub fn decode_record(token: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim_end_matches('=')).ok()?;
    String::from_utf8(bytes).ok()
}

/// Cheap shareability check: parses and checks the three record fields
/// exist. Full validation is the pipeline's job.
pub fn is_valid_record_json(text: &str) -> bool {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => {
            map.contains_key("entries")
                && map.contains_key("signature")
                && map.contains_key("signerPublicKey")
        }
        _ => false,
    }
}

/// Build a share URL from an explicit base URL.
///
/// Existing query parameters survive; an existing record parameter is
/// replaced rather than duplicated.
pub fn share_url(current_url: &str, text: &str) -> Result<Url, ShareUrlError> {
    let mut url =
        Url::parse(current_url).map_err(|e| ShareUrlError::InvalidUrl(e.to_string()))?;
    let token = encode_record(text);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .filter(|(k, _)| k.as_str() != RECORD_PARAM)
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(RECORD_PARAM, &token);
    }

    Ok(url)
}

/// Pull record text out of a URL, if a well-formed token is present.
pub fn extract_record(current_url: &str) -> Option<String> {
    let url = Url::parse(current_url).ok()?;
    let token = url
        .query_pairs()
        .find_map(|(k, v)| (k == RECORD_PARAM).then(|| v.into_owned()))?;
    decode_record(&token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RECORD: &str =
        r#"{"entries":{"name":"Alice"},"signature":"c2ln","signerPublicKey":"a2V5"}"#;

    #[test]
    fn test_round_trip() {
        let token = encode_record(RECORD);
        let decoded = decode_record(&token).unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&decoded).unwrap(),
            serde_json::from_str::<Value>(RECORD).unwrap()
        );
    }

    #[test]
    fn test_token_is_url_safe() {
        // Enough entries to exercise the full base64 alphabet.
        let text = serde_json::to_string(&json!({
            "entries": {"a": "???>>>~~~", "b": [255, 254, 253]},
            "signature": "s", "signerPublicKey": "k"
        }))
        .unwrap();
        let token = encode_record(&text);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_canonicalize_collapses_formatting() {
        let pretty = "{\n  \"a\": 1,\n  \"b\": 2\n}";
        let compact = r#"{"a":1,"b":2}"#;
        assert_eq!(canonicalize(pretty), compact);
        assert_eq!(encode_record(pretty), encode_record(compact));
    }

    #[test]
    fn test_canonicalize_invalid_text_collapses_whitespace() {
        assert_eq!(canonicalize("broken   \n}\t answer"), "broken } answer");
    }

    #[test]
    fn test_decode_tolerates_padding() {
        let token = encode_record(RECORD);
        let padded = format!("{token}==");
        assert_eq!(decode_record(&padded), decode_record(&token));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_record("not base64 at all!"), None);
        // Valid base64 that is not UTF-8.
        let token = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0x80]);
        assert_eq!(decode_record(&token), None);
    }

    #[test]
    fn test_is_valid_record_json() {
        assert!(is_valid_record_json(RECORD));
        assert!(!is_valid_record_json(r#"{"entries":{}}"#));
        assert!(!is_valid_record_json("[1,2]"));
        assert!(!is_valid_record_json("{broken"));
        // Presence check only; an empty signature still counts here.
        assert!(is_valid_record_json(
            r#"{"entries":{},"signature":"","signerPublicKey":""}"#
        ));
    }

    #[test]
    fn test_share_url_appends_param() {
        let url = share_url("https://verify.example/check", RECORD).unwrap();
        assert_eq!(url.host_str(), Some("verify.example"));
        let (key, token) = url.query_pairs().next().unwrap();
        assert_eq!(key, RECORD_PARAM);
        assert_eq!(decode_record(&token).unwrap(), canonicalize(RECORD));
    }

    #[test]
    fn test_share_url_preserves_other_params() {
        let url = share_url("https://verify.example/check?tab=records&lang=en", RECORD).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("tab".to_string(), "records".to_string()));
        assert_eq!(pairs[1], ("lang".to_string(), "en".to_string()));
        assert_eq!(pairs[2].0, RECORD_PARAM);
    }

    #[test]
    fn test_share_url_replaces_existing_token() {
        let first = share_url("https://verify.example/check", RECORD).unwrap();
        let other = r#"{"entries":{"x":1},"signature":"s","signerPublicKey":"k"}"#;
        let second = share_url(first.as_str(), other).unwrap();

        let tokens: Vec<String> = second
            .query_pairs()
            .filter(|(k, _)| k == RECORD_PARAM)
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(decode_record(&tokens[0]).unwrap(), canonicalize(other));
    }

    #[test]
    fn test_share_url_rejects_invalid_base() {
        assert!(matches!(
            share_url("not a url", RECORD),
            Err(ShareUrlError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_extract_record_round_trip() {
        let url = share_url("https://verify.example/check?lang=en", RECORD).unwrap();
        let extracted = extract_record(url.as_str()).unwrap();
        assert_eq!(extracted, canonicalize(RECORD));
    }

    #[test]
    fn test_extract_record_absent_or_bad() {
        assert_eq!(extract_record("https://verify.example/check"), None);
        assert_eq!(
            extract_record("https://verify.example/check?pod=%%%"),
            None
        );
        assert_eq!(extract_record("::not a url::"), None);
    }
}
