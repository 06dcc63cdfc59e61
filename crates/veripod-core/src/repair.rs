//! Lenient repair for copy-paste damaged record text.
//!
//! Strictly valid input is never rewritten: the fast path parses first and
//! returns the text untouched. Only when strict parsing fails does the
//! multi-pass transform run, and its output is kept only if it parses.
//! The token passes walk the text with string boundaries tracked, and the
//! doubled-quote pre-pass skips matches whose capture is pure punctuation,
//! so content inside double-quoted strings is never altered.

use regex::Captures;
use serde_json::Value;

use crate::detect::{detect, is_doubled_quote_content, DOUBLED_QUOTES, Malformation};

/// Outcome of one repair attempt.
///
/// Exactly one of three shapes comes back: untouched valid input
/// (`was_repaired` false, `value` present), a successful repair
/// (`was_repaired` true, `value` present, `canonical_text` pretty-printed),
/// or a failure (`value` absent, `error` present, `canonical_text` equal to
/// the trimmed input so the caller can surface the original text).
#[derive(Debug, Clone)]
pub struct RepairResult {
    pub was_repaired: bool,
    pub canonical_text: String,
    pub value: Option<Value>,
    pub fixes: Vec<Malformation>,
    pub error: Option<String>,
}

/// Repair `input` if needed.
///
/// Never panics and never invents structure: if the transformed text still
/// fails strict parsing, the original trimmed text and the parse error are
/// returned instead of a guess.
pub fn repair(input: &str) -> RepairResult {
    let trimmed = input.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return RepairResult {
            was_repaired: false,
            canonical_text: trimmed.to_string(),
            value: Some(value),
            fixes: Vec::new(),
            error: None,
        };
    }

    let report = detect(trimmed);
    let candidate = transform(trimmed);
    match serde_json::from_str::<Value>(&candidate) {
        Ok(value) => {
            let canonical_text = serde_json::to_string_pretty(&value).unwrap_or(candidate);
            RepairResult {
                was_repaired: true,
                canonical_text,
                value: Some(value),
                fixes: report
                    .findings()
                    .iter()
                    .copied()
                    .filter(|f| *f != Malformation::InvalidSyntax)
                    .collect(),
                error: None,
            }
        }
        Err(err) => RepairResult {
            was_repaired: false,
            canonical_text: trimmed.to_string(),
            value: None,
            fixes: Vec::new(),
            error: Some(err.to_string()),
        },
    }
}

/// Apply every repair pass in order.
fn transform(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    // Doubled quotes break quote tracking, so this pass runs before the
    // walker. Punctuation-only captures are the gap between two adjacent
    // legitimate strings and must stay as they are.
    let text = DOUBLED_QUOTES.replace_all(text, |hit: &Captures<'_>| {
        if is_doubled_quote_content(&hit[1]) {
            format!("\"{}\"", &hit[1])
        } else {
            hit[0].to_string()
        }
    });
    let text = rewrite_tokens(&text);
    normalize_commas(&text)
}

/// Index one past the closing quote of the double-quoted string starting
/// at `start`, or the end of input if unterminated.
fn end_of_double_string(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '"' => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

/// Index one past the closing quote of the single-quoted string starting
/// at `start`, or None if unterminated.
fn end_of_single_string(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '\'' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Single walk handling comments, single-quoted strings, bare keys,
/// Python literals, and ellipsis placeholders. Double-quoted strings are
/// copied verbatim.
fn rewrite_tokens(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                let end = end_of_double_string(&chars, i);
                out.extend(chars[i..end].iter());
                i = end;
            }
            '\'' => match end_of_single_string(&chars, i) {
                Some(end) => {
                    out.push('"');
                    requote_single_string(&chars[i + 1..end - 1], &mut out);
                    out.push('"');
                    i = end;
                }
                None => {
                    // Unterminated: leave it so strict parsing reports it.
                    out.extend(chars[i..].iter());
                    i = chars.len();
                }
            },
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i + 1 < chars.len() && !(chars[i] == '*' && chars[i + 1] == '/') {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            '.' if chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') => {
                i += 3;
            }
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '$')
                {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();

                let mut k = i;
                while k < chars.len() && chars[k].is_whitespace() {
                    k += 1;
                }
                if chars.get(k) == Some(&':') {
                    // Bare object key.
                    out.push('"');
                    out.push_str(&word);
                    out.push('"');
                } else {
                    match word.as_str() {
                        "None" => out.push_str("null"),
                        "True" => out.push_str("true"),
                        "False" => out.push_str("false"),
                        _ => out.push_str(&word),
                    }
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Convert the content of a single-quoted string for double-quote framing.
fn requote_single_string(content: &[char], out: &mut String) {
    let mut j = 0;
    while j < content.len() {
        let c = content[j];
        if c == '\\' && j + 1 < content.len() {
            let next = content[j + 1];
            if next == '\'' {
                out.push('\'');
            } else {
                out.push('\\');
                out.push(next);
            }
            j += 2;
        } else if c == '"' {
            out.push('\\');
            out.push('"');
            j += 1;
        } else {
            out.push(c);
            j += 1;
        }
    }
}

/// Drop commas that sit before another comma, a closing bracket, or the
/// end of input. Runs last so commas orphaned by ellipsis removal are
/// cleaned up too.
fn normalize_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                let end = end_of_double_string(&chars, i);
                out.extend(chars[i..end].iter());
                i = end;
            }
            ',' => {
                let mut k = i + 1;
                while k < chars.len() && chars[k].is_whitespace() {
                    k += 1;
                }
                let next = chars.get(k).copied();
                if !matches!(next, Some(',' | '}' | ']') | None) {
                    out.push(c);
                }
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}
