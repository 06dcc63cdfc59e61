//! Malformation detection for untrusted record text.
//!
//! Detection is purely observational: it names what looks wrong with a
//! piece of text without changing it. The repair pass decides separately
//! what to do about it. Patterns are compiled once and matched statelessly,
//! so repeated calls over the same text always agree.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// One recognizable way record text can deviate from strict JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Malformation {
    /// `""key""` where `"key"` was meant.
    DoubledQuotes,
    /// A comma directly before `}` or `]`.
    TrailingCommas,
    /// Object keys without quotes.
    UnquotedKeys,
    /// Single-quoted strings.
    SingleQuotes,
    /// `//` or `/* ... */` comments.
    Comments,
    /// Python-style `None`, `True`, `False`.
    ForeignLiterals,
    /// A literal `...` placeholder.
    Ellipsis,
    /// Two or more commas in a row.
    RepeatedCommas,
    /// Strict parsing failed but no named pattern matched.
    InvalidSyntax,
}

impl Malformation {
    /// Short human-readable description of the finding.
    pub fn description(self) -> &'static str {
        match self {
            Malformation::DoubledQuotes => "doubled quotes around keys or values",
            Malformation::TrailingCommas => "trailing commas",
            Malformation::UnquotedKeys => "unquoted object keys",
            Malformation::SingleQuotes => "single quotes instead of double quotes",
            Malformation::Comments => "comments",
            Malformation::ForeignLiterals => "Python-style None/True/False literals",
            Malformation::Ellipsis => "ellipsis placeholder",
            Malformation::RepeatedCommas => "repeated commas",
            Malformation::InvalidSyntax => "invalid JSON syntax",
        }
    }
}

impl std::fmt::Display for Malformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// `""key""` where `"key"` was meant. Shared with the repair pass so the
/// two agree on which matches count.
pub(crate) static DOUBLED_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"""([^"]+)"""#).expect("doubled quote pattern is valid"));

/// True if a doubled-quote match captured key or value content.
///
/// Adjacent legitimate strings also fit the pattern: `["", ""]` reads as
/// `""` + `, ` + `""`, and `{"": ""}` as `""` + `: ` + `""`. Those
/// captures are JSON punctuation and whitespace only, and rewriting them
/// would merge the neighboring strings.
pub(crate) fn is_doubled_quote_content(captured: &str) -> bool {
    captured
        .chars()
        .any(|c| !c.is_whitespace() && !matches!(c, ',' | ':' | '[' | ']' | '{' | '}'))
}

struct NamedPattern {
    finding: Malformation,
    regex: Regex,
}

static PATTERNS: Lazy<Vec<NamedPattern>> = Lazy::new(|| {
    let compile = |finding: Malformation, pattern: &str| NamedPattern {
        finding,
        regex: Regex::new(pattern).expect("malformation pattern is valid"),
    };
    vec![
        compile(Malformation::TrailingCommas, r",\s*[}\]]"),
        compile(
            Malformation::UnquotedKeys,
            r"[{,]\s*[A-Za-z_$][A-Za-z0-9_$]*\s*:",
        ),
        compile(Malformation::SingleQuotes, r"'[^']*'"),
        compile(Malformation::Comments, r"(?m)/\*[\s\S]*?\*/|//.*$"),
        compile(Malformation::ForeignLiterals, r"\b(?:None|True|False)\b"),
        compile(Malformation::Ellipsis, r"\.\.\."),
        compile(Malformation::RepeatedCommas, r",\s*,"),
    ]
});

/// Everything the detector found wrong with one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformationReport {
    findings: Vec<Malformation>,
}

impl MalformationReport {
    /// True if any finding was reported.
    pub fn is_malformed(&self) -> bool {
        !self.findings.is_empty()
    }

    /// The findings, in fixed battery order.
    pub fn findings(&self) -> &[Malformation] {
        &self.findings
    }

    /// True if a specific finding was reported.
    pub fn contains(&self, finding: Malformation) -> bool {
        self.findings.contains(&finding)
    }
}

/// Run the full pattern battery over `text`.
///
/// If no named pattern matches but the text still fails strict parsing,
/// a single [`Malformation::InvalidSyntax`] finding is reported. Note the
/// patterns cannot see string boundaries, so text that is strictly valid
/// JSON can still produce findings (an ellipsis inside a string value,
/// for example). The repair pass is not fooled by this: it re-parses
/// before touching anything.
pub fn detect(text: &str) -> MalformationReport {
    let mut findings = Vec::new();
    if DOUBLED_QUOTES
        .captures_iter(text)
        .any(|hit| is_doubled_quote_content(&hit[1]))
    {
        findings.push(Malformation::DoubledQuotes);
    }
    findings.extend(
        PATTERNS
            .iter()
            .filter(|p| p.regex.is_match(text))
            .map(|p| p.finding),
    );

    if findings.is_empty() && serde_json::from_str::<Value>(text).is_err() {
        findings.push(Malformation::InvalidSyntax);
    }

    MalformationReport { findings }
}
