//! Display formatting for validated entries.
//!
//! Formatting is pure and total: any entry map yields one
//! [`FormattedEntry`] per entry, in a deterministic order. Entries that
//! fail to resolve render through a fallback instead of panicking, so the
//! formatter can be pointed at anything the pipeline produced.
//!
//! Timestamps and dates render in UTC with fixed English month names.
//! Rendering never consults the system locale or timezone, so the same
//! record formats identically everywhere.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::entry::{resolve_entry, EntryType};

/// Entry names that surface first regardless of category.
const IMPORTANT_ENTRIES: [&str; 5] = [
    "attendeeName",
    "attendeeEmail",
    "eventName",
    "ticketName",
    "eventLocation",
];

/// Display category for grouping entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Personal,
    Event,
    Timestamp,
    Technical,
    Other,
}

impl Category {
    /// Display order, lowest first.
    pub fn rank(self) -> u8 {
        match self {
            Category::Personal => 0,
            Category::Event => 1,
            Category::Timestamp => 2,
            Category::Technical => 3,
            Category::Other => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Event => "event",
            Category::Timestamp => "timestamp",
            Category::Technical => "technical",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedEntry {
    pub name: String,
    /// None when the entry did not resolve to a known type.
    pub ty: Option<EntryType>,
    /// Faithful rendering of the value (strings quoted).
    pub display_value: String,
    /// Decorated rendering driven by name heuristics.
    pub formatted_value: String,
    pub category: Category,
    pub important: bool,
}

impl FormattedEntry {
    pub fn type_name(&self) -> &'static str {
        self.ty.map(EntryType::wire_name).unwrap_or("unknown")
    }
}

/// Assign a category from fixed name-substring rules.
///
/// A name counts as personal when it mentions email, attendee, or a
/// non-event name; `eventName` and `ticketType` land in the event bucket.
pub fn categorize(name: &str) -> Category {
    let lower = name.to_ascii_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("email") || has("attendee") || (has("name") && !has("event")) {
        Category::Personal
    } else if has("event") || has("ticket") || has("product") {
        Category::Event
    } else if has("timestamp") || has("date") || has("time") {
        Category::Timestamp
    } else if has("id")
        || has("secret")
        || has("key")
        || has("consumed")
        || has("revoked")
        || has("addon")
    {
        Category::Technical
    } else {
        Category::Other
    }
}

/// Exact-name membership in the important set.
pub fn is_important(name: &str) -> bool {
    IMPORTANT_ENTRIES.contains(&name)
}

/// Format one entry.
pub fn format_entry(name: &str, raw: &Value) -> FormattedEntry {
    let (ty, value) = match resolve_entry(name, raw) {
        Ok(resolved) => (Some(resolved.ty), resolved.value),
        Err(_) => (None, raw),
    };

    let name_lower = name.to_ascii_lowercase();
    let display_value = display_value(ty, value);
    let formatted_value = formatted_value(&name_lower, ty, value, &display_value);

    FormattedEntry {
        name: name.to_string(),
        ty,
        display_value,
        formatted_value,
        category: categorize(name),
        important: is_important(name),
    }
}

/// Format every entry and sort for display: important entries first, then
/// by category rank. The sort is stable, so ties keep map order.
pub fn format_entries(entries: &Map<String, Value>) -> Vec<FormattedEntry> {
    let mut formatted: Vec<FormattedEntry> = entries
        .iter()
        .map(|(name, raw)| format_entry(name, raw))
        .collect();
    formatted.sort_by_key(|e| (!e.important, e.category.rank()));
    formatted
}

fn display_value(ty: Option<EntryType>, value: &Value) -> String {
    match (ty, value) {
        (Some(EntryType::String), Value::String(s)) => format!("\"{s}\""),
        (Some(EntryType::Boolean), Value::Bool(b)) => b.to_string(),
        (Some(EntryType::Null), _) => "null".to_string(),
        (Some(_), Value::String(s)) => s.clone(),
        (Some(_), Value::Number(n)) => n.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// The undecorated text of a value, for embedding after an emoji prefix.
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Apply the name-driven decoration heuristics, first match wins.
fn formatted_value(
    name_lower: &str,
    ty: Option<EntryType>,
    value: &Value,
    display: &str,
) -> String {
    let raw = raw_text(value);

    if name_lower.contains("timestamp") && value.is_number() {
        return value
            .as_i64()
            .and_then(render_timestamp)
            .unwrap_or(raw);
    }
    if name_lower.contains("date") {
        if let Value::String(s) = value {
            return render_date(s);
        }
    }
    if name_lower.contains("email") {
        return format!("📧 {raw}");
    }
    if name_lower.contains("name") && !name_lower.contains("event") {
        return format!("👤 {raw}");
    }
    if name_lower.contains("event") && name_lower.contains("name") {
        return format!("🎫 {raw}");
    }
    if name_lower.contains("location") {
        return format!("📍 {raw}");
    }
    if name_lower.contains("category") && value.is_number() {
        return format!("Category {raw}");
    }
    if ty == Some(EntryType::Boolean) {
        return if value.as_bool().unwrap_or(false) {
            "✅ Yes".to_string()
        } else {
            "❌ No".to_string()
        };
    }
    if name_lower.contains("url") {
        return format!("🔗 {raw}");
    }
    if name_lower.contains("secret") || name_lower.contains("key") {
        return format!("🔐 {}", truncate(&raw, 20));
    }
    if name_lower.contains("id") {
        return format!("🆔 {}", truncate(&raw, 30));
    }

    display.to_string()
}

/// Unix milliseconds to fixed UTC text, None when out of range.
fn render_timestamp(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%B %-d, %Y %H:%M:%S UTC").to_string())
}

/// ISO-ish date text to fixed UTC text; unparseable input passes through.
fn render_date(s: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt
            .with_timezone(&Utc)
            .format("%B %-d, %Y %H:%M UTC")
            .to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%B %-d, %Y %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }
    s.to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}
