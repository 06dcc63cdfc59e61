//! Entry types and per-entry shape rules.
//!
//! An entry value on the wire is either a bare JSON primitive or an
//! explicit `{"type": ..., "value": ...}` pair. Resolution normalizes
//! both forms into a [`ResolvedEntry`] so validation and formatting
//! share one code path.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::EntryError;

/// Entry names must be identifier-shaped: letters, digits, underscore,
/// not starting with a digit.
static ENTRY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("entry name pattern is valid")
});

/// The closed set of entry value types.
///
/// Serializes to the wire names, so `EddsaPubkey` comes out as
/// `"eddsa_pubkey"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    String,
    Int,
    Cryptographic,
    Boolean,
    Date,
    EddsaPubkey,
    Bytes,
    Null,
}

impl EntryType {
    /// Every member of the closed set, in wire order.
    pub const ALL: [EntryType; 8] = [
        EntryType::String,
        EntryType::Int,
        EntryType::Cryptographic,
        EntryType::Boolean,
        EntryType::Date,
        EntryType::EddsaPubkey,
        EntryType::Bytes,
        EntryType::Null,
    ];

    /// The name this type carries on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            EntryType::String => "string",
            EntryType::Int => "int",
            EntryType::Cryptographic => "cryptographic",
            EntryType::Boolean => "boolean",
            EntryType::Date => "date",
            EntryType::EddsaPubkey => "eddsa_pubkey",
            EntryType::Bytes => "bytes",
            EntryType::Null => "null",
        }
    }

    /// Parse a wire type name. Case-sensitive.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(EntryType::String),
            "int" => Some(EntryType::Int),
            "cryptographic" => Some(EntryType::Cryptographic),
            "boolean" => Some(EntryType::Boolean),
            "date" => Some(EntryType::Date),
            "eddsa_pubkey" => Some(EntryType::EddsaPubkey),
            "bytes" => Some(EntryType::Bytes),
            "null" => Some(EntryType::Null),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// An entry normalized to its declared (or inferred) type plus the value
/// the type applies to. Borrows from the record it was resolved from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEntry<'a> {
    pub ty: EntryType,
    pub value: &'a Value,
}

/// Check whether a name is identifier-shaped.
pub fn is_valid_entry_name(name: &str) -> bool {
    ENTRY_NAME.is_match(name)
}

/// Resolve a raw entry value to its type and inner value.
///
/// Bare primitives infer their type: strings are `string`, numbers are
/// `int`, booleans are `boolean`. Objects must be `{type, value}` pairs
/// with a known type name. Bare nulls, arrays, and objects missing either
/// key are rejected; `null` is only reachable through an explicit pair.
pub fn resolve_entry<'a>(name: &str, raw: &'a Value) -> Result<ResolvedEntry<'a>, EntryError> {
    match raw {
        Value::String(_) => Ok(ResolvedEntry {
            ty: EntryType::String,
            value: raw,
        }),
        Value::Number(_) => Ok(ResolvedEntry {
            ty: EntryType::Int,
            value: raw,
        }),
        Value::Bool(_) => Ok(ResolvedEntry {
            ty: EntryType::Boolean,
            value: raw,
        }),
        Value::Object(map) => {
            let (ty_field, value) = match (map.get("type"), map.get("value")) {
                (Some(t), Some(v)) => (t, v),
                _ => {
                    return Err(EntryError::InvalidShape {
                        name: name.to_string(),
                    })
                }
            };
            let ty_name = ty_field.as_str().ok_or_else(|| EntryError::UnknownType {
                name: name.to_string(),
                found: ty_field.to_string(),
            })?;
            let ty = EntryType::from_wire_name(ty_name).ok_or_else(|| EntryError::UnknownType {
                name: name.to_string(),
                found: ty_name.to_string(),
            })?;
            Ok(ResolvedEntry { ty, value })
        }
        Value::Null | Value::Array(_) => Err(EntryError::InvalidShape {
            name: name.to_string(),
        }),
    }
}

/// Check that a value matches the shape its declared type requires.
pub fn check_value_shape(name: &str, ty: EntryType, value: &Value) -> Result<(), EntryError> {
    let ok = match ty {
        EntryType::String | EntryType::Date | EntryType::EddsaPubkey | EntryType::Bytes => {
            value.is_string()
        }
        // Ints travel as numbers or as numeric text (for 64-bit safety).
        EntryType::Int => match value {
            Value::Number(_) => true,
            Value::String(s) => is_signed_digits(s),
            _ => false,
        },
        EntryType::Cryptographic => match value {
            Value::Number(_) => true,
            Value::String(s) => is_digits(s),
            _ => false,
        },
        EntryType::Boolean => value.is_boolean(),
        EntryType::Null => value.is_null(),
    };
    if ok {
        Ok(())
    } else {
        Err(EntryError::TypeMismatch {
            name: name.to_string(),
            ty,
            found: json_type_name(value),
        })
    }
}

/// The JSON-level type of a value, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_signed_digits(s: &str) -> bool {
    let digits = s.strip_prefix('-').or_else(|| s.strip_prefix('+')).unwrap_or(s);
    is_digits(digits)
}
