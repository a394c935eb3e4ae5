//! Lenient request-field decoding shared by the handlers.

use serde::{de, Deserialize, Deserializer};

use crate::domain::DomainError;

/// Unwrap a required request field or fail with the given message
pub fn require<T>(value: Option<T>, message: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::Validation(message.to_string()))
}

/// Like [`require`], also rejecting blank text
pub fn require_text(value: Option<String>, message: &str) -> Result<String, DomainError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(DomainError::Validation(message.to_string())),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Number(i64),
    Text(String),
}

fn flag_from_raw<E: de::Error>(raw: RawFlag) -> Result<bool, E> {
    match raw {
        RawFlag::Bool(b) => Ok(b),
        RawFlag::Number(0) => Ok(false),
        RawFlag::Number(1) => Ok(true),
        RawFlag::Number(n) => Err(E::custom(format!("valor inválido para flag: {}", n))),
        RawFlag::Text(s) => match s.trim().to_ascii_uppercase().as_str() {
            "S" | "SIM" | "TRUE" | "1" => Ok(true),
            "N" | "NAO" | "FALSE" | "0" => Ok(false),
            _ => Err(E::custom(format!("valor inválido para flag: '{}'", s))),
        },
    }
}

/// Boolean flag accepting `true`/`false`, `1`/`0` and `"S"`/`"N"`.
/// Use with `#[serde(default)]`.
pub fn optional_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    match Option::<RawFlag>::deserialize(deserializer)? {
        Some(raw) => flag_from_raw(raw).map(Some),
        None => Ok(None),
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use with `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
