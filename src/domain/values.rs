//! Validated natural-key values.
//!
//! Neighborhoods are identified by their postal code and users by their
//! login; both arrive from untrusted input (path segments and JSON bodies)
//! and are checked once here.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use super::DomainError;

/// Brazilian postal code (CEP), stored as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostalCode(i64);

impl PostalCode {
    pub const MAX: i64 = 99_999_999;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (0..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::Validation(format!("CEP inválido: {}", value)))
        }
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Eight zero-padded digits, the form external address services expect
    pub fn digits(self) -> String {
        format!("{:08}", self.0)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits())
    }
}

impl FromStr for PostalCode {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '.')
            .collect();

        if digits.is_empty() || digits.len() > 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(format!("CEP inválido: {}", raw)));
        }

        let value = digits
            .parse::<i64>()
            .map_err(|_| DomainError::Validation(format!("CEP inválido: {}", raw)))?;
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for PostalCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => PostalCode::new(n),
            Raw::Text(s) => s.parse(),
        }
        .map_err(de::Error::custom)
    }
}

/// User login: non-empty, no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Login(String);

impl Login {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::Validation("login não pode ser vazio".to_string()));
        }
        if raw.trim() != raw {
            return Err(DomainError::Validation(format!(
                "login inválido: '{}'",
                raw
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Login {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Login::parse(raw)
    }
}

impl<'de> Deserialize<'de> for Login {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Login::parse(raw).map_err(de::Error::custom)
    }
}
