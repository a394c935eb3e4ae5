//! Postal-code (CEP) lookup against a BrasilAPI-compatible service.
//!
//! The lookup never fails the request: any problem on the remote side is
//! reported as an outcome so callers can keep working with manual input.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Result of a lookup, serialized with a `status` discriminator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostalLookup {
    Found {
        cep: String,
        estado: String,
        cidade: String,
        bairro: Option<String>,
        rua: Option<String>,
    },
    /// The code is malformed or the service does not know it
    InvalidCode { cep: String },
    /// Timeout, connection failure, throttling, 5xx or an unreadable body
    Unreachable { cep: String },
}

#[derive(Debug, Deserialize)]
struct BrasilApiAddress {
    cep: Option<String>,
    state: String,
    city: String,
    neighborhood: Option<String>,
    street: Option<String>,
}

#[derive(Clone)]
pub struct BrasilApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl BrasilApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sebo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn lookup(&self, raw: &str) -> PostalLookup {
        let Some(cep) = normalize(raw) else {
            tracing::debug!("Rejecting malformed CEP '{}' without lookup", raw);
            return PostalLookup::InvalidCode {
                cep: raw.to_string(),
            };
        };

        let url = format!("{}/{}", self.base_url, cep);
        tracing::debug!("Looking up CEP at {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("CEP service unreachable for {}: {}", cep, e);
                return PostalLookup::Unreachable { cep };
            }
        };

        let status = response.status();
        if matches!(status, StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND) {
            return PostalLookup::InvalidCode { cep };
        }
        if !status.is_success() {
            tracing::warn!("CEP service answered {} for {}", status, cep);
            return PostalLookup::Unreachable { cep };
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Unreadable CEP service body for {}: {}", cep, e);
                return PostalLookup::Unreachable { cep };
            }
        };

        parse_body(cep, body, status)
    }
}

fn parse_body(cep: String, body: serde_json::Value, status: StatusCode) -> PostalLookup {
    if body.get("erro").is_some() {
        return PostalLookup::InvalidCode { cep };
    }

    match serde_json::from_value::<BrasilApiAddress>(body) {
        Ok(address) => PostalLookup::Found {
            cep: address.cep.map(|c| digits_only(&c)).unwrap_or(cep),
            estado: address.state,
            cidade: address.city,
            bairro: address.neighborhood.filter(|s| !s.is_empty()),
            rua: address.street.filter(|s| !s.is_empty()),
        },
        Err(e) => {
            tracing::warn!("Unexpected CEP service body ({}): {}", status, e);
            PostalLookup::Unreachable { cep }
        }
    }
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Strip separators and require exactly eight digits
fn normalize(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '-' && *c != '.')
        .collect();

    (cleaned.len() == 8 && cleaned.chars().all(|c| c.is_ascii_digit())).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_accepts_formatted_codes() {
        assert_eq!(normalize("40070-110").as_deref(), Some("40070110"));
        assert_eq!(normalize("01.310-100").as_deref(), Some("01310100"));
        assert_eq!(normalize(" 40070110 ").as_deref(), Some("40070110"));
    }

    #[test]
    fn normalize_rejects_wrong_length_or_letters() {
        assert!(normalize("4007011").is_none());
        assert!(normalize("400701100").is_none());
        assert!(normalize("4007a110").is_none());
        assert!(normalize("").is_none());
    }

    #[test]
    fn erro_marker_means_invalid_code() {
        let outcome = parse_body("99999999".into(), json!({"erro": true}), StatusCode::OK);
        assert_eq!(
            outcome,
            PostalLookup::InvalidCode {
                cep: "99999999".into()
            }
        );
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = PostalLookup::Found {
            cep: "40070110".into(),
            estado: "BA".into(),
            cidade: "Salvador".into(),
            bairro: Some("Centro".into()),
            rua: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["cidade"], "Salvador");

        let json = serde_json::to_value(PostalLookup::Unreachable { cep: "1".into() }).unwrap();
        assert_eq!(json, json!({"status": "unreachable", "cep": "1"}));
    }
}
