//! Base64 transport encoding for image blobs.
//!
//! Images are stored as raw bytes and cross the HTTP boundary as standard
//! (padded) base64 text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serializer;

use crate::domain::DomainError;

pub const INVALID_IMAGE: &str = "Imagem deve estar em base64";

pub fn decode(encoded: &str) -> Result<Vec<u8>, DomainError> {
    STANDARD
        .decode(encoded)
        .map_err(|_| DomainError::Validation(INVALID_IMAGE.to_string()))
}

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode(bytes))
}

pub fn serialize_optional_base64<S: Serializer>(
    bytes: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(bytes) => serializer.serialize_some(&encode(bytes)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_then_encode_is_identity() {
        let encoded = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";
        let bytes = decode(encoded).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(encode(&bytes), encoded);
    }

    #[test]
    fn arbitrary_bytes_survive() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn invalid_text_is_a_validation_error() {
        match decode("not base64!") {
            Err(DomainError::Validation(msg)) => assert_eq!(msg, INVALID_IMAGE),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
