//! YAML serialization helpers for request records, catalogs and config.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// YAML serialization failed.
    #[error("YAML serialization failed: {0}")]
    Serialize(serde_yaml::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Deserialize(serde_yaml::Error),
}

/// Serializes a value to YAML bytes.
///
/// Field order follows the struct definition, so files diff cleanly.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_yaml_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    serde_yaml::to_string(value)
        .map(String::into_bytes)
        .map_err(SerializationError::Serialize)
}

/// Deserializes YAML from bytes.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or doesn't match the expected type.
pub fn from_yaml_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_yaml::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{Catalog, HttpMethod, Request};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_record_layout() {
        let request = Request::with_id("abc", HttpMethod::Post, "http://y")
            .with_body(r#"{"k": "v"}"#)
            .with_param("page", "first")
            .with_header("Accept", "text/plain");

        let yaml = String::from_utf8(to_yaml_bytes(&request).expect("serialize")).expect("utf8");

        assert!(yaml.starts_with("id: abc\n"));
        assert!(yaml.contains("method: POST\n"));
        assert!(yaml.contains("- key: page\n  value: first\n"));
        assert!(!yaml.contains("name:"));
    }

    #[test]
    fn test_request_record_keeps_order_and_duplicates() {
        let request = Request::with_id("abc", HttpMethod::Get, "http://x")
            .with_name("List users")
            .with_header("X-Trace", "2")
            .with_header("Accept", "*/*")
            .with_header("X-Trace", "1")
            .with_auth("Bearer t");

        let bytes = to_yaml_bytes(&request).expect("serialize");
        let restored: Request = from_yaml_bytes(&bytes).expect("deserialize");

        assert_eq!(restored, request);
    }

    #[test]
    fn test_catalog_is_a_plain_list() {
        let catalog: Catalog = ["b", "a"].into_iter().collect();
        let bytes = to_yaml_bytes(&catalog).expect("serialize");

        assert_eq!(String::from_utf8_lossy(&bytes), "- b\n- a\n");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let result: Result<Request, _> = from_yaml_bytes(b"id: [unterminated");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
