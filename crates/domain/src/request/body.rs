//! Request body helpers.
//!
//! Bodies are raw bytes. By convention they hold JSON text, so the helpers
//! here minify and pretty-print when the bytes parse as JSON and leave
//! anything else untouched.

use serde_json::Value;

/// Parses `bytes` as JSON, returning `None` for empty or invalid input.
fn parse_json(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

/// Returns true if the bytes are a valid JSON document.
#[must_use]
pub fn is_json(bytes: &[u8]) -> bool {
    parse_json(bytes).is_some()
}

/// Minifies a JSON body. Non-JSON input is returned unchanged.
#[must_use]
pub fn minify_json(bytes: &[u8]) -> Vec<u8> {
    parse_json(bytes)
        .and_then(|value| serde_json::to_vec(&value).ok())
        .unwrap_or_else(|| bytes.to_vec())
}

/// Pretty-prints a JSON body. Non-JSON input is returned as lossy UTF-8.
#[must_use]
pub fn prettify_json(bytes: &[u8]) -> String {
    parse_json(bytes)
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned())
}

/// Serde adapter storing a byte body as text when it is UTF-8.
///
/// Non-UTF-8 bodies are written as `{ base64: "..." }` so that every byte
/// sequence survives a round trip through a text format.
pub(crate) mod text_or_base64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Binary { base64: String },
    }

    pub fn serialize<S>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Ok(text) = std::str::from_utf8(body) {
            serializer.serialize_str(text)
        } else {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("base64", &STANDARD.encode(body))?;
            map.end()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Ok(text.into_bytes()),
            Repr::Binary { base64 } => STANDARD.decode(base64).map_err(D::Error::custom),
        }
    }
}
