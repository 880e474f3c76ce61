//! Base64 encoding of UTF-8 text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CodecError, CodecResult};

/// Encode the UTF-8 bytes of `text` as standard, padded base64.
pub fn encode_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode standard base64 into UTF-8 text.
///
/// Surrounding whitespace is ignored.
pub fn decode_base64(encoded: &str) -> CodecResult<String> {
    let bytes = decode_base64_bytes(encoded)?;
    String::from_utf8(bytes).map_err(|e| CodecError::InvalidUtf8(e.to_string()))
}

/// Decode standard base64 into raw bytes, skipping any ASCII whitespace
/// (line-wrapped input is common).
pub fn decode_base64_bytes(encoded: &str) -> CodecResult<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))
}
