//! Transport encoding of check results

use super::types::CheckResult;
use crate::error::{Result, SdkError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// base64 of the result's JSON text
pub fn encode_result(result: &CheckResult) -> Result<String> {
    let json = serde_json::to_string(result)?;
    Ok(BASE64.encode(json.as_bytes()))
}

/// Decode an encoded result back to its JSON document
pub fn decode_result(encoded: &str) -> Result<serde_json::Value> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| SdkError::InvalidEncoding(e.to_string()))?;
    Ok(serde_json::from_slice(&bytes)?)
}
