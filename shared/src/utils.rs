//! # Shared Utility Functions
//!
//! Serde helpers for the loosely typed backend payloads, and log-safe
//! formatting of credentials.
//!
//! The backend is not consistent about identifier and number encodings:
//! ids arrive as strings or integers, prices as numbers or numeric text.
//! The helpers here normalize both.

use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an identifier that may be a JSON string or integer.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {}", other))),
    }
}

/// Like [`deserialize_id`], but `null` and blank strings become `None`.
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("expected string or number id, got {}", other))),
    }
}

/// Deserialize a number that may be sent as numeric text.
pub fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("number out of range")),
        Value::String(s) => parse_number_text(&s).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected number, got {}", other))),
    }
}

/// Parse numeric text (surrounding whitespace allowed), rejecting NaN/inf.
pub fn parse_number_text(text: &str) -> Result<f64, String> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", text))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not a finite number", text))
    }
}

/// First characters of a token for log lines, never the whole credential.
///
/// # Examples
///
/// ```rust
/// use shared::utils::token_prefix;
///
/// assert_eq!(token_prefix("eyJhbGciOiJIUzI1NiJ9"), "eyJhbGci...");
/// assert_eq!(token_prefix("short"), "***");
/// ```
pub fn token_prefix(token: &str) -> String {
    match token.get(..8) {
        Some(prefix) if token.len() > 12 => format!("{}...", prefix),
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_text() {
        assert_eq!(parse_number_text(" 1.5 ").unwrap(), 1.5);
        assert!(parse_number_text("abc").is_err());
        assert!(parse_number_text("NaN").is_err());
        assert!(parse_number_text("").is_err());
    }
}
