//! Lenient JSON decoding for catalog responses.
//!
//! The backend has shipped the same resources as `PascalCase`,
//! `camelCase` and `snake_case` objects over time. Every object key is
//! folded to `snake_case` before deserializing into the canonical models,
//! and numbers/dates that drifted between representations are accepted in
//! either form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::error::{CatalogError, Result};

/// Decodes a success body into `T` with key normalization.
pub(crate) fn from_str<T: DeserializeOwned>(body: &str, path: &str) -> Result<T> {
    let raw_result: std::result::Result<Value, _> = serde_json::from_str(body);
    let value = raw_result.map_err(|source| CatalogError::Decode {
        context: format!("failed to parse JSON response: {path}"),
        source,
    })?;
    serde_json::from_value(normalize_keys(value)).map_err(|source| CatalogError::Decode {
        context: format!("failed to decode JSON response: {path}"),
        source,
    })
}

/// Like `from_str`, but an empty body yields `T::default()`.
pub(crate) fn from_str_or_default<T: DeserializeOwned + Default>(
    body: &str,
    path: &str,
) -> Result<T> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    from_str(body, path)
}

/// Recursively rewrites object keys to `snake_case`.
pub(crate) fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (snake_case(&key), normalize_keys(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Folds an identifier to `snake_case`.
///
/// `ReleaseYear`, `releaseYear` and `RELEASE_YEAR` all become
/// `release_year`; acronyms stay together (`APIToken` -> `api_token`).
pub(crate) fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len().saturating_add(4));
    let mut chars = key.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if c.is_uppercase() {
            let next_is_lower = chars.peek().is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_some_and(|p| {
                p.is_lowercase() || p.is_ascii_digit() || (p.is_uppercase() && next_is_lower)
            });
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' || c == ' ' {
            out.push('_');
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    out
}

/// A JSON scalar that may be a number or its string form.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    fn into_number<T, E>(self) -> std::result::Result<Option<T>, E>
    where
        T: TryFrom<i64>,
        E: de::Error,
    {
        let number = match self {
            Self::Number(n) => n,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| E::custom(format!("expected an integer, got {text:?}")))?
            }
        };
        T::try_from(number)
            .map(Some)
            .map_err(|_| E::custom(format!("integer out of range: {number}")))
    }
}

/// Deserializes a required integer given as number or string.
pub(crate) fn lenient_int<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    NumberOrText::deserialize(deserializer)?
        .into_number::<T, D::Error>()?
        .ok_or_else(|| de::Error::custom("expected an integer, got an empty string"))
}

/// Deserializes an optional integer given as number, string or null.
pub(crate) fn lenient_opt_int<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    Option::<NumberOrText>::deserialize(deserializer)?
        .map_or(Ok(None), NumberOrText::into_number)
}

/// Deserializes a `yyyy-MM-dd` date, also accepting a full timestamp.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    let date_part = text.get(..10).unwrap_or(&text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| de::Error::custom(format!("invalid date {text:?}: {e}")))
}

/// Deserializes an RFC 3339 or `yyyy-MM-dd HH:mm:ss` (UTC) timestamp.
pub(crate) fn lenient_datetime<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| de::Error::custom(format!("invalid timestamp {text:?}: {e}")))
}
