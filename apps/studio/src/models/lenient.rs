//! Forgiving `deserialize_with` helpers for client-supplied resume data.
//!
//! The editor posts whatever it has: `null` for untouched inputs, stale enum
//! values from older clients, tokens from templates that no longer exist.
//! None of that should reject the whole record, so these helpers fall back to
//! the field's default and let the style lookups apply their own defaults.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::style::font_size::SizeToken;

/// `null` deserializes as `T::default()`.
pub fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Any value that does not parse as `T` (unknown variant, wrong type, `null`)
/// deserializes as `T::default()`.
pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(d)?;
    Ok(T::deserialize(raw).unwrap_or_default())
}

/// Keeps only the recognised size tokens. Dropped keys resolve to the key's
/// default token, exactly as if the user had never set them.
pub fn size_tokens<'de, D>(d: D) -> Result<HashMap<String, SizeToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Value>>::deserialize(d)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match SizeToken::deserialize(&value) {
            Ok(token) => Some((key, token)),
            Err(_) => {
                tracing::debug!(key = %key, value = %value, "ignoring unknown size token");
                None
            }
        })
        .collect())
}
