//! Serde helpers for keeping the persisted JSON shape stable

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialize Option<T> as null when None (don't skip the field)
pub fn serialize_option_as_null<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

/// Deserialize a field that may be missing or `null` as `T::default()`.
/// Older stored articles sometimes carry `"frames": null`.
pub fn deserialize_null_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + Default,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
