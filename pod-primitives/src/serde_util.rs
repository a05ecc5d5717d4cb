//! Deserialization helpers shared by the configuration schema.

use serde::{Deserialize, Deserializer};

/// Deserializes a field, mapping an explicit `null` to the type's zero value.
///
/// Pair with `#[serde(default)]` so that both a missing key and a key with no
/// value (`model:` on its own line) produce `T::default()`.
///
/// # Errors
///
/// Propagates the deserializer error when the value is present but has the
/// wrong shape.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
