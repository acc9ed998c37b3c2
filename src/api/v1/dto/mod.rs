pub mod applications;
pub mod auth;
pub mod profiles;
pub mod vacancies;

/// Tri-state fields for partial updates of nullable columns.
///
/// With `#[serde(default, deserialize_with = "nullable::deserialize")]` on an
/// `Option<Option<T>>`:
/// - field missing: `None` (leave the column alone)
/// - `null`: `Some(None)` (set NULL)
/// - value: `Some(Some(v))`
pub(crate) mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
