//! Deserializers for upstream integer fields that are sometimes serialized as
//! floats, e.g. `"karma": 1000.0`.

use serde::{de, Deserialize, Deserializer};
use serde_json::Number;

/// Integer value of `number` when it is integral and fits an `i64`.
pub fn integral(number: &Number) -> Option<i64> {
    if let Some(n) = number.as_i64() {
        return Some(n);
    }

    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

fn to_count<E: de::Error>(number: Number) -> Result<i64, E> {
    integral(&number)
        .ok_or_else(|| E::custom(format!("expected an integral number, found {number}")))
}

pub fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    to_count(Number::deserialize(deserializer)?)
}

/// Use together with `#[serde(default)]` so missing fields stay `None`.
pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(to_count)
        .transpose()
}
