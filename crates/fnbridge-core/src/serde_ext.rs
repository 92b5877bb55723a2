//! Serde helpers shared by the envelope types.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
///
/// Routing layers send `null` instead of `{}` / `[]` / `""` for absent
/// maps, lists and bodies. Use together with `#[serde(default)]` so a
/// missing key behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::null_as_default")]
        map: HashMap<String, String>,
        #[serde(default, deserialize_with = "super::null_as_default")]
        text: String,
    }

    #[test]
    fn null_becomes_default() {
        let s: Sample = serde_json::from_str(r#"{"map":null,"text":null}"#).unwrap();
        assert!(s.map.is_empty());
        assert!(s.text.is_empty());
    }

    #[test]
    fn missing_becomes_default() {
        let s: Sample = serde_json::from_str("{}").unwrap();
        assert!(s.map.is_empty());
    }

    #[test]
    fn present_value_is_kept() {
        let s: Sample = serde_json::from_str(r#"{"map":{"a":"1"},"text":"x"}"#).unwrap();
        assert_eq!(s.map["a"], "1");
        assert_eq!(s.text, "x");
    }
}
