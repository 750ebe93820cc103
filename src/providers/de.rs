//! Serde helpers for provider payloads that mix numbers and numeric strings.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

/// Identifier that may arrive as `123` or `"123"`
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_string)
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => Ok(n as f64),
        Scalar::Float(n) => Ok(n),
        Scalar::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got `{s}`"))),
    }
}

pub fn minute<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number(deserializer)?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!("minute out of range: {value}")));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(deserialize_with = "number")]
        x: f64,
        #[serde(deserialize_with = "minute")]
        min: u32,
        #[serde(default, deserialize_with = "opt_string")]
        position: Option<String>,
    }

    #[test]
    fn test_numeric_and_string_forms() {
        let a: Row = serde_json::from_str(r#"{"id": 8456, "x": 0.885, "min": 12}"#).unwrap();
        let b: Row =
            serde_json::from_str(r#"{"id": "8456", "x": "0.885", "min": "12", "position": 3}"#)
                .unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.x, b.x);
        assert_eq!(a.min, b.min);
        assert_eq!(a.position, None);
        assert_eq!(b.position.as_deref(), Some("3"));
    }

    #[test]
    fn test_rejects_non_numeric_text() {
        let err = serde_json::from_str::<Row>(r#"{"id": 1, "x": "far post", "min": 1}"#).unwrap_err();
        assert!(err.to_string().contains("far post"));
    }

    #[test]
    fn test_rejects_negative_minute() {
        assert!(serde_json::from_str::<Row>(r#"{"id": 1, "x": 0, "min": -3}"#).is_err());
    }
}
