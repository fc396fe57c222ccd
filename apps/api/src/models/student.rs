use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A student row. Phone numbers are stored as `bigint` but always serialized
/// as strings at the HTTP boundary, since JSON numbers above 2^53 lose
/// precision in browser clients.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(with = "phone_string")]
    pub phone_number: i64,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub college_name: Option<String>,
    pub cgpa: Option<f64>,
    pub year_of_passing: Option<i32>,
    pub resume_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Serde adapter for phone numbers: `i64` in the store, string on the wire.
/// Deserialization accepts either a JSON string or a JSON number.
pub mod phone_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            Number(i64),
        }

        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::Number(n) => Ok(n),
            StringOrNumber::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| de::Error::custom(format!("invalid phone number '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super::phone_string")]
        phone_number: i64,
    }

    #[test]
    fn serializes_phone_as_string() {
        let w = Wrapper {
            phone_number: 9_876_543_210,
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"phone_number":"9876543210"}"#);
    }

    #[test]
    fn deserializes_from_string() {
        let w: Wrapper = serde_json::from_str(r#"{"phone_number":"9876543210"}"#).unwrap();
        assert_eq!(w.phone_number, 9_876_543_210);
    }

    #[test]
    fn deserializes_from_number() {
        let w: Wrapper = serde_json::from_str(r#"{"phone_number":9876543210}"#).unwrap();
        assert_eq!(w.phone_number, 9_876_543_210);
    }

    #[test]
    fn round_trips_above_u32_range() {
        // Ten-digit phone numbers do not fit in 32 bits.
        let w = Wrapper {
            phone_number: 9_999_999_999,
        };
        let json = serde_json::to_string(&w).unwrap();
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn rejects_non_numeric_string() {
        let result = serde_json::from_str::<Wrapper>(r#"{"phone_number":"not-a-phone"}"#);
        assert!(result.is_err());
    }
}
