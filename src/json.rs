use crate::{Error, Result};

/// Unknown fields captured on decode so they survive being encoded again
pub type Extras = serde_json::Map<String, serde_json::Value>;

/// Encodes a value, letting known fields take priority over `extras` entries with the same key.
///
/// Records keep their flattened `extras` as the first field, so any known field
/// serialized afterwards replaces a conflicting entry in the intermediate map.
pub fn encode<T>(value: &T) -> Result<String>
where
    T: serde::Serialize + ?Sized,
{
    to_value(value).and_then(|value| serde_json::to_string(&value).map_err(Error::Encode))
}

pub fn to_value<T>(value: &T) -> Result<serde_json::Value>
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(Error::Encode)
}

pub fn decode<T>(data: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(data).map_err(Error::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Nullable;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    #[serde(default)]
    struct Thing {
        #[serde(flatten)]
        extras: Extras,
        #[serde(skip_serializing_if = "Nullable::is_absent")]
        id: Nullable<String>,
        #[serde(skip_serializing_if = "Nullable::is_absent")]
        amount: Nullable<i64>,
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let input = r#"{"id":"thing_1","amount":null,"color":"blue","nested":{"a":[1,2]}}"#;
        let thing: Thing = decode(input).unwrap();

        assert_eq!(thing.id.as_deref(), Some("thing_1"));
        assert_eq!(thing.amount, Nullable::Null);
        assert_eq!(thing.extras.len(), 2);
        assert_eq!(thing.extras["nested"], json!({"a": [1, 2]}));

        let encoded = encode(&thing).unwrap();
        let again: Thing = decode(&encoded).unwrap();
        assert_eq!(again, thing);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&encoded).unwrap(),
            serde_json::from_str::<serde_json::Value>(input).unwrap(),
        );
    }

    #[test]
    fn known_fields_win_over_extras() {
        let mut thing = Thing {
            id: Nullable::Value("thing_2".into()),
            ..Thing::default()
        };
        thing.extras.insert("id".into(), json!("stale"));
        thing.extras.insert("amount".into(), json!(7));

        let value = to_value(&thing).unwrap();
        assert_eq!(value, json!({"id": "thing_2", "amount": 7}));
    }

    #[test]
    fn malformed_input_is_a_decode_error() {
        let err = decode::<Thing>("{not json").unwrap_err();
        assert!(matches!(err, Error::Decode(..)), "{err:?}");
    }
}
