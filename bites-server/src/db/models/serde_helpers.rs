//! Common serde helpers for record ids
//!
//! Record ids are serialized as `"table:id"` strings everywhere (API JSON
//! and storage). Deserialization accepts both the string form and the
//! native SurrealDB form, so rows read back from the database and payloads
//! arriving over HTTP go through the same model types.

use serde::{Deserialize, Deserializer, Serializer};
use surrealdb::RecordId;

/// Internal helper: accepts either a `"table:id"` string or a native RecordId
#[derive(Debug, Clone)]
struct FlexibleRecordId(RecordId);

impl<'de> Deserialize<'de> for FlexibleRecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct FlexibleVisitor;

        impl<'de> Visitor<'de> for FlexibleVisitor {
            type Value = FlexibleRecordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string 'table:id' or RecordId")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value
                    .parse::<RecordId>()
                    .map(FlexibleRecordId)
                    .map_err(|_| de::Error::custom(format!("invalid RecordId: {}", value)))
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(FlexibleRecordId)
            }
        }

        deserializer.deserialize_any(FlexibleVisitor)
    }
}

/// RecordId serialization as a `"table:id"` string
pub mod record_id {
    use super::*;

    pub fn serialize<S>(id: &RecordId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
    where
        D: Deserializer<'de>,
    {
        FlexibleRecordId::deserialize(deserializer).map(|f| f.0)
    }
}

/// Option<RecordId> serialization as an optional `"table:id"` string
pub mod option_record_id {
    use super::*;

    pub fn serialize<S>(id: &Option<RecordId>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => s.serialize_some(&id.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<FlexibleRecordId>::deserialize(deserializer).map(|opt| opt.map(|f| f.0))
    }
}

/// Vec<RecordId> serialization as `"table:id"` strings
pub mod vec_record_id {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S>(ids: &[RecordId], s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = s.serialize_seq(Some(ids.len()))?;
        for id in ids {
            seq.serialize_element(&id.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<FlexibleRecordId>::deserialize(deserializer)
            .map(|v| v.into_iter().map(|f| f.0).collect())
    }
}

/// Option<Vec<RecordId>> serialization as `"table:id"` strings
pub mod option_vec_record_id {
    use super::*;

    pub fn serialize<S>(ids: &Option<Vec<RecordId>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ids {
            Some(ids) => {
                let strings: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                s.serialize_some(&strings)
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<RecordId>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Vec<FlexibleRecordId>>::deserialize(deserializer)
            .map(|opt| opt.map(|v| v.into_iter().map(|f| f.0).collect()))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use surrealdb::RecordId;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "super::record_id")]
        user: RecordId,
        #[serde(default, with = "super::option_record_id")]
        id: Option<RecordId>,
    }

    #[test]
    fn record_id_round_trips_as_string() {
        let row = Row {
            user: RecordId::from_table_key("user", "abc"),
            id: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"user:abc\""));

        let parsed: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.user.to_string(), "user:abc");
        assert!(parsed.id.is_none());
    }

    #[test]
    fn record_id_accepts_string_form() {
        let parsed: Row = serde_json::from_str(r#"{"user":"user:xyz","id":"cart_item:1"}"#).unwrap();
        assert_eq!(parsed.user.to_string(), "user:xyz");
        assert_eq!(parsed.id.unwrap().to_string(), "cart_item:1");
    }
}
