use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::Result;

pub type Query = Vec<(String, String)>;

/// Flattens a parameter struct into query pairs.
///
/// Nested objects become `parent.child` keys, arrays are joined with commas and
/// `null` values are left out entirely.
pub fn encode<T>(params: &T) -> Result<Query>
where
    T: serde::Serialize + ?Sized,
{
    let mut out = Query::new();
    if let Value::Object(map) = crate::json::to_value(params)? {
        for (key, value) in map {
            flatten(&mut out, key, value);
        }
    }
    Ok(out)
}

fn flatten(out: &mut Query, key: String, value: Value) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (child, value) in map {
                flatten(out, format!("{key}.{child}"), value)
            }
        }
        Value::Array(list) => {
            let list = list
                .into_iter()
                .filter_map(scalar)
                .collect::<Vec<_>>()
                .join(",");
            out.push((key, list))
        }
        value => out.extend(scalar(value).map(|value| (key, value))),
    }
}

fn scalar(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Replaces (or appends) the `cursor` pair, leaving every other pair alone
pub fn with_cursor(query: &[(String, String)], cursor: &str) -> Query {
    query
        .iter()
        .filter(|(k, _)| k != "cursor")
        .cloned()
        .chain(std::iter::once(("cursor".to_string(), cursor.to_string())))
        .collect()
}

/// A time window filter, encoded as `field.after`, `field.before`, ...
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DateRange {
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub on_or_after: Option<DateTime<Utc>>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub on_or_before: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn after(self, at: DateTime<Utc>) -> Self {
        Self {
            after: Some(at),
            ..self
        }
    }

    pub fn before(self, at: DateTime<Utc>) -> Self {
        Self {
            before: Some(at),
            ..self
        }
    }

    pub fn on_or_after(self, at: DateTime<Utc>) -> Self {
        Self {
            on_or_after: Some(at),
            ..self
        }
    }

    pub fn on_or_before(self, at: DateTime<Utc>) -> Self {
        Self {
            on_or_before: Some(at),
            ..self
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.after.is_none()
            && self.before.is_none()
            && self.on_or_after.is_none()
            && self.on_or_before.is_none()
    }
}

/// Whole-second RFC 3339 timestamps, e.g. `2020-01-31T23:59:59Z`
pub(crate) mod timestamp {
    use super::*;

    pub fn serialize<S>(at: &Option<DateTime<Utc>>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match at {
            Some(at) => ser.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => ser.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;
    use pretty_assertions::assert_eq;

    #[derive(Default, serde::Serialize)]
    struct Params {
        #[serde(skip_serializing_if = "Option::is_none")]
        cursor: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        created_at: Option<DateRange>,
        #[serde(rename = "category.in", skip_serializing_if = "Vec::is_empty")]
        categories: Vec<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        archived: Option<bool>,
    }

    fn pairs(list: &[(&str, &str)]) -> Query {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn flattens_date_ranges() {
        let at = Utc.with_ymd_and_hms(2020, 1, 31, 23, 59, 59).unwrap();
        let params = Params {
            created_at: Some(
                DateRange::default()
                    .after(at)
                    .before(at)
                    .on_or_after(at)
                    .on_or_before(at),
            ),
            ..Params::default()
        };

        let mut query = encode(&params).unwrap();
        query.sort();
        assert_eq!(
            query,
            pairs(&[
                ("created_at.after", "2020-01-31T23:59:59Z"),
                ("created_at.before", "2020-01-31T23:59:59Z"),
                ("created_at.on_or_after", "2020-01-31T23:59:59Z"),
                ("created_at.on_or_before", "2020-01-31T23:59:59Z"),
            ])
        );
    }

    #[test]
    fn omits_absent_values() {
        let at = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let params = Params {
            limit: Some(10),
            created_at: Some(DateRange::default().on_or_after(at)),
            ..Params::default()
        };

        let mut query = encode(&params).unwrap();
        query.sort();
        assert_eq!(
            query,
            pairs(&[
                ("created_at.on_or_after", "2021-06-01T00:00:00Z"),
                ("limit", "10"),
            ])
        );

        assert!(encode(&Params::default()).unwrap().is_empty());
    }

    #[test]
    fn scalars_and_lists() {
        let params = Params {
            categories: vec!["card_settlement", "fee_payment"],
            archived: Some(false),
            ..Params::default()
        };

        let mut query = encode(&params).unwrap();
        query.sort();
        assert_eq!(
            query,
            pairs(&[
                ("archived", "false"),
                ("category.in", "card_settlement,fee_payment"),
            ])
        );
    }

    #[test]
    fn cursor_is_replaced_not_duplicated() {
        let query = pairs(&[("limit", "2"), ("cursor", "old"), ("status", "open")]);
        assert_eq!(
            with_cursor(&query, "cur_abc"),
            pairs(&[("limit", "2"), ("status", "open"), ("cursor", "cur_abc")])
        );
        assert_eq!(
            with_cursor(&[], "cur_abc"),
            pairs(&[("cursor", "cur_abc")])
        );
    }
}
