//! Raw job records as served by the jobs API.
//!
//! The upstream data is untrusted and shape-variable: list elements may be
//! bare strings or `{name, text}` objects, and any field may carry an
//! unexpected JSON type. Every field deserializes leniently so one odd value
//! degrades to "absent" instead of rejecting the whole record.

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One element of `locations` / `roles` / `experiences` / `companies`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawLabel {
    Text(String),
    /// Non-string `name` / `text` values are treated as absent.
    Named {
        name: Option<String>,
        text: Option<String>,
    },
    /// null, numbers, arrays... anything the two shapes above do not cover.
    Other(Value),
}

impl From<Value> for RawLabel {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawLabel::Text(s),
            Value::Object(map) => RawLabel::Named {
                name: string_field(&map, "name"),
                text: string_field(&map, "text"),
            },
            other => RawLabel::Other(other),
        }
    }
}

/// One element of `images` on a job detail record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawImage {
    Path(String),
    Object { image_path: Option<String> },
    Other(Value),
}

impl From<Value> for RawImage {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawImage::Path(s),
            Value::Object(map) => RawImage::Object {
                image_path: string_field(&map, "image_path"),
            },
            other => RawImage::Other(other),
        }
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawJobRecord {
    /// Numeric ids are carried as their decimal string.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub locations: Option<Vec<RawLabel>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub roles: Option<Vec<RawLabel>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub experiences: Option<Vec<RawLabel>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub companies: Option<Vec<RawLabel>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub posted_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub expiry_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub images: Option<Vec<RawImage>>,
}

impl RawJobRecord {
    /// The slug, if present and non-empty.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// `None` unless the value is a JSON array.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: From<Value>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(T::from).collect()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawJobRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_labels_accept_both_shapes() {
        let job = record(json!({
            "slug": "a",
            "roles": ["Sales", {"name": "Support"}, {"text": "Ops"}, null, 7]
        }));
        assert_eq!(
            job.roles.unwrap(),
            vec![
                RawLabel::Text("Sales".into()),
                RawLabel::Named { name: Some("Support".into()), text: None },
                RawLabel::Named { name: None, text: Some("Ops".into()) },
                RawLabel::Other(Value::Null),
                RawLabel::Other(json!(7)),
            ]
        );
    }

    #[test]
    fn test_non_string_name_degrades_to_absent() {
        let job = record(json!({"locations": [{"name": 5, "text": "Lahore"}]}));
        assert_eq!(
            job.locations.unwrap(),
            vec![RawLabel::Named { name: None, text: Some("Lahore".into()) }]
        );
    }

    #[test]
    fn test_numeric_and_string_ids() {
        assert_eq!(record(json!({"id": 42})).id.as_deref(), Some("42"));
        assert_eq!(record(json!({"id": "job-42"})).id.as_deref(), Some("job-42"));
        assert_eq!(record(json!({"id": null})).id, None);
    }

    #[test]
    fn test_wrong_types_degrade_to_none() {
        let job = record(json!({
            "slug": 99,
            "title": ["not", "a", "string"],
            "locations": "Karachi",
            "posted_at": false
        }));
        assert_eq!(job.slug, None);
        assert_eq!(job.title, None);
        assert_eq!(job.locations, None);
        assert_eq!(job.posted_at, None);
    }

    #[test]
    fn test_missing_fields_default() {
        let job = record(json!({}));
        assert_eq!(job, RawJobRecord::default());
        assert_eq!(job.slug(), None);
    }

    #[test]
    fn test_empty_slug_counts_as_missing() {
        assert_eq!(record(json!({"slug": ""})).slug(), None);
        assert_eq!(record(json!({"slug": "x"})).slug(), Some("x"));
    }

    #[test]
    fn test_images_accept_both_shapes() {
        let job = record(json!({
            "images": ["jobs/a.png", {"image_path": "jobs/b.png"}, {"image_path": null}]
        }));
        assert_eq!(
            job.images.unwrap(),
            vec![
                RawImage::Path("jobs/a.png".into()),
                RawImage::Object { image_path: Some("jobs/b.png".into()) },
                RawImage::Object { image_path: None },
            ]
        );
    }
}
