//! Content models for the bucket's object types.
//!
//! Every object shares the [`CosmicObject`] envelope; the `metadata` bag is a
//! per-type struct whose fields are all optional and decoded leniently, so a
//! missing or mistyped attribute becomes `None` rather than a decode failure.

/// Declares a select-key enum with its bucket key and display label.
macro_rules! select_key {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $key:literal, $label:literal;)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::models::SelectKey for $name {
            const ALL: &'static [Self] = $name::ALL;

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }

            fn label(&self) -> &'static str {
                $name::label(self)
            }

            fn parse(s: &str) -> Option<Self> {
                $name::parse(s)
            }
        }
    };
}

/// Common surface of the select-key enums.
pub trait SelectKey: Copy + PartialEq + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn parse(s: &str) -> Option<Self>;
}

mod character;
mod comment;
mod faq;
mod game_map;
mod news;
mod patch_note;
mod ranking;
mod submission;
mod tournament;

pub use character::*;
pub use comment::*;
pub use faq::*;
pub use game_map::*;
pub use news::*;
pub use patch_note::*;
pub use ranking::*;
pub use submission::*;
pub use tournament::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::content::ObjectQuery;

/// Properties projected by every list page.
pub const LIST_PROPS: [&str; 4] = ["id", "title", "slug", "metadata"];

/// A metadata shape bound to one bucket object type.
pub trait ContentType: DeserializeOwned + Send + Sync + 'static {
    /// Object type slug in the bucket, e.g. `characters`.
    const OBJECT_TYPE: &'static str;

    /// Query used by the page that lists this type.
    fn list_query() -> ObjectQuery {
        ObjectQuery::of_type(Self::OBJECT_TYPE)
            .props(LIST_PROPS)
            .depth(1)
    }
}

/// The common envelope of every bucket object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "M: DeserializeOwned"))]
pub struct CosmicObject<M> {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub metadata: Option<M>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub object_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub modified_at: Option<String>,
}

impl<M> CosmicObject<M> {
    /// Creation time, if present and parseable.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_date)
    }
}

/// A select-dropdown metafield: `{ "key": "assassin", "value": "Assassin" }`.
///
/// An unrecognised key decodes as `key: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: DeserializeOwned"))]
pub struct Select<K> {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<K>,
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<String>,
}

/// Key of a select field, if present and recognised.
pub fn key_of<K: Copy>(select: &Option<Select<K>>) -> Option<K> {
    select.as_ref().and_then(|s| s.key)
}

/// Display value of a select field, if any.
pub fn value_of<K>(select: &Option<Select<K>>) -> Option<&str> {
    select.as_ref().and_then(|s| s.value.as_deref())
}

/// A media metafield.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub imgix_url: Option<String>,
}

impl ImageRef {
    /// Cropped, auto-format URL at the given size. Falls back to the raw URL.
    pub fn sized(&self, width: u32, height: u32) -> Option<String> {
        match (&self.imgix_url, &self.url) {
            (Some(imgix), _) if !imgix.is_empty() => Some(format!(
                "{}?w={}&h={}&fit=crop&auto=format,compress",
                imgix, width, height
            )),
            (_, Some(url)) if !url.is_empty() => Some(url.clone()),
            _ => None,
        }
    }
}

/// Decode into `Some(T)`, or `None` when the value has the wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode a list, dropping entries that do not fit `T`.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Parse the date formats the bucket produces: RFC 3339, `YYYY-MM-DD`,
/// or a naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

select_key! {
    /// Shared easy/medium/hard scale for characters and maps.
    Difficulty {
        Easy => "easy", "Easy";
        Medium => "medium", "Medium";
        Hard => "hard", "Hard";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-03-01").is_some());
        assert!(parse_date("2024-03-01T10:00:00.000Z").is_some());
        assert!(parse_date("2024-03-01T10:00:00").is_some());
        assert!(parse_date("").is_none());
        assert!(parse_date("next tuesday").is_none());
        assert!(parse_date("2024-03-01").unwrap() < parse_date("2024-03-02").unwrap());
    }

    #[test]
    fn test_select_with_unknown_key() {
        let select: Select<Difficulty> =
            serde_json::from_value(json!({ "key": "nightmare", "value": "Nightmare" })).unwrap();
        assert_eq!(select.key, None);
        assert_eq!(select.value.as_deref(), Some("Nightmare"));

        let select: Select<Difficulty> =
            serde_json::from_value(json!({ "key": "hard", "value": "Hard" })).unwrap();
        assert_eq!(select.key, Some(Difficulty::Hard));
    }

    #[test]
    fn test_select_key_parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse(" Medium "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("all"), None);
        assert_eq!(Difficulty::ALL.len(), 3);
    }

    #[test]
    fn test_image_sized_prefers_imgix() {
        let image = ImageRef {
            url: Some("https://cdn/raw.png".to_string()),
            imgix_url: Some("https://imgix/raw.png".to_string()),
        };
        assert_eq!(
            image.sized(600, 400).as_deref(),
            Some("https://imgix/raw.png?w=600&h=400&fit=crop&auto=format,compress")
        );

        let image = ImageRef {
            url: Some("https://cdn/raw.png".to_string()),
            imgix_url: None,
        };
        assert_eq!(image.sized(600, 400).as_deref(), Some("https://cdn/raw.png"));
        assert_eq!(ImageRef::default().sized(1, 1), None);
    }

    #[test]
    fn test_envelope_tolerates_wrong_metadata_shape() {
        let object: CosmicObject<ImageRef> = serde_json::from_value(json!({
            "id": "abc",
            "metadata": "not-a-map",
            "created_at": 12
        }))
        .unwrap();
        assert!(object.metadata.is_none());
        assert!(object.created_at.is_none());
        assert_eq!(object.title, "");
    }
}
