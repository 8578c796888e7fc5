//! Content backend port.
//!
//! Everything the site knows about the hosted bucket goes through the
//! [`ContentClient`] trait: reads are idempotent queries, the single write is
//! `insert_one`. Pages never talk to HTTP directly so tests can swap in a fake.

mod cosmic;

pub use cosmic::CosmicClient;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::models::{CosmicObject, ContentType};

/// Errors from the content backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// The backend answered 404; callers treat this as an empty result.
    #[error("No objects found")]
    NotFound,
    /// The backend answered with a non-2xx status.
    #[error("Content API error ({status}): {message}")]
    Backend { status: u16, message: String },
    /// The request never produced a response.
    #[error("Content API request failed: {0}")]
    Transport(String),
    /// The response body did not have the expected shape.
    #[error("Unexpected content API response: {0}")]
    Decode(String),
}

/// Backend-side visibility filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Draft,
    #[default]
    Published,
    Any,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
            PublishStatus::Any => "any",
        }
    }
}

/// A read query against the bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectQuery {
    /// Query object, e.g. `{"type": "characters"}`.
    pub filter: Value,
    /// Projected properties; empty means the backend default.
    pub props: Vec<String>,
    /// Relation-resolution depth.
    pub depth: u8,
    pub status: PublishStatus,
    pub limit: Option<u32>,
    /// Backend sort expression, e.g. `-created_at`.
    pub sort: Option<String>,
}

impl ObjectQuery {
    /// Query all objects of one type.
    pub fn of_type(object_type: &str) -> Self {
        Self {
            filter: serde_json::json!({ "type": object_type }),
            props: Vec::new(),
            depth: 0,
            status: PublishStatus::default(),
            limit: None,
            sort: None,
        }
    }

    /// Query with an arbitrary filter object.
    pub fn matching(filter: Value) -> Self {
        Self {
            filter,
            ..Self::of_type("")
        }
    }

    pub fn props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props = props.into_iter().map(Into::into).collect();
        self
    }

    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn status(mut self, status: PublishStatus) -> Self {
        self.status = status;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    /// The `type` in the filter, if any.
    pub fn object_type(&self) -> Option<&str> {
        self.filter.get("type").and_then(Value::as_str)
    }
}

/// A new object to insert. Not idempotent: resubmitting creates a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub title: String,
    pub metadata: Value,
}

/// Typed access to the content backend.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Fetch every object matching the query, in backend order.
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, ContentError>;

    /// Fetch the first object matching the query.
    async fn find_one(&self, query: &ObjectQuery) -> Result<Option<Value>, ContentError>;

    /// Create an object and return it as stored.
    async fn insert_one(&self, object: &NewObject) -> Result<Value, ContentError>;
}

/// Fetch all objects of `T`, decoding each one.
///
/// A 404 is an empty list. Objects that cannot be decoded at all are skipped.
pub async fn fetch_all<T: ContentType>(
    client: &dyn ContentClient,
    query: &ObjectQuery,
) -> Result<Vec<CosmicObject<T>>, ContentError> {
    let raw = match client.find(query).await {
        Ok(raw) => raw,
        Err(ContentError::NotFound) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    Ok(raw.into_iter().filter_map(decode_object::<T>).collect())
}

/// Fetch the first object of `T`, or `None` when nothing matches.
pub async fn fetch_first<T: ContentType>(
    client: &dyn ContentClient,
    query: &ObjectQuery,
) -> Result<Option<CosmicObject<T>>, ContentError> {
    match client.find_one(query).await {
        Ok(raw) => Ok(raw.and_then(decode_object::<T>)),
        Err(ContentError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

fn decode_object<T: ContentType>(value: Value) -> Option<CosmicObject<T>> {
    match serde_json::from_value::<CosmicObject<T>>(value) {
        Ok(object) => Some(object),
        Err(e) => {
            tracing::warn!("Skipping undecodable {} object: {}", T::OBJECT_TYPE, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CharacterMetadata;
    use serde_json::json;
    use std::sync::Mutex;

    struct ScriptedClient {
        find: Mutex<Option<Result<Vec<Value>, ContentError>>>,
    }

    #[async_trait]
    impl ContentClient for ScriptedClient {
        async fn find(&self, _query: &ObjectQuery) -> Result<Vec<Value>, ContentError> {
            self.find.lock().unwrap().take().unwrap_or(Ok(Vec::new()))
        }

        async fn find_one(&self, query: &ObjectQuery) -> Result<Option<Value>, ContentError> {
            Ok(self.find(query).await?.into_iter().next())
        }

        async fn insert_one(&self, object: &NewObject) -> Result<Value, ContentError> {
            Ok(serde_json::to_value(object).unwrap())
        }
    }

    fn scripted(result: Result<Vec<Value>, ContentError>) -> ScriptedClient {
        ScriptedClient {
            find: Mutex::new(Some(result)),
        }
    }

    #[test]
    fn test_query_builder() {
        let query = ObjectQuery::of_type("characters")
            .props(["id", "title"])
            .depth(1)
            .limit(5)
            .sort("-created_at");

        assert_eq!(query.object_type(), Some("characters"));
        assert_eq!(query.props, vec!["id".to_string(), "title".to_string()]);
        assert_eq!(query.depth, 1);
        assert_eq!(query.status, PublishStatus::Published);
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.sort.as_deref(), Some("-created_at"));
    }

    #[test]
    fn test_matching_query_keeps_filter() {
        let query = ObjectQuery::matching(json!({ "type": "pages", "slug": "faqs" }))
            .status(PublishStatus::Any);
        assert_eq!(query.object_type(), Some("pages"));
        assert_eq!(query.filter["slug"], "faqs");
        assert_eq!(query.status.as_str(), "any");
    }

    #[tokio::test]
    async fn test_fetch_all_treats_not_found_as_empty() {
        let client = scripted(Err(ContentError::NotFound));
        let result = fetch_all::<CharacterMetadata>(&client, &ObjectQuery::of_type("characters"))
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_backend_errors() {
        let client = scripted(Err(ContentError::Transport("offline".to_string())));
        let result =
            fetch_all::<CharacterMetadata>(&client, &ObjectQuery::of_type("characters")).await;
        assert_eq!(result, Err(ContentError::Transport("offline".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_all_skips_objects_without_identity() {
        let client = scripted(Ok(vec![
            json!({ "id": "1", "slug": "wraith", "title": "Wraith", "metadata": null }),
            json!("not an object"),
            json!({ "id": "2", "slug": "nurse", "title": "Nurse" }),
        ]));
        let result = fetch_all::<CharacterMetadata>(&client, &ObjectQuery::of_type("characters"))
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.metadata.is_none()));
    }
}
