//! Cosmic bucket client (REST API v3).

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{ContentClient, ContentError, NewObject, ObjectQuery};

/// Request timeout for backend calls. There is no retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for one Cosmic bucket.
#[derive(Clone)]
pub struct CosmicClient {
    client: Client,
    api_url: String,
    bucket_slug: String,
    read_key: String,
    write_key: String,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    objects: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct InsertResponse {
    object: Option<Value>,
}

impl CosmicClient {
    pub fn new(api_url: &str, bucket_slug: &str, read_key: &str, write_key: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            bucket_slug: bucket_slug.to_string(),
            read_key: read_key.to_string(),
            write_key: write_key.to_string(),
        }
    }

    fn objects_url(&self) -> String {
        format!("{}/buckets/{}/objects", self.api_url, self.bucket_slug)
    }

    /// Query-string pairs for a read, in a stable order.
    fn read_params(&self, query: &ObjectQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", query.filter.to_string())];
        if !query.props.is_empty() {
            params.push(("props", query.props.join(",")));
        }
        params.push(("depth", query.depth.to_string()));
        params.push(("status", query.status.as_str().to_string()));
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(sort) = &query.sort {
            params.push(("sort", sort.clone()));
        }
        params.push(("read_key", self.read_key.clone()));
        params
    }

    async fn get_objects(&self, query: &ObjectQuery) -> Result<Vec<Value>, ContentError> {
        tracing::debug!(
            "GET objects type={:?} depth={} status={}",
            query.object_type(),
            query.depth,
            query.status.as_str()
        );

        let response = self
            .client
            .get(self.objects_url())
            .query(&self.read_params(query))
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;
        let body: FindResponse = response
            .json()
            .await
            .map_err(|e| ContentError::Decode(e.to_string()))?;

        Ok(body.objects)
    }
}

#[async_trait]
impl ContentClient for CosmicClient {
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, ContentError> {
        self.get_objects(query).await
    }

    async fn find_one(&self, query: &ObjectQuery) -> Result<Option<Value>, ContentError> {
        let query = query.clone().limit(1);
        Ok(self.get_objects(&query).await?.into_iter().next())
    }

    async fn insert_one(&self, object: &NewObject) -> Result<Value, ContentError> {
        tracing::debug!("POST object type={}", object.object_type);

        let response = self
            .client
            .post(self.objects_url())
            .bearer_auth(&self.write_key)
            .json(object)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;
        let body: InsertResponse = response
            .json()
            .await
            .map_err(|e| ContentError::Decode(e.to_string()))?;

        body.object
            .ok_or_else(|| ContentError::Decode("insert response has no object".to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> ContentError {
    tracing::error!("Content API request failed: {}", err);
    ContentError::Transport(err.to_string())
}

async fn check_status(response: Response) -> Result<Response, ContentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ContentError::NotFound);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Content API returned {}: {}", status, body);
    Err(ContentError::Backend {
        status: status.as_u16(),
        message: extract_message(&body).unwrap_or_else(|| status.to_string()),
    })
}

/// Cosmic error bodies look like `{"status": 401, "message": "..."}`.
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
