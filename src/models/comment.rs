//! Visitor comments. The author's name is stored as the object title.

use serde::{Deserialize, Serialize};

use super::{lenient, ContentType};
use crate::content::ObjectQuery;

/// Metadata of a `comments` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommentMetadata {
    /// Read from the bucket but never sent back out.
    #[serde(default, deserialize_with = "lenient", skip_serializing)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub comment: Option<String>,
}

impl ContentType for CommentMetadata {
    const OBJECT_TYPE: &'static str = "comments";

    fn list_query() -> ObjectQuery {
        ObjectQuery::of_type(Self::OBJECT_TYPE)
            .props(["id", "title", "metadata", "created_at"])
            .sort("-created_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_is_read_but_not_serialized() {
        let meta: CommentMetadata =
            serde_json::from_value(json!({ "email": "leo@example.com", "comment": "Hi" })).unwrap();
        assert_eq!(meta.email.as_deref(), Some("leo@example.com"));

        let out = serde_json::to_value(&meta).unwrap();
        assert_eq!(out, json!({ "comment": "Hi" }));
    }
}
