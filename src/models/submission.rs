//! Visitor-submitted forms and their mapping onto new bucket objects.

use serde::{Deserialize, Serialize};

use super::{CommentMetadata, ContentType};
use crate::content::NewObject;

/// Object type for contact-form submissions.
pub const FORM_SUBMISSION_TYPE: &str = "form-submissions";

/// Request body for the contact form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub message: String,
    /// Per-render token used to reject a duplicate in-flight post
    #[serde(default)]
    pub submission_id: Option<String>,
}

impl ContactRequest {
    pub fn to_new_object(&self) -> NewObject {
        NewObject {
            object_type: FORM_SUBMISSION_TYPE.to_string(),
            title: self.name.trim().to_string(),
            metadata: serde_json::json!({
                "email": self.email.trim(),
                "company": self.company.trim(),
                "message": self.message.trim(),
            }),
        }
    }
}

/// Request body for a new comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub submission_id: Option<String>,
}

impl CommentRequest {
    pub fn to_new_object(&self) -> NewObject {
        NewObject {
            object_type: CommentMetadata::OBJECT_TYPE.to_string(),
            title: self.name.trim().to_string(),
            metadata: serde_json::json!({
                "email": self.email.trim(),
                "comment": self.comment.trim(),
            }),
        }
    }
}
