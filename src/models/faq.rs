//! FAQ entries, stored as a repeater on a single page object.

use serde::{Deserialize, Serialize};

use super::{lenient, lenient_vec, ContentType};
use crate::content::{ObjectQuery, PublishStatus};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default, deserialize_with = "lenient")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub answer: Option<String>,
}

/// Metadata of the page object that holds the FAQ list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaqPageMetadata {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub faqs: Vec<Faq>,
}

impl FaqPageMetadata {
    /// Lookup for the FAQ page with the given slug.
    pub fn page_query(slug: &str, status: PublishStatus) -> ObjectQuery {
        ObjectQuery::matching(serde_json::json!({ "type": Self::OBJECT_TYPE, "slug": slug }))
            .props(["id", "title", "metadata.faqs"])
            .depth(1)
            .status(status)
    }
}

impl ContentType for FaqPageMetadata {
    const OBJECT_TYPE: &'static str = "pages";
}
