//! News posts shown in the home carousel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{key_of, lenient, parse_date, ContentType, ImageRef, Select};

select_key! {
    NewsCategory {
        News => "news", "News";
        Event => "event", "Event";
        Maintenance => "maintenance", "Maintenance";
        Community => "community", "Community";
    }
}

select_key! {
    NewsPriority {
        Normal => "normal", "Normal";
        Important => "important", "Important";
        Critical => "critical", "Critical";
    }
}

/// Metadata of a `news` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewsMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub publication_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<Select<NewsCategory>>,
    #[serde(default, deserialize_with = "lenient")]
    pub featured_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<Select<NewsPriority>>,
    #[serde(default, deserialize_with = "lenient")]
    pub related_link: Option<String>,
}

impl NewsMetadata {
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.publication_date.as_deref().and_then(parse_date)
    }

    pub fn category_key(&self) -> Option<NewsCategory> {
        key_of(&self.category)
    }

    pub fn priority_key(&self) -> Option<NewsPriority> {
        key_of(&self.priority)
    }
}

impl ContentType for NewsMetadata {
    const OBJECT_TYPE: &'static str = "news";
}
