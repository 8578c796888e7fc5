//! Tournaments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{key_of, lenient, parse_date, ContentType, ImageRef, Select};

select_key! {
    TournamentStatus {
        Upcoming => "upcoming", "Upcoming";
        Live => "live", "Live";
        Finished => "finished", "Finished";
    }
}

/// Metadata of a `tournaments` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TournamentMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<Select<TournamentStatus>>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub prize_pool: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_participants: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub participants_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub tournament_banner: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub registration_link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub winner: Option<String>,
}

impl TournamentMetadata {
    pub fn status_key(&self) -> Option<TournamentStatus> {
        key_of(&self.status)
    }

    pub fn starts(&self) -> Option<DateTime<Utc>> {
        self.start_date.as_deref().and_then(parse_date)
    }
}

impl ContentType for TournamentMetadata {
    const OBJECT_TYPE: &'static str = "tournaments";
}
