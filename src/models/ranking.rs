//! Player leaderboard entries.

use serde::{Deserialize, Serialize};

use super::{key_of, lenient, ContentType, ImageRef, Select};

select_key! {
    PlayerRegion {
        Na => "na", "NA";
        Eu => "eu", "EU";
        Latam => "latam", "LATAM";
        Asia => "asia", "ASIA";
    }
}

/// Metadata of a `player-rankings` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRankingMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub rank_position: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_wins: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_matches: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub win_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub favorite_character: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region: Option<Select<PlayerRegion>>,
    #[serde(default, deserialize_with = "lenient")]
    pub season: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub points: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub player_avatar: Option<ImageRef>,
}

impl PlayerRankingMetadata {
    /// Leaderboard position. Zero is treated as unranked.
    pub fn position(&self) -> Option<u32> {
        self.rank_position.filter(|p| *p > 0)
    }

    pub fn region_key(&self) -> Option<PlayerRegion> {
        key_of(&self.region)
    }
}

impl ContentType for PlayerRankingMetadata {
    const OBJECT_TYPE: &'static str = "player-rankings";
}
