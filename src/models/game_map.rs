//! Game maps.

use serde::{Deserialize, Serialize};

use super::{key_of, lenient, lenient_vec, ContentType, Difficulty, ImageRef, Select};

select_key! {
    MapEnvironment {
        Urban => "urban", "Urban";
        Forest => "forest", "Forest";
        Industrial => "industrial", "Industrial";
        Desert => "desert", "Desert";
    }
}

select_key! {
    MapSize {
        Small => "small", "Small";
        Medium => "medium", "Medium";
        Large => "large", "Large";
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapFeature {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

/// Metadata of a `game-maps` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameMapMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub map_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<Select<MapSize>>,
    #[serde(default, deserialize_with = "lenient")]
    pub environment: Option<Select<MapEnvironment>>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_players: Option<u32>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub special_features: Vec<MapFeature>,
    #[serde(default, deserialize_with = "lenient")]
    pub difficulty: Option<Select<Difficulty>>,
    #[serde(default, deserialize_with = "lenient")]
    pub release_date: Option<String>,
}

impl GameMapMetadata {
    pub fn environment_key(&self) -> Option<MapEnvironment> {
        key_of(&self.environment)
    }

    pub fn difficulty_key(&self) -> Option<Difficulty> {
        key_of(&self.difficulty)
    }
}

impl ContentType for GameMapMetadata {
    const OBJECT_TYPE: &'static str = "game-maps";
}
