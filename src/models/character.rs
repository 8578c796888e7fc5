//! Playable characters.

use serde::{Deserialize, Serialize};

use super::{key_of, lenient, lenient_vec, ContentType, Difficulty, ImageRef, Select};

select_key! {
    /// Character role, used by the role filter.
    CharacterRole {
        Assassin => "assassin", "Assassin";
        Hunter => "hunter", "Hunter";
        Survivor => "survivor", "Survivor";
    }
}

/// An ability in a character's kit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacterSkill {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cooldown: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacterSkin {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rarity: Option<String>,
}

/// Metadata of a `characters` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacterMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<Select<CharacterRole>>,
    #[serde(default, deserialize_with = "lenient")]
    pub health_points: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub special_ability: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub difficulty: Option<Select<Difficulty>>,
    #[serde(default, deserialize_with = "lenient")]
    pub character_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub skills: Vec<CharacterSkill>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub available_skins: Vec<CharacterSkin>,
}

impl CharacterMetadata {
    pub fn role_key(&self) -> Option<CharacterRole> {
        key_of(&self.role)
    }

    pub fn difficulty_key(&self) -> Option<Difficulty> {
        key_of(&self.difficulty)
    }
}

impl ContentType for CharacterMetadata {
    const OBJECT_TYPE: &'static str = "characters";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CosmicObject;
    use serde_json::json;

    #[test]
    fn test_decode_full_character() {
        let character: CosmicObject<CharacterMetadata> = serde_json::from_value(json!({
            "id": "c1",
            "slug": "the-stalker",
            "title": "The Stalker",
            "metadata": {
                "role": { "key": "assassin", "value": "Assassin" },
                "health_points": 120,
                "speed": 4.5,
                "difficulty": { "key": "hard", "value": "Hard" },
                "skills": [
                    { "name": "Shadow Step", "description": "Blink forward", "cooldown": "12s" },
                    "garbage"
                ],
                "available_skins": [{ "name": "Crimson", "rarity": "legendary" }]
            }
        }))
        .unwrap();

        let meta = character.metadata.unwrap();
        assert_eq!(meta.role_key(), Some(CharacterRole::Assassin));
        assert_eq!(meta.health_points, Some(120.0));
        assert_eq!(meta.difficulty_key(), Some(Difficulty::Hard));
        assert_eq!(meta.skills.len(), 1);
        assert_eq!(meta.skills[0].cooldown.as_deref(), Some("12s"));
        assert_eq!(meta.available_skins[0].name.as_deref(), Some("Crimson"));
    }

    #[test]
    fn test_decode_sparse_character() {
        let meta: CharacterMetadata = serde_json::from_value(json!({
            "health_points": "lots",
            "skills": null
        }))
        .unwrap();
        assert_eq!(meta.health_points, None);
        assert!(meta.skills.is_empty());
        assert_eq!(meta.role_key(), None);
    }
}
