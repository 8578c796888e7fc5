//! Colour classes and badges derived from select keys.

use crate::models::{
    CharacterRole, Difficulty, MapEnvironment, NewsCategory, NewsPriority, PatchType,
    TournamentStatus,
};

pub fn role_color(role: Option<CharacterRole>) -> &'static str {
    match role {
        Some(CharacterRole::Assassin) => "text-red",
        Some(CharacterRole::Hunter) => "text-secondary",
        Some(CharacterRole::Survivor) => "text-accent",
        None => "text-muted",
    }
}

/// Three-star difficulty meter: hard=3, medium=2, anything else=1.
pub fn difficulty_stars(difficulty: Option<Difficulty>) -> String {
    let filled = match difficulty {
        Some(Difficulty::Hard) => 3,
        Some(Difficulty::Medium) => 2,
        _ => 1,
    };
    format!("{}{}", "★".repeat(filled), "☆".repeat(3 - filled))
}

pub fn difficulty_color(difficulty: Option<Difficulty>) -> &'static str {
    match difficulty {
        Some(Difficulty::Easy) => "pill-green",
        Some(Difficulty::Medium) => "pill-yellow",
        Some(Difficulty::Hard) => "pill-red",
        None => "pill-gray",
    }
}

/// Medal for the podium. Only positions 1 to 3 get one.
pub fn rank_badge(position: Option<u32>) -> Option<&'static str> {
    match position {
        Some(1) => Some("🥇"),
        Some(2) => Some("🥈"),
        Some(3) => Some("🥉"),
        _ => None,
    }
}

pub fn rank_color(position: Option<u32>) -> &'static str {
    match position {
        Some(1) => "rank-gold",
        Some(2) => "rank-silver",
        Some(3) => "rank-bronze",
        _ => "text-muted",
    }
}

pub fn status_color(status: Option<TournamentStatus>) -> &'static str {
    match status {
        Some(TournamentStatus::Live) => "pill-green pulse",
        Some(TournamentStatus::Upcoming) => "pill-primary",
        Some(TournamentStatus::Finished) | None => "pill-gray",
    }
}

pub fn patch_type_color(patch_type: Option<PatchType>) -> &'static str {
    match patch_type {
        Some(PatchType::Major) => "pill-accent",
        Some(PatchType::Bugfix) => "pill-yellow",
        Some(PatchType::Balance) => "pill-secondary",
        Some(PatchType::NewContent) => "pill-primary",
        None => "pill-gray",
    }
}

pub fn environment_color(environment: Option<MapEnvironment>) -> &'static str {
    match environment {
        Some(MapEnvironment::Forest) => "text-green",
        Some(MapEnvironment::Industrial) => "text-yellow",
        Some(MapEnvironment::Desert) => "text-amber",
        Some(MapEnvironment::Urban) | None => "text-muted",
    }
}

pub fn category_color(category: Option<NewsCategory>) -> &'static str {
    match category {
        Some(NewsCategory::Event) => "pill-secondary",
        Some(NewsCategory::Maintenance) => "pill-yellow",
        Some(NewsCategory::Community) => "pill-accent",
        Some(NewsCategory::News) | None => "pill-primary",
    }
}

/// Label and class for a news priority badge; normal priority has none.
pub fn priority_badge(priority: Option<NewsPriority>) -> Option<(&'static str, &'static str)> {
    match priority {
        Some(NewsPriority::Critical) => Some(("Critical", "pill-red")),
        Some(NewsPriority::Important) => Some(("Important", "pill-yellow")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_place_marker_only_for_position_one() {
        assert_eq!(rank_badge(Some(1)), Some("🥇"));
        assert_ne!(rank_badge(Some(2)), Some("🥇"));
        assert_eq!(rank_badge(Some(4)), None);
        assert_eq!(rank_badge(None), None);
    }

    #[test]
    fn test_difficulty_stars() {
        assert_eq!(difficulty_stars(Some(Difficulty::Hard)), "★★★");
        assert_eq!(difficulty_stars(Some(Difficulty::Medium)), "★★☆");
        assert_eq!(difficulty_stars(Some(Difficulty::Easy)), "★☆☆");
        assert_eq!(difficulty_stars(None), "★☆☆");
    }

    #[test]
    fn test_priority_badge() {
        assert_eq!(priority_badge(Some(NewsPriority::Normal)), None);
        assert_eq!(
            priority_badge(Some(NewsPriority::Critical)).map(|b| b.0),
            Some("Critical")
        );
    }

    #[test]
    fn test_live_status_pulses() {
        assert!(status_color(Some(TournamentStatus::Live)).contains("pulse"));
        assert_eq!(status_color(None), "pill-gray");
    }
}
