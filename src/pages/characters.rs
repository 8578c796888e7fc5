use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
};
use maud::{html, Markup};

use super::{filter_bar, render_state, Filter, Filterable, Listing, PageController};
use crate::models::{value_of, CharacterMetadata, CharacterRole, CosmicObject};
use crate::views::{badges, layout::PageContext, layout::document, page_header, rich_text};
use crate::AppState;

impl Listing for CharacterMetadata {
    const NOUN: &'static str = "characters";
}

impl Filterable for CharacterMetadata {
    type Key = CharacterRole;
    const PARAM: &'static str = "role";

    fn key_of(metadata: &Self) -> Option<CharacterRole> {
        metadata.role_key()
    }
}

/// `GET /characters?role=`
pub async fn characters_page(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let filter = Filter::from_params::<CharacterMetadata>(&params);
    let mut controller = PageController::<CharacterMetadata>::new();
    controller.load(state.content.as_ref()).await;

    Html(render_characters(&ctx, &controller, filter).into_string())
}

pub fn render_characters(
    ctx: &PageContext,
    controller: &PageController<CharacterMetadata>,
    filter: Filter<CharacterRole>,
) -> Markup {
    let items = controller.view(filter);
    let content = html! {
        (page_header("Characters", "Master unique abilities and dominate the arena"))
        (filter_bar::<CharacterMetadata>(filter))
        (render_state(controller.state(), &items, "No characters found for this role", |items| html! {
            div class="grid" {
                @for character in items {
                    (character_card(character))
                }
            }
        }))
    };
    document(ctx, "Characters", content)
}

fn character_card(character: &CosmicObject<CharacterMetadata>) -> Markup {
    let Some(meta) = character.metadata.as_ref() else {
        return html! {
            article class="card fade-in" { h3 { (character.title) } }
        };
    };

    html! {
        article class="card fade-in" {
            @if let Some(src) = meta.character_image.as_ref().and_then(|i| i.sized(600, 400)) {
                img class="cover" src=(src) alt=(character.title) loading="lazy";
            }
            div class="card-head" {
                h3 { (character.title) }
                @if let Some(role) = value_of(&meta.role) {
                    span class={ "pill " (badges::role_color(meta.role_key())) } { (role) }
                }
            }
            p class="stars" title=(value_of(&meta.difficulty).unwrap_or("Unknown")) {
                (badges::difficulty_stars(meta.difficulty_key()))
            }
            dl class="stats" {
                dt { "Health" }
                dd { (meta.health_points.map(|hp| format!("{:.0}", hp)).unwrap_or_else(|| "N/A".to_string())) }
                dt { "Speed" }
                dd { (meta.speed.map(|s| format!("{}", s)).unwrap_or_else(|| "N/A".to_string())) }
            }
            @if let Some(ability) = meta.special_ability.as_deref() {
                p class="ability" { strong { "Special ability: " } (ability) }
            }
            (rich_text(meta.content.as_deref()))
            @if !meta.skills.is_empty() {
                h4 { "Skills" }
                ul class="skills" {
                    @for skill in &meta.skills {
                        li {
                            strong { (skill.name.as_deref().unwrap_or("Unnamed skill")) }
                            @if let Some(cooldown) = skill.cooldown.as_deref() {
                                span class="text-muted" { " (" (cooldown) ")" }
                            }
                            @if let Some(description) = skill.description.as_deref() {
                                p class="text-muted" { (description) }
                            }
                        }
                    }
                }
            }
            @if !meta.available_skins.is_empty() {
                h4 { "Skins" }
                ul class="skins" {
                    @for skin in &meta.available_skins {
                        li {
                            (skin.name.as_deref().unwrap_or("Unnamed skin"))
                            @if let Some(rarity) = skin.rarity.as_deref() {
                                " " span class="pill pill-accent" { (rarity) }
                            }
                        }
                    }
                }
            }
        }
    }
}
