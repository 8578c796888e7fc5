use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
};
use maud::{html, Markup};

use super::{filter_bar, render_state, Filter, Filterable, Listing, PageController};
use crate::models::{value_of, CosmicObject, GameMapMetadata, MapEnvironment};
use crate::views::{badges, layout::document, layout::PageContext, page_header, rich_text, short_date};
use crate::AppState;

impl Listing for GameMapMetadata {
    const NOUN: &'static str = "maps";
}

impl Filterable for GameMapMetadata {
    type Key = MapEnvironment;
    const PARAM: &'static str = "environment";

    fn key_of(metadata: &Self) -> Option<MapEnvironment> {
        metadata.environment_key()
    }
}

/// `GET /maps?environment=`
pub async fn maps_page(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let filter = Filter::from_params::<GameMapMetadata>(&params);
    let mut controller = PageController::<GameMapMetadata>::new();
    controller.load(state.content.as_ref()).await;

    Html(render_maps(&ctx, &controller, filter).into_string())
}

pub fn render_maps(
    ctx: &PageContext,
    controller: &PageController<GameMapMetadata>,
    filter: Filter<MapEnvironment>,
) -> Markup {
    let items = controller.view(filter);
    let content = html! {
        (page_header("Game Maps", "Explore diverse battlegrounds and master tactical positions"))
        (filter_bar::<GameMapMetadata>(filter))
        (render_state(controller.state(), &items, "No maps found for this environment", |items| html! {
            div class="grid" {
                @for map in items {
                    (map_card(map))
                }
            }
        }))
    };
    document(ctx, "Maps", content)
}

fn map_card(map: &CosmicObject<GameMapMetadata>) -> Markup {
    let meta = map.metadata.clone().unwrap_or_default();
    html! {
        article class="card fade-in" {
            @if let Some(src) = meta.map_image.as_ref().and_then(|i| i.sized(800, 500)) {
                img class="cover" src=(src) alt=(map.title) loading="lazy";
            }
            div class="card-head" {
                h3 { (map.title) }
                @if let Some(environment) = value_of(&meta.environment) {
                    span class=(badges::environment_color(meta.environment_key())) { (environment) }
                }
            }
            div class="tags" {
                @if let Some(size) = value_of(&meta.size) {
                    span class="pill pill-gray" { (size) }
                }
                @if let Some(difficulty) = value_of(&meta.difficulty) {
                    span class={ "pill " (badges::difficulty_color(meta.difficulty_key())) } { (difficulty) }
                }
                @if let Some(players) = meta.max_players {
                    span class="pill pill-primary" { (players) " players" }
                }
            }
            (rich_text(meta.content.as_deref()))
            @if !meta.special_features.is_empty() {
                h4 { "Special features" }
                ul {
                    @for feature in &meta.special_features {
                        li {
                            strong { (feature.name.as_deref().unwrap_or("Feature")) }
                            @if let Some(description) = feature.description.as_deref() {
                                ": " (description)
                            }
                        }
                    }
                }
            }
            @if let Some(released) = short_date(meta.release_date.as_deref()) {
                p class="text-muted small" { "Released " (released) }
            }
        }
    }
}
