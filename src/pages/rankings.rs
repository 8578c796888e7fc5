use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
};
use maud::{html, Markup};

use super::{
    filter_bar, render_state, sort_by_position, Filter, Filterable, Listing, PageController,
};
use crate::models::{value_of, CosmicObject, PlayerRankingMetadata, PlayerRegion};
use crate::views::{badges, group_thousands, layout::document, layout::PageContext, page_header};
use crate::AppState;

impl Listing for PlayerRankingMetadata {
    const NOUN: &'static str = "rankings";

    fn arrange(items: &mut [CosmicObject<Self>]) {
        sort_by_position(items, |r| r.metadata.as_ref().and_then(|m| m.position()));
    }
}

impl Filterable for PlayerRankingMetadata {
    type Key = PlayerRegion;
    const PARAM: &'static str = "region";

    fn key_of(metadata: &Self) -> Option<PlayerRegion> {
        metadata.region_key()
    }
}

/// `GET /rankings?region=`
pub async fn rankings_page(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let filter = Filter::from_params::<PlayerRankingMetadata>(&params);
    let mut controller = PageController::<PlayerRankingMetadata>::new();
    controller.load(state.content.as_ref()).await;

    Html(render_rankings(&ctx, &controller, filter).into_string())
}

pub fn render_rankings(
    ctx: &PageContext,
    controller: &PageController<PlayerRankingMetadata>,
    filter: Filter<PlayerRegion>,
) -> Markup {
    let items = controller.view(filter);
    let content = html! {
        (page_header("Player Rankings", "Top players competing for glory"))
        (filter_bar::<PlayerRankingMetadata>(filter))
        (render_state(controller.state(), &items, "No rankings found for this region", |items| html! {
            div class="card table-wrap" {
                table class="ranking" {
                    thead {
                        tr {
                            th { "Rank" }
                            th { "Player" }
                            th { "Region" }
                            th { "Points" }
                            th { "Wins" }
                            th { "Matches" }
                            th { "Win Rate" }
                            th { "Favorite Character" }
                        }
                    }
                    tbody {
                        @let fallback = PlayerRankingMetadata::default();
                        @for ranking in items {
                            (ranking_row(ranking, ranking.metadata.as_ref().unwrap_or(&fallback)))
                        }
                    }
                }
            }
        }))
    };
    document(ctx, "Rankings", content)
}

fn ranking_row(ranking: &CosmicObject<PlayerRankingMetadata>, meta: &PlayerRankingMetadata) -> Markup {
    let position = meta.position();
    html! {
        tr {
            td {
                span class={ "rank " (badges::rank_color(position)) } {
                    (position.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()))
                }
                @if let Some(medal) = badges::rank_badge(position) {
                    " " span class="medal" { (medal) }
                }
            }
            td {
                @if let Some(src) = meta.player_avatar.as_ref().and_then(|a| a.sized(80, 80)) {
                    img class="avatar" src=(src) alt=(ranking.title);
                    " "
                }
                strong { (ranking.title) }
                @if let Some(season) = meta.season.as_deref() {
                    div class="text-muted small" { (season) }
                }
            }
            td { span class="pill pill-primary" { (value_of(&meta.region).unwrap_or("N/A")) } }
            td class="text-primary" { (group_thousands(meta.points.unwrap_or(0))) }
            td { (group_thousands(meta.total_wins.unwrap_or(0))) }
            td { (group_thousands(meta.total_matches.unwrap_or(0))) }
            td class="text-secondary" { (format!("{:.1}%", meta.win_rate.unwrap_or(0.0))) }
            td { (meta.favorite_character.as_deref().unwrap_or("N/A")) }
        }
    }
}
