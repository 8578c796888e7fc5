use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
};
use maud::{html, Markup};

use super::{
    filter_bar, render_state, sort_newest_first, Filter, Filterable, Listing, PageController,
};
use crate::models::{value_of, CosmicObject, TournamentMetadata, TournamentStatus};
use crate::views::{badges, layout::document, layout::PageContext, long_date, page_header, rich_text};
use crate::AppState;

impl Listing for TournamentMetadata {
    const NOUN: &'static str = "tournaments";

    fn arrange(items: &mut [CosmicObject<Self>]) {
        sort_newest_first(items, |t| t.metadata.as_ref().and_then(|m| m.starts()));
    }
}

impl Filterable for TournamentMetadata {
    type Key = TournamentStatus;
    const PARAM: &'static str = "status";

    fn key_of(metadata: &Self) -> Option<TournamentStatus> {
        metadata.status_key()
    }
}

/// `GET /tournaments?status=`
pub async fn tournaments_page(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let filter = Filter::from_params::<TournamentMetadata>(&params);
    let mut controller = PageController::<TournamentMetadata>::new();
    controller.load(state.content.as_ref()).await;

    Html(render_tournaments(&ctx, &controller, filter).into_string())
}

pub fn render_tournaments(
    ctx: &PageContext,
    controller: &PageController<TournamentMetadata>,
    filter: Filter<TournamentStatus>,
) -> Markup {
    let items = controller.view(filter);
    let content = html! {
        (page_header("Tournaments", "Compete for glory and incredible prizes"))
        (filter_bar::<TournamentMetadata>(filter))
        (render_state(controller.state(), &items, "No tournaments found", |items| html! {
            div class="grid" {
                @for tournament in items {
                    (tournament_card(tournament))
                }
            }
        }))
    };
    document(ctx, "Tournaments", content)
}

fn tournament_card(tournament: &CosmicObject<TournamentMetadata>) -> Markup {
    let meta = tournament.metadata.clone().unwrap_or_default();
    let finished = meta.status_key() == Some(TournamentStatus::Finished);

    html! {
        article class="card fade-in" {
            @if let Some(src) = meta.tournament_banner.as_ref().and_then(|b| b.sized(800, 400)) {
                img class="cover" src=(src) alt=(tournament.title) loading="lazy";
            }
            div class="card-head" {
                h3 { (tournament.title) }
                span class={ "pill " (badges::status_color(meta.status_key())) } {
                    (value_of(&meta.status).unwrap_or("TBA"))
                }
            }
            dl class="stats" {
                @if let Some(start) = long_date(meta.start_date.as_deref()) {
                    dt { "Starts" }
                    dd { (start) }
                }
                @if let Some(end) = long_date(meta.end_date.as_deref()) {
                    dt { "Ends" }
                    dd { (end) }
                }
                @if let Some(prize) = meta.prize_pool.as_deref() {
                    dt { "Prize pool" }
                    dd class="text-green" { (prize) }
                }
                @if meta.participants_count.is_some() || meta.max_participants.is_some() {
                    dt { "Participants" }
                    dd {
                        (meta.participants_count.unwrap_or(0))
                        @if let Some(max) = meta.max_participants {
                            " / " (max)
                        }
                    }
                }
            }
            (rich_text(meta.content.as_deref()))
            @if finished {
                @if let Some(winner) = meta.winner.as_deref() {
                    p class="winner" { "🏆 Winner: " strong { (winner) } }
                }
            } @else if let Some(link) = meta.registration_link.as_deref() {
                a class="btn btn-primary" href=(link) target="_blank" rel="noopener noreferrer" { "Register now" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(objects: serde_json::Value) -> PageController<TournamentMetadata> {
        let items = serde_json::from_value(objects).unwrap();
        let mut controller = PageController::new();
        let ticket = controller.begin_fetch();
        controller.complete(ticket, Ok(items));
        controller
    }

    #[test]
    fn test_live_filter_skips_entries_without_metadata() {
        let controller = load(json!([
            { "id": "1", "title": "Spring Cup", "metadata": { "status": { "key": "live", "value": "Live" } } },
            { "id": "2", "title": "Winter Cup", "metadata": { "status": { "key": "finished", "value": "Finished" } } },
            { "id": "3", "title": "Mystery Cup" },
            { "id": "4", "title": "Night Cup", "metadata": { "status": { "key": "live", "value": "Live" } } }
        ]));

        let live = controller.view(Filter::Only(TournamentStatus::Live));
        let ids: Vec<_> = live.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"1") && ids.contains(&"4"));
    }

    #[test]
    fn test_sorted_by_start_date_descending() {
        let controller = load(json!([
            { "id": "old", "metadata": { "start_date": "2023-05-01" } },
            { "id": "tba", "metadata": {} },
            { "id": "new", "metadata": { "start_date": "2024-11-20" } }
        ]));
        let ids: Vec<_> = controller.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "tba"]);
    }

    #[test]
    fn test_finished_shows_winner_not_registration() {
        let controller = load(json!([{
            "id": "1",
            "title": "Autumn Clash",
            "metadata": {
                "status": { "key": "finished", "value": "Finished" },
                "winner": "Team Moth",
                "registration_link": "https://example.com/register"
            }
        }]));
        let html = render_tournaments(&PageContext::default(), &controller, Filter::All).into_string();
        assert!(html.contains("Team Moth"));
        assert!(!html.contains("Register now"));
    }
}
