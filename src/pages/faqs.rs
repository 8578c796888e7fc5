use axum::{extract::State, response::Html};
use maud::{html, Markup};

use crate::content::{fetch_first, PublishStatus};
use crate::models::{CosmicObject, FaqPageMetadata};
use crate::views::components::{empty_state, error_message};
use crate::views::layout::{document, PageContext};
use crate::AppState;

/// `GET /faqs`
pub async fn faqs_page(State(state): State<AppState>, ctx: PageContext) -> Html<String> {
    let query = FaqPageMetadata::page_query(&state.config.faqs_slug, PublishStatus::Published);
    let page = fetch_first::<FaqPageMetadata>(state.content.as_ref(), &query).await;

    let content = match page {
        Ok(page) => render_faqs(page.as_ref()),
        Err(e) => {
            tracing::warn!("Failed to load FAQs: {}", e);
            error_message("Failed to load FAQs")
        }
    };
    Html(document(&ctx, "FAQs", content).into_string())
}

/// The FAQ section. A missing page or an empty list reads "No FAQs available."
pub fn render_faqs(page: Option<&CosmicObject<FaqPageMetadata>>) -> Markup {
    let title = page
        .map(|p| p.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or("FAQs");
    let faqs = page
        .and_then(|p| p.metadata.as_ref())
        .map(|m| m.faqs.as_slice())
        .unwrap_or_default();

    html! {
        section class="faqs narrow" {
            h1 class="gradient-text" { (title) }
            @if faqs.is_empty() {
                (empty_state("No FAQs available."))
            } @else {
                @for faq in faqs {
                    details class="faq card" {
                        summary { (faq.question.as_deref().unwrap_or("Untitled question")) }
                        p { (faq.answer.as_deref().unwrap_or_default()) }
                    }
                }
            }
        }
    }
}
