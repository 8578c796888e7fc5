use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
};
use maud::{html, Markup};

use super::{render_state, sort_newest_first, Listing, PageController};
use crate::content::ObjectQuery;
use crate::models::{value_of, ContentType, CosmicObject, NewsMetadata};
use crate::views::carousel::{self, Carousel, CarouselItem};
use crate::views::{badges, layout::document, layout::PageContext, page_header, short_date};
use crate::AppState;

/// Number of news items on the home page.
pub const HOME_NEWS_LIMIT: u32 = 5;

impl Listing for NewsMetadata {
    const NOUN: &'static str = "news";

    fn query() -> ObjectQuery {
        Self::list_query().limit(HOME_NEWS_LIMIT)
    }

    fn arrange(items: &mut [CosmicObject<Self>]) {
        sort_newest_first(items, |n| n.metadata.as_ref().and_then(|m| m.published()));
    }
}

/// `GET /?slide=`
pub async fn home_page(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let slide = params
        .get("slide")
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut controller = PageController::<NewsMetadata>::new();
    controller.load(state.content.as_ref()).await;

    Html(render_home(&ctx, &controller, slide).into_string())
}

pub fn render_home(ctx: &PageContext, controller: &PageController<NewsMetadata>, slide: usize) -> Markup {
    let items: Vec<_> = controller.items().iter().collect();
    let content = html! {
        (page_header("Welcome", "Everything about the development of Bugged Night is published here"))
        h2 class="section-title" { "Latest News" }
        (render_state(controller.state(), &items, "No news yet", |items| {
            let slides: Vec<CarouselItem> = items.iter().map(|n| news_slide(n)).collect();
            carousel::render(&slides, &Carousel::starting_at(slides.len(), slide), "No news yet")
        }))
    };
    document(ctx, "Home", content)
}

fn news_slide(news: &CosmicObject<NewsMetadata>) -> CarouselItem {
    let meta = news.metadata.as_ref();
    let date = meta.and_then(|m| short_date(m.publication_date.as_deref()));
    let author = meta.and_then(|m| m.author.clone());
    let caption = match (date, author) {
        (Some(date), Some(author)) => Some(format!("{} · {}", date, author)),
        (date, author) => date.or(author),
    };

    let badge = meta.and_then(|m| {
        badges::priority_badge(m.priority_key())
            .map(|(label, class)| (label.to_string(), class))
            .or_else(|| {
                value_of(&m.category)
                    .map(|category| (category.to_string(), badges::category_color(m.category_key())))
            })
    });

    CarouselItem {
        title: news.title.clone(),
        image: meta
            .and_then(|m| m.featured_image.as_ref())
            .and_then(|i| i.sized(1200, 600)),
        caption,
        badge,
        link: meta.and_then(|m| m.related_link.clone()),
    }
}
