//! Document shell, footer, the "Built with Cosmic" badge and static assets.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Datelike, Utc};
use maud::{html, Markup, DOCTYPE};

use crate::views::navigation;
use crate::AppState;

/// Cookie recording that the visitor closed the badge.
pub const BADGE_COOKIE: &str = "cosmic-badge-dismissed";

const SITE_CSS: &str = include_str!("../../static/site.css");
const SITE_JS: &str = include_str!("../../static/site.js");
const CONSOLE_CAPTURE_JS: &str = include_str!("../../static/console-capture.js");

const COSMIC_LOGO: &str =
    "https://cdn.cosmicjs.com/b67de7d0-c810-11ed-b01d-23d7b265c299-logo508x500.svg";

/// Per-request facts every page needs to render its chrome.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub path: String,
    pub badge_dismissed: bool,
    pub bucket_slug: String,
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            path: parts.uri.path().to_string(),
            badge_dismissed: badge_dismissed(&parts.headers),
            bucket_slug: state.config.bucket_slug_or_placeholder().to_string(),
        })
    }
}

fn badge_dismissed(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == BADGE_COOKIE && value == "true")
}

/// Full HTML document.
pub fn document(ctx: &PageContext, title: &str, content: Markup) -> Markup {
    shell(ctx, title, None, content)
}

/// Full HTML document that navigates to `target` after `seconds`.
pub fn document_with_refresh(
    ctx: &PageContext,
    title: &str,
    seconds: u64,
    target: &str,
    content: Markup,
) -> Markup {
    let refresh = format!("{};url={}", seconds, target);
    shell(ctx, title, Some(refresh), content)
}

fn shell(ctx: &PageContext, title: &str, refresh: Option<String>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if let Some(refresh) = refresh {
                    meta http-equiv="refresh" content=(refresh);
                }
                title { (title) " | Bugged Night" }
                link rel="stylesheet" href="/static/site.css";
                script src="/static/console-capture.js" {}
                script src="/static/site.js" defer {}
            }
            body {
                (navigation::render(&ctx.path))
                main class="container" { (content) }
                (footer())
                @if !ctx.badge_dismissed {
                    (badge(&ctx.bucket_slug))
                }
            }
        }
    }
}

pub fn footer() -> Markup {
    html! {
        footer class="site-footer" {
            div class="container footer-grid" {
                div {
                    h2 class="gradient-text" { "Bugged Night" }
                    p class="text-muted" {
                        "A multiplayer survival game in development. "
                        "Live the tension between assassins and survivors across dynamic maps and competitive play."
                    }
                }
                ul class="footer-links" {
                    @for link in navigation::LINKS {
                        li { a href=(link.path) { (link.label) } }
                    }
                }
                div {
                    h3 class="eyebrow" { "Community" }
                    div class="social" {
                        a href="https://discord.gg/bugged-night" target="_blank" rel="noreferrer" { "Discord" }
                        a href="https://twitter.com/bugged-night" target="_blank" rel="noreferrer" { "Twitter" }
                        a href="https://github.com/bugged-night" target="_blank" rel="noreferrer" { "GitHub" }
                    }
                    p class="text-muted small" { "contact@buggednight.dev" }
                }
            }
            p class="copyright" { "© " (Utc::now().year()) " Bugged Night. All rights reserved." }
        }
    }
}

fn badge(bucket_slug: &str) -> Markup {
    let href = format!(
        "https://www.cosmicjs.com?utm_source=bucket_{}&utm_medium=referral&utm_campaign=app_badge&utm_content=built_with_cosmic",
        bucket_slug
    );
    html! {
        div class="cosmic-badge" {
            a href=(href) target="_blank" rel="noopener noreferrer" {
                img src=(COSMIC_LOGO) alt="Cosmic Logo" width="20" height="20";
                "Built with Cosmic"
            }
            form method="post" action="/badge/dismiss" {
                button type="submit" class="badge-close" aria-label="Dismiss badge" { "×" }
            }
        }
    }
}

/// `POST /badge/dismiss`: remember the dismissal and go back where the visitor was.
pub async fn dismiss_badge(headers: HeaderMap) -> Response {
    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(local_path)
        .unwrap_or_else(|| "/".to_string());

    let cookie = format!("{}=true; Path=/; Max-Age=31536000; SameSite=Lax", BADGE_COOKIE);
    let mut response = Redirect::to(&target).into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Path and query of a referer, so redirects never leave the site.
fn local_path(referer: &str) -> Option<String> {
    let path = if referer.starts_with('/') {
        referer
    } else {
        let (_, rest) = referer.split_once("://")?;
        rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
    };

    // Browsers read `//host` and `/\host` as another origin
    match path.as_bytes().get(1) {
        Some(b'/') | Some(b'\\') => None,
        _ => Some(path.to_string()),
    }
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], SITE_CSS)
}

pub async fn site_script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], SITE_JS)
}

pub async fn console_capture_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        CONSOLE_CAPTURE_JS,
    )
}
