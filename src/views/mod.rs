//! HTML rendering.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! every interpolated value is escaped unless explicitly marked otherwise.
//! Only CMS-authored rich text (`content` fields) is emitted unescaped.

pub mod badges;
pub mod carousel;
pub mod components;
pub mod layout;
pub mod navigation;

use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped};

use crate::models::parse_date;

/// Format a bucket date like `Mar 05, 2024`. Unparsable input yields `None`.
pub fn short_date(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_date).map(|d| d.format("%b %d, %Y").to_string())
}

/// Format a bucket date like `March 05, 2024`.
pub fn long_date(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_date).map(|d| d.format("%B %d, %Y").to_string())
}

/// Relative-free timestamp for comments.
pub fn timestamp(date: Option<DateTime<Utc>>) -> Option<String> {
    date.map(|d| d.format("%b %d, %Y %H:%M").to_string())
}

/// `1234567` → `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rich text authored in the CMS.
pub fn rich_text(content: Option<&str>) -> Markup {
    html! {
        @if let Some(content) = content.filter(|c| !c.trim().is_empty()) {
            div class="rich-text" { (PreEscaped(content)) }
        }
    }
}

/// Page heading block shared by every route.
pub fn page_header(title: &str, subtitle: &str) -> Markup {
    html! {
        header class="page-header" {
            h1 class="gradient-text" { (title) }
            p class="subtitle" { (subtitle) }
        }
    }
}
