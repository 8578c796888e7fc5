//! Single-slide carousel.
//!
//! The server renders every slide and marks the current one active; pagination
//! dots are plain links (`?slide=N`) so the carousel works without script.
//! `site.js` advances it every [`AUTOPLAY_INTERVAL`] using the same wrap-around
//! rule as [`Carousel::next`].

use std::time::Duration;

use maud::{html, Markup};

/// Delay between automatic slide advances.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

/// One slide.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CarouselItem {
    pub title: String,
    pub image: Option<String>,
    pub caption: Option<String>,
    pub badge: Option<(String, &'static str)>,
    pub link: Option<String>,
}

/// Slide position with infinite looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    /// Start at `index`, wrapped into range.
    pub fn starting_at(len: usize, index: usize) -> Self {
        let mut carousel = Self::new(len);
        carousel.go_to(index);
        carousel
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Advance one slide; the last wraps to the first.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
        self.current
    }

    /// Go back one slide; the first wraps to the last.
    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.current = (self.current + self.len - 1) % self.len;
        }
        self.current
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        if self.len > 0 {
            self.current = index % self.len;
        }
        self.current
    }

    fn next_index(&self) -> usize {
        let mut copy = *self;
        copy.next()
    }

    fn prev_index(&self) -> usize {
        let mut copy = *self;
        copy.prev()
    }
}

pub fn render(items: &[CarouselItem], carousel: &Carousel, empty_message: &str) -> Markup {
    if items.is_empty() {
        return html! { p class="empty-state" { (empty_message) } };
    }

    let interval_ms = AUTOPLAY_INTERVAL.as_millis().to_string();

    html! {
        div class="carousel" data-carousel data-interval=(interval_ms) {
            div class="carousel-track" {
                @for (index, item) in items.iter().enumerate() {
                    @let class = if index == carousel.current() { "slide active" } else { "slide" };
                    div class=(class) data-slide=(index) {
                        @if let Some(image) = &item.image {
                            img src=(image) alt=(item.title) loading="lazy";
                        } @else {
                            div class="slide-placeholder" {}
                        }
                        div class="slide-caption" {
                            @if let Some((label, class)) = &item.badge {
                                span class={ "pill " (class) } { (label) }
                            }
                            @if let Some(link) = &item.link {
                                a href=(link) target="_blank" rel="noopener noreferrer" { h3 { (item.title) } }
                            } @else {
                                h3 { (item.title) }
                            }
                            @if let Some(caption) = &item.caption {
                                p { (caption) }
                            }
                        }
                    }
                }
            }
            @if carousel.len() > 1 {
                a class="carousel-arrow prev" href={ "?slide=" (carousel.prev_index()) } aria-label="Previous" { "‹" }
                a class="carousel-arrow next" href={ "?slide=" (carousel.next_index()) } aria-label="Next" { "›" }
                div class="carousel-dots" {
                    @for index in 0..carousel.len() {
                        @let class = if index == carousel.current() { "dot active" } else { "dot" };
                        a class=(class) href={ "?slide=" (index) } data-dot=(index) aria-label={ "Slide " (index + 1) } {}
                    }
                }
            }
        }
    }
}
