//! Top navigation with exact-match active highlighting.

use maud::{html, Markup};

/// A navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
}

/// Every routed page, in menu order.
pub const LINKS: &[NavLink] = &[
    NavLink { path: "/", label: "Home" },
    NavLink { path: "/characters", label: "Characters" },
    NavLink { path: "/rankings", label: "Rankings" },
    NavLink { path: "/tournaments", label: "Tournaments" },
    NavLink { path: "/patch-notes", label: "Patch Notes" },
    NavLink { path: "/maps", label: "Maps" },
    NavLink { path: "/contactform", label: "Contact" },
    NavLink { path: "/faqs", label: "FAQs" },
];

/// A link is active only when its route equals the current path exactly.
pub fn is_active(link: &NavLink, current_path: &str) -> bool {
    link.path == current_path
}

/// The link to highlight for `current_path`, if any.
pub fn active_link(current_path: &str) -> Option<&'static NavLink> {
    LINKS.iter().find(|link| is_active(link, current_path))
}

pub fn render(current_path: &str) -> Markup {
    let active = active_link(current_path);
    html! {
        nav class="site-nav" {
            div class="container nav-inner" {
                a class="brand gradient-text" href="/" { "Bugged Night" }
                details class="nav-menu" {
                    summary aria-label="Menu" { "☰" }
                    ul {
                        @for link in LINKS {
                            li {
                                @if active == Some(link) {
                                    a class="nav-link active" href=(link.path) aria-current="page" {
                                        (link.label)
                                    }
                                } @else {
                                    a class="nav-link" href=(link.path) { (link.label) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
