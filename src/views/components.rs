//! Small presentational pieces shared across pages.

use maud::{html, Markup};

use crate::models::{CommentMetadata, CosmicObject};
use crate::views::timestamp;

pub fn loading(noun: &str) -> Markup {
    html! {
        div class="status-block" aria-busy="true" {
            div class="spinner" {}
            p class="text-muted" { "Loading " (noun) "..." }
        }
    }
}

pub fn error_message(message: &str) -> Markup {
    html! {
        div class="status-block" {
            div class="card card-error" role="alert" {
                h3 { "Error" }
                p { (message) }
            }
        }
    }
}

pub fn empty_state(message: &str) -> Markup {
    html! {
        p class="empty-state" { (message) }
    }
}

/// Inline banner above a form.
pub fn banner(kind: BannerKind, message: &str) -> Markup {
    let class = match kind {
        BannerKind::Success => "banner banner-success",
        BannerKind::Error => "banner banner-error",
    };
    html! {
        div class=(class) role="status" { (message) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Kind of control wrapped by [`animated_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    TextArea { rows: u8 },
}

/// A labelled form control. The focus glow is pure CSS (`:focus-within`).
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub kind: FieldKind,
    pub value: &'a str,
    pub required: bool,
    pub placeholder: &'a str,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, label: &'a str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            value: "",
            required: false,
            placeholder: "",
        }
    }

    pub fn value(mut self, value: &'a str) -> Self {
        self.value = value;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

pub fn animated_field(field: Field<'_>) -> Markup {
    let id = format!("field-{}", field.name);
    html! {
        div class="field fade-in" {
            label for=(id) {
                (field.label)
                @if field.required {
                    span class="required" aria-hidden="true" { " *" }
                }
            }
            div class="field-glow" {
                @match field.kind {
                    FieldKind::TextArea { rows } => {
                        textarea id=(id) name=(field.name) rows=(rows)
                            placeholder=(field.placeholder) required[field.required] {
                            (field.value)
                        }
                    }
                    FieldKind::Text | FieldKind::Email => {
                        @let input_type = if field.kind == FieldKind::Email { "email" } else { "text" };
                        input id=(id) type=(input_type) name=(field.name) value=(field.value)
                            placeholder=(field.placeholder) required[field.required];
                    }
                }
            }
        }
    }
}

/// Submit button; `site.js` disables it once the form is sent.
pub fn submit_button(label: &str, busy_label: &str) -> Markup {
    html! {
        button class="btn btn-primary" type="submit" data-busy-label=(busy_label) { (label) }
    }
}

/// Values echoed back into the comment form after a failed post.
#[derive(Debug, Clone, Default)]
pub struct CommentForm<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub comment: &'a str,
    pub submission_id: String,
    pub error: Option<String>,
}

/// Comment list plus the form that posts to `/patch-notes/comments`.
pub fn comments(items: Result<&[CosmicObject<CommentMetadata>], &str>, form: &CommentForm<'_>) -> Markup {
    html! {
        section id="comments" class="comments card" {
            h2 { "Community Comments" }
            form class="comment-form" method="post" action="/patch-notes/comments" data-submit-once {
                input type="hidden" name="submission_id" value=(form.submission_id);
                @if let Some(error) = &form.error {
                    (banner(BannerKind::Error, error))
                }
                div class="grid-2" {
                    (animated_field(Field::new("name", "Name", FieldKind::Text).value(form.name).required()))
                    (animated_field(Field::new("email", "Email", FieldKind::Email).value(form.email).required()))
                }
                (animated_field(
                    Field::new("comment", "Comment", FieldKind::TextArea { rows: 4 })
                        .value(form.comment)
                        .placeholder("Share your thoughts on this patch")
                        .required()
                ))
                (submit_button("Post comment", "Posting..."))
            }
            @match items {
                Err(message) => (error_message(message)),
                Ok([]) => (empty_state("No comments yet. Be the first!")),
                Ok(items) => {
                    ul class="comment-list" {
                        @for comment in items {
                            li class="comment" {
                                div class="comment-head" {
                                    strong { (comment.title) }
                                    @if let Some(when) = timestamp(comment.created()) {
                                        time class="text-muted" { (when) }
                                    }
                                }
                                @if let Some(text) = comment.metadata.as_ref().and_then(|m| m.comment.as_deref()) {
                                    p { (text) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Row of filter links, one per option plus "All".
pub fn filter_bar<'a>(
    param: &str,
    options: impl IntoIterator<Item = (&'a str, &'a str)>,
    active: Option<&str>,
) -> Markup {
    html! {
        nav class="filter-bar" aria-label="Filter" {
            a class=(if active.is_none() { "chip active" } else { "chip" }) href="?" { "All" }
            @for (key, label) in options {
                @let class = if active == Some(key) { "chip active" } else { "chip" };
                a class=(class) href={ "?" (param) "=" (key) } { (label) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_is_marked() {
        let html = animated_field(Field::new("email", "Email", FieldKind::Email).required()).into_string();
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains("required"));
        assert!(html.contains(r#"<label for="field-email">"#));
    }

    #[test]
    fn test_textarea_keeps_value_escaped() {
        let html = animated_field(
            Field::new("message", "Message", FieldKind::TextArea { rows: 5 }).value("<b>hi</b>"),
        )
        .into_string();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(!html.contains("required"));
    }

    #[test]
    fn test_filter_bar_highlights_active() {
        let html = filter_bar("role", [("hunter", "Hunter"), ("survivor", "Survivor")], Some("hunter"))
            .into_string();
        assert!(html.contains(r#"<a class="chip active" href="?role=hunter">Hunter</a>"#));
        assert!(html.contains(r#"<a class="chip" href="?">All</a>"#));
    }

    #[test]
    fn test_comments_empty_and_error() {
        let form = CommentForm::default();
        assert!(comments(Ok(&[]), &form).into_string().contains("No comments yet"));
        assert!(comments(Err("Failed to load comments"), &form)
            .into_string()
            .contains("Failed to load comments"));
    }
}
