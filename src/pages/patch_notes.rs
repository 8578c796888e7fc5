use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use maud::{html, Markup};

use super::{render_state, sort_newest_first, Listing, PageController, PageState};
use crate::errors::AppError;
use crate::models::{value_of, CommentMetadata, CommentRequest, CosmicObject, PatchNoteMetadata};
use crate::submission::{new_submission_id, Submission, SubmissionFlow};
use crate::views::components::{self, CommentForm};
use crate::views::{badges, layout::document, layout::PageContext, long_date, page_header, rich_text};
use crate::AppState;

impl Listing for PatchNoteMetadata {
    const NOUN: &'static str = "patch notes";

    fn arrange(items: &mut [CosmicObject<Self>]) {
        sort_newest_first(items, |p| p.metadata.as_ref().and_then(|m| m.released()));
    }
}

impl Listing for CommentMetadata {
    const NOUN: &'static str = "comments";

    fn arrange(items: &mut [CosmicObject<Self>]) {
        sort_newest_first(items, |c| c.created());
    }
}

/// `GET /patch-notes`
pub async fn patch_notes_page(State(state): State<AppState>, ctx: PageContext) -> Html<String> {
    let form = CommentForm {
        submission_id: new_submission_id(),
        ..Default::default()
    };
    Html(load_and_render(&state, &ctx, &form).await.into_string())
}

/// `POST /patch-notes/comments`
pub async fn post_comment(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(request): Form<CommentRequest>,
) -> Response {
    let Some(_in_flight) = state.submissions.acquire(request.submission_id()) else {
        let form = echo_form(&request, "This comment is already being posted.".to_string());
        return Html(load_and_render(&state, &ctx, &form).await.into_string()).into_response();
    };

    let mut flow = SubmissionFlow::new();
    match flow.submit(state.content.as_ref(), &request).await {
        Ok(_) => Redirect::to("/patch-notes#comments").into_response(),
        Err(err) => {
            let message = match err {
                AppError::Validation(message) => message,
                _ => "Failed to post your comment. Please try again.".to_string(),
            };
            let form = echo_form(&request, message);
            Html(load_and_render(&state, &ctx, &form).await.into_string()).into_response()
        }
    }
}

fn echo_form(request: &CommentRequest, error: String) -> CommentForm<'_> {
    CommentForm {
        name: &request.name,
        email: &request.email,
        comment: &request.comment,
        submission_id: new_submission_id(),
        error: Some(error),
    }
}

async fn load_and_render(state: &AppState, ctx: &PageContext, form: &CommentForm<'_>) -> Markup {
    let mut patches = PageController::<PatchNoteMetadata>::new();
    let mut comments = PageController::<CommentMetadata>::new();
    let client = state.content.as_ref();
    tokio::join!(patches.load(client), comments.load(client));

    render_patch_notes(ctx, &patches, &comments, form)
}

pub fn render_patch_notes(
    ctx: &PageContext,
    patches: &PageController<PatchNoteMetadata>,
    comments: &PageController<CommentMetadata>,
    form: &CommentForm<'_>,
) -> Markup {
    let items: Vec<_> = patches.items().iter().collect();
    let comment_items = match comments.state() {
        PageState::Error(message) => Err(message.as_str()),
        _ => Ok(comments.items()),
    };

    let content = html! {
        (page_header("Patch Notes", "Latest game updates"))
        (render_state(patches.state(), &items, "No patch notes available", |items| html! {
            div class="timeline stack" {
                @let fallback = PatchNoteMetadata::default();
                @for patch in items {
                    (patch_card(patch, patch.metadata.as_ref().unwrap_or(&fallback)))
                }
            }
        }))
        (components::comments(comment_items, form))
    };
    document(ctx, "Patch Notes", content)
}

fn patch_card(patch: &CosmicObject<PatchNoteMetadata>, meta: &PatchNoteMetadata) -> Markup {
    html! {
        article class="card fade-in" {
            div class="card-head" {
                div {
                    h3 { (patch.title) }
                    @if let Some(date) = long_date(meta.release_date.as_deref()) {
                        p class="text-muted small" { (date) }
                    }
                }
                div {
                    span class={ "pill " (badges::patch_type_color(meta.patch_type_key())) } {
                        (value_of(&meta.patch_type).unwrap_or("N/A"))
                    }
                    @if let Some(size) = meta.download_size.as_deref() {
                        " " span class="text-muted small" { (size) }
                    }
                }
            }
            (rich_text(meta.content.as_deref()))
            @if !meta.balance_changes.is_empty() {
                h4 class="text-secondary" { "Balance Changes" }
                @for change in &meta.balance_changes {
                    div class="change" {
                        strong class="text-secondary" { (change.character.as_deref().unwrap_or("General")) }
                        @if let Some(description) = change.description.as_deref() {
                            p { (description) }
                        }
                    }
                }
            }
            @if !meta.bug_fixes.is_empty() {
                h4 class="text-yellow" { "Bug Fixes" }
                ul {
                    @for fix in &meta.bug_fixes {
                        li { (fix) }
                    }
                }
            }
            @if !meta.new_features.is_empty() {
                h4 class="text-accent" { "New Features" }
                @for feature in &meta.new_features {
                    div class="change" {
                        strong class="text-accent" { (feature.name.as_deref().unwrap_or("New feature")) }
                        @if let Some(description) = feature.description.as_deref() {
                            p { (description) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentError;
    use serde_json::json;

    fn loaded<T: Listing>(objects: serde_json::Value) -> PageController<T> {
        let items = serde_json::from_value(objects).unwrap();
        let mut controller = PageController::new();
        let ticket = controller.begin_fetch();
        controller.complete(ticket, Ok(items));
        controller
    }

    #[test]
    fn test_patches_newest_first() {
        let patches: PageController<PatchNoteMetadata> = loaded(json!([
            { "id": "1.0", "metadata": { "release_date": "2024-01-10" } },
            { "id": "1.2", "metadata": { "release_date": "2024-06-01" } },
            { "id": "beta", "metadata": { "release_date": "" } },
            { "id": "1.1", "metadata": { "release_date": "2024-03-15" } }
        ]));
        let ids: Vec<_> = patches.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1.2", "1.1", "1.0", "beta"]);
    }

    #[test]
    fn test_comments_newest_first() {
        let comments: PageController<CommentMetadata> = loaded(json!([
            { "id": "a", "title": "Ana", "created_at": "2024-05-01T10:00:00.000Z" },
            { "id": "b", "title": "Ben", "created_at": "2024-05-03T08:00:00.000Z" }
        ]));
        assert_eq!(comments.items()[0].id, "b");
    }

    #[test]
    fn test_comment_failure_does_not_hide_patches() {
        let patches: PageController<PatchNoteMetadata> = loaded(json!([
            { "id": "1", "title": "Patch 1.4", "metadata": { "bug_fixes": ["Fixed door clipping", 7] } }
        ]));
        let mut comments = PageController::<CommentMetadata>::new();
        let ticket = comments.begin_fetch();
        comments.complete(ticket, Err(ContentError::Backend { status: 500, message: "boom".to_string() }));

        let html = render_patch_notes(&PageContext::default(), &patches, &comments, &CommentForm::default())
            .into_string();
        assert!(html.contains("Patch 1.4"));
        assert!(html.contains("Fixed door clipping"));
        assert!(html.contains("Failed to load comments"));
    }

    #[test]
    fn test_not_found_renders_empty_state() {
        let mut patches = PageController::<PatchNoteMetadata>::new();
        let ticket = patches.begin_fetch();
        patches.complete(ticket, Err(ContentError::NotFound));
        let comments: PageController<CommentMetadata> = loaded(json!([]));

        let html = render_patch_notes(&PageContext::default(), &patches, &comments, &CommentForm::default())
            .into_string();
        assert!(html.contains("No patch notes available"));
        assert!(!html.contains(r#"role="alert""#));
    }

    #[test]
    fn test_patch_without_metadata_still_gets_a_card() {
        let patches: PageController<PatchNoteMetadata> =
            loaded(json!([{ "id": "x", "title": "Hotfix 0.9" }]));
        let comments: PageController<CommentMetadata> = loaded(json!([]));

        let html = render_patch_notes(&PageContext::default(), &patches, &comments, &CommentForm::default())
            .into_string();
        assert!(html.contains("<h3>Hotfix 0.9</h3>"));
        assert!(html.contains("N/A"));
        assert!(!html.contains("No patch notes available"));
    }
}
