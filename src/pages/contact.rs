use axum::{extract::State, response::Html, Form};
use maud::{html, Markup};

use crate::errors::AppError;
use crate::models::ContactRequest;
use crate::submission::{
    new_submission_id, Submission, SubmissionFlow, SubmissionState, RESET_DELAY_SECS,
};
use crate::views::components::{
    animated_field, banner, submit_button, BannerKind, Field, FieldKind,
};
use crate::views::layout::{document, document_with_refresh, PageContext};
use crate::views::page_header;
use crate::AppState;

const GENERIC_ERROR: &str =
    "Something went wrong. Make sure every field is filled in correctly and try again.";

/// What the contact page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactView {
    /// An empty or re-filled form, optionally with an error banner.
    Form {
        values: ContactRequest,
        error: Option<String>,
    },
    Sent,
}

impl ContactView {
    pub fn blank() -> Self {
        ContactView::Form {
            values: ContactRequest {
                submission_id: Some(new_submission_id()),
                ..Default::default()
            },
            error: None,
        }
    }

    fn refill(mut values: ContactRequest, error: String) -> Self {
        values.submission_id = Some(new_submission_id());
        ContactView::Form {
            values,
            error: Some(error),
        }
    }
}

/// `GET /contactform`
pub async fn contact_page(ctx: PageContext) -> Html<String> {
    Html(render_contact(&ctx, &ContactView::blank()).into_string())
}

/// `POST /contactform`
pub async fn submit_contact(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(request): Form<ContactRequest>,
) -> Html<String> {
    let Some(_in_flight) = state.submissions.acquire(request.submission_id()) else {
        let view = ContactView::refill(request, "Your message is already being sent.".to_string());
        return Html(render_contact(&ctx, &view).into_string());
    };

    let mut flow = SubmissionFlow::new();
    // The outcome is read back from the flow state below
    let _ = flow.submit(state.content.as_ref(), &request).await;
    let view = match flow.state() {
        SubmissionState::Success => ContactView::Sent,
        SubmissionState::Failed(AppError::Validation(_)) => {
            ContactView::refill(request, GENERIC_ERROR.to_string())
        }
        _ => ContactView::refill(
            request,
            "We could not send your message. Please try again.".to_string(),
        ),
    };

    Html(render_contact(&ctx, &view).into_string())
}

pub fn render_contact(ctx: &PageContext, view: &ContactView) -> Markup {
    match view {
        ContactView::Sent => {
            let content = html! {
                (page_header("Contact", "Questions, feedback or partnerships"))
                div class="card narrow" {
                    (banner(BannerKind::Success, "Message sent successfully"))
                }
            };
            document_with_refresh(ctx, "Contact", RESET_DELAY_SECS, "/contactform", content)
        }
        ContactView::Form { values, error } => {
            let content = html! {
                (page_header("Contact", "Questions, feedback or partnerships"))
                (contact_form(values, error.as_deref()))
            };
            document(ctx, "Contact", content)
        }
    }
}

fn contact_form(values: &ContactRequest, error: Option<&str>) -> Markup {
    html! {
        section class="card narrow fade-in" {
            h2 { "Contact us" }
            @if let Some(error) = error {
                (banner(BannerKind::Error, error))
            }
            form method="post" action="/contactform" data-submit-once {
                input type="hidden" name="submission_id" value=(values.submission_id.as_deref().unwrap_or_default());
                (animated_field(Field::new("name", "Your full name", FieldKind::Text).value(&values.name).placeholder("Name").required()))
                (animated_field(Field::new("email", "Your email", FieldKind::Email).value(&values.email).placeholder("Email").required()))
                (animated_field(Field::new("company", "Company", FieldKind::Text).value(&values.company).placeholder("Company")))
                (animated_field(Field::new("message", "Message", FieldKind::TextArea { rows: 6 }).value(&values.message).placeholder("Message").required()))
                (submit_button("Send message", "Sending..."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form_has_fresh_submission_id() {
        let (ContactView::Form { values: a, .. }, ContactView::Form { values: b, .. }) =
            (ContactView::blank(), ContactView::blank())
        else {
            panic!("expected forms");
        };
        assert!(a.submission_id.is_some());
        assert_ne!(a.submission_id, b.submission_id);
    }

    #[test]
    fn test_sent_view_refreshes_back_to_form() {
        let html = render_contact(&PageContext::default(), &ContactView::Sent).into_string();
        assert!(html.contains("Message sent successfully"));
        assert!(html.contains(r#"content="3;url=/contactform""#));
        assert!(!html.contains("<form method=\"post\" action=\"/contactform\""));
    }

    #[test]
    fn test_refill_keeps_values_and_shows_error() {
        let view = ContactView::refill(
            ContactRequest {
                name: "Ana".to_string(),
                message: "Hello <there>".to_string(),
                ..Default::default()
            },
            GENERIC_ERROR.to_string(),
        );
        let html = render_contact(&PageContext::default(), &view).into_string();
        assert!(html.contains(r#"value="Ana""#));
        assert!(html.contains("Hello &lt;there&gt;"));
        assert!(html.contains("banner-error"));
    }
}
