//! Comment endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{success, ApiResponse, ApiResult};
use crate::errors::AppError;
use crate::models::{CommentMetadata, CommentRequest, CosmicObject};
use crate::pages::{PageController, PageState};
use crate::submission::{Submission, SubmissionFlow};
use crate::AppState;

/// `GET /api/comments`: newest first.
pub async fn list_comments(
    State(state): State<AppState>,
) -> ApiResult<Vec<CosmicObject<CommentMetadata>>> {
    let mut controller = PageController::<CommentMetadata>::new();
    controller.load(state.content.as_ref()).await;

    match controller.into_state() {
        PageState::Ready(comments) => success(comments),
        PageState::Error(message) => Err(AppError::BackendFailure(message)),
        PageState::Loading => Err(AppError::Internal("Comment fetch did not complete".to_string())),
    }
}

/// `POST /api/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    Json(request): Json<CommentRequest>,
) -> Response {
    let Some(_in_flight) = state.submissions.acquire(request.submission_id()) else {
        return AppError::BadRequest("This comment is already being posted".to_string())
            .into_response();
    };

    let mut flow = SubmissionFlow::new();
    match flow.submit(state.content.as_ref(), &request).await {
        Ok(created) => (StatusCode::CREATED, Json(ApiResponse::new(created))).into_response(),
        Err(err) => err.into_response(),
    }
}
