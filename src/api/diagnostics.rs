use axum::extract::State;

use super::{success, ApiResult};
use crate::diagnostics::LogEntry;
use crate::AppState;

/// `GET /api/diagnostics`: captured entries, oldest first.
pub async fn get_diagnostics(State(state): State<AppState>) -> ApiResult<Vec<LogEntry>> {
    success(state.diagnostics.snapshot())
}
