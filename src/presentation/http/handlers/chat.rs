//! Department Chat History Handler

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::application::dto::request::ChatHistoryParams;
use crate::application::dto::response::ChatMessageResponse;
use crate::application::services::ChatService;
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Page of department messages in chronological order
pub async fn get_messages(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
    Query(params): Query<ChatHistoryParams>,
) -> Result<Json<Vec<ChatMessageResponse>>, AppError> {
    let department_id = parse_id(&department_id, "department")?;
    let before = params
        .before
        .as_deref()
        .map(|raw| parse_id(raw, "message"))
        .transpose()?;

    let messages = state
        .chat_service()
        .history(department_id, before, params.limit)
        .await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
