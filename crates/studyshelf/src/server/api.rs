//! JSON endpoints consumed by the page script: search and comments.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::comments::Comment;
use crate::search::SearchRecord;
use crate::server::error::ApiError;
use crate::server::ServerState;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    q: String,
}

/// GET /api/search?q=
///
/// First ten matching records in index order; empty query matches
/// nothing.
pub(crate) async fn search(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchRecord>> {
    let results = state
        .index
        .query(&params.q)
        .into_iter()
        .cloned()
        .collect();
    Json(results)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsParams {
    path: String,
}

/// GET /api/comments?path=
///
/// Comments for a unit path, ordered by creation time. An unconfigured
/// or unreachable store yields an empty list, never an error.
pub(crate) async fn list_comments(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<CommentsParams>,
) -> Json<Vec<Comment>> {
    let comments = match &state.comments {
        Some(store) => store.fetch(&params.path).await,
        None => Vec::new(),
    };
    Json(comments)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostCommentRequest {
    path: String,
    content: String,
    author_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostCommentResponse {
    status: String,
}

/// POST /api/comments
///
/// Inserts one comment keyed by the unit path. Content passes through to
/// the store unvalidated beyond a blank check.
pub(crate) async fn post_comment(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<PostCommentRequest>,
) -> Result<Json<PostCommentResponse>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::bad_request("comment content must not be empty"));
    }
    let store = state
        .comments
        .as_ref()
        .ok_or_else(|| ApiError::unavailable("comment store not configured"))?;
    store
        .insert(&payload.path, &payload.content, payload.author_name.as_deref())
        .await
        .map_err(|error| ApiError::unavailable(error.to_string()))?;
    Ok(Json(PostCommentResponse {
        status: "ok".to_string(),
    }))
}
