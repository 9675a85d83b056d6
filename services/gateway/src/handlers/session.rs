use crate::error::AppError;
use crate::extract::Json;
use crate::models::{AckResponse, CreateSessionRequest, EnrichedMatch, SwipesQuery};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use match_engine::Store;
use types::ids::SessionId;
use types::session::Session;
use types::swipe::SwipeEvent;

/// Get-or-create: the active session for the unordered pair + category.
/// Posting `(A, B)` and `(B, A)` yields the identical session.
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<Session>, AppError> {
    let session = state
        .store
        .get_or_create_session(
            &payload.user_id,
            &payload.partner_id,
            payload.category,
            payload.filters,
        )
        .await?;
    Ok(Json(session))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.store.session(&id).await?))
}

pub async fn complete_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<AckResponse>, AppError> {
    state.store.complete_session(&id).await?;
    Ok(Json(AckResponse { success: true }))
}

pub async fn session_swipes(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Query(query): Query<SwipesQuery>,
) -> Result<Json<Vec<SwipeEvent>>, AppError> {
    state.store.session(&id).await?;
    let swipes = state
        .store
        .swipes_for_session(&id, query.user_id.as_ref())
        .await?;
    Ok(Json(swipes))
}

/// Session matches joined with their catalog items for display.
pub async fn session_matches(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<Vec<EnrichedMatch>>, AppError> {
    state.store.session(&id).await?;
    let matches = state.store.matches_for_session(&id).await?;
    let enriched = matches
        .into_iter()
        .map(|m| {
            let food_item = state.store.item(&m.item_id).ok();
            EnrichedMatch {
                matched: m,
                food_item,
            }
        })
        .collect();
    Ok(Json(enriched))
}
