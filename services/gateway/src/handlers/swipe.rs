use crate::error::AppError;
use crate::extract::Json;
use crate::models::{MatchListResponse, ServerEvent, SwipeRequest, SwipeResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use match_engine::Store;
use types::ids::{SessionId, UserId};
use types::matches::Match;
use types::swipe::SwipeEvent;

pub async fn submit_swipe(
    State(state): State<AppState>,
    Json(payload): Json<SwipeRequest>,
) -> Result<Json<SwipeResponse>, AppError> {
    let swipe = SwipeEvent::new(
        payload.session_id,
        payload.user_id,
        payload.item_id,
        payload.liked,
    );

    // Validate → record → evaluate quorum. Validation and unknown-session
    // errors surface here; nothing past this point can fail the swipe.
    let matched = state.engine.submit_swipe(&swipe).await?;

    if let Some(m) = &matched {
        notify_match(&state, m).await;
    }

    Ok(Json(SwipeResponse {
        success: true,
        matched: matched.is_some(),
    }))
}

/// Push the match to every session participant, so the partner who is not
/// mid-request learns of it too. Best-effort: delivery failures are
/// logged and swallowed, never surfaced to the swiping user.
pub async fn notify_match(state: &AppState, m: &Match) {
    let event = ServerEvent::MatchFound {
        item_id: m.item_id.clone(),
        participant_ids: m.participants.clone(),
    };
    match state.store.session(&m.session_id).await {
        Ok(session) => {
            let reached = state.presence.fan_out(session.participants.iter(), &event);
            tracing::debug!(
                match_id = %m.id,
                reached,
                total = session.participants.len(),
                "match notification fan-out"
            );
        }
        Err(err) => {
            tracing::warn!(match_id = %m.id, error = %err, "match fan-out skipped");
        }
    }
}

pub async fn user_matches(
    State(state): State<AppState>,
    Path((session_id, user_id)): Path<(SessionId, UserId)>,
) -> Result<Json<MatchListResponse>, AppError> {
    // Unknown sessions are a 404, not an empty listing.
    state.store.session(&session_id).await?;

    let matches = state.store.matches_for_user(&session_id, &user_id).await?;
    Ok(Json(MatchListResponse {
        item_ids: matches.into_iter().map(|m| m.item_id).collect(),
    }))
}
