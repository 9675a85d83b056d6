use crate::handlers::{item, session, swipe, ws};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/swipes", post(swipe::submit_swipe))
        .route("/matches/{session_id}/{user_id}", get(swipe::user_matches))
        .route("/sessions", post(session::create_session))
        .route("/sessions/{id}", get(session::get_session))
        .route("/sessions/{id}/complete", post(session::complete_session))
        .route("/sessions/{id}/swipes", get(session::session_swipes))
        .route("/sessions/{id}/matches", get(session::session_matches))
        .route("/items", get(item::list_items))
        .route("/items/{id}", get(item::get_item))
        .route("/ws", get(ws::ws_handler));

    Router::new()
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
