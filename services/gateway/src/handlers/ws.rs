//! WebSocket push channel
//!
//! Per-connection state machine: Disconnected → Connected (on join) →
//! Disconnected (on close or error). No reconnection logic lives here;
//! a dropped transport requires an explicit rejoin.

use crate::handlers::swipe::notify_match;
use crate::models::{ClientMessage, ServerEvent};
use crate::state::AppState;
use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use match_engine::Store;
use tokio::sync::mpsc;
use types::ids::{SessionId, UserId};
use types::swipe::SwipeEvent;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();

    // Writer task drains the presence endpoint into the socket. The
    // channel is the delivery endpoint the presence registry hands out.
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let Ok(text) = serde_json::to_string(&event) else {
                continue;
            };
            if sink.send(Message::Text(Utf8Bytes::from(text))).await.is_err() {
                break;
            }
        }
    });

    let mut joined: Option<(UserId, SessionId)> = None;

    while let Some(msg) = stream.next().await {
        let Ok(msg) = msg else { break };
        match msg {
            Message::Text(text) => {
                let Ok(client_msg) = serde_json::from_str::<ClientMessage>(text.as_str()) else {
                    tracing::debug!("ignoring malformed client message");
                    continue;
                };
                match client_msg {
                    ClientMessage::Join {
                        user_id,
                        session_id,
                    } => {
                        if let Some(identity) =
                            handle_join(&state, user_id, session_id, tx.clone()).await
                        {
                            joined = Some(identity);
                        }
                    }
                    ClientMessage::Swipe { item_id, liked } => {
                        let Some((user_id, session_id)) = &joined else {
                            tracing::debug!("swipe before join ignored");
                            continue;
                        };
                        let swipe = SwipeEvent::new(
                            session_id.clone(),
                            user_id.clone(),
                            item_id,
                            liked,
                        );
                        handle_swipe(&state, swipe).await;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    // Disconnected: tear down presence and tell the partner, unless a
    // newer connection already replaced this endpoint.
    if let Some((user_id, session_id)) = joined {
        if state.presence.unregister_endpoint(&user_id, &tx).is_some() {
            if let Ok(session) = state.store.session(&session_id).await {
                for partner in session.partners_of(&user_id) {
                    state.presence.deliver(
                        partner,
                        ServerEvent::PartnerOffline {
                            user_id: user_id.clone(),
                        },
                    );
                }
            }
        }
    }
    writer.abort();
}

/// Register presence for a session participant and announce them to the
/// partner. Returns the connection identity on success.
async fn handle_join(
    state: &AppState,
    user_id: UserId,
    session_id: SessionId,
    tx: mpsc::UnboundedSender<ServerEvent>,
) -> Option<(UserId, SessionId)> {
    let session = match state.store.session(&session_id).await {
        Ok(session) => session,
        Err(err) => {
            tracing::debug!(error = %err, "join for unknown session ignored");
            return None;
        }
    };
    if !session.is_participant(&user_id) {
        tracing::debug!(%user_id, %session_id, "join from non-participant ignored");
        return None;
    }

    state
        .presence
        .register(user_id.clone(), session_id.clone(), tx);
    tracing::info!(%user_id, %session_id, "participant joined push channel");

    for partner in session.partners_of(&user_id) {
        state.presence.deliver(
            partner,
            ServerEvent::PartnerOnline {
                user_id: user_id.clone(),
            },
        );
    }
    Some((user_id, session_id))
}

/// Run the swipe pipeline for a channel-delivered swipe. Same ledger as
/// the HTTP path, so a duplicate of an HTTP swipe reconciles by
/// last-write-wins instead of double-counting.
async fn handle_swipe(state: &AppState, swipe: SwipeEvent) {
    let matched = match state.engine.submit_swipe(&swipe).await {
        Ok(matched) => matched,
        Err(err) => {
            tracing::warn!(error = %err, "channel swipe rejected");
            return;
        }
    };

    // Mirror the swipe to the partner for live UI.
    if let Ok(session) = state.store.session(&swipe.session_id).await {
        for partner in session.partners_of(&swipe.user_id) {
            state.presence.deliver(
                partner,
                ServerEvent::PartnerSwipe {
                    item_id: swipe.item_id.clone(),
                    liked: swipe.liked,
                },
            );
        }
    }

    if let Some(m) = &matched {
        notify_match(state, m).await;
    }
}
