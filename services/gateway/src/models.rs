//! Request/response DTOs and the WebSocket protocol
//!
//! The WebSocket protocol mirrors the HTTP swipe path at lower latency:
//! a client joins with its user and session, then streams swipes. Both
//! paths feed the same ledger, so a swipe delivered over both reconciles
//! by last-write-wins instead of double-counting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use types::ids::{ItemId, SessionId, UserId};
use types::item::FoodItem;
use types::matches::Match;
use types::session::Category;

// --- HTTP ---

#[derive(Debug, Clone, Deserialize)]
pub struct SwipeRequest {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub liked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwipeResponse {
    pub success: bool,
    /// Whether this swipe completed a match.
    #[serde(rename = "match")]
    pub matched: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: UserId,
    pub partner_id: UserId,
    pub category: Category,
    #[serde(default)]
    pub filters: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchListResponse {
    pub item_ids: Vec<ItemId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// A match joined with its catalog item, for session match listings.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedMatch {
    #[serde(flatten)]
    pub matched: Match,
    /// None when the item has left the catalog since the match was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_item: Option<FoodItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsQuery {
    pub category: Category,
    /// Comma-separated tag filters.
    pub filters: Option<String>,
}

impl ItemsQuery {
    pub fn filter_set(&self) -> BTreeSet<String> {
        self.filters
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwipesQuery {
    pub user_id: Option<UserId>,
}

// --- WebSocket ---

/// Messages a client may send over the push channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Register presence for a session participant.
    Join {
        user_id: UserId,
        session_id: SessionId,
    },
    /// Low-latency mirror of the HTTP swipe submission.
    Swipe { item_id: ItemId, liked: bool },
}

/// Events the server pushes to connected participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    MatchFound {
        item_id: ItemId,
        participant_ids: BTreeSet<UserId>,
    },
    PartnerOnline {
        user_id: UserId,
    },
    PartnerOffline {
        user_id: UserId,
    },
    PartnerSwipe {
        item_id: ItemId,
        liked: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_join_wire_shape() {
        let json = r#"{"type":"join","user_id":"alex","session_id":"s1"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Join {
                user_id: UserId::from("alex"),
                session_id: SessionId::from("s1"),
            }
        );
    }

    #[test]
    fn test_client_swipe_wire_shape() {
        let json = r#"{"type":"swipe","item_id":"pizza","liked":true}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Swipe {
                item_id: ItemId::from("pizza"),
                liked: true,
            }
        );
    }

    #[test]
    fn test_match_found_wire_shape() {
        let event = ServerEvent::MatchFound {
            item_id: ItemId::from("pizza"),
            participant_ids: [UserId::from("alex"), UserId::from("sam")].into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"match_found""#));
        assert!(json.contains(r#""item_id":"pizza""#));
    }

    #[test]
    fn test_partner_events_wire_shape() {
        let online = serde_json::to_string(&ServerEvent::PartnerOnline {
            user_id: UserId::from("sam"),
        })
        .unwrap();
        assert!(online.contains(r#""type":"partner_online""#));

        let offline = serde_json::to_string(&ServerEvent::PartnerOffline {
            user_id: UserId::from("sam"),
        })
        .unwrap();
        assert!(offline.contains(r#""type":"partner_offline""#));
    }

    #[test]
    fn test_swipe_response_uses_match_key() {
        let json = serde_json::to_string(&SwipeResponse {
            success: true,
            matched: false,
        })
        .unwrap();
        assert_eq!(json, r#"{"success":true,"match":false}"#);
    }

    #[test]
    fn test_items_query_filter_set() {
        let q = ItemsQuery {
            category: Category::Cooking,
            filters: Some("Italian, Vegetarian,,".to_string()),
        };
        let set = q.filter_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Italian"));
        assert!(set.contains("Vegetarian"));

        let q = ItemsQuery {
            category: Category::Cooking,
            filters: None,
        };
        assert!(q.filter_set().is_empty());
    }

    #[test]
    fn test_malformed_client_message_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"dance"}"#).is_err());
        // liked must be a boolean, not a string
        assert!(
            serde_json::from_str::<ClientMessage>(
                r#"{"type":"swipe","item_id":"pizza","liked":"yes"}"#
            )
            .is_err()
        );
    }
}
