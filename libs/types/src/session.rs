//! Session types: the pairing scope for swipe matching
//!
//! A session binds a set of participants (exactly two in the intended
//! product) to a food category and optional filter tags. At most one
//! active session exists per unordered participant pair + category;
//! completed sessions are immutable history.

use crate::ids::{SessionId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Food category a session swipes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Recipes to cook at home
    Cooking,
    /// Delivery restaurants
    Delivery,
    /// Dine-out venues
    #[serde(rename = "dineout")]
    DineOut,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cooking => "cooking",
            Category::Delivery => "delivery",
            Category::DineOut => "dineout",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cooking" => Ok(Category::Cooking),
            "delivery" => Ok(Category::Delivery),
            "dineout" => Ok(Category::DineOut),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Order-insensitive participant pair key.
///
/// `PairKey::new(a, b)` and `PairKey::new(b, a)` are equal, which is what
/// makes session lookup symmetric. The constructor normalizes by sorting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    lo: UserId,
    hi: UserId,
}

impl PairKey {
    pub fn new(a: UserId, b: UserId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn users(&self) -> (&UserId, &UserId) {
        (&self.lo, &self.hi)
    }
}

/// A swipe session pairing participants around a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Distinct participants; two in the intended product, but the set
    /// representation allows larger groups.
    pub participants: BTreeSet<UserId>,
    pub category: Category,
    /// Tag filters applied upstream when selecting candidate items.
    pub filters: BTreeSet<String>,
    /// Unix millis
    pub created_at: i64,
    /// Terminal flag; completed sessions never match again in pairing lookup.
    pub completed: bool,
}

impl Session {
    /// Create a new active session for a pair of users.
    pub fn new(
        a: UserId,
        b: UserId,
        category: Category,
        filters: BTreeSet<String>,
        created_at: i64,
    ) -> Self {
        let mut participants = BTreeSet::new();
        participants.insert(a);
        participants.insert(b);
        Self {
            id: SessionId::generate(),
            participants,
            category,
            filters,
            created_at,
            completed: false,
        }
    }

    pub fn is_participant(&self, user: &UserId) -> bool {
        self.participants.contains(user)
    }

    /// All participants other than `user`. In a two-person session this
    /// is the partner to notify.
    pub fn partners_of(&self, user: &UserId) -> Vec<&UserId> {
        self.participants.iter().filter(|u| *u != user).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn session(a: &str, b: &str) -> Session {
        Session::new(
            UserId::from(a),
            UserId::from(b),
            Category::Cooking,
            BTreeSet::new(),
            1_700_000_000_000,
        )
    }

    #[test]
    fn test_category_roundtrip() {
        for cat in [Category::Cooking, Category::Delivery, Category::DineOut] {
            let parsed: Category = cat.as_str().parse().unwrap();
            assert_eq!(parsed, cat);
        }
        assert!("brunch".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::DineOut).unwrap();
        assert_eq!(json, "\"dineout\"");
        let back: Category = serde_json::from_str("\"delivery\"").unwrap();
        assert_eq!(back, Category::Delivery);
    }

    #[test]
    fn test_pair_key_symmetry() {
        let k1 = PairKey::new(UserId::from("alex"), UserId::from("sam"));
        let k2 = PairKey::new(UserId::from("sam"), UserId::from("alex"));
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_session_participants() {
        let s = session("alex", "sam");
        assert!(s.is_participant(&UserId::from("alex")));
        assert!(!s.is_participant(&UserId::from("morgan")));
        assert_eq!(s.partners_of(&UserId::from("alex")), vec![&UserId::from("sam")]);
    }

    proptest! {
        #[test]
        fn prop_pair_key_order_insensitive(a in "[a-z]{1,12}", b in "[a-z]{1,12}") {
            let k1 = PairKey::new(UserId::new(a.clone()), UserId::new(b.clone()));
            let k2 = PairKey::new(UserId::new(b), UserId::new(a));
            prop_assert_eq!(k1, k2);
        }
    }
}
