//! End-to-end matching tests against the real storage adapter
//!
//! Exercises the engine + MemStore pair under the orderings that matter:
//! racing likes, duplicated submissions, out-of-order timestamps, and
//! the full two-person session scenario.

use std::collections::BTreeSet;
use std::sync::Arc;

use match_engine::{MatchEngine, Store};
use proptest::prelude::*;
use storage::MemStore;
use types::ids::{ItemId, SessionId, UserId};
use types::session::Category;
use types::swipe::SwipeEvent;

async fn paired_session(store: &MemStore, a: &str, b: &str) -> SessionId {
    store
        .get_or_create_session(
            &UserId::from(a),
            &UserId::from(b),
            Category::Cooking,
            BTreeSet::new(),
        )
        .await
        .unwrap()
        .id
}

fn swipe_at(session: &SessionId, user: &str, item: &str, liked: bool, at: i64) -> SwipeEvent {
    SwipeEvent {
        session_id: session.clone(),
        user_id: UserId::from(user),
        item_id: ItemId::from(item),
        liked,
        swiped_at: at,
    }
}

#[tokio::test]
async fn two_person_pizza_scenario() {
    let store = Arc::new(MemStore::new());
    let engine = MatchEngine::new(Arc::clone(&store));
    let session = paired_session(&store, "u1", "u2").await;

    // t=1: U1 likes pizza, no match yet.
    let r1 = engine
        .submit_swipe(&swipe_at(&session, "u1", "pizza", true, 1))
        .await
        .unwrap();
    assert!(r1.is_none());

    // t=2: U2 likes pizza, match created.
    let m = engine
        .submit_swipe(&swipe_at(&session, "u2", "pizza", true, 2))
        .await
        .unwrap()
        .expect("both participants liked pizza");
    assert_eq!(m.item_id, ItemId::from("pizza"));
    assert_eq!(
        m.participants,
        [UserId::from("u1"), UserId::from("u2")].into()
    );

    // t=3: U2 re-likes, no second match.
    let r3 = engine
        .submit_swipe(&swipe_at(&session, "u2", "pizza", true, 3))
        .await
        .unwrap();
    assert!(r3.is_none());

    // The match listing for U1 still shows exactly pizza.
    let matches = store
        .matches_for_user(&session, &UserId::from("u1"))
        .await
        .unwrap();
    let items: Vec<_> = matches.iter().map(|m| m.item_id.clone()).collect();
    assert_eq!(items, vec![ItemId::from("pizza")]);
}

#[tokio::test]
async fn like_dislike_like_counts_once() {
    let store = Arc::new(MemStore::new());
    let engine = MatchEngine::new(Arc::clone(&store));
    let session = paired_session(&store, "u1", "u2").await;

    for (liked, at) in [(true, 1), (false, 2), (true, 3)] {
        engine
            .submit_swipe(&swipe_at(&session, "u1", "pizza", liked, at))
            .await
            .unwrap();
    }

    let likes = store
        .likes_for(&session, &ItemId::from("pizza"))
        .await
        .unwrap();
    assert_eq!(likes, [UserId::from("u1")].into());
}

#[tokio::test]
async fn likes_on_different_items_never_match() {
    let store = Arc::new(MemStore::new());
    let engine = MatchEngine::new(Arc::clone(&store));
    let session = paired_session(&store, "u1", "u2").await;

    engine
        .submit_swipe(&swipe_at(&session, "u1", "pizza", true, 1))
        .await
        .unwrap();
    let r = engine
        .submit_swipe(&swipe_at(&session, "u2", "sushi", true, 2))
        .await
        .unwrap();
    assert!(r.is_none());
    assert!(store
        .matches_for_session(&session)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn matches_are_scoped_to_their_session() {
    let store = Arc::new(MemStore::new());
    let engine = MatchEngine::new(Arc::clone(&store));
    let lunch = paired_session(&store, "u1", "u2").await;
    let dinner = store
        .get_or_create_session(
            &UserId::from("u1"),
            &UserId::from("u2"),
            Category::DineOut,
            BTreeSet::new(),
        )
        .await
        .unwrap()
        .id;

    engine
        .submit_swipe(&swipe_at(&lunch, "u1", "pizza", true, 1))
        .await
        .unwrap();
    // u2's like lands in the *other* session: no quorum in either.
    let r = engine
        .submit_swipe(&swipe_at(&dinner, "u2", "pizza", true, 2))
        .await
        .unwrap();
    assert!(r.is_none());
    assert!(store.matches_for_session(&lunch).await.unwrap().is_empty());
    assert!(store.matches_for_session(&dinner).await.unwrap().is_empty());
}

/// The hardest property: concurrent and duplicated likes for the same
/// (session, item) mint exactly one match, whichever call wins.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_likes_create_exactly_one_match() {
    for round in 0..50 {
        let store = Arc::new(MemStore::new());
        let engine = MatchEngine::new(Arc::clone(&store));
        let session = paired_session(&store, "u1", "u2").await;

        let mut tasks = Vec::new();
        // Each participant's like submitted several times in parallel,
        // simulating retries racing the partner's swipe.
        for dup in 0..4 {
            for user in ["u1", "u2"] {
                let engine = engine.clone();
                let session = session.clone();
                let user = user.to_string();
                tasks.push(tokio::spawn(async move {
                    engine
                        .submit_swipe(&swipe_at(&session, &user, "pizza", true, 10 + dup))
                        .await
                        .unwrap()
                }));
            }
        }

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap().is_some() {
                created += 1;
            }
        }
        assert_eq!(created, 1, "round {round}: exactly one call may report the match");

        let matches = store.matches_for_session(&session).await.unwrap();
        assert_eq!(matches.len(), 1, "round {round}: exactly one match stored");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_pairing_resolves_to_one_session() {
    let store = Arc::new(MemStore::new());

    let mut tasks = Vec::new();
    for flip in 0..16 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            let (a, b) = if flip % 2 == 0 {
                ("alex", "sam")
            } else {
                ("sam", "alex")
            };
            store
                .get_or_create_session(
                    &UserId::from(a),
                    &UserId::from(b),
                    Category::Cooking,
                    BTreeSet::new(),
                )
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = BTreeSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }
    assert_eq!(ids.len(), 1, "every racing join resolves to the same session");
}

proptest! {
    /// Applying any arrival order of distinctly-timestamped swipes leaves
    /// the ledger agreeing with the newest fact.
    #[test]
    fn prop_last_write_wins_under_any_arrival_order(
        decisions in proptest::collection::vec(any::<bool>(), 1..8),
        seed in any::<u64>(),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        rt.block_on(async {
            let store = MemStore::new();
            let session = paired_session(&store, "u1", "u2").await;

            // Timestamp = index; shuffle arrival order deterministically.
            let mut order: Vec<usize> = (0..decisions.len()).collect();
            let mut state = seed;
            for i in (1..order.len()).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                order.swap(i, (state % (i as u64 + 1)) as usize);
            }

            for &i in &order {
                store
                    .record_swipe(&swipe_at(&session, "u1", "pizza", decisions[i], i as i64))
                    .await
                    .unwrap();
            }

            let newest = *decisions.last().unwrap();
            let likes = store
                .likes_for(&session, &ItemId::from("pizza"))
                .await
                .unwrap();
            prop_assert_eq!(likes.contains(&UserId::from("u1")), newest);
            Ok(())
        })?;
    }
}
