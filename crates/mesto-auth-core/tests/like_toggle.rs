//! Like-set semantics under repetition and concurrency

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::Harness;
use mesto_auth_core::AuthError;
use mesto_types::{CardId, UserId};
use proptest::prelude::*;

#[tokio::test]
async fn test_like_is_idempotent() {
    let h = Harness::new();
    let alice = h.user("alice@x.com").await;
    let bob = h.user("bob@x.com").await;
    let card = h.card(&alice, "Elbrus").await;

    h.likes.like(&card.id, &bob.user_id).await.unwrap();
    let card_after = h.likes.like(&card.id, &bob.user_id).await.unwrap();
    assert_eq!(card_after.likes, BTreeSet::from([bob.user_id]));

    h.likes.unlike(&card.id, &bob.user_id).await.unwrap();
    let card_after = h.likes.unlike(&card.id, &bob.user_id).await.unwrap();
    assert!(card_after.likes.is_empty());
}

#[tokio::test]
async fn test_owner_may_like_own_card() {
    let h = Harness::new();
    let alice = h.user("alice@x.com").await;
    let card = h.card(&alice, "Elbrus").await;

    let liked = h.likes.like(&card.id, &alice.user_id).await.unwrap();
    assert!(liked.is_liked_by(&alice.user_id));
}

#[tokio::test]
async fn test_like_on_missing_card_is_not_found() {
    let h = Harness::new();
    let result = h.likes.like(&CardId::new(), &UserId::new()).await;
    assert!(matches!(result, Err(AuthError::CardNotFound)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_are_all_kept() {
    const USERS: usize = 64;

    let h = Arc::new(Harness::new());
    let owner = h.user("owner@x.com").await;
    let card = h.card(&owner, "Elbrus").await;

    let likers: Vec<UserId> = (0..USERS).map(|_| UserId::new()).collect();
    let tasks: Vec<_> = likers
        .iter()
        .copied()
        .map(|user_id| {
            let h = h.clone();
            let card_id = card.id;
            tokio::spawn(async move { h.likes.like(&card_id, &user_id).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let card = h.cards.get_card(&card.id).await.unwrap();
    assert_eq!(card.like_count(), USERS);
    assert_eq!(card.likes, likers.into_iter().collect::<BTreeSet<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_like_and_unlike_by_different_users() {
    let h = Arc::new(Harness::new());
    let owner = h.user("owner@x.com").await;
    let card = h.card(&owner, "Elbrus").await;

    let leavers: Vec<UserId> = (0..16).map(|_| UserId::new()).collect();
    for user_id in &leavers {
        h.likes.like(&card.id, user_id).await.unwrap();
    }
    let joiners: Vec<UserId> = (0..16).map(|_| UserId::new()).collect();

    let mut tasks = Vec::new();
    for (leaver, joiner) in leavers.iter().copied().zip(joiners.iter().copied()) {
        let (h1, h2) = (h.clone(), h.clone());
        let card_id = card.id;
        tasks.push(tokio::spawn(async move { h1.likes.unlike(&card_id, &leaver).await }));
        tasks.push(tokio::spawn(async move { h2.likes.like(&card_id, &joiner).await }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let card = h.cards.get_card(&card.id).await.unwrap();
    assert_eq!(card.likes, joiners.into_iter().collect::<BTreeSet<_>>());
}

// ============================================================================
// Sequential model check
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any sequence of toggles leaves exactly the users whose last action was a like
    #[test]
    fn prop_like_set_matches_model(ops in prop::collection::vec((0usize..4, any::<bool>()), 0..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let h = Harness::new();
            let owner = h.user("owner@x.com").await;
            let card = h.card(&owner, "Elbrus").await;
            let users: Vec<UserId> = (0..4).map(|_| UserId::new()).collect();

            let mut model = BTreeSet::new();
            for (idx, want_liked) in ops {
                let user_id = users[idx];
                let card = h.likes.toggle_like(&card.id, &user_id, want_liked).await.unwrap();

                if want_liked {
                    model.insert(user_id);
                } else {
                    model.remove(&user_id);
                }
                prop_assert_eq!(&card.likes, &model);
            }
            Ok(())
        })?;
    }
}
