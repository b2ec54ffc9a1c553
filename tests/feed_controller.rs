//! Integration tests for the feed view-state controller.
//!
//! Time is paused so the settle delay can be stepped through exactly.

use pretty_assertions::assert_eq;
use roost::feed::{FeedController, FeedState, SettleTicket};
use roost::listings::ListingStore;
use std::time::Duration;
use tokio::sync::mpsc;

const DELAY: Duration = Duration::from_millis(200);

fn three_listings() -> ListingStore {
    ListingStore::from_json(
        r#"[
            {"id": "1", "name": "Dune house", "categories": ["Beachfront"]},
            {"id": "2", "name": "Pine lodge", "categories": ["Cabins"]},
            {"id": "3", "name": "Loft", "categories": []}
        ]"#,
    )
    .unwrap()
}

fn ids(feed: &FeedController) -> Vec<&str> {
    feed.visible().iter().map(|l| l.id.as_str()).collect()
}

/// Apply every ticket that arrives until the channel stays quiet for two
/// settle delays.
async fn settle_all(feed: &mut FeedController, rx: &mut mpsc::Receiver<SettleTicket>) -> usize {
    let mut applied = 0;
    while let Ok(Some(ticket)) = tokio::time::timeout(DELAY * 2, rx.recv()).await {
        if feed.settle(ticket) {
            applied += 1;
        }
    }
    applied
}

#[tokio::test(start_paused = true)]
async fn starts_idle_with_every_listing() {
    let feed = FeedController::new(three_listings(), DELAY);
    assert!(!feed.is_loading());
    assert_eq!(feed.category(), "");
    assert_eq!(ids(&feed), vec!["1", "2", "3"]);
}

#[tokio::test(start_paused = true)]
async fn beachfront_loads_then_settles() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut feed = FeedController::new(three_listings(), DELAY);

    feed.select_category("Beachfront", &tx);
    assert_eq!(
        feed.state(),
        &FeedState::Loading {
            category: "Beachfront".to_string()
        }
    );
    assert!(ids(&feed).is_empty());

    // Not yet: one millisecond short of the delay
    let early = tokio::time::timeout(DELAY - Duration::from_millis(1), rx.recv()).await;
    assert!(early.is_err());

    assert_eq!(settle_all(&mut feed, &mut rx).await, 1);
    assert_eq!(feed.category(), "Beachfront");
    assert_eq!(ids(&feed), vec!["1"]);
}

#[tokio::test(start_paused = true)]
async fn unknown_category_settles_empty() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut feed = FeedController::new(three_listings(), DELAY);

    feed.select_category("Unknown", &tx);
    assert_eq!(settle_all(&mut feed, &mut rx).await, 1);
    assert_eq!(
        feed.state(),
        &FeedState::Idle {
            category: "Unknown".to_string(),
            results: Vec::new()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn rapid_switch_settles_only_last_selection() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut feed = FeedController::new(three_listings(), DELAY);

    feed.select_category("Beachfront", &tx);
    let early = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
    assert!(early.is_err());
    feed.select_category("Cabins", &tx);

    assert_eq!(settle_all(&mut feed, &mut rx).await, 1);
    assert_eq!(feed.category(), "Cabins");
    assert_eq!(ids(&feed), vec!["2"]);
}

#[tokio::test(start_paused = true)]
async fn ticket_from_superseded_selection_is_ignored() {
    let (tx, _rx) = mpsc::channel::<SettleTicket>(8);
    let mut feed = FeedController::new(three_listings(), DELAY);

    let stale = feed.select_category("Beachfront", &tx);
    let current = feed.select_category("Cabins", &tx);

    assert!(!feed.settle(stale));
    assert!(feed.is_loading());
    assert!(feed.settle(current));
    assert_eq!(ids(&feed), vec!["2"]);
}

#[tokio::test(start_paused = true)]
async fn unmount_cancels_pending_settle() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut feed = FeedController::new(three_listings(), DELAY);

    feed.select_category("Beachfront", &tx);
    feed.unmount();

    assert_eq!(settle_all(&mut feed, &mut rx).await, 0);
    assert!(feed.is_loading());
}

#[tokio::test(start_paused = true)]
async fn pending_settle_applies_without_unmount() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut feed = FeedController::new(three_listings(), DELAY);

    feed.select_category("Beachfront", &tx);

    assert_eq!(settle_all(&mut feed, &mut rx).await, 1);
    assert!(!feed.is_loading());
}

#[tokio::test(start_paused = true)]
async fn ticket_queued_before_unmount_is_ignored() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut feed = FeedController::new(three_listings(), DELAY);

    feed.select_category("Cabins", &tx);
    let ticket = rx.recv().await.unwrap();
    feed.unmount();

    assert!(!feed.settle(ticket));
    assert_eq!(
        feed.state(),
        &FeedState::Loading {
            category: "Cabins".to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn clearing_the_category_restores_everything() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut feed = FeedController::new(three_listings(), DELAY);

    feed.select_category("Cabins", &tx);
    settle_all(&mut feed, &mut rx).await;
    feed.select_category("", &tx);
    settle_all(&mut feed, &mut rx).await;

    assert_eq!(ids(&feed), vec!["1", "2", "3"]);
}
