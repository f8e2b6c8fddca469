use std::time::Duration;

use ghfolio_core::github::FallbackData;
use ghfolio_core::{RotationDriver, RotationEngine, RotationState};

const PERIOD: Duration = Duration::from_millis(4000);

fn names(snapshot: &ghfolio_core::RotationSnapshot<ghfolio_core::RepositoryItem>) -> Vec<String> {
    snapshot
        .visible()
        .into_iter()
        .map(|repo| repo.name.clone())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_hover_cycle_over_fallback_repositories() {
    let repositories = FallbackData::new("octocat").repositories(6);
    let handle = RotationDriver::spawn(RotationEngine::with_items(repositories, 3), PERIOD);
    let mut updates = handle.subscribe();

    assert_eq!(
        names(&handle.snapshot()),
        vec!["Project 1", "Project 2", "Project 3"]
    );

    #[allow(clippy::unwrap_used)]
    updates.changed().await.unwrap();
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.offset, 1);
    assert_eq!(snapshot.auto_advances, 1);
    assert_eq!(
        snapshot.indicators(),
        vec![false, true, false, false, false, false]
    );

    // Pointer enters: nothing moves however long it stays.
    let paused = handle.pause().await;
    assert_eq!(paused.state, RotationState::Paused);
    tokio::time::sleep(PERIOD * 5).await;
    assert_eq!(handle.snapshot().offset, 1);

    // Manual navigation still works while paused.
    assert_eq!(names(&handle.retreat().await)[0], "Project 1");
    assert_eq!(names(&handle.retreat().await)[0], "Project 6");
    assert_eq!(
        names(&handle.snapshot()),
        vec!["Project 6", "Project 1", "Project 2"]
    );

    // Pointer leaves: advancing picks up again one full period later.
    handle.resume().await;
    tokio::time::sleep(PERIOD + Duration::from_millis(10)).await;
    assert_eq!(handle.snapshot().offset, 0);
    assert_eq!(handle.snapshot().auto_advances, 2);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_list_replacement_resets_rotation() {
    let handle = RotationDriver::spawn(RotationEngine::new(2), PERIOD);
    assert_eq!(handle.snapshot().state, RotationState::Empty);

    tokio::time::sleep(PERIOD * 3).await;
    assert_eq!(handle.snapshot().auto_advances, 0);

    let attached = handle.attach(vec![10, 20, 30, 40]).await;
    assert_eq!(attached.state, RotationState::Active);
    assert_eq!(attached.visible(), vec![&10, &20]);

    tokio::time::sleep(PERIOD * 3 + Duration::from_millis(10)).await;
    assert_eq!(handle.snapshot().offset, 3);
    assert_eq!(handle.snapshot().visible(), vec![&40, &10]);

    let replaced = handle.attach(vec![1, 2]).await;
    assert_eq!(replaced.offset, 0);
    assert!(!replaced.can_navigate());

    let detached = handle.detach().await;
    assert_eq!(detached.state, RotationState::Empty);
    let advances = detached.auto_advances;
    tokio::time::sleep(PERIOD * 3).await;
    assert_eq!(handle.snapshot().auto_advances, advances);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_advancing() {
    let handle = RotationDriver::spawn(RotationEngine::with_items(vec!['A', 'B', 'C'], 1), PERIOD);
    let updates = handle.subscribe();

    handle.shutdown().await;
    tokio::time::sleep(PERIOD * 3).await;
    assert_eq!(updates.borrow().offset, 0);
    assert_eq!(updates.borrow().auto_advances, 0);
}
