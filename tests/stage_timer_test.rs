//! Stage widget timer lifecycle tests
//!
//! All tests run on a paused tokio clock, so time only moves when every task
//! is idle and the results are deterministic.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::oneshot;
use tokio::time::sleep;

use diagram_engine::config::StageConfig;
use diagram_engine::{CyclicStageWidget, DerivedView};

fn config_with_interval(interval_ms: u64) -> StageConfig {
    StageConfig {
        interval_ms,
        ..StageConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_four_ticks_return_to_first_stage() {
    let widget = CyclicStageWidget::mount(&StageConfig::default()).unwrap();
    let mut rx = widget.subscribe();

    let mut seen = Vec::new();
    for _ in 0..4 {
        rx.changed().await.unwrap();
        seen.push(*rx.borrow_and_update());
    }

    assert_eq!(seen, vec![1, 2, 3, 0]);
    widget.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_first_transition_after_one_period() {
    let widget = CyclicStageWidget::mount(&StageConfig::default()).unwrap();
    assert_eq!(widget.interval(), Duration::from_millis(2000));

    sleep(Duration::from_millis(1999)).await;
    assert_eq!(widget.current(), 0);

    sleep(Duration::from_millis(2)).await;
    assert_eq!(widget.current(), 1);
    assert_eq!(widget.view().label, "Training");
    assert!(widget.view().scanning);

    widget.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_no_transition_after_unmount() {
    let widget = CyclicStageWidget::mount(&StageConfig::default()).unwrap();
    let rx = widget.subscribe();

    sleep(Duration::from_millis(2500)).await;
    assert_eq!(*rx.borrow(), 1);

    widget.unmount().await;
    sleep(Duration::from_secs(30)).await;

    // Sender went away with the timer task; value frozen
    assert!(rx.has_changed().is_err());
    assert_eq!(*rx.borrow(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_timer() {
    let widget = CyclicStageWidget::mount(&StageConfig::default()).unwrap();
    let rx = widget.subscribe();

    drop(widget);
    sleep(Duration::from_secs(30)).await;

    assert!(rx.has_changed().is_err());
    assert_eq!(*rx.borrow(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_panicking_owner_stops_timer() {
    let (tx, rx_out) = oneshot::channel();

    let owner = tokio::spawn(async move {
        let widget = CyclicStageWidget::mount(&StageConfig::default()).unwrap();
        let _ = tx.send(widget.subscribe());
        sleep(Duration::from_millis(100)).await;
        panic!("owner crashed while mounted");
    });

    let rx = rx_out.await.unwrap();
    assert!(owner.await.unwrap_err().is_panic());

    sleep(Duration::from_secs(30)).await;
    assert!(rx.has_changed().is_err());
    assert_eq!(*rx.borrow(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_instances_tick_independently() {
    let fast = CyclicStageWidget::mount(&config_with_interval(1000)).unwrap();
    let slow = CyclicStageWidget::mount(&config_with_interval(3000)).unwrap();

    sleep(Duration::from_millis(3500)).await;

    assert_eq!(fast.current(), 3);
    assert_eq!(slow.current(), 1);

    fast.unmount().await;
    sleep(Duration::from_millis(3000)).await;

    // Unmounting one leaves the other running
    assert_eq!(slow.current(), 2);
    assert!(slow.is_running());
    slow.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_unvalidated_tables_fail_to_mount() {
    let zero = config_with_interval(0);
    let err = CyclicStageWidget::mount(&zero).err().unwrap();
    assert_eq!(err.code(), "DIAG-012");

    let empty = StageConfig {
        stages: Vec::new(),
        ..StageConfig::default()
    };
    let err = CyclicStageWidget::mount(&empty).err().unwrap();
    assert_eq!(err.code(), "DIAG-012");

    // A valid table mounted afterwards still ticks
    let widget = CyclicStageWidget::mount(&StageConfig::default()).unwrap();
    sleep(Duration::from_millis(2001)).await;
    assert_eq!(widget.current(), 1);
    assert!(widget.is_running());
    widget.unmount().await;
}
