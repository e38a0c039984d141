//! Session host on test-controlled tokio time.

use hotseat::{HostError, SessionCommand, SessionHost};
use hotseat_core::{ChessRules, GameSession, OverReason, Side};
use std::time::Duration;
use tokio::time::sleep;

const SECOND: Duration = Duration::from_secs(1);

fn spawn(budget: u32) -> (hotseat::HostHandle, tokio::task::JoinHandle<()>) {
    SessionHost::spawn(GameSession::new(ChessRules::new(), budget), SECOND)
}

#[tokio::test(start_paused = true)]
async fn test_counts_down_each_interval() {
    let (handle, _task) = spawn(30);
    assert_eq!(handle.snapshot().clock.remaining_seconds(), 30);

    sleep(Duration::from_millis(3500)).await;
    assert_eq!(handle.snapshot().clock.remaining_seconds(), 27);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_over_time() {
    let (handle, _task) = spawn(2);

    sleep(Duration::from_millis(2500)).await;
    let view = handle.snapshot();
    assert_eq!(view.flags.over_reason(), Some(OverReason::Timeout));
    assert_eq!(view.active_side, Side::White);
    assert_eq!(view.tally.black_wins(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pause_holds_clock() {
    let (handle, _task) = spawn(30);

    sleep(Duration::from_millis(1500)).await;
    handle.send(SessionCommand::TogglePause).unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().clock.remaining_seconds(), 29);
    assert!(handle.snapshot().flags.is_paused());

    handle.send(SessionCommand::TogglePause).unwrap();
    sleep(Duration::from_millis(500)).await;
    // A resumed clock waits a full interval before counting
    assert_eq!(handle.snapshot().clock.remaining_seconds(), 29);
    sleep(Duration::from_millis(600)).await;
    assert_eq!(handle.snapshot().clock.remaining_seconds(), 28);
}

#[tokio::test(start_paused = true)]
async fn test_clicks_move_and_publish() {
    let (mut handle, _task) = spawn(30);

    handle
        .send(SessionCommand::Click("e2".parse().unwrap()))
        .unwrap();
    handle.changed().await.unwrap();
    handle
        .send(SessionCommand::Click("e4".parse().unwrap()))
        .unwrap();
    handle.changed().await.unwrap();

    let view = handle.snapshot_and_mark_seen();
    assert_eq!(view.active_side, Side::Black);
    assert_eq!(view.clock.remaining_seconds(), 30);
    assert!(view.selection.is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_new_turn_gets_full_first_second() {
    let (mut handle, _task) = spawn(30);

    sleep(Duration::from_millis(900)).await;
    handle
        .send(SessionCommand::Click("e2".parse().unwrap()))
        .unwrap();
    handle
        .send(SessionCommand::Click("e4".parse().unwrap()))
        .unwrap();
    sleep(Duration::from_millis(150)).await;

    let view = handle.snapshot_and_mark_seen();
    assert_eq!(view.active_side, Side::Black);
    assert_eq!(view.clock.remaining_seconds(), 30);

    // Black's first second ends one interval after the move
    sleep(Duration::from_millis(900)).await;
    assert_eq!(handle.snapshot().clock.remaining_seconds(), 29);
}

#[tokio::test(start_paused = true)]
async fn test_restart_gets_full_first_second() {
    let (handle, _task) = spawn(30);

    sleep(Duration::from_millis(1900)).await;
    handle.send(SessionCommand::Restart).unwrap();
    sleep(Duration::from_millis(500)).await;
    assert_eq!(handle.snapshot().clock.remaining_seconds(), 30);
}

#[tokio::test(start_paused = true)]
async fn test_idle_ticks_publish_nothing() {
    let (mut handle, _task) = spawn(30);

    handle.send(SessionCommand::TogglePause).unwrap();
    handle.changed().await.unwrap();
    handle.snapshot_and_mark_seen();

    sleep(Duration::from_secs(5)).await;
    assert!(!handle.has_changed().unwrap());

    handle.send(SessionCommand::Resign).unwrap();
    handle.changed().await.unwrap();
    handle.snapshot_and_mark_seen();

    sleep(Duration::from_secs(5)).await;
    assert!(!handle.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_send_after_stop_fails() {
    let (handle, task) = spawn(30);
    task.abort();
    let _ = task.await;

    assert_eq!(
        handle.send(SessionCommand::Tick),
        Err(HostError::Stopped)
    );
}
