//! Load-channel lifecycle tests.
//!
//! Restarting a load must fully retire the previous worker's channel, and a
//! torn-down viewer must observe nothing further. These mirror how the shell
//! wires a worker thread to the viewer through an mpsc channel.

use showroom::{LoadEvent, LoadPhase, ModelData, ViewerState};
use std::sync::mpsc;

#[test]
fn test_restart_silences_superseded_worker() {
    let mut state = ViewerState::new();

    // First session: worker A reports some progress.
    let (tx_a, rx_a) = mpsc::channel::<LoadEvent>();
    state.begin_load();
    tx_a.send(LoadEvent::Progress { loaded: 40, total: 100 }).unwrap();
    while let Ok(event) = rx_a.try_recv() {
        state.apply(event);
    }
    assert_eq!(state.percent(), 40.0);

    // Restart: the viewer swaps in a fresh channel and drops A's receiver.
    let (tx_b, rx_b) = mpsc::channel::<LoadEvent>();
    drop(rx_a);
    state.begin_load();
    assert_eq!(state.percent(), 0.0);

    // Worker A is now disconnected; its late results can never arrive.
    assert!(tx_a.send(LoadEvent::Loaded(ModelData::default())).is_err());

    // Worker B drives the session to completion as usual.
    tx_b.send(LoadEvent::Progress { loaded: 10, total: 100 }).unwrap();
    tx_b.send(LoadEvent::Loaded(ModelData::default())).unwrap();
    let mut installed = 0;
    while let Ok(event) = rx_b.try_recv() {
        if state.apply(event).is_some() {
            installed += 1;
        }
    }
    assert_eq!(installed, 1);
    assert_eq!(state.phase(), LoadPhase::Loaded);
}

#[test]
fn test_teardown_disconnects_worker() {
    let (tx, rx) = mpsc::channel::<LoadEvent>();
    tx.send(LoadEvent::Progress { loaded: 1, total: 2 }).unwrap();

    // Teardown drops the receiver, buffered events included.
    drop(rx);
    assert!(tx.send(LoadEvent::Failed("late".to_string())).is_err());
}

#[test]
fn test_worker_result_after_teardown_leaves_state_untouched() {
    let mut state = ViewerState::new();
    state.begin_load();
    state.apply(LoadEvent::Loaded(ModelData::default()));
    assert_eq!(state.phase(), LoadPhase::Loaded);

    // Anything a stale worker manages to push afterwards is ignored.
    assert!(state.apply(LoadEvent::Loaded(ModelData::default())).is_none());
    state.apply(LoadEvent::Failed("stale".to_string()));
    assert_eq!(state.phase(), LoadPhase::Loaded);
}
