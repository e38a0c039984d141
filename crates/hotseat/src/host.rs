//! Session host: one task owns the session and its timer.
//!
//! Commands arrive on an unbounded mailbox, ticks come from an interval in
//! the same `select!` loop, so the session has exactly one writer. After
//! every command, and every tick that counted, the host publishes a fresh
//! [`SnapshotView`].

use crate::command::SessionCommand;
use crate::view::SnapshotView;
use derive_more::{Display, Error};
use hotseat_core::{GameSession, RulesEngine, TickOutcome};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, instrument};

/// The host task has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum HostError {
    /// The host task is gone.
    #[display("Session host has stopped")]
    Stopped,
}

/// Caller side of a running host.
#[derive(Debug, Clone)]
pub struct HostHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<SnapshotView>,
}

impl HostHandle {
    /// Queues a command for the session.
    pub fn send(&self, command: SessionCommand) -> Result<(), HostError> {
        self.commands.send(command).map_err(|_| HostError::Stopped)
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> SnapshotView {
        self.snapshots.borrow().clone()
    }

    /// Waits until a newer snapshot is published.
    pub async fn changed(&mut self) -> Result<(), HostError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| HostError::Stopped)
    }

    /// Returns true if a snapshot arrived since the last one was read.
    pub fn has_changed(&self) -> Result<bool, HostError> {
        self.snapshots.has_changed().map_err(|_| HostError::Stopped)
    }

    /// Marks the current snapshot as read and returns it.
    pub fn snapshot_and_mark_seen(&mut self) -> SnapshotView {
        self.snapshots.borrow_and_update().clone()
    }
}

/// Owns a session and drives it from commands and a tick interval.
pub struct SessionHost<R: RulesEngine> {
    session: GameSession<R>,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    snapshots: watch::Sender<SnapshotView>,
    tick_interval: Duration,
}

impl<R> SessionHost<R>
where
    R: RulesEngine + Send + 'static,
    R::Position: Send,
{
    /// Spawns the host on the current tokio runtime.
    ///
    /// The task ends once every [`HostHandle`] has been dropped.
    #[instrument(skip(session), fields(turn_budget = session.turn_budget()))]
    pub fn spawn(session: GameSession<R>, tick_interval: Duration) -> (HostHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SnapshotView::capture(&session));

        let host = Self {
            session,
            commands: command_rx,
            snapshots: snapshot_tx,
            tick_interval,
        };
        let task = tokio::spawn(host.run());

        let handle = HostHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        info!(interval_ms = self.tick_interval.as_millis() as u64, "Session host started");
        let mut ticker = self.ticker();

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command, &mut ticker),
                    None => break,
                },
                _ = ticker.tick() => {
                    if self.session.tick() != TickOutcome::Ignored {
                        self.publish();
                    }
                }
            }
        }

        info!("Session host stopped");
    }

    fn ticker(&self) -> Interval {
        let mut ticker = time::interval_at(Instant::now() + self.tick_interval, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    fn handle(&mut self, command: SessionCommand, ticker: &mut Interval) {
        debug!(%command, "Host received command");
        let was_live = self.session.clock().is_running();
        let side = self.session.active_side();

        if let Err(e) = command.apply(&mut self.session) {
            error!(%command, error = %e, "Command failed");
        }

        // A clock that starts or restarts counts a full interval before its first tick
        let turn_started = side != self.session.active_side()
            || matches!(command, SessionCommand::NewGame | SessionCommand::Restart);
        if self.session.clock().is_running() && (!was_live || turn_started) {
            debug!("Ticker re-phased");
            ticker.reset();
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(SnapshotView::capture(&self.session));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotseat_core::ChessRules;

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_handles_dropped() {
        let session = GameSession::new(ChessRules::new(), 30);
        let (handle, task) = SessionHost::spawn(session, Duration::from_secs(1));

        drop(handle);
        assert!(task.await.is_ok());
    }
}
