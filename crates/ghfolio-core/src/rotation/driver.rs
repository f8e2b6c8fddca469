//! Timer-driven auto-advance for a [`RotationEngine`].
//!
//! The driver is a task that owns the engine. Commands arrive over an mpsc
//! channel and every state change is published on a watch channel. While
//! the engine is running the task sleeps one period and advances; a
//! command that changes the rotation re-arms the period from the moment it
//! was handled, while a no-op command leaves the armed deadline alone.
//! While paused or empty no timer is armed. Dropping the [`RotationHandle`] cancels the
//! task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

use super::engine::RotationEngine;
use super::snapshot::RotationSnapshot;

/// Default auto-advance period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(4000);

/// Shortest period the driver will arm.
const MIN_PERIOD: Duration = Duration::from_millis(1);

const COMMAND_BUFFER: usize = 16;

#[derive(Debug)]
enum Command<T> {
    Attach(Arc<[T]>),
    Detach,
    Advance,
    Retreat,
    JumpTo(i64),
    Pause,
    Resume,
    SetWindowSize(usize),
}

struct Envelope<T> {
    command: Command<T>,
    ack: oneshot::Sender<RotationSnapshot<T>>,
}

/// Task side of a running rotation.
pub struct RotationDriver<T> {
    engine: RotationEngine<T>,
    period: Duration,
    auto_advances: u64,
    commands: mpsc::Receiver<Envelope<T>>,
    snapshots: watch::Sender<RotationSnapshot<T>>,
}

impl<T: Send + Sync + 'static> RotationDriver<T> {
    /// Start driving `engine`, advancing it every `period` while it runs.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(engine: RotationEngine<T>, period: Duration) -> RotationHandle<T> {
        let period = period.max(MIN_PERIOD);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        let driver = Self {
            engine,
            period,
            auto_advances: 0,
            commands: command_rx,
            snapshots: snapshot_tx,
        };

        debug!(?period, "starting rotation driver");
        let task = tokio::spawn(driver.run());

        RotationHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            task,
            period,
        }
    }

    async fn run(mut self) {
        let mut deadline = self.rearm();
        loop {
            tokio::select! {
                () = tick(deadline) => {
                    self.engine.advance();
                    self.auto_advances += 1;
                    trace!(offset = self.engine.offset(), "auto-advanced");
                    deadline = self.rearm();
                    self.publish();
                }
                envelope = self.commands.recv() => {
                    let Some(Envelope { command, ack }) = envelope else {
                        break;
                    };
                    let before = self.engine.snapshot();
                    self.apply(command);
                    // No-op commands keep the armed deadline.
                    if changed(&before, &self.engine.snapshot()) {
                        deadline = self.rearm();
                    }
                    let snapshot = self.publish();
                    // The caller may have stopped waiting; the state still changed.
                    let _ = ack.send(snapshot);
                }
            }
        }
        debug!("rotation driver stopped");
    }

    fn rearm(&self) -> Option<Instant> {
        self.engine.is_running().then(|| Instant::now() + self.period)
    }

    fn apply(&mut self, command: Command<T>) {
        trace!(command = command_name(&command), "rotation command");
        match command {
            Command::Attach(items) => self.engine.attach(items),
            Command::Detach => self.engine.detach(),
            Command::Advance => self.engine.advance(),
            Command::Retreat => self.engine.retreat(),
            Command::JumpTo(index) => self.engine.jump_to(index),
            Command::Pause => self.engine.pause(),
            Command::Resume => self.engine.resume(),
            Command::SetWindowSize(size) => self.engine.set_window_size(size),
        }
    }

    fn publish(&self) -> RotationSnapshot<T> {
        let mut snapshot = self.engine.snapshot();
        snapshot.auto_advances = self.auto_advances;
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}

const fn command_name<T>(command: &Command<T>) -> &'static str {
    match command {
        Command::Attach(_) => "attach",
        Command::Detach => "detach",
        Command::Advance => "advance",
        Command::Retreat => "retreat",
        Command::JumpTo(_) => "jump_to",
        Command::Pause => "pause",
        Command::Resume => "resume",
        Command::SetWindowSize(_) => "set_window_size",
    }
}

fn changed<T>(before: &RotationSnapshot<T>, after: &RotationSnapshot<T>) -> bool {
    !Arc::ptr_eq(&before.items, &after.items)
        || before.offset != after.offset
        || before.window_size != after.window_size
        || before.state != after.state
}

async fn tick(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Control side of a running rotation.
///
/// Each method waits until the driver has applied the command and returns
/// the resulting snapshot. Dropping the handle stops the driver.
#[derive(Debug)]
pub struct RotationHandle<T> {
    commands: mpsc::Sender<Envelope<T>>,
    snapshots: watch::Receiver<RotationSnapshot<T>>,
    task: JoinHandle<()>,
    period: Duration,
}

impl<T> RotationHandle<T> {
    async fn send(&self, command: Command<T>) -> RotationSnapshot<T> {
        let (ack, reply) = oneshot::channel();
        if self.commands.send(Envelope { command, ack }).await.is_err() {
            return self.snapshot();
        }
        match reply.await {
            Ok(snapshot) => snapshot,
            Err(_) => self.snapshot(),
        }
    }

    /// Replace the list; resets the offset.
    pub async fn attach(&self, items: impl Into<Arc<[T]>>) -> RotationSnapshot<T> {
        self.send(Command::Attach(items.into())).await
    }

    /// Drop the list; no timer is armed until a new list is attached.
    pub async fn detach(&self) -> RotationSnapshot<T> {
        self.send(Command::Detach).await
    }

    /// Show the next item.
    pub async fn advance(&self) -> RotationSnapshot<T> {
        self.send(Command::Advance).await
    }

    /// Show the previous item.
    pub async fn retreat(&self) -> RotationSnapshot<T> {
        self.send(Command::Retreat).await
    }

    /// Jump to `index`, normalized modulo the list length.
    pub async fn jump_to(&self, index: i64) -> RotationSnapshot<T> {
        self.send(Command::JumpTo(index)).await
    }

    /// Suspend auto-advance (pointer entered).
    pub async fn pause(&self) -> RotationSnapshot<T> {
        self.send(Command::Pause).await
    }

    /// Resume auto-advance (pointer left).
    pub async fn resume(&self) -> RotationSnapshot<T> {
        self.send(Command::Resume).await
    }

    /// Change the window size; resets the offset.
    pub async fn set_window_size(&self, window_size: usize) -> RotationSnapshot<T> {
        self.send(Command::SetWindowSize(window_size)).await
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> RotationSnapshot<T> {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RotationSnapshot<T>> {
        self.snapshots.clone()
    }

    /// Auto-advance period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Whether the driver task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the driver and wait for it to wind down.
    pub async fn shutdown(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl<T> Drop for RotationHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
