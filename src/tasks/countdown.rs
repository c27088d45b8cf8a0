//! Countdown tick driver
//!
//! `CountdownEngine` owns the shared dial and, while running, a [`TickHandle`]
//! for the background task that ticks it once per configured interval.
//! Dropping the handle aborts the task, so pausing, resetting or dropping the
//! engine leaves no callback behind.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    runtime::Handle,
    sync::{broadcast, watch},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{
    error::DialError,
    geometry::{DialGeometry, Point, TextMetrics},
    state::{DialEvent, DialSnapshot, TickOutcome, TimerDial},
};

/// Background task that ticks the dial until it stops running
pub async fn countdown_tick_task(dial: Arc<Mutex<TimerDial>>, period: Duration) {
    info!("Starting countdown tick task every {:?}", period);

    // First tick lands one full period after start
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let outcome = match dial.lock() {
            Ok(mut dial) => dial.tick(),
            Err(e) => {
                error!("Failed to lock dial state: {}", e);
                break;
            }
        };

        match outcome {
            TickOutcome::Counting(remaining) => {
                debug!("Countdown tick, {}s remaining", remaining);
            }
            TickOutcome::Finished => {
                info!("Countdown expired, stopping tick task");
                break;
            }
            TickOutcome::Idle => {
                debug!("Dial no longer running, stopping tick task");
                break;
            }
        }
    }
}

/// Scoped ownership of a running tick task; aborts it on drop
#[derive(Debug)]
pub struct TickHandle {
    task: JoinHandle<()>,
}

impl TickHandle {
    /// Spawn the tick task on `runtime`
    pub fn spawn(runtime: &Handle, dial: Arc<Mutex<TimerDial>>, period: Duration) -> Self {
        Self {
            task: runtime.spawn(countdown_tick_task(dial, period)),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Host-facing command surface: a dial plus its periodic driver
#[derive(Debug)]
pub struct CountdownEngine {
    dial: Arc<Mutex<TimerDial>>,
    ticker: Option<TickHandle>,
}

impl CountdownEngine {
    pub fn new(dial: TimerDial) -> Self {
        Self {
            dial: Arc::new(Mutex::new(dial)),
            ticker: None,
        }
    }

    /// Shared handle to the underlying dial
    pub fn dial(&self) -> Arc<Mutex<TimerDial>> {
        Arc::clone(&self.dial)
    }

    fn with_dial<R>(&self, f: impl FnOnce(&mut TimerDial) -> R) -> Result<R, DialError> {
        let mut dial = self
            .dial
            .lock()
            .map_err(|e| DialError::LockPoisoned(e.to_string()))?;
        Ok(f(&mut dial))
    }

    /// Start the countdown and its tick task; no-op when running or at zero
    ///
    /// Fails with [`DialError::NoRuntime`] outside a tokio runtime, leaving
    /// the dial untouched.
    pub fn start(&mut self) -> Result<bool, DialError> {
        let runtime = Handle::try_current().map_err(|e| DialError::NoRuntime(e.to_string()))?;
        let (started, period) =
            self.with_dial(|dial| (dial.start(), dial.configuration().tick_interval()))?;

        if started {
            self.ticker = Some(TickHandle::spawn(&runtime, Arc::clone(&self.dial), period));
        }
        Ok(started)
    }

    pub fn pause(&mut self) -> Result<bool, DialError> {
        self.ticker = None;
        self.with_dial(|dial| dial.pause())
    }

    pub fn stop(&mut self) -> Result<bool, DialError> {
        self.ticker = None;
        self.with_dial(|dial| dial.stop())
    }

    /// Start when idle, pause when running
    pub fn toggle(&mut self) -> Result<bool, DialError> {
        if self.is_running()? {
            self.pause().map(|_| false)
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Result<(), DialError> {
        self.ticker = None;
        self.with_dial(|dial| dial.reset())
    }

    pub fn set_max_duration(&self, seconds: u32) -> Result<(), DialError> {
        self.with_dial(|dial| dial.set_max_duration(seconds))?
    }

    pub fn pointer_down(&self, point: Point) -> Result<(), DialError> {
        self.with_dial(|dial| dial.pointer_down(point))
    }

    pub fn pointer_move(&self, point: Point) -> Result<(), DialError> {
        self.with_dial(|dial| dial.pointer_move(point))
    }

    pub fn pointer_up(&self) -> Result<(), DialError> {
        self.with_dial(|dial| dial.pointer_up())
    }

    pub fn subscribe(&self) -> Result<broadcast::Receiver<DialEvent>, DialError> {
        self.with_dial(|dial| dial.subscribe())
    }

    pub fn watch_snapshots(&self) -> Result<watch::Receiver<DialSnapshot>, DialError> {
        self.with_dial(|dial| dial.watch_snapshots())
    }

    pub fn current_time(&self) -> Result<u32, DialError> {
        self.with_dial(|dial| dial.current_time())
    }

    pub fn max_time(&self) -> Result<u32, DialError> {
        self.with_dial(|dial| dial.max_time())
    }

    pub fn is_running(&self) -> Result<bool, DialError> {
        self.with_dial(|dial| dial.is_running())
    }

    pub fn snapshot(&self) -> Result<DialSnapshot, DialError> {
        self.with_dial(|dial| dial.snapshot())
    }

    pub fn geometry(&self, metrics: &dyn TextMetrics) -> Result<DialGeometry, DialError> {
        let snapshot = self.snapshot()?;
        Ok(DialGeometry::compute(&snapshot, metrics))
    }
}
