//! The timer dial: drag-to-set interaction and the countdown state machine
//!
//! `TimerDial` is fully synchronous. Time only advances when the owner calls
//! [`TimerDial::tick`]; the periodic driver lives in `tasks::countdown`.

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace, warn};

use super::{DialEvent, DialSnapshot, DialState, TickOutcome};
use crate::{
    config::DialConfiguration,
    error::DialError,
    geometry::{
        angle_to_time, bearing, hit_test, time_to_angle, DialGeometry, Drawable,
        Point, Rect, TextMetrics, DIAL_RADIUS, DIAL_SIZE,
    },
};

/// Buffered events per subscriber before it starts lagging
const EVENT_CAPACITY: usize = 100;

/// Largest tolerated gap between actual and expected tick spacing
fn drift_tolerance_ms(expected_ms: i64) -> i64 {
    (expected_ms / 2).max(1)
}

/// A circular countdown dial
#[derive(Debug)]
pub struct TimerDial {
    config: DialConfiguration,
    state: DialState,
    /// Time-updated / finished notifications
    event_tx: broadcast::Sender<DialEvent>,
    /// Latest snapshot; every send is a redraw request
    snapshot_tx: watch::Sender<DialSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<DialSnapshot>,
}

impl TimerDial {
    /// Create a dial at the 25-minute default position
    pub fn new(config: DialConfiguration) -> Self {
        let state = DialState::new();
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let (snapshot_tx, snapshot_rx) =
            watch::channel(state.snapshot(config.max_duration_seconds()));

        let mut dial = Self {
            config,
            state,
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        };
        dial.update_time();
        dial
    }

    /// Validate raw parameters and create a dial
    pub fn try_new(max_duration_seconds: u32, tick_interval_ms: u64) -> Result<Self, DialError> {
        DialConfiguration::new(max_duration_seconds, tick_interval_ms).map(Self::new)
    }

    /// Subscribe to time-updated and finished events
    pub fn subscribe(&self) -> broadcast::Receiver<DialEvent> {
        self.event_tx.subscribe()
    }

    /// Watch state snapshots; a change means the dial needs repainting
    pub fn watch_snapshots(&self) -> watch::Receiver<DialSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn configuration(&self) -> DialConfiguration {
        self.config
    }

    pub fn snapshot(&self) -> DialSnapshot {
        self.state.snapshot(self.config.max_duration_seconds())
    }

    /// Seconds left on the dial
    pub fn current_time(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn max_time(&self) -> u32 {
        self.config.max_duration_seconds()
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Change the full-dial span, keeping the handle where it is
    pub fn set_max_duration(&mut self, seconds: u32) -> Result<(), DialError> {
        self.config = self.config.with_max_duration(seconds)?;
        info!("Maximum duration set to {}s", seconds);
        self.update_time();
        Ok(())
    }

    /// Start counting down; returns whether the dial transitioned to running
    pub fn start(&mut self) -> bool {
        self.start_at(Utc::now().timestamp_millis())
    }

    pub fn start_at(&mut self, now_ms: i64) -> bool {
        if self.state.running || self.state.remaining_seconds == 0 {
            return false;
        }

        self.state.running = true;
        self.state.last_tick_ms = now_ms;
        info!("Countdown started with {}s remaining", self.state.remaining_seconds);
        self.publish_snapshot();
        true
    }

    /// Halt the countdown, keeping the remaining time
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }

        self.state.running = false;
        info!("Countdown paused with {}s remaining", self.state.remaining_seconds);
        self.publish_snapshot();
        true
    }

    /// Same effect as [`pause`](Self::pause); used by reset and expiry
    pub fn stop(&mut self) -> bool {
        self.pause()
    }

    /// Stop and return to the last dragged target
    pub fn reset(&mut self) {
        self.stop();
        self.state.remaining_angle = self.state.current_angle;
        info!("Dial reset");
        self.update_time();
    }

    /// Advance the countdown by one tick
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_at(Utc::now().timestamp_millis())
    }

    /// Advance by exactly one second; `now_ms` is only checked for drift
    pub fn tick_at(&mut self, now_ms: i64) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }

        let expected = self.config.tick_interval().as_millis() as i64;
        let elapsed = now_ms - self.state.last_tick_ms;
        if (elapsed - expected).abs() > drift_tolerance_ms(expected) {
            warn!("Tick drift: {}ms since last tick, expected {}ms", elapsed, expected);
        }
        self.state.last_tick_ms = now_ms;

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        let remaining = self.state.remaining_seconds;

        let outcome = if remaining == 0 {
            self.state.remaining_angle = 0.0;
            self.stop();
            info!("Countdown finished");
            self.emit(DialEvent::Finished);
            TickOutcome::Finished
        } else {
            self.state.remaining_angle = time_to_angle(f64::from(remaining), self.max_time());
            TickOutcome::Counting(remaining)
        };

        trace!("Tick: {}s remaining", remaining);
        self.emit(DialEvent::TimeUpdated {
            remaining_seconds: remaining,
        });
        self.publish_snapshot();
        outcome
    }

    /// Press at `point` (relative to the dial center); ignored off the dial face
    pub fn pointer_down(&mut self, point: Point) {
        if !hit_test(point, DIAL_RADIUS) {
            debug!("Pointer down outside dial at ({:.1}, {:.1})", point.x, point.y);
            return;
        }

        self.state.dragging = true;
        self.apply_pointer(point);
    }

    pub fn pointer_move(&mut self, point: Point) {
        if !point.is_finite() {
            debug!("Ignoring non-finite pointer position");
            return;
        }
        if self.state.dragging {
            self.apply_pointer(point);
        }
    }

    pub fn pointer_up(&mut self) {
        if self.state.dragging {
            self.state.dragging = false;
            debug!("Drag ended at {}s", self.state.remaining_seconds);
            self.publish_snapshot();
        }
    }

    /// Snap the pointer bearing to five minutes and move both angles there
    fn apply_pointer(&mut self, point: Point) {
        let max = self.max_time();
        let seconds = angle_to_time(bearing(point), max, true).min(f64::from(max));

        self.state.current_angle = time_to_angle(seconds, max);
        self.state.remaining_angle = self.state.current_angle;
        debug!("Dragged to {:.1}° ({}s)", self.state.current_angle, seconds);
        self.update_time();
    }

    /// Recompute seconds from the remaining angle and notify
    fn update_time(&mut self) {
        let max = self.max_time();
        let seconds = angle_to_time(self.state.remaining_angle, max, false).round();
        self.state.remaining_seconds = seconds.clamp(0.0, f64::from(max)) as u32;

        self.emit(DialEvent::TimeUpdated {
            remaining_seconds: self.state.remaining_seconds,
        });
        self.publish_snapshot();
    }

    fn emit(&self, event: DialEvent) {
        if let Err(e) = self.event_tx.send(event) {
            trace!("No subscribers for {:?}: {}", event, e);
        }
    }

    fn publish_snapshot(&self) {
        if let Err(e) = self.snapshot_tx.send(self.snapshot()) {
            warn!("Failed to publish dial snapshot: {}", e);
        }
    }
}

impl Default for TimerDial {
    fn default() -> Self {
        Self::new(DialConfiguration::default())
    }
}

impl Drawable for TimerDial {
    fn bounding_rect(&self) -> Rect {
        Rect::centered(DIAL_SIZE)
    }

    fn paint(&self, metrics: &dyn TextMetrics) -> DialGeometry {
        DialGeometry::compute(&self.snapshot(), metrics)
    }
}
