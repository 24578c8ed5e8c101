use std::time::Duration;

/// Whether the scheduler steps the process on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No automatic stepping.
    #[default]
    Paused,
    /// One step per elapsed target interval.
    Running,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paused => write!(f, "paused"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// Drives the two cadences of the lab: simulation steps at a configurable
/// rate, and renders coalesced to at most one per frame.
///
/// The scheduler only decides; the caller performs the step and the draw.
/// Timestamps are host frame times measured from any fixed origin.
#[derive(Debug, Clone)]
pub struct Scheduler {
    state: RunState,
    rate: u32,
    min_rate: u32,
    max_rate: u32,
    interval: Duration,
    last_tick: Option<Duration>,
    render_pending: bool,
    stopped: bool,
}

impl Scheduler {
    /// A paused scheduler stepping at `rate` steps per second once running.
    /// `rate` is clamped to `min_rate..=max_rate`.
    pub fn new(rate: u32, min_rate: u32, max_rate: u32) -> Self {
        let min_rate = min_rate.max(1);
        let max_rate = max_rate.max(min_rate);
        let rate = rate.clamp(min_rate, max_rate);
        Self {
            state: RunState::Paused,
            rate,
            min_rate,
            max_rate,
            interval: interval_for(rate),
            last_tick: None,
            render_pending: false,
            stopped: false,
        }
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Shorthand for `state() == RunState::Running`.
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Flip between paused and running. Returns the new state.
    pub fn toggle(&mut self) -> RunState {
        self.state = match self.state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        };
        tracing::debug!("simulation {}", self.state);
        self.state
    }

    /// Force the paused state.
    pub fn pause(&mut self) {
        self.state = RunState::Paused;
    }

    /// Steps per second.
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Accepted rate range.
    pub fn rate_range(&self) -> (u32, u32) {
        (self.min_rate, self.max_rate)
    }

    /// Change the step rate. Takes effect the next time a frame is
    /// evaluated; the last accepted tick is left untouched.
    pub fn set_rate(&mut self, rate: u32) {
        self.rate = rate.clamp(self.min_rate, self.max_rate);
        self.interval = interval_for(self.rate);
        tracing::debug!("step rate set to {} per second", self.rate);
    }

    /// Minimum time between two automatic steps.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Evaluate one host frame. Returns `true` if exactly one step is due.
    ///
    /// The last-tick timestamp advances to `now`, not by one interval, so a
    /// late frame never triggers a burst of catch-up steps.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        if self.stopped {
            return false;
        }
        let last = *self.last_tick.get_or_insert(now);
        if self.state != RunState::Running {
            return false;
        }
        if now.saturating_sub(last) >= self.interval {
            self.last_tick = Some(now);
            true
        } else {
            false
        }
    }

    /// Ask for a draw on the next frame. Repeated requests before that draw
    /// are absorbed.
    pub fn request_render(&mut self) {
        self.render_pending = true;
    }

    /// Whether a draw is outstanding.
    pub fn render_pending(&self) -> bool {
        self.render_pending
    }

    /// Consume the outstanding draw, if any.
    pub fn take_render(&mut self) -> bool {
        std::mem::take(&mut self.render_pending)
    }

    /// Stop the loop: later frames do nothing.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.state = RunState::Paused;
    }

    /// Whether [`Scheduler::stop`] was called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

fn interval_for(rate: u32) -> Duration {
    Duration::from_secs(1) / rate.max(1)
}

/// Collapses a burst of requests into one, fired after a quiet period.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    quiet: Duration,
    pending: Option<(Duration, T)>,
}

impl<T> Debounce<T> {
    /// A debouncer that fires `quiet` after the most recent request.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a request at `now`, replacing any pending one.
    pub fn request(&mut self, value: T, now: Duration) {
        self.pending = Some((now + self.quiet, value));
    }

    /// Whether a request is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the latest request if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let due = matches!(&self.pending, Some((deadline, _)) if now >= *deadline);
        if due {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }
}
