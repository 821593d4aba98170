use std::time::Duration;

use tracing::debug;
use tracing::trace;

/// Fastest allowed stepping interval.
pub const MIN_SPEED: Duration = Duration::from_millis(100);

/// Slowest allowed stepping interval.
pub const MAX_SPEED: Duration = Duration::from_millis(1300);

/// A reading of a monotonic clock, measured from an arbitrary origin.
pub type Timestamp = Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// Handle to a single pending scheduling opportunity.
///
/// Only the most recently issued ticket is live. Pausing or resetting the clock drops it, so a
/// ticket that fires late is simply ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What a scheduling opportunity turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The ticket was stale or the clock is not running. Nothing happened.
    Cancelled,

    /// First opportunity of a run: the baseline was recorded, no step.
    Baseline,

    /// Not enough time has elapsed since the last step.
    Waiting,

    /// One generation is due.
    Step,
}

/// Paces generations against a monotonic timestamp source.
///
/// The clock never sleeps or arms a timer. Whoever drives it polls the current [`Ticket`] as
/// often as it likes (typically once per frame) and the clock compares elapsed time against the
/// interval at that moment. A speed change is therefore picked up by the very next poll.
#[derive(Debug)]
pub struct Clock {
    state: RunState,

    /// Time between two generations
    interval: Duration,

    /// When the last generation happened, or when the run started. `None` right after
    /// [`Clock::start`].
    last_tick: Option<Timestamp>,

    generation: u64,

    pending: Option<Ticket>,
    next_ticket: u64,
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: RunState::Stopped,
            interval: interval.clamp(MIN_SPEED, MAX_SPEED),
            last_tick: None,
            generation: 0,
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The live ticket, if the clock is waiting on an opportunity.
    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    /// Set the stepping interval, clamped to [`MIN_SPEED`]..=[`MAX_SPEED`]. Takes effect on the
    /// next poll, even mid-run.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.clamp(MIN_SPEED, MAX_SPEED);
        debug!(interval = ?self.interval, "speed changed");
    }

    /// Start or resume a run.
    ///
    /// The baseline is cleared, so the first step always comes one full interval after the
    /// first poll. Time spent stopped or paused never counts towards it. Does nothing if the
    /// clock is already running.
    pub fn start(&mut self) {
        if self.state == RunState::Running {
            return;
        }

        debug!(from = ?self.state, generation = self.generation, "starting");

        self.state = RunState::Running;
        self.last_tick = None;
        self.pending = Some(self.issue());
    }

    /// Halt a run, keeping the generation count. Only a running clock can be paused.
    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            return;
        }

        debug!(generation = self.generation, "pausing");

        self.state = RunState::Paused;
        self.pending = None;
    }

    /// Halt without touching the generation count.
    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            debug!(from = ?self.state, "stopping");
        }

        self.state = RunState::Stopped;
        self.pending = None;
    }

    /// Halt and set the generation back to 0.
    pub fn reset(&mut self) {
        self.stop();
        self.last_tick = None;
        self.generation = 0;
    }

    /// Count one generation that happened outside of a run.
    pub fn advance(&mut self) {
        self.generation += 1;
    }

    /// Handle the scheduling opportunity `ticket` at time `now`.
    ///
    /// On any live ticket a new one is issued, whether or not a step is due. The caller is
    /// expected to perform exactly one step when this returns [`Tick::Step`].
    pub fn poll(&mut self, ticket: Ticket, now: Timestamp) -> Tick {
        if self.state != RunState::Running || self.pending != Some(ticket) {
            trace!(?ticket, state = ?self.state, "ignoring stale ticket");
            return Tick::Cancelled;
        }

        let tick = match self.last_tick {
            None => {
                self.last_tick = Some(now);
                Tick::Baseline
            }
            Some(last) if now.saturating_sub(last) >= self.interval => {
                self.last_tick = Some(now);
                self.generation += 1;
                trace!(generation = self.generation, "step");
                Tick::Step
            }
            Some(_) => Tick::Waiting,
        };

        self.pending = Some(self.issue());

        tick
    }

    fn issue(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        ticket
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::Clock;
    use super::RunState;
    use super::Tick;

    const INTERVAL: Duration = Duration::from_millis(200);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Poll whatever ticket is pending
    fn poll(clock: &mut Clock, now: Duration) -> Tick {
        match clock.pending() {
            Some(ticket) => clock.poll(ticket, now),
            None => Tick::Cancelled,
        }
    }

    #[test]
    fn first_poll_is_a_baseline() {
        let mut clock = Clock::new(INTERVAL);
        clock.start();

        assert_eq!(poll(&mut clock, ms(0)), Tick::Baseline);
        assert_eq!(clock.generation(), 0);
    }

    #[test]
    fn steps_on_the_interval() {
        let mut clock = Clock::new(INTERVAL);
        clock.start();

        assert_eq!(poll(&mut clock, ms(0)), Tick::Baseline);
        assert_eq!(poll(&mut clock, ms(199)), Tick::Waiting);
        assert_eq!(poll(&mut clock, ms(200)), Tick::Step);
        assert_eq!(clock.generation(), 1);

        assert_eq!(poll(&mut clock, ms(399)), Tick::Waiting);
        assert_eq!(clock.generation(), 1);

        assert_eq!(poll(&mut clock, ms(400)), Tick::Step);
        assert_eq!(clock.generation(), 2);
    }

    #[test]
    fn elapsed_time_before_start_does_not_count() {
        let mut clock = Clock::new(INTERVAL);

        // nothing is pending while stopped
        assert_eq!(poll(&mut clock, ms(0)), Tick::Cancelled);

        clock.start();
        assert_eq!(poll(&mut clock, ms(5_000)), Tick::Baseline);
        assert_eq!(poll(&mut clock, ms(5_100)), Tick::Waiting);
    }

    #[test]
    fn pause_cancels_pending_ticket() {
        let mut clock = Clock::new(INTERVAL);
        clock.start();
        poll(&mut clock, ms(0));

        let stale = clock.pending().unwrap();
        clock.pause();

        assert_eq!(clock.state(), RunState::Paused);
        assert_eq!(clock.pending(), None);

        for t in (200..2_000).step_by(50) {
            assert_eq!(clock.poll(stale, ms(t)), Tick::Cancelled);
        }

        assert_eq!(clock.generation(), 0);
    }

    #[test]
    fn resume_waits_a_full_interval() {
        let mut clock = Clock::new(INTERVAL);
        clock.start();
        poll(&mut clock, ms(0));
        poll(&mut clock, ms(200));
        poll(&mut clock, ms(350));
        clock.pause();

        clock.start();
        assert_eq!(poll(&mut clock, ms(400)), Tick::Baseline);
        assert_eq!(poll(&mut clock, ms(550)), Tick::Waiting);
        assert_eq!(poll(&mut clock, ms(600)), Tick::Step);
        assert_eq!(clock.generation(), 2);
    }

    #[test]
    fn old_ticket_is_stale_after_restart() {
        let mut clock = Clock::new(INTERVAL);
        clock.start();
        let old = clock.pending().unwrap();
        clock.pause();
        clock.start();

        assert_eq!(clock.poll(old, ms(0)), Tick::Cancelled);
        assert_eq!(poll(&mut clock, ms(0)), Tick::Baseline);
    }

    #[test]
    fn consumed_ticket_is_stale() {
        let mut clock = Clock::new(INTERVAL);
        clock.start();
        let ticket = clock.pending().unwrap();

        assert_eq!(clock.poll(ticket, ms(0)), Tick::Baseline);
        assert_eq!(clock.poll(ticket, ms(500)), Tick::Cancelled);
        assert_ne!(clock.pending(), Some(ticket));
    }

    #[test]
    fn speed_change_applies_on_next_poll() {
        let mut clock = Clock::new(Duration::from_millis(1_000));
        clock.start();
        poll(&mut clock, ms(0));
        assert_eq!(poll(&mut clock, ms(300)), Tick::Waiting);

        clock.set_interval(ms(250));
        assert_eq!(poll(&mut clock, ms(300)), Tick::Step);
    }

    #[test]
    fn interval_is_clamped() {
        let mut clock = Clock::new(ms(5));
        assert_eq!(clock.interval(), ms(100));

        clock.set_interval(ms(10_000));
        assert_eq!(clock.interval(), ms(1_300));
    }

    #[test]
    fn reset_clears_generation() {
        let mut clock = Clock::new(INTERVAL);
        clock.start();
        poll(&mut clock, ms(0));
        poll(&mut clock, ms(200));
        clock.advance();
        assert_eq!(clock.generation(), 2);

        clock.reset();
        assert_eq!(clock.state(), RunState::Stopped);
        assert_eq!(clock.generation(), 0);
        assert_eq!(clock.pending(), None);
    }

    #[test]
    fn pause_only_from_running() {
        let mut clock = Clock::new(INTERVAL);
        clock.pause();

        assert_eq!(clock.state(), RunState::Stopped);
    }
}
