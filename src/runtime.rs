use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::quiz::Quiz;

/// How long one step waits for input before redrawing anyway.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal input the app reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizEvent {
    Key(KeyEvent),
    Resize,
}

/// Anything whose deferred work runs on elapsed wall time.
pub trait Timed {
    fn advance(&mut self, elapsed: Duration);
}

impl Timed for Quiz {
    fn advance(&mut self, elapsed: Duration) {
        Quiz::advance(self, elapsed);
    }
}

/// Where the time between steps comes from.
pub trait Clock: Send + 'static {
    /// Time passed since the previous call (or since construction).
    fn lap(&mut self) -> Duration;
}

#[derive(Debug)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now.duration_since(self.last);
        self.last = now;
        lap
    }
}

/// Reports the same lap on every step, so tests control quiz time exactly.
#[derive(Debug, Clone, Copy)]
pub struct SteppedClock {
    lap: Duration,
}

impl SteppedClock {
    pub fn new(lap: Duration) -> Self {
        Self { lap }
    }
}

impl Clock for SteppedClock {
    fn lap(&mut self) -> Duration {
        self.lap
    }
}

/// Queue of input events, fed by a terminal reader thread or by a test.
pub struct EventQueue {
    rx: Receiver<QuizEvent>,
}

impl EventQueue {
    pub fn new(rx: Receiver<QuizEvent>) -> Self {
        Self { rx }
    }

    /// Queue with a sender the caller feeds by hand.
    pub fn channel() -> (Sender<QuizEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }

    /// Spawns a thread forwarding crossterm key presses and resizes.
    pub fn terminal() -> Self {
        let (tx, queue) = Self::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too; only presses are intents
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(QuizEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(QuizEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        queue
    }

    fn next(&self, timeout: Duration) -> Option<QuizEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // nothing more will arrive; keep the step cadence anyway
                std::thread::sleep(timeout);
                None
            }
        }
    }
}

/// Drives a [`Timed`] target: wait for input, then hand the elapsed time to
/// the target before the input is handled.
pub struct Runner<C: Clock> {
    events: EventQueue,
    clock: C,
    poll: Duration,
}

impl Runner<WallClock> {
    pub fn terminal() -> Self {
        Self::new(EventQueue::terminal(), WallClock::new(), POLL_INTERVAL)
    }
}

impl<C: Clock> Runner<C> {
    pub fn new(events: EventQueue, clock: C, poll: Duration) -> Self {
        Self {
            events,
            clock,
            poll,
        }
    }

    /// Blocks up to the poll interval for input, advances `target` by the
    /// time that passed, then returns the input (if any).
    ///
    /// Timers scheduled while handling the returned event start from the
    /// moment the event arrived.
    pub fn step<T: Timed + ?Sized>(&mut self, target: &mut T) -> Option<QuizEvent> {
        let event = self.events.next(self.poll);
        target.advance(self.clock.lap());
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Elapsed(Vec<Duration>);

    impl Timed for Elapsed {
        fn advance(&mut self, elapsed: Duration) {
            self.0.push(elapsed);
        }
    }

    #[test]
    fn step_times_out_without_input() {
        let (_tx, events) = EventQueue::channel();
        let mut runner = Runner::new(
            events,
            SteppedClock::new(Duration::from_millis(250)),
            Duration::from_millis(1),
        );
        let mut target = Elapsed::default();

        assert_eq!(runner.step(&mut target), None);
        assert_eq!(target.0, vec![Duration::from_millis(250)]);
    }

    #[test]
    fn step_advances_before_returning_input() {
        let (tx, events) = EventQueue::channel();
        tx.send(QuizEvent::Resize).unwrap();
        let mut runner = Runner::new(
            events,
            SteppedClock::new(Duration::from_millis(40)),
            Duration::from_millis(10),
        );
        let mut target = Elapsed::default();

        assert_eq!(runner.step(&mut target), Some(QuizEvent::Resize));
        assert_eq!(target.0.len(), 1);
    }

    #[test]
    fn disconnected_queue_still_reports_time() {
        let (tx, events) = EventQueue::channel();
        drop(tx);
        let mut runner = Runner::new(events, WallClock::new(), Duration::from_millis(5));
        let mut target = Elapsed::default();

        assert_eq!(runner.step(&mut target), None);
        assert!(target.0[0] >= Duration::from_millis(5));
    }

    #[test]
    fn wall_clock_laps_are_monotonic() {
        let mut clock = WallClock::new();
        std::thread::sleep(Duration::from_millis(2));
        assert!(clock.lap() >= Duration::from_millis(2));
        assert!(clock.lap() < Duration::from_secs(1));
    }
}
