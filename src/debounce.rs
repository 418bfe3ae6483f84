//! Debounced value: raw input updates immediately, the committed value only
//! follows once the input has been quiet for a fixed delay.
//!
//! There is no timer thread. The owner calls [`Debounced::poll`] from its event
//! loop (sleeping for [`Debounced::time_until_settle`] in between) and the
//! commit happens on the first poll past the deadline.

mod clock;

use std::time::{Duration, Instant};

pub use clock::{Clock, ManualClock, SystemClock};

use crate::observe::{Observable, SubscriptionId};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebounceState {
    /// A raw value is waiting for the quiet period to pass.
    Pending,
    /// The committed value is the last raw value and no countdown is armed.
    Settled,
}

pub struct Debounced<T, C: Clock = SystemClock> {
    raw: T,
    committed: Observable<T>,
    delay: Duration,
    deadline: Option<Instant>,
    disposed: bool,
    clock: C,
}

impl<T: Clone> Debounced<T, SystemClock> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self::with_clock(initial, delay, SystemClock)
    }
}

impl<T: Clone, C: Clock> Debounced<T, C> {
    pub fn with_clock(initial: T, delay: Duration, clock: C) -> Self {
        Self {
            raw: initial.clone(),
            committed: Observable::new(initial),
            delay,
            deadline: None,
            disposed: false,
            clock,
        }
    }

    /// Update the raw value and restart the countdown.
    ///
    /// After [`dispose`](Self::dispose) the raw value still updates but nothing is armed.
    pub fn set_raw(&mut self, value: T) {
        self.raw = value;
        if !self.disposed {
            self.deadline = Some(self.clock.now() + self.delay);
        }
    }

    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn committed(&self) -> &T {
        self.committed.get()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> DebounceState {
        if self.deadline.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Settled
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Time left before the pending value commits, `None` when settled.
    pub fn time_until_settle(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(self.clock.now()))
    }

    /// Commit the raw value if the quiet period has elapsed.
    ///
    /// Returns `true` when a commit (and its notification) happened.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now() >= deadline => {
                self.commit();
                true
            }
            _ => false,
        }
    }

    /// Commit a pending value right away. Returns `false` if nothing was pending.
    pub fn flush(&mut self) -> bool {
        if self.deadline.is_some() {
            self.commit();
            true
        } else {
            false
        }
    }

    /// Cancel any pending countdown for good. Nothing is committed or notified afterwards.
    pub fn dispose(&mut self) {
        self.deadline = None;
        self.disposed = true;
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        self.committed.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.committed.unsubscribe(id)
    }

    fn commit(&mut self) {
        self.deadline = None;
        self.committed.set(self.raw.clone());
    }
}
