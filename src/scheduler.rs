//! Paces a run so that every expansion can be drawn before the next one.
//!
//! Nothing here sleeps. The host asks [next_due](StepScheduler::next_due) when to wake up, arms
//! its own timer, and calls [tick](StepScheduler::tick) with the current time; between ticks it
//! is free to render and handle input. Time is a [Duration] since whatever epoch the host
//! likes, which also lets tests drive a virtual clock.
use std::time::Duration;

use log::debug;

use crate::config::Speed;
use crate::session::{RunToken, SearchEvent, SearchSession, StepOutcome};

/// Something that can advance a run by one step.
pub trait Stepper {
    fn step(&mut self, token: &RunToken) -> StepOutcome;
}

impl Stepper for SearchSession {
    fn step(&mut self, token: &RunToken) -> StepOutcome {
        SearchSession::step(self, token)
    }
}

#[derive(Clone, Debug)]
struct ScheduledStep {
    due: Duration,
    token: RunToken,
}

/// Holds at most one pending step.
#[derive(Clone, Debug, Default)]
pub struct StepScheduler {
    speed: Speed,
    pending: Option<ScheduledStep>,
}

impl StepScheduler {
    pub fn new(speed: Speed) -> StepScheduler {
        StepScheduler {
            speed,
            pending: None,
        }
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Changes the pace. Applies from the next rescheduling on.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Schedules the first step of the run identified by `token` at `now`. A step still pending
    /// for another run is cancelled.
    pub fn schedule(&mut self, token: RunToken, now: Duration) {
        if let Some(previous) = self.pending.take() {
            if previous.token != token {
                debug!("Dropping pending step of run {}", previous.token.id());
                previous.token.cancel();
            }
        }
        self.pending = Some(ScheduledStep { due: now, token });
    }

    /// When the pending step wants to run, if there is one.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Cancels the pending step and its run's token. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Runs the pending step if it is due, returning the events to draw.
    ///
    /// A step that only discarded a stale entry is followed by the next one within the same
    /// tick, so such discards never cost a frame. After a visible expansion the next step is
    /// scheduled one delay later; after the last one the scheduler goes idle.
    pub fn tick<S: Stepper + ?Sized>(&mut self, stepper: &mut S, now: Duration) -> Vec<SearchEvent> {
        match &self.pending {
            Some(pending) if pending.due <= now => {}
            _ => return Vec::new(),
        }
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };
        if pending.token.is_cancelled() {
            debug!("Skipping step of cancelled run {}", pending.token.id());
            return Vec::new();
        }
        loop {
            match stepper.step(&pending.token) {
                StepOutcome::Retry => continue,
                StepOutcome::Continue(events) => {
                    self.pending = Some(ScheduledStep {
                        due: now + self.speed.delay(),
                        token: pending.token,
                    });
                    return events;
                }
                StepOutcome::Finished(events) => return events,
                StepOutcome::Stale => return Vec::new(),
            }
        }
    }

    /// Drives the pending run to its end on a virtual clock starting at `now`, returning every
    /// event in order.
    pub fn run_to_completion<S: Stepper + ?Sized>(
        &mut self,
        stepper: &mut S,
        now: Duration,
    ) -> Vec<SearchEvent> {
        let mut events = Vec::new();
        let mut now = now;
        while let Some(due) = self.next_due() {
            now = now.max(due);
            events.extend(self.tick(stepper, now));
        }
        events
    }
}
