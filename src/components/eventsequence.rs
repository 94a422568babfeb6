//! Timed phase sequencer driven by elapsed milliseconds.
//!
//! An [`EventSequence`] is a scripted timeline of mutually exclusive phases.
//! Each [`SequenceEvent`] waits `delay_ms` after the previous one ends, then
//! stays active for `duration_ms`. Callers feed elapsed time through
//! [`EventSequence::advance`] and poll [`EventSequence::is_active`] and
//! [`EventSequence::alpha`] to drive screen transitions without callbacks.
//!
//! # States
//!
//! - idle: not running, not complete
//! - running: advancing with time
//! - complete: ran past its last event without `looping`
//!
//! # Timing rules
//!
//! On each advance from `prior` to `elapsed` the first event whose window
//! contains `elapsed` becomes active. If none does, the first event whose
//! window was crossed during the step (`start <= elapsed && end > prior`)
//! becomes active instead, so short events are never skipped by a long
//! frame. Progress is `(elapsed - start) / duration`, clamped to 1.
//!
//! Once a step starts past the last event's end the sequence either wraps,
//! carrying the overshoot into the next cycle, or stops and becomes
//! complete.
//!
//! Every event must satisfy `delay_ms > MIN_EVENT_GAP_MS` or
//! `duration_ms > MIN_EVENT_GAP_MS`; this keeps at most one event active at
//! any instant.

use smallvec::SmallVec;

/// Minimum gap in milliseconds that separates two events.
pub const MIN_EVENT_GAP_MS: f32 = 50.0;

/// One phase of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceEvent<Id> {
    pub delay_ms: f32,
    pub duration_ms: f32,
    pub id: Id,
}

impl<Id> SequenceEvent<Id> {
    pub fn new(delay_ms: f32, duration_ms: f32, id: Id) -> Self {
        Self {
            delay_ms,
            duration_ms: duration_ms.max(0.0),
            id,
        }
    }

    /// Whether this event is separated enough from its neighbours.
    pub fn is_well_formed(&self) -> bool {
        self.delay_ms > MIN_EVENT_GAP_MS || self.duration_ms > MIN_EVENT_GAP_MS
    }
}

/// Timeline of phases identified by `Id`.
#[derive(Debug, Clone)]
pub struct EventSequence<Id> {
    events: SmallVec<[SequenceEvent<Id>; 4]>,
    pub looping: bool,
    running: bool,
    complete: bool,
    elapsed_ms: f32,
    active: Option<Id>,
    alpha: f32,
}

impl<Id: Copy + PartialEq> EventSequence<Id> {
    /// Build an idle sequence.
    ///
    /// Events closer than [`MIN_EVENT_GAP_MS`] are a programming error and
    /// trip a debug assertion.
    pub fn new(events: impl IntoIterator<Item = SequenceEvent<Id>>) -> Self {
        let events: SmallVec<[SequenceEvent<Id>; 4]> = events.into_iter().collect();
        debug_assert!(
            events.iter().all(SequenceEvent::is_well_formed),
            "sequence events need delay or duration above {MIN_EVENT_GAP_MS}ms"
        );
        Self {
            events,
            looping: false,
            running: false,
            complete: false,
            elapsed_ms: 0.0,
            active: None,
            alpha: 0.0,
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Arm the sequence from time zero. No-op while already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.reset();
        self.running = true;
    }

    /// Disarm and reset the sequence.
    pub fn stop(&mut self) {
        self.reset();
        self.running = false;
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.active = None;
        self.alpha = 0.0;
        self.complete = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn active(&self) -> Option<Id> {
        self.active
    }

    /// Progress of the active event in `[0, 1]`, or 0 when none is active.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// True while running with `id` as the active event.
    pub fn is_active(&self, id: Id) -> bool {
        self.running && self.active == Some(id)
    }

    /// End time of the last event, measured from the start of the sequence.
    pub fn total_ms(&self) -> f32 {
        self.events
            .iter()
            .fold(0.0, |end, e| end + e.delay_ms + e.duration_ms)
    }

    /// Move the timeline forward by `dt_ms`. No-op unless running.
    pub fn advance(&mut self, dt_ms: f32) {
        if !self.running {
            return;
        }
        if self.events.is_empty() {
            self.running = false;
            self.complete = true;
            return;
        }
        let mut dt_ms = dt_ms.max(0.0);
        loop {
            let prior = self.elapsed_ms;
            self.elapsed_ms += dt_ms;
            self.active = None;
            self.alpha = 0.0;

            if self.select_active(prior) {
                return;
            }

            let last_end = self.total_ms();
            if prior <= last_end {
                return;
            }
            if self.looping && last_end > 0.0 {
                dt_ms = prior - last_end + dt_ms;
                self.elapsed_ms = 0.0;
                continue;
            }
            self.running = false;
            self.complete = true;
            self.alpha = 0.0;
            return;
        }
    }

    fn select_active(&mut self, prior: f32) -> bool {
        let elapsed = self.elapsed_ms;
        let mut crossed = None;
        let mut end = 0.0;
        for event in &self.events {
            let start = end + event.delay_ms;
            end = start + event.duration_ms;
            if start <= elapsed && elapsed <= end {
                self.activate(event.id, start, event.duration_ms);
                return true;
            }
            if crossed.is_none() && start <= elapsed && end > prior {
                crossed = Some((event.id, start, event.duration_ms));
            }
        }
        if let Some((id, start, duration)) = crossed {
            self.activate(id, start, duration);
            return true;
        }
        false
    }

    fn activate(&mut self, id: Id, start: f32, duration_ms: f32) {
        self.active = Some(id);
        self.alpha = if duration_ms > 0.0 {
            ((self.elapsed_ms - start) / duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
    }
}
