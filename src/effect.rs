//! Effect abstraction driven by an [`Animation`](crate::Animation).
//!
//! An effect is the per-animation logic invoked once per tick while the
//! animation is active. It sees the record through a read-only [`Frame`] and
//! answers with a [`Progress`]; answering [`Progress::Completed`] finishes the
//! animation early, before its nominal duration has elapsed.

use crate::time::{TimeDuration, TimeInstant};

/// What an effect reports after being advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Progress {
    /// Effect wants to keep running.
    Running,
    /// Effect has naturally terminated.
    Completed,
}

impl Progress {
    /// Maps a "finished" flag to a progress value.
    #[inline]
    pub fn from_finished(finished: bool) -> Self {
        if finished {
            Progress::Completed
        } else {
            Progress::Running
        }
    }
}

/// Read-only view of an animation record for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<I: TimeInstant> {
    /// Timestamp of the current tick.
    pub now: I,
    /// Timestamp of the first tick the animation was driven.
    pub start_time: I,
    /// Scheduled finish, `None` if it could not be represented.
    pub end_time: Option<I>,
    /// Nominal running length.
    pub duration: I::Duration,
    /// Compositing priority.
    pub z_index: u16,
}

impl<I: TimeInstant> Frame<I> {
    /// Time since the animation was anchored.
    #[inline]
    pub fn elapsed(&self) -> I::Duration {
        self.now.duration_since(self.start_time)
    }

    /// Time left until the scheduled finish, ZERO once it has passed.
    #[inline]
    pub fn remaining(&self) -> I::Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.now),
            None => self.duration.saturating_sub(self.elapsed()),
        }
    }

    /// Normalized position within the duration, in `[0.0, 1.0]`.
    ///
    /// Zero-length animations report `1.0`.
    pub fn progress(&self) -> f32 {
        let total = self.duration.as_millis();
        if total <= 0.0 {
            return 1.0;
        }

        let ratio = (self.elapsed().as_millis() / total) as f32;
        ratio.clamp(0.0, 1.0)
    }
}

/// Per-animation logic advanced by the driver on every tick.
///
/// Implementations must not block: every active animation shares the same
/// update budget per tick.
pub trait Effect<I: TimeInstant> {
    /// Advances the effect to `frame.now`.
    fn advance(&mut self, frame: &Frame<I>) -> Progress;
}

impl<I: TimeInstant, E: Effect<I> + ?Sized> Effect<I> for &mut E {
    #[inline]
    fn advance(&mut self, frame: &Frame<I>) -> Progress {
        (**self).advance(frame)
    }
}

/// Function signature used by [`FnEffect`].
pub type EffectFn<I, P> = fn(&mut P, &Frame<I>) -> Progress;

/// An effect built from a plain function and its typed payload.
///
/// The payload is whatever state the function needs between ticks. Using
/// `f64` gives the single numeric auxiliary slot of a classic C-style
/// animation record.
#[derive(Debug, Clone, Copy)]
pub struct FnEffect<I: TimeInstant, P> {
    function: EffectFn<I, P>,
    payload: P,
}

impl<I: TimeInstant, P> FnEffect<I, P> {
    /// Pairs a function with its payload.
    pub fn new(function: EffectFn<I, P>, payload: P) -> Self {
        Self { function, payload }
    }

    /// Returns the payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Returns the payload mutably.
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Consumes the effect, returning its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<I: TimeInstant, P: Default> FnEffect<I, P> {
    /// Wraps a function with a default payload.
    pub fn from_fn(function: EffectFn<I, P>) -> Self {
        Self::new(function, P::default())
    }
}

impl<I: TimeInstant, P> Effect<I> for FnEffect<I, P> {
    #[inline]
    fn advance(&mut self, frame: &Frame<I>) -> Progress {
        (self.function)(&mut self.payload, frame)
    }
}
