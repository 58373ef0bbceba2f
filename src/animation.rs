//! The animation record and its update contract.
//!
//! Provides [`Animation`], the per-animation state a cooperative driver loop
//! advances once per tick, and [`compositing_order`] for ordering concurrently
//! active animations when their output is layered.

use core::cmp::Ordering;

use crate::effect::{Effect, Frame, Progress};
use crate::time::{TimeDuration, TimeInstant};

/// The lifecycle state of an animation.
///
/// `Finished` is terminal: there is no transition back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationState {
    /// Effect is invoked on every advance.
    Active,
    /// Effect is never invoked again.
    Finished,
}

/// One time-driven animation.
///
/// The end time is anchored lazily: it is computed from the timestamp of the
/// first [`advance`](Animation::advance) call rather than from construction,
/// so an animation created long before it is first driven still runs for its
/// full duration.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `E` - Effect implementation type
#[derive(Debug, Clone)]
pub struct Animation<I: TimeInstant, E: Effect<I>> {
    effect: E,
    duration: I::Duration,
    z_index: u16,
    start_time: Option<I>,
    end_time: Option<I>,
    state: AnimationState,
}

impl<I: TimeInstant, E: Effect<I>> Animation<I, E> {
    /// Creates an active animation with z-index 0.
    ///
    /// Negative (or NaN) durations are clamped to zero, which makes the
    /// animation finish on its first advance.
    pub fn new(effect: E, duration: I::Duration) -> Self {
        Self::with_z_index(effect, duration, 0)
    }

    /// Creates an active animation with the given compositing priority.
    pub fn with_z_index(effect: E, duration: I::Duration, z_index: u16) -> Self {
        // `>=` is false for NaN as well as for negative values.
        #[allow(clippy::neg_cmp_op_on_partial_ord)]
        let duration = if !(duration >= <I::Duration as TimeDuration>::ZERO) {
            #[cfg(feature = "defmt")]
            defmt::warn!("animation duration {} ms clamped to 0", duration.as_millis());
            <I::Duration as TimeDuration>::ZERO
        } else {
            duration
        };

        Self {
            effect,
            duration,
            z_index,
            start_time: None,
            end_time: None,
            state: AnimationState::Active,
        }
    }

    /// Sets the compositing priority.
    pub fn at_z_index(mut self, z_index: u16) -> Self {
        self.z_index = z_index;
        self
    }

    /// Advances the animation to `now`.
    ///
    /// On a finished animation this is a no-op and the effect is not invoked.
    /// Otherwise the end time is anchored on the first call, the effect is
    /// invoked, and the animation finishes if the effect reports completion
    /// or `now` has reached the end time.
    ///
    /// # Returns
    /// The state after this advance.
    pub fn advance(&mut self, now: I) -> AnimationState {
        if self.state == AnimationState::Finished {
            return self.state;
        }

        let start_time = match self.start_time {
            Some(start) => start,
            None => self.anchor(now),
        };

        let frame = Frame {
            now,
            start_time,
            end_time: self.end_time,
            duration: self.duration,
            z_index: self.z_index,
        };

        if self.effect.advance(&frame) == Progress::Completed {
            self.state = AnimationState::Finished;
            return self.state;
        }

        if let Some(end) = self.end_time {
            if now >= end {
                self.state = AnimationState::Finished;
            }
        }

        self.state
    }

    fn anchor(&mut self, now: I) -> I {
        self.start_time = Some(now);
        self.end_time = now.checked_add(self.duration);

        if self.end_time.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "animation end time overflows; only the effect can finish it ({} ms)",
                self.duration.as_millis()
            );
        }

        now
    }

    /// Returns true once the animation has finished.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// Returns true while the animation is still being driven.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == AnimationState::Active
    }

    /// Returns the current lifecycle state.
    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Returns the nominal running length.
    #[inline]
    pub fn duration(&self) -> I::Duration {
        self.duration
    }

    /// Returns the compositing priority.
    #[inline]
    pub fn z_index(&self) -> u16 {
        self.z_index
    }

    /// Returns the timestamp of the first advance, if any.
    #[inline]
    pub fn start_time(&self) -> Option<I> {
        self.start_time
    }

    /// Returns the anchored end time, `None` before the first advance.
    #[inline]
    pub fn end_time(&self) -> Option<I> {
        self.end_time
    }

    /// Normalized position within the duration at `now`, in `[0.0, 1.0]`.
    ///
    /// Returns `0.0` before the first advance and `1.0` once finished.
    pub fn progress(&self, now: I) -> f32 {
        if self.is_finished() {
            return 1.0;
        }

        match self.start_time {
            Some(start_time) => Frame {
                now,
                start_time,
                end_time: self.end_time,
                duration: self.duration,
                z_index: self.z_index,
            }
            .progress(),
            None => 0.0,
        }
    }

    /// Returns a reference to the effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Returns a mutable reference to the effect.
    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    /// Consumes the animation, returning its effect.
    pub fn into_effect(self) -> E {
        self.effect
    }
}

/// Orders two animations for compositing: lower z-index is applied first.
///
/// Equal z-indices compare equal, so a stable sort keeps insertion order.
#[inline]
pub fn compositing_order<I, A, B>(a: &Animation<I, A>, b: &Animation<I, B>) -> Ordering
where
    I: TimeInstant,
    A: Effect<I>,
    B: Effect<I>,
{
    a.z_index.cmp(&b.z_index)
}
