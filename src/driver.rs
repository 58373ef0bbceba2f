//! A thin cooperative driver for animation records.
//!
//! The driver owns no storage. Callers keep their animations in whatever
//! container suits them and lend a slice for each tick. Every animation in a
//! tick is advanced with the same timestamp, and compositing order is derived
//! from [`compositing_order`] with a stable sort.

use core::cmp::Ordering;

use crate::animation::{Animation, AnimationState, compositing_order};
use crate::effect::Effect;
use crate::time::{TimeInstant, TimeSource};
use heapless::Vec;

/// Errors that can occur while ordering animations for compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompositeError {
    /// More active animations than the order buffer can hold.
    CapacityExceeded {
        /// Number of active animations.
        active: usize,
        /// Capacity of the order buffer.
        capacity: usize,
    },
}

impl core::fmt::Display for CompositeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CompositeError::CapacityExceeded { active, capacity } => {
                write!(
                    f,
                    "{} active animations exceed compositing capacity of {}",
                    active, capacity
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CompositeError {}

/// Summary of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Animations still active after the tick.
    pub active: usize,
    /// Animations that finished during the tick.
    pub finished: usize,
}

impl TickReport {
    /// Returns true if no animation needs further servicing.
    pub fn is_idle(&self) -> bool {
        self.active == 0
    }
}

/// Advances every animation in `animations` to `now`.
///
/// Animations that were already finished are skipped and do not count
/// towards [`TickReport::finished`].
pub fn advance_all<I, E>(animations: &mut [Animation<I, E>], now: I) -> TickReport
where
    I: TimeInstant,
    E: Effect<I>,
{
    let mut report = TickReport::default();

    for animation in animations.iter_mut() {
        if animation.is_finished() {
            continue;
        }

        match animation.advance(now) {
            AnimationState::Active => report.active += 1,
            AnimationState::Finished => report.finished += 1,
        }
    }

    report
}

/// Returns the indices of active animations in compositing order.
///
/// Lower z-index comes first; equal z-indices keep their slice order.
///
/// # Errors
/// * `CapacityExceeded` - More than `N` animations are active
pub fn composite_order<I, E, const N: usize>(
    animations: &[Animation<I, E>],
) -> Result<Vec<usize, N>, CompositeError>
where
    I: TimeInstant,
    E: Effect<I>,
{
    let mut order: Vec<usize, N> = Vec::new();

    for (idx, animation) in animations.iter().enumerate() {
        if animation.is_active() && order.push(idx).is_err() {
            return Err(CompositeError::CapacityExceeded {
                active: animations.iter().filter(|a| a.is_active()).count(),
                capacity: N,
            });
        }
    }

    // Insertion sort: stable, in place, and `core` has no stable slice sort.
    for i in 1..order.len() {
        let mut j = i;
        while j > 0
            && compositing_order(&animations[order[j - 1]], &animations[order[j]])
                == Ordering::Greater
        {
            order.swap(j - 1, j);
            j -= 1;
        }
    }

    Ok(order)
}

/// Visits active animations in compositing order.
///
/// # Errors
/// * `CapacityExceeded` - More than `N` animations are active
pub fn for_each_composited<I, E, F, const N: usize>(
    animations: &[Animation<I, E>],
    mut f: F,
) -> Result<(), CompositeError>
where
    I: TimeInstant,
    E: Effect<I>,
    F: FnMut(&Animation<I, E>),
{
    for idx in composite_order::<I, E, N>(animations)? {
        f(&animations[idx]);
    }
    Ok(())
}

/// Removes finished animations, keeping the rest in insertion order.
///
/// # Returns
/// Number of animations removed.
pub fn prune_finished<I, E, const N: usize>(animations: &mut Vec<Animation<I, E>, N>) -> usize
where
    I: TimeInstant,
    E: Effect<I>,
{
    let before = animations.len();
    animations.retain(|a| a.is_active());
    before - animations.len()
}

/// Drives animation records from a shared time source.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct Driver<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    _instant: core::marker::PhantomData<I>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Driver<'t, I, T> {
    /// Creates a driver reading time from `time_source`.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            time_source,
            _instant: core::marker::PhantomData,
        }
    }

    /// Reads the time source once and advances every animation with it.
    pub fn tick<E: Effect<I>>(&self, animations: &mut [Animation<I, E>]) -> TickReport {
        advance_all(animations, self.time_source.now())
    }

    /// Returns the current time from the driver's time source.
    pub fn now(&self) -> I {
        self.time_source.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Frame, FnEffect, Progress};
    use crate::time::{Millis, MillisDuration};
    use core::cell::Cell;

    fn idle(_: &mut (), _: &Frame<Millis>) -> Progress {
        Progress::Running
    }

    type Idle = Animation<Millis, FnEffect<Millis, ()>>;

    fn layer(duration: f64, z_index: u16) -> Idle {
        Animation::with_z_index(FnEffect::from_fn(idle), MillisDuration(duration), z_index)
    }

    #[test]
    fn composite_order_sorts_by_z_index() {
        let animations = [layer(100.0, 3), layer(100.0, 1), layer(100.0, 2)];
        let order = composite_order::<_, _, 4>(&animations).unwrap();
        assert_eq!(order.as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn composite_order_is_stable_for_ties() {
        let animations = [layer(10.0, 2), layer(10.0, 1), layer(10.0, 2), layer(10.0, 1)];
        let order = composite_order::<_, _, 4>(&animations).unwrap();
        assert_eq!(order.as_slice(), &[1, 3, 0, 2]);
    }

    #[test]
    fn composite_order_skips_finished() {
        let mut animations = [layer(0.0, 0), layer(100.0, 5)];
        advance_all(&mut animations, Millis(0.0));

        let order = composite_order::<_, _, 2>(&animations).unwrap();
        assert_eq!(order.as_slice(), &[1]);
    }

    #[test]
    fn composite_order_reports_capacity() {
        let animations = [layer(10.0, 0), layer(10.0, 1), layer(10.0, 2)];
        let result = composite_order::<_, _, 2>(&animations);
        assert_eq!(
            result,
            Err(CompositeError::CapacityExceeded {
                active: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn driver_uses_one_timestamp_per_tick() {
        let clock = Cell::new(Millis(500.0));
        let source = || clock.get();
        let driver = Driver::new(&source);
        let mut animations = [layer(100.0, 0), layer(200.0, 0)];

        assert_eq!(driver.now(), Millis(500.0));
        driver.tick(&mut animations);
        assert_eq!(animations[0].start_time(), Some(Millis(500.0)));
        assert_eq!(animations[1].start_time(), Some(Millis(500.0)));

        clock.set(Millis(650.0));
        assert_eq!(driver.now(), Millis(650.0));
        let report = driver.tick(&mut animations);
        assert_eq!(report, TickReport { active: 1, finished: 1 });
    }
}
