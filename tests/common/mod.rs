//! Shared test infrastructure for anim-record integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use anim_record::{Effect, Frame, Millis, Progress, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Integer tick duration, exercising a non-float timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> f64 {
        self.0 as f64
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Integer tick instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<Millis>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(Millis(0.0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: f64) {
        let current = self.current_time.get();
        self.current_time.set(Millis(current.0 + millis));
    }

    pub fn set_time(&self, time: Millis) {
        self.current_time.set(time);
    }
}

impl TimeSource<Millis> for MockTimeSource {
    fn now(&self) -> Millis {
        self.current_time.get()
    }
}

// ============================================================================
// Recording Effect
// ============================================================================

/// Effect that counts its calls and keeps the first frames it is advanced with
pub struct RecordingEffect<I: TimeInstant> {
    calls: usize,
    frames: heapless::Vec<Frame<I>, 32>,
    last_frame: Option<Frame<I>>,
    complete_after: Option<usize>,
}

impl<I: TimeInstant> RecordingEffect<I> {
    pub fn new() -> Self {
        Self {
            calls: 0,
            frames: heapless::Vec::new(),
            last_frame: None,
            complete_after: None,
        }
    }

    /// Report completion on the given (1-based) call
    pub fn completing_after(calls: usize) -> Self {
        Self {
            complete_after: Some(calls),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    /// The first 32 frames; later calls are counted but not stored
    pub fn frames(&self) -> &[Frame<I>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame<I>> {
        self.last_frame.as_ref()
    }
}

impl<I: TimeInstant> Effect<I> for RecordingEffect<I> {
    fn advance(&mut self, frame: &Frame<I>) -> Progress {
        self.calls += 1;
        self.last_frame = Some(*frame);
        if !self.frames.is_full() {
            let _ = self.frames.push(*frame);
        }

        match self.complete_after {
            Some(calls) => Progress::from_finished(self.calls >= calls),
            None => Progress::Running,
        }
    }
}
