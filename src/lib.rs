#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Animation`**: One time-driven animation: effect, duration, z-index and lifecycle state
//! - **`AnimationState`**: `Active` until the duration elapses or the effect completes, then `Finished`
//! - **`Effect`**: Trait to implement for your animation logic, advanced once per tick
//! - **`Frame`**: Read-only view of the record handed to an effect on each advance
//! - **`FnEffect`**: An effect made of a plain function and a typed payload
//! - **`Driver`**: Advances a slice of animations from a shared `TimeSource`
//! - **`compositing_order`**: Orders active animations by z-index for layering
//! - **`Layer`**: Trait for effects that produce a color, blended by `blend_layers`
//!
//! All times are milliseconds as `f64`. [`Millis`] and [`MillisDuration`] implement
//! the time traits directly; implement `TimeInstant` for your own timer type if it
//! uses a different representation.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod time;
pub mod effect;
pub mod animation;
pub mod driver;
pub mod compositor;

pub use animation::{Animation, AnimationState, compositing_order};
pub use compositor::{Layer, blend_layers};
pub use driver::{
    CompositeError, Driver, TickReport, advance_all, composite_order, for_each_composited,
    prune_finished,
};
pub use effect::{Effect, EffectFn, FnEffect, Frame, Progress};
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};
