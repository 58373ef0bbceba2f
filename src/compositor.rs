//! Layer blending for composited LED effects.
//!
//! Effects that produce a color implement [`Layer`]. [`blend_layers`] folds
//! the active layers onto a base color in compositing order, so layers with a
//! higher z-index land on top.

use crate::animation::Animation;
use crate::driver::{CompositeError, for_each_composited};
use crate::effect::Effect;
use crate::time::TimeInstant;
use palette::{Mix, Srgb};

/// An effect whose output is a single color.
pub trait Layer {
    /// Color produced by the most recent advance.
    fn color(&self) -> Srgb;

    /// Coverage of the layer over what is below it, `0.0`-`1.0`.
    fn opacity(&self) -> f32 {
        1.0
    }
}

/// Blends the active layers of `animations` onto `base`.
///
/// Finished animations contribute nothing. Opacity outside `0.0`-`1.0` is
/// clamped.
///
/// # Errors
/// * `CapacityExceeded` - More than `N` animations are active
pub fn blend_layers<I, E, const N: usize>(
    base: Srgb,
    animations: &[Animation<I, E>],
) -> Result<Srgb, CompositeError>
where
    I: TimeInstant,
    E: Effect<I> + Layer,
{
    let mut out = base;
    for_each_composited::<I, E, _, N>(animations, |animation| {
        let layer = animation.effect();
        let opacity = layer.opacity().clamp(0.0, 1.0);
        out = out.mix(layer.color(), opacity);
    })?;
    Ok(out)
}
