use std::ops::{Add, Sub};

use crate::frame::ArrowPress;
use crate::param::ParamValue;

/// Applies one arrow press to `value`: left steps down by `unit`, right steps
/// up, each clamped to `[min, max]`. Returns whether a step was applied.
///
/// Callers only pass a press they won from
/// [`FrameContext::claim_arrows`](crate::frame::FrameContext::claim_arrows), so
/// one key press moves exactly one control.
pub fn step_value<T>(value: &mut T, min: T, max: T, unit: T, press: ArrowPress) -> bool
where
    T: ParamValue + Add<Output = T> + Sub<Output = T>,
{
    if press.left {
        *value = (*value - unit).clamp_to(min, max);
    }
    if press.right {
        *value = (*value + unit).clamp_to(min, max);
    }
    press.left || press.right
}
