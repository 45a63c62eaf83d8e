//! Selection engine — weighted draw and stop-angle geometry.
//!
//! Wedges are drawn equal-sized regardless of weight, so the weight only
//! decides *which* index wins. The angle math then turns that index into an
//! absolute rotation that puts the wedge centre under the pointer.
//!
//! Wedge layout: wedge 0 starts at 0° and wedges proceed clockwise in SVG
//! space, where 270° is 12 o'clock.

use rand::Rng;

use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::wheel::item::Item;

/// Result of one draw: the winning index and where the wheel must stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub index: usize,
    /// Stop angle in `[0, 360)`.
    pub stop_angle: f64,
    /// Absolute rotation the animation ends at.
    pub target_rotation: f64,
}

/// Total weight, after checking the draw preconditions.
fn checked_total(items: &[Item]) -> Result<f64, WheelError> {
    let mut total = 0.0;
    for (index, item) in items.iter().enumerate() {
        if !item.weight.is_finite() || item.weight < 0.0 {
            return Err(WheelError::InvalidWeight {
                index,
                weight: item.weight,
            });
        }
        total += item.weight;
    }
    if !total.is_finite() {
        return Err(WheelError::InvalidWeight {
            index: items.len() - 1,
            weight: total,
        });
    }
    if total <= 0.0 {
        return Err(WheelError::EmptySelectionPool);
    }
    Ok(total)
}

/// Whether `items` can be drawn from at all.
pub fn validate(items: &[Item]) -> Result<(), WheelError> {
    checked_total(items).map(|_| ())
}

/// Cumulative walk for a point `r` in `[0, total)`.
///
/// Falls back to the last item with positive weight if rounding lets `r`
/// run past the end.
pub(crate) fn walk(items: &[Item], mut r: f64) -> usize {
    for (i, item) in items.iter().enumerate() {
        if r < item.weight {
            return i;
        }
        r -= item.weight;
    }
    items
        .iter()
        .rposition(|item| item.weight > 0.0)
        .unwrap_or(items.len().saturating_sub(1))
}

/// Weighted random index: item `i` wins with probability `w_i / Σw`.
pub fn pick_weighted<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> Result<usize, WheelError> {
    let total = checked_total(items)?;
    let r = rng.gen_range(0.0..total);
    Ok(walk(items, r))
}

/// Rotation in `[0, 360)` that puts the centre of wedge `index` of `count`
/// under the pointer.
pub fn stop_angle(index: usize, count: usize, pointer_angle: f64) -> f64 {
    if count == 0 {
        return normalize(pointer_angle);
    }
    let segment = 360.0 / count as f64;
    normalize(pointer_angle - (index as f64 * segment + segment / 2.0))
}

/// Next absolute rotation: the first full turn at or after `current`, plus
/// `extra_revolutions` turns, plus the stop angle.
///
/// Strictly greater than `current` whenever `extra_revolutions >= 1`.
pub fn target_rotation(current: f64, stop_angle: f64, extra_revolutions: u32) -> f64 {
    (current / 360.0).ceil() * 360.0 + 360.0 * extra_revolutions as f64 + normalize(stop_angle)
}

/// One full draw: weighted index plus the rotation the wheel must end at.
pub fn draw<R: Rng + ?Sized>(
    items: &[Item],
    current_rotation: f64,
    config: &WheelConfig,
    rng: &mut R,
) -> Result<Draw, WheelError> {
    let index = pick_weighted(items, rng)?;
    let stop = stop_angle(index, items.len(), config.pointer_angle);
    Ok(Draw {
        index,
        stop_angle: stop,
        target_rotation: target_rotation(current_rotation, stop, config.extra_revolutions),
    })
}

/// Map any angle into `[0, 360)`.
fn normalize(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360.0
    if a >= 360.0 { 0.0 } else { a }
}
