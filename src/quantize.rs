/// Absorbs f32 representation error so `(3.0 - 0.1) / 0.05` lands on 58, not 57.
const STEP_GUARD: f32 = 1e-3;

/// A continuous `[min, max]` range restricted to evenly spaced positions.
///
/// The slider itself works on the integer index; the float is always
/// re-derived from it, so the backing value can only sit on a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizedRange {
    pub min: f32,
    pub max: f32,
    /// Must be strictly positive.
    pub step: f32,
}

impl QuantizedRange {
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        debug_assert!(step > 0.0, "quantization step must be positive");
        Self { min, max, step }
    }

    pub fn total_steps(&self) -> i32 {
        ((self.max - self.min) / self.step + STEP_GUARD).floor() as i32
    }

    /// Nearest step index for `value`, rounding half away from zero.
    pub fn index_of(&self, value: f32) -> i32 {
        ((value - self.min) / self.step).round() as i32
    }

    /// Float at step `index`. The guard in `total_steps` can admit a last
    /// step that lands a hair past `max`, so the result is capped there.
    pub fn value_at(&self, index: i32) -> f32 {
        (index as f32 * self.step + self.min).min(self.max)
    }

    /// Moves `value` onto the nearest legal step.
    pub fn snap(&self, value: f32) -> f32 {
        self.value_at(self.index_of(value).clamp(0, self.total_steps()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_range_has_58_steps() {
        let q = QuantizedRange::new(0.1, 3.0, 0.05);
        assert_eq!(q.total_steps(), 58);
        assert!((q.value_at(20) - 1.1).abs() < 1e-5);
        assert_eq!(q.index_of(1.1), 20);
        assert!((q.value_at(q.total_steps()) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn index_round_trip() {
        let ranges = [
            QuantizedRange::new(0.1, 3.0, 0.05),
            QuantizedRange::new(0.0, 10.0, 0.1),
            QuantizedRange::new(-10.0, 12.0, 0.5),
            QuantizedRange::new(0.0, 1.0, 0.3),
        ];
        for q in ranges {
            for i in 0..=q.total_steps() {
                assert_eq!(q.index_of(q.value_at(i)), i, "{q:?} index {i}");
            }
        }
    }

    #[test]
    fn partial_last_step_is_dropped() {
        // 1.0 / 0.3 = 3.33..., the fourth step would overshoot max.
        let q = QuantizedRange::new(0.0, 1.0, 0.3);
        assert_eq!(q.total_steps(), 3);
    }

    #[test]
    fn nearly_whole_last_step_stays_inside_max() {
        // 0.99995 / 0.1 sits just under 10, within the guard.
        let q = QuantizedRange::new(0.0, 0.99995, 0.1);
        assert_eq!(q.total_steps(), 10);
        let last = q.value_at(q.total_steps());
        assert!(last <= q.max, "last step {last} past {}", q.max);
        assert_eq!(q.snap(5.0), last);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let q = QuantizedRange::new(0.0, 10.0, 1.0);
        assert_eq!(q.index_of(2.5), 3);
        assert_eq!(q.index_of(2.49), 2);
    }

    #[test]
    fn snap_lands_on_a_step_inside_the_range() {
        let q = QuantizedRange::new(0.1, 3.0, 0.05);
        assert!((q.snap(1.12) - 1.1).abs() < 1e-5);
        assert!((q.snap(9.0) - 3.0).abs() < 1e-5);
        assert!((q.snap(-4.0) - 0.1).abs() < 1e-5);
    }
}
