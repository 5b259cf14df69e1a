/// Float values closer than this to their original count as unchanged.
pub const FLOAT_TOLERANCE: f32 = 0.001;

/// Numeric types a [`Param`] can hold.
pub trait ParamValue: Copy + PartialOrd + std::fmt::Debug {
    const LOWEST: Self;
    const HIGHEST: Self;

    /// Whether `self` has diverged from `original` enough to count as an edit.
    fn differs_from(self, original: Self) -> bool;

    fn clamp_to(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

impl ParamValue for f32 {
    const LOWEST: Self = f32::MIN;
    const HIGHEST: Self = f32::MAX;

    fn differs_from(self, original: Self) -> bool {
        (self - original).abs() > FLOAT_TOLERANCE
    }
}

impl ParamValue for i32 {
    const LOWEST: Self = i32::MIN;
    const HIGHEST: Self = i32::MAX;

    fn differs_from(self, original: Self) -> bool {
        self != original
    }
}

/// A numeric setting that remembers the value it was opened with.
///
/// `changed` is kept in sync on every mutation, so menus can grey out the
/// reset button without comparing values themselves. Out-of-range input is
/// clamped rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Param<T: ParamValue> {
    original: T,
    current: T,
    min: T,
    max: T,
    changed: bool,
}

impl<T: ParamValue> Param<T> {
    pub fn new(value: T) -> Self {
        Self {
            original: value,
            current: value,
            min: T::LOWEST,
            max: T::HIGHEST,
            changed: false,
        }
    }

    pub fn with_range(mut self, min: T, max: T) -> Self {
        self.set_range(min, max);
        self
    }

    pub fn value(&self) -> T {
        self.current
    }

    pub fn original(&self) -> T {
        self.original
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Replaces the legal range. A current value that falls outside the new
    /// bounds is pulled back in before anyone gets to display it.
    pub fn set_range(&mut self, min: T, max: T) {
        self.min = min;
        self.max = max;
        if self.current < min || self.current > max {
            self.current = self.current.clamp_to(min, max);
            self.refresh_changed();
        }
    }

    pub fn set_value(&mut self, value: T) {
        self.current = value.clamp_to(self.min, self.max);
        self.refresh_changed();
    }

    pub fn reset(&mut self) {
        self.current = self.original;
        self.changed = false;
    }

    fn refresh_changed(&mut self) {
        self.changed = self.current.differs_from(self.original);

        // Within tolerance: snap back so the next save writes the exact original.
        if !self.changed && self.original >= self.min && self.original <= self.max {
            self.current = self.original;
        }
    }
}
