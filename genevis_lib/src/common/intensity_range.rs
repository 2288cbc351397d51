use std::ops::{Range, RangeFrom, RangeTo};

/// Half-open interval of sample intensities, `low <= v < high`.
///
/// Transfer function profiles use it to declare the part of the
/// intensity axis they apply to.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct IntensityRange {
    /// Lower bound, inclusive
    pub low: f32,
    /// Upper bound, exclusive
    pub high: f32,
}

impl IntensityRange {
    pub fn new(low: f32, high: f32) -> IntensityRange {
        IntensityRange { low, high }
    }

    /// Every intensity
    pub fn all() -> IntensityRange {
        IntensityRange {
            low: f32::NEG_INFINITY,
            high: f32::INFINITY,
        }
    }

    /// Intensities strictly below `threshold`
    pub fn below(threshold: f32) -> IntensityRange {
        (..threshold).into()
    }

    /// Intensities equal or above `threshold`
    pub fn at_least(threshold: f32) -> IntensityRange {
        (threshold..).into()
    }

    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val < self.high
    }

    pub fn is_empty(&self) -> bool {
        !(self.low < self.high)
    }

    /// Common part of two ranges, may be empty
    pub fn intersection(&self, other: &IntensityRange) -> IntensityRange {
        IntensityRange {
            low: f32::max(self.low, other.low),
            high: f32::min(self.high, other.high),
        }
    }

    pub fn overlaps(&self, other: &IntensityRange) -> bool {
        !self.intersection(other).is_empty()
    }
}

impl Default for IntensityRange {
    fn default() -> Self {
        Self::all()
    }
}

/// ```
/// # use genevis_lib::common::IntensityRange;
/// let range: IntensityRange = (0.0..256.0).into();
/// assert!(range.contains(255.5));
/// ```
impl From<Range<f32>> for IntensityRange {
    fn from(range: Range<f32>) -> Self {
        IntensityRange::new(range.start, range.end)
    }
}

impl From<RangeTo<f32>> for IntensityRange {
    fn from(range: RangeTo<f32>) -> Self {
        IntensityRange::new(f32::NEG_INFINITY, range.end)
    }
}

impl From<RangeFrom<f32>> for IntensityRange {
    fn from(range: RangeFrom<f32>) -> Self {
        IntensityRange::new(range.start, f32::INFINITY)
    }
}
