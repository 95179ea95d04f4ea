use std::iter::StepBy;
use std::ops::RangeFrom;
use std::ops::RangeFull;
use std::ops::RangeInclusive;
use std::ops::RangeToInclusive;

use super::Coord;
use crate::GridError;

/// Coordinates covered by a slice, in ascending order.
pub type Positions = StepBy<RangeInclusive<Coord>>;

/// An integer slice over one axis. Unlike Rust ranges, `stop` is inclusive
/// whenever the stepping lands on it.
///
/// Omitted bounds are derived from the receiver's existing children when
/// reading, and from the number of values supplied when assigning.
///
/// ```
/// use gridable::GridSlice;
///
/// assert_eq!(GridSlice::from(5..=6), GridSlice::new(5, 6));
/// assert_eq!(GridSlice::from(3..).step_by(2).step, Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridSlice {
    pub start: Option<Coord>,
    pub stop: Option<Coord>,
    pub step: Option<Coord>,
}

impl GridSlice {
    pub fn new(
        start: Coord,
        stop: Coord,
    ) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    pub fn starting_at(start: Coord) -> Self {
        Self {
            start: Some(start),
            ..Default::default()
        }
    }

    pub fn ending_at(stop: Coord) -> Self {
        Self {
            stop: Some(stop),
            ..Default::default()
        }
    }

    pub fn full() -> Self {
        Self::default()
    }

    pub fn step_by(
        self,
        step: Coord,
    ) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    fn validated_step(&self) -> Result<Coord, GridError> {
        match self.step.unwrap_or(1) {
            step if step > 0 => Ok(step),
            step => Err(GridError::InvalidSliceStep(step)),
        }
    }

    /// Positions to read, with omitted bounds taken from the smallest and
    /// largest existing child keys. With nothing to derive a bound from the
    /// slice is empty.
    pub(crate) fn read_positions(
        &self,
        first_key: Option<Coord>,
        last_key: Option<Coord>,
    ) -> Result<Positions, GridError> {
        let step = self.validated_step()?;
        match (self.start.or(first_key), self.stop.or(last_key)) {
            (Some(start), Some(stop)) => Ok(positions(start, stop, step)),
            _ => Ok(positions(1, 0, step)),
        }
    }

    /// Positions to assign `count` values to. An omitted bound is derived so
    /// that the slice spans exactly `count` steps; the resulting span must
    /// hold exactly `count` positions.
    pub(crate) fn assign_positions(
        &self,
        count: usize,
    ) -> Result<Positions, GridError> {
        let step = self.validated_step()?;
        let span = (count as Coord).saturating_mul(step);
        let (start, stop) = match (self.start, self.stop) {
            (Some(start), Some(stop)) => (start, stop),
            (Some(start), None) => (start, start.saturating_add(span).saturating_sub(1)),
            (None, Some(stop)) => (stop.saturating_sub(span).saturating_add(1), stop),
            (None, None) => (0, span.saturating_sub(1)),
        };

        let expected = position_count(start, stop, step);
        if expected != count as u64 {
            return Err(GridError::InvalidSliceSize {
                expected,
                actual: count as u64,
            });
        }
        Ok(positions(start, stop, step))
    }
}

fn positions(
    start: Coord,
    stop: Coord,
    step: Coord,
) -> Positions {
    (start..=stop).step_by(step as usize)
}

/// Number of positions in `[start, stop]` advancing by `step` (> 0). A span
/// covering every coordinate saturates at `u64::MAX`, which no supplied
/// sequence can match.
pub(crate) fn position_count(
    start: Coord,
    stop: Coord,
    step: Coord,
) -> u64 {
    if stop < start {
        return 0;
    }
    (stop.abs_diff(start) / step as u64).saturating_add(1)
}

impl From<RangeInclusive<Coord>> for GridSlice {
    fn from(range: RangeInclusive<Coord>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

impl From<RangeFrom<Coord>> for GridSlice {
    fn from(range: RangeFrom<Coord>) -> Self {
        Self::starting_at(range.start)
    }
}

impl From<RangeToInclusive<Coord>> for GridSlice {
    fn from(range: RangeToInclusive<Coord>) -> Self {
        Self::ending_at(range.end)
    }
}

impl From<RangeFull> for GridSlice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}
