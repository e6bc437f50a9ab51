use smallvec::SmallVec;
use std::fmt;
use std::iter;

/// Per cell connectivity bitfield, one bit per (axis, sign) pair.
///
/// Forward on axis `a` is bit `a`, backward on axis `a` is bit `D + a`. For a 2D grid that
/// is the familiar 1 = east, 2 = south, 4 = west, 8 = north encoding.
pub type Mask = u64;

/// The widest grid a `Mask` can describe: 2 bits per axis.
pub const MAX_DIMENSIONS: usize = 32;

/// Movement along one axis.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Step {
    None,
    Forward,
    Backward,
}

impl Step {
    #[inline]
    pub fn inverse(self) -> Step {
        match self {
            Step::None => Step::None,
            Step::Forward => Step::Backward,
            Step::Backward => Step::Forward,
        }
    }

    /// Apply the step to one coordinate component.
    /// Returns None if the component would go below zero.
    #[inline]
    pub fn offset(self, component: usize) -> Option<usize> {
        match self {
            Step::None => Some(component),
            Step::Forward => component.checked_add(1),
            Step::Backward => component.checked_sub(1),
        }
    }
}

pub type StepsSmallVec = SmallVec<[Step; 4]>;
pub type DirectionSmallVec = SmallVec<[Direction; 8]>;

/// A move vector with one `Step` per grid axis.
///
/// Any tuple of steps can be represented, but only single axis moves name an edge of the grid.
/// See `axis_step`.
#[derive(Eq, PartialEq, Clone, Debug, Hash)]
pub struct Direction(StepsSmallVec);

impl Direction {
    pub fn new(steps: &[Step]) -> Direction {
        Direction(steps.iter().cloned().collect())
    }

    /// One step forwards along `axis` in a grid of `dimensions_count` axes.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= dimensions_count`.
    pub fn forward(axis: usize, dimensions_count: usize) -> Direction {
        Direction::single_axis(axis, Step::Forward, dimensions_count)
    }

    /// One step backwards along `axis` in a grid of `dimensions_count` axes.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= dimensions_count`.
    pub fn backward(axis: usize, dimensions_count: usize) -> Direction {
        Direction::single_axis(axis, Step::Backward, dimensions_count)
    }

    fn single_axis(axis: usize, step: Step, dimensions_count: usize) -> Direction {
        assert!(axis < dimensions_count,
                "axis {} does not exist in a grid of {} axes", axis, dimensions_count);
        let mut steps = StepsSmallVec::from_elem(Step::None, dimensions_count);
        steps[axis] = step;
        Direction(steps)
    }

    /// Every single axis move for a grid of `dimensions_count` axes, in axis order with the forward
    /// move before the backward move.
    pub fn all(dimensions_count: usize) -> DirectionSmallVec {
        (0..dimensions_count)
            .flat_map(|axis| {
                iter::once(Direction::forward(axis, dimensions_count))
                    .chain(iter::once(Direction::backward(axis, dimensions_count)))
            })
            .collect()
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    #[inline]
    pub fn dimensions_count(&self) -> usize {
        self.0.len()
    }

    pub fn inverse(&self) -> Direction {
        Direction(self.0.iter().map(|s| s.inverse()).collect())
    }

    /// The moving axis and its step when exactly one axis moves.
    pub fn axis_step(&self) -> Option<(usize, Step)> {
        let mut moving = self.0
            .iter()
            .enumerate()
            .filter(|&(_, step)| *step != Step::None);
        match (moving.next(), moving.next()) {
            (Some((axis, step)), None) => Some((axis, *step)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.0.iter().all(|s| *s == Step::None)
    }

    /// The connectivity bit of a single axis direction.
    pub fn bit(&self) -> Option<Mask> {
        self.axis_step().and_then(|(axis, step)| axis_bit(axis, step, self.dimensions_count()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for step in &self.0 {
            let glyph = match *step {
                Step::None => '0',
                Step::Forward => '+',
                Step::Backward => '-',
            };
            write!(f, "{}", glyph)?;
        }
        Ok(())
    }
}

/// Mask bit for a move along `axis`. None for `Step::None` or an axis beyond the mask width.
#[inline]
pub fn axis_bit(axis: usize, step: Step, dimensions_count: usize) -> Option<Mask> {
    if axis >= dimensions_count || dimensions_count > MAX_DIMENSIONS {
        return None;
    }
    match step {
        Step::None => None,
        Step::Forward => Some(1 << axis),
        Step::Backward => Some(1 << (dimensions_count + axis)),
    }
}

/// The four moves of a 2D grid. `x` grows eastwards, `y` grows southwards.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    East,
    South,
    West,
    North,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::North];

    #[inline]
    pub fn bit(self) -> Mask {
        match self {
            CompassPrimary::East => 1,
            CompassPrimary::South => 2,
            CompassPrimary::West => 4,
            CompassPrimary::North => 8,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            CompassPrimary::East => Direction::forward(0, 2),
            CompassPrimary::South => Direction::forward(1, 2),
            CompassPrimary::West => Direction::backward(0, 2),
            CompassPrimary::North => Direction::backward(1, 2),
        }
    }
}
