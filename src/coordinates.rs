use smallvec::SmallVec;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

use itertools::Itertools;

/// Inline storage for up to 4 axes, the common case. Higher dimensional coordinates spill to the heap.
pub type ComponentsSmallVec = SmallVec<[usize; 4]>;

/// A cell position: one non-negative component per grid axis.
/// Component 0 is the `x` axis, component 1 the `y` axis.
#[derive(Hash, Eq, PartialEq, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate(ComponentsSmallVec);

pub type CoordinateSmallVec = SmallVec<[Coordinate; 8]>;

impl Coordinate {
    pub fn new(components: &[usize]) -> Coordinate {
        Coordinate(components.iter().cloned().collect())
    }

    /// The all zeros coordinate of a grid with `dimensions_count` axes.
    pub fn origin(dimensions_count: usize) -> Coordinate {
        Coordinate(SmallVec::from_elem(0, dimensions_count))
    }

    #[inline]
    pub fn dimensions_count(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn x(&self) -> Option<usize> {
        self.0.get(0).cloned()
    }

    #[inline]
    pub fn y(&self) -> Option<usize> {
        self.0.get(1).cloned()
    }
}

impl Deref for Coordinate {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl FromIterator<usize> for Coordinate {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Coordinate(iter.into_iter().collect())
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from(x_y_pair: (usize, usize)) -> Coordinate {
        Coordinate::new(&[x_y_pair.0, x_y_pair.1])
    }
}

impl<'a> From<&'a [usize]> for Coordinate {
    fn from(components: &'a [usize]) -> Coordinate {
        Coordinate::new(components)
    }
}

impl From<Vec<usize>> for Coordinate {
    fn from(components: Vec<usize>) -> Coordinate {
        Coordinate(SmallVec::from_vec(components))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_has_requested_arity() {
        let origin = Coordinate::origin(5);
        assert_eq!(origin.dimensions_count(), 5);
        assert!(origin.iter().all(|&c| c == 0));
    }

    #[test]
    fn two_dimensional_accessors() {
        let c = Coordinate::from((3, 7));
        assert_eq!(c.x(), Some(3));
        assert_eq!(c.y(), Some(7));
        assert_eq!(Coordinate::new(&[4]).y(), None);
    }

    #[test]
    fn conversions_agree() {
        let from_vec = Coordinate::from(vec![1, 2, 3]);
        let from_slice = Coordinate::from(&[1usize, 2, 3][..]);
        let collected: Coordinate = (1..4).collect();
        assert_eq!(from_vec, from_slice);
        assert_eq!(from_vec, collected);
    }

    #[test]
    fn displays_as_tuple() {
        assert_eq!(Coordinate::new(&[0, 10, 2]).to_string(), "(0, 10, 2)");
    }

    #[test]
    fn orders_lexicographically() {
        let mut coords = vec![Coordinate::from((1, 0)), Coordinate::from((0, 1)), Coordinate::from((0, 0))];
        coords.sort();
        assert_eq!(coords,
                   vec![Coordinate::from((0, 0)), Coordinate::from((0, 1)), Coordinate::from((1, 0))]);
    }
}
