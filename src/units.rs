#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct AxisLength(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct DimensionsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);

/// Upper bound on the number of cells carved in one Hunt-and-Kill carve phase.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MaxDepth(pub usize);
