use std::fmt;

use crate::coordinates::Coordinate;
use crate::directions::CompassPrimary;
use crate::grid::MazeGrid;

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";
const CELL_BODY: &str = "   ";

/// Box drawing text rendering of a 2D maze. `x` runs left to right, `y` top to bottom.
#[derive(Debug)]
pub struct TextView<'a> {
    grid: &'a MazeGrid,
}

impl<'a> TextView<'a> {
    /// None unless the grid is two dimensional.
    pub fn new(grid: &'a MazeGrid) -> Option<TextView<'a>> {
        if grid.dimensions_count() == 2 {
            Some(TextView { grid })
        } else {
            None
        }
    }

    fn width(&self) -> usize {
        self.grid.axis_lengths()[0]
    }

    fn height(&self) -> usize {
        self.grid.axis_lengths()[1]
    }

    /// Is there a wall on the `compass` side of the cell at (x, y)? Cells outside the grid have
    /// no walls; the grid boundary is always walled.
    fn wall(&self, x: usize, y: usize, compass: CompassPrimary) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        !self.grid.is_neighbour_linked(&Coordinate::from((x, y)), compass)
    }

    /// The glyph where the wall segments west, east, north and south of a grid corner meet.
    fn corner(left: bool, right: bool, up: bool, down: bool) -> &'static str {
        match (left, right, up, down) {
            (true, true, true, true) => WALL_LRUD,
            (true, true, true, false) => WALL_LRU,
            (true, true, false, true) => WALL_LRD,
            (true, false, true, true) => WALL_LUD,
            (false, true, true, true) => WALL_RUD,
            (true, true, false, false) => WALL_LR,
            (false, false, true, true) => WALL_UD,
            (false, true, true, false) => WALL_RU,
            (true, false, false, true) => WALL_LD,
            (true, false, true, false) => WALL_LU,
            (false, true, false, true) => WALL_RD,
            (true, false, false, false) => WALL_L,
            (false, true, false, false) => WALL_R,
            (false, false, true, false) => WALL_U,
            (false, false, false, true) => WALL_D,
            (false, false, false, false) => " ",
        }
    }

    /// Corner below and right of cell (x, y).
    fn south_east_corner(&self, x: usize, y: usize) -> &'static str {
        let left = self.wall(x, y, CompassPrimary::South);
        let up = self.wall(x, y, CompassPrimary::East);
        let right = self.wall(x + 1, y, CompassPrimary::South);
        let down = self.wall(x, y + 1, CompassPrimary::East);
        TextView::corner(left, right, up, down)
    }
}

impl<'a> fmt::Display for TextView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (width, height) = (self.width(), self.height());

        // North boundary: corners sit on top of each cell's east wall.
        let mut output = String::from(WALL_RD);
        for x in 0..width {
            output.push_str(WALL_LR_3);
            let right = x + 1 < width;
            let down = self.wall(x, 0, CompassPrimary::East);
            output.push_str(TextView::corner(true, right, false, down));
        }
        output.push('\n');

        for row in self.grid.iter_row() {
            let y = match row.first().and_then(Coordinate::y) {
                Some(y) => y,
                None => continue,
            };
            let mut middle_section = String::from(WALL_UD);
            let west_down = y + 1 < height;
            let west_right = self.wall(0, y, CompassPrimary::South);
            let mut bottom_section = String::from(TextView::corner(false, west_right, true, west_down));

            for x in row.iter().filter_map(Coordinate::x) {
                // Each cell uses the southern wall of the cell above as its northern wall.
                middle_section.push_str(CELL_BODY);
                middle_section.push_str(if self.wall(x, y, CompassPrimary::East) { WALL_UD } else { " " });

                bottom_section.push_str(if self.wall(x, y, CompassPrimary::South) { WALL_LR_3 } else { CELL_BODY });
                bottom_section.push_str(self.south_east_corner(x, y));
            }

            output.push_str(&middle_section);
            output.push('\n');
            output.push_str(&bottom_section);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::Direction;

    fn grid(lengths: &[usize]) -> MazeGrid {
        MazeGrid::new(lengths).expect("valid grid shape")
    }

    #[test]
    fn only_two_dimensional_grids() {
        assert!(TextView::new(&grid(&[3])).is_none());
        assert!(TextView::new(&grid(&[3, 3, 3])).is_none());
        assert!(TextView::new(&grid(&[3, 3])).is_some());
    }

    #[test]
    fn closed_single_cell() {
        let g = grid(&[1, 1]);
        let text = TextView::new(&g).unwrap().to_string();
        assert_eq!(text, "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn two_by_one_open_passage() {
        let mut g = grid(&[2, 1]);
        g.connect(&Coordinate::from((0, 0)), &CompassPrimary::East.direction()).expect("link failed");
        let text = TextView::new(&g).unwrap().to_string();
        assert_eq!(text, "┌───────┐\n│       │\n└───────┘\n");
    }

    #[test]
    fn two_by_one_walled() {
        let g = grid(&[2, 1]);
        let text = TextView::new(&g).unwrap().to_string();
        assert_eq!(text, "┌───┬───┐\n│   │   │\n└───┴───┘\n");
    }

    #[test]
    fn vertical_passage() {
        let mut g = grid(&[1, 2]);
        g.connect(&Coordinate::from((0, 0)), &Direction::forward(1, 2)).expect("link failed");
        let text = TextView::new(&g).unwrap().to_string();
        assert_eq!(text, "┌───┐\n│   │\n│   │\n│   │\n└───┘\n");
    }

    #[test]
    fn line_count_matches_height() {
        let g = grid(&[5, 4]);
        let text = TextView::new(&g).unwrap().to_string();
        assert_eq!(text.lines().count(), 1 + 2 * 4);
        assert!(text.lines().all(|line| line.chars().count() == 1 + 4 * 5));
    }
}
