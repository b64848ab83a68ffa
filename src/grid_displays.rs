//! Plain text renderings of the mazes.
//!
//! Hex mazes are drawn sheared so that the hexes tile on a character grid, with (0,0) at the lower
//! left and the value plane's markers inside each hex. Weave mazes are drawn with box drawing
//! tiles, three characters wide and two lines high per cell, row 0 at the top.

use std::fmt;

use bitflags::Flags;
use itertools::Itertools;

use crate::cells::{Cartesian2DCoordinate, Cell};
use crate::grid::Grid;
use crate::grids::{HexGrid, RectGrid};
use crate::masks::{HexBorders, RectPassages};
use crate::units::{Height, Width};
use crate::values::CellValues;

pub const EMPTY: u32 = 0;
pub const PLAYER: u32 = 1;
pub const ENEMY: u32 = 2;
pub const SHELL: u32 = 4;

fn value_glyph(value: u32) -> String {
    match value {
        EMPTY => String::from("  "),
        PLAYER => String::from("/\\"),
        ENEMY => String::from("}{"),
        SHELL => String::from("<>"),
        other if other < 100 => format!("{:>2}", other),
        // no room for more digits inside a hex
        _ => String::from("##"),
    }
}

/// A hex maze with an optional value plane drawn into the cells.
///
/// A single walled hex with no value renders as
///
/// ```text
///  __
/// /  \
/// \__/
/// ```
#[derive(Debug, Copy, Clone)]
pub struct HexTextDisplay<'a> {
    grid: &'a HexGrid,
    values: Option<&'a CellValues>,
}

impl<'a> HexTextDisplay<'a> {
    pub fn new(grid: &'a HexGrid) -> HexTextDisplay<'a> {
        HexTextDisplay { grid, values: None }
    }

    /// Values for coordinates outside of the plane are drawn empty.
    pub fn with_values(mut self, values: &'a CellValues) -> Self {
        self.values = Some(values);
        self
    }

    fn value(&self, coord: Cartesian2DCoordinate) -> u32 {
        self.values.and_then(|v| v.get(coord).ok()).unwrap_or(EMPTY)
    }

    /// The character screen, bottom line first.
    fn screen(&self) -> Vec<Vec<char>> {
        let Width(width) = self.grid.width();
        let Height(height) = self.grid.height();
        // one extra line for the north walls of the top cell
        let screen_height = width + height + 1;
        let screen_width = width * 3 + (height - 1) * 3 + 1;
        let horizontal_offset = height * 3 - 3;
        let mut screen = vec![vec![' '; screen_width]; screen_height];

        let put = |line: &mut Vec<char>, at: usize, text: &str| {
            for (i, c) in text.chars().enumerate() {
                line[at + i] = c;
            }
        };

        for coord in self.grid.iter() {
            let (x, y) = (coord.x as usize, coord.y as usize);
            let sx = horizontal_offset + 3 * x - 3 * y;
            let sy = x + y;
            let walls = self.grid
                .get(coord)
                .map(HexBorders::sides)
                .unwrap_or_else(|_| HexBorders::empty());

            if walls.contains(HexBorders::SOUTH_WEST) {
                put(&mut screen[sy], sx, "\\");
            }
            if walls.contains(HexBorders::SOUTH) {
                put(&mut screen[sy], sx + 1, "__");
            }
            if walls.contains(HexBorders::SOUTH_EAST) {
                put(&mut screen[sy], sx + 3, "/");
            }
            if walls.contains(HexBorders::NORTH_WEST) {
                put(&mut screen[sy + 1], sx, "/");
            }
            put(&mut screen[sy + 1], sx + 1, &value_glyph(self.value(coord)));
            if walls.contains(HexBorders::NORTH_EAST) {
                put(&mut screen[sy + 1], sx + 3, "\\");
            }
            if walls.contains(HexBorders::NORTH) {
                put(&mut screen[sy + 2], sx + 1, "__");
            }
        }
        screen
    }
}

impl<'a> fmt::Display for HexTextDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.screen().iter().rev() {
            let text: String = line.iter().collect();
            writeln!(f, "{}", text.trim_end())?;
        }
        Ok(())
    }
}

const SOLID: [&str; 2] = ["███", "███"];

fn weave_tile(mask: RectPassages) -> [&'static str; 2] {
    const N: u8 = RectPassages::NORTH.bits();
    const S: u8 = RectPassages::SOUTH.bits();
    const E: u8 = RectPassages::EAST.bits();
    const W: u8 = RectPassages::WEST.bits();
    const U: u8 = RectPassages::UNDER.bits();

    match mask.bits() {
        0 => SOLID,
        N => ["│ │", "└─┘"],
        S => ["┌─┐", "│ │"],
        E => ["┌──", "└──"],
        W => ["──┐", "──┘"],
        x if x == N | S => ["│ │", "│ │"],
        x if x == N | W => ["┘ │", "──┘"],
        x if x == N | E => ["│ └", "└──"],
        x if x == S | W => ["──┐", "┐ │"],
        x if x == S | E => ["┌──", "│ ┌"],
        x if x == E | W => ["───", "───"],
        x if x == N | S | E => ["│ └", "│ ┌"],
        x if x == N | S | W => ["┘ │", "┐ │"],
        x if x == E | W | N => ["┘ └", "───"],
        x if x == E | W | S => ["───", "┐ ┌"],
        x if x == N | S | E | W => ["┘ └", "┐ ┌"],
        x if x == N | S | U => ["┤ ├", "┤ ├"],
        x if x == E | W | U => ["┴─┴", "┬─┬"],
        _ => ["???", "???"],
    }
}

/// A weave maze drawn with box drawing tiles, north at the top.
#[derive(Debug, Copy, Clone)]
pub struct WeaveTextDisplay<'a> {
    grid: &'a RectGrid,
}

impl<'a> WeaveTextDisplay<'a> {
    pub fn new(grid: &'a RectGrid) -> WeaveTextDisplay<'a> {
        WeaveTextDisplay { grid }
    }
}

impl<'a> fmt::Display for WeaveTextDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.grid.iter_row() {
            let tiles = row.iter()
                .map(|&coord| self.grid.get(coord).unwrap_or_else(|_| RectPassages::empty()))
                .map(weave_tile)
                .collect::<Vec<_>>();
            for line in 0..2 {
                writeln!(f, "{}", tiles.iter().map(|tile| tile[line]).join(""))?;
            }
        }
        Ok(())
    }
}

/// The raw masks of any grid, one row per line with (0,0) in the lower left.
#[derive(Debug)]
pub struct MaskDump<'a, CellT: Cell> {
    grid: &'a Grid<CellT>,
}

impl<'a, CellT: Cell> MaskDump<'a, CellT> {
    pub fn new(grid: &'a Grid<CellT>) -> MaskDump<'a, CellT> {
        MaskDump { grid }
    }
}

impl<'a, CellT> fmt::Display for MaskDump<'a, CellT>
    where CellT: Cell,
          CellT::Mask: Flags<Bits = u8>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Width(width) = self.grid.width();
        let Height(height) = self.grid.height();
        let label_width = height.to_string().len();
        let masks = self.grid.masks();
        for y in (0..height).rev() {
            let cells = masks[y * width..(y + 1) * width]
                .iter()
                .map(|mask| format!("{:>3}", mask.bits()))
                .join(" ");
            writeln!(f, "{:>w$}: |{} |", y, cells, w = label_width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::{CompassPrimary, HexDirection};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn single_walled_hex() {
        let mut grid = HexGrid::new(Width(1), Height(1)).unwrap();
        grid.set_all(gc(0, 0), HexBorders::ALL_SIDES).unwrap();
        let text = HexTextDisplay::new(&grid).to_string();
        assert_eq!(text, " __\n/  \\\n\\__/\n");
    }

    #[test]
    fn hex_values_are_drawn() {
        let mut grid = HexGrid::new(Width(2), Height(1)).unwrap();
        grid.set_all(gc(0, 0), HexBorders::ALL_SIDES).unwrap();
        grid.set_all(gc(1, 0), HexBorders::ALL_SIDES).unwrap();
        let mut values = CellValues::new(Width(2), Height(1)).unwrap();
        values.set(gc(0, 0), PLAYER).unwrap();
        values.set(gc(1, 0), 9).unwrap();

        let text = HexTextDisplay::new(&grid).with_values(&values).to_string();
        assert_eq!(text, "    __\n __/ 9\\\n//\\\\__/\n\\__/\n");
    }

    #[test]
    fn wide_values_fit_inside_the_hex() {
        let mut grid = HexGrid::new(Width(2), Height(1)).unwrap();
        grid.set_all(gc(0, 0), HexBorders::ALL_SIDES).unwrap();
        grid.set_all(gc(1, 0), HexBorders::ALL_SIDES).unwrap();
        let mut values = CellValues::new(Width(2), Height(1)).unwrap();
        values.set(gc(0, 0), 123).unwrap();

        let text = HexTextDisplay::new(&grid).with_values(&values).to_string();
        assert_eq!(text, "    __\n __/  \\\n/##\\__/\n\\__/\n");
    }

    #[test]
    fn wide_value_at_east_edge() {
        let mut grid = HexGrid::new(Width(2), Height(2)).unwrap();
        for coord in grid.iter() {
            grid.set_all(coord, HexBorders::ALL_SIDES).unwrap();
        }
        let mut values = CellValues::new(Width(2), Height(2)).unwrap();
        values.set(gc(1, 0), 1000).unwrap();

        let text = HexTextDisplay::new(&grid).with_values(&values).to_string();
        assert_eq!(text.matches("##").count(), 1);
        assert!(!text.contains("1000"));
    }

    #[test]
    fn opened_hex_walls_disappear() {
        let mut grid = HexGrid::new(Width(2), Height(1)).unwrap();
        grid.set_all(gc(0, 0), HexBorders::ALL_SIDES).unwrap();
        grid.set_all(gc(1, 0), HexBorders::ALL_SIDES).unwrap();
        grid.set_off(gc(0, 0), HexDirection::NorthEast.into()).unwrap();
        grid.set_off(gc(1, 0), HexDirection::SouthWest.into()).unwrap();

        let text = HexTextDisplay::new(&grid).to_string();
        assert_eq!(text, "    __\n __/  \\\n/   __/\n\\__/\n");
    }

    #[test]
    fn value_glyphs() {
        assert_eq!(value_glyph(EMPTY), "  ");
        assert_eq!(value_glyph(ENEMY), "}{");
        assert_eq!(value_glyph(SHELL), "<>");
        assert_eq!(value_glyph(42), "42");
        assert_eq!(value_glyph(3), " 3");
        assert_eq!(value_glyph(99), "99");
        assert_eq!(value_glyph(100), "##");
        assert_eq!(value_glyph(u32::max_value()), "##");
    }

    #[test]
    fn weave_tiles() {
        let mut grid = RectGrid::new(Width(2), Height(1)).unwrap();
        assert_eq!(WeaveTextDisplay::new(&grid).to_string(), "██████\n██████\n");

        grid.link(gc(0, 0), CompassPrimary::East).unwrap();
        assert_eq!(WeaveTextDisplay::new(&grid).to_string(), "┌────┐\n└────┘\n");
    }

    #[test]
    fn weave_tunnel_tiles() {
        assert_eq!(weave_tile(RectPassages::NORTH_SOUTH_TUNNEL), ["┤ ├", "┤ ├"]);
        assert_eq!(weave_tile(RectPassages::EAST_WEST_TUNNEL), ["┴─┴", "┬─┬"]);
        assert_eq!(weave_tile(RectPassages::all()), ["???", "???"]);
    }

    #[test]
    fn weave_rows_top_down() {
        let mut grid = RectGrid::new(Width(1), Height(2)).unwrap();
        grid.link(gc(0, 0), CompassPrimary::South).unwrap();
        assert_eq!(WeaveTextDisplay::new(&grid).to_string(), "┌─┐\n│ │\n│ │\n└─┘\n");
    }

    #[test]
    fn mask_dump() {
        let mut grid = RectGrid::new(Width(2), Height(2)).unwrap();
        grid.link(gc(0, 1), CompassPrimary::East).unwrap();
        assert_eq!(MaskDump::new(&grid).to_string(), "1: |  4   8 |\n0: |  0   0 |\n");
    }
}
