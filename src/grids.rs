use crate::cells::{HexCell, SquareCell};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{Height, Width};

pub type HexGrid = Grid<HexCell>;
pub type RectGrid = Grid<SquareCell>;

pub fn hex_grid(width: Width, height: Height) -> Result<HexGrid> {
    HexGrid::new(width, height)
}

pub fn rect_grid(width: Width, height: Height) -> Result<RectGrid> {
    RectGrid::new(width, height)
}
