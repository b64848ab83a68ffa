use bitflags::Flags;
use smallvec::SmallVec;
use std::convert::From;
use std::fmt::Debug;
use std::hash::Hash;

use crate::masks::{HexBorders, RectPassages};
use crate::units::{ColumnIndex, RowIndex, Width};

/// Everything a grid needs to know about one cell topology: how directions offset a
/// coordinate and how a direction reads and writes the cell's mask.
pub trait Cell {
    type Direction: Eq + PartialEq + Hash + Copy + Clone + Debug + 'static;
    type Mask: Flags + Eq + PartialEq + Copy + Clone + Debug;

    /// The directions away from a cell in their fixed enumeration order.
    ///
    /// Generators consume neighbour lists built in this order, so changing it changes
    /// every seeded maze.
    fn offset_directions() -> &'static [Self::Direction];

    /// The (dx, dy) step one cell away in the given direction.
    fn offset(dir: Self::Direction) -> (i64, i64);

    fn opposite(dir: Self::Direction) -> Self::Direction;

    /// Is there a passage out of a cell with this mask in the given direction?
    fn is_open(mask: Self::Mask, dir: Self::Direction) -> bool;

    fn open(mask: &mut Self::Mask, dir: Self::Direction);

    fn close(mask: &mut Self::Mask, dir: Self::Direction);

    /// Does a passage entering a cell with this mask while travelling in `dir` run underneath
    /// it and come out on the far side?
    fn passes_under(_mask: Self::Mask, _dir: Self::Direction) -> bool {
        false
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable.
    fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: Self::Direction)
                         -> Option<Cartesian2DCoordinate> {
        let (dx, dy) = Self::offset(dir);
        let x = i64::from(coord.x) + dx;
        let y = i64::from(coord.y) + dy;
        if x < 0 || y < 0 || x > i64::from(u32::max_value()) || y > i64::from(u32::max_value()) {
            None
        } else {
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        }
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 6]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> Cartesian2DCoordinate {
        let Width(w) = width;
        Cartesian2DCoordinate::new((index % w) as u32, (index / w) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

// Hex cells are stored in a rectangular array and sheared into hexes for display.
// The neighbours of the cell at (x, y) are:
//
//               N (x+1, y+1)
//    NW (x, y+1)            NE (x+1, y)
//    SW (x-1, y)            SE (x, y-1)
//               S (x-1, y-1)
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum HexDirection {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

pub const HEX_DIRECTIONS: [HexDirection; 6] = [HexDirection::North,
                                               HexDirection::NorthEast,
                                               HexDirection::SouthEast,
                                               HexDirection::South,
                                               HexDirection::SouthWest,
                                               HexDirection::NorthWest];

impl HexDirection {
    pub fn opposite(self) -> HexDirection {
        match self {
            HexDirection::North => HexDirection::South,
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::SouthEast => HexDirection::NorthWest,
            HexDirection::South => HexDirection::North,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::NorthWest => HexDirection::SouthEast,
        }
    }

    pub fn offset(self) -> (i64, i64) {
        match self {
            HexDirection::North => (1, 1),
            HexDirection::NorthEast => (1, 0),
            HexDirection::SouthEast => (0, -1),
            HexDirection::South => (-1, -1),
            HexDirection::SouthWest => (-1, 0),
            HexDirection::NorthWest => (0, 1),
        }
    }

    /// The direction whose offset is exactly (dx, dy), if any.
    pub fn from_offset(dx: i64, dy: i64) -> Option<HexDirection> {
        HEX_DIRECTIONS.iter().cloned().find(|dir| dir.offset() == (dx, dy))
    }
}

impl From<HexDirection> for HexBorders {
    fn from(dir: HexDirection) -> HexBorders {
        match dir {
            HexDirection::North => HexBorders::NORTH,
            HexDirection::NorthEast => HexBorders::NORTH_EAST,
            HexDirection::SouthEast => HexBorders::SOUTH_EAST,
            HexDirection::South => HexBorders::SOUTH,
            HexDirection::SouthWest => HexBorders::SOUTH_WEST,
            HexDirection::NorthWest => HexBorders::NORTH_WEST,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const COMPASS_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                     CompassPrimary::South,
                                                     CompassPrimary::East,
                                                     CompassPrimary::West];

impl CompassPrimary {
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    pub fn offset(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }
}

impl From<CompassPrimary> for RectPassages {
    fn from(dir: CompassPrimary) -> RectPassages {
        match dir {
            CompassPrimary::North => RectPassages::NORTH,
            CompassPrimary::South => RectPassages::SOUTH,
            CompassPrimary::East => RectPassages::EAST,
            CompassPrimary::West => RectPassages::WEST,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct HexCell;

impl Cell for HexCell {
    type Direction = HexDirection;
    type Mask = HexBorders;

    fn offset_directions() -> &'static [HexDirection] {
        &HEX_DIRECTIONS
    }

    #[inline]
    fn offset(dir: HexDirection) -> (i64, i64) {
        dir.offset()
    }

    #[inline]
    fn opposite(dir: HexDirection) -> HexDirection {
        dir.opposite()
    }

    // A set bit is a wall.
    #[inline]
    fn is_open(mask: HexBorders, dir: HexDirection) -> bool {
        !mask.contains(HexBorders::from(dir))
    }

    #[inline]
    fn open(mask: &mut HexBorders, dir: HexDirection) {
        mask.remove(HexBorders::from(dir));
    }

    #[inline]
    fn close(mask: &mut HexBorders, dir: HexDirection) {
        mask.insert(HexBorders::from(dir));
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SquareCell;

impl Cell for SquareCell {
    type Direction = CompassPrimary;
    type Mask = RectPassages;

    fn offset_directions() -> &'static [CompassPrimary] {
        &COMPASS_DIRECTIONS
    }

    #[inline]
    fn offset(dir: CompassPrimary) -> (i64, i64) {
        dir.offset()
    }

    #[inline]
    fn opposite(dir: CompassPrimary) -> CompassPrimary {
        dir.opposite()
    }

    #[inline]
    fn is_open(mask: RectPassages, dir: CompassPrimary) -> bool {
        mask.contains(RectPassages::from(dir))
    }

    #[inline]
    fn open(mask: &mut RectPassages, dir: CompassPrimary) {
        mask.insert(RectPassages::from(dir));
    }

    #[inline]
    fn close(mask: &mut RectPassages, dir: CompassPrimary) {
        mask.remove(RectPassages::from(dir));
    }

    fn passes_under(mask: RectPassages, dir: CompassPrimary) -> bool {
        mask.is_tunnel() && !mask.contains(RectPassages::from(dir))
    }
}
