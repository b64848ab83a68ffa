//! Coordinate arithmetic on the hex grid: adjacency direction, hex distance and line of sight.
//!
//! None of these look at a grid's masks. The free functions work on bare coordinates;
//! `HexGeometry` adds bounds validation against a grid's dimensions.

use std::cmp;

use crate::cells::{Cartesian2DCoordinate, HexCell, HexDirection};
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;

#[inline]
fn deltas(from: Cartesian2DCoordinate, to: Cartesian2DCoordinate) -> (i64, i64) {
    (i64::from(to.x) - i64::from(from.x), i64::from(to.y) - i64::from(from.y))
}

/// The direction from one cell to an adjacent cell.
///
/// Fails with `InvalidInput` if the cells are not adjacent (including a cell and itself).
pub fn neighbour_direction(from: Cartesian2DCoordinate,
                           to: Cartesian2DCoordinate)
                           -> Result<HexDirection> {
    let (dx, dy) = deltas(from, to);
    HexDirection::from_offset(dx, dy).ok_or_else(|| ErrorKind::InvalidInput(from, to).into())
}

/// Distance in hexes between two cells.
///
/// Moving along both axes in the same sense is a single diagonal step (north or south), so
/// same signed deltas cost the larger of the two; otherwise each axis is walked separately.
pub fn distance(from: Cartesian2DCoordinate, to: Cartesian2DCoordinate) -> u64 {
    let (dx, dy) = deltas(from, to);
    let (adx, ady) = (dx.abs() as u64, dy.abs() as u64);
    if dx.signum() == dy.signum() {
        cmp::max(adx, ady)
    } else {
        adx + ady
    }
}

/// The cells seen on the way from `from` to `to`, both ends included.
///
/// An integer error accumulator steps along the x axis and takes a y step whenever the error
/// overflows, inserting the extra cell needed to stay adjacent when the two axes move in
/// opposite senses. Consecutive cells of the result are always adjacent and the path holds
/// `distance(from, to) + 1` cells.
///
/// Only lines whose x extent is at least their y extent can be traced. Anything steeper fails
/// with `PathDivergence`, as does any trace that has not arrived within `|dx| + |dy|` steps.
pub fn line_of_sight(from: Cartesian2DCoordinate,
                     to: Cartesian2DCoordinate)
                     -> Result<Vec<Cartesian2DCoordinate>> {
    let (dx, dy) = deltas(from, to);
    if dy.abs() > dx.abs() {
        bail!(ErrorKind::PathDivergence(from, to, 0));
    }

    let (x_step, y_step) = (dx.signum(), dy.signum());
    let same_sense = x_step == y_step;
    let run = dx.abs() * 2;
    let rise = dy.abs() * 2;
    let max_steps = (dx.abs() + dy.abs()) as usize;

    let coord = |x: i64, y: i64| Cartesian2DCoordinate::new(x as u32, y as u32);
    let (target_x, target_y) = (i64::from(to.x), i64::from(to.y));
    let (mut x, mut y) = (i64::from(from.x), i64::from(from.y));
    let mut error = run / 2;
    let mut steps = 0;

    let mut path = Vec::with_capacity(max_steps + 1);
    path.push(from);

    while x != target_x || y != target_y {
        if steps == max_steps {
            bail!(ErrorKind::PathDivergence(from, to, steps));
        }
        steps += 1;

        error += rise;
        if error >= run {
            error -= run;
            x += x_step;
            if !same_sense {
                path.push(coord(x, y));
            }
            y += y_step;
        } else {
            x += x_step;
        }
        path.push(coord(x, y));
    }

    trace!("line of sight {:?} -> {:?} in {} steps", from, to, steps);
    Ok(path)
}

/// The geometry functions validated against the dimensions of a hex grid.
#[derive(Debug, Copy, Clone)]
pub struct HexGeometry {
    dimensions: GridDimensions,
}

impl HexGeometry {
    pub fn new(dimensions: GridDimensions) -> HexGeometry {
        HexGeometry { dimensions }
    }

    pub fn for_grid(grid: &Grid<HexCell>) -> HexGeometry {
        HexGeometry::new(*grid.dimensions())
    }

    fn check(&self, from: Cartesian2DCoordinate, to: Cartesian2DCoordinate) -> Result<()> {
        self.dimensions.check_coordinate(from)?;
        self.dimensions.check_coordinate(to)
    }

    pub fn direction(&self,
                     from: Cartesian2DCoordinate,
                     to: Cartesian2DCoordinate)
                     -> Result<HexDirection> {
        self.check(from, to)?;
        neighbour_direction(from, to)
    }

    pub fn distance(&self, from: Cartesian2DCoordinate, to: Cartesian2DCoordinate) -> Result<u64> {
        self.check(from, to)?;
        Ok(distance(from, to))
    }

    pub fn line_of_sight(&self,
                         from: Cartesian2DCoordinate,
                         to: Cartesian2DCoordinate)
                         -> Result<Vec<Cartesian2DCoordinate>> {
        self.check(from, to)?;
        line_of_sight(from, to)
    }
}
