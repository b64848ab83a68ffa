use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::units::{Height, Width};

/// A plane of opaque per cell values laid over a grid, e.g. markers for a renderer.
/// Zero is the empty value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CellValues {
    dimensions: GridDimensions,
    values: Vec<u32>,
}

impl CellValues {
    pub fn new(width: Width, height: Height) -> Result<CellValues> {
        let dimensions = GridDimensions::new(width, height)?;
        Ok(CellValues {
            dimensions,
            values: vec![0; dimensions.size()],
        })
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    pub fn get(&self, coord: Cartesian2DCoordinate) -> Result<u32> {
        let index = self.dimensions.checked_index(coord)?;
        Ok(self.values[index])
    }

    pub fn set(&mut self, coord: Cartesian2DCoordinate, value: u32) -> Result<()> {
        let index = self.dimensions.checked_index(coord)?;
        self.values[index] = value;
        Ok(())
    }
}

/// Prints the plane with row labels, (0,0) in the lower left.
impl fmt::Display for CellValues {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Width(width) = self.dimensions.width();
        let Height(height) = self.dimensions.height();
        let label_width = height.to_string().len();
        for y in (0..height).rev() {
            write!(f, "{:>w$}: |", y, w = label_width)?;
            for value in &self.values[y * width..(y + 1) * width] {
                write!(f, "{:>3} ", value)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn set_and_get() {
        let mut v = CellValues::new(Width(3), Height(2)).unwrap();
        let c = Cartesian2DCoordinate::new(2, 1);
        assert_eq!(v.get(c).unwrap(), 0);
        v.set(c, 4).unwrap();
        assert_eq!(v.get(c).unwrap(), 4);
        assert!(v.set(Cartesian2DCoordinate::new(3, 1), 1).is_err());
        assert!(v.get(Cartesian2DCoordinate::new(0, 2)).is_err());
    }

    #[test]
    fn display_rows_top_down() {
        let mut v = CellValues::new(Width(2), Height(2)).unwrap();
        v.set(Cartesian2DCoordinate::new(1, 1), 7).unwrap();
        assert_eq!(format!("{}", v), "1: |  0   7 |\n0: |  0   0 |\n");
    }
}
