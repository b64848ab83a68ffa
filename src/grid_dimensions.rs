use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::units::{Height, Width};


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridDimensions {
    width: Width,
    height: Height,
}

impl GridDimensions {
    /// Both sides must be at least one cell long, and addressable by a `u32` coordinate.
    pub fn new(width: Width, height: Height) -> Result<GridDimensions> {
        let (Width(w), Height(h)) = (width, height);
        let max_side = u32::max_value() as usize;
        if w == 0 || h == 0 || w > max_side || h > max_side || w.checked_mul(h).is_none() {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        Ok(GridDimensions { width, height })
    }

    #[inline(always)]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// As `grid_coordinate_to_index` but failing with `OutOfBounds`.
    #[inline]
    pub fn checked_index(&self, coord: Cartesian2DCoordinate) -> Result<usize> {
        self.grid_coordinate_to_index(coord)
            .ok_or_else(|| ErrorKind::OutOfBounds(coord, self.width.0, self.height.0).into())
    }

    #[inline]
    pub fn check_coordinate(&self, coord: Cartesian2DCoordinate) -> Result<()> {
        self.checked_index(coord).map(|_| ())
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::from_row_major_index(index, self.width)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn zero_sides_are_rejected() {
        for &(w, h) in &[(0, 5), (5, 0), (0, 0)] {
            match GridDimensions::new(Width(w), Height(h)) {
                Err(Error(ErrorKind::InvalidDimensions(ew, eh), _)) => assert_eq!((ew, eh), (w, h)),
                other => panic!("expected InvalidDimensions, got {:?}", other),
            }
        }
        assert!(GridDimensions::new(Width(1), Height(1)).is_ok());
    }

    #[test]
    fn sides_beyond_u32_coordinates_are_rejected() {
        if let Some(too_wide) = (u32::max_value() as usize).checked_add(1) {
            for &(w, h) in &[(too_wide, 1), (1, too_wide)] {
                match GridDimensions::new(Width(w), Height(h)) {
                    Err(Error(ErrorKind::InvalidDimensions(ew, eh), _)) => {
                        assert_eq!((ew, eh), (w, h))
                    }
                    other => panic!("expected InvalidDimensions, got {:?}", other),
                }
            }
        }
        assert!(GridDimensions::new(Width(u32::max_value() as usize), Height(1)).is_ok());
    }

    #[test]
    fn grid_coordinate_as_index() {
        let d = GridDimensions::new(Width(3), Height(3)).unwrap();
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| d.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(d.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(u32::max_value(), u32::max_value())), None);
        assert_eq!(d.index_to_grid_coordinate(5), gc(2, 1));
    }

    #[test]
    fn out_of_bounds_error() {
        let d = GridDimensions::new(Width(2), Height(4)).unwrap();
        let bad = Cartesian2DCoordinate::new(2, 0);
        match d.checked_index(bad) {
            Err(Error(ErrorKind::OutOfBounds(c, 2, 4), _)) => assert_eq!(c, bad),
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }
}
