use bitflags::Flags;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use rand::Rng;
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, Cell, CoordinateSmallVec};
use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{Height, Width};

pub type PassageGraph = Graph<Cartesian2DCoordinate, (), Undirected>;

/// A rectangular array of per cell masks for one cell topology.
///
/// The grid knows nothing about how a maze is generated; it offers bounds checked access to the
/// masks and neighbour enumeration in the topology's fixed direction order.
pub struct Grid<CellT: Cell> {
    dimensions: GridDimensions,
    masks: Vec<CellT::Mask>,
}

impl<CellT: Cell> fmt::Debug for Grid<CellT> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, masks: {:?}",
               self.dimensions.width(), self.dimensions.height(), self.masks)
    }
}

impl<CellT: Cell> Clone for Grid<CellT> {
    fn clone(&self) -> Self {
        Grid {
            dimensions: self.dimensions,
            masks: self.masks.clone(),
        }
    }
}

impl<CellT: Cell> PartialEq for Grid<CellT> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.masks == other.masks
    }
}
impl<CellT: Cell> Eq for Grid<CellT> {}

impl<CellT: Cell> Grid<CellT> {
    /// A grid with every mask empty.
    pub fn new(width: Width, height: Height) -> Result<Grid<CellT>> {
        let dimensions = GridDimensions::new(width, height)?;
        Ok(Grid {
            dimensions,
            masks: vec![CellT::Mask::empty(); dimensions.size()],
        })
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.dimensions.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.dimensions.height()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.dimensions.grid_coordinate_to_index(coord)
    }

    #[inline]
    pub fn get(&self, coord: Cartesian2DCoordinate) -> Result<CellT::Mask> {
        let index = self.dimensions.checked_index(coord)?;
        Ok(self.masks[index])
    }

    /// Replace every flag of a cell at once.
    #[inline]
    pub fn set_all(&mut self, coord: Cartesian2DCoordinate, mask: CellT::Mask) -> Result<()> {
        let index = self.dimensions.checked_index(coord)?;
        self.masks[index] = mask;
        Ok(())
    }

    #[inline]
    pub fn set_on(&mut self, coord: Cartesian2DCoordinate, flags: CellT::Mask) -> Result<()> {
        let index = self.dimensions.checked_index(coord)?;
        self.masks[index].insert(flags);
        Ok(())
    }

    #[inline]
    pub fn set_off(&mut self, coord: Cartesian2DCoordinate, flags: CellT::Mask) -> Result<()> {
        let index = self.dimensions.checked_index(coord)?;
        self.masks[index].remove(flags);
        Ok(())
    }

    /// Are all of `flags` set on the cell?
    #[inline]
    pub fn has_flag(&self, coord: Cartesian2DCoordinate, flags: CellT::Mask) -> Result<bool> {
        self.get(coord).map(|mask| mask.contains(flags))
    }

    /// Is there a passage out of the cell in the given direction?
    pub fn is_open(&self, coord: Cartesian2DCoordinate, direction: CellT::Direction) -> Result<bool> {
        self.get(coord).map(|mask| CellT::is_open(mask, direction))
    }

    /// Carve the passage between a cell and its neighbour in `direction`, opening both sides.
    /// Returns the neighbour's coordinate. Fails with `OutOfBounds` naming `coord` when the cell
    /// or its neighbour is outside of the grid.
    pub fn link(&mut self,
                coord: Cartesian2DCoordinate,
                direction: CellT::Direction)
                -> Result<Cartesian2DCoordinate> {
        let index = self.dimensions.checked_index(coord)?;
        let neighbour = match self.neighbour_at_direction(coord, direction) {
            Some(neighbour) => neighbour,
            None => bail!(ErrorKind::OutOfBounds(coord, self.width().0, self.height().0)),
        };
        let neighbour_index = self.dimensions.checked_index(neighbour)?;
        CellT::open(&mut self.masks[index], direction);
        CellT::open(&mut self.masks[neighbour_index], CellT::opposite(direction));
        Ok(neighbour)
    }

    /// Cells that are next to a particular cell, but not necessarily linked by a passage.
    /// Only cells within the grid are returned, in the topology's direction order.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        self.neighbours_with_directions(coord)
            .into_iter()
            .map(|(_, neighbour)| neighbour)
            .collect()
    }

    pub fn neighbours_with_directions(&self,
                                      coord: Cartesian2DCoordinate)
                                      -> SmallVec<[(CellT::Direction, Cartesian2DCoordinate); 6]> {
        CellT::offset_directions()
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir).map(|c| (dir, c)))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CellT::Direction)
                                  -> Option<Cartesian2DCoordinate> {
        CellT::offset_coordinate(coord, direction)
            .and_then(|neighbour| if self.is_valid_coordinate(neighbour) {
                Some(neighbour)
            } else {
                None
            })
    }

    /// The cell a passage leaving `coord` in `direction` arrives at, following it underneath
    /// any tunnel cells on the way.
    pub fn passage_end(&self,
                       coord: Cartesian2DCoordinate,
                       direction: CellT::Direction)
                       -> Option<Cartesian2DCoordinate> {
        let mut end = self.neighbour_at_direction(coord, direction)?;
        while CellT::passes_under(self.masks[self.grid_coordinate_to_index(end)?], direction) {
            end = self.neighbour_at_direction(end, direction)?;
        }
        Some(end)
    }

    /// Cells linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Result<CoordinateSmallVec> {
        let mask = self.get(coord)?;
        Ok(CellT::offset_directions()
            .iter()
            .filter(|&&dir| CellT::is_open(mask, dir))
            .filter_map(|&dir| self.passage_end(coord, dir))
            .collect())
    }

    /// Close every direction that leads off the edge of the grid.
    pub fn seal_boundary(&mut self) {
        for index in 0..self.size() {
            let coord = self.dimensions.index_to_grid_coordinate(index);
            for &dir in CellT::offset_directions() {
                if self.neighbour_at_direction(coord, dir).is_none() {
                    CellT::close(&mut self.masks[index], dir);
                }
            }
        }
    }

    /// A uniformly random cell: the column is drawn before the row.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let x = rng.gen_range(0..self.width().0);
        let y = rng.gen_range(0..self.height().0);
        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.dimensions)
    }

    /// The masks in row-major order.
    #[inline]
    pub fn masks(&self) -> &[CellT::Mask] {
        &self.masks
    }

    /// The maze as a graph: one node per cell, weighted by its coordinate, at its row-major index,
    /// and one edge per passage. A passage running under a tunnel cell joins the cells on either
    /// side of the tunnel.
    pub fn passage_graph(&self) -> PassageGraph {
        let mut graph = Graph::with_capacity(self.size(), self.size());
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }

        for (index, coord) in self.iter().enumerate() {
            let mask = self.masks[index];
            for &dir in CellT::offset_directions() {
                if !CellT::is_open(mask, dir) {
                    continue;
                }
                let end_index = self.passage_end(coord, dir)
                    .and_then(|end| self.grid_coordinate_to_index(end));
                if let Some(end_index) = end_index {
                    if end_index != index {
                        let _ = graph.update_edge(NodeIndex::new(index), NodeIndex::new(end_index), ());
                    }
                }
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::{CompassPrimary, HexCell, HexDirection, SquareCell};
    use crate::masks::{HexBorders, RectPassages};
    use itertools::Itertools;
    use petgraph::algo::connected_components;

    type HexGrid = Grid<HexCell>;
    type RectGrid = Grid<SquareCell>;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn hex_neighbours_in_direction_order() {
        let g = HexGrid::new(Width(5), Height(5)).unwrap();
        assert_eq!(&*g.neighbours(gc(2, 2)),
                   &[gc(3, 3), gc(3, 2), gc(2, 1), gc(1, 1), gc(1, 2), gc(2, 3)]);
        // corners
        assert_eq!(&*g.neighbours(gc(0, 0)), &[gc(1, 1), gc(1, 0), gc(0, 1)]);
        assert_eq!(&*g.neighbours(gc(4, 4)), &[gc(4, 3), gc(3, 3), gc(3, 4)]);
        assert_eq!(&*g.neighbours(gc(4, 0)), &[gc(3, 0), gc(4, 1)]);
    }

    #[test]
    fn rect_neighbours() {
        let g = RectGrid::new(Width(10), Height(10)).unwrap();

        let check_expected_neighbours = |coord, expected_neighbours: &[Cartesian2DCoordinate]| {
            let neighbours: Vec<Cartesian2DCoordinate> =
                g.neighbours(coord).iter().cloned().sorted().collect();
            let expected: Vec<Cartesian2DCoordinate> =
                expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(neighbours, expected);
        };

        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);
        check_expected_neighbours(gc(0, 8), &[gc(1, 8), gc(0, 7), gc(0, 9)]);
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
        assert_eq!(&*g.neighbours(gc(1, 1)), &[gc(1, 0), gc(1, 2), gc(2, 1), gc(0, 1)]);
    }

    #[test]
    fn flags_on_and_off_are_idempotent() {
        let mut g = HexGrid::new(Width(3), Height(2)).unwrap();
        let c = gc(2, 1);
        g.set_on(c, HexBorders::NORTH).unwrap();
        g.set_on(c, HexBorders::NORTH).unwrap();
        assert_eq!(g.get(c).unwrap(), HexBorders::NORTH);
        assert!(g.has_flag(c, HexBorders::NORTH).unwrap());
        g.set_off(c, HexBorders::NORTH).unwrap();
        g.set_off(c, HexBorders::NORTH).unwrap();
        assert_eq!(g.get(c).unwrap(), HexBorders::empty());
        g.set_all(c, HexBorders::ALL_SIDES | HexBorders::IN).unwrap();
        assert!(g.has_flag(c, HexBorders::ALL_SIDES).unwrap());
        assert!(!g.has_flag(c, HexBorders::FRONTIER).unwrap());
    }

    #[test]
    fn access_outside_grid_fails() {
        let mut g = HexGrid::new(Width(3), Height(2)).unwrap();
        let outside = gc(0, 2);
        let is_out_of_bounds = |r: Result<()>| match r {
            Err(Error(ErrorKind::OutOfBounds(c, 3, 2), _)) => c == outside,
            _ => false,
        };
        assert!(is_out_of_bounds(g.get(outside).map(|_| ())));
        assert!(is_out_of_bounds(g.set_all(outside, HexBorders::IN)));
        assert!(is_out_of_bounds(g.set_on(outside, HexBorders::IN)));
        assert!(is_out_of_bounds(g.set_off(outside, HexBorders::IN)));
        assert!(is_out_of_bounds(g.has_flag(outside, HexBorders::IN).map(|_| ())));
    }

    #[test]
    fn linking_cells() {
        let mut g = RectGrid::new(Width(4), Height(4)).unwrap();
        let a = gc(0, 1);
        let b = g.link(a, CompassPrimary::South).unwrap();
        assert_eq!(b, gc(0, 2));
        assert!(g.is_open(a, CompassPrimary::South).unwrap());
        assert!(g.is_open(b, CompassPrimary::North).unwrap());
        assert_eq!(&*g.links(a).unwrap(), &[b]);
        assert_eq!(&*g.links(b).unwrap(), &[a]);

        assert!(g.link(gc(0, 0), CompassPrimary::West).is_err());
        assert!(g.link(gc(3, 0), CompassPrimary::East).is_err());
    }

    #[test]
    fn hex_link_clears_walls() {
        let mut g = HexGrid::new(Width(3), Height(3)).unwrap();
        for coord in g.iter() {
            g.set_all(coord, HexBorders::ALL_SIDES).unwrap();
        }
        let n = g.link(gc(1, 1), HexDirection::North).unwrap();
        assert_eq!(n, gc(2, 2));
        assert!(!g.has_flag(gc(1, 1), HexBorders::NORTH).unwrap());
        assert!(!g.has_flag(gc(2, 2), HexBorders::SOUTH).unwrap());
        assert_eq!(g.passage_graph().edge_count(), 1);
    }

    #[test]
    fn seal_boundary_closes_outer_edges() {
        let mut g = HexGrid::new(Width(3), Height(3)).unwrap();
        g.seal_boundary();
        assert_eq!(g.get(gc(1, 1)).unwrap(), HexBorders::empty());
        assert_eq!(g.get(gc(0, 0)).unwrap(),
                   HexBorders::SOUTH | HexBorders::SOUTH_EAST | HexBorders::SOUTH_WEST);
        assert_eq!(g.get(gc(2, 2)).unwrap(),
                   HexBorders::NORTH | HexBorders::NORTH_EAST | HexBorders::NORTH_WEST);

        let mut r = RectGrid::new(Width(2), Height(2)).unwrap();
        for coord in r.iter() {
            r.set_all(coord, RectPassages::all()).unwrap();
        }
        r.seal_boundary();
        assert_eq!(r.get(gc(0, 0)).unwrap(),
                   RectPassages::SOUTH | RectPassages::EAST | RectPassages::UNDER);
    }

    #[test]
    fn passage_graph_follows_tunnels() {
        // A single east-west passage under a north-south tunnel, plus the north-south passage.
        let mut g = RectGrid::new(Width(3), Height(3)).unwrap();
        g.set_all(gc(1, 1), RectPassages::NORTH_SOUTH_TUNNEL).unwrap();
        g.set_on(gc(1, 0), RectPassages::SOUTH).unwrap();
        g.set_on(gc(1, 2), RectPassages::NORTH).unwrap();
        g.set_on(gc(0, 1), RectPassages::EAST).unwrap();
        g.set_on(gc(2, 1), RectPassages::WEST).unwrap();

        let graph = g.passage_graph();
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.edge_count(), 3);
        let idx = |c| NodeIndex::new(g.grid_coordinate_to_index(c).unwrap());
        assert!(graph.find_edge(idx(gc(0, 1)), idx(gc(2, 1))).is_some());
        assert!(graph.find_edge(idx(gc(1, 0)), idx(gc(1, 1))).is_some());
        assert!(graph.find_edge(idx(gc(1, 1)), idx(gc(1, 2))).is_some());
        assert!(graph.find_edge(idx(gc(0, 1)), idx(gc(1, 1))).is_none());
        assert_eq!(&*g.links(gc(0, 1)).unwrap(), &[gc(2, 1)]);
        // 4 corners isolated, the tunnel's two passages
        assert_eq!(connected_components(&graph), 6);
    }

    #[test]
    fn random_cell_in_bounds() {
        use rand::SeedableRng;
        use rand_xorshift::XorShiftRng;
        let g = HexGrid::new(Width(4), Height(7)).unwrap();
        let mut rng = XorShiftRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(g.is_valid_coordinate(g.random_cell(&mut rng)));
        }
    }
}
