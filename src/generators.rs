use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec};
use crate::config::MazeConfig;
use crate::errors::*;
use crate::grids::{HexGrid, RectGrid};
use crate::hex_geometry;
use crate::masks::{HexBorders, RectPassages};
use crate::union_find::DisjointSets;
use crate::units::{Height, Width};
use crate::utils::{self, FnvHashSet};

/// Generate a hex maze with Prim's algorithm, seeded from the config.
pub fn generate_hex_maze(config: &MazeConfig) -> Result<HexGrid> {
    let mut grid = HexGrid::new(config.width(), config.height())?;
    let mut rng = config.rng();
    prims_hex(&mut grid, &mut rng)?;
    Ok(grid)
}

/// Generate a rectangular weave maze with Kruskal's algorithm, seeded from the config.
pub fn generate_weave_maze(config: &MazeConfig) -> Result<(RectGrid, WeaveReport)> {
    let mut grid = RectGrid::new(config.width(), config.height())?;
    let mut rng = config.rng();
    let report = kruskals_weave(&mut grid, config.max_consecutive_failures(), &mut rng)?;
    Ok((grid, report))
}

/// Cells adjacent to the maze that are not yet part of it, kept in insertion order.
struct Frontier {
    cells: Vec<Cartesian2DCoordinate>,
    members: FnvHashSet<Cartesian2DCoordinate>,
}

impl Frontier {
    fn with_capacity(capacity: usize) -> Frontier {
        Frontier {
            cells: Vec::with_capacity(capacity),
            members: utils::fnv_hashset(capacity),
        }
    }

    /// Cells already in the maze or already in the frontier are skipped.
    fn add(&mut self, grid: &mut HexGrid, coord: Cartesian2DCoordinate) -> Result<()> {
        if !grid.has_flag(coord, HexBorders::IN)? && !self.members.contains(&coord) {
            grid.set_on(coord, HexBorders::FRONTIER)?;
            let _ = self.members.insert(coord);
            self.cells.push(coord);
        }
        Ok(())
    }

    /// Remove a uniformly random cell, keeping the order of the others.
    fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Cartesian2DCoordinate> {
        if self.cells.is_empty() {
            None
        } else {
            let coord = self.cells.remove(rng.gen_range(0..self.cells.len()));
            let _ = self.members.remove(&coord);
            Some(coord)
        }
    }
}

/// Mark a cell as in the maze, walled on every side, and add its neighbours to the frontier.
fn mark_in(grid: &mut HexGrid, coord: Cartesian2DCoordinate, frontier: &mut Frontier) -> Result<()> {
    grid.set_all(coord, HexBorders::ALL_SIDES | HexBorders::IN)?;
    for &neighbour in grid.neighbours(coord).iter() {
        frontier.add(grid, neighbour)?;
    }
    Ok(())
}

/// Apply the randomised Prim's algorithm to a hex grid.
///
/// Starting from a random cell, it repeatedly takes a random frontier cell into the maze and
/// knocks down the wall between it and one random neighbour that is already in the maze. Which
/// frontier cell is taken, not the order cells joined the frontier, shapes the maze, giving many
/// short dead ends rather than the long corridors of a depth first walk.
///
/// Every cell of the grid is overwritten. On return each pair of adjacent cells is either walled
/// on both sides or open on both sides, the open passages form a spanning tree, and no cell keeps
/// the `IN` or `FRONTIER` flags.
pub fn prims_hex<R: Rng + ?Sized>(grid: &mut HexGrid, rng: &mut R) -> Result<()> {
    let mut frontier = Frontier::with_capacity(grid.size());

    let start = grid.random_cell(rng);
    debug!("prims: {:?} grid starting at {:?}", (grid.width(), grid.height()), start);
    mark_in(grid, start, &mut frontier)?;

    while let Some(cell) = frontier.take_random(rng) {
        mark_in(grid, cell, &mut frontier)?;

        let mut in_neighbours = CoordinateSmallVec::new();
        for &neighbour in grid.neighbours(cell).iter() {
            if grid.has_flag(neighbour, HexBorders::IN)? {
                in_neighbours.push(neighbour);
            }
        }

        // A frontier cell always has a neighbour in the maze, that's how it joined the frontier.
        if let Some(&parent) = in_neighbours.choose(rng) {
            let dir = hex_geometry::neighbour_direction(cell, parent)?;
            grid.set_off(cell, dir.into())?;
            grid.set_off(parent, dir.opposite().into())?;
            trace!("prims: {:?} joins via {:?} to {:?}", cell, dir, parent);
        }
    }

    for coord in grid.iter() {
        grid.set_off(coord, HexBorders::STATUS)?;
    }
    Ok(())
}

/// The undecided passage from a cell towards `direction`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Edge {
    pub coord: Cartesian2DCoordinate,
    pub direction: CompassPrimary,
}

/// Every passage of the grid once: each cell's north and west edges, in row-major order.
pub fn edge_list(grid: &RectGrid) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(grid.size() * 2);
    for coord in grid.iter() {
        if coord.y > 0 {
            edges.push(Edge { coord, direction: CompassPrimary::North });
        }
        if coord.x > 0 {
            edges.push(Edge { coord, direction: CompassPrimary::West });
        }
    }
    edges
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Decoration {
    /// Tunnel cells in the order they were placed.
    pub tunnels: Vec<Cartesian2DCoordinate>,
    pub attempts: usize,
    pub rejections: usize,
    /// Rejections in a row between placements: entry `i` counts those before tunnel `i` and the
    /// last entry counts the run that ended the pass.
    pub rejection_runs: Vec<usize>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct WeaveReport {
    pub decoration: Decoration,
    /// Passages carved by Kruskal's pass after the decoration.
    pub links: usize,
    /// Disjoint sets left once every edge was considered; one for a finished maze.
    pub sets_remaining: usize,
}

/// The four cells around a tunnel candidate.
#[derive(Debug, Copy, Clone)]
struct Crossing {
    north: Cartesian2DCoordinate,
    south: Cartesian2DCoordinate,
    east: Cartesian2DCoordinate,
    west: Cartesian2DCoordinate,
}

impl Crossing {
    fn around(centre: Cartesian2DCoordinate) -> Crossing {
        let (x, y) = (centre.x, centre.y);
        Crossing {
            north: Cartesian2DCoordinate::new(x, y - 1),
            south: Cartesian2DCoordinate::new(x, y + 1),
            east: Cartesian2DCoordinate::new(x + 1, y),
            west: Cartesian2DCoordinate::new(x - 1, y),
        }
    }
}

/// Would joining north to south and east to west through one cell close a cycle?
/// That happens if either pair is already joined, or if the pairs are already joined crosswise so
/// that the first union joins the second pair.
fn crossing_closes_cycle(sets: &mut DisjointSets, n: usize, s: usize, e: usize, w: usize) -> bool {
    sets.connected(n, s) || sets.connected(e, w) ||
    (sets.connected(n, e) && sets.connected(s, w)) ||
    (sets.connected(n, w) && sets.connected(s, e))
}

/// Place over/under crossings on a blank rectangular grid before Kruskal's pass.
///
/// Once arbitrary passages have been carved, cells whose four neighbours are still in separate
/// sets become rare, so the crossings are decided first. Each attempt picks a random interior
/// cell; it is rejected if it is already carved or if either of its two passages would close a
/// cycle. Accepted cells become tunnels: the four neighbours open towards them, the sets each
/// passage joins are merged, and the four edges around the cell leave `edges`. The pass stops
/// after `max_consecutive_failures` rejections in a row.
pub fn decorate_weave<R: Rng + ?Sized>(grid: &mut RectGrid,
                                       sets: &mut DisjointSets,
                                       edges: &mut Vec<Edge>,
                                       max_consecutive_failures: usize,
                                       rng: &mut R)
                                       -> Result<Decoration> {
    let mut decoration = Decoration::default();
    let (Width(width), Height(height)) = (grid.width(), grid.height());
    if width < 3 || height < 3 {
        debug!("weave: {}x{} grid has no interior cells to tunnel", width, height);
        return Ok(decoration);
    }

    let dimensions = *grid.dimensions();
    decoration.rejection_runs.push(0);
    let mut failures = 0;
    while failures < max_consecutive_failures {
        decoration.attempts += 1;
        let cx = rng.gen_range(0..width - 2) + 1;
        let cy = rng.gen_range(0..height - 2) + 1;
        let centre = Cartesian2DCoordinate::new(cx as u32, cy as u32);
        let around = Crossing::around(centre);

        let c = dimensions.checked_index(centre)?;
        let n = dimensions.checked_index(around.north)?;
        let s = dimensions.checked_index(around.south)?;
        let e = dimensions.checked_index(around.east)?;
        let w = dimensions.checked_index(around.west)?;

        if !grid.get(centre)?.is_empty() || crossing_closes_cycle(sets, n, s, e, w) {
            failures += 1;
            decoration.rejections += 1;
            if let Some(run) = decoration.rejection_runs.last_mut() {
                *run += 1;
            }
            continue;
        }

        let _ = sets.union(n, s);
        let _ = sets.union(e, w);
        failures = 0;

        let tunnel = if rng.gen() {
            RectPassages::EAST_WEST_TUNNEL
        } else {
            RectPassages::NORTH_SOUTH_TUNNEL
        };
        grid.set_all(centre, tunnel)?;
        // The tunnel cell lies on the passage running over it.
        if tunnel == RectPassages::EAST_WEST_TUNNEL {
            let _ = sets.union(w, c);
        } else {
            let _ = sets.union(n, c);
        }

        grid.set_on(around.north, RectPassages::SOUTH)?;
        grid.set_on(around.west, RectPassages::EAST)?;
        grid.set_on(around.east, RectPassages::WEST)?;
        grid.set_on(around.south, RectPassages::NORTH)?;

        edges.retain(|edge| {
            !(edge.coord == centre ||
              (edge.coord == around.east && edge.direction == CompassPrimary::West) ||
              (edge.coord == around.south && edge.direction == CompassPrimary::North))
        });

        trace!("weave: tunnel {:?} at {:?}", tunnel, centre);
        decoration.tunnels.push(centre);
        decoration.rejection_runs.push(0);
    }

    debug!("weave: {} tunnels placed in {} attempts",
           decoration.tunnels.len(),
           decoration.attempts);
    Ok(decoration)
}

/// Kruskal's algorithm over the remaining edges, taken from the back of the list.
/// An edge whose two cells are already in one set would close a cycle and is dropped.
/// Returns the number of passages carved.
pub fn kruskals(grid: &mut RectGrid, sets: &mut DisjointSets, edges: &mut Vec<Edge>) -> Result<usize> {
    let dimensions = *grid.dimensions();
    let mut links = 0;
    while let Some(edge) = edges.pop() {
        let neighbour = match grid.neighbour_at_direction(edge.coord, edge.direction) {
            Some(neighbour) => neighbour,
            // edge_list only emits edges with both cells inside the grid
            None => bail!(ErrorKind::OutOfBounds(edge.coord, dimensions.width().0, dimensions.height().0)),
        };
        let a = dimensions.checked_index(edge.coord)?;
        let b = dimensions.checked_index(neighbour)?;
        if !sets.connected(a, b) {
            let _ = sets.union(a, b);
            let _ = grid.link(edge.coord, edge.direction)?;
            links += 1;
        }
    }
    Ok(links)
}

/// Generate a weave maze on a blank rectangular grid: shuffle every edge, place the crossings,
/// then let Kruskal's algorithm join everything else into one spanning tree.
pub fn kruskals_weave<R: Rng + ?Sized>(grid: &mut RectGrid,
                                       max_consecutive_failures: usize,
                                       rng: &mut R)
                                       -> Result<WeaveReport> {
    let mut sets = DisjointSets::new(grid.size());
    let mut edges = edge_list(grid);
    edges.shuffle(rng);

    let decoration = decorate_weave(grid, &mut sets, &mut edges, max_consecutive_failures, rng)?;
    let links = kruskals(grid, &mut sets, &mut edges)?;
    let sets_remaining = sets.sets_count();
    debug!("weave: kruskals carved {} passages, {} sets remaining", links, sets_remaining);

    Ok(WeaveReport {
        decoration,
        links,
        sets_remaining,
    })
}
