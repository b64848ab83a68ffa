//! **hexweave** generates mazes on two topologies: perfect mazes on a hexagonal grid with Prim's
//! algorithm, and weave mazes on a rectangular grid, where passages may cross over and under each
//! other, with Kruskal's algorithm. It also answers geometry queries on the hex grid.

#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grids;
pub mod hex_geometry;
pub mod masks;
pub mod union_find;
pub mod units;
pub mod values;
mod utils;
