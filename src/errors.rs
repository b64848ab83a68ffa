//! Error types shared by every fallible operation in the crate.
//!
//! Other modules `use crate::errors::*;` to get the `Error`, `ErrorKind` and `Result` types
//! created by `error_chain!`.

use crate::cells::Cartesian2DCoordinate;

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: each side must be between 1 and {} cells",
                    width, height, u32::max_value())
        }
        OutOfBounds(coord: Cartesian2DCoordinate, width: usize, height: usize) {
            description("coordinate outside of the grid")
            display("coordinate ({}, {}) is outside of a {}x{} grid", coord.x, coord.y, width, height)
        }
        InvalidInput(from: Cartesian2DCoordinate, to: Cartesian2DCoordinate) {
            description("cells are not adjacent")
            display("cells ({}, {}) and ({}, {}) are not adjacent", from.x, from.y, to.x, to.y)
        }
        PathDivergence(from: Cartesian2DCoordinate, to: Cartesian2DCoordinate, steps: usize) {
            description("line of sight diverged from its target")
            display("line of sight from ({}, {}) to ({}, {}) did not reach its target after {} steps",
                    from.x, from.y, to.x, to.y, steps)
        }
    }
}
