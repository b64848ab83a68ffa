//! Per cell bit masks for the two grid topologies.
//!
//! The hex mask records *walls*: a set direction bit is a border, clearing it carves a passage.
//! The two highest bits are reserved for the `IN` and `FRONTIER` status used by Prim's algorithm.
//!
//! ```text
//!   FRONTIER IN NW SW S SE NE N
//! ```
//!
//! The rectangular mask records *passages*: a set direction bit is open. `UNDER` marks a weave
//! tunnel cell, where the passage in the set pair of directions runs over the perpendicular one.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HexBorders: u8 {
        const NORTH      = 0b0000_0001;
        const NORTH_EAST = 0b0000_0010;
        const SOUTH_EAST = 0b0000_0100;
        const SOUTH      = 0b0000_1000;
        const SOUTH_WEST = 0b0001_0000;
        const NORTH_WEST = 0b0010_0000;
        const IN         = 0b0100_0000;
        const FRONTIER   = 0b1000_0000;

        const ALL_SIDES = Self::NORTH.bits() | Self::NORTH_EAST.bits() | Self::SOUTH_EAST.bits() |
                          Self::SOUTH.bits() | Self::SOUTH_WEST.bits() | Self::NORTH_WEST.bits();
        const STATUS = Self::IN.bits() | Self::FRONTIER.bits();
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RectPassages: u8 {
        const NORTH = 0b0000_0001;
        const SOUTH = 0b0000_0010;
        const EAST  = 0b0000_0100;
        const WEST  = 0b0000_1000;
        const UNDER = 0b0001_0000;

        const NORTH_SOUTH_TUNNEL = Self::NORTH.bits() | Self::SOUTH.bits() | Self::UNDER.bits();
        const EAST_WEST_TUNNEL = Self::EAST.bits() | Self::WEST.bits() | Self::UNDER.bits();
    }
}

impl HexBorders {
    /// The wall bits only, with the generation status stripped.
    #[inline]
    pub fn sides(self) -> HexBorders {
        self & HexBorders::ALL_SIDES
    }
}

impl RectPassages {
    #[inline]
    pub fn is_tunnel(self) -> bool {
        self.contains(RectPassages::UNDER)
    }
}
