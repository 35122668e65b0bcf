#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mitosis engine.
//!
//! This crate defines the vocabulary that connects the authoritative field,
//! pure systems, and adapters. Adapters submit [`Command`] values describing
//! desired mutations, the field executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values for systems to react to
//! deterministically. The [`Slot`] type and its packed wire code live here
//! because every layer, from the loader to the renderer, speaks in slots.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of one slot tile measured in pixels.
pub const SLOT_SIZE: i32 = 40;

/// Thickness of a wall segment drawn along a slot edge, in pixels.
pub const WALL_WIDTH: i32 = SLOT_SIZE / 10;

/// Side length of the interior cell rectangle, in pixels.
///
/// The interior is the slot tile inset by [`WALL_WIDTH`] on every side; only
/// this area counts as "inside" for hit-testing, so presses landing on a wall
/// select nothing.
pub const CELL_SIZE: i32 = SLOT_SIZE - 2 * WALL_WIDTH;

/// Commands that express all permissible field mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the occupied slot at `cell` spread its token through
    /// every open side into the adjacent slots.
    Divide {
        /// Grid cell targeted by the player action.
        cell: CellCoord,
    },
    /// Clears every slot's occupancy while leaving walls and winning targets
    /// untouched, returning the field to an empty board.
    Reset,
}

/// Events broadcast by the field after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Reports that a divide spread the source token into neighboring slots.
    ///
    /// Only emitted when at least one slot transitioned from empty to
    /// occupied; a divide that reaches no new slot is silent. The caller
    /// counts one player move per occurrence of this event.
    CellsSpread {
        /// Slot whose token was divided.
        source: CellCoord,
        /// Slots that became occupied as a result of this divide.
        spread: Vec<CellCoord>,
    },
    /// Reports that overcrowded slots were cleared after a divide.
    CellsCleared {
        /// Slots whose occupancy was removed by the clear pass.
        cells: Vec<CellCoord>,
    },
    /// Reports that a divide command was rejected before touching the grid.
    DivideRejected {
        /// Cell named by the rejected command.
        cell: CellCoord,
        /// Specific reason the divide failed.
        reason: DivideError,
    },
    /// Confirms that the field's occupancy was cleared by a reset command.
    FieldReset,
    /// Announces that the occupied slots exactly match the winning slots.
    PuzzleSolved,
}

/// Reasons a divide command may be rejected by the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DivideError {
    /// The named cell lies outside the field's grid bounds.
    OutOfBounds,
}

/// Cardinal directions a token may spread through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions in the order a divide evaluates them.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the direction facing back across the shared edge.
    ///
    /// Propagation through an edge requires the wall to be absent on both
    /// sides, so the neighbor is always checked against the opposite
    /// direction of travel.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Columns run along the horizontal axis and rows along the vertical axis;
/// this axis mapping is fixed and applied uniformly by the hit-test, the
/// scene builder, and propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Wall configuration on the four edges of a slot.
///
/// Walls are fixed when a level loads and never change during play. Walls
/// are not required to be symmetric between adjacent slots; both sides of a
/// shared edge must be consulted before a token may cross it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Walls {
    north: bool,
    east: bool,
    south: bool,
    west: bool,
}

impl Walls {
    /// A slot edge configuration with no walls at all.
    pub const NONE: Walls = Walls::new(false, false, false, false);

    /// Creates a wall configuration from explicit edge flags.
    #[must_use]
    pub const fn new(north: bool, east: bool, south: bool, west: bool) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    /// Reports whether a wall blocks the provided direction.
    #[must_use]
    pub const fn blocks(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Wall flag on the north edge.
    #[must_use]
    pub const fn north(&self) -> bool {
        self.north
    }

    /// Wall flag on the east edge.
    #[must_use]
    pub const fn east(&self) -> bool {
        self.east
    }

    /// Wall flag on the south edge.
    #[must_use]
    pub const fn south(&self) -> bool {
        self.south
    }

    /// Wall flag on the west edge.
    #[must_use]
    pub const fn west(&self) -> bool {
        self.west
    }
}

/// Error raised when a packed slot code does not fit in six bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("slot code {code:#04x} exceeds the 6-bit range")]
pub struct InvalidSlotCode {
    /// The offending byte.
    pub code: u8,
}

/// Error raised when a cell coordinate lies outside a field's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cell {cell} is outside the {columns}x{rows} field")]
pub struct OutOfBounds {
    /// Coordinate that failed the bounds check.
    pub cell: CellCoord,
    /// Number of columns in the field.
    pub columns: u32,
    /// Number of rows in the field.
    pub rows: u32,
}

/// One grid position: a wall configuration, an occupancy token, and a
/// winning-target flag.
///
/// The wall flags and the winning flag are immutable once the slot is
/// constructed; only `occupied` mutates during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    walls: Walls,
    occupied: bool,
    winning: bool,
}

impl Slot {
    /// Creates a slot from explicit wall, occupancy, and target flags.
    #[must_use]
    pub const fn new(walls: Walls, occupied: bool, winning: bool) -> Self {
        Self {
            walls,
            occupied,
            winning,
        }
    }

    /// Decodes a slot from its packed 6-bit wire code.
    ///
    /// Bits are extracted low-to-high as winning, occupied, west, south,
    /// east, north, the exact inverse of [`Slot::code`]. Codes with any bit
    /// above the sixth set are rejected.
    pub const fn from_code(code: u8) -> Result<Self, InvalidSlotCode> {
        if code >= 1 << 6 {
            return Err(InvalidSlotCode { code });
        }
        let winning = code & 1 == 1;
        let occupied = (code >> 1) & 1 == 1;
        let west = (code >> 2) & 1 == 1;
        let south = (code >> 3) & 1 == 1;
        let east = (code >> 4) & 1 == 1;
        let north = (code >> 5) & 1 == 1;
        Ok(Self {
            walls: Walls::new(north, east, south, west),
            occupied,
            winning,
        })
    }

    /// Encodes the slot into its packed 6-bit wire code.
    ///
    /// Bit order from most- to least-significant: north, east, south, west,
    /// occupied, winning.
    #[must_use]
    pub const fn code(&self) -> u8 {
        (self.walls.north() as u8) << 5
            | (self.walls.east() as u8) << 4
            | (self.walls.south() as u8) << 3
            | (self.walls.west() as u8) << 2
            | (self.occupied as u8) << 1
            | self.winning as u8
    }

    /// Wall configuration on the slot's four edges.
    #[must_use]
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    /// Whether a token currently occupies the slot.
    #[must_use]
    pub const fn occupied(&self) -> bool {
        self.occupied
    }

    /// Whether the slot is a winning target.
    #[must_use]
    pub const fn winning(&self) -> bool {
        self.winning
    }

    /// Sets the slot's occupancy. Intended for the owning field; walls and
    /// the winning flag have no mutator.
    pub fn set_occupied(&mut self, occupied: bool) {
        self.occupied = occupied;
    }

    /// Reports whether a pixel-space point falls within the slot's interior
    /// rectangle when the slot sits at the provided grid cell.
    ///
    /// The tile's top-left corner is at `(column * SLOT_SIZE, row *
    /// SLOT_SIZE)`; the interior is that tile inset by [`WALL_WIDTH`] on
    /// every side. Points on a wall are outside.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32, cell: CellCoord) -> bool {
        let left = cell.column() as i32 * SLOT_SIZE + WALL_WIDTH;
        let top = cell.row() as i32 * SLOT_SIZE + WALL_WIDTH;
        x >= left && x < left + CELL_SIZE && y >= top && y < top + CELL_SIZE
    }
}
