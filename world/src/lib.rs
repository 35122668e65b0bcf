#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative field state for Mitosis.
//!
//! The [`Field`] owns the slot grid and executes [`Command`] values through
//! [`apply`], broadcasting [`Event`] values that systems react to. A divide
//! runs as one synchronous wave followed by a clear pass over a snapshot of
//! the post-propagation grid, so no caller ever observes a partially-updated
//! field.

mod loader;

pub use loader::LevelFormatError;

use std::io::Read;

use mitosis_core::{CellCoord, Command, Direction, DivideError, Event, Slot};

/// The playing field: a fixed rows-by-columns grid of slots.
///
/// Dimensions are set when a level loads and never change; advancing to a
/// new level replaces the whole field. Each dimension fits in one byte of
/// the binary level format, so both sit in `1..=255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    columns: u32,
    rows: u32,
    slots: Vec<Slot>,
}

impl Field {
    /// Decodes a field from the binary level layout: one byte of rows, one
    /// byte of columns, then rows x columns packed slot codes in row-major
    /// order. Loading is all-or-nothing.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LevelFormatError> {
        loader::from_bytes(bytes)
    }

    /// Reads a byte stream to its end and decodes it as a binary level.
    ///
    /// The transport that produced the reader (file, network response) is
    /// the caller's concern; the decode contract is identical regardless.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LevelFormatError> {
        let mut bytes = Vec::new();
        let _ = reader.read_to_end(&mut bytes)?;
        loader::from_bytes(&bytes)
    }

    /// Decodes a field from the legacy text layout: a decimal row count
    /// line, a decimal column count line, then one binary-digit slot
    /// descriptor per line in row-major order.
    pub fn from_legacy_text(text: &str) -> Result<Self, LevelFormatError> {
        loader::from_legacy_text(text)
    }

    /// Encodes the field back into the binary level layout, the exact
    /// inverse of [`Field::from_bytes`].
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        loader::to_bytes(self)
    }

    /// Builds a field from pre-decoded parts.
    ///
    /// Callers guarantee `slots.len() == columns * rows` with both
    /// dimensions in `1..=255`; the loader is the only entry point.
    pub(crate) fn from_parts(columns: u32, rows: u32, slots: Vec<Slot>) -> Self {
        debug_assert_eq!(slots.len(), (columns * rows) as usize);
        Self {
            columns,
            rows,
            slots,
        }
    }

    pub(crate) fn columns(&self) -> u32 {
        self.columns
    }

    pub(crate) fn rows(&self) -> u32 {
        self.rows
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Row-major offset for a cell already known to be in bounds.
    fn offset(&self, column: u32, row: u32) -> usize {
        (row * self.columns + column) as usize
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        (cell.column() < self.columns && cell.row() < self.rows)
            .then(|| self.offset(cell.column(), cell.row()))
    }

    /// In-bounds neighbor of `cell` in the given direction, if any.
    fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        let (column, row) = (cell.column(), cell.row());
        let neighbor = match direction {
            Direction::North => CellCoord::new(column, row.checked_sub(1)?),
            Direction::East => CellCoord::new(column + 1, row),
            Direction::South => CellCoord::new(column, row + 1),
            Direction::West => CellCoord::new(column.checked_sub(1)?, row),
        };
        (neighbor.column() < self.columns && neighbor.row() < self.rows).then_some(neighbor)
    }

    /// Counts occupied slots among the up-to-8 neighbors of `cell`.
    ///
    /// Out-of-bounds neighbors simply do not count, so border cells can
    /// never reach a count of 8.
    fn occupied_neighbor_count(&self, cell: CellCoord) -> u32 {
        let mut count = 0;
        for delta_row in -1i64..=1 {
            for delta_column in -1i64..=1 {
                if delta_row == 0 && delta_column == 0 {
                    continue;
                }
                let row = i64::from(cell.row()) + delta_row;
                let column = i64::from(cell.column()) + delta_column;
                if row < 0
                    || column < 0
                    || row >= i64::from(self.rows)
                    || column >= i64::from(self.columns)
                {
                    continue;
                }
                if self.slots[self.offset(column as u32, row as u32)].occupied() {
                    count += 1;
                }
            }
        }
        count
    }

    fn divide(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(index) = self.index(cell) else {
            out_events.push(Event::DivideRejected {
                cell,
                reason: DivideError::OutOfBounds,
            });
            return;
        };

        // Dividing an empty slot is a well-defined no-op, not a failure.
        let source = self.slots[index];
        if !source.occupied() {
            return;
        }

        // One synchronous wave: every target is read from the grid as it was
        // before this call, and a newly occupied neighbor never propagates
        // further within the same divide. The source keeps its token.
        let mut spread = Vec::new();
        for direction in Direction::ALL {
            if source.walls().blocks(direction) {
                continue;
            }
            let Some(neighbor) = self.neighbor(cell, direction) else {
                continue;
            };
            let neighbor_index = self.offset(neighbor.column(), neighbor.row());
            let target = &mut self.slots[neighbor_index];
            // A wall on either side of the shared edge blocks the spread.
            if target.walls().blocks(direction.opposite()) {
                continue;
            }
            if !target.occupied() {
                target.set_occupied(true);
                spread.push(neighbor);
            }
        }

        if !spread.is_empty() {
            out_events.push(Event::CellsSpread {
                source: cell,
                spread,
            });
        }

        self.clear_overcrowded(out_events);

        if self.is_solved() {
            out_events.push(Event::PuzzleSolved);
        }
    }

    /// Second phase of a divide: every occupied slot whose 8-neighborhood is
    /// fully occupied loses its token.
    ///
    /// All counts are taken against the post-propagation grid before any
    /// clearing happens, then the scheduled cells are cleared together, so
    /// clearing one cell never rescues another within the same pass.
    fn clear_overcrowded(&mut self, out_events: &mut Vec<Event>) {
        let mut cleared = Vec::new();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let cell = CellCoord::new(column, row);
                if self.slots[self.offset(column, row)].occupied()
                    && self.occupied_neighbor_count(cell) >= 8
                {
                    cleared.push(cell);
                }
            }
        }
        if cleared.is_empty() {
            return;
        }
        for cell in &cleared {
            let offset = self.offset(cell.column(), cell.row());
            self.slots[offset].set_occupied(false);
        }
        out_events.push(Event::CellsCleared { cells: cleared });
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        for slot in &mut self.slots {
            slot.set_occupied(false);
        }
        out_events.push(Event::FieldReset);
    }

    fn is_solved(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| slot.occupied() == slot.winning())
    }
}

/// Applies the provided command to the field, mutating state deterministically.
pub fn apply(field: &mut Field, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Divide { cell } => field.divide(cell, out_events),
        Command::Reset => field.reset(out_events),
    }
}

/// Query functions that provide read-only access to the field state.
pub mod query {
    use super::Field;
    use mitosis_core::{CellCoord, OutOfBounds, Slot, SLOT_SIZE};

    /// Number of columns in the field's grid.
    #[must_use]
    pub fn columns(field: &Field) -> u32 {
        field.columns()
    }

    /// Number of rows in the field's grid.
    #[must_use]
    pub fn rows(field: &Field) -> u32 {
        field.rows()
    }

    /// Total width of the field measured in pixels.
    #[must_use]
    pub fn pixel_width(field: &Field) -> i32 {
        field.columns() as i32 * SLOT_SIZE
    }

    /// Total height of the field measured in pixels.
    #[must_use]
    pub fn pixel_height(field: &Field) -> i32 {
        field.rows() as i32 * SLOT_SIZE
    }

    /// Direct access to the slot at the provided cell.
    ///
    /// Out-of-range coordinates are a precondition violation surfaced as
    /// [`OutOfBounds`] rather than silently clamped.
    pub fn slot(field: &Field, cell: CellCoord) -> Result<&Slot, OutOfBounds> {
        field
            .index(cell)
            .map(|index| &field.slots()[index])
            .ok_or(OutOfBounds {
                cell,
                columns: field.columns(),
                rows: field.rows(),
            })
    }

    /// Whether the occupied slots exactly match the winning slots.
    ///
    /// Pure read over the whole grid; an extra or a missing token anywhere
    /// makes it false.
    #[must_use]
    pub fn is_solved(field: &Field) -> bool {
        field.is_solved()
    }

    /// Translates a pixel-space point into the grid cell whose interior
    /// contains it.
    ///
    /// Returns `None` when the point lands on a wall band or outside the
    /// field entirely. Interior rectangles of distinct cells never overlap,
    /// so the row-major scan order does not affect the result.
    #[must_use]
    pub fn cell_at_point(field: &Field, x: i32, y: i32) -> Option<CellCoord> {
        slots(field).find_map(|(cell, slot)| slot.contains(x, y, cell).then_some(cell))
    }

    /// Iterates every slot with its cell coordinate in row-major order,
    /// for presentation layers that draw the grid without mutating it.
    pub fn slots(field: &Field) -> impl Iterator<Item = (CellCoord, &Slot)> {
        let columns = field.columns();
        field.slots().iter().enumerate().map(move |(index, slot)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), slot)
        })
    }
}
