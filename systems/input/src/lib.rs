#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that turns pointer presses into divide commands.
//!
//! Adapters gather a [`PointerInput`] snapshot each frame (mouse press,
//! touch tap) and hand it here together with the field's hit-test. The
//! system stays silent once the puzzle is solved so stray presses on a
//! finished board do not mutate it; loading or resetting a level re-arms it.

use glam::Vec2;
use mitosis_core::{CellCoord, Command, Event};

/// Pointer snapshot gathered by an adapter for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointerInput {
    /// Whether the pointer was pressed on this frame.
    pub pressed: bool,
    /// Pointer position in field pixel space, already corrected for any
    /// presentation offset the adapter applies.
    pub position: Option<Vec2>,
}

impl PointerInput {
    /// Creates a press snapshot at the provided field-space position.
    #[must_use]
    pub const fn pressed_at(position: Vec2) -> Self {
        Self {
            pressed: true,
            position: Some(position),
        }
    }
}

/// Input system that emits [`Command::Divide`] for presses landing on a cell.
#[derive(Clone, Debug, Default)]
pub struct Input {
    solved: bool,
}

impl Input {
    /// Creates a new input system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { solved: false }
    }

    /// Re-arms the system after a new level replaces the field.
    pub fn level_loaded(&mut self) {
        self.solved = false;
    }

    /// Consumes field events and a pointer snapshot to emit divide commands.
    ///
    /// The `cell_at` closure should mirror the semantics of the world's
    /// `query::cell_at_point` helper. Presses that land on a wall band or
    /// outside the field resolve to no cell and emit nothing.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: PointerInput,
        mut cell_at: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(i32, i32) -> Option<CellCoord>,
    {
        for event in events {
            match event {
                Event::PuzzleSolved => self.solved = true,
                Event::FieldReset => self.solved = false,
                _ => {}
            }
        }

        if self.solved || !input.pressed {
            return;
        }

        let Some(position) = input.position else {
            return;
        };
        if let Some(cell) = cell_at(position.x as i32, position.y as i32) {
            out.push(Command::Divide { cell });
        }
    }
}
