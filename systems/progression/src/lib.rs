#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure progression system that tracks the player's journey through levels.
//!
//! The [`Session`] holds the state the simulation core deliberately does not
//! own: the current level index, the move counter, and the completion flag.
//! It consumes field events and never mutates the field itself. When a level
//! is solved, [`Session::score_report`] produces the record an out-of-band
//! transport submits to the score service; the transport itself lives
//! outside this workspace.

use mitosis_core::Event;
use serde::{Deserialize, Serialize};

/// Identifier of the player as issued by the score service.
///
/// Persistent storage of the identifier is the host's concern; the session
/// only threads it into score reports.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Wraps a raw user identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the underlying identifier.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

/// Move-count record submitted to the score service when a level is solved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Zero-based index of the solved level.
    pub level: u32,
    /// Player the score belongs to.
    pub user: UserId,
    /// Number of divides that changed the field while solving the level.
    pub moves: u32,
}

/// Explicit session state for one play-through.
///
/// A divide counts as a move only when the field reports it changed
/// something, which it does by emitting [`Event::CellsSpread`]. Resetting a
/// level mid-attempt clears the completion flag but keeps the move count;
/// only advancing to the next level starts a fresh tally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    level_index: u32,
    moves: u32,
    solved: bool,
}

impl Session {
    /// Creates a session positioned at the first level with no moves made.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level_index: 0,
            moves: 0,
            solved: false,
        }
    }

    /// Zero-based index of the level currently being played.
    #[must_use]
    pub const fn level_index(&self) -> u32 {
        self.level_index
    }

    /// Number of counted moves on the current level.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Whether the current level has been solved.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Consumes field events, updating the move counter and completion flag.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::CellsSpread { .. } if !self.solved => {
                    self.moves = self.moves.saturating_add(1);
                }
                Event::PuzzleSolved => self.solved = true,
                // A reset empties the board, so the level is unsolved again.
                Event::FieldReset => self.solved = false,
                _ => {}
            }
        }
    }

    /// Moves the session to the next level, clearing per-level state.
    pub fn advance_level(&mut self) {
        self.level_index = self.level_index.saturating_add(1);
        self.moves = 0;
        self.solved = false;
    }

    /// Builds the score record for the current level and player.
    #[must_use]
    pub fn score_report(&self, user: UserId) -> ScoreReport {
        ScoreReport {
            level: self.level_index,
            user,
            moves: self.moves,
        }
    }
}
