use mitosis_core::{CellCoord, Event};
use mitosis_system_progression::{Session, UserId};

fn spread_event() -> Event {
    Event::CellsSpread {
        source: CellCoord::new(0, 0),
        spread: vec![CellCoord::new(1, 0)],
    }
}

#[test]
fn each_changing_divide_counts_one_move() {
    let mut session = Session::new();

    session.handle(&[spread_event()]);
    session.handle(&[spread_event(), spread_event()]);

    assert_eq!(session.moves(), 3);
    assert!(!session.is_solved());
}

#[test]
fn silent_events_do_not_count_as_moves() {
    let mut session = Session::new();

    session.handle(&[
        Event::FieldReset,
        Event::CellsCleared {
            cells: vec![CellCoord::new(1, 1)],
        },
    ]);

    assert_eq!(session.moves(), 0);
}

#[test]
fn solving_latches_the_completion_flag() {
    let mut session = Session::new();

    session.handle(&[spread_event(), Event::PuzzleSolved]);

    assert_eq!(session.moves(), 1);
    assert!(session.is_solved());

    // Presses after the win must not inflate the score.
    session.handle(&[spread_event()]);
    assert_eq!(session.moves(), 1);
}

#[test]
fn a_reset_after_solving_clears_the_completion_flag() {
    let mut session = Session::new();

    session.handle(&[spread_event(), Event::PuzzleSolved, Event::FieldReset]);
    assert!(!session.is_solved(), "an emptied board is no longer solved");

    // Moves made on the fresh attempt count again.
    session.handle(&[spread_event()]);
    assert_eq!(session.moves(), 2);
}

#[test]
fn a_mid_level_reset_keeps_the_move_count() {
    let mut session = Session::new();

    session.handle(&[spread_event(), Event::FieldReset, spread_event()]);

    assert_eq!(session.moves(), 2, "restarting a level is not a fresh tally");
}

#[test]
fn advancing_starts_the_next_level_clean() {
    let mut session = Session::new();
    session.handle(&[spread_event(), Event::PuzzleSolved]);

    session.advance_level();

    assert_eq!(session.level_index(), 1);
    assert_eq!(session.moves(), 0);
    assert!(!session.is_solved());
}

#[test]
fn score_report_captures_level_user_and_moves() {
    let mut session = Session::new();
    session.advance_level();
    session.handle(&[spread_event(), spread_event(), Event::PuzzleSolved]);

    let report = session.score_report(UserId::new("abc-123"));

    assert_eq!(report.level, 1);
    assert_eq!(report.user.get(), "abc-123");
    assert_eq!(report.moves, 2);
}
