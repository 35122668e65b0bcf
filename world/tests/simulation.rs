use mitosis_core::{CellCoord, Command, DivideError, Event};
use mitosis_world::{self as world, query, Field};

const EMPTY: u8 = 0b00;
const OCCUPIED: u8 = 0b10;
const WINNING: u8 = 0b01;
const ALL_WALLS: u8 = 0b11_1100;

fn field(rows: u8, columns: u8, codes: &[u8]) -> Field {
    let mut bytes = vec![rows, columns];
    bytes.extend_from_slice(codes);
    Field::from_bytes(&bytes).expect("test level decodes")
}

fn occupied_cells(field: &Field) -> Vec<CellCoord> {
    query::slots(field)
        .filter_map(|(cell, slot)| slot.occupied().then_some(cell))
        .collect()
}

#[test]
fn divide_on_an_empty_slot_is_a_silent_no_op() {
    let mut subject = field(2, 2, &[EMPTY, EMPTY, EMPTY, WINNING]);
    let pristine = subject.clone();
    let mut events = Vec::new();

    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(0, 0),
        },
        &mut events,
    );

    assert!(events.is_empty(), "a no-op divide must not emit events");
    assert_eq!(subject, pristine, "the grid must be untouched");
}

#[test]
fn divide_spreads_into_every_open_neighbor() {
    #[rustfmt::skip]
    let mut subject = field(3, 3, &[
        EMPTY, EMPTY,    EMPTY,
        EMPTY, OCCUPIED, EMPTY,
        EMPTY, EMPTY,    EMPTY,
    ]);
    let center = CellCoord::new(1, 1);
    let mut events = Vec::new();

    world::apply(&mut subject, Command::Divide { cell: center }, &mut events);

    let expected_spread = vec![
        CellCoord::new(1, 0),
        CellCoord::new(2, 1),
        CellCoord::new(1, 2),
        CellCoord::new(0, 1),
    ];
    assert_eq!(
        events,
        vec![Event::CellsSpread {
            source: center,
            spread: expected_spread.clone(),
        }],
    );

    let slot = query::slot(&subject, center).expect("center in bounds");
    assert!(slot.occupied(), "the source keeps its token");
    for cell in expected_spread {
        let slot = query::slot(&subject, cell).expect("neighbor in bounds");
        assert!(slot.occupied(), "neighbor {cell} must be occupied");
    }
    // Diagonals are untouched; propagation is edge-wise only.
    assert!(!query::slot(&subject, CellCoord::new(0, 0))
        .expect("corner in bounds")
        .occupied());
}

#[test]
fn a_wall_on_the_source_side_blocks_the_spread() {
    let east_walled = 0b01_0000 | OCCUPIED;
    #[rustfmt::skip]
    let mut subject = field(3, 3, &[
        EMPTY, EMPTY,       EMPTY,
        EMPTY, east_walled, EMPTY,
        EMPTY, EMPTY,       EMPTY,
    ]);
    let mut events = Vec::new();

    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(1, 1),
        },
        &mut events,
    );

    assert!(!query::slot(&subject, CellCoord::new(2, 1))
        .expect("east neighbor in bounds")
        .occupied());
    match &events[0] {
        Event::CellsSpread { spread, .. } => assert_eq!(spread.len(), 3),
        other => panic!("expected CellsSpread, got {other:?}"),
    }
}

#[test]
fn a_wall_on_the_neighbor_side_blocks_the_spread() {
    let west_walled = 0b00_0100;
    #[rustfmt::skip]
    let mut subject = field(3, 3, &[
        EMPTY, EMPTY,    EMPTY,
        EMPTY, OCCUPIED, west_walled,
        EMPTY, EMPTY,    EMPTY,
    ]);
    let mut events = Vec::new();

    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(1, 1),
        },
        &mut events,
    );

    assert!(
        !query::slot(&subject, CellCoord::new(2, 1))
            .expect("east neighbor in bounds")
            .occupied(),
        "walls are one-sided; either side of the shared edge blocks the spread",
    );
    match &events[0] {
        Event::CellsSpread { spread, .. } => assert_eq!(spread.len(), 3),
        other => panic!("expected CellsSpread, got {other:?}"),
    }
}

#[test]
fn a_corner_divide_stays_inside_the_grid() {
    let mut subject = field(2, 2, &[OCCUPIED, EMPTY, EMPTY, EMPTY]);
    let mut events = Vec::new();

    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(0, 0),
        },
        &mut events,
    );

    assert_eq!(
        occupied_cells(&subject),
        vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(0, 1),
        ],
    );
}

#[test]
fn spreading_into_already_occupied_slots_reports_no_change() {
    let mut subject = field(1, 2, &[OCCUPIED, OCCUPIED]);
    let mut events = Vec::new();

    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(0, 0),
        },
        &mut events,
    );

    assert!(
        events.is_empty(),
        "a divide that occupies no new slot counts as no change",
    );
}

#[test]
fn divide_outside_the_grid_is_rejected() {
    let mut subject = field(2, 2, &[OCCUPIED, EMPTY, EMPTY, EMPTY]);
    let mut events = Vec::new();
    let outside = CellCoord::new(5, 5);

    world::apply(&mut subject, Command::Divide { cell: outside }, &mut events);

    assert_eq!(
        events,
        vec![Event::DivideRejected {
            cell: outside,
            reason: DivideError::OutOfBounds,
        }],
    );
}

#[test]
fn overcrowded_cells_clear_together_from_one_snapshot() {
    // A fully occupied 3x4 grid: both interior cells see 8 occupied
    // neighbors. Clearing either one would drop the other below 8, so this
    // only passes when the schedule is computed before any clearing.
    let walled_source = ALL_WALLS | OCCUPIED;
    #[rustfmt::skip]
    let mut subject = field(3, 4, &[
        walled_source, OCCUPIED, OCCUPIED, OCCUPIED,
        OCCUPIED,      OCCUPIED, OCCUPIED, OCCUPIED,
        OCCUPIED,      OCCUPIED, OCCUPIED, OCCUPIED,
    ]);
    let mut events = Vec::new();

    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(0, 0),
        },
        &mut events,
    );

    let interior = vec![CellCoord::new(1, 1), CellCoord::new(2, 1)];
    assert_eq!(
        events,
        vec![Event::CellsCleared {
            cells: interior.clone(),
        }],
    );
    for cell in interior {
        assert!(!query::slot(&subject, cell)
            .expect("interior cell in bounds")
            .occupied());
    }
    assert_eq!(
        occupied_cells(&subject).len(),
        10,
        "border cells keep their tokens",
    );
}

#[test]
fn border_cells_never_satisfy_the_clear_rule() {
    let walled_source = ALL_WALLS | OCCUPIED;
    let mut subject = field(2, 2, &[walled_source, OCCUPIED, OCCUPIED, OCCUPIED]);
    let mut events = Vec::new();

    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(0, 0),
        },
        &mut events,
    );

    assert!(events.is_empty());
    assert_eq!(
        occupied_cells(&subject).len(),
        4,
        "no cell with fewer than 8 neighbors can ever be cleared",
    );
}

#[test]
fn win_predicate_requires_exact_occupancy_match() {
    let solved = field(1, 2, &[OCCUPIED | WINNING, EMPTY]);
    assert!(query::is_solved(&solved));

    let extra_token = field(1, 2, &[OCCUPIED | WINNING, OCCUPIED]);
    assert!(!query::is_solved(&extra_token));

    let missing_token = field(1, 2, &[WINNING, EMPTY]);
    assert!(!query::is_solved(&missing_token));
}

#[test]
fn solving_the_field_emits_puzzle_solved() {
    // Every slot is a winning target, so filling the grid solves it.
    #[rustfmt::skip]
    let mut subject = field(2, 2, &[
        OCCUPIED | WINNING, WINNING,
        WINNING,            WINNING,
    ]);

    let mut events = Vec::new();
    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(0, 0),
        },
        &mut events,
    );
    assert!(
        !events.contains(&Event::PuzzleSolved),
        "three of four targets occupied is not a win",
    );

    events.clear();
    world::apply(
        &mut subject,
        Command::Divide {
            cell: CellCoord::new(1, 0),
        },
        &mut events,
    );

    assert!(events.contains(&Event::PuzzleSolved));
    assert!(query::is_solved(&subject));
}

#[test]
fn reset_clears_occupancy_but_keeps_walls_and_targets() {
    let mut subject = field(1, 3, &[ALL_WALLS | OCCUPIED, OCCUPIED | WINNING, WINNING]);
    let mut events = Vec::new();

    world::apply(&mut subject, Command::Reset, &mut events);

    assert_eq!(events, vec![Event::FieldReset]);
    assert_eq!(
        subject.to_bytes(),
        vec![1, 3, ALL_WALLS, WINNING, WINNING],
        "walls and winning flags survive a reset",
    );
}

#[test]
fn hit_test_resolves_interior_points_only() {
    let subject = field(2, 3, &[EMPTY; 6]);

    // Tile (1, 0) spans x 40..80, y 0..40; its interior spans 44..76, 4..36.
    assert_eq!(
        query::cell_at_point(&subject, 50, 10),
        Some(CellCoord::new(1, 0)),
    );
    assert_eq!(
        query::cell_at_point(&subject, 40, 10),
        None,
        "a point on the wall band selects nothing",
    );
    assert_eq!(query::cell_at_point(&subject, -3, 5), None);
    assert_eq!(query::cell_at_point(&subject, 500, 5), None);
}

#[test]
fn direct_slot_access_fails_fast_outside_the_grid() {
    let subject = field(2, 2, &[EMPTY; 4]);
    let error = query::slot(&subject, CellCoord::new(2, 0)).expect_err("column out of range");
    assert_eq!(error.cell, CellCoord::new(2, 0));
    assert_eq!(error.columns, 2);
    assert_eq!(error.rows, 2);
}
