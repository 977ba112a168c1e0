//! Property tests for the state transition kernel.
//!
//! Random rollouts from seeded generators check that placements, line clears
//! and the queue shift keep their invariants regardless of which legal move is
//! picked.

use proptest::prelude::*;
use tetrimax_engine::{BOARD_WIDTH, Board, GameState, PieceGenerator, PieceKind, StateError};

fn filled_cells(board: &Board) -> usize {
    board
        .rows()
        .map(|row| row.iter_cells().filter(|c| *c).count())
        .sum()
}

#[test]
fn empty_board_is_never_terminal() {
    for kind in PieceKind::ALL {
        let state = GameState::new(Board::EMPTY, [kind; 3], 0);
        assert!(!state.is_terminal());
    }
}

#[test]
fn out_of_range_column_is_a_collision() {
    let state = GameState::new(Board::EMPTY, [PieceKind::T; 3], 0);
    let err = state
        .place_piece(BOARD_WIDTH, Default::default(), PieceKind::T)
        .unwrap_err();
    assert!(matches!(err, StateError::Collision { column: 10, .. }));
}

#[test]
fn huge_column_is_a_collision() {
    for cache in [false, true] {
        let state = GameState::with_cache(
            Board::EMPTY,
            [PieceKind::S, PieceKind::O, PieceKind::T],
            0,
            cache,
        );
        for column in [usize::MAX, usize::MAX - 1, usize::MAX / 2] {
            for orientation in PieceKind::S.orientations() {
                assert_eq!(state.drop_location(PieceKind::S, column, orientation), None);
                let err = state.place_piece(column, orientation, PieceKind::O).unwrap_err();
                assert!(err.is_collision(), "{err}");
            }
        }
    }
}

proptest! {
    #[test]
    fn rollout_respects_core_invariants(
        seed in any::<u64>(),
        steps in 1usize..60,
        pick in any::<usize>(),
        cache in any::<bool>(),
    ) {
        let mut generator = PieceGenerator::with_seed(seed);
        let mut state = GameState::with_cache(Board::EMPTY, generator.initial_queue(), 0, cache);

        for step in 0..steps {
            let placements = state.legal_placements();
            if placements.is_empty() {
                prop_assert!(state.is_terminal());
                break;
            }
            let placement = placements[(pick + step) % placements.len()];
            let next_piece = generator.next_piece();
            let before = state.clone();

            let next = state.place(placement, next_piece).unwrap();

            // receiver unchanged
            prop_assert_eq!(&state, &before);

            // queue shifts by one and appends the injected piece
            let [_, second, third] = *state.queue();
            prop_assert_eq!(next.queue(), &[second, third, next_piece]);

            // four cells added, ten removed per cleared line
            let cleared = next.lines_cleared() - state.lines_cleared();
            prop_assert!(cleared <= 4);
            prop_assert_eq!(
                filled_cells(next.board()) + cleared * BOARD_WIDTH,
                filled_cells(state.board()) + 4
            );

            // no full row survives a placement
            prop_assert!(next.board().rows().all(|row| !row.is_filled()));

            // memoized and fresh enumerations agree
            let fresh =
                GameState::with_cache(*next.board(), *next.queue(), next.lines_cleared(), !cache);
            prop_assert_eq!(next.legal_placements(), fresh.legal_placements());

            state = next;
        }
    }
}
