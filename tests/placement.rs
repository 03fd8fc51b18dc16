//! Properties of the starting placement and the tile coloring, checked over
//! the public API.

use itertools::Itertools;
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;
use tessera::chess::core::{File, PieceKind, Player, Rank, Shade, Square};
use tessera::chess::position::Board;

#[test]
fn tile_shade_matches_parity() {
    for (file, rank) in File::iter().cartesian_product(Rank::iter()) {
        let square = Square::new(file, rank);
        let expected = if (file as u8 + rank as u8) % 2 == 0 {
            Shade::Dark
        } else {
            Shade::Light
        };
        assert_eq!(square.shade(), expected, "shade of {square}");
    }
}

#[test]
fn adjacent_tiles_never_share_a_shade() {
    for rank in Rank::iter() {
        for (left, right) in File::iter().tuple_windows() {
            assert_ne!(
                Square::new(left, rank).shade(),
                Square::new(right, rank).shade()
            );
        }
    }
    for file in File::iter() {
        for (lower, upper) in Rank::iter().tuple_windows() {
            assert_ne!(
                Square::new(file, lower).shade(),
                Square::new(file, upper).shade()
            );
        }
    }
}

#[test]
fn sixteen_pawns_on_their_ranks() {
    let board = Board::starting();
    for (player, rank) in [(Player::White, Rank::Two), (Player::Black, Rank::Seven)] {
        for file in File::iter() {
            let placed = board
                .piece_at(Square::new(file, rank))
                .unwrap_or_else(|| panic!("expected a pawn on {file}{rank}"));
            assert_eq!(placed.piece.owner, player);
            assert_eq!(placed.piece.kind, PieceKind::Pawn);
        }
    }
    let pawns = board
        .pieces()
        .filter(|placed| placed.piece.kind == PieceKind::Pawn)
        .count();
    assert_eq!(pawns, 16);
}

#[test]
fn back_ranks_in_standard_order() {
    let board = Board::starting();
    let expected = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    for (player, rank) in [(Player::White, Rank::One), (Player::Black, Rank::Eight)] {
        let kinds: Vec<_> = File::iter()
            .map(|file| {
                board
                    .piece_at(Square::new(file, rank))
                    .unwrap_or_else(|| panic!("expected a piece on {file}{rank}"))
                    .piece
            })
            .collect();
        assert!(kinds.iter().all(|piece| piece.owner == player));
        assert_eq!(kinds.iter().map(|piece| piece.kind).collect::<Vec<_>>(), expected);
    }
}

#[test]
fn sixteen_pieces_per_player() {
    let board = Board::starting();
    for player in [Player::White, Player::Black] {
        let count = board
            .pieces()
            .filter(|placed| placed.piece.owner == player)
            .count();
        assert_eq!(count, 16);
    }
}

#[test]
fn at_most_one_piece_per_square() {
    assert!(Board::starting()
        .pieces()
        .map(|placed| placed.square)
        .all_unique());
}

#[test]
fn middle_ranks_start_empty() {
    let board = Board::starting();
    for rank in [Rank::Three, Rank::Four, Rank::Five, Rank::Six] {
        for file in File::iter() {
            assert_eq!(board.piece_at(Square::new(file, rank)), None);
        }
    }
}
