//! Piece placement: which piece stands on which square. This is the whole of
//! the widget's game state. There is no notion of turns or legality; the only
//! mutation is [`Board::relocate`], driven by drag-and-drop.

use std::fmt;

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square, BOARD_WIDTH};

/// A full set: 16 pieces per player.
pub const PIECE_COUNT: usize = 32;

/// Major pieces of a back rank, from file a to file h.
const BACKRANK_ORDER: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Stable identity of a placed piece, assigned in layout order. Two pieces
/// with the same kind, owner and square still have distinct ids, so an
/// in-progress drag can never confuse them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u8);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One piece standing on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlacedPiece {
    #[allow(missing_docs)]
    pub id: PieceId,
    #[allow(missing_docs)]
    pub piece: Piece,
    #[allow(missing_docs)]
    pub square: Square,
}

/// Result of a successful [`Board::relocate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Relocation {
    /// The piece that moved.
    pub piece: PieceId,
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
    /// Previous occupant of `to`, removed by the relocation.
    pub captured: Option<PieceId>,
}

/// Ordered collection of the pieces on the board. Occupancy is derived by
/// scanning, which is perfectly adequate for 32 pieces mutated once per drop.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Board {
    pieces: ArrayVec<PlacedPiece, PIECE_COUNT>,
}

impl Board {
    /// Standard chess starting layout: back ranks in R N B Q K B N R order,
    /// pawns in front of them.
    ///
    /// ```
    /// use tessera::chess::position::Board;
    ///
    /// assert_eq!(Board::starting().pieces().count(), 32);
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            let backrank = Rank::backrank(player);
            for (file, kind) in File::iter().zip(BACKRANK_ORDER) {
                board.place(Piece::new(player, kind), Square::new(file, backrank));
            }
            let pawn_rank = Rank::pawns_starting(player);
            for file in File::iter() {
                board.place(
                    Piece::new(player, PieceKind::Pawn),
                    Square::new(file, pawn_rank),
                );
            }
        }
        board
    }

    /// A board with no pieces on it.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pieces in stable id order.
    pub fn pieces(&self) -> impl Iterator<Item = &PlacedPiece> {
        self.pieces.iter()
    }

    /// Number of pieces currently on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Looks the piece up by its stable id.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&PlacedPiece> {
        self.pieces.iter().find(|placed| placed.id == id)
    }

    /// The occupant of a square, if any. At most one piece can occupy a
    /// square; [`Self::relocate`] maintains that invariant.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&PlacedPiece> {
        self.pieces.iter().find(|placed| placed.square == square)
    }

    /// Overwrites the piece's square. A different piece already standing on
    /// `to` is removed from the board and reported as captured; relocating a
    /// piece onto its own square captures nothing. Returns `None` when `id`
    /// is not on the board (e.g. it was captured mid-flight).
    pub fn relocate(&mut self, id: PieceId, to: Square) -> Option<Relocation> {
        let index = self.pieces.iter().position(|placed| placed.id == id)?;
        let from = self.pieces[index].square;
        let captured = self
            .pieces
            .iter()
            .find(|placed| placed.square == to && placed.id != id)
            .map(|placed| placed.id);
        self.pieces[index].square = to;
        if let Some(captured) = captured {
            self.pieces.retain(|placed| placed.id != captured);
        }
        Some(Relocation {
            piece: id,
            from,
            to,
            captured,
        })
    }

    fn place(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.piece_at(square).is_none());
        let id = PieceId(u8::try_from(self.pieces.len()).unwrap_or(u8::MAX));
        self.pieces.push(PlacedPiece { id, piece, square });
    }
}

impl fmt::Display for Board {
    /// Renders the placement as an ASCII grid, rank 8 at the top.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}")?;
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(placed) => write!(f, " {}", placed.piece)?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for file in File::iter() {
            write!(f, " {file}")?;
        }
        Ok(())
    }
}
