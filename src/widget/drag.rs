//! Pointer-driven relocation of one piece at a time.
//!
//! The controller is a two-state machine, `idle -> dragging -> idle`. It
//! holds no DOM handles; the view feeds it pointer positions and applies the
//! resulting [`DropOutcome`] to the screen. Keeping it pure makes every
//! transition testable without a browser.

use crate::chess::position::{Board, PieceId, Relocation};
use crate::widget::geometry::{BoardRect, Point};

/// The single in-progress drag. A second press is rejected while this exists,
/// so there is exactly one dragged piece at any time.
#[derive(Copy, Clone, Debug)]
struct ActiveDrag {
    piece: PieceId,
    /// Offset between the pointer and the grabbed element's top-left corner.
    /// Preserving it keeps the piece anchored under the cursor at the same
    /// grip point for the whole drag.
    grip: Point,
    /// Where to draw the free-floating piece, relative to the board origin.
    position: Point,
}

/// What happened to the dragged piece on release.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece was dropped on a square and the board was updated.
    Placed(Relocation),
    /// The pointer was outside the board; the piece snaps back because its
    /// stored square never changed.
    OffBoard,
}

/// Tracks the dragged piece from press to release.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The piece being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<PieceId> {
        self.active.map(|drag| drag.piece)
    }

    /// Current draw position of the floating piece, relative to the board
    /// origin.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.active.map(|drag| drag.position)
    }

    /// Arms a drag for `piece`. `pointer` is the press position and
    /// `piece_origin` the grabbed element's top-left corner, both in viewport
    /// coordinates. Returns `false` without touching any state when a drag is
    /// already in progress: there is one dragged-piece slot, never two.
    pub fn press(
        &mut self,
        piece: PieceId,
        pointer: Point,
        piece_origin: Point,
        rect: &BoardRect,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let grip = Point::new(pointer.x - piece_origin.x, pointer.y - piece_origin.y);
        self.active = Some(ActiveDrag {
            piece,
            grip,
            position: floating(pointer, grip, rect),
        });
        true
    }

    /// Updates the floating position while dragging and returns it. `None`
    /// when idle (stray move events arrive after release and are ignored).
    pub fn drag_to(&mut self, pointer: Point, rect: &BoardRect) -> Option<Point> {
        let drag = self.active.as_mut()?;
        drag.position = floating(pointer, drag.grip, rect);
        Some(drag.position)
    }

    /// Ends the drag. An in-bounds pointer relocates the dragged piece to the
    /// square under it; anything else leaves the board untouched. The drag
    /// state is cleared in every case, including a stale piece id.
    pub fn release(
        &mut self,
        pointer: Point,
        rect: &BoardRect,
        board: &mut Board,
    ) -> Option<DropOutcome> {
        let drag = self.active.take()?;
        match rect.square_at(pointer) {
            Some(square) => board
                .relocate(drag.piece, square)
                .map(DropOutcome::Placed),
            None => Some(DropOutcome::OffBoard),
        }
    }
}

/// The floating piece's draw position: pointer, translated into board
/// coordinates, minus the grip offset.
fn floating(pointer: Point, grip: Point, rect: &BoardRect) -> Point {
    let relative = rect.relative(pointer);
    Point::new(relative.x - grip.x, relative.y - grip.y)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Square;
    use crate::chess::position::PIECE_COUNT;

    const RECT: BoardRect = BoardRect::new(100.0, 50.0, 480.0, 480.0);

    /// Viewport position of a square's tile corner, where piece elements are
    /// drawn.
    fn tile_corner(square: Square) -> Point {
        let origin = RECT.tile_origin(square);
        Point::new(RECT.left + origin.x, RECT.top + origin.y)
    }

    /// Presses the occupant of `square` a few pixels inside its tile.
    fn press_piece(
        controller: &mut DragController,
        board: &Board,
        square: Square,
    ) -> (PieceId, Point) {
        let piece = board.piece_at(square).expect("square is occupied").id;
        let corner = tile_corner(square);
        let pointer = Point::new(corner.x + 10.0, corner.y + 20.0);
        assert!(controller.press(piece, pointer, corner, &RECT));
        (piece, pointer)
    }

    #[test]
    fn press_records_grip_and_position() {
        let board = Board::starting();
        let mut controller = DragController::new();
        let (piece, pointer) = press_piece(&mut controller, &board, Square::E2);
        assert!(controller.is_dragging());
        assert_eq!(controller.dragged(), Some(piece));
        // Floating position is board-relative and compensates for the grip,
        // so the grabbed corner stays put on press.
        let expected = RECT.relative(Point::new(pointer.x - 10.0, pointer.y - 20.0));
        assert_eq!(controller.position(), Some(expected));
    }

    #[test]
    fn drag_keeps_grip_anchored() {
        let board = Board::starting();
        let mut controller = DragController::new();
        let _ = press_piece(&mut controller, &board, Square::E2);
        let position = controller
            .drag_to(Point::new(400.0, 300.0), &RECT)
            .expect("drag is in progress");
        // pointer - board origin - grip.
        assert_eq!(position, Point::new(400.0 - 100.0 - 10.0, 300.0 - 50.0 - 20.0));
    }

    #[test]
    fn drag_while_idle_is_ignored() {
        let mut controller = DragController::new();
        assert_eq!(controller.drag_to(Point::new(10.0, 10.0), &RECT), None);
    }

    #[test]
    fn second_press_is_rejected() {
        let board = Board::starting();
        let mut controller = DragController::new();
        let (first, _) = press_piece(&mut controller, &board, Square::E2);
        let second = board.piece_at(Square::D2).expect("white pawn on d2").id;
        let corner = tile_corner(Square::D2);
        assert!(!controller.press(second, corner, corner, &RECT));
        // The original drag is untouched.
        assert_eq!(controller.dragged(), Some(first));
    }

    #[test]
    fn release_in_bounds_relocates_only_the_dragged_piece() {
        let mut board = Board::starting();
        let before = board.clone();
        let mut controller = DragController::new();
        let (piece, _) = press_piece(&mut controller, &board, Square::E2);
        let outcome = controller
            .release(tile_corner(Square::E4), &RECT, &mut board)
            .expect("release ends the drag");
        match outcome {
            DropOutcome::Placed(relocation) => {
                assert_eq!(relocation.piece, piece);
                assert_eq!(relocation.from, Square::E2);
                assert_eq!(relocation.to, Square::E4);
                assert_eq!(relocation.captured, None);
            }
            DropOutcome::OffBoard => panic!("drop landed on e4"),
        }
        assert!(!controller.is_dragging());
        // Exactly one piece changed.
        for placed in before.pieces() {
            let after = board.piece(placed.id).expect("no piece was removed");
            if placed.id == piece {
                assert_eq!(after.square, Square::E4);
            } else {
                assert_eq!(after, placed);
            }
        }
    }

    #[test]
    fn release_out_of_bounds_snaps_back() {
        let mut board = Board::starting();
        let before = board.clone();
        let mut controller = DragController::new();
        let _ = press_piece(&mut controller, &board, Square::E2);
        let outcome = controller.release(Point::new(5.0, 5.0), &RECT, &mut board);
        assert_eq!(outcome, Some(DropOutcome::OffBoard));
        assert!(!controller.is_dragging());
        assert_eq!(board, before);
    }

    #[test]
    fn release_onto_occupied_square_captures() {
        let mut board = Board::starting();
        let mut controller = DragController::new();
        let (piece, _) = press_piece(&mut controller, &board, Square::E2);
        let victim = board.piece_at(Square::D7).expect("black pawn on d7").id;
        let outcome = controller
            .release(tile_corner(Square::D7), &RECT, &mut board)
            .expect("release ends the drag");
        assert_eq!(
            outcome,
            DropOutcome::Placed(Relocation {
                piece,
                from: Square::E2,
                to: Square::D7,
                captured: Some(victim),
            })
        );
        assert_eq!(board.len(), PIECE_COUNT - 1);
    }

    #[test]
    fn release_while_idle_is_ignored() {
        let mut board = Board::starting();
        let mut controller = DragController::new();
        assert_eq!(
            controller.release(tile_corner(Square::E4), &RECT, &mut board),
            None
        );
        assert_eq!(board, Board::starting());
    }

    #[test]
    fn drag_is_reusable_after_release() {
        let mut board = Board::starting();
        let mut controller = DragController::new();
        let _ = press_piece(&mut controller, &board, Square::E2);
        let _ = controller.release(Point::new(0.0, 0.0), &RECT, &mut board);
        // A fresh press works once the slot is free again.
        let (piece, _) = press_piece(&mut controller, &board, Square::D2);
        assert_eq!(controller.dragged(), Some(piece));
    }
}
