//! Maps between viewport pixels and board squares.
//!
//! All inputs are in CSS pixels, the coordinate space of both pointer events
//! and bounding-box queries. The board's own bounding box is measured per
//! event rather than cached: the page can scroll or resize the board at any
//! time between two pointer events.

use crate::chess::core::{File, Rank, Square, BOARD_WIDTH};

/// A point in CSS pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Point {
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
}

impl Point {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The board element's bounding box in viewport coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoardRect {
    #[allow(missing_docs)]
    pub left: f64,
    #[allow(missing_docs)]
    pub top: f64,
    #[allow(missing_docs)]
    pub width: f64,
    #[allow(missing_docs)]
    pub height: f64,
}

impl BoardRect {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Width of one tile. The board does not have to be square.
    #[must_use]
    pub fn tile_width(&self) -> f64 {
        self.width / f64::from(BOARD_WIDTH)
    }

    /// Height of one tile.
    #[must_use]
    pub fn tile_height(&self) -> f64 {
        self.height / f64::from(BOARD_WIDTH)
    }

    /// Translates a viewport point into board-relative coordinates.
    #[must_use]
    pub fn relative(&self, point: Point) -> Point {
        Point::new(point.x - self.left, point.y - self.top)
    }

    /// The square under a viewport point: `file = floor((x - left) / (width /
    /// 8))`, `rank = 7 - floor((y - top) / (height / 8))`. `None` when the
    /// point is off the board (including a degenerate zero-size box).
    #[must_use]
    pub fn square_at(&self, point: Point) -> Option<Square> {
        let column = ((point.x - self.left) / self.tile_width()).floor();
        let row = ((point.y - self.top) / self.tile_height()).floor();
        if !(0.0..f64::from(BOARD_WIDTH)).contains(&column)
            || !(0.0..f64::from(BOARD_WIDTH)).contains(&row)
        {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (column, row) = (column as u8, row as u8);
        let file = File::try_from(column).ok()?;
        let rank = Rank::try_from(BOARD_WIDTH - 1 - row).ok()?;
        Some(Square::new(file, rank))
    }

    /// Top-left corner of a square's tile, relative to the board origin.
    #[must_use]
    pub fn tile_origin(&self, square: Square) -> Point {
        let column = f64::from(square.file() as u8);
        let row = f64::from(BOARD_WIDTH - 1 - square.rank() as u8);
        Point::new(column * self.tile_width(), row * self.tile_height())
    }
}
