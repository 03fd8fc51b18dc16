//! Chessboard domain: squares, pieces and their placement. Rules of play are
//! out of scope here; the widget only needs the identity and geometry of the
//! standard 32-piece setup.

pub mod core;
pub mod position;
