//! Widget configuration and the CSS contract shared with the stylesheet.

use crate::chess::core::Piece;

/// Class of the board container element.
pub const BOARD_CLASS: &str = "board";
/// Class shared by all 64 tile elements; each also carries its shade class.
pub const TILE_CLASS: &str = "tile";
/// Class of a piece element sitting on its tile.
pub const PIECE_CLASS: &str = "piece";
/// Class of the free-floating element that follows the pointer mid-drag.
pub const DRAG_CLASS: &str = "piece dragging";

/// Knobs a host page may want to turn. The defaults match the bundled demo
/// page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Base URL the piece sprites are served from, without a trailing slash.
    pub assets_base: String,
}

impl WidgetConfig {
    /// URL of a piece's sprite: `{assets_base}/{kind}_{color}.png`, e.g.
    /// `assets/images/rook_b.png` for a black rook.
    #[must_use]
    pub fn image_url(&self, piece: Piece) -> String {
        format!(
            "{}/{}_{}.png",
            self.assets_base.trim_end_matches('/'),
            piece.kind.name(),
            piece.owner
        )
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            assets_base: "assets/images".to_owned(),
        }
    }
}
