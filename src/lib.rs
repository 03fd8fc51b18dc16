//! Interactive chessboard widget for the browser.
//!
//! The crate renders an 8x8 board into a host element, places the standard
//! 32-piece starting setup and lets the user relocate one piece at a time by
//! dragging it with the pointer. There is intentionally no rules engine: no
//! move legality, no turns, no check detection. The only mutation the widget
//! performs is overwriting a piece's square on drop.
//!
//! The domain model ([`chess`]) and the drag state machine
//! ([`widget::drag`]) are target-independent and tested natively; only
//! `widget::view` touches the DOM and is compiled for `wasm32` alone.

// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    variant_size_differences
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]

pub mod chess;
pub mod widget;

use shadow_rs::shadow;

shadow!(build);

/// Returns the full widget version that identifies how the mounted build was
/// produced in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}
