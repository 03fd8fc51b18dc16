//! Captures the package version and Git state at build time so the widget can
//! report exactly which build is mounted in the page.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
