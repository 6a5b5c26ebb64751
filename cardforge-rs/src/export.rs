//! PNG export of a rendered card.

use crate::error::CardResult;
use crate::renderer::CardSurface;
use std::path::Path;

pub const FALLBACK_FILENAME: &str = "card.png";

/// Encode the surface as PNG. A surface that was never rendered encodes as a
/// fully transparent image.
pub fn export_png(surface: &CardSurface) -> CardResult<Vec<u8>> {
    Ok(surface.context().to_png(Some(surface.ppi()))?)
}

/// Download name for a card: the title with characters that are invalid in
/// file names replaced by `_`, or `card.png` when the title is blank.
pub fn export_filename(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{stem}.png")
}

/// Encode the surface and write it to `path`.
pub fn write_png(surface: &CardSurface, path: &Path) -> CardResult<()> {
    let png = export_png(surface)?;
    std::fs::write(path, png)?;
    log::info!("wrote card to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Dragon Lord", "Dragon Lord.png")]
    #[case("  ", "card.png")]
    #[case("", "card.png")]
    #[case("a/b:c?", "a_b_c_.png")]
    #[case("魔王", "魔王.png")]
    fn test_export_filename(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(export_filename(title), expected);
    }
}
