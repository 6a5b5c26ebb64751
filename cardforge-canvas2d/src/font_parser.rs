//! CSS font shorthand parsing.
//!
//! Parses strings like "bold 40px sans-serif" or "italic 18px 'Noto Sans', serif"
//! into components usable with cosmic-text.

use crate::error::{Canvas2dError, Canvas2dResult};
use cosmic_text::{Style, Weight};

/// Parsed font specification from a CSS font string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFont {
    /// Font style (normal, italic, oblique).
    pub style: Style,
    /// Font weight (100-900).
    pub weight: Weight,
    /// Font size in pixels.
    pub size_px: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for ParsedFont {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            size_px: 10.0,
            families: vec!["sans-serif".to_string()],
        }
    }
}

/// Parse a CSS font string into components.
///
/// Supports `[style] [weight] size[/line-height] family[, family]*`.
/// The size is required; an empty string yields the default font.
pub fn parse_font(font_str: &str) -> Canvas2dResult<ParsedFont> {
    let font_str = font_str.trim();
    if font_str.is_empty() {
        return Ok(ParsedFont::default());
    }

    let mut result = ParsedFont::default();
    let mut rest = font_str;

    // Leading keywords until the first token that starts with a digit or '.'
    loop {
        rest = rest.trim_start();
        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..token_end];
        match token {
            "normal" | "small-caps" => {}
            "italic" => result.style = Style::Italic,
            "oblique" => result.style = Style::Oblique,
            "bold" => result.weight = Weight::BOLD,
            "bolder" => result.weight = Weight::EXTRA_BOLD,
            "lighter" => result.weight = Weight::LIGHT,
            _ => match parse_numeric_weight(token) {
                Some(weight) if token_end < rest.len() => result.weight = weight,
                _ => break,
            },
        }
        rest = &rest[token_end..];
    }

    let (size, after_size) = parse_font_size(rest)?;
    result.size_px = size;
    rest = after_size;

    // Line height is accepted but ignored
    if let Some(after_slash) = rest.strip_prefix('/') {
        rest = after_slash
            .find(char::is_whitespace)
            .map(|i| &after_slash[i..])
            .unwrap_or("");
    }

    let families = parse_font_families(rest);
    if !families.is_empty() {
        result.families = families;
    }

    Ok(result)
}

/// Numeric weights are multiples of 100 in 100..=900.
fn parse_numeric_weight(token: &str) -> Option<Weight> {
    let weight: u16 = token.parse().ok()?;
    ((100..=900).contains(&weight) && weight % 100 == 0).then_some(Weight(weight))
}

/// Parse `<number><unit>` at the start of `s`, returning the size in pixels.
fn parse_font_size(s: &str) -> Canvas2dResult<(f32, &str)> {
    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    if num_end == 0 {
        return Err(Canvas2dError::InvalidFont(format!(
            "Expected font size, got: {s}"
        )));
    }

    let size: f32 = s[..num_end]
        .parse()
        .map_err(|_| Canvas2dError::InvalidFont(format!("Invalid font size: {}", &s[..num_end])))?;
    let rest = &s[num_end..];

    let (multiplier, unit_len) = if rest.starts_with("px") {
        (1.0, 2)
    } else if rest.starts_with("pt") {
        (4.0 / 3.0, 2)
    } else if rest.starts_with("rem") {
        (16.0, 3)
    } else if rest.starts_with("em") {
        (16.0, 2)
    } else {
        (1.0, 0)
    };

    Ok((size * multiplier, &rest[unit_len..]))
}

/// Parse a comma separated family list, stripping quotes.
fn parse_font_families(s: &str) -> Vec<String> {
    s.split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|family| !family.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_font() {
        let font = parse_font("12px Arial").unwrap();
        assert_eq!(font.size_px, 12.0);
        assert_eq!(font.families, vec!["Arial"]);
        assert_eq!(font.weight, Weight::NORMAL);
        assert_eq!(font.style, Style::Normal);
    }

    #[test]
    fn test_bold_font() {
        let font = parse_font("bold 40px sans-serif").unwrap();
        assert_eq!(font.size_px, 40.0);
        assert_eq!(font.weight, Weight::BOLD);
        assert_eq!(font.families, vec!["sans-serif"]);
    }

    #[test]
    fn test_italic_pt_font() {
        let font = parse_font("italic 12pt 'Times New Roman'").unwrap();
        assert!((font.size_px - 16.0).abs() < 0.01);
        assert_eq!(font.style, Style::Italic);
        assert_eq!(font.families, vec!["Times New Roman"]);
    }

    #[test]
    fn test_numeric_weight() {
        let font = parse_font("600 12px Helvetica").unwrap();
        assert_eq!(font.weight, Weight(600));
    }

    #[test]
    fn test_multiple_families_and_line_height() {
        let font = parse_font("16px/20px \"Noto Sans\", Arial, sans-serif").unwrap();
        assert_eq!(font.size_px, 16.0);
        assert_eq!(font.families, vec!["Noto Sans", "Arial", "sans-serif"]);
    }

    #[test]
    fn test_missing_size_is_error() {
        assert!(matches!(
            parse_font("bold Arial"),
            Err(Canvas2dError::InvalidFont(_))
        ));
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_font("").unwrap(), ParsedFont::default());
    }
}
