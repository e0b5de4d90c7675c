/// Background for labels created without a color (GitHub's default grey).
pub const DEFAULT_LABEL_COLOR: &str = "e1e4e8";

/// Brightness threshold above which dark text reads better.
const BRIGHTNESS_THRESHOLD: u32 = 125;

/// Resolve a label color to six hex digits without the `#`.
///
/// Absent or malformed colors (wrong length, non-hex characters) fall back
/// to [`DEFAULT_LABEL_COLOR`].
pub fn label_color(color: Option<&str>) -> &str {
    color
        .map(|c| c.strip_prefix('#').unwrap_or(c))
        .filter(|c| is_hex_color(c))
        .unwrap_or(DEFAULT_LABEL_COLOR)
}

/// Pick black or white text for a label chip drawn on `color`.
///
/// Uses the W3C perceived-brightness formula. No color at all yields black;
/// a malformed color is judged as the default background.
pub fn contrast_color(color: Option<&str>) -> &'static str {
    let Some(color) = color.filter(|c| !c.is_empty()) else {
        return "#000000";
    };

    let (r, g, b) = parse_rgb(label_color(Some(color))).unwrap_or((0xe1, 0xe4, 0xe8));
    // (r*299 + g*587 + b*114) / 1000 > 125, kept in integers
    if r * 299 + g * 587 + b * 114 > BRIGHTNESS_THRESHOLD * 1000 {
        "#000000"
    } else {
        "#ffffff"
    }
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 6 && color.bytes().all(|b| b.is_ascii_hexdigit())
}

fn parse_rgb(hex: &str) -> Option<(u32, u32, u32)> {
    if !is_hex_color(hex) {
        return None;
    }
    let channel = |i: usize| u32::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_background_gets_black_text() {
        assert_eq!(contrast_color(Some("ffffff")), "#000000");
    }

    #[test]
    fn test_black_background_gets_white_text() {
        assert_eq!(contrast_color(Some("000000")), "#ffffff");
    }

    #[test]
    fn test_absent_color_gets_black_text() {
        assert_eq!(contrast_color(None), "#000000");
        assert_eq!(contrast_color(Some("")), "#000000");
    }

    #[test]
    fn test_threshold_is_strict() {
        // 0x7d = 125: brightness exactly 125 is not "greater than"
        assert_eq!(contrast_color(Some("7d7d7d")), "#ffffff");
        assert_eq!(contrast_color(Some("7e7e7e")), "#000000");
    }

    #[test]
    fn test_typical_label_colors() {
        assert_eq!(contrast_color(Some("0e8a16")), "#ffffff");
        assert_eq!(contrast_color(Some("fbca04")), "#000000");
        assert_eq!(contrast_color(Some("D73A4A")), "#ffffff");
        assert_eq!(contrast_color(Some(DEFAULT_LABEL_COLOR)), "#000000");
    }

    #[test]
    fn test_malformed_color_is_judged_as_default() {
        assert_eq!(contrast_color(Some("00000")), "#000000");
        assert_eq!(contrast_color(Some("zz0000")), "#000000");
        assert_eq!(contrast_color(Some("0000000")), "#000000");
    }

    #[test]
    fn test_leading_hash_is_accepted() {
        assert_eq!(contrast_color(Some("#000000")), "#ffffff");
        assert_eq!(label_color(Some("#0e8a16")), "0e8a16");
    }

    #[test]
    fn test_label_color_fallback() {
        assert_eq!(label_color(None), DEFAULT_LABEL_COLOR);
        assert_eq!(label_color(Some("red")), DEFAULT_LABEL_COLOR);
        assert_eq!(label_color(Some("0e8a16")), "0e8a16");
    }

    #[test]
    fn test_non_ascii_does_not_panic() {
        assert_eq!(label_color(Some("ééé")), DEFAULT_LABEL_COLOR);
        assert_eq!(contrast_color(Some("ééé")), "#000000");
    }
}
