//! Fixed display palette and named configuration colors.

/// 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Indexed HUD color palette, addressed by per-directive color codes.
///
/// Index order is part of the directive contract: 0 blue, 1 gray, 2 green,
/// 3 orange, 4 red, 5 yellow, 6 white, 7 black, 8 brown, 9 khaki, 10 pink,
/// 11 purple.
pub const PALETTE: [Rgb; 12] = [
    Rgb::new(0, 0, 255),
    Rgb::new(128, 128, 128),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 165, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(0, 0, 0),
    Rgb::new(165, 42, 42),
    Rgb::new(240, 230, 140),
    Rgb::new(255, 192, 203),
    Rgb::new(128, 0, 128),
];

/// Resolves a directive color code to a palette entry.
///
/// Any out-of-range code, negative included, maps to the last entry
/// (purple). That fallback is deliberate contract, never an error.
#[must_use]
pub fn color_from_code(code: i64) -> Rgb {
    usize::try_from(code)
        .ok()
        .and_then(|index| PALETTE.get(index))
        .copied()
        .unwrap_or(PALETTE[PALETTE.len() - 1])
}

/// Resolves a configuration color name, case-insensitively.
///
/// Only the eight names accepted by the settings surface resolve; anything
/// else returns `None` and the caller applies its own default.
#[must_use]
pub fn named_color(name: &str) -> Option<Rgb> {
    match name.to_ascii_lowercase().as_str() {
        "red" => Some(Rgb::new(255, 0, 0)),
        "green" => Some(Rgb::new(0, 255, 0)),
        "blue" => Some(Rgb::new(0, 0, 255)),
        "yellow" => Some(Rgb::new(255, 255, 0)),
        "white" => Some(Rgb::new(255, 255, 255)),
        "black" => Some(Rgb::new(0, 0, 0)),
        "cyan" => Some(Rgb::new(0, 255, 255)),
        "magenta" => Some(Rgb::new(255, 0, 255)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{color_from_code, named_color, Rgb, PALETTE};

    #[test]
    fn palette_has_twelve_entries_with_contract_order() {
        assert_eq!(PALETTE.len(), 12);
        assert_eq!(PALETTE[0], Rgb::new(0, 0, 255));
        assert_eq!(PALETTE[4], Rgb::new(255, 0, 0));
        assert_eq!(PALETTE[11], Rgb::new(128, 0, 128));
    }

    #[test]
    fn in_range_codes_index_the_palette_directly() {
        for (index, color) in PALETTE.iter().enumerate() {
            let code = i64::try_from(index).expect("palette index fits i64");
            assert_eq!(color_from_code(code), *color);
        }
    }

    #[test]
    fn out_of_range_codes_fall_back_to_purple() {
        let purple = PALETTE[11];
        assert_eq!(color_from_code(-1), purple);
        assert_eq!(color_from_code(12), purple);
        assert_eq!(color_from_code(99), purple);
        assert_eq!(color_from_code(i64::MIN), purple);
        assert_eq!(color_from_code(i64::MAX), purple);
    }

    #[test]
    fn named_colors_resolve_case_insensitively() {
        assert_eq!(named_color("Yellow"), Some(Rgb::new(255, 255, 0)));
        assert_eq!(named_color("CYAN"), Some(Rgb::new(0, 255, 255)));
        assert_eq!(named_color("taupe"), None);
    }
}
