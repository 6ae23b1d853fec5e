//! Display-value formatting rules selected by per-directive format codes.

/// Stable format-code table for HUD directive values.
///
/// Codes live in chip memory as floating-point cells; [`FormatCode::from_code`]
/// clamps anything outside the defined range to the plain two-decimal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FormatCode {
    /// Value with exactly two decimal digits.
    #[default]
    Float2Decimal = 0,
    /// Value rounded to the nearest integer, no decimals.
    Integer = 1,
    /// Value in 0.0..=1.0 shown as 0–100%, no decimals.
    NormalizedPercent = 2,
    /// Value already in percent units, two decimals.
    Percent = 3,
    /// Temperature in kelvin, two decimals.
    Kelvin = 4,
    /// Temperature in celsius, two decimals.
    Celsius = 5,
    /// Kelvin input displayed as celsius, two decimals.
    CelsiusFromKelvin = 6,
    /// Pressure with unit tiering across Pa, kPa and MPa.
    Pressure = 7,
    /// Volume rounded to whole liters.
    Liters = 8,
}

impl FormatCode {
    /// Converts a format code to its stable in-memory value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Resolves a raw directive code, clamping out-of-range values to
    /// [`FormatCode::Float2Decimal`].
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Integer,
            2 => Self::NormalizedPercent,
            3 => Self::Percent,
            4 => Self::Kelvin,
            5 => Self::Celsius,
            6 => Self::CelsiusFromKelvin,
            7 => Self::Pressure,
            8 => Self::Liters,
            _ => Self::Float2Decimal,
        }
    }
}

/// Formats a raw directive value for display under the given rule.
#[must_use]
pub fn format_value(value: f64, code: FormatCode) -> String {
    match code {
        FormatCode::Float2Decimal => format!("{value:.2}"),
        FormatCode::Integer => round_whole(value).to_string(),
        FormatCode::NormalizedPercent => format!("{}%", round_whole(value * 100.0)),
        FormatCode::Percent => format!("{value:.2}%"),
        FormatCode::Kelvin => format!("{value:.2}°K"),
        FormatCode::Celsius => format!("{value:.2}°C"),
        FormatCode::CelsiusFromKelvin => format!("{:.2}°C", value - 273.15),
        FormatCode::Pressure => format_pressure(value),
        FormatCode::Liters => format!("{}L", round_whole(value)),
    }
}

/// Pressure tiering: sub-kilopascal values surface as whole pascals, the
/// kilopascal band keeps two then zero decimals, and everything from
/// 10 MPa-equivalent up collapses to megapascals.
fn format_pressure(value: f64) -> String {
    if value < 1.0 {
        format!("{}Pa", round_whole(value * 1000.0))
    } else if value < 1000.0 {
        format!("{value:.2}kPa")
    } else if value < 10_000.0 {
        format!("{}kPa", round_whole(value))
    } else {
        format!("{:.2}MPa", value / 1000.0)
    }
}

/// Rounds half away from zero, matching the directive contract examples.
#[allow(clippy::cast_possible_truncation)]
fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::{format_value, FormatCode};

    #[test]
    fn two_decimal_rule_is_the_default_and_the_clamp_target() {
        assert_eq!(format_value(23.4, FormatCode::Float2Decimal), "23.40");
        assert_eq!(FormatCode::from_code(-3), FormatCode::Float2Decimal);
        assert_eq!(FormatCode::from_code(9), FormatCode::Float2Decimal);
        assert_eq!(FormatCode::from_code(i64::MAX), FormatCode::Float2Decimal);
    }

    #[test]
    fn code_roundtrip_is_stable_for_defined_values() {
        for code in 0..=8 {
            let format = FormatCode::from_code(code);
            assert_eq!(i64::from(format.as_u8()), code);
        }
    }

    #[test]
    fn integer_and_liters_round_half_away_from_zero() {
        assert_eq!(format_value(3.7, FormatCode::Integer), "4");
        assert_eq!(format_value(2.5, FormatCode::Integer), "3");
        assert_eq!(format_value(-2.5, FormatCode::Integer), "-3");
        assert_eq!(format_value(3.7, FormatCode::Liters), "4L");
    }

    #[test]
    fn percent_rules_distinguish_normalized_from_raw_input() {
        assert_eq!(format_value(0.5, FormatCode::NormalizedPercent), "50%");
        assert_eq!(format_value(1.0, FormatCode::NormalizedPercent), "100%");
        assert_eq!(format_value(42.5, FormatCode::Percent), "42.50%");
    }

    #[test]
    fn temperature_rules_cover_both_scales_and_the_conversion() {
        assert_eq!(format_value(273.15, FormatCode::Kelvin), "273.15°K");
        assert_eq!(format_value(21.5, FormatCode::Celsius), "21.50°C");
        assert_eq!(format_value(273.15, FormatCode::CelsiusFromKelvin), "0.00°C");
        assert_eq!(format_value(294.65, FormatCode::CelsiusFromKelvin), "21.50°C");
    }

    #[test]
    fn pressure_tiers_switch_units_at_contract_boundaries() {
        assert_eq!(format_value(0.5, FormatCode::Pressure), "500Pa");
        assert_eq!(format_value(0.9994, FormatCode::Pressure), "999Pa");
        assert_eq!(format_value(1.0, FormatCode::Pressure), "1.00kPa");
        assert_eq!(format_value(999.0, FormatCode::Pressure), "999.00kPa");
        assert_eq!(format_value(1000.0, FormatCode::Pressure), "1000kPa");
        assert_eq!(format_value(9999.4, FormatCode::Pressure), "9999kPa");
        assert_eq!(format_value(10_000.0, FormatCode::Pressure), "10.00MPa");
        assert_eq!(format_value(15_000.0, FormatCode::Pressure), "15.00MPa");
    }
}
