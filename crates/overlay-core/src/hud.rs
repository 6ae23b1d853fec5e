//! HUD directive decoding from named addresses and chip memory.
//!
//! Once per display refresh the decoder walks the chip's named-address table,
//! picks every entry whose key carries the reserved `HUD` prefix, reads the
//! directive block it points at, and emits one colored line per directive
//! whose show flag is set. Output is recomputed from scratch each cycle; the
//! only cross-cycle state is the caller-held [`HudFrame`] snapshot used to
//! skip redundant redraws.

use crate::api::{ChipView, NamedAddress};
use crate::color::{color_from_code, Rgb, PALETTE};
use crate::fault::HudFault;
use crate::format::{format_value, FormatCode};

/// Reserved named-address key prefix marking a HUD directive.
pub const HUD_PREFIX: &str = "HUD";

/// Cell offset of the displayed value within a directive block.
pub const DIRECTIVE_VALUE_CELL: usize = 0;

/// Cell offset of the show flag within a directive block.
pub const DIRECTIVE_SHOW_CELL: usize = 1;

/// Cell offset of the format code within a directive block.
pub const DIRECTIVE_FORMAT_CELL: usize = 2;

/// Cell offset of the color code within a directive block.
pub const DIRECTIVE_COLOR_CELL: usize = 3;

/// Cells reserved per directive block. Four carry data today; the remaining
/// six are held back so existing programs survive future block growth.
pub const DIRECTIVE_RESERVED_CELLS: usize = 10;

/// Show-flag magnitudes at or below this threshold suppress the line.
pub const SHOW_EPSILON: f64 = 1e-3;

/// Color of the single diagnostic line emitted on decode degradation.
const DIAGNOSTIC_COLOR: Rgb = PALETTE[4];

/// One decoded directive block. Recomputed every refresh, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct HudDirective {
    /// Key as found in the named-address table, prefix included.
    pub key: String,
    /// First cell of the directive block in chip memory.
    pub base_address: usize,
    /// Raw value cell.
    pub value: f64,
    /// Whether the show-flag cell clears the epsilon gate.
    pub should_show: bool,
    /// Format code, already clamped into the defined table.
    pub format: FormatCode,
    /// Display color, already resolved through the palette fallback.
    pub color: Rgb,
}

impl HudDirective {
    /// Renders this directive as its display line.
    #[must_use]
    pub fn to_line(&self) -> HudLine {
        let label = humanize_label(&self.key);
        HudLine {
            text: format!("{label}: {}", format_value(self.value, self.format)),
            color: self.color,
        }
    }
}

/// One render-ready display line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct HudLine {
    /// Text of the line, `<label>: <formatted value>`.
    pub text: String,
    /// Resolved display color.
    pub color: Rgb,
}

/// Caller-held previous-frame snapshot for redraw suppression.
///
/// Purely an optimization for the presentation layer; decoding never depends
/// on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudFrame {
    lines: Vec<HudLine>,
}

impl HudFrame {
    /// Creates an empty frame snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot with freshly decoded lines.
    ///
    /// Returns `true` when the visible content changed since the previous
    /// frame, using ordered field-wise line equality.
    pub fn update(&mut self, lines: Vec<HudLine>) -> bool {
        if self.lines == lines {
            return false;
        }
        self.lines = lines;
        true
    }

    /// Lines captured by the last update.
    #[must_use]
    pub fn lines(&self) -> &[HudLine] {
        &self.lines
    }
}

/// Decodes the chip's HUD directives into ordered display lines.
///
/// `None` models a host with no chip behind the display. When the chip, its
/// named-address table, or its memory array is unavailable the result is
/// exactly one diagnostic line; an empty table yields an empty line list with
/// no diagnostic. Line order follows the table's enumeration order and is
/// stable within a single call.
#[must_use]
pub fn decode_hud(chip: Option<&dyn ChipView>) -> Vec<HudLine> {
    match decode_directives(chip) {
        Ok(lines) => lines,
        Err(fault) => {
            tracing::warn!(%fault, "hud decode degraded to a diagnostic line");
            vec![HudLine {
                text: fault.to_string(),
                color: DIAGNOSTIC_COLOR,
            }]
        }
    }
}

fn decode_directives(chip: Option<&dyn ChipView>) -> Result<Vec<HudLine>, HudFault> {
    let chip = chip.ok_or(HudFault::ChipUnavailable)?;
    let entries = chip
        .enumerate_named_addresses()
        .ok_or(HudFault::TableUnavailable)?;
    let memory = chip.memory().ok_or(HudFault::MemoryUnavailable)?;

    let mut lines = Vec::new();
    for (key, descriptor) in entries {
        if !key.starts_with(HUD_PREFIX) {
            continue;
        }
        let Some(directive) = read_directive(key, descriptor, memory) else {
            tracing::debug!(key, "skipped hud directive with unusable address");
            continue;
        };
        if directive.should_show {
            lines.push(directive.to_line());
        }
    }
    Ok(lines)
}

/// Reads one directive block, or `None` when the entry does not point at a
/// fully in-bounds block. Skips are silent by contract.
fn read_directive(key: &str, descriptor: NamedAddress, memory: &[f64]) -> Option<HudDirective> {
    let NamedAddress::Memory(raw_address) = descriptor else {
        return None;
    };
    let base = cell_address(raw_address)?;
    let reserved_end = base.checked_add(DIRECTIVE_RESERVED_CELLS - 1)?;
    if reserved_end >= memory.len() {
        return None;
    }

    let block = &memory[base..=base + DIRECTIVE_COLOR_CELL];
    Some(HudDirective {
        key: key.to_owned(),
        base_address: base,
        value: block[DIRECTIVE_VALUE_CELL],
        should_show: block[DIRECTIVE_SHOW_CELL].abs() > SHOW_EPSILON,
        format: FormatCode::from_code(whole_cell(block[DIRECTIVE_FORMAT_CELL])),
        color: color_from_code(whole_cell(block[DIRECTIVE_COLOR_CELL])),
    })
}

/// Interprets a raw cell as a memory address: round to nearest, reject
/// negative and non-finite values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cell_address(raw: f64) -> Option<usize> {
    if !raw.is_finite() {
        return None;
    }
    let rounded = raw.round();
    #[allow(clippy::cast_precision_loss)]
    if rounded < 0.0 || rounded > usize::MAX as f64 {
        return None;
    }
    Some(rounded as usize)
}

/// Interprets a raw cell as a small integer code, saturating at i64 bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_cell(raw: f64) -> i64 {
    if raw.is_nan() {
        return i64::MIN;
    }
    raw.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64
}

/// Strips the reserved prefix and inserts a space before every internal
/// uppercase letter. The first character is never altered regardless of case.
fn humanize_label(key: &str) -> String {
    let stripped = key.strip_prefix(HUD_PREFIX).unwrap_or(key);
    let mut label = String::with_capacity(stripped.len() + 4);
    for (position, ch) in stripped.chars().enumerate() {
        if position > 0 && ch.is_uppercase() {
            label.push(' ');
        }
        label.push(ch);
    }
    label
}
