//! HUD decode degradation taxonomy.
//!
//! Substitution has no taxonomy of its own: every resolution miss fails open
//! and the operation proceeds as if the overlay were absent. Decode failures
//! are the one user-visible degradation, surfaced as a single diagnostic line.

use thiserror::Error;

/// Inputs the HUD decoder can find unavailable at refresh time.
///
/// Each variant's display string is the exact text of the diagnostic line
/// that replaces the HUD content for that cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum HudFault {
    /// No chip is present behind the display.
    #[error("HUD unavailable: no chip")]
    ChipUnavailable,
    /// The chip exists but its named-address table is unreachable.
    #[error("HUD unavailable: no named-address table")]
    TableUnavailable,
    /// The chip exists but its memory array is unreachable.
    #[error("HUD unavailable: no memory")]
    MemoryUnavailable,
}
