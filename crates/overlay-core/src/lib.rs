//! Core overlay logic for a programmable-chip simulation host.
//!
//! Two capabilities layered over chip state the host already exposes:
//!
//! 1. **Device substitution** ([`substitution`]): PUT/GET memory operations
//!    aimed at an inactive passive relay are transparently redirected to the
//!    device the relay is wired to, for exactly one operation.
//! 2. **HUD decoding** ([`hud`]): named-address entries carrying the reserved
//!    `HUD` prefix are decoded from chip memory into ordered, colored display
//!    lines ready for a presentation layer.
//!
//! The crate never owns chip state. Hosts implement the [`ChipView`] family of
//! traits and call [`resolve_operation_target`], [`lookup_device`] and
//! [`decode_hud`] from their dispatch and refresh paths.

/// Host-facing integration contracts and overlay configuration.
pub mod api;
pub use api::{
    ChipView, LogicDevice, NamedAddress, OperationKind, OverlayConfig, PassiveRelay, SlotOperand,
    DEFAULT_FONT_SIZE, DEVICE_SLOT_COUNT, MAX_FONT_SIZE, MIN_FONT_SIZE,
};

/// Fixed display palette and named configuration colors.
pub mod color;
pub use color::{color_from_code, named_color, Rgb, PALETTE};

/// HUD decode degradation taxonomy.
pub mod fault;
pub use fault::HudFault;

/// Display-value formatting rules selected by per-directive format codes.
pub mod format;
pub use format::{format_value, FormatCode};

/// HUD directive decoding from named addresses and chip memory.
pub mod hud;
pub use hud::{
    decode_hud, HudDirective, HudFrame, HudLine, DIRECTIVE_COLOR_CELL, DIRECTIVE_FORMAT_CELL,
    DIRECTIVE_RESERVED_CELLS, DIRECTIVE_SHOW_CELL, DIRECTIVE_VALUE_CELL, HUD_PREFIX, SHOW_EPSILON,
};

/// Passive-relay substitution for PUT/GET device dispatch.
pub mod substitution;
pub use substitution::{
    lookup_device, resolve_operation_target, resolve_slot_index, SubstitutionScope,
    SubstitutionTable,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
