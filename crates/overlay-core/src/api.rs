//! Host-facing integration contracts for embedding the overlay core.
//!
//! The host simulation owns the chip: its named-address table, its flat
//! memory array, and its device slots. The core consumes that state through
//! the traits here and never mutates it. The integration layer adapts these
//! traits to whatever concrete host API exists; no dynamic lookup happens
//! inside the core.

use crate::color::{named_color, Rgb, PALETTE};

/// Number of device slots addressable by one chip.
pub const DEVICE_SLOT_COUNT: usize = 6;

/// Default HUD font size in points.
pub const DEFAULT_FONT_SIZE: u16 = 40;

/// Smallest accepted HUD font size.
pub const MIN_FONT_SIZE: u16 = 10;

/// Largest accepted HUD font size.
pub const MAX_FONT_SIZE: u16 = 50;

const MAX_POSITION_X: u16 = 1920;
const MAX_POSITION_Y: u16 = 1080;

/// Kind of memory operation about to be dispatched to a device slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum OperationKind {
    /// GET reads from device memory; requires a memory-readable target.
    Get,
    /// PUT writes to device memory; requires a memory-writable target.
    Put,
}

impl OperationKind {
    /// Returns `true` when `device` advertises the capability this
    /// operation kind needs.
    #[must_use]
    pub fn capability_matches(self, device: &dyn LogicDevice) -> bool {
        match self {
            Self::Get => device.is_memory_readable(),
            Self::Put => device.is_memory_writable(),
        }
    }
}

/// Descriptor stored in the chip's named-address table.
///
/// A name maps either to a plain memory address or to a device-slot
/// reference, which may itself be indirect (resolved through the wiring
/// graph by device id).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NamedAddress {
    /// Numeric address into the chip's flat memory array. Stored as the raw
    /// cell value; consumers round to the nearest integer.
    Memory(f64),
    /// Direct device-slot index.
    Device(usize),
    /// Indirect device reference, resolved via
    /// [`ChipView::slot_index_by_id`].
    DeviceById(u64),
}

/// Operand of a PUT/GET instruction designating the target device slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotOperand {
    /// Literal slot index (`d0`..`d5` style operands).
    Direct(usize),
    /// Symbolic alias looked up in the named-address table.
    Alias(String),
}

/// One logical device occupying a chip device slot.
///
/// Capability defaults are all-negative so test doubles and passive hardware
/// only override what they support, mirroring optional downcast hooks on
/// bus-device traits.
pub trait LogicDevice {
    /// Returns `true` when the device services GET memory reads.
    fn is_memory_readable(&self) -> bool {
        false
    }

    /// Returns `true` when the device services PUT memory writes.
    fn is_memory_writable(&self) -> bool {
        false
    }

    /// Returns the passive-relay view of this device, when it is one.
    fn as_passive_relay(&self) -> Option<&dyn PassiveRelay> {
        None
    }
}

/// Relay device that, while inactive, forwards memory operations to the
/// device it is currently wired to.
pub trait PassiveRelay {
    /// Returns `true` while the relay transmits on its own behalf. An active
    /// relay is never substituted.
    fn is_active(&self) -> bool;

    /// Borrowed view of the device this relay currently forwards to, bound
    /// to the relay's lifetime and the wiring graph the core never mutates.
    fn relayed_device(&self) -> Option<&dyn LogicDevice>;
}

/// Read-only view of one simulated chip's state.
pub trait ChipView {
    /// Looks up one named-address entry by exact name.
    fn named_address(&self, name: &str) -> Option<NamedAddress>;

    /// Enumerates every named-address entry.
    ///
    /// Returns `None` when the table is unavailable on the host side, which
    /// the HUD decoder reports as a diagnostic line. The iteration order is
    /// whatever the host mapping yields; it must stay stable within a single
    /// call, and callers must not assume alphabetical or insertion order.
    fn enumerate_named_addresses(
        &self,
    ) -> Option<Box<dyn Iterator<Item = (&str, NamedAddress)> + '_>>;

    /// The chip's flat memory array, or `None` when unavailable. The slice
    /// length is the chip's memory size.
    fn memory(&self) -> Option<&[f64]>;

    /// Device currently occupying `index`, or `None` for an empty or
    /// out-of-range slot.
    fn device_in_slot(&self, index: usize) -> Option<&dyn LogicDevice>;

    /// Resolves an indirect device reference to a concrete slot index
    /// through the host's wiring graph.
    fn slot_index_by_id(&self, id: u64) -> Option<usize>;
}

/// User-configurable presentation defaults.
///
/// These shape only the presentation layer (font, default color, screen
/// offsets); decode and substitution logic never read them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct OverlayConfig {
    /// HUD font size in points, accepted range 10..=50.
    pub font_size: u16,
    /// Named default text color (red, green, blue, yellow, white, black,
    /// cyan, magenta). Unknown names fall back to yellow.
    pub text_color: String,
    /// Horizontal HUD offset from the left screen edge, in pixels.
    pub position_x: u16,
    /// Vertical HUD offset from the top screen edge, in pixels.
    pub position_y: u16,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            text_color: "yellow".to_owned(),
            position_x: 50,
            position_y: 50,
        }
    }
}

impl OverlayConfig {
    /// Font size clamped into the accepted range.
    #[must_use]
    pub const fn clamped_font_size(&self) -> u16 {
        if self.font_size < MIN_FONT_SIZE {
            MIN_FONT_SIZE
        } else if self.font_size > MAX_FONT_SIZE {
            MAX_FONT_SIZE
        } else {
            self.font_size
        }
    }

    /// Screen offsets clamped into the reference 1920x1080 bounds.
    #[must_use]
    pub fn clamped_position(&self) -> (u16, u16) {
        (
            self.position_x.min(MAX_POSITION_X),
            self.position_y.min(MAX_POSITION_Y),
        )
    }

    /// Resolves the configured color name, falling back to yellow.
    #[must_use]
    pub fn resolved_text_color(&self) -> Rgb {
        named_color(&self.text_color).unwrap_or(PALETTE[5])
    }
}
