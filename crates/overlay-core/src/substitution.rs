//! Passive-relay substitution for PUT/GET device dispatch.
//!
//! Before the host dispatches a PUT or GET to a device slot, it asks the
//! resolver whether that slot holds an inactive passive relay. If so, and the
//! relayed device matches the operation's capability, a substitution is
//! recorded in a per-operation table. The host's own device lookup then runs
//! through [`lookup_device`], which returns the substitute for exactly the one
//! lookup that follows; every other path sees the slot's real occupant.
//!
//! Every resolution miss fails open: no substitution is recorded and the
//! operation is indistinguishable from one dispatched without this crate
//! loaded. The table must be empty again by the end of the operation on every
//! exit path, which [`SubstitutionScope`] guarantees.

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::api::{
    ChipView, LogicDevice, NamedAddress, OperationKind, SlotOperand, DEVICE_SLOT_COUNT,
};

/// Per-operation substitution table.
///
/// Holds at most one substitute device per slot plus the flag gating
/// [`lookup_device`]. Scoped to a single PUT/GET: created (or scoped) at the
/// dispatch boundary and cleared unconditionally when the operation ends.
/// Never shared across operations or threads.
pub struct SubstitutionTable<'chip> {
    entries: [Option<&'chip dyn LogicDevice>; DEVICE_SLOT_COUNT],
    active: bool,
}

impl<'chip> SubstitutionTable<'chip> {
    /// Creates an empty, inactive table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: [None; DEVICE_SLOT_COUNT],
            active: false,
        }
    }

    /// Records a substitute device for `index` and arms the table.
    ///
    /// Out-of-range indices are ignored; the table only covers real slots.
    pub fn set(&mut self, index: usize, device: &'chip dyn LogicDevice) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = Some(device);
            self.active = true;
        }
    }

    /// Removes the substitution for one slot, leaving the flag untouched.
    pub fn remove(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = None;
        }
    }

    /// Substitute recorded for `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'chip dyn LogicDevice> {
        self.entries.get(index).copied().flatten()
    }

    /// Whether any substitution is armed for the current operation.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Unconditionally empties the table and disarms the flag.
    pub fn clear_all(&mut self) {
        self.entries = [None; DEVICE_SLOT_COUNT];
        self.active = false;
    }

    /// Scopes this table to one operation: the returned guard dereferences
    /// to the table and clears it when dropped, error and panic paths
    /// included.
    pub fn scope(&mut self) -> SubstitutionScope<'_, 'chip> {
        SubstitutionScope { table: self }
    }
}

impl Default for SubstitutionTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubstitutionTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupancy: [bool; DEVICE_SLOT_COUNT] = self.entries.map(|entry| entry.is_some());
        f.debug_struct("SubstitutionTable")
            .field("occupied", &occupancy)
            .field("active", &self.active)
            .finish()
    }
}

/// Drop guard tying a [`SubstitutionTable`] to one memory operation.
///
/// The table is cleared when the guard drops, so substitution state can never
/// leak past the PUT/GET it was recorded for, even if the host's dispatch
/// errors or unwinds.
#[derive(Debug)]
pub struct SubstitutionScope<'table, 'chip> {
    table: &'table mut SubstitutionTable<'chip>,
}

impl<'chip> Deref for SubstitutionScope<'_, 'chip> {
    type Target = SubstitutionTable<'chip>;

    fn deref(&self) -> &Self::Target {
        self.table
    }
}

impl DerefMut for SubstitutionScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.table
    }
}

impl Drop for SubstitutionScope<'_, '_> {
    fn drop(&mut self) {
        self.table.clear_all();
    }
}

/// Resolves a PUT/GET operand to a concrete device-slot index.
///
/// Direct operands pass through untouched. Aliases resolve through the
/// named-address table; indirect device references resolve through the
/// chip's wiring graph. `None` means the operand does not designate a slot
/// at all — callers must fail open rather than fall back to slot 0.
#[must_use]
pub fn resolve_slot_index(chip: &dyn ChipView, operand: &SlotOperand) -> Option<usize> {
    match operand {
        SlotOperand::Direct(index) => Some(*index),
        SlotOperand::Alias(name) => match chip.named_address(name)? {
            NamedAddress::Device(index) => Some(index),
            NamedAddress::DeviceById(id) => chip.slot_index_by_id(id),
            NamedAddress::Memory(_) => None,
        },
    }
}

/// Resolves the target of one PUT/GET and records a relay substitution when
/// one applies.
///
/// Returns the concrete slot index the operation targets, or `None` when the
/// operand does not resolve (the operation then proceeds unmodified). The
/// returned index is always the original slot, never the substitute: the
/// swap happens inside [`lookup_device`] so that unrelated lookup paths keep
/// their behavior.
pub fn resolve_operation_target<'chip>(
    chip: &'chip dyn ChipView,
    operand: &SlotOperand,
    kind: OperationKind,
    table: &mut SubstitutionTable<'chip>,
) -> Option<usize> {
    let index = resolve_slot_index(chip, operand)?;
    if let Some(device) = substitute_for(chip, index, kind) {
        tracing::debug!(index, ?kind, "recorded passive-relay substitution");
        table.set(index, device);
    }
    Some(index)
}

/// Device-lookup interception point for the host's slot lookup.
///
/// Returns the recorded substitute iff the table is armed and holds an entry
/// for `index`; otherwise the slot's real occupant. Hosts route every
/// slot-index device lookup performed during PUT/GET dispatch through this
/// function.
#[must_use]
pub fn lookup_device<'chip>(
    chip: &'chip dyn ChipView,
    index: usize,
    table: &SubstitutionTable<'chip>,
) -> Option<&'chip dyn LogicDevice> {
    if table.is_active() {
        if let Some(device) = table.get(index) {
            return Some(device);
        }
    }
    chip.device_in_slot(index)
}

/// Substitute for `index`, when the slot holds an inactive passive relay
/// whose relayed device exists and matches the operation capability. Every
/// other configuration is a silent miss.
fn substitute_for<'chip>(
    chip: &'chip dyn ChipView,
    index: usize,
    kind: OperationKind,
) -> Option<&'chip dyn LogicDevice> {
    let relay = chip.device_in_slot(index)?.as_passive_relay()?;
    if relay.is_active() {
        return None;
    }
    let relayed = relay.relayed_device()?;
    kind.capability_matches(relayed).then_some(relayed)
}

#[cfg(test)]
mod tests {
    use super::{SubstitutionTable, DEVICE_SLOT_COUNT};
    use crate::api::LogicDevice;

    struct Stub;

    impl LogicDevice for Stub {
        fn is_memory_readable(&self) -> bool {
            true
        }
    }

    #[test]
    fn new_table_is_empty_and_disarmed() {
        let table = SubstitutionTable::new();
        assert!(!table.is_active());
        for index in 0..DEVICE_SLOT_COUNT {
            assert!(table.get(index).is_none());
        }
    }

    #[test]
    fn set_arms_the_table_and_clear_all_disarms_it() {
        let stub = Stub;
        let mut table = SubstitutionTable::new();
        table.set(2, &stub);
        assert!(table.is_active());
        assert!(table.get(2).is_some());

        table.clear_all();
        assert!(!table.is_active());
        assert!(table.get(2).is_none());
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let stub = Stub;
        let mut table = SubstitutionTable::new();
        table.set(DEVICE_SLOT_COUNT, &stub);
        assert!(!table.is_active());
        assert!(table.get(DEVICE_SLOT_COUNT).is_none());
    }

    #[test]
    fn remove_clears_one_slot_only() {
        let stub = Stub;
        let mut table = SubstitutionTable::new();
        table.set(0, &stub);
        table.set(3, &stub);
        table.remove(0);
        assert!(table.get(0).is_none());
        assert!(table.get(3).is_some());
        assert!(table.is_active());
    }

    #[test]
    fn scope_guard_clears_on_drop() {
        let stub = Stub;
        let mut table = SubstitutionTable::new();
        {
            let mut scope = table.scope();
            scope.set(1, &stub);
            assert!(scope.is_active());
        }
        assert!(!table.is_active());
        assert!(table.get(1).is_none());
    }

    #[test]
    fn debug_output_never_touches_device_contents() {
        let stub = Stub;
        let mut table = SubstitutionTable::new();
        table.set(4, &stub);
        let rendered = format!("{table:?}");
        assert!(rendered.contains("active: true"));
        assert!(rendered.contains("occupied"));
    }
}
