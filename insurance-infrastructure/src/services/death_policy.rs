use std::collections::HashSet;

use insurance_domain::{generate_items_map, DeathLossPolicy, Item};

const SPECIAL_SLOT_PREFIX: &str = "SpecialSlot";

/// Decides which items stay with a player who died in raid.
///
/// Kept: special-slot items, anything nested (at any depth) in an exempt
/// equipment slot such as the secure container, and exempt templates.
pub struct SlotDeathLossPolicy {
    exempt_slots: HashSet<String>,
    exempt_templates: HashSet<String>,
}

impl SlotDeathLossPolicy {
    pub fn new(exempt_slots: &[String], exempt_templates: &[String]) -> Self {
        Self {
            exempt_slots: exempt_slots.iter().cloned().collect(),
            exempt_templates: exempt_templates.iter().cloned().collect(),
        }
    }

    fn sits_in_exempt_slot(&self, item: &Item, inventory: &[Item]) -> bool {
        let by_id = generate_items_map(inventory);
        let mut current = Some(item);
        let mut seen = HashSet::new();
        while let Some(node) = current {
            if !seen.insert(node.id.as_str()) {
                return false;
            }
            if node
                .slot_id
                .as_deref()
                .is_some_and(|slot| self.exempt_slots.contains(slot))
            {
                return true;
            }
            current = node
                .parent_id
                .as_deref()
                .and_then(|parent_id| by_id.get(parent_id).copied());
        }
        false
    }
}

impl DeathLossPolicy for SlotDeathLossPolicy {
    fn cannot_be_lost_on_death(&self, item: &Item, inventory: &[Item]) -> bool {
        if self.exempt_templates.contains(&item.tpl) {
            return true;
        }
        if item
            .slot_id
            .as_deref()
            .is_some_and(|slot| slot.starts_with(SPECIAL_SLOT_PREFIX))
        {
            return true;
        }
        self.sits_in_exempt_slot(item, inventory)
    }
}
