// Item tree operations
// Parent/attachment relationships inside a flat list of items

use std::collections::{HashMap, HashSet, VecDeque};

use crate::entities::Item;

/// Slot used for items that sit directly under a package root.
pub const ROOT_SLOT: &str = "hideout";

const CONTAINER_SLOTS: [&str; 2] = ["hideout", "main"];

const EQUIPMENT_SLOTS: [&str; 15] = [
    "FirstPrimaryWeapon",
    "SecondPrimaryWeapon",
    "Holster",
    "Scabbard",
    "Backpack",
    "SecuredContainer",
    "TacticalVest",
    "ArmorVest",
    "Pockets",
    "Eyewear",
    "FaceCover",
    "Headwear",
    "Earpiece",
    "Dogtag",
    "ArmBand",
];

pub fn generate_items_map(items: &[Item]) -> HashMap<&str, &Item> {
    items.iter().map(|item| (item.id.as_str(), item)).collect()
}

/// Reparents every item whose parent is missing from `items` onto `root_id`.
///
/// Adopted items move into the root slot, which also detaches them.
/// Running it twice yields the same assignments as running it once.
pub fn adopt_orphaned_items(root_id: &str, items: &mut [Item]) {
    let ids: HashSet<String> = items.iter().map(|item| item.id.clone()).collect();
    for item in items.iter_mut() {
        let parent_exists = item
            .parent_id
            .as_deref()
            .map(|parent_id| ids.contains(parent_id))
            .unwrap_or(false);
        if parent_exists {
            continue;
        }
        if item.parent_id.as_deref() == Some(root_id) {
            continue;
        }
        item.parent_id = Some(root_id.to_string());
        item.slot_id = Some(ROOT_SLOT.to_string());
    }
}

/// True when the item is mounted on another item (a mod slot) rather than
/// stored in a container grid, an equipment slot or a cartridge position.
pub fn is_attachment_attached(item: &Item) -> bool {
    let Some(slot_id) = item.slot_id.as_deref() else {
        return false;
    };
    if CONTAINER_SLOTS.contains(&slot_id) || EQUIPMENT_SLOTS.contains(&slot_id) {
        return false;
    }
    slot_id.parse::<f64>().is_err()
}

/// Walks up through attachment links until it reaches a non-attachment item.
pub fn attachment_main_parent<'a>(
    item_id: &str,
    items_map: &HashMap<&str, &'a Item>,
) -> Option<&'a Item> {
    let mut current = *items_map.get(item_id)?;
    let mut visited = HashSet::new();
    while is_attachment_attached(current) {
        if !visited.insert(current.id.as_str()) {
            return None;
        }
        let parent_id = current.parent_id.as_deref()?;
        current = *items_map.get(parent_id)?;
    }
    Some(current)
}

/// Returns the ids of `base_id` and every item below it.
pub fn find_item_and_descendants(items: &[Item], base_id: &str) -> Vec<String> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for item in items {
        if let Some(parent_id) = item.parent_id.as_deref() {
            children.entry(parent_id).or_default().push(item.id.as_str());
        }
    }

    let mut found = Vec::new();
    if !items.iter().any(|item| item.id == base_id) {
        return found;
    }
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([base_id]);
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        found.push(id.to_string());
        if let Some(next) = children.get(id) {
            queue.extend(next.iter().copied());
        }
    }
    found
}

pub fn clear_dropped_markers(items: &mut [Item]) {
    for item in items.iter_mut() {
        item.dropped = None;
    }
}
