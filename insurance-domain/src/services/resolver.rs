use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::entities::{InsurancePackage, Item, Resolution, ReturnChanceTable};
use crate::ports::{IdGenerator, ItemCatalog, Localisation, RandomSource, TraderDirectory};
use crate::services::item_tree::{
    adopt_orphaned_items, attachment_main_parent, clear_dropped_markers, find_item_and_descendants,
    generate_items_map, is_attachment_attached,
};
use crate::value_objects::RollOutcome;

const MAX_ROLL: u32 = 9999;
const CONVERSION_FACTOR: f64 = 100.0;

/// Main parent id -> attachments currently mounted on it.
pub type ParentAttachmentsMap = HashMap<String, Vec<Item>>;

/// Decides which insured items of a package come back and which were taken.
pub struct InsuranceResolver<'a> {
    catalog: &'a dyn ItemCatalog,
    traders: &'a dyn TraderDirectory,
    ids: &'a dyn IdGenerator,
    locale: &'a dyn Localisation,
}

impl<'a> InsuranceResolver<'a> {
    pub fn new(
        catalog: &'a dyn ItemCatalog,
        traders: &'a dyn TraderDirectory,
        ids: &'a dyn IdGenerator,
        locale: &'a dyn Localisation,
    ) -> Self {
        Self {
            catalog,
            traders,
            ids,
            locale,
        }
    }

    /// Rolls every insured item of `package`, removes the ones that were
    /// taken and leaves the survivors parented under a fresh root.
    pub fn resolve_package(
        &self,
        package: &mut InsurancePackage,
        chances: &ReturnChanceTable,
        rng: &mut dyn RandomSource,
    ) -> Resolution {
        let root_id = self.ids.generate();
        adopt_orphaned_items(&root_id, &mut package.items);

        let deleted = self.find_items_to_delete(&root_id, package, chances, rng);
        package.items.retain(|item| !deleted.contains(&item.id));

        // Removing a parent can orphan siblings that were kept.
        adopt_orphaned_items(&root_id, &mut package.items);
        clear_dropped_markers(&mut package.items);

        Resolution { root_id, deleted }
    }

    pub fn find_items_to_delete(
        &self,
        root_id: &str,
        package: &InsurancePackage,
        chances: &ReturnChanceTable,
        rng: &mut dyn RandomSource,
    ) -> BTreeSet<String> {
        let mut to_delete = BTreeSet::new();
        let mut parent_attachments = self.populate_parent_attachments_map(root_id, package);
        self.process_regular_items(package, chances, rng, &mut to_delete, &mut parent_attachments);

        if !to_delete.is_empty() {
            debug!(
                "insurance package from trader {} loses {} of {} items",
                package.trader_id,
                to_delete.len(),
                package.items.len()
            );
        }
        to_delete
    }

    pub fn populate_parent_attachments_map(
        &self,
        root_id: &str,
        package: &InsurancePackage,
    ) -> ParentAttachmentsMap {
        let items_map = generate_items_map(&package.items);
        let mut parent_attachments = ParentAttachmentsMap::new();

        for item in &package.items {
            let parent_id = item.parent_id.as_deref().unwrap_or_default();
            if !items_map.contains_key(parent_id) && parent_id != root_id {
                warn!(
                    "{}",
                    self.locale.get_text(
                        "insurance-unable_to_find_parent_of_item",
                        &[
                            ("insuredItemId", item.id.as_str()),
                            ("insuredItemTpl", item.tpl.as_str()),
                            ("parentId", parent_id),
                        ],
                    )
                );
                continue;
            }

            if item.is_dropped() {
                continue;
            }

            if !is_attachment_attached(item) {
                continue;
            }

            if !self.catalog.template_exists(&item.tpl) {
                warn!(
                    "{}",
                    self.locale.get_text(
                        "insurance-unable_to_find_attachment_in_db",
                        &[("insuredItemId", item.id.as_str()), ("insuredItemTpl", item.tpl.as_str())],
                    )
                );
                continue;
            }

            let Some(main_parent) = attachment_main_parent(&item.id, &items_map) else {
                warn!(
                    "{}",
                    self.locale.get_text(
                        "insurance-unable_to_find_main_parent_for_attachment",
                        &[
                            ("insuredItemId", item.id.as_str()),
                            ("insuredItemTpl", item.tpl.as_str()),
                            ("parentId", parent_id),
                        ],
                    )
                );
                continue;
            };

            parent_attachments
                .entry(main_parent.id.clone())
                .or_default()
                .push(item.clone());
        }

        parent_attachments
    }

    fn process_regular_items(
        &self,
        package: &InsurancePackage,
        chances: &ReturnChanceTable,
        rng: &mut dyn RandomSource,
        to_delete: &mut BTreeSet<String>,
        parent_attachments: &mut ParentAttachmentsMap,
    ) {
        let dropped: HashMap<&str, bool> = package
            .items
            .iter()
            .map(|item| (item.id.as_str(), item.is_dropped()))
            .collect();

        for item in &package.items {
            // Attachments follow their main parent's roll.
            if is_attachment_attached(item) {
                continue;
            }
            if to_delete.contains(&item.id) {
                continue;
            }

            let outcome = self.roll_for_delete(&package.trader_id, Some(item), chances, rng);
            if !outcome.is_delete() {
                continue;
            }

            if parent_attachments.remove(&item.id).is_some() {
                for id in find_item_and_descendants(&package.items, &item.id) {
                    if dropped.get(id.as_str()).copied().unwrap_or(false) {
                        continue;
                    }
                    to_delete.insert(id);
                }
            } else {
                to_delete.insert(item.id.clone());
            }
        }
    }

    /// One weighted trial: a two-decimal percentage in [0, 99.99] deletes
    /// the item when it reaches the trader's return chance.
    pub fn roll_for_delete(
        &self,
        trader_id: &str,
        item: Option<&Item>,
        chances: &ReturnChanceTable,
        rng: &mut dyn RandomSource,
    ) -> RollOutcome {
        let Some(trader) = self.traders.find_trader(trader_id) else {
            return RollOutcome::NoDecision;
        };
        let Some(return_chance) = chances.get(trader_id) else {
            warn!("no return chance configured for trader {}", trader_id);
            return RollOutcome::NoDecision;
        };

        let roll = f64::from(rng.int_inclusive(0, MAX_ROLL)) / CONVERSION_FACTOR;
        let mut outcome = if roll >= return_chance {
            RollOutcome::Delete
        } else {
            RollOutcome::Keep
        };
        if item.map(Item::is_dropped).unwrap_or(false) {
            outcome = RollOutcome::Keep;
        }

        let item_name = item
            .map(|item| {
                let name = self.catalog.item_name(&item.tpl).unwrap_or_else(|| item.tpl.clone());
                format!(" \"{}\"", name)
            })
            .unwrap_or_default();
        debug!(
            "Rolling{} with {} - Return {}% - Roll: {} - Status: {}",
            item_name,
            trader.nickname,
            return_chance,
            roll,
            outcome.as_str()
        );

        outcome
    }
}
