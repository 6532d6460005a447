use std::collections::HashSet;

use tracing::{debug, error};

use crate::entities::{InsuredItem, Item, LossEntry};
use crate::ports::DeathLossPolicy;

/// Who lost the items and how the raid ended.
#[derive(Debug, Clone, Copy)]
pub struct LossContext<'a> {
    pub session_id: &'a str,
    pub profile_id: &'a str,
    pub inventory: &'a [Item],
    pub survived: bool,
    /// Equipment recovered from the body, only known when the player died.
    pub post_raid_equipment: Option<&'a [Item]>,
}

/// Maps lost items onto the traders that insured them.
pub struct LossSetBuilder<'a> {
    policy: &'a dyn DeathLossPolicy,
    simulate_items_being_taken: bool,
}

impl<'a> LossSetBuilder<'a> {
    pub fn new(policy: &'a dyn DeathLossPolicy, simulate_items_being_taken: bool) -> Self {
        Self {
            policy,
            simulate_items_being_taken,
        }
    }

    /// The dropped marker is decided per raid and only travels on the
    /// returned entries; `records` are never modified.
    pub fn build_loss_entries(
        &self,
        context: &LossContext<'_>,
        lost_items: &[Item],
        records: &[InsuredItem],
    ) -> Vec<LossEntry> {
        let recovered: Option<HashSet<&str>> = context
            .post_raid_equipment
            .map(|items| items.iter().map(|item| item.tpl.as_str()).collect());

        if !context.survived {
            debug!(
                "lost insured items = {:?}",
                lost_items.iter().map(|item| item.tpl.as_str()).collect::<Vec<_>>()
            );
            if let Some(recovered) = &recovered {
                debug!("post raid equipment = {:?}", recovered);
            }
        }

        let mut entries = Vec::new();
        for lost_item in lost_items {
            let Some(record) = records
                .iter()
                .find(|record| record.item_id == lost_item.id)
            else {
                error!(
                    "unable to find insurance details for item id: {} with tpl: {}",
                    lost_item.id, lost_item.tpl
                );
                continue;
            };

            let dropped = self.simulate_items_being_taken
                && (context.survived
                    || recovered
                        .as_ref()
                        .is_some_and(|recovered| !recovered.contains(lost_item.tpl.as_str())));

            if self.policy.cannot_be_lost_on_death(lost_item, context.inventory) {
                continue;
            }

            entries.push(LossEntry {
                session_id: context.session_id.to_string(),
                profile_id: context.profile_id.to_string(),
                item: lost_item.clone(),
                trader_id: record.trader_id.clone(),
                dropped,
            });
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::ExemptTemplates;

    fn lost() -> Vec<Item> {
        vec![
            Item::new("gun", "tpl_gun"),
            Item::new("helmet", "tpl_helmet"),
            Item::new("keycard", "tpl_quest"),
        ]
    }

    fn records() -> Vec<InsuredItem> {
        vec![
            InsuredItem::new("gun", "prapor"),
            InsuredItem::new("helmet", "therapist"),
            InsuredItem::new("keycard", "prapor"),
        ]
    }

    fn context<'a>(survived: bool, equipment: Option<&'a [Item]>) -> LossContext<'a> {
        LossContext {
            session_id: "session",
            profile_id: "pmc",
            inventory: &[],
            survived,
            post_raid_equipment: equipment,
        }
    }

    #[test]
    fn skips_items_without_insurance_record() {
        let policy = ExemptTemplates(vec![]);
        let builder = LossSetBuilder::new(&policy, false);
        let records = vec![InsuredItem::new("gun", "prapor")];
        let entries = builder.build_loss_entries(&context(false, None), &lost(), &records);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item.id, "gun");
        assert_eq!(entries[0].trader_id, "prapor");
        assert_eq!(entries[0].session_id, "session");
    }

    #[test]
    fn excludes_items_that_cannot_be_lost() {
        let policy = ExemptTemplates(vec!["tpl_quest"]);
        let builder = LossSetBuilder::new(&policy, false);
        let records = records();
        let entries = builder.build_loss_entries(&context(false, None), &lost(), &records);
        let ids: Vec<&str> = entries.iter().map(|entry| entry.item.id.as_str()).collect();
        assert_eq!(ids, vec!["gun", "helmet"]);
    }

    #[test]
    fn survivor_marks_every_entry_dropped() {
        let policy = ExemptTemplates(vec![]);
        let builder = LossSetBuilder::new(&policy, true);
        let records = records();
        let entries = builder.build_loss_entries(&context(true, None), &lost(), &records);
        assert!(entries.iter().all(|entry| entry.dropped));
        assert!(records.iter().all(|record| record.dropped.is_none()));
    }

    #[test]
    fn death_marks_only_items_missing_from_recovered_equipment() {
        let policy = ExemptTemplates(vec![]);
        let builder = LossSetBuilder::new(&policy, true);
        let equipment = vec![Item::new("other-gun", "tpl_gun")];
        let records = records();
        let entries =
            builder.build_loss_entries(&context(false, Some(&equipment)), &lost(), &records);

        assert!(!entries[0].dropped);
        assert!(entries[1].dropped);
        assert!(records.iter().all(|record| record.dropped.is_none()));
    }

    #[test]
    fn death_without_equipment_marks_nothing() {
        let policy = ExemptTemplates(vec![]);
        let builder = LossSetBuilder::new(&policy, true);
        let records = records();
        let entries = builder.build_loss_entries(&context(false, None), &lost(), &records);
        assert!(entries.iter().all(|entry| !entry.dropped));
    }

    #[test]
    fn disabled_simulation_never_marks() {
        let policy = ExemptTemplates(vec![]);
        let builder = LossSetBuilder::new(&policy, false);
        let records = records();
        let entries = builder.build_loss_entries(&context(true, None), &lost(), &records);
        assert!(entries.iter().all(|entry| !entry.dropped));
    }

    #[test]
    fn exempt_items_produce_no_entry() {
        let policy = ExemptTemplates(vec!["tpl_quest"]);
        let builder = LossSetBuilder::new(&policy, true);
        let records = records();
        let entries = builder.build_loss_entries(&context(true, None), &lost(), &records);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.item.id != "keycard"));
    }

    #[test]
    fn stale_record_marker_is_ignored() {
        let policy = ExemptTemplates(vec![]);
        let builder = LossSetBuilder::new(&policy, true);
        let mut records = records();
        records[0].dropped = Some(true);
        let equipment = vec![Item::new("other-gun", "tpl_gun")];
        let entries =
            builder.build_loss_entries(&context(false, Some(&equipment)), &lost(), &records);
        assert_eq!(entries[0].item.id, "gun");
        assert!(!entries[0].dropped);
    }
}
