// Raid end entities

use serde::{Deserialize, Serialize};

use crate::entities::Item;
use crate::value_objects::ExitStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndRaidRequest {
    #[serde(rename = "exitStatus")]
    pub exit_status: ExitStatus,
    #[serde(rename = "locationName", default)]
    pub location_name: String,
    #[serde(rename = "lostInsuredItems", default)]
    pub lost_insured_items: Vec<Item>,
    /// Equipment recovered from the body after the raid.
    #[serde(rename = "postRaidEquipment", default)]
    pub post_raid_equipment: Vec<Item>,
}
