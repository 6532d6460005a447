use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingPackage {
    pub trader_id: String,
    pub trader_name: String,
    pub location_name: String,
    pub scheduled_time: i64,
    pub item_count: usize,
    pub due: bool,
}
