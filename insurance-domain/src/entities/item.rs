// Item entity
// A node in a player's tree of possessions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub tpl: String,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "slotId", default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropped: Option<bool>,
}

impl Item {
    pub fn new(id: impl Into<String>, tpl: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tpl: tpl.into(),
            parent_id: None,
            slot_id: None,
            dropped: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>, slot_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self.slot_id = Some(slot_id.into());
        self
    }

    pub fn with_dropped(mut self, dropped: bool) -> Self {
        self.dropped = Some(dropped);
        self
    }

    pub fn is_dropped(&self) -> bool {
        self.dropped.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub tpl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
