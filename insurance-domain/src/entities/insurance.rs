// Insurance entities

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entities::Item;

/// A record of an item the player paid a trader to insure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuredItem {
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "tid")]
    pub trader_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropped: Option<bool>,
}

impl InsuredItem {
    pub fn new(item_id: impl Into<String>, trader_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            trader_id: trader_id.into(),
            dropped: None,
        }
    }
}

/// One trader's batch of insured items for one player and one raid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePackage {
    #[serde(rename = "traderId")]
    pub trader_id: String,
    #[serde(rename = "scheduledTime")]
    pub scheduled_time: i64,
    #[serde(rename = "locationName", default)]
    pub location_name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl InsurancePackage {
    pub fn new(trader_id: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            trader_id: trader_id.into(),
            scheduled_time: 0,
            location_name: String::new(),
            items,
        }
    }

    pub fn is_due(&self, now: i64) -> bool {
        self.scheduled_time <= now
    }
}

/// A lost item routed to the trader that insured it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossEntry {
    pub session_id: String,
    pub profile_id: String,
    pub item: Item,
    pub trader_id: String,
    #[serde(default)]
    pub dropped: bool,
}

/// Outcome of resolving a single package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub root_id: String,
    pub deleted: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailKind {
    InsuranceStart,
    InsuranceReturned,
    InsuranceFailed,
}

impl MailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailKind::InsuranceStart => "insurance_start",
            MailKind::InsuranceReturned => "insurance_returned",
            MailKind::InsuranceFailed => "insurance_failed",
        }
    }

    pub fn locale_key(&self) -> &'static str {
        match self {
            MailKind::InsuranceStart => "insurance-mail_start",
            MailKind::InsuranceReturned => "insurance-mail_returned",
            MailKind::InsuranceFailed => "insurance-mail_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceMail {
    pub trader_id: String,
    pub kind: MailKind,
    pub text: String,
    #[serde(default)]
    pub items: Vec<Item>,
    pub sent_at: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnSummary {
    pub packages: usize,
    pub returned: usize,
    pub deleted: usize,
}
