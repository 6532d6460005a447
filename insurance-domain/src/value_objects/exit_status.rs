// Raid exit status value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExitStatus {
    Survived,
    Killed,
    Left,
    Runner,
    #[serde(alias = "MIA")]
    MissingInAction,
    Transit,
}

impl ExitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitStatus::Survived => "SURVIVED",
            ExitStatus::Killed => "KILLED",
            ExitStatus::Left => "LEFT",
            ExitStatus::Runner => "RUNNER",
            ExitStatus::MissingInAction => "MISSINGINACTION",
            ExitStatus::Transit => "TRANSIT",
        }
    }

    /// Statuses where the body stayed in the raid and gear was lost.
    pub fn is_dead(&self) -> bool {
        matches!(
            self,
            ExitStatus::Killed | ExitStatus::MissingInAction | ExitStatus::Left
        )
    }
}

impl From<&str> for ExitStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "KILLED" => ExitStatus::Killed,
            "LEFT" => ExitStatus::Left,
            "RUNNER" => ExitStatus::Runner,
            "MISSINGINACTION" | "MIA" => ExitStatus::MissingInAction,
            "TRANSIT" => ExitStatus::Transit,
            _ => ExitStatus::Survived,
        }
    }
}
