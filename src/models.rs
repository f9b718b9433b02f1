use serde::{Deserialize, Serialize};

pub const DEFAULT_GOAL_HOURS: f64 = 8.0;

/// The whole persisted document: one goal and every recorded night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub goal: f64,
    #[serde(default)]
    pub entries: Vec<SleepEntry>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL_HOURS,
            entries: Vec::new(),
        }
    }
}

/// One night of sleep. `achieved` is stored, not recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    pub date: String,
    pub slept: f64,
    pub achieved: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddSleepForm {
    pub sleep_date: Option<String>,
    pub hours_slept: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoalForm {
    pub goal_hours: Option<String>,
}
