use crate::errors::InvalidNumericInput;
use crate::models::{AppData, SleepEntry};

/// Whether recording a night created a new entry or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Added,
    Updated,
}

/// Parses a form value as a strictly positive, finite number of hours.
pub fn parse_hours(raw: Option<&str>) -> Result<f64, InvalidNumericInput> {
    let invalid = || InvalidNumericInput {
        raw: raw.map(str::to_owned),
    };

    let value = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(invalid)?
        .parse::<f64>()
        .map_err(|_| invalid())?;

    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

impl AppData {
    /// Overwrites the first entry for `date`, or appends a new one.
    pub fn record_sleep(&mut self, date: &str, hours: f64) -> EntryOutcome {
        let achieved = hours >= self.goal;
        match self.entries.iter_mut().find(|entry| entry.date == date) {
            Some(entry) => {
                entry.slept = hours;
                entry.achieved = achieved;
                EntryOutcome::Updated
            }
            None => {
                self.entries.push(SleepEntry {
                    date: date.to_owned(),
                    slept: hours,
                    achieved,
                });
                EntryOutcome::Added
            }
        }
    }

    /// Replaces the goal and re-derives `achieved` for every entry.
    pub fn set_goal(&mut self, goal: f64) {
        self.goal = goal;
        for entry in &mut self.entries {
            entry.achieved = entry.slept >= goal;
        }
    }

    pub fn achieved_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.achieved).count()
    }
}
