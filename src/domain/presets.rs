//! Age brackets and the target-allocation preset table.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use super::allocation::AssetAllocation;

/// Half-open interval of integer ages: `start <= age < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub start: u32,
    pub end: u32,
}

impl AgeRange {
    pub const fn new(start: u32, end: u32) -> Self {
        AgeRange { start, end }
    }

    pub fn contains(&self, age: u32) -> bool {
        self.start <= age && age < self.end
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// One row of the preset table: an age bracket and its target allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationPreset {
    pub range: AgeRange,
    pub allocation: AssetAllocation,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PresetTableError {
    #[error("preset table must contain at least one bracket")]
    Empty,
}

/// Ordered, mutable table of allocation presets.
///
/// The table is never empty: lookups that match no bracket fall back to the
/// first entry rather than erroring, so every resolution has an answer.
/// Overlapping or gapped ranges are representable on purpose: edits are
/// applied as given, and resolution takes the first match in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetTable {
    presets: Vec<AllocationPreset>,
}

impl Default for PresetTable {
    fn default() -> Self {
        PresetTable {
            presets: vec![
                AllocationPreset {
                    range: AgeRange::new(25, 30),
                    allocation: AssetAllocation::new(20, 30, 25, 25, 0, 0),
                },
                AllocationPreset {
                    range: AgeRange::new(30, 35),
                    allocation: AssetAllocation::new(20, 35, 25, 20, 0, 0),
                },
                AllocationPreset {
                    range: AgeRange::new(35, 40),
                    allocation: AssetAllocation::new(25, 40, 25, 10, 0, 0),
                },
                AllocationPreset {
                    range: AgeRange::new(40, 45),
                    allocation: AssetAllocation::new(30, 45, 20, 5, 0, 0),
                },
                AllocationPreset {
                    range: AgeRange::new(45, 50),
                    allocation: AssetAllocation::new(30, 45, 15, 0, 10, 0),
                },
                AllocationPreset {
                    range: AgeRange::new(50, 55),
                    allocation: AssetAllocation::new(35, 40, 10, 0, 15, 0),
                },
                AllocationPreset {
                    range: AgeRange::new(55, 60),
                    allocation: AssetAllocation::new(40, 35, 5, 0, 20, 0),
                },
                AllocationPreset {
                    range: AgeRange::new(60, 100),
                    allocation: AssetAllocation::new(45, 25, 0, 0, 25, 5),
                },
            ],
        }
    }
}

impl PresetTable {
    /// Build a table from explicit presets. Rejects an empty list since the
    /// fallback entry would not exist.
    pub fn from_presets(presets: Vec<AllocationPreset>) -> Result<Self, PresetTableError> {
        if presets.is_empty() {
            return Err(PresetTableError::Empty);
        }
        Ok(PresetTable { presets })
    }

    pub fn presets(&self) -> &[AllocationPreset] {
        &self.presets
    }

    /// The fallback entry for out-of-range lookups.
    pub fn first(&self) -> &AllocationPreset {
        &self.presets[0]
    }

    /// First preset whose range contains `age`, scanning in table order.
    /// Ages outside every range (too young or too old) resolve to the first
    /// entry, a tolerant default rather than an error.
    pub fn resolve_bracket(&self, age: u32) -> &AllocationPreset {
        self.presets
            .iter()
            .find(|preset| preset.range.contains(age))
            .unwrap_or_else(|| self.first())
    }

    /// Allocation for the preset whose range equals `range` exactly, falling
    /// back to the first entry's allocation when no preset matches.
    pub fn allocation_for_range(&self, range: AgeRange) -> AssetAllocation {
        self.presets
            .iter()
            .find(|preset| preset.range == range)
            .map(|preset| preset.allocation)
            .unwrap_or(self.first().allocation)
    }

    /// Replace the range at position `index`. Out-of-bounds indices are
    /// silently ignored.
    pub fn set_range(&mut self, index: usize, range: AgeRange) {
        if let Some(preset) = self.presets.get_mut(index) {
            preset.range = range;
        }
    }

    /// Replace the allocation of the preset whose range equals `range`
    /// exactly. No-op when no preset matches.
    pub fn set_allocation(&mut self, range: AgeRange, allocation: AssetAllocation) {
        if let Some(preset) = self.presets.iter_mut().find(|p| p.range == range) {
            preset.allocation = allocation;
        }
    }
}

/// Calendar age on `today` for someone born on `date_of_birth`: the year
/// difference, minus one if the birthday has not yet come around this year.
/// A birth date in the future yields zero.
pub fn age_on(today: NaiveDate, date_of_birth: NaiveDate) -> u32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}
