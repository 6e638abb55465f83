//! Grouping of survey years into decades for the year facet.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// First year of the decade containing `year`.
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Checkbox state that can also be partially set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl CheckState {
    /// State of a group control given how many of its `total` members are selected.
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if total == 0 || selected == 0 {
            CheckState::Unchecked
        } else if selected >= total {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }
}

/// Years with data, keyed by decade. Years inside each decade are ascending and unique.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecadeYears(BTreeMap<i32, Vec<i32>>);

impl DecadeYears {
    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Self {
        let mut decades: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for year in years.into_iter().collect::<BTreeSet<_>>() {
            decades.entry(decade_of(year)).or_default().push(year);
        }
        DecadeYears(decades)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn years_in(&self, decade: i32) -> &[i32] {
        self.0.get(&decade).map(|years| years.as_slice()).unwrap_or(&[])
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years_in(decade_of(year)).binary_search(&year).is_ok()
    }

    pub fn all_years(&self) -> BTreeSet<i32> {
        self.0.values().flatten().copied().collect()
    }

    /// Decades in display order, most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = (i32, &[i32])> {
        self.0.iter().rev().map(|(decade, years)| (*decade, years.as_slice()))
    }

    /// Ternary state of a decade checkbox against the selected years.
    pub fn check_state(&self, decade: i32, selected: &BTreeSet<i32>) -> CheckState {
        let available = self.years_in(decade);
        let selected_count = available.iter().filter(|year| selected.contains(year)).count();
        CheckState::from_counts(selected_count, available.len())
    }
}

impl From<BTreeMap<i32, Vec<i32>>> for DecadeYears {
    // The backend groups already, but regroup so a mislabelled key cannot leak through.
    fn from(value: BTreeMap<i32, Vec<i32>>) -> Self {
        DecadeYears::from_years(value.into_values().flatten())
    }
}
