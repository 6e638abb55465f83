//! Read-only snapshot of the session that the page renders from.

use serde::{Deserialize, Serialize};

use crate::{
    catalog_ids::{CollectionId, NamedOption, RowId, SubCollectionId, SurveyId},
    decades::{CheckState, DecadeYears},
    filter_query,
    filter_state::{Facet, FacetValue, FilterState, SearchLocation},
    search_query::SearchParams,
};

/// Option lists currently offered by each facet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub collections: Vec<NamedOption<CollectionId>>,
    pub sub_collections: Vec<NamedOption<SubCollectionId>>,
    pub surveys: Vec<NamedOption<SurveyId>>,
    pub decades: DecadeYears,
    pub open_decade: Option<DecadeDrillDown>,
}

/// Years of one decade, listed individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeDrillDown {
    pub decade: i32,
    pub years: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterView {
    pub state: FilterState,
    pub options: FilterOptions,
    pub row_limit: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRow {
    pub value: FacetValue,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeRow {
    pub decade: i32,
    pub years: Vec<i32>,
    pub state: CheckState,
}

/// A removable "selected filter" card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterChip {
    pub value: FacetValue,
    pub label: String,
}

impl FilterView {
    /// Count badge of a facet, hidden when nothing is selected.
    pub fn badge(&self, facet: Facet) -> Option<usize> {
        match self.state.count(facet) {
            0 => None,
            count => Some(count),
        }
    }

    /// Checkbox rows of a list facet. Years are offered through [`FilterView::decade_rows`].
    pub fn option_rows(&self, facet: Facet) -> Vec<OptionRow> {
        let values: Vec<FacetValue> = match facet {
            Facet::SearchLocation => SearchLocation::ALL.into_iter().map(FacetValue::SearchLocation).collect(),
            Facet::Collections => self.options.collections.iter().map(|o| FacetValue::Collection(o.id)).collect(),
            Facet::SubCollections => self.options.sub_collections.iter().map(|o| FacetValue::SubCollection(o.id)).collect(),
            Facet::Surveys => self.options.surveys.iter().map(|o| FacetValue::Survey(o.id)).collect(),
            Facet::Years => match &self.options.open_decade {
                Some(drill_down) => drill_down.years.iter().copied().map(FacetValue::Year).collect(),
                None => Vec::new(),
            },
        };
        values
            .into_iter()
            .map(|value| OptionRow { label: self.label(&value), checked: self.state.contains(&value), value })
            .collect()
    }

    pub fn decade_rows(&self) -> Vec<DecadeRow> {
        self.options
            .decades
            .newest_first()
            .map(|(decade, years)| DecadeRow {
                decade,
                years: years.to_vec(),
                state: self.options.decades.check_state(decade, &self.state.years),
            })
            .collect()
    }

    /// Display label of a facet value, falling back to the raw value when the option is not listed.
    pub fn label(&self, value: &FacetValue) -> String {
        fn find<I: PartialEq>(options: &[NamedOption<I>], id: &I) -> Option<String> {
            options.iter().find(|o| &o.id == id).map(|o| o.name.clone())
        }
        let found = match value {
            FacetValue::SearchLocation(location) => Some(location.label().to_string()),
            FacetValue::Collection(id) => find(&self.options.collections, id),
            FacetValue::SubCollection(id) => find(&self.options.sub_collections, id),
            FacetValue::Survey(id) => find(&self.options.surveys, id),
            FacetValue::Year(_) => None,
        };
        found.unwrap_or_else(|| value.to_string())
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        self.state
            .selected_values()
            .into_iter()
            .map(|value| FilterChip { label: self.label(&value), value })
            .collect()
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams::from_state(&self.state, self.row_limit)
    }

    pub fn url_query(&self) -> String {
        filter_query::serialize(&self.state)
    }

    /// State of the "select all" checkbox over the rows currently shown.
    pub fn rows_check_state(&self, shown: &[RowId]) -> CheckState {
        let checked = shown.iter().filter(|row| self.state.selected_rows.contains(row)).count();
        CheckState::from_counts(checked, shown.len())
    }
}
