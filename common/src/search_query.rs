//! Parameters of one results-grid request.

use serde::{Deserialize, Serialize};

use crate::{
    catalog_ids::{CollectionId, SubCollectionId, SurveyId},
    filter_state::{FilterState, SearchLocation},
    search_const::INITIAL_ROW_LIMIT,
};

/// What the grid asks the search endpoint for. The grid always reads from `start = 0`
/// and grows `limit` instead of paging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub start: u64,
    pub limit: u64,
    pub q: String,
    pub survey: Vec<SurveyId>,
    pub collections: Vec<CollectionId>,
    pub sub_collections: Vec<SubCollectionId>,
    pub search_location: Vec<SearchLocation>,
    pub years: Vec<i32>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            start: 0,
            limit: INITIAL_ROW_LIMIT,
            q: String::new(),
            survey: Vec::new(),
            collections: Vec::new(),
            sub_collections: Vec::new(),
            search_location: Vec::new(),
            years: Vec::new(),
        }
    }
}

impl SearchParams {
    pub fn from_state(state: &FilterState, limit: u64) -> Self {
        Self {
            start: 0,
            limit,
            q: state.query.clone(),
            survey: state.surveys.iter().copied().collect(),
            collections: state.collections.iter().copied().collect(),
            sub_collections: state.sub_collections.iter().copied().collect(),
            search_location: state.search_location.iter().copied().collect(),
            years: state.years.iter().copied().collect(),
        }
    }

    /// Form body for the search endpoint; list fields use the `name[]` convention.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("start".to_string(), self.start.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("q".to_string(), self.q.clone()),
        ];
        pairs.extend(self.survey.iter().map(|id| ("survey[]".to_string(), id.to_string())));
        pairs.extend(self.collections.iter().map(|id| ("collections[]".to_string(), id.to_string())));
        pairs.extend(self.sub_collections.iter().map(|id| ("sub_collections[]".to_string(), id.to_string())));
        pairs.extend(
            self.search_location
                .iter()
                .map(|location| ("search_location[]".to_string(), location.as_str().to_string())),
        );
        pairs.extend(self.years.iter().map(|year| ("years[]".to_string(), year.to_string())));
        pairs
    }
}
