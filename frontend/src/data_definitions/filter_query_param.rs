//! The filter state as the query string of the search page route.

use std::fmt::Display;

use common::{filter_query, filter_state::FilterState};
use serde::{Deserialize, Serialize};

/// Parsed leniently: unknown keys and malformed values are dropped, never rejected.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FilterQueryParam(pub FilterState);

impl From<&str> for FilterQueryParam {
    fn from(query: &str) -> Self {
        FilterQueryParam(filter_query::hydrate(query))
    }
}

// Display must stay parseable by From<&str>
impl Display for FilterQueryParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", filter_query::serialize(&self.0))
    }
}
