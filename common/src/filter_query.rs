//! Query-string form of the filter state, used for the page URL and export links.

use url::form_urlencoded;

use crate::filter_state::{Facet, FacetValue, FilterState};

pub const QUERY_KEY: &str = "q";

/// Serializes every facet as repeated keys, `q` once. Empty facets are left out.
pub fn serialize(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in filter_pairs(state) {
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}

/// Key/value pairs in URL order: `q`, then each facet in [`Facet::ALL`] order.
pub fn filter_pairs(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if !state.query.is_empty() {
        pairs.push((QUERY_KEY, state.query.clone()));
    }
    for value in state.selected_values() {
        pairs.push((value.facet().url_key(), value.to_string()));
    }
    pairs
}

/// Reads a filter state from a query string. A leading `?` is accepted.
///
/// Unknown keys and values a facet cannot hold are skipped, so a hand-edited URL
/// degrades to fewer filters rather than an error.
pub fn hydrate(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::default();
    for (key, raw) in form_urlencoded::parse(query.as_bytes()) {
        if key == QUERY_KEY {
            state.query = raw.into_owned();
            continue;
        }
        let Some(facet) = Facet::ALL.into_iter().find(|facet| facet.url_key() == key) else {
            tracing::debug!("ignoring unknown query parameter {key}");
            continue;
        };
        match FacetValue::parse(facet, &raw) {
            Some(value) => {
                if !state.contains(&value) {
                    state.toggle(&value);
                }
            }
            None => tracing::debug!("ignoring invalid {key} value {raw:?}"),
        }
    }
    state
}
