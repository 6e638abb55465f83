use std::collections::BTreeMap;

use common::{decades::DecadeYears, filter_state::FilterScope};
use serde::Deserialize;
use tracing::warn;

use super::scope_params::{parse_year, scope_params};
use crate::ddi_utils::ddi_http::DdiApiClient;

#[derive(Debug, Deserialize)]
struct DecadesResponse {
    decades: BTreeMap<String, Vec<serde_json::Value>>,
}

/// Years with surveys in `scope`, grouped by decade.
///
/// The narrowest non-empty level of the scope wins: surveys, then sub-collections, then collections.
pub async fn get_decades(client: &DdiApiClient, scope: &FilterScope) -> anyhow::Result<DecadeYears> {
    let response: DecadesResponse = client.get_json("get-decades", &scope_params(scope)).await?;
    let mut years = Vec::new();
    for (decade, values) in response.decades {
        for value in values {
            match parse_year(&value) {
                Some(year) => years.push(year),
                None => warn!("skipping unreadable year {} in decade {}", value, decade),
            }
        }
    }
    Ok(DecadeYears::from_years(years))
}
