use std::collections::BTreeSet;

use common::filter_state::FilterScope;
use serde::Deserialize;
use tracing::warn;

use super::scope_params::{parse_year, scope_params};
use crate::ddi_utils::ddi_http::DdiApiClient;

#[derive(Debug, Deserialize)]
struct YearsResponse {
    years: Vec<serde_json::Value>,
}

/// Ascending years of one decade within `scope`.
pub async fn get_years_by_decade(client: &DdiApiClient, decade: i32, scope: &FilterScope) -> anyhow::Result<Vec<i32>> {
    let mut query = vec![("decade", decade.to_string())];
    query.extend(scope_params(scope));
    let response: YearsResponse = client.get_json("get-years-by-decade", &query).await?;
    let mut years = BTreeSet::new();
    for value in &response.years {
        match parse_year(value) {
            Some(year) => {
                years.insert(year);
            }
            None => warn!("skipping unreadable year {} of decade {}", value, decade),
        }
    }
    Ok(years.into_iter().collect())
}
