//! Search endpoint for result lists.

use common::{
    catalog_ids::RowId,
    search_query::SearchParams,
    search_result::{SearchResultItem, SearchResultPage},
};
use serde::Deserialize;
use tracing::warn;

use crate::ddi_utils::{
    ddi_http::DdiApiClient,
    decompose_spans::{decompose_text_into_spans, has_highlight},
};

#[derive(Debug, Deserialize)]
struct SearchForResultsResponse {
    #[serde(rename = "recordsTotal")]
    records_total: u64,
    data: Vec<SearchForResultsRow>,
}

#[derive(Debug, Deserialize)]
struct SearchForResultsRow {
    id: serde_json::Value,
    #[serde(default)]
    variable_name: String,
    #[serde(default)]
    question_text: String,
    #[serde(default)]
    survey_name: String,
    #[serde(default)]
    internal_label: String,
    #[serde(default)]
    categories: String,
    #[serde(default)]
    is_category_search: bool,
    #[serde(default)]
    survey_doi: String,
}

fn row_id(value: &serde_json::Value) -> Option<RowId> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(RowId(s.clone())),
        serde_json::Value::Number(n) => Some(RowId(n.to_string())),
        _ => None,
    }
}

pub async fn search_for_results(client: &DdiApiClient, params: &SearchParams) -> anyhow::Result<SearchResultPage> {
    let response: SearchForResultsResponse = client.post_form("search-results", &params.to_form_pairs()).await?;

    let items = response
        .data
        .into_iter()
        .filter_map(|row| {
            let Some(id) = row_id(&row.id) else {
                warn!("dropping search result without an id: {}", row.id);
                return None;
            };
            let question = if row.question_text.trim().is_empty() {
                &row.internal_label
            } else {
                &row.question_text
            };
            Some(SearchResultItem {
                id,
                question_spans: decompose_text_into_spans(question),
                variable_name_spans: decompose_text_into_spans(&row.variable_name),
                internal_label_spans: decompose_text_into_spans(&row.internal_label),
                has_category_match: row.is_category_search && has_highlight(&row.categories),
                survey_name: row.survey_name,
                survey_doi: row.survey_doi,
                categories_html: row.categories,
            })
        })
        .collect::<Vec<_>>();

    Ok(SearchResultPage {
        params: params.clone(),
        records_total: response.records_total,
        items,
    })
}
