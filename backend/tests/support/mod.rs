//! In-process imitation of the catalog REST API.

#![allow(dead_code)]

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use ddi_backend::{config::ApiConfig, ddi_utils::ddi_http::DdiApiClient};
use serde_json::{Value, json};

struct SurveyRow {
    collection: u64,
    sub_collection: u64,
    survey: u64,
    year: i32,
}

#[derive(Clone, Default)]
pub struct MockCatalog {
    requests: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
}

impl MockCatalog {
    /// `(endpoint, params)` of every request received so far.
    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &str, params: Vec<(String, String)>) {
        self.requests.lock().unwrap().push((endpoint.to_string(), params));
    }
}

fn survey_rows() -> Vec<SurveyRow> {
    let mut rows = vec![
        SurveyRow { collection: 1, sub_collection: 10, survey: 100, year: 1987 },
        SurveyRow { collection: 1, sub_collection: 10, survey: 101, year: 1988 },
        SurveyRow { collection: 1, sub_collection: 11, survey: 110, year: 1995 },
        SurveyRow { collection: 2, sub_collection: 20, survey: 200, year: 2003 },
    ];
    for offset in 0..5 {
        rows.push(SurveyRow { collection: 5, sub_collection: 50, survey: 500 + offset, year: 1980 + offset as i32 });
        rows.push(SurveyRow { collection: 5, sub_collection: 51, survey: 505 + offset, year: 1985 + offset as i32 });
    }
    rows
}

fn ids(params: &HashMap<String, String>, key: &str) -> BTreeSet<u64> {
    params
        .get(key)
        .map(|raw| raw.split(',').filter_map(|id| id.trim().parse().ok()).collect())
        .unwrap_or_default()
}

fn sorted_pairs(params: &HashMap<String, String>) -> Vec<(String, String)> {
    let mut pairs: Vec<_> = params.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    pairs.sort();
    pairs
}

fn years_in_scope(params: &HashMap<String, String>) -> BTreeSet<i32> {
    let (collections, subs, surveys) =
        (ids(params, "collections_ids"), ids(params, "subcollections_ids"), ids(params, "survey_ids"));
    survey_rows()
        .into_iter()
        .filter(|row| {
            if !surveys.is_empty() {
                surveys.contains(&row.survey)
            } else if !subs.is_empty() {
                subs.contains(&row.sub_collection)
            } else if !collections.is_empty() {
                collections.contains(&row.collection)
            } else {
                true
            }
        })
        .map(|row| row.year)
        .collect()
}

async fn get_collections(State(catalog): State<MockCatalog>) -> Json<Value> {
    catalog.record("get-collections", vec![]);
    Json(json!({"collections": [
        {"id": 1, "name": "Elections"},
        {"id": 2, "name": "Health"},
        {"id": 5, "name": "Labour"},
    ]}))
}

async fn get_subcollections(
    State(catalog): State<MockCatalog>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    catalog.record("get-subcollections-by-collections", sorted_pairs(&params));
    let collections = ids(&params, "collections_ids");
    let subs: BTreeSet<u64> = survey_rows()
        .into_iter()
        .filter(|row| collections.is_empty() || collections.contains(&row.collection))
        .map(|row| row.sub_collection)
        .collect();
    let subs: Vec<Value> = subs.into_iter().map(|id| json!({"id": id, "name": format!("Sub {id}")})).collect();
    Json(json!({ "subcollections": subs }))
}

async fn get_surveys(State(catalog): State<MockCatalog>, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    catalog.record("get-surveys-by-subcollections", sorted_pairs(&params));
    let subs = ids(&params, "subcollections_ids");
    let surveys: Vec<Value> = survey_rows()
        .into_iter()
        .filter(|row| subs.is_empty() || subs.contains(&row.sub_collection))
        .map(|row| json!({"id": row.survey, "name": format!("Survey {}", row.survey)}))
        .collect();
    Json(json!({ "surveys": surveys }))
}

async fn get_decades(State(catalog): State<MockCatalog>, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    catalog.record("get-decades", sorted_pairs(&params));
    let mut decades: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for year in years_in_scope(&params).into_iter().rev() {
        // the catalog is loose about year types
        let value = if year % 2 == 0 { json!(year) } else { json!(year.to_string()) };
        decades.entry(((year / 10) * 10).to_string()).or_default().push(value);
    }
    Json(json!({ "decades": decades }))
}

async fn get_years_by_decade(
    State(catalog): State<MockCatalog>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    catalog.record("get-years-by-decade", sorted_pairs(&params));
    let decade: i32 = params.get("decade").and_then(|d| d.parse().ok()).unwrap_or(0);
    let years: Vec<i32> = years_in_scope(&params)
        .into_iter()
        .filter(|year| (decade..decade + 10).contains(year))
        .collect();
    Json(json!({ "years": years }))
}

async fn search_results(State(catalog): State<MockCatalog>, Form(form): Form<Vec<(String, String)>>) -> Json<Value> {
    catalog.record("search-results", form.clone());
    let limit: usize = form
        .iter()
        .find(|(k, _)| k == "limit")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(10);
    let is_category_search = form.iter().any(|(k, v)| k == "search_location[]" && v == "categories");
    let rows: Vec<Value> = (0..25)
        .take(limit)
        .map(|n| {
            let id = if n % 2 == 0 { json!(format!("q-{n}")) } else { json!(n) };
            let question_text = if n == 1 {
                String::new()
            } else {
                format!(r#"Did you <mark style="background-color: rgba(255, 70, 78, 0.15);">vote</mark> ({n})?"#)
            };
            let categories = if n == 0 {
                "<table class='styled-table'><tr><td class='code-cell'><mark style='x'>1</mark></td></tr></table>"
            } else {
                "<table class='styled-table'></table>"
            };
            json!({
                "id": id,
                "variable_name": format!("V{n}"),
                "question_text": question_text,
                "survey_name": "Panel",
                "internal_label": format!("label {n}"),
                "categories": categories,
                "is_category_search": is_category_search,
                "survey_doi": "10.1000/panel",
                "notes": "N/A",
            })
        })
        .collect();
    Json(json!({ "recordsTotal": 25, "recordsFiltered": 25, "draw": 1, "data": rows }))
}

pub fn router(catalog: MockCatalog) -> Router {
    Router::new()
        .route("/api/v1/get-collections/", get(get_collections))
        .route("/api/v1/get-subcollections-by-collections/", get(get_subcollections))
        .route("/api/v1/get-surveys-by-subcollections/", get(get_surveys))
        .route("/api/v1/get-decades/", get(get_decades))
        .route("/api/v1/get-years-by-decade/", get(get_years_by_decade))
        .route("/api/v1/search-results/", post(search_results))
        .with_state(catalog)
}

/// Serves the mock on an ephemeral port; returns a client pointed at it.
pub async fn spawn_catalog() -> (DdiApiClient, MockCatalog) {
    let catalog = MockCatalog::default();
    let app = router(catalog.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = DdiApiClient::new(ApiConfig {
        base_url: format!("http://{addr}"),
        ..ApiConfig::default()
    })
    .unwrap();
    (client, catalog)
}

pub fn client_with_version(client: &DdiApiClient, api_version: &str) -> DdiApiClient {
    DdiApiClient::new(ApiConfig {
        api_version: api_version.to_string(),
        ..client.config().clone()
    })
    .unwrap()
}
