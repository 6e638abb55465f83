//! Client API calls for the catalog endpoints.

use std::collections::BTreeSet;

use common::{
    catalog_ids::{CollectionId, NamedOption, SubCollectionId, SurveyId},
    decades::DecadeYears,
    filter_state::FilterScope,
    search_query::SearchParams,
    search_result::SearchResultPage,
};
use dioxus::prelude::*;

#[cfg(feature = "server")]
fn to_server_error(e: anyhow::Error) -> ServerFnError {
    dioxus::logger::tracing::error!("catalog request failed: {:#}", e);
    ServerFnError::ServerError { message: e.to_string(), code: 500, details: None }
}

#[server]
pub async fn list_collections() -> Result<Vec<NamedOption<CollectionId>>, ServerFnError> {
    let client = backend::ddi_utils::ddi_http::get_ddi_client().map_err(to_server_error)?;
    let x = backend::api::filters::list_collections(&client).await;
    x.map_err(to_server_error)
}

#[server]
pub async fn get_sub_collections(
    collections: BTreeSet<CollectionId>,
) -> Result<Vec<NamedOption<SubCollectionId>>, ServerFnError> {
    let client = backend::ddi_utils::ddi_http::get_ddi_client().map_err(to_server_error)?;
    let x = backend::api::filters::get_sub_collections(&client, &collections).await;
    x.map_err(to_server_error)
}

#[server]
pub async fn get_surveys(sub_collections: BTreeSet<SubCollectionId>) -> Result<Vec<NamedOption<SurveyId>>, ServerFnError> {
    let client = backend::ddi_utils::ddi_http::get_ddi_client().map_err(to_server_error)?;
    let x = backend::api::filters::get_surveys(&client, &sub_collections).await;
    x.map_err(to_server_error)
}

#[server]
pub async fn get_decades(scope: FilterScope) -> Result<DecadeYears, ServerFnError> {
    let client = backend::ddi_utils::ddi_http::get_ddi_client().map_err(to_server_error)?;
    let x = backend::api::filters::get_decades(&client, &scope).await;
    x.map_err(to_server_error)
}

#[server]
pub async fn get_years_by_decade(decade: i32, scope: FilterScope) -> Result<Vec<i32>, ServerFnError> {
    let client = backend::ddi_utils::ddi_http::get_ddi_client().map_err(to_server_error)?;
    let x = backend::api::filters::get_years_by_decade(&client, decade, &scope).await;
    x.map_err(to_server_error)
}

#[server]
pub async fn search_for_results(params: SearchParams) -> Result<SearchResultPage, ServerFnError> {
    let client = backend::ddi_utils::ddi_http::get_ddi_client().map_err(to_server_error)?;
    let x = backend::api::search::search_for_results(&client, &params).await;
    x.map_err(to_server_error)
}
