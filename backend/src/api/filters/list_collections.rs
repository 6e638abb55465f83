//! Top level collections, fixed for the life of the page.

use common::catalog_ids::{CollectionId, NamedOption};
use serde::Deserialize;

use crate::ddi_utils::ddi_http::DdiApiClient;

#[derive(Debug, Deserialize)]
struct ListCollectionsResponse {
    collections: Vec<NamedOption<CollectionId>>,
}

pub async fn list_collections(client: &DdiApiClient) -> anyhow::Result<Vec<NamedOption<CollectionId>>> {
    let response: ListCollectionsResponse = client.get_json("get-collections", &[]).await?;
    Ok(response.collections)
}
