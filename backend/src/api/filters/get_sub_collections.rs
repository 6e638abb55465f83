use std::collections::BTreeSet;

use common::catalog_ids::{CollectionId, NamedOption, SubCollectionId};
use serde::Deserialize;

use crate::ddi_utils::ddi_http::{DdiApiClient, join_ids};

#[derive(Debug, Deserialize)]
struct SubCollectionsResponse {
    subcollections: Vec<NamedOption<SubCollectionId>>,
}

/// Sub-collections under `collections`; every sub-collection when the set is empty.
pub async fn get_sub_collections(
    client: &DdiApiClient,
    collections: &BTreeSet<CollectionId>,
) -> anyhow::Result<Vec<NamedOption<SubCollectionId>>> {
    let query = [("collections_ids", join_ids(collections))];
    let response: SubCollectionsResponse = client.get_json("get-subcollections-by-collections", &query).await?;
    Ok(response.subcollections)
}
