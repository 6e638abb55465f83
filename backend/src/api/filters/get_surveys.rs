use std::collections::BTreeSet;

use common::catalog_ids::{NamedOption, SubCollectionId, SurveyId};
use serde::Deserialize;

use crate::ddi_utils::ddi_http::{DdiApiClient, join_ids};

#[derive(Debug, Deserialize)]
struct SurveysResponse {
    surveys: Vec<NamedOption<SurveyId>>,
}

/// Surveys under `sub_collections`; every survey when the set is empty.
pub async fn get_surveys(
    client: &DdiApiClient,
    sub_collections: &BTreeSet<SubCollectionId>,
) -> anyhow::Result<Vec<NamedOption<SurveyId>>> {
    let query = [("subcollections_ids", join_ids(sub_collections))];
    let response: SurveysResponse = client.get_json("get-surveys-by-subcollections", &query).await?;
    Ok(response.surveys)
}
