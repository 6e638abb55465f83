//! [`FilterResolver`] over the catalog HTTP API.

use std::collections::BTreeSet;

use common::{
    catalog_ids::{CollectionId, NamedOption, SubCollectionId, SurveyId},
    decades::DecadeYears,
    filter_session::surface::{FilterResolver, ResolveError},
    filter_state::FilterScope,
};

use crate::{
    api::filters,
    ddi_utils::ddi_http::{CatalogStatusError, DdiApiClient},
};

#[derive(Debug, Clone)]
pub struct DdiApiResolver {
    client: DdiApiClient,
}

impl DdiApiResolver {
    pub fn new(client: DdiApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DdiApiClient {
        &self.client
    }
}

/// Sorts an `anyhow` failure into the kinds the session tells apart.
pub fn to_resolve_error(e: anyhow::Error) -> ResolveError {
    if let Some(status) = e.downcast_ref::<CatalogStatusError>() {
        return ResolveError::Status { status: status.status, body: status.body.clone() };
    }
    if let Some(err) = e.downcast_ref::<reqwest::Error>() {
        return ResolveError::Transport(err.to_string());
    }
    ResolveError::Decode(format!("{:#}", e))
}

impl FilterResolver for DdiApiResolver {
    async fn resolve_sub_collections(
        &self,
        collections: &BTreeSet<CollectionId>,
    ) -> Result<Vec<NamedOption<SubCollectionId>>, ResolveError> {
        filters::get_sub_collections(&self.client, collections)
            .await
            .map_err(to_resolve_error)
    }

    async fn resolve_surveys(
        &self,
        sub_collections: &BTreeSet<SubCollectionId>,
    ) -> Result<Vec<NamedOption<SurveyId>>, ResolveError> {
        filters::get_surveys(&self.client, sub_collections)
            .await
            .map_err(to_resolve_error)
    }

    async fn resolve_decades(&self, scope: &FilterScope) -> Result<DecadeYears, ResolveError> {
        filters::get_decades(&self.client, scope).await.map_err(to_resolve_error)
    }

    async fn resolve_years_in_decade(&self, decade: i32, scope: &FilterScope) -> Result<Vec<i32>, ResolveError> {
        filters::get_years_by_decade(&self.client, decade, scope)
            .await
            .map_err(to_resolve_error)
    }
}
